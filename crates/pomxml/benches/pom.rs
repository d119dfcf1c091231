use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use pomxml::{from_str, to_string, Node, Properties};

const SERVICE_POM: &str = include_str!("../tests/fixtures/valid/service.xml");
const CONFIGURATION: &str = "<configuration><archive><manifest>\
    <mainClass>org.example.Main</mainClass><addClasspath>true</addClasspath>\
    </manifest></archive><compilerArgs><arg>-Xlint:all</arg><arg>-parameters</arg>\
    </compilerArgs></configuration>";
const PROPERTIES: &str = "<properties><java.version>17</java.version>\
    <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>\
    <jackson.version>2.17.1</jackson.version></properties>";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("pomxml_parse_service", |b| {
        b.iter(|| from_str(black_box(SERVICE_POM)))
    });
}

fn bench_write(c: &mut Criterion) {
    let Ok(model) = from_str(SERVICE_POM) else {
        return;
    };
    c.bench_function("pomxml_write_service", |b| {
        b.iter(|| to_string(black_box(&model)))
    });
}

fn bench_node(c: &mut Criterion) {
    c.bench_function("pomxml_node_configuration", |b| {
        b.iter(|| Node::parse(black_box(CONFIGURATION)))
    });
}

fn bench_properties(c: &mut Criterion) {
    c.bench_function("pomxml_properties", |b| {
        b.iter(|| Properties::parse(black_box(PROPERTIES)))
    });
}

criterion_group!(benches, bench_parse, bench_write, bench_node, bench_properties);
criterion_main!(benches);
