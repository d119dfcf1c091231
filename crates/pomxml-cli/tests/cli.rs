use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>org.example</groupId>
  <artifactId>demo</artifactId>
  <version>1.2.0</version>
  <packaging>war</packaging>
  <dependencies>
    <dependency><groupId>junit</groupId><artifactId>junit</artifactId></dependency>
    <dependency><groupId>org.slf4j</groupId><artifactId>slf4j-api</artifactId></dependency>
  </dependencies>
  <build>
    <plugins>
      <plugin><artifactId>maven-war-plugin</artifactId></plugin>
    </plugins>
  </build>
</project>
"#;

fn pomxml() -> Command {
    Command::cargo_bin("pomxml").unwrap()
}

#[test]
fn summary_from_stdin() {
    pomxml()
        .arg("--summary")
        .write_stdin(POM)
        .assert()
        .success()
        .stdout(predicate::str::contains("coordinates: org.example:demo:1.2.0"))
        .stdout(predicate::str::contains("packaging: war"))
        .stdout(predicate::str::contains("dependencies: 2"))
        .stdout(predicate::str::contains("plugins: 1"));
}

#[test]
fn pretty_prints_by_default() {
    let input = "<project><groupId>g</groupId><artifactId>a</artifactId></project>";
    let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>\n  <groupId>g</groupId>\n  <artifactId>a</artifactId>\n</project>\n";
    pomxml()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn compact_output_with_zero_indent() {
    pomxml()
        .args(["--indent", "0"])
        .write_stdin("<project>\n  <artifactId>a</artifactId>\n</project>")
        .assert()
        .success()
        .stdout("<project><artifactId>a</artifactId></project>");
}

#[test]
fn reads_file_and_writes_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("pom.xml");
    let output = dir.path().join("out.xml");
    std::fs::write(&input, POM).unwrap();

    pomxml()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--indent", "0"])
        .assert()
        .success()
        .stdout("");

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("<project><modelVersion>4.0.0</modelVersion>"));
    assert!(written.contains("<artifactId>maven-war-plugin</artifactId>"));
}

#[test]
fn empty_stdin_fails() {
    pomxml()
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input provided on stdin"));
}

#[test]
fn malformed_input_fails() {
    pomxml()
        .write_stdin("<project><groupId>g</artifactId></project>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse stdin"))
        .stderr(predicate::str::contains("mismatched closing tag"));
}

#[test]
fn wrong_root_fails() {
    pomxml()
        .write_stdin("<settings></settings>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected element <project>"));
}

#[test]
fn max_depth_is_enforced() {
    pomxml()
        .args(["--max-depth", "2"])
        .write_stdin("<project><build><plugins></plugins></build></project>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max depth exceeded"));
}

#[test]
fn missing_file_fails() {
    pomxml()
        .arg("does-not-exist.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input file"));
}

#[test]
fn zero_max_depth_is_rejected() {
    pomxml()
        .args(["--max-depth", "0"])
        .write_stdin("<project></project>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max-depth"));
}
