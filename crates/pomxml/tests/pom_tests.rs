#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use pomxml::model::{Dependency, Plugin};
use pomxml::{Config, ErrorKind, Model, Node, WriterConfig};

const SERVICE: &str = include_str!("fixtures/valid/service.xml");

fn service() -> Model {
    pomxml::from_str(SERVICE).unwrap()
}

fn plugin<'m>(model: &'m Model, artifact_id: &str) -> &'m Plugin {
    model
        .plugins()
        .iter()
        .find(|plugin| plugin.artifact_id == artifact_id)
        .unwrap()
}

#[test]
fn test_coordinates_inherit_from_parent() {
    let model = service();
    assert_eq!(model.model_version, "4.0.0");
    assert_eq!(model.group_id, "");
    assert_eq!(model.coordinates(), "org.example.platform:order-service:3.1.4");
    assert_eq!(
        model.parent.as_ref().map(|p| p.relative_path.as_str()),
        Some("../parent/pom.xml")
    );
}

#[test]
fn test_scalars_and_entities() {
    let model = service();
    assert_eq!(model.name, "Order Service");
    assert_eq!(model.description, "Accepts & tracks customer orders");
    assert_eq!(model.inception_year, "2019");
    assert_eq!(
        model.organization.as_ref().map(|o| o.name.as_str()),
        Some("Example Org")
    );
}

#[test]
fn test_properties() {
    let model = service();
    assert_eq!(model.property("java.version"), Some("17"));
    assert_eq!(model.property("project.build.sourceEncoding"), Some("UTF-8"));
    assert_eq!(model.property("skipITs"), Some("true"));
    assert_eq!(model.property("missing"), None);
    assert_eq!(model.properties.as_ref().map(|p| p.len()), Some(4));
}

#[test]
fn test_dependencies() {
    let model = service();
    let keys: Vec<String> = model.dependencies().iter().map(Dependency::key).collect();
    assert_eq!(
        keys,
        [
            "com.fasterxml.jackson.core:jackson-databind",
            "org.slf4j:slf4j-api",
            "org.junit.jupiter:junit-jupiter",
        ]
    );

    let slf4j = &model.dependencies()[1];
    let exclusions = slf4j.exclusions.as_ref().unwrap();
    assert_eq!(exclusions.exclusion.len(), 1);
    assert_eq!(exclusions.exclusion[0].group_id, "*");
    assert_eq!(model.dependencies()[2].scope, "test");

    let managed = model
        .dependency_management
        .as_ref()
        .and_then(|dm| dm.dependencies.as_ref())
        .unwrap();
    assert_eq!(managed.dependency[0].kind, "pom");
    assert_eq!(managed.dependency[0].version, "${jackson.version}");
}

#[test]
fn test_developer_with_node_properties() {
    let model = service();
    let developer = &model.developers.as_ref().unwrap().developer[0];
    assert_eq!(developer.id, "jdoe");
    assert_eq!(developer.timezone, "+1");
    assert_eq!(
        developer.roles.as_ref().unwrap().role,
        ["architect", "developer"]
    );
    assert_eq!(
        developer.properties.as_ref().and_then(|p| p.child_text("picUrl")),
        Some("https://example.org/jdoe.png")
    );
}

#[test]
fn test_plugin_configuration_tree() {
    let model = service();
    assert_eq!(model.plugins().len(), 3);

    let compiler = plugin(&model, "maven-compiler-plugin");
    assert_eq!(compiler.config_value(&["release"]), Some("${java.version}"));
    let args: Vec<&str> = compiler
        .configuration
        .as_ref()
        .and_then(|config| config.child("compilerArgs"))
        .map(|args| args.children_named("arg").map(|arg| arg.text.as_str()).collect())
        .unwrap();
    assert_eq!(args, ["-Xlint:all", "-parameters"]);

    let jar = plugin(&model, "maven-jar-plugin");
    assert_eq!(
        jar.config_value(&["archive", "manifest", "mainClass"]),
        Some("org.example.order.Main")
    );
    assert_eq!(jar.configuration.as_ref().map(Node::depth), Some(4));
}

#[test]
fn test_executions() {
    let model = service();
    let failsafe = plugin(&model, "maven-failsafe-plugin");
    let execution = &failsafe.executions.as_ref().unwrap().execution[0];
    assert_eq!(execution.id, "integration");
    assert_eq!(execution.phase, "verify");
    assert_eq!(
        execution.goals.as_ref().unwrap().goal,
        ["integration-test", "verify"]
    );
    assert_eq!(
        execution
            .configuration
            .as_ref()
            .and_then(|config| config.child_text("skipITs")),
        Some("${skipITs}")
    );
}

#[test]
fn test_build_resources_and_repositories() {
    let model = service();
    let build = model.build.as_ref().unwrap();
    assert_eq!(build.final_name, "order-service");
    let resource = &build.resources.as_ref().unwrap().resource[0];
    assert_eq!(resource.filtering, "true");
    assert_eq!(
        resource.includes.as_ref().unwrap().include,
        ["**/*.properties", "**/*.yml"]
    );

    let repository = &model.repositories.as_ref().unwrap().repository[0];
    assert_eq!(repository.id, "internal");
    let snapshots = repository.snapshots.as_ref().unwrap();
    assert_eq!(snapshots.enabled, "false");
    assert_eq!(snapshots.update_policy, "never");
}

#[test]
fn test_profiles() {
    let model = service();
    let profile = &model.profiles.as_ref().unwrap().profile[0];
    assert_eq!(profile.id, "ci");
    let activation = profile.activation.as_ref().unwrap();
    assert!(!activation.active_by_default);
    assert_eq!(
        activation.property.as_ref().map(|p| p.name.as_str()),
        Some("env.CI")
    );
    assert_eq!(
        profile.properties.as_ref().and_then(|p| p.child_text("skipITs")),
        Some("false")
    );
}

#[test]
fn test_round_trip_compact_and_pretty() {
    let model = service();
    let compact = pomxml::to_string(&model).unwrap();
    assert!(compact.starts_with("<project><modelVersion>4.0.0</modelVersion><parent>"));
    assert!(!compact.contains("xmlns"));
    assert_eq!(pomxml::from_str(&compact).unwrap(), model);

    let pretty = pomxml::to_string_pretty(&model).unwrap();
    assert!(pretty.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project>\n  <modelVersion>"));
    assert!(pretty.ends_with("</project>\n"));
    assert_eq!(pomxml::from_str(&pretty).unwrap(), model);
}

#[test]
fn test_to_writer_returns_sink() {
    let model = pomxml::from_str("<project><artifactId>a</artifactId></project>").unwrap();
    let sink = pomxml::to_writer(Vec::new(), &model, WriterConfig::compact()).unwrap();
    assert_eq!(sink, b"<project><artifactId>a</artifactId></project>");
}

#[test]
fn test_from_reader_and_bytes() {
    let from_reader = pomxml::from_reader(SERVICE.as_bytes()).unwrap();
    let from_bytes = pomxml::from_bytes(SERVICE.as_bytes()).unwrap();
    assert_eq!(from_reader, from_bytes);
    assert_eq!(from_reader, service());
}

#[test]
fn test_prefixed_document() {
    let model = pomxml::from_str(include_str!("fixtures/valid/prefixed.xml")).unwrap();
    assert_eq!(model.coordinates(), "org.example:prefixed:2.0");
    assert_eq!(model.modules.as_ref().unwrap().module, ["core", "api"]);
    assert!(model.properties.as_ref().is_some_and(|p| p.is_empty()));
}

#[test]
fn test_unknown_elements_and_cdata() {
    let model = pomxml::from_str(include_str!("fixtures/valid/unknown-elements.xml")).unwrap();
    assert_eq!(model.artifact_id, "future");
    assert_eq!(model.description, "Uses <angle> brackets & ampersands");
}

#[test]
fn test_wrong_root_element() {
    let err = pomxml::from_str("<settings></settings>").unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::UnexpectedElement {
            expected: "project".to_string(),
            found: "settings".to_string(),
        }
    );
    assert!(err.is_malformed());
}

#[test]
fn test_unterminated_document_is_lenient() {
    let model = pomxml::from_str("<project><groupId>g</groupId><artifactId>a").unwrap();
    assert_eq!(model.group_id, "g");
    assert_eq!(model.artifact_id, "a");
}

#[test]
fn test_depth_limit() {
    let input = include_str!("fixtures/valid/service.xml");
    let err = pomxml::from_str_with_config(input, Config::new(4, 0)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MaxDepthExceeded { max: 4 }));
    assert!(pomxml::from_str_with_config(input, Config::unlimited()).is_ok());
}

#[test]
fn test_size_limit() {
    let err = pomxml::from_str_with_config(SERVICE, Config::new(0, 64)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MaxSizeExceeded { max: 64 }));
}

#[test]
fn test_trailing_content_rejected() {
    let err = pomxml::from_str("<project></project><project></project>").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidToken);
}

#[test]
fn test_built_model_serializes() {
    let mut model = Model {
        model_version: "4.0.0".to_string(),
        group_id: "org.example".to_string(),
        artifact_id: "built".to_string(),
        version: "1".to_string(),
        ..Model::default()
    };
    model.properties = Some([("k", "v")].into_iter().collect());
    let xml = pomxml::to_string(&model).unwrap();
    assert_eq!(
        xml,
        "<project><modelVersion>4.0.0</modelVersion><groupId>org.example</groupId>\
         <artifactId>built</artifactId><version>1</version>\
         <properties><k>v</k></properties></project>"
    );
}

struct BrokenSource;

impl std::io::Read for BrokenSource {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("connection reset"))
    }
}

#[test]
fn test_from_reader_failure_is_read_error() {
    let err = pomxml::from_reader(BrokenSource).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Read);
    assert!(!err.is_malformed());
    assert!(err.message().contains("connection reset"));
}

#[test]
fn test_line_endings_normalized() {
    let model = pomxml::from_str("<project>\r\n<description>one\r\ntwo</description>\r\n</project>\r\n")
        .unwrap();
    assert_eq!(model.description, "one\ntwo");
}
