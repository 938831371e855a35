use shibble_auth::definitions::{DefinitionSource, FileSource, parse_definitions};
use shibble_auth::errors::DefinitionError;
use std::path::Path;

const SAMPLE: &str = r#"
<configs>
  <config name="desktop" protocol="rdp">
    <param name="hostname" value="rdp-host" />
    <param name="port" value="3389" />
    <param name="security" value="nla" />
  </config>
  <config name="spare" protocol="vnc">
    <param name="hostname" value="vnc-host" />
  </config>
  <config name="bare" protocol="ssh" />
</configs>
"#;

fn parse(xml: &str) -> shibble_auth::ProfileMap {
    parse_definitions(xml, Path::new("shibble-config.xml")).expect("parse definitions")
}

#[test]
fn test_parse_yields_every_profile() {
    let profiles = parse(SAMPLE);
    assert_eq!(profiles.len(), 3);

    let desktop = &profiles["desktop"];
    assert_eq!(desktop.protocol, "rdp");
    assert_eq!(desktop.parameter("hostname"), Some("rdp-host"));
    assert_eq!(desktop.parameter("port"), Some("3389"));

    let spare = &profiles["spare"];
    assert_eq!(spare.protocol, "vnc");
    assert_eq!(spare.parameters.len(), 1);

    let bare = &profiles["bare"];
    assert_eq!(bare.protocol, "ssh");
    assert!(bare.parameters.is_empty());
}

#[test]
fn test_parameter_order_preserved() {
    let profiles = parse(SAMPLE);
    let names: Vec<&str> = profiles["desktop"]
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["hostname", "port", "security"]);
}

#[test]
fn test_duplicate_identifier_last_wins() {
    let xml = r#"
<configs>
  <config name="desktop" protocol="rdp">
    <param name="hostname" value="first" />
  </config>
  <config name="desktop" protocol="vnc">
    <param name="hostname" value="second" />
  </config>
</configs>
"#;
    let profiles = parse(xml);
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles["desktop"].protocol, "vnc");
    assert_eq!(profiles["desktop"].parameter("hostname"), Some("second"));
}

#[test]
fn test_empty_container() {
    let profiles = parse("<configs></configs>");
    assert!(profiles.is_empty());
}

#[test]
fn test_malformed_document() {
    let err = parse_definitions("<configs><config", Path::new("broken.xml"))
        .err()
        .expect("malformed document should not parse");
    assert!(matches!(err, DefinitionError::Parse { .. }));
}

#[test]
fn test_reparse_yields_equal_content() {
    let first = parse(SAMPLE);
    let second = parse(SAMPLE);
    assert_eq!(first, second);
}

#[test]
fn test_file_source_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("shibble-config.xml");
    std::fs::write(&path, SAMPLE).expect("write definitions");

    let source = FileSource::new(&path);
    assert_eq!(source.path(), path.as_path());
    source.modified().expect("modification time");

    let raw = source.read().expect("read definitions");
    let profiles = parse_definitions(&raw, source.path()).expect("parse definitions");
    assert_eq!(profiles.len(), 3);
}

#[test]
fn test_file_source_missing_file() {
    let source = FileSource::new("/nonexistent/shibble-config.xml");
    assert!(matches!(source.modified(), Err(DefinitionError::Io { .. })));
    assert!(matches!(source.read(), Err(DefinitionError::Io { .. })));
}
