//! Loading schema requests from disk.

use shapeforge_schema::{DataType, SchemaError, SchemaFileError, SchemaRequest};
use std::io::Write;

fn write_schema(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_spec_from_file() {
    let file = write_schema(
        r#"{
            "class_name": "Order",
            "suppress_failures": false,
            "properties": [
                { "name": "Id", "type": "int64" },
                { "name": "Tags", "type": { "kind": "list", "item": "string" } },
                { "name": "PlacedAt", "type": "timestamp" }
            ]
        }"#,
    );

    let spec = SchemaRequest::load_spec(file.path()).unwrap();

    assert_eq!(spec.class_name(), "Order");
    assert!(!spec.suppress_failures());
    assert_eq!(spec.properties().len(), 3);
    assert_eq!(
        spec.properties().get("Tags"),
        Some(&DataType::list(DataType::String))
    );
}

#[test]
fn test_duplicate_names_collapse_to_last_type() {
    let file = write_schema(
        r#"{"class_name":"Dup","properties":[{"name":"A","type":"int64"},{"name":"A","type":"string"}]}"#,
    );

    let spec = SchemaRequest::load_spec(file.path()).unwrap();
    assert_eq!(spec.properties().len(), 1);
    assert_eq!(spec.properties().get("A"), Some(&DataType::String));
}

#[test]
fn test_blank_class_name_in_file() {
    let file = write_schema(r#"{"class_name":"  ","properties":[]}"#);

    let err = SchemaRequest::load_spec(file.path()).unwrap_err();
    assert!(matches!(
        err,
        SchemaFileError::Schema(SchemaError::BlankClassName)
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SchemaRequest::load_spec(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SchemaFileError::Io { .. }));
}
