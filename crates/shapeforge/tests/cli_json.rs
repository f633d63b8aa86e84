use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

#[derive(Debug, Deserialize)]
struct InspectOutput {
    class_name: String,
    contracts: Vec<String>,
    properties: Vec<PropertyOutput>,
}

#[derive(Debug, Deserialize)]
struct PropertyOutput {
    name: String,
    #[serde(rename = "type")]
    data_type: String,
    backing_field: String,
    getter: String,
    setter: String,
}

#[derive(Debug, Deserialize)]
struct SetOutput {
    class_name: String,
    notifications: Vec<NotificationOutput>,
    values: Vec<ValueOutput>,
}

#[derive(Debug, Deserialize)]
struct NotificationOutput {
    property: String,
    value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ValueOutput {
    name: String,
    value: serde_json::Value,
}

fn run_cli(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shapeforge"))
        .args(args)
        .env("SHAPEFORGE_HOME", home)
        .env("RUST_LOG", "error")
        .output()
        .expect("run shapeforge")
}

fn write_schema(dir: &Path, file: &str, body: &str) -> PathBuf {
    let path = dir.join(file);
    std::fs::write(&path, body).expect("write schema");
    path
}

fn person_schema(dir: &Path) -> PathBuf {
    write_schema(
        dir,
        "person.json",
        r#"{
            "class_name": "Person",
            "properties": [
                { "name": "Name", "type": "string" },
                { "name": "Age", "type": "int64" }
            ]
        }"#,
    )
}

#[test]
fn test_inspect_json_describes_type() {
    let home = TempDir::new().expect("create temp home");
    let schema = person_schema(home.path());

    let output = run_cli(home.path(), &["inspect", schema.to_str().unwrap(), "--json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed: InspectOutput = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(parsed.class_name, "Person");
    assert_eq!(parsed.contracts, vec!["ChangeNotification", "ErrorState"]);

    let names: Vec<_> = parsed.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Name", "Age"]);
    assert_eq!(parsed.properties[1].data_type, "int64");
    assert_eq!(parsed.properties[0].backing_field, "_Name");
    assert_eq!(parsed.properties[0].getter, "get_Name");
    assert_eq!(parsed.properties[0].setter, "set_Name");
}

#[test]
fn test_set_json_reports_notifications_in_order() {
    let home = TempDir::new().expect("create temp home");
    let schema = person_schema(home.path());

    let output = run_cli(
        home.path(),
        &[
            "set",
            schema.to_str().unwrap(),
            "--assign",
            "Name=Alice",
            "--assign",
            "Age=30",
            "--assign",
            "Name=Bob",
            "--json",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed: SetOutput = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(parsed.class_name, "Person");

    let fired: Vec<_> = parsed
        .notifications
        .iter()
        .map(|n| (n.property.as_str(), n.value.clone()))
        .collect();
    assert_eq!(
        fired,
        vec![
            ("Name", serde_json::json!("Alice")),
            ("Age", serde_json::json!(30)),
            ("Name", serde_json::json!("Bob")),
        ]
    );

    assert_eq!(parsed.values[0].name, "Name");
    assert_eq!(parsed.values[0].value, serde_json::json!("Bob"));
    assert_eq!(parsed.values[1].value, serde_json::json!(30));
}

#[test]
fn test_set_rejects_unparseable_value() {
    let home = TempDir::new().expect("create temp home");
    let schema = person_schema(home.path());

    let output = run_cli(
        home.path(),
        &["set", schema.to_str().unwrap(), "--assign", "Age=thirty"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid value for 'Age'"), "stderr: {}", stderr);
}

#[test]
fn test_set_rejects_unknown_property() {
    let home = TempDir::new().expect("create temp home");
    let schema = person_schema(home.path());

    let output = run_cli(
        home.path(),
        &["set", schema.to_str().unwrap(), "--assign", "Email=a@b.c"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown property 'Email'"), "stderr: {}", stderr);
    assert!(stderr.contains("Name, Age"), "stderr: {}", stderr);
}

#[test]
fn test_suppressed_failure_exits_nonzero() {
    let home = TempDir::new().expect("create temp home");
    let schema = write_schema(
        home.path(),
        "nulls.json",
        r#"{ "class_name": "Nulls", "properties": [ { "name": "Nothing", "type": "null" } ] }"#,
    );

    let output = run_cli(home.path(), &["inspect", schema.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No type was produced for 'Nulls'"), "stderr: {}", stderr);
}

#[test]
fn test_propagate_reports_synthesis_failure() {
    let home = TempDir::new().expect("create temp home");
    let schema = write_schema(
        home.path(),
        "nulls.json",
        r#"{ "class_name": "Nulls", "properties": [ { "name": "Nothing", "type": "null" } ] }"#,
    );

    let output = run_cli(
        home.path(),
        &["inspect", schema.to_str().unwrap(), "--propagate"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to synthesize 'Nulls'"), "stderr: {}", stderr);
}

#[test]
fn test_missing_properties_is_fatal() {
    let home = TempDir::new().expect("create temp home");
    let schema = write_schema(
        home.path(),
        "bare.json",
        r#"{ "class_name": "Bare", "properties": null }"#,
    );

    let output = run_cli(home.path(), &["inspect", schema.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Wrong parameters"), "stderr: {}", stderr);
}

#[test]
fn test_missing_schema_file() {
    let home = TempDir::new().expect("create temp home");
    let missing = home.path().join("nope.json");

    let output = run_cli(home.path(), &["inspect", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Schema file not found"), "stderr: {}", stderr);
}
