use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::fs;

/// Load a JSON schema from a file
pub fn load_schema(schema_path: &str) -> JSONSchema {
    let schema_content = fs::read_to_string(schema_path)
        .unwrap_or_else(|_| panic!("Failed to read schema file: {}", schema_path));

    let schema_json: Value = serde_json::from_str(&schema_content)
        .unwrap_or_else(|_| panic!("Failed to parse schema JSON: {}", schema_path));

    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema_json)
        .expect("Failed to compile schema")
}

/// Load schema from tests/schemas directory
pub fn load_test_schema(schema_name: &str) -> JSONSchema {
    load_schema(&format!("tests/schemas/{}.json", schema_name))
}

/// Validate a JSON value, panicking with every violation and the payload
pub fn assert_matches_schema(data: &Value, schema: &JSONSchema) {
    if let Err(errors) = schema.validate(data) {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        panic!(
            "Schema validation failed:\n  - {}\nActual response:\n{}",
            messages.join("\n  - "),
            serde_json::to_string_pretty(data).unwrap()
        );
    }
}
