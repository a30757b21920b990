use pretty_assertions::assert_eq;
use quill_templates::{generate, validate, TemplateError};

use super::code_model;

#[test]
fn generate_writes_models_enums_helper_and_package_info() {
    let code_model = code_model(
        r#"{
            "packageName": "com.example",
            "models": [
                { "name": "Widget", "mergePatch": true, "properties": [ { "name": "size", "clientType": "int" } ] }
            ],
            "enums": [
                { "name": "Color", "values": [ { "value": "red" } ] }
            ]
        }"#,
    );
    let files = generate(&code_model).unwrap().render();
    let paths: Vec<&str> = files.keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            "src/main/java/com/example/implementation/JsonMergePatchHelper.java",
            "src/main/java/com/example/models/Color.java",
            "src/main/java/com/example/models/Widget.java",
            "src/main/java/com/example/models/package-info.java",
        ]
    );
    assert_eq!(
        files["src/main/java/com/example/models/package-info.java"],
        "/**\n * Package containing the data models for com.example.\n */\npackage com.example.models;\n"
    );
}

#[test]
fn empty_code_model_generates_nothing() {
    let code_model = code_model(r#"{ "packageName": "com.example" }"#);
    assert!(generate(&code_model).unwrap().render().is_empty());
}

#[test]
fn helper_is_skipped_without_merge_patch_models() {
    let code_model = code_model(
        r#"{ "packageName": "com.example", "models": [ { "name": "Widget" } ] }"#,
    );
    let files = generate(&code_model).unwrap().render();
    assert!(files.keys().all(|path| !path.contains("JsonMergePatchHelper")), "{files:?}");
}

fn validation_error(json: &str) -> TemplateError {
    validate(&code_model(json)).unwrap_err()
}

#[test]
fn invalid_code_models_are_rejected() {
    let err = validation_error(r#"{ "packageName": "com.example", "models": [ { "name": "Widget" }, { "name": "Widget" } ] }"#);
    assert!(matches!(err, TemplateError::DuplicateType(ref name) if name == "Widget"), "{err}");

    let err = validation_error(
        r#"{ "packageName": "com.example", "models": [ { "name": "Widget" } ], "enums": [ { "name": "Widget" } ] }"#,
    );
    assert!(matches!(err, TemplateError::DuplicateType(_)), "{err}");

    let err = validation_error(
        r#"{ "packageName": "com.example", "models": [ { "name": "Widget", "properties": [
            { "name": "size", "clientType": "int" }, { "name": "size", "clientType": "long" } ] } ] }"#,
    );
    assert!(
        matches!(err, TemplateError::DuplicateProperty { ref property, .. } if property == "size"),
        "{err}"
    );

    let err = validation_error(
        r#"{ "packageName": "com.example", "models": [ { "name": "Widget", "properties": [
            { "name": "class", "clientType": "String" } ] } ] }"#,
    );
    assert!(matches!(err, TemplateError::InvalidName { kind: "property", .. }), "{err}");

    let err = validation_error(r#"{ "packageName": "com.1example" }"#);
    assert!(matches!(err, TemplateError::InvalidName { kind: "package", .. }), "{err}");

    let err = validation_error(
        r#"{ "packageName": "com.example", "models": [ { "name": "Dog", "parent": "Pet" } ] }"#,
    );
    assert!(
        matches!(err, TemplateError::UnknownParent { ref parent, .. } if parent == "Pet"),
        "{err}"
    );

    let err = validation_error(
        r#"{ "packageName": "com.example", "models": [ { "name": "A", "parent": "B" }, { "name": "B", "parent": "A" } ] }"#,
    );
    assert!(matches!(err, TemplateError::InheritanceCycle(_)), "{err}");

    let err = validation_error(
        r#"{ "packageName": "com.example", "models": [ { "name": "Pet" }, { "name": "Dog", "parent": "Pet", "mergePatch": true } ] }"#,
    );
    assert!(matches!(err, TemplateError::MergePatchChild(ref name) if name == "Dog"), "{err}");

    let err = validation_error(
        r#"{ "packageName": "com.example", "enums": [ { "name": "Level", "values": [ { "value": "a-b" }, { "value": "a_b" } ] } ] }"#,
    );
    assert!(matches!(err, TemplateError::DuplicateProperty { .. }), "{err}");
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = quill_templates::CodeModel::from_json("{ \"models\": [] }").unwrap_err();
    assert!(matches!(err, TemplateError::Json(_)), "{err}");
}
