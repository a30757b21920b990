use pretty_assertions::assert_eq;
use quill_emit::JavaFileFactory;
use quill_templates::ModelTemplate;

use super::code_model;

fn render(json: &str, name: &str) -> String {
    let code_model = code_model(json);
    let model = code_model.model(name).expect("model exists");
    let mut file = JavaFileFactory::new().create_source_file(&code_model.models_package(), name);
    ModelTemplate::new(&code_model)
        .write(model, &mut file)
        .expect("model renders");
    file.to_string()
}

#[test]
fn model_with_required_optional_and_read_only_properties() {
    let json = r#"{
        "packageName": "com.example",
        "models": [{
            "name": "Widget",
            "description": "A widget",
            "properties": [
                { "name": "name", "clientType": "String", "required": true },
                { "name": "color", "serializedName": "colour", "clientType": "String", "description": "The color" },
                { "name": "tags", "clientType": "java.util.List<String>", "readOnly": true }
            ]
        }]
    }"#;

    let expected = r#"package com.example.models;

import com.azure.core.annotation.Fluent;
import com.fasterxml.jackson.annotation.JsonCreator;
import com.fasterxml.jackson.annotation.JsonProperty;
import java.util.List;

/**
 * A widget.
 */
@Fluent
public final class Widget {
    /**
     * The name property.
     */
    @JsonProperty(value = "name", required = true)
    private final String name;

    /**
     * The color.
     */
    @JsonProperty(value = "colour")
    private String color;

    /**
     * The tags property.
     */
    @JsonProperty(value = "tags", access = JsonProperty.Access.WRITE_ONLY)
    private List<String> tags;

    /**
     * Creates an instance of Widget class.
     *
     * @param name the name value to set.
     */
    @JsonCreator
    public Widget(@JsonProperty(value = "name") String name) {
        this.name = name;
    }

    /**
     * Get the name property.
     *
     * @return the name value.
     */
    public String getName() {
        return this.name;
    }

    /**
     * Get the color property: The color.
     *
     * @return the color value.
     */
    public String getColor() {
        return this.color;
    }

    /**
     * Set the color property: The color.
     *
     * @param color the color value to set.
     * @return the Widget object itself.
     */
    public Widget setColor(String color) {
        this.color = color;
        return this;
    }

    /**
     * Get the tags property.
     *
     * @return the tags value.
     */
    public List<String> getTags() {
        return this.tags;
    }
}
"#;
    assert_eq!(render(json, "Widget"), expected);
}

#[test]
fn model_without_setters_is_immutable() {
    let json = r#"{
        "packageName": "com.example",
        "models": [{
            "name": "Status",
            "properties": [
                { "name": "ready", "clientType": "boolean", "readOnly": true }
            ]
        }]
    }"#;
    let rendered = render(json, "Status");
    assert!(rendered.contains("import com.azure.core.annotation.Immutable;\n"), "{rendered}");
    assert!(!rendered.contains("JsonCreator"), "{rendered}");
    assert!(
        rendered.contains(" * The Status model.\n */\n@Immutable\npublic final class Status {\n"),
        "{rendered}"
    );
    assert!(rendered.contains("    public Status() {\n    }\n"), "{rendered}");
    assert!(rendered.contains("    public boolean isReady() {\n"), "{rendered}");
    assert!(!rendered.contains("setReady"), "{rendered}");
}

#[test]
fn children_pass_inherited_required_properties_to_super() {
    let json = r#"{
        "packageName": "com.example",
        "models": [
            {
                "name": "Pet",
                "properties": [
                    { "name": "name", "clientType": "String", "required": true },
                    { "name": "born", "clientType": "java.time.OffsetDateTime" }
                ]
            },
            {
                "name": "Dog",
                "parent": "Pet",
                "properties": [
                    { "name": "barks", "clientType": "int", "required": true }
                ]
            }
        ]
    }"#;

    let pet = render(json, "Pet");
    assert!(pet.contains("\npublic class Pet {\n"), "{pet}");
    assert!(pet.contains("import java.time.OffsetDateTime;\n"), "{pet}");
    assert!(pet.contains("    public Pet setBorn(OffsetDateTime born) {\n"), "{pet}");

    let dog = render(json, "Dog");
    assert!(dog.contains("\npublic final class Dog extends Pet {\n"), "{dog}");
    assert!(
        dog.contains(
            "    public Dog(@JsonProperty(value = \"name\") String name, @JsonProperty(value = \"barks\") int barks) {\n        super(name);\n        this.barks = barks;\n    }\n"
        ),
        "{dog}"
    );
    assert!(dog.contains("     * @param name the name value to set.\n     * @param barks the barks value to set.\n"), "{dog}");
    assert!(!dog.contains("OffsetDateTime"), "{dog}");
}

#[test]
fn content_type_adds_constant_and_request_body() {
    let json = r#"{
        "packageName": "com.example",
        "models": [{
            "name": "Upload",
            "contentType": "multipart/form-data; boundary=x",
            "properties": [
                { "name": "file", "clientType": "com.azure.core.util.BinaryData", "required": true }
            ]
        }]
    }"#;
    let rendered = render(json, "Upload");
    assert!(rendered.contains("import com.azure.core.util.BinaryData;\n"), "{rendered}");
    assert!(
        rendered.contains("import com.azure.core.util.MultipartFormDataHelper;\n"),
        "{rendered}"
    );
    assert!(
        rendered.contains("    public static final String CONTENT_TYPE = \"multipart/form-data\";\n"),
        "{rendered}"
    );
    assert!(
        rendered.contains(
            "    public BinaryData toRequestBody() {\n        return MultipartFormDataHelper.serialize(this);\n    }\n}\n"
        ),
        "{rendered}"
    );
}

#[test]
fn unsupported_content_type_is_rejected() {
    let code_model = code_model(
        r#"{ "packageName": "com.example", "models": [{ "name": "Blob", "contentType": "nonsense" }] }"#,
    );
    let mut file = JavaFileFactory::new().create_source_file("com.example.models", "Blob");
    let err = ModelTemplate::new(&code_model)
        .write(&code_model.models[0], &mut file)
        .unwrap_err();
    assert!(
        matches!(err, quill_templates::TemplateError::UnsupportedContentType(ref mime) if mime == "nonsense"),
        "{err}"
    );
}
