use pretty_assertions::assert_eq;
use quill_emit::JavaFileFactory;
use quill_templates::{JsonMergePatchHelperTemplate, ModelTemplate};

use super::code_model;

const PATCHABLE: &str = r#"{
    "packageName": "com.example",
    "models": [
        {
            "name": "Resource",
            "mergePatch": true,
            "properties": [
                { "name": "displayName", "clientType": "String" }
            ]
        },
        {
            "name": "Settings",
            "contentType": "application/merge-patch+json",
            "properties": []
        },
        { "name": "Plain", "properties": [] }
    ]
}"#;

#[test]
fn helper_has_one_accessor_per_patchable_model() {
    let code_model = code_model(PATCHABLE);
    let mut file = JavaFileFactory::new()
        .create_source_file(&code_model.implementation_package(), "JsonMergePatchHelper");
    JsonMergePatchHelperTemplate::new(&code_model).write(&mut file);

    let expected = "\
package com.example.implementation;

import com.example.models.Resource;
import com.example.models.Settings;

/**
 * This is the Helper class to enable json merge patch serialization for a model.
 */
public class JsonMergePatchHelper {
    private static ResourceAccessor resourceAccessor;

    public interface ResourceAccessor {
        Resource prepareModelForJsonMergePatch(Resource model, boolean jsonMergePatchEnabled);

        boolean isJsonMergePatch(Resource model);
    }

    public static void setResourceAccessor(ResourceAccessor accessor) {
        resourceAccessor = accessor;
    }

    public static ResourceAccessor getResourceAccessor() {
        return resourceAccessor;
    }

    private static SettingsAccessor settingsAccessor;

    public interface SettingsAccessor {
        Settings prepareModelForJsonMergePatch(Settings model, boolean jsonMergePatchEnabled);

        boolean isJsonMergePatch(Settings model);
    }

    public static void setSettingsAccessor(SettingsAccessor accessor) {
        settingsAccessor = accessor;
    }

    public static SettingsAccessor getSettingsAccessor() {
        return settingsAccessor;
    }
}
";
    assert_eq!(file.to_string(), expected);
}

#[test]
fn patchable_model_tracks_updated_properties() {
    let code_model = code_model(PATCHABLE);
    let mut file = JavaFileFactory::new().create_source_file(&code_model.models_package(), "Resource");
    ModelTemplate::new(&code_model)
        .write(&code_model.models[0], &mut file)
        .unwrap();
    let rendered = file.to_string();

    for import in [
        "com.example.implementation.JsonMergePatchHelper",
        "java.util.HashSet",
        "java.util.Set",
    ] {
        assert!(rendered.contains(&format!("import {import};\n")), "{rendered}");
    }
    assert!(
        rendered.contains("    private final Set<String> updatedProperties = new HashSet<>();\n"),
        "{rendered}"
    );
    assert!(rendered.contains("    private boolean jsonMergePatch;\n"), "{rendered}");
    assert!(
        rendered.contains(
            "    private void serializeAsJsonMergePatch(boolean jsonMergePatch) {\n        this.jsonMergePatch = jsonMergePatch;\n    }\n"
        ),
        "{rendered}"
    );
    let static_block = "    static {
        JsonMergePatchHelper.setResourceAccessor(new JsonMergePatchHelper.ResourceAccessor() {
            @Override
            public Resource prepareModelForJsonMergePatch(Resource model, boolean jsonMergePatchEnabled) {
                model.serializeAsJsonMergePatch(jsonMergePatchEnabled);
                return model;
            }

            @Override
            public boolean isJsonMergePatch(Resource model) {
                return model.jsonMergePatch;
            }
        });
    }
";
    assert!(rendered.contains(static_block), "{rendered}");
    assert!(
        rendered.contains(
            "    public Resource setDisplayName(String displayName) {\n        this.displayName = displayName;\n        this.updatedProperties.add(\"displayName\");\n        return this;\n    }\n"
        ),
        "{rendered}"
    );
}

#[test]
fn merge_patch_content_type_serializes_through_the_helper() {
    let code_model = code_model(PATCHABLE);
    let mut file = JavaFileFactory::new().create_source_file(&code_model.models_package(), "Settings");
    ModelTemplate::new(&code_model)
        .write(&code_model.models[1], &mut file)
        .unwrap();
    let rendered = file.to_string();
    assert!(
        rendered.contains("    public static final String CONTENT_TYPE = \"application/merge-patch+json\";\n"),
        "{rendered}"
    );
    assert!(
        rendered.contains(
            "        return BinaryData.fromObject(JsonMergePatchHelper.getSettingsAccessor().prepareModelForJsonMergePatch(this, true));\n"
        ),
        "{rendered}"
    );
}
