use heck::ToLowerCamelCase;
use quill_emit::{JavaFile, JavaModifier, Visibility};

use crate::model::CodeModel;

/// Simple name of the generated accessor registry.
pub const JSON_MERGE_PATCH_HELPER: &str = "JsonMergePatchHelper";

/// Writes the registry through which request code reaches the private merge-patch state of
/// each model. Models register their accessor from a static initializer.
pub struct JsonMergePatchHelperTemplate<'a> {
    code_model: &'a CodeModel,
}

impl<'a> JsonMergePatchHelperTemplate<'a> {
    pub fn new(code_model: &'a CodeModel) -> Self {
        Self { code_model }
    }

    pub fn write(&self, file: &mut JavaFile) {
        let models_package = self.code_model.models_package();
        let models: Vec<&str> = self
            .code_model
            .merge_patch_models()
            .map(|model| model.name.as_str())
            .collect();

        file.declare_import(models.iter().map(|name| format!("{models_package}.{name}")));
        file.javadoc_comment(
            "This is the Helper class to enable json merge patch serialization for a model",
        );
        file.public_class(JSON_MERGE_PATCH_HELPER, |class| {
            for name in &models {
                let accessor = format!("{name}Accessor");
                let field = accessor.to_lower_camel_case();

                class.variable(
                    Visibility::Private,
                    &[JavaModifier::Static],
                    &format!("{accessor} {field}"),
                );

                class.interface_block(Visibility::Public, &accessor, |interface| {
                    interface.method(&format!(
                        "{name} prepareModelForJsonMergePatch({name} model, boolean jsonMergePatchEnabled)"
                    ));
                    interface.method(&format!("boolean isJsonMergePatch({name} model)"));
                });

                class.public_static_method(
                    &format!("void set{accessor}({accessor} accessor)"),
                    |body| {
                        body.line(&format!("{field} = accessor;"));
                    },
                );

                class.public_static_method(&format!("{accessor} get{accessor}()"), |body| {
                    body.method_return(&field);
                });
            }
        });

        tracing::debug!(
            target = "quill.templates",
            models = models.len(),
            "wrote json merge patch helper"
        );
    }
}
