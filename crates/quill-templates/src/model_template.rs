use std::collections::BTreeSet;

use quill_emit::{JavaFile, JavaModifier, Visibility};

use crate::content::ContentKind;
use crate::error::{Result, TemplateError};
use crate::merge_patch::JSON_MERGE_PATCH_HELPER;
use crate::model::{simplify_type, ClientModel, ClientProperty, CodeModel};

/// Writes a [`ClientModel`] as a Java class with fields, a constructor for the required
/// properties, getters and fluent setters.
pub struct ModelTemplate<'a> {
    code_model: &'a CodeModel,
}

/// A property together with its client type as written in the file.
struct Field<'p> {
    property: &'p ClientProperty,
    client_type: String,
}

impl<'a> ModelTemplate<'a> {
    pub fn new(code_model: &'a CodeModel) -> Self {
        Self { code_model }
    }

    /// Parents of `model`, root first.
    pub(crate) fn ancestors(&self, model: &ClientModel) -> Result<Vec<&'a ClientModel>> {
        let mut chain: Vec<&'a ClientModel> = Vec::new();
        let mut parent = model.parent.as_deref();
        while let Some(name) = parent {
            if name == model.name || chain.iter().any(|seen| seen.name == name) {
                return Err(TemplateError::InheritanceCycle(model.name.clone()));
            }
            let found =
                self.code_model
                    .model(name)
                    .ok_or_else(|| TemplateError::UnknownParent {
                        model: model.name.clone(),
                        parent: name.to_string(),
                    })?;
            chain.push(found);
            parent = found.parent.as_deref();
        }
        chain.reverse();
        Ok(chain)
    }

    fn has_children(&self, model: &ClientModel) -> bool {
        self.code_model
            .models
            .iter()
            .any(|other| other.parent.as_deref() == Some(model.name.as_str()))
    }

    pub fn write(&self, model: &ClientModel, file: &mut JavaFile) -> Result<()> {
        let ancestors = self.ancestors(model)?;
        let merge_patch = model.is_merge_patch();
        if merge_patch && model.parent.is_some() {
            return Err(TemplateError::MergePatchChild(model.name.clone()));
        }
        let serializer = model.content_kind()?.map(ContentKind::serializer);

        let mut imports = BTreeSet::new();
        let fields: Vec<Field<'_>> = model
            .properties
            .iter()
            .map(|property| Field {
                property,
                client_type: simplify_type(&property.client_type, &mut imports),
            })
            .collect();
        let inherited: Vec<Field<'_>> = ancestors
            .iter()
            .flat_map(|parent| parent.properties.iter())
            .filter(|property| property.required)
            .map(|property| Field {
                property,
                client_type: simplify_type(&property.client_type, &mut imports),
            })
            .collect();
        let parameters: Vec<&Field<'_>> = inherited
            .iter()
            .chain(fields.iter().filter(|field| field.property.required))
            .collect();

        let annotation = if model.is_fluent() { "Fluent" } else { "Immutable" };
        imports.insert(format!("com.azure.core.annotation.{annotation}"));
        if !fields.is_empty() || !parameters.is_empty() {
            imports.insert("com.fasterxml.jackson.annotation.JsonProperty".to_string());
        }
        if !parameters.is_empty() {
            imports.insert("com.fasterxml.jackson.annotation.JsonCreator".to_string());
        }
        if let Some(serializer) = serializer {
            imports.extend(serializer.imports().iter().map(|import| import.to_string()));
        }
        if merge_patch {
            imports.insert("java.util.HashSet".to_string());
            imports.insert("java.util.Set".to_string());
            imports.insert(format!(
                "{}.{JSON_MERGE_PATCH_HELPER}",
                self.code_model.implementation_package()
            ));
        }
        file.declare_import(&imports);

        let name = model.name.as_str();
        if model.description.trim().is_empty() {
            file.javadoc_comment(&format!("The {name} model"));
        } else {
            file.javadoc_comment(&model.description);
        }
        file.annotation([annotation]);
        let declaration = match &model.parent {
            Some(parent) => format!("{name} extends {parent}"),
            None => name.to_string(),
        };
        let modifiers: &[JavaModifier] = if self.has_children(model) {
            &[]
        } else {
            &[JavaModifier::Final]
        };

        file.class_block(Visibility::Public, modifiers, &declaration, |class| {
            if let Some(serializer) = serializer {
                class.javadoc_comment(
                    "The content type used when this model is sent as a request body",
                );
                class.public_static_final_variable(&format!(
                    "String CONTENT_TYPE = \"{}\"",
                    serializer.content_type()
                ));
            }

            for field in &fields {
                let property = field.property;
                class.javadoc_comment(&describe(
                    property,
                    &format!("The {} property", property.name),
                ));
                class.annotation([json_property(property)]);
                let declaration = format!("{} {}", field.client_type, property.name);
                if property.required {
                    class.private_final_member_variable(&declaration);
                } else {
                    class.private_member_variable(&declaration);
                }
            }

            if merge_patch {
                class.javadoc_comment(
                    "Stores updated model property, the value is property name, not serialized name",
                );
                class.private_final_member_variable(
                    "Set<String> updatedProperties = new HashSet<>()",
                );
                class.private_member_variable("boolean jsonMergePatch");
                class.private_method(
                    "void serializeAsJsonMergePatch(boolean jsonMergePatch)",
                    |body| {
                        body.line("this.jsonMergePatch = jsonMergePatch;");
                    },
                );
                class.static_block(|body| {
                    let accessor = format!("{name}Accessor");
                    body.line(&format!(
                        "{JSON_MERGE_PATCH_HELPER}.set{accessor}(new {JSON_MERGE_PATCH_HELPER}.{accessor}() {{"
                    ));
                    body.indent(|inner| {
                        inner.annotation(["Override"]);
                        inner.block(
                            &format!(
                                "public {name} prepareModelForJsonMergePatch({name} model, boolean jsonMergePatchEnabled)"
                            ),
                            |method| {
                                method.line(
                                    "model.serializeAsJsonMergePatch(jsonMergePatchEnabled);",
                                );
                                method.method_return("model");
                            },
                        );
                        inner.blank_line();
                        inner.annotation(["Override"]);
                        inner.block(
                            &format!("public boolean isJsonMergePatch({name} model)"),
                            |method| {
                                method.method_return("model.jsonMergePatch");
                            },
                        );
                    });
                    body.line("});");
                });
            }

            class.javadoc_comment_with(|doc| {
                doc.description(&format!("Creates an instance of {name} class"));
                for field in &parameters {
                    let property = &field.property.name;
                    doc.param(property, &format!("the {property} value to set"));
                }
            });
            if !parameters.is_empty() {
                class.annotation(["JsonCreator"]);
            }
            let signature = parameters
                .iter()
                .map(|field| {
                    format!(
                        "@JsonProperty(value = \"{}\") {} {}",
                        field.property.serialized_name(),
                        field.client_type,
                        field.property.name
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            class.public_constructor(&format!("{name}({signature})"), |body| {
                if !inherited.is_empty() {
                    let arguments: Vec<&str> = inherited
                        .iter()
                        .map(|field| field.property.name.as_str())
                        .collect();
                    body.line(&format!("super({});", arguments.join(", ")));
                }
                for field in fields.iter().filter(|field| field.property.required) {
                    body.line(&format!("this.{0} = {0};", field.property.name));
                }
            });

            for field in &fields {
                let property = field.property;
                let property_name = &property.name;
                class.javadoc_comment_with(|doc| {
                    doc.description(&describe_accessor("Get", property));
                    doc.method_returns(&format!("the {property_name} value"));
                });
                class.public_method(
                    &format!("{} {}()", field.client_type, property.getter_name()),
                    |body| body.method_return(&format!("this.{property_name}")),
                );

                if !property.has_setter() {
                    continue;
                }
                class.javadoc_comment_with(|doc| {
                    doc.description(&describe_accessor("Set", property));
                    doc.param(property_name, &format!("the {property_name} value to set"));
                    doc.method_returns(&format!("the {name} object itself"));
                });
                class.public_method(
                    &format!(
                        "{name} {}({} {property_name})",
                        property.setter_name(),
                        field.client_type
                    ),
                    |body| {
                        body.line(&format!("this.{property_name} = {property_name};"));
                        if merge_patch {
                            body.line(&format!("this.updatedProperties.add(\"{property_name}\");"));
                        }
                        body.method_return("this");
                    },
                );
            }

            if let Some(serializer) = serializer {
                class.javadoc_comment_with(|doc| {
                    doc.description("Serializes this model into a request body");
                    doc.method_returns("the request body");
                });
                class.public_method("BinaryData toRequestBody()", |body| {
                    body.method_return(&serializer.body_expression(name, "this"));
                });
            }
        });

        tracing::debug!(
            target = "quill.templates",
            model = %name,
            properties = fields.len(),
            merge_patch,
            "wrote model"
        );
        Ok(())
    }
}

fn describe(property: &ClientProperty, fallback: &str) -> String {
    if property.description.trim().is_empty() {
        fallback.to_string()
    } else {
        property.description.clone()
    }
}

fn describe_accessor(verb: &str, property: &ClientProperty) -> String {
    let description = property.description.trim();
    if description.is_empty() {
        format!("{verb} the {} property", property.name)
    } else {
        format!("{verb} the {} property: {description}", property.name)
    }
}

fn json_property(property: &ClientProperty) -> String {
    let mut arguments = vec![format!("value = \"{}\"", property.serialized_name())];
    if property.required {
        arguments.push("required = true".to_string());
    }
    if property.read_only {
        arguments.push("access = JsonProperty.Access.WRITE_ONLY".to_string());
    }
    format!("JsonProperty({})", arguments.join(", "))
}
