use std::collections::BTreeSet;

use quill_emit::{JavaFile, JavaModifier, Visibility};

use crate::error::{Result, TemplateError};
use crate::model::{simplify_type, EnumType};

/// Writes an [`EnumType`] either as a Java `enum` or, when the set of values is open, as an
/// `ExpandableStringEnum` subclass with one static constant per known value.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumTemplate;

impl EnumTemplate {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, enum_type: &EnumType, file: &mut JavaFile) -> Result<()> {
        if enum_type.expandable {
            if !enum_type.is_string() {
                return Err(TemplateError::UnsupportedEnum {
                    name: enum_type.name.clone(),
                    element_type: enum_type.element_type.clone(),
                });
            }
            write_expandable(enum_type, file);
        } else {
            write_closed(enum_type, file);
        }
        tracing::debug!(
            target = "quill.templates",
            name = %enum_type.name,
            values = enum_type.values.len(),
            expandable = enum_type.expandable,
            "wrote enum"
        );
        Ok(())
    }
}

fn class_description(enum_type: &EnumType) -> String {
    if enum_type.description.trim().is_empty() {
        format!("Defines values for {}", enum_type.name)
    } else {
        enum_type.description.clone()
    }
}

fn write_closed(enum_type: &EnumType, file: &mut JavaFile) {
    let name = enum_type.name.as_str();
    let mut imports = BTreeSet::from([
        "com.fasterxml.jackson.annotation.JsonCreator".to_string(),
        "com.fasterxml.jackson.annotation.JsonValue".to_string(),
    ]);
    let element_type = simplify_type(&enum_type.element_type, &mut imports);
    let primitive = element_type.starts_with(|ch: char| ch.is_ascii_lowercase());
    let from_method = enum_type.from_method_name();
    let to_method = enum_type.to_method_name();

    file.declare_import(&imports);
    file.javadoc_comment(&class_description(enum_type));
    file.public_enum(name, |body| {
        for value in &enum_type.values {
            let description = if value.description.trim().is_empty() {
                format!("Enum value {}", value.value)
            } else {
                value.description.clone()
            };
            body.documented_value(
                &description,
                &value.constant_name(),
                &enum_type.literal(&value.value),
            );
        }

        body.javadoc_comment(&format!("The actual serialized value for a {name} instance"));
        body.variable(
            Visibility::Private,
            &[JavaModifier::Final],
            &format!("{element_type} value"),
        );

        body.constructor(
            Visibility::PackagePrivate,
            &format!("{name}({element_type} value)"),
            |ctor| ctor.line("this.value = value;"),
        );

        body.javadoc_comment_with(|doc| {
            doc.description(&format!("Parses a serialized value to a {name} instance"));
            doc.param("value", "the serialized value to parse");
            doc.method_returns(&format!("the parsed {name} object, or null if unable to parse"));
        });
        body.annotation(["JsonCreator"]);
        body.public_static_method(&format!("{name} {from_method}({element_type} value)"), |method| {
            if !primitive {
                method.if_block("value == null", |then| then.method_return("null"));
            }
            method.line(&format!("{name}[] items = {name}.values();"));
            method.block(&format!("for ({name} item : items)"), |each| {
                let matches = if enum_type.is_string() {
                    "item.toString().equalsIgnoreCase(value)".to_string()
                } else if primitive {
                    format!("item.{to_method}() == value")
                } else {
                    format!("item.{to_method}().equals(value)")
                };
                each.if_block(&matches, |then| then.method_return("item"));
            });
            method.method_return("null");
        });

        if enum_type.is_string() {
            body.javadoc_comment_with(|doc| doc.inherit_doc());
            body.annotation(["JsonValue", "Override"]);
        } else {
            body.javadoc_comment_with(|doc| {
                doc.description(&format!("De-serializes the instance to {element_type} value"));
                doc.method_returns(&format!("the {element_type} value"));
            });
            body.annotation(["JsonValue"]);
        }
        body.public_method(&format!("{element_type} {to_method}()"), |method| {
            method.method_return("this.value");
        });
    });
}

fn write_expandable(enum_type: &EnumType, file: &mut JavaFile) {
    let name = enum_type.name.as_str();
    file.declare_import([
        "com.azure.core.util.ExpandableStringEnum",
        "com.fasterxml.jackson.annotation.JsonCreator",
        "java.util.Collection",
    ]);
    file.javadoc_comment(&class_description(enum_type));
    file.public_final_class(&format!("{name} extends ExpandableStringEnum<{name}>"), |class| {
        for value in &enum_type.values {
            if value.description.trim().is_empty() {
                class.javadoc_comment(&format!("Static value {} for {name}", value.value));
            } else {
                class.javadoc_comment(&value.description);
            }
            class.public_static_final_variable(&format!(
                "{name} {} = fromString({})",
                value.constant_name(),
                enum_type.literal(&value.value)
            ));
        }

        class.javadoc_comment_with(|doc| {
            doc.description(&format!("Creates a new instance of {name} value"));
            doc.deprecated("Use the {@link #fromString(String)} factory method");
        });
        class.annotation(["Deprecated"]);
        class.public_constructor(&format!("{name}()"), |_| {});

        class.javadoc_comment_with(|doc| {
            doc.description(&format!("Creates or finds a {name} from its string representation"));
            doc.param("name", "a name to look for");
            doc.method_returns(&format!("the corresponding {name}"));
        });
        class.annotation(["JsonCreator"]);
        class.public_static_method(&format!("{name} fromString(String name)"), |method| {
            method.method_return(&format!("fromString(name, {name}.class)"));
        });

        class.javadoc_comment_with(|doc| {
            doc.description(&format!("Gets known {name} values"));
            doc.method_returns(&format!("known {name} values"));
        });
        class.public_static_method(&format!("Collection<{name}> values()"), |method| {
            method.method_return(&format!("values({name}.class)"));
        });
    });
}
