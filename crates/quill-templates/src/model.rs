//! The slice of the upstream code model the templates read.
//!
//! The JSON shape mirrors what the upstream mapper writes: camel-cased keys, optional
//! collections defaulting to empty.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use heck::{ToShoutySnakeCase, ToUpperCamelCase};
use regex::Regex;
use serde::Deserialize;

use crate::content::ContentKind;
use crate::error::{Result, TemplateError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeModel {
    pub package_name: String,
    #[serde(default)]
    pub models: Vec<ClientModel>,
    #[serde(default)]
    pub enums: Vec<EnumType>,
}

impl CodeModel {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Package the models and enums are written to.
    pub fn models_package(&self) -> String {
        format!("{}.models", self.package_name)
    }

    /// Package of generated helpers that are not part of the public API.
    pub fn implementation_package(&self) -> String {
        format!("{}.implementation", self.package_name)
    }

    pub fn model(&self, name: &str) -> Option<&ClientModel> {
        self.models.iter().find(|model| model.name == name)
    }

    /// Models that track their updated properties for JSON merge patch.
    pub fn merge_patch_models(&self) -> impl Iterator<Item = &ClientModel> + '_ {
        self.models.iter().filter(|model| model.is_merge_patch())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientModel {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: Vec<ClientProperty>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub merge_patch: bool,
    /// MIME type the model is sent as, when it is used as a request body.
    #[serde(default)]
    pub content_type: Option<String>,
}

impl ClientModel {
    pub fn content_kind(&self) -> Result<Option<ContentKind>> {
        self.content_type
            .as_deref()
            .map(|mime| {
                ContentKind::from_mime(mime)
                    .ok_or_else(|| TemplateError::UnsupportedContentType(mime.to_string()))
            })
            .transpose()
    }

    pub fn is_merge_patch(&self) -> bool {
        self.merge_patch
            || matches!(self.content_kind(), Ok(Some(ContentKind::MergePatch)))
    }

    /// Whether any property gets a public setter.
    pub fn is_fluent(&self) -> bool {
        self.properties.iter().any(ClientProperty::has_setter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProperty {
    pub name: String,
    #[serde(default)]
    pub serialized_name: Option<String>,
    /// Type used in the public API, e.g. `String` or `java.time.OffsetDateTime`.
    pub client_type: String,
    /// Type used on the wire when it differs from the client type.
    #[serde(default)]
    pub wire_type: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
}

impl ClientProperty {
    pub fn serialized_name(&self) -> &str {
        self.serialized_name.as_deref().unwrap_or(&self.name)
    }

    pub fn wire_type(&self) -> &str {
        self.wire_type.as_deref().unwrap_or(&self.client_type)
    }

    /// Required properties are set through the constructor and read-only ones by the
    /// deserializer, so neither gets a setter.
    pub fn has_setter(&self) -> bool {
        !self.required && !self.read_only
    }

    pub fn getter_name(&self) -> String {
        let pascal = self.name.to_upper_camel_case();
        if self.client_type == "boolean" {
            format!("is{pascal}")
        } else {
            format!("get{pascal}")
        }
    }

    pub fn setter_name(&self) -> String {
        format!("set{}", self.name.to_upper_camel_case())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_element_type")]
    pub element_type: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
    #[serde(default)]
    pub expandable: bool,
}

fn default_element_type() -> String {
    "String".to_string()
}

impl EnumType {
    fn pascal_element_type(&self) -> String {
        self.element_type.to_upper_camel_case()
    }

    /// `fromString`, `fromInt`, ...
    pub fn from_method_name(&self) -> String {
        format!("from{}", self.pascal_element_type())
    }

    /// `toString`, `toInt`, ...
    pub fn to_method_name(&self) -> String {
        format!("to{}", self.pascal_element_type())
    }

    pub fn is_string(&self) -> bool {
        self.element_type == "String"
    }

    /// The Java literal for `value` in this enum's element type.
    pub fn literal(&self, value: &str) -> String {
        match self.element_type.as_str() {
            "String" => format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"")),
            "long" | "Long" => format!("{value}L"),
            "float" | "Float" => format!("{value}F"),
            _ => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    /// Constant name; derived from the value when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub value: String,
    #[serde(default)]
    pub description: String,
}

impl EnumValue {
    pub fn constant_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => {
                let name = self.value.to_shouty_snake_case();
                if name.starts_with(|ch: char| ch.is_ascii_digit()) {
                    format!("VALUE_{name}")
                } else {
                    name
                }
            }
        }
    }
}

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null",
];

pub(crate) fn check_identifier(kind: &'static str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$')
        && !KEYWORDS.contains(&name);
    if valid {
        Ok(())
    } else {
        Err(TemplateError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}

fn qualified_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b((?:[a-z][a-z0-9_]*\.)+)([A-Z][A-Za-z0-9_$]*)").expect("valid regex")
    })
}

/// Replaces fully-qualified names in `type_name` by simple names and records the imports.
///
/// `java.util.List<java.time.OffsetDateTime>` becomes `List<OffsetDateTime>` and imports both
/// types.
pub(crate) fn simplify_type(type_name: &str, imports: &mut BTreeSet<String>) -> String {
    qualified_name_re()
        .replace_all(type_name, |captures: &regex::Captures<'_>| {
            imports.insert(format!("{}{}", &captures[1], &captures[2]));
            captures[2].to_string()
        })
        .into_owned()
}
