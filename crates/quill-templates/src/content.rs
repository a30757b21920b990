//! Request body serialization, keyed by content type.
//!
//! Every supported content type maps to one [`BodySerializer`] from a fixed set; templates ask
//! the serializer for the `Content-Type` value and for the expression that turns a value into
//! a request body.

use std::fmt;
use std::str::FromStr;

use crate::error::TemplateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Json,
    Xml,
    Text,
    Binary,
    Multipart,
    MergePatch,
}

impl ContentKind {
    pub const ALL: [ContentKind; 6] = [
        ContentKind::Json,
        ContentKind::Xml,
        ContentKind::Text,
        ContentKind::Binary,
        ContentKind::Multipart,
        ContentKind::MergePatch,
    ];

    /// Classifies a MIME type. Parameters (`; charset=utf-8`) are ignored. Returns `None` for
    /// text that isn't `type/subtype`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next()?.trim().to_ascii_lowercase();
        let (top, sub) = essence.split_once('/')?;
        if top.is_empty() || sub.is_empty() {
            return None;
        }
        let kind = match (top, sub) {
            ("application", "merge-patch+json") => ContentKind::MergePatch,
            (_, "json") => ContentKind::Json,
            (_, sub) if sub.ends_with("+json") => ContentKind::Json,
            (_, "xml") => ContentKind::Xml,
            (_, sub) if sub.ends_with("+xml") => ContentKind::Xml,
            ("multipart", _) => ContentKind::Multipart,
            ("text", _) => ContentKind::Text,
            _ => ContentKind::Binary,
        };
        Some(kind)
    }

    pub fn serializer(self) -> &'static dyn BodySerializer {
        match self {
            ContentKind::Json => &JsonSerializer,
            ContentKind::Xml => &XmlSerializer,
            ContentKind::Text => &TextSerializer,
            ContentKind::Binary => &BinarySerializer,
            ContentKind::Multipart => &MultipartSerializer,
            ContentKind::MergePatch => &MergePatchSerializer,
        }
    }
}

impl FromStr for ContentKind {
    type Err = TemplateError;

    fn from_str(mime: &str) -> Result<Self, Self::Err> {
        ContentKind::from_mime(mime)
            .ok_or_else(|| TemplateError::UnsupportedContentType(mime.to_string()))
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.serializer().content_type())
    }
}

pub trait BodySerializer: Sync {
    fn kind(&self) -> ContentKind;

    /// Canonical `Content-Type` header value.
    fn content_type(&self) -> &'static str;

    /// Types the body expression refers to.
    fn imports(&self) -> &'static [&'static str] {
        &["com.azure.core.util.BinaryData"]
    }

    /// Java expression converting `value`, an instance of `type_name`, into `BinaryData`.
    fn body_expression(&self, type_name: &str, value: &str) -> String;
}

struct JsonSerializer;
struct XmlSerializer;
struct TextSerializer;
struct BinarySerializer;
struct MultipartSerializer;
struct MergePatchSerializer;

impl BodySerializer for JsonSerializer {
    fn kind(&self) -> ContentKind {
        ContentKind::Json
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn body_expression(&self, _type_name: &str, value: &str) -> String {
        format!("BinaryData.fromObject({value})")
    }
}

impl BodySerializer for XmlSerializer {
    fn kind(&self) -> ContentKind {
        ContentKind::Xml
    }

    fn content_type(&self) -> &'static str {
        "application/xml"
    }

    fn body_expression(&self, _type_name: &str, value: &str) -> String {
        format!("BinaryData.fromString({value}.toXmlString())")
    }
}

impl BodySerializer for TextSerializer {
    fn kind(&self) -> ContentKind {
        ContentKind::Text
    }

    fn content_type(&self) -> &'static str {
        "text/plain"
    }

    fn body_expression(&self, _type_name: &str, value: &str) -> String {
        format!("BinaryData.fromString(String.valueOf({value}))")
    }
}

impl BodySerializer for BinarySerializer {
    fn kind(&self) -> ContentKind {
        ContentKind::Binary
    }

    fn content_type(&self) -> &'static str {
        "application/octet-stream"
    }

    fn body_expression(&self, _type_name: &str, value: &str) -> String {
        format!("BinaryData.fromObject({value})")
    }
}

impl BodySerializer for MultipartSerializer {
    fn kind(&self) -> ContentKind {
        ContentKind::Multipart
    }

    fn content_type(&self) -> &'static str {
        "multipart/form-data"
    }

    fn imports(&self) -> &'static [&'static str] {
        &[
            "com.azure.core.util.BinaryData",
            "com.azure.core.util.MultipartFormDataHelper",
        ]
    }

    fn body_expression(&self, _type_name: &str, value: &str) -> String {
        format!("MultipartFormDataHelper.serialize({value})")
    }
}

impl BodySerializer for MergePatchSerializer {
    fn kind(&self) -> ContentKind {
        ContentKind::MergePatch
    }

    fn content_type(&self) -> &'static str {
        "application/merge-patch+json"
    }

    fn body_expression(&self, type_name: &str, value: &str) -> String {
        format!(
            "BinaryData.fromObject(JsonMergePatchHelper.get{type_name}Accessor().prepareModelForJsonMergePatch({value}, true))"
        )
    }
}
