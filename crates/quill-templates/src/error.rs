use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to parse code model: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{kind} name {name:?} is not a valid Java identifier")]
    InvalidName { kind: &'static str, name: String },
    #[error("type {0} is declared more than once")]
    DuplicateType(String),
    #[error("model {model} declares property {property} more than once")]
    DuplicateProperty { model: String, property: String },
    #[error("model {model} extends unknown model {parent}")]
    UnknownParent { model: String, parent: String },
    #[error("model {0} is its own ancestor")]
    InheritanceCycle(String),
    #[error("model {0} uses JSON merge patch but extends another model")]
    MergePatchChild(String),
    #[error("unsupported content type {0:?}")]
    UnsupportedContentType(String),
    #[error("expandable enum {name} has element type {element_type}; only String is supported")]
    UnsupportedEnum { name: String, element_type: String },
}

pub type Result<T, E = TemplateError> = std::result::Result<T, E>;
