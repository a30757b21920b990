use thiserror::Error;

/// Failures of the in-memory text buffer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("file {file:?} is not loaded in the editor")]
    MissingFile { file: String },
    #[error("line {line} is out of bounds in {file:?} ({len} lines)")]
    LineOutOfBounds { file: String, line: u32, len: usize },
    #[error("position {line}:{character} is not a valid character offset in {file:?}")]
    InvalidPosition {
        file: String,
        line: u32,
        character: u32,
    },
    #[error("file {file:?} already exists in the editor")]
    FileExists { file: String },
    #[error("{uri:?} is not a valid uri")]
    InvalidUri { uri: String },
    #[error("uri {uri:?} does not belong to the editor root {root:?}")]
    ForeignUri { uri: String, root: String },
}

/// Failures reported by a language client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("no symbol found at {uri}:{line}:{character}")]
    NoSymbolAt {
        uri: String,
        line: u32,
        character: u32,
    },
    #[error("document {uri} is not indexed")]
    UnknownDocument { uri: String },
    #[error("failed to parse {uri}: {message}")]
    Parse { uri: String, message: String },
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustomizationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("illegal state: {0}")]
    IllegalState(String),
    #[error(
        "stale handle for {symbol} in {file:?}: resolved at version {expected}, file is at version {actual}"
    )]
    StaleHandle {
        symbol: String,
        file: String,
        expected: u64,
        actual: u64,
    },
    #[error("file {0:?} is not loaded in the editor")]
    MissingFile(String),
    #[error("rename of {symbol} to {new_name} failed: {reason}")]
    Rename {
        symbol: String,
        new_name: String,
        reason: String,
    },
    #[error(transparent)]
    Editor(EditorError),
    #[error("language client error: {0}")]
    Client(#[from] ClientError),
}

impl From<EditorError> for CustomizationError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::MissingFile { file } => CustomizationError::MissingFile(file),
            other => CustomizationError::Editor(other),
        }
    }
}

pub type Result<T, E = CustomizationError> = std::result::Result<T, E>;
