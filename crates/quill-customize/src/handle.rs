use lsp_types::{SymbolInformation, Uri};

use crate::editor::Editor;
use crate::error::{CustomizationError, Result};
use crate::text_pos;

/// What every customization handle records about its target.
///
/// The handle is valid for exactly one version of its file. Any mutation of that file,
/// through this handle or another, makes it stale.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeCustomization {
    symbol: SymbolInformation,
    file_uri: Uri,
    file_name: String,
    version: u64,
}

impl CodeCustomization {
    pub(crate) fn resolve(editor: &Editor, symbol: SymbolInformation) -> Result<Self> {
        let file_uri = symbol.location.uri.clone();
        let file_name = editor.file_name_for(&file_uri)?;
        let version = editor
            .version(&file_name)
            .ok_or_else(|| CustomizationError::MissingFile(file_name.clone()))?;
        Ok(Self {
            symbol,
            file_uri,
            file_name,
            version,
        })
    }

    pub fn symbol(&self) -> &SymbolInformation {
        &self.symbol
    }

    pub fn file_uri(&self) -> &Uri {
        &self.file_uri
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Line of the declared name.
    pub fn line(&self) -> u32 {
        self.symbol.location.range.start.line
    }

    /// Fails unless the file still exists at the version this handle was resolved against.
    pub fn check(&self, editor: &Editor) -> Result<()> {
        let actual = editor
            .version(&self.file_name)
            .ok_or_else(|| CustomizationError::MissingFile(self.file_name.clone()))?;
        if actual != self.version {
            return Err(CustomizationError::StaleHandle {
                symbol: self.symbol.name.clone(),
                file: self.file_name.clone(),
                expected: self.version,
                actual,
            });
        }
        Ok(())
    }

    /// The same declaration after lines above it grew by `delta`, at the file's current version.
    pub(crate) fn shifted(&self, editor: &Editor, delta: i64) -> Result<Self> {
        let mut symbol = self.symbol.clone();
        let range = &mut symbol.location.range;
        range.start.line = crate::ops::shift(range.start.line, delta);
        range.end.line = crate::ops::shift(range.end.line, delta);
        Self::resolve(editor, symbol)
    }

    /// Byte offset of the declared name within its line.
    pub(crate) fn name_offset(&self, editor: &Editor) -> Result<usize> {
        let start = self.symbol.location.range.start;
        let text = editor.file_line(&self.file_name, start.line)?;
        text_pos::byte_offset(text, start.character).ok_or_else(|| {
            CustomizationError::IllegalState(format!(
                "symbol {} points outside line {} of {}",
                self.symbol.name, start.line, self.file_name
            ))
        })
    }
}
