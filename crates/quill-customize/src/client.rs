use lsp_types::{FileEvent, Position, SymbolInformation, Uri, WorkspaceEdit};

use crate::editor::Editor;
use crate::error::ClientError;

/// The language-server operations customizations rely on.
///
/// Implementations own the symbol index. The index is only expected to reflect editor changes
/// after [`LanguageClient::notify_watched_files_changed`] has been called for them.
pub trait LanguageClient {
    /// Symbols whose name matches `query`, across the workspace.
    fn find_workspace_symbol(&self, query: &str) -> Result<Vec<SymbolInformation>, ClientError>;

    /// Every symbol declared in the document, in document order.
    fn list_document_symbols(&self, uri: &Uri) -> Result<Vec<SymbolInformation>, ClientError>;

    /// Edits that rename the symbol declared at `position` to `new_name`.
    fn rename_symbol(
        &self,
        uri: &Uri,
        position: Position,
        new_name: &str,
    ) -> Result<WorkspaceEdit, ClientError>;

    /// Reports created, changed and deleted files. `editor` holds their current contents.
    fn notify_watched_files_changed(
        &mut self,
        editor: &Editor,
        events: &[FileEvent],
    ) -> Result<(), ClientError>;
}
