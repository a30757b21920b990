use std::collections::BTreeMap;

use lsp_types::{
    DocumentChangeOperation, DocumentChanges, FileChangeType, FileEvent, OneOf, SymbolInformation,
    SymbolKind, TextEdit, Uri, WorkspaceEdit,
};
use quill_emit::package_path;

use crate::class::ClassCustomization;
use crate::client::LanguageClient;
use crate::editor::Editor;
use crate::error::{CustomizationError, Result};
use crate::index::IndexedLanguageClient;

pub(crate) fn is_type_symbol(symbol: &SymbolInformation) -> bool {
    matches!(
        symbol.kind,
        SymbolKind::CLASS | SymbolKind::INTERFACE | SymbolKind::ENUM
    )
}

/// `Name` out of `Name(Type, Type)`.
pub(crate) fn simple_name(symbol: &SymbolInformation) -> &str {
    symbol
        .name
        .split_once('(')
        .map_or(symbol.name.as_str(), |(name, _)| name)
}

/// Entry point for customizing a generated library: owns the editor and the language client.
pub struct LibraryCustomization {
    editor: Editor,
    client: Box<dyn LanguageClient>,
}

impl std::fmt::Debug for LibraryCustomization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryCustomization")
            .field("editor", &self.editor)
            .finish_non_exhaustive()
    }
}

impl LibraryCustomization {
    pub fn new(editor: Editor, client: Box<dyn LanguageClient>) -> Self {
        Self { editor, client }
    }

    /// Uses an [`IndexedLanguageClient`] built from the editor's current contents.
    pub fn with_indexed_client(editor: Editor) -> Result<Self> {
        let client = IndexedLanguageClient::from_editor(&editor)?;
        Ok(Self::new(editor, Box::new(client)))
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn client(&self) -> &dyn LanguageClient {
        self.client.as_ref()
    }

    pub fn into_editor(self) -> Editor {
        self.editor
    }

    pub(crate) fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn get_package(&self, package_name: &str) -> PackageCustomization {
        PackageCustomization {
            package_name: package_name.to_string(),
        }
    }

    /// Finds the top-level type `class_name` declared in `package_name`.
    pub fn get_class(&self, package_name: &str, class_name: &str) -> Result<ClassCustomization> {
        let suffix = if package_name.is_empty() {
            format!("/{class_name}.java")
        } else {
            format!("/{}/{class_name}.java", package_path(package_name))
        };
        let symbol = self
            .client
            .find_workspace_symbol(class_name)?
            .into_iter()
            .find(|symbol| {
                is_type_symbol(symbol)
                    && symbol.name == class_name
                    && symbol.location.uri.as_str().ends_with(&suffix)
            })
            .ok_or_else(|| {
                CustomizationError::InvalidArgument(format!(
                    "{class_name} does not exist in package {package_name}"
                ))
            })?;
        ClassCustomization::resolve(self, package_name, class_name, symbol)
    }

    pub(crate) fn document_symbols(&self, uri: &Uri) -> Result<Vec<SymbolInformation>> {
        Ok(self.client.list_document_symbols(uri)?)
    }

    /// The symbol of `kind` in `container` whose name sits on `line`.
    pub(crate) fn symbol_at_line(
        &self,
        uri: &Uri,
        container: &str,
        kinds: &[SymbolKind],
        line: u32,
    ) -> Result<SymbolInformation> {
        self.document_symbols(uri)?
            .into_iter()
            .find(|symbol| {
                kinds.contains(&symbol.kind)
                    && symbol.container_name.as_deref() == Some(container)
                    && symbol.location.range.start.line == line
            })
            .ok_or_else(|| {
                CustomizationError::IllegalState(format!(
                    "no declaration found in {container} at line {line} of {} after the edit",
                    uri.as_str()
                ))
            })
    }

    pub(crate) fn notify(&mut self, events: Vec<FileEvent>) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }
        self.client
            .notify_watched_files_changed(&self.editor, &events)?;
        Ok(())
    }

    pub(crate) fn notify_changed<S: AsRef<str>>(&mut self, files: &[S]) -> Result<()> {
        let events = files
            .iter()
            .map(|file| -> Result<FileEvent> {
                Ok(FileEvent::new(
                    self.editor.uri_for(file.as_ref())?,
                    FileChangeType::CHANGED,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        self.notify(events)
    }

    /// Applies `edit` to the editor and returns the changed files, without notifying.
    ///
    /// Every target file is resolved before the first buffer is touched.
    pub(crate) fn apply_workspace_edit(&mut self, edit: &WorkspaceEdit) -> Result<Vec<String>> {
        let mut by_file: BTreeMap<String, Vec<TextEdit>> = BTreeMap::new();
        for (uri, edits) in workspace_text_edits(edit) {
            let file = self.editor.file_name_for(&uri)?;
            if !self.editor.contains(&file) {
                return Err(CustomizationError::MissingFile(file));
            }
            by_file.entry(file).or_default().extend(edits);
        }

        let mut changed = Vec::with_capacity(by_file.len());
        for (file, mut edits) in by_file {
            if edits.is_empty() {
                continue;
            }
            edits.sort_by(|a, b| {
                (b.range.start.line, b.range.start.character)
                    .cmp(&(a.range.start.line, a.range.start.character))
            });
            for edit in &edits {
                self.editor
                    .replace(&file, edit.range.start, edit.range.end, &edit.new_text)?;
            }
            tracing::debug!(
                target = "quill.customize",
                file = %file,
                edits = edits.len(),
                "applied workspace edit"
            );
            changed.push(file);
        }
        Ok(changed)
    }
}

/// Flattens the `changes` map and any text-document edits of a workspace edit.
fn workspace_text_edits(edit: &WorkspaceEdit) -> Vec<(Uri, Vec<TextEdit>)> {
    let mut out: Vec<(Uri, Vec<TextEdit>)> = edit
        .changes
        .iter()
        .flatten()
        .map(|(uri, edits)| (uri.clone(), edits.clone()))
        .collect();

    let document_edits = match &edit.document_changes {
        Some(DocumentChanges::Edits(edits)) => edits.iter().collect::<Vec<_>>(),
        Some(DocumentChanges::Operations(operations)) => operations
            .iter()
            .filter_map(|operation| match operation {
                DocumentChangeOperation::Edit(edit) => Some(edit),
                DocumentChangeOperation::Op(op) => {
                    tracing::warn!(
                        target = "quill.customize",
                        op = ?op,
                        "ignoring resource operation in workspace edit"
                    );
                    None
                }
            })
            .collect(),
        None => Vec::new(),
    };
    for document in document_edits {
        let edits = document
            .edits
            .iter()
            .map(|edit| match edit {
                OneOf::Left(edit) => edit.clone(),
                OneOf::Right(annotated) => annotated.text_edit.clone(),
            })
            .collect();
        out.push((document.text_document.uri.clone(), edits));
    }
    out
}

/// A package of the library, used to look up its classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCustomization {
    package_name: String,
}

impl PackageCustomization {
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn get_class(
        &self,
        library: &LibraryCustomization,
        class_name: &str,
    ) -> Result<ClassCustomization> {
        library.get_class(&self.package_name, class_name)
    }

    /// Every top-level type declared directly in this package, ordered by name.
    pub fn list_classes(&self, library: &LibraryCustomization) -> Result<Vec<ClassCustomization>> {
        let directory = format!("/{}/", package_path(&self.package_name));
        let mut names: Vec<String> = library
            .client
            .find_workspace_symbol("")?
            .into_iter()
            .filter(|symbol| {
                is_type_symbol(symbol)
                    && symbol.container_name.as_deref() == Some(self.package_name.as_str())
                    && symbol
                        .location
                        .uri
                        .as_str()
                        .rsplit_once('/')
                        .is_some_and(|(dir, _)| format!("{dir}/").ends_with(&directory))
            })
            .map(|symbol| symbol.name)
            .collect();
        names.sort();
        names.dedup();
        names
            .iter()
            .map(|name| library.get_class(&self.package_name, name))
            .collect()
    }
}
