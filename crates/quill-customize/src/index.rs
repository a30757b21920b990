use std::collections::{BTreeMap, HashMap};
use std::ops::Range as ByteRange;

use lsp_types::{
    FileChangeType, FileEvent, Location, Position, Range, SymbolInformation, TextEdit, Uri,
    WorkspaceEdit,
};

use crate::client::LanguageClient;
use crate::editor::Editor;
use crate::error::ClientError;
use crate::syntax::{self, DeclKind, Declaration, ParsedFile, Receiver, ReferenceKind};
use crate::text_pos;

type Changes = HashMap<Uri, Vec<TextEdit>>;

/// An in-process [`LanguageClient`] backed by a `tree-sitter-java` parse of every Java file.
///
/// Documents are indexed from the text handed to [`IndexedLanguageClient::index_file`] or
/// read from the editor on [`LanguageClient::notify_watched_files_changed`]. Between
/// notifications the index keeps answering from the old text.
///
/// Renames follow references rather than spellings: a type is renamed where it is visible
/// (same package, imported or fully qualified), a method where the call's receiver has the
/// declaring type and the argument count fits, a field where the name resolves to it.
#[derive(Debug, Default, Clone)]
pub struct IndexedLanguageClient {
    documents: BTreeMap<String, IndexedDocument>,
}

#[derive(Debug, Clone)]
struct IndexedDocument {
    uri: Uri,
    text: String,
    line_starts: Vec<usize>,
    parsed: ParsedFile,
}

impl IndexedDocument {
    fn new(uri: Uri, text: String) -> Result<Self, ClientError> {
        let parsed = syntax::parse_java(&text).map_err(|message| ClientError::Parse {
            uri: uri.as_str().to_string(),
            message,
        })?;
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(offset, _)| offset + 1))
            .collect();
        Ok(Self {
            uri,
            text,
            line_starts,
            parsed,
        })
    }

    fn line_text(&self, line: usize) -> &str {
        let start = self.line_starts[line];
        let end = self
            .line_starts
            .get(line + 1)
            .map_or(self.text.len(), |next| next - 1);
        &self.text[start..end]
    }

    fn position(&self, offset: usize) -> Position {
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let column = offset - self.line_starts[line];
        let character = text_pos::utf16_column(self.line_text(line), column).unwrap_or_default();
        Position::new(line as u32, character)
    }

    fn offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let start = *self.line_starts.get(line)?;
        text_pos::byte_offset(self.line_text(line), position.character).map(|col| start + col)
    }

    fn range(&self, span: &ByteRange<usize>) -> Range {
        Range::new(self.position(span.start), self.position(span.end))
    }

    fn symbol(&self, decl: &Declaration) -> SymbolInformation {
        SymbolInformation {
            name: decl.name.clone(),
            kind: decl.kind.symbol_kind(),
            tags: None,
            #[allow(deprecated)]
            deprecated: None,
            location: Location::new(self.uri.clone(), self.range(&decl.name_span)),
            container_name: decl
                .container
                .clone()
                .or_else(|| self.parsed.package.clone()),
        }
    }

    fn declaration_at(&self, position: Position) -> Option<&Declaration> {
        let offset = self.offset(position)?;
        self.parsed
            .declarations
            .iter()
            .find(|decl| decl.name_span.start <= offset && offset <= decl.name_span.end)
    }

    /// The type declaring `name` in this file, if it is nested.
    fn outer_type(&self, name: &str) -> Option<&str> {
        self.parsed
            .declarations
            .iter()
            .find(|decl| decl.kind.is_type() && decl.simple_name == name)
            .and_then(|decl| decl.container.as_deref())
    }

    /// Whether this file can name the type `name`, declared in `package` (inside `outer`),
    /// by its simple name.
    fn sees_type(&self, package: Option<&str>, outer: Option<&str>, name: &str) -> bool {
        if self.parsed.package.as_deref() == package {
            return true;
        }
        let Some(package) = package else {
            return false;
        };
        let top = outer.unwrap_or(name);
        self.parsed.imports.iter().any(|import| {
            let Some(rest) = import.strip_prefix(package).and_then(|rest| rest.strip_prefix('.'))
            else {
                return false;
            };
            rest == "*"
                || rest == top
                || outer.is_some_and(|outer| {
                    rest == format!("{outer}.{name}") || rest == format!("{outer}.*")
                })
        })
    }

    fn edit(&self, span: &ByteRange<usize>, new_name: &str) -> TextEdit {
        TextEdit::new(self.range(span), new_name.to_string())
    }
}

impl IndexedLanguageClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every `.java` file currently in `editor`.
    pub fn from_editor(editor: &Editor) -> Result<Self, ClientError> {
        let mut client = Self::new();
        for file in editor.file_names().filter(|file| file.ends_with(".java")) {
            let uri = editor
                .uri_for(file)
                .map_err(|err| ClientError::Other(err.to_string()))?;
            let text = editor
                .file_content(file)
                .map_err(|err| ClientError::Other(err.to_string()))?;
            client.index_file(uri, text)?;
        }
        tracing::debug!(
            target = "quill.customize",
            documents = client.documents.len(),
            "indexed editor contents"
        );
        Ok(client)
    }

    pub fn index_file(&mut self, uri: Uri, text: impl Into<String>) -> Result<(), ClientError> {
        let key = uri.as_str().to_string();
        let document = IndexedDocument::new(uri, text.into())?;
        self.documents.insert(key, document);
        Ok(())
    }

    pub fn forget(&mut self, uri: &Uri) -> bool {
        self.documents.remove(uri.as_str()).is_some()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn document(&self, uri: &Uri) -> Result<&IndexedDocument, ClientError> {
        self.documents
            .get(uri.as_str())
            .ok_or_else(|| ClientError::UnknownDocument {
                uri: uri.as_str().to_string(),
            })
    }

    /// Simple name of the type a receiver expression evaluates to.
    fn resolve(&self, receiver: &Receiver, enclosing: Option<&str>) -> Option<String> {
        match receiver {
            Receiver::Implicit | Receiver::This => enclosing.map(str::to_string),
            Receiver::Type(name) => Some(name.clone()),
            Receiver::Call { receiver, name } => {
                let owner = self.resolve(receiver, enclosing)?;
                self.member_type(&owner, name, true)
            }
            Receiver::Field { receiver, name } => {
                let owner = self.resolve(receiver, enclosing)?;
                self.member_type(&owner, name, false)
            }
            Receiver::Super | Receiver::Unknown => None,
        }
    }

    fn member_type(&self, owner: &str, name: &str, callable: bool) -> Option<String> {
        self.documents
            .values()
            .flat_map(|doc| doc.parsed.declarations.iter())
            .find(|decl| {
                let kind_matches = if callable {
                    decl.kind == DeclKind::Method
                } else {
                    decl.kind.is_variable()
                };
                kind_matches
                    && decl.simple_name == name
                    && decl.container.as_deref() == Some(owner)
            })
            .and_then(|decl| decl.value_type.clone())
    }

    fn rename_type(&self, declaring: &IndexedDocument, old: &str, new_name: &str) -> Changes {
        let package = declaring.parsed.package.as_deref();
        let outer = declaring.outer_type(old);
        let qualified_outer = match (package, outer) {
            (Some(package), Some(outer)) => Some(format!("{package}.{outer}")),
            _ => None,
        };
        let mut changes = Changes::new();
        for doc in self.documents.values() {
            let visible = doc.uri == declaring.uri || doc.sees_type(package, outer, old);
            let edits: Vec<TextEdit> = doc
                .parsed
                .references
                .iter()
                .filter(|reference| reference.name == old)
                .filter(|reference| match &reference.kind {
                    ReferenceKind::Type {
                        qualifier: Some(qualifier),
                    } => {
                        Some(qualifier.as_str()) == package
                            || qualified_outer.as_deref() == Some(qualifier.as_str())
                            || (visible && Some(qualifier.as_str()) == outer)
                    }
                    ReferenceKind::Type { qualifier: None }
                    | ReferenceKind::Name { variable: None } => visible,
                    _ => false,
                })
                .map(|reference| doc.edit(&reference.span, new_name))
                .collect();
            if !edits.is_empty() {
                changes.insert(doc.uri.clone(), edits);
            }
        }
        changes
    }

    /// Documents that can see the type declaring `decl`, the declaring one first.
    fn member_scope<'a>(
        &'a self,
        declaring: &'a IndexedDocument,
        decl: &Declaration,
    ) -> impl Iterator<Item = &'a IndexedDocument> + 'a {
        let package = declaring.parsed.package.clone();
        let owner = decl.container.clone();
        let outer = owner
            .as_deref()
            .and_then(|owner| declaring.outer_type(owner))
            .map(str::to_string);
        self.documents.values().filter(move |doc| {
            doc.uri == declaring.uri
                || owner.as_deref().is_some_and(|owner| {
                    doc.sees_type(package.as_deref(), outer.as_deref(), owner)
                })
        })
    }

    fn rename_method(
        &self,
        declaring: &IndexedDocument,
        decl: &Declaration,
        new_name: &str,
    ) -> Changes {
        let owner = decl.container.as_deref();
        let mut changes = Changes::new();
        changes.insert(
            declaring.uri.clone(),
            vec![declaring.edit(&decl.name_span, new_name)],
        );
        for doc in self.member_scope(declaring, decl) {
            let edits = doc
                .parsed
                .references
                .iter()
                .filter(|reference| reference.name == decl.simple_name)
                .filter(|reference| {
                    let receiver = match &reference.kind {
                        ReferenceKind::Call { receiver, args } if decl.accepts_arguments(*args) => {
                            receiver
                        }
                        ReferenceKind::MethodRef { receiver } => receiver,
                        _ => return false,
                    };
                    self.resolve(receiver, reference.enclosing.as_deref()).as_deref() == owner
                })
                .map(|reference| doc.edit(&reference.span, new_name));
            changes.entry(doc.uri.clone()).or_default().extend(edits);
        }
        changes.retain(|_, edits| !edits.is_empty());
        changes
    }

    fn rename_field(
        &self,
        declaring: &IndexedDocument,
        decl: &Declaration,
        new_name: &str,
    ) -> Changes {
        let owner = decl.container.as_deref();
        let mut changes = Changes::new();
        changes.insert(
            declaring.uri.clone(),
            vec![declaring.edit(&decl.name_span, new_name)],
        );
        for doc in self.member_scope(declaring, decl) {
            let same_document = doc.uri == declaring.uri;
            let edits = doc
                .parsed
                .references
                .iter()
                .filter(|reference| reference.name == decl.simple_name)
                .filter(|reference| match &reference.kind {
                    // Parameters and locals hiding the field resolve to themselves.
                    ReferenceKind::Name { variable } => {
                        same_document && *variable == Some(decl.name_span.start)
                    }
                    ReferenceKind::FieldAccess { receiver } => {
                        self.resolve(receiver, reference.enclosing.as_deref()).as_deref() == owner
                    }
                    _ => false,
                })
                .map(|reference| doc.edit(&reference.span, new_name));
            changes.entry(doc.uri.clone()).or_default().extend(edits);
        }
        changes.retain(|_, edits| !edits.is_empty());
        changes
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| is_ident_char(first) && !first.is_ascii_digit())
        && chars.all(is_ident_char)
}

impl LanguageClient for IndexedLanguageClient {
    fn find_workspace_symbol(&self, query: &str) -> Result<Vec<SymbolInformation>, ClientError> {
        let query = query.to_lowercase();
        Ok(self
            .documents
            .values()
            .flat_map(|doc| {
                doc.parsed
                    .declarations
                    .iter()
                    .filter(|decl| decl.simple_name.to_lowercase().contains(&query))
                    .map(|decl| doc.symbol(decl))
            })
            .collect())
    }

    fn list_document_symbols(&self, uri: &Uri) -> Result<Vec<SymbolInformation>, ClientError> {
        let doc = self.document(uri)?;
        Ok(doc
            .parsed
            .declarations
            .iter()
            .map(|decl| doc.symbol(decl))
            .collect())
    }

    fn rename_symbol(
        &self,
        uri: &Uri,
        position: Position,
        new_name: &str,
    ) -> Result<WorkspaceEdit, ClientError> {
        if !is_identifier(new_name) {
            return Err(ClientError::Other(format!(
                "{new_name:?} is not a valid Java identifier"
            )));
        }
        let doc = self.document(uri)?;
        let decl = doc
            .declaration_at(position)
            .ok_or_else(|| ClientError::NoSymbolAt {
                uri: uri.as_str().to_string(),
                line: position.line,
                character: position.character,
            })?;

        let changes = match decl.kind {
            kind if kind.is_type() => self.rename_type(doc, &decl.simple_name, new_name),
            DeclKind::Constructor => {
                let class = decl.container.as_deref().unwrap_or(&decl.simple_name);
                self.rename_type(doc, class, new_name)
            }
            DeclKind::Method => self.rename_method(doc, decl, new_name),
            _ => self.rename_field(doc, decl, new_name),
        };
        tracing::debug!(
            target = "quill.customize",
            symbol = %decl.name,
            new_name,
            files = changes.len(),
            "computed rename edits"
        );
        Ok(WorkspaceEdit {
            changes: Some(changes),
            ..WorkspaceEdit::default()
        })
    }

    fn notify_watched_files_changed(
        &mut self,
        editor: &Editor,
        events: &[FileEvent],
    ) -> Result<(), ClientError> {
        for event in events {
            if event.typ == FileChangeType::DELETED {
                self.forget(&event.uri);
                continue;
            }
            let file = editor
                .file_name_for(&event.uri)
                .map_err(|err| ClientError::Other(err.to_string()))?;
            if !file.ends_with(".java") {
                continue;
            }
            let text = editor
                .file_content(&file)
                .map_err(|_| ClientError::UnknownDocument {
                    uri: event.uri.as_str().to_string(),
                })?;
            self.index_file(event.uri.clone(), text)?;
        }
        Ok(())
    }
}
