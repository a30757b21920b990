use std::collections::BTreeMap;

use lsp_types::{Position, Range, Uri};

use crate::error::EditorError;
use crate::text_pos;

/// Root used for file URIs when none is given.
pub const DEFAULT_ROOT_URI: &str = "file:///workspace/";

#[derive(Debug, Clone)]
struct FileBuffer {
    lines: Vec<String>,
    version: u64,
}

impl FileBuffer {
    fn new(content: &str, version: u64) -> Self {
        Self {
            lines: content.split('\n').map(str::to_string).collect(),
            version,
        }
    }

    fn content(&self) -> String {
        self.lines.join("\n")
    }
}

/// In-memory, line-addressed buffer for every file under customization.
///
/// Files are keyed by their path relative to the root (`src/main/java/com/example/Foo.java`).
/// Every mutation of a file stamps it with a fresh version drawn from a single clock, so a
/// version observed once is never observed again for that path, even across remove and re-add.
#[derive(Debug, Clone)]
pub struct Editor {
    root_uri: String,
    files: BTreeMap<String, FileBuffer>,
    clock: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_root_uri(DEFAULT_ROOT_URI)
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_uri(root_uri: impl Into<String>) -> Self {
        let mut root_uri = root_uri.into();
        if !root_uri.ends_with('/') {
            root_uri.push('/');
        }
        Self {
            root_uri,
            files: BTreeMap::new(),
            clock: 0,
        }
    }

    pub fn from_files<I, K, V>(files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut editor = Self::new();
        for (name, content) in files {
            editor.replace_file(name, content.as_ref());
        }
        editor
    }

    pub fn root_uri(&self) -> &str {
        &self.root_uri
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn buffer(&self, file: &str) -> Result<&FileBuffer, EditorError> {
        self.files.get(file).ok_or_else(|| EditorError::MissingFile {
            file: file.to_string(),
        })
    }

    /// Mutable access that stamps the file with a new version.
    fn buffer_mut(&mut self, file: &str) -> Result<&mut FileBuffer, EditorError> {
        if !self.files.contains_key(file) {
            return Err(EditorError::MissingFile {
                file: file.to_string(),
            });
        }
        let version = self.tick();
        let buffer = self
            .files
            .get_mut(file)
            .ok_or_else(|| EditorError::MissingFile {
                file: file.to_string(),
            })?;
        buffer.version = version;
        Ok(buffer)
    }

    pub fn add_file(&mut self, file: impl Into<String>, content: &str) -> Result<(), EditorError> {
        let file = file.into();
        if self.files.contains_key(&file) {
            return Err(EditorError::FileExists { file });
        }
        self.replace_file(file, content);
        Ok(())
    }

    /// Adds or overwrites `file`.
    pub fn replace_file(&mut self, file: impl Into<String>, content: &str) {
        let version = self.tick();
        self.files.insert(file.into(), FileBuffer::new(content, version));
    }

    pub fn remove_file(&mut self, file: &str) -> Result<String, EditorError> {
        let buffer = self
            .files
            .remove(file)
            .ok_or_else(|| EditorError::MissingFile {
                file: file.to_string(),
            })?;
        tracing::debug!(target = "quill.customize", file, "removed file from editor");
        Ok(buffer.content())
    }

    pub fn rename_file(&mut self, old: &str, new: &str) -> Result<(), EditorError> {
        if old == new {
            return Ok(());
        }
        if self.files.contains_key(new) {
            return Err(EditorError::FileExists {
                file: new.to_string(),
            });
        }
        let mut buffer = self
            .files
            .remove(old)
            .ok_or_else(|| EditorError::MissingFile {
                file: old.to_string(),
            })?;
        buffer.version = self.tick();
        self.files.insert(new.to_string(), buffer);
        tracing::debug!(target = "quill.customize", old, new, "renamed file in editor");
        Ok(())
    }

    pub fn contains(&self, file: &str) -> bool {
        self.files.contains_key(file)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.files.keys().map(String::as_str)
    }

    pub fn version(&self, file: &str) -> Option<u64> {
        self.files.get(file).map(|buffer| buffer.version)
    }

    pub fn file_content(&self, file: &str) -> Result<String, EditorError> {
        Ok(self.buffer(file)?.content())
    }

    pub fn file_lines(&self, file: &str) -> Result<&[String], EditorError> {
        Ok(&self.buffer(file)?.lines)
    }

    pub fn file_line(&self, file: &str, line: u32) -> Result<&str, EditorError> {
        let buffer = self.buffer(file)?;
        buffer
            .lines
            .get(line as usize)
            .map(String::as_str)
            .ok_or_else(|| EditorError::LineOutOfBounds {
                file: file.to_string(),
                line,
                len: buffer.lines.len(),
            })
    }

    pub fn line_count(&self, file: &str) -> Result<u32, EditorError> {
        let len = self.buffer(file)?.lines.len();
        Ok(u32::try_from(len).unwrap_or(u32::MAX))
    }

    /// Inserts an empty line before `line` (or at the end when `line` equals the line count).
    ///
    /// With `indented`, the new line carries the leading whitespace of the line that previously
    /// sat at `line`. Returns the position just past that indentation.
    pub fn insert_blank_line(
        &mut self,
        file: &str,
        line: u32,
        indented: bool,
    ) -> Result<Position, EditorError> {
        let indent = if indented {
            leading_whitespace(self.file_line(file, line)?).to_string()
        } else {
            String::new()
        };
        self.insert_blank_line_with_indent(file, line, &indent)
    }

    pub fn insert_blank_line_with_indent(
        &mut self,
        file: &str,
        line: u32,
        indent: &str,
    ) -> Result<Position, EditorError> {
        self.insert_lines(file, line, vec![indent.to_string()])?;
        Ok(Position::new(line, text_pos::utf16_len(indent)))
    }

    /// Inserts `lines` so that the first one ends up at index `at`.
    pub fn insert_lines(
        &mut self,
        file: &str,
        at: u32,
        lines: Vec<String>,
    ) -> Result<(), EditorError> {
        let len = self.buffer(file)?.lines.len();
        if at as usize > len {
            return Err(EditorError::LineOutOfBounds {
                file: file.to_string(),
                line: at,
                len,
            });
        }
        let buffer = self.buffer_mut(file)?;
        let at = at as usize;
        buffer.lines.splice(at..at, lines);
        Ok(())
    }

    /// Removes lines `start..=end`.
    pub fn remove_lines(&mut self, file: &str, start: u32, end: u32) -> Result<(), EditorError> {
        let len = self.buffer(file)?.lines.len();
        if start > end || end as usize >= len {
            return Err(EditorError::LineOutOfBounds {
                file: file.to_string(),
                line: end,
                len,
            });
        }
        let buffer = self.buffer_mut(file)?;
        buffer.lines.drain(start as usize..=end as usize);
        Ok(())
    }

    /// Replaces the text between `start` and `end` with `content`, which may span lines.
    pub fn replace(
        &mut self,
        file: &str,
        start: Position,
        end: Position,
        content: &str,
    ) -> Result<(), EditorError> {
        let (start_offset, end_offset) = self.range_offsets(file, start, end)?;
        let buffer = self.buffer_mut(file)?;
        let first = start.line as usize;
        let last = end.line as usize;
        let joined = format!(
            "{}{content}{}",
            &buffer.lines[first][..start_offset],
            &buffer.lines[last][end_offset..]
        );
        buffer
            .lines
            .splice(first..=last, joined.split('\n').map(str::to_string));
        Ok(())
    }

    /// Like [`Editor::replace`], but every line of `content` after the first is prefixed with
    /// `indent` spaces. Empty lines stay empty.
    pub fn replace_with_indented_content(
        &mut self,
        file: &str,
        start: Position,
        end: Position,
        content: &str,
        indent: usize,
    ) -> Result<(), EditorError> {
        let prefix = " ".repeat(indent);
        let indented = content
            .split('\n')
            .enumerate()
            .map(|(index, line)| {
                if index == 0 || line.is_empty() {
                    line.to_string()
                } else {
                    format!("{prefix}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        self.replace(file, start, end, &indented)
    }

    /// Every position where `needle` starts, in document order.
    pub fn search_text(&self, file: &str, needle: &str) -> Result<Vec<Position>, EditorError> {
        let buffer = self.buffer(file)?;
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        for (index, line) in buffer.lines.iter().enumerate() {
            for (offset, _) in line.match_indices(needle) {
                if let Some(character) = text_pos::utf16_column(line, offset) {
                    out.push(Position::new(index as u32, character));
                }
            }
        }
        Ok(out)
    }

    pub fn search_text_first_occurrence(
        &self,
        file: &str,
        needle: &str,
    ) -> Result<Option<Position>, EditorError> {
        Ok(self.search_text(file, needle)?.into_iter().next())
    }

    /// Text covered by `range`, with the lines joined by `delimiter`.
    pub fn text_in_range(
        &self,
        file: &str,
        range: Range,
        delimiter: &str,
    ) -> Result<String, EditorError> {
        let (start_offset, end_offset) = self.range_offsets(file, range.start, range.end)?;
        let buffer = self.buffer(file)?;
        let first = range.start.line as usize;
        let last = range.end.line as usize;
        if first == last {
            return Ok(buffer.lines[first][start_offset..end_offset].to_string());
        }
        let mut parts = Vec::with_capacity(last - first + 1);
        parts.push(&buffer.lines[first][start_offset..]);
        for line in &buffer.lines[first + 1..last] {
            parts.push(line.as_str());
        }
        parts.push(&buffer.lines[last][..end_offset]);
        Ok(parts.join(delimiter))
    }

    fn range_offsets(
        &self,
        file: &str,
        start: Position,
        end: Position,
    ) -> Result<(usize, usize), EditorError> {
        let start_offset = self.byte_offset(file, start)?;
        let end_offset = self.byte_offset(file, end)?;
        if (end.line, end.character) < (start.line, start.character) {
            return Err(EditorError::InvalidPosition {
                file: file.to_string(),
                line: end.line,
                character: end.character,
            });
        }
        Ok((start_offset, end_offset))
    }

    fn byte_offset(&self, file: &str, position: Position) -> Result<usize, EditorError> {
        let line = self.file_line(file, position.line)?;
        text_pos::byte_offset(line, position.character).ok_or_else(|| {
            EditorError::InvalidPosition {
                file: file.to_string(),
                line: position.line,
                character: position.character,
            }
        })
    }

    pub fn uri_for(&self, file: &str) -> Result<Uri, EditorError> {
        let uri = format!("{}{file}", self.root_uri);
        uri.parse::<Uri>()
            .map_err(|_| EditorError::InvalidUri { uri })
    }

    /// Inverse of [`Editor::uri_for`].
    pub fn file_name_for(&self, uri: &Uri) -> Result<String, EditorError> {
        uri.as_str()
            .strip_prefix(&self.root_uri)
            .map(str::to_string)
            .ok_or_else(|| EditorError::ForeignUri {
                uri: uri.as_str().to_string(),
                root: self.root_uri.clone(),
            })
    }

    pub fn contents(&self) -> BTreeMap<String, String> {
        self.files
            .iter()
            .map(|(name, buffer)| (name.clone(), buffer.content()))
            .collect()
    }

    pub fn into_contents(self) -> BTreeMap<String, String> {
        self.files
            .into_iter()
            .map(|(name, buffer)| (name, buffer.content()))
            .collect()
    }
}

/// The run of spaces and tabs a line starts with.
pub fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}
