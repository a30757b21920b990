//! Reading and rewriting the Javadoc block above a declaration.
//!
//! The block is parsed into its description and tags once, when the handle is resolved. Every
//! setter edits that parsed form and, if anything changed, replaces the whole block with a
//! fresh rendering. Tags are always rendered in the same order: `@param`, `@return`,
//! `@throws`, `@see`, `@since`, `@deprecated`, then any other tag as it was written.

use quill_emit::escape_comment_end;

use crate::editor::{leading_whitespace, Editor};
use crate::error::Result;
use crate::handle::CodeCustomization;
use crate::library::LibraryCustomization;
use crate::utils;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct JavadocContent {
    description: Option<String>,
    params: Vec<(String, String)>,
    returns: Option<String>,
    throws: Vec<(String, String)>,
    see: Vec<String>,
    since: Option<String>,
    deprecated: Option<String>,
    other_tags: Vec<String>,
}

/// The text of one comment line without the `/**`, `*` or `*/` markers.
fn comment_text(line: &str) -> &str {
    let text = line.trim();
    let text = text.strip_prefix("/**").unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text).trim_start();
    let text = text.strip_prefix('*').unwrap_or(text);
    text.strip_prefix(' ').unwrap_or(text).trim_end()
}

fn split_word(text: &str) -> (String, String) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_string(), rest.trim().to_string()),
        None => (text.to_string(), String::new()),
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

impl JavadocContent {
    fn parse(lines: &[String]) -> Self {
        let mut description: Vec<&str> = Vec::new();
        let mut tags: Vec<String> = Vec::new();
        for line in lines {
            let text = comment_text(line);
            if text.starts_with('@') {
                tags.push(text.to_string());
            } else if let Some(tag) = tags.last_mut() {
                if !text.is_empty() {
                    tag.push(' ');
                    tag.push_str(text.trim());
                }
            } else {
                description.push(text);
            }
        }
        while description.first().is_some_and(|line| line.is_empty()) {
            description.remove(0);
        }
        while description.last().is_some_and(|line| line.is_empty()) {
            description.pop();
        }

        let mut content = JavadocContent {
            description: (!description.is_empty()).then(|| description.join("\n")),
            ..JavadocContent::default()
        };
        for tag in tags {
            let (name, rest) = split_word(&tag);
            match name.as_str() {
                "@param" => content.params.push(split_word(&rest)),
                "@return" | "@returns" => content.returns = Some(rest),
                "@throws" | "@exception" => content.throws.push(split_word(&rest)),
                "@see" => content.see.push(rest),
                "@since" => content.since = Some(rest),
                "@deprecated" => content.deprecated = Some(rest),
                _ => content.other_tags.push(tag),
            }
        }
        content
    }

    fn is_empty(&self) -> bool {
        *self == JavadocContent::default()
    }

    fn render(&self, indent: &str) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }
        let line = |text: &str| {
            if text.is_empty() {
                format!("{indent} *")
            } else {
                format!("{indent} * {}", escape_comment_end(text))
            }
        };
        let tag = |head: String, text: &str| {
            if text.is_empty() {
                line(&head)
            } else {
                line(&format!("{head} {text}"))
            }
        };

        let mut out = vec![format!("{indent}/**")];
        if let Some(description) = &self.description {
            out.extend(description.lines().map(|text| line(text.trim_end())));
        }
        let mut tags = Vec::new();
        for (name, text) in &self.params {
            tags.push(tag(format!("@param {name}"), text));
        }
        if let Some(text) = &self.returns {
            tags.push(tag("@return".to_string(), text));
        }
        for (exception, text) in &self.throws {
            tags.push(tag(format!("@throws {exception}"), text));
        }
        for reference in &self.see {
            tags.push(tag("@see".to_string(), reference));
        }
        if let Some(text) = &self.since {
            tags.push(tag("@since".to_string(), text));
        }
        if let Some(text) = &self.deprecated {
            tags.push(tag("@deprecated".to_string(), text));
        }
        tags.extend(self.other_tags.iter().map(|text| line(text)));
        if self.description.is_some() && !tags.is_empty() {
            out.push(line(""));
        }
        out.extend(tags);
        out.push(format!("{indent} */"));
        out
    }
}

fn upsert(entries: &mut Vec<(String, String)>, key: &str, text: String) {
    match entries.iter_mut().find(|(name, _)| name == key) {
        Some(entry) => entry.1 = text,
        None => entries.push((key.to_string(), text)),
    }
}

/// The Javadoc of a class, method, constructor or field.
///
/// Like every handle this one is tied to a single version of its file; each setter returns
/// the handle for the rewritten block. Setters given blank text leave the block untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct JavadocCustomization {
    owner: CodeCustomization,
    indent: String,
    block: Option<(u32, u32)>,
    content: JavadocContent,
}

impl JavadocCustomization {
    pub(crate) fn resolve(editor: &Editor, owner: CodeCustomization) -> Result<Self> {
        owner.check(editor)?;
        let lines = editor.file_lines(owner.file_name())?;
        let decl = owner.line();
        let anchor = utils::annotation_block_start(lines, decl);
        let block = utils::javadoc_block(lines, anchor);
        let content = block
            .map(|(start, end)| JavadocContent::parse(&lines[start as usize..=end as usize]))
            .unwrap_or_default();
        Ok(Self {
            indent: leading_whitespace(&lines[decl as usize]).to_string(),
            owner,
            block,
            content,
        })
    }

    /// The declaration this Javadoc documents.
    pub fn owner(&self) -> &CodeCustomization {
        &self.owner
    }

    /// Lines `start..=end` of the block, if the declaration has one.
    pub fn block_lines(&self) -> Option<(u32, u32)> {
        self.block
    }

    fn update(
        &self,
        library: &mut LibraryCustomization,
        change: impl FnOnce(&mut JavadocContent),
    ) -> Result<Self> {
        self.owner.check(library.editor())?;
        let mut content = self.content.clone();
        change(&mut content);
        if content == self.content {
            return Ok(self.clone());
        }

        let file = self.owner.file_name();
        let rendered = content.render(&self.indent);
        let (start, removed) = match self.block {
            Some((start, end)) => (start, end - start + 1),
            None => (
                utils::annotation_block_start(
                    library.editor().file_lines(file)?,
                    self.owner.line(),
                ),
                0,
            ),
        };
        let added = rendered.len() as u32;
        let editor = library.editor_mut();
        if removed > 0 {
            editor.remove_lines(file, start, start + removed - 1)?;
        }
        if added > 0 {
            editor.insert_lines(file, start, rendered)?;
        }
        library.notify_changed(&[file])?;
        tracing::debug!(
            target = "quill.customize",
            symbol = %self.owner.symbol().name,
            removed,
            added,
            "rewrote javadoc"
        );

        let owner = self
            .owner
            .shifted(library.editor(), i64::from(added) - i64::from(removed))?;
        Self::resolve(library.editor(), owner)
    }

    fn update_text(
        &self,
        library: &mut LibraryCustomization,
        text: &str,
        change: impl FnOnce(&mut JavadocContent, String),
    ) -> Result<Self> {
        match non_empty(text) {
            Some(text) => self.update(library, |content| change(content, text)),
            None => Ok(self.clone()),
        }
    }

    /// Copies every part of `other` into this Javadoc.
    pub fn replace(
        &self,
        library: &mut LibraryCustomization,
        other: &JavadocCustomization,
    ) -> Result<Self> {
        let replacement = other.content.clone();
        self.update(library, |content| *content = replacement)
    }

    pub fn description(&self) -> Option<&str> {
        self.content.description.as_deref()
    }

    pub fn set_description(
        &self,
        library: &mut LibraryCustomization,
        description: &str,
    ) -> Result<Self> {
        self.update_text(library, description, |content, text| {
            content.description = Some(text);
        })
    }

    pub fn remove_description(&self, library: &mut LibraryCustomization) -> Result<Self> {
        self.update(library, |content| content.description = None)
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.content.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.content
            .params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, text)| text.as_str())
    }

    /// Sets the `@param` text for `name`, appending the tag if it is new.
    pub fn set_param(
        &self,
        library: &mut LibraryCustomization,
        name: &str,
        description: &str,
    ) -> Result<Self> {
        self.update_text(library, description, |content, text| {
            upsert(&mut content.params, name, text);
        })
    }

    pub fn remove_param(&self, library: &mut LibraryCustomization, name: &str) -> Result<Self> {
        self.update(library, |content| content.params.retain(|(param, _)| param != name))
    }

    pub fn return_doc(&self) -> Option<&str> {
        self.content.returns.as_deref()
    }

    pub fn set_return(
        &self,
        library: &mut LibraryCustomization,
        description: &str,
    ) -> Result<Self> {
        self.update_text(library, description, |content, text| {
            content.returns = Some(text);
        })
    }

    pub fn remove_return(&self, library: &mut LibraryCustomization) -> Result<Self> {
        self.update(library, |content| content.returns = None)
    }

    pub fn throws(&self) -> &[(String, String)] {
        &self.content.throws
    }

    pub fn add_throws(
        &self,
        library: &mut LibraryCustomization,
        exception: &str,
        description: &str,
    ) -> Result<Self> {
        self.update_text(library, description, |content, text| {
            upsert(&mut content.throws, exception, text);
        })
    }

    pub fn remove_throws(
        &self,
        library: &mut LibraryCustomization,
        exception: &str,
    ) -> Result<Self> {
        self.update(library, |content| {
            content.throws.retain(|(name, _)| name != exception)
        })
    }

    pub fn see(&self) -> &[String] {
        &self.content.see
    }

    pub fn add_see(&self, library: &mut LibraryCustomization, reference: &str) -> Result<Self> {
        self.update_text(library, reference, |content, text| {
            if !content.see.contains(&text) {
                content.see.push(text);
            }
        })
    }

    pub fn remove_see(&self, library: &mut LibraryCustomization, reference: &str) -> Result<Self> {
        let reference = reference.trim();
        self.update(library, |content| content.see.retain(|see| see != reference))
    }

    pub fn since(&self) -> Option<&str> {
        self.content.since.as_deref()
    }

    pub fn set_since(&self, library: &mut LibraryCustomization, since: &str) -> Result<Self> {
        self.update_text(library, since, |content, text| content.since = Some(text))
    }

    pub fn remove_since(&self, library: &mut LibraryCustomization) -> Result<Self> {
        self.update(library, |content| content.since = None)
    }

    pub fn deprecated(&self) -> Option<&str> {
        self.content.deprecated.as_deref()
    }

    pub fn set_deprecated(
        &self,
        library: &mut LibraryCustomization,
        description: &str,
    ) -> Result<Self> {
        self.update_text(library, description, |content, text| {
            content.deprecated = Some(text);
        })
    }

    pub fn remove_deprecated(&self, library: &mut LibraryCustomization) -> Result<Self> {
        self.update(library, |content| content.deprecated = None)
    }
}
