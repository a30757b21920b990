//! The line sink every writer in this crate appends to.
//!
//! [`JavaFileContents`] keeps a list of completed lines plus the line currently under
//! construction. Two pieces of state decide how a write lands:
//!
//! - the line prefix, which grows by [`INDENT`] for every nesting level and by comment
//!   markers (`// `, ` * `) while a comment is open
//! - the [`LineState`], which records whether the current line is empty, holds partial
//!   text, or holds the closing `}` of an `if`/`try` body that an `else`/`catch`/`finally`
//!   may still continue
//!
//! Every structural helper closes the braces it opens before returning, and prefix
//! changes made by [`JavaFileContents::indent`] are undone even when the body panics.

use std::fmt;

use crate::block::{JavaBlock, JavaLineComment};
use crate::class::JavaClass;
use crate::enums::JavaEnum;
use crate::imports::compare_imports;
use crate::interface::JavaInterface;
use crate::javadoc::JavaJavadocComment;
use crate::lambda::JavaLambda;
use crate::visibility::{declaration_header, JavaModifier, Visibility};

/// One level of indentation.
pub const INDENT: &str = "    ";

const LINE_COMMENT_PREFIX: &str = "// ";
const BLOCK_COMMENT_PREFIX: &str = " * ";

/// Where the next write lands relative to the line under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    /// The last write ended a line.
    #[default]
    Empty,
    /// A partial line is open; the next write appends to it without a prefix.
    Text,
    /// The current line holds the `}` closing an `if`/`else if`/`try`/`catch` body.
    AfterConditionalBlock,
}

/// The kind of write being performed, as seen by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteKind {
    /// Text that does not end the line.
    Text,
    /// Text that ends the line.
    Line,
    /// `else`, `else if`, `catch` or `finally` header.
    Continuation,
}

/// How to treat the line under construction before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WritePlan {
    pub(crate) close_open_line: bool,
    pub(crate) apply_prefix: bool,
    pub(crate) join_open_line: bool,
}

impl LineState {
    pub(crate) const fn plan(self, kind: WriteKind) -> WritePlan {
        let (close_open_line, apply_prefix, join_open_line) = match (self, kind) {
            (LineState::Empty, _) => (false, true, false),
            (LineState::Text, WriteKind::Text | WriteKind::Line) => (false, false, false),
            (LineState::Text, WriteKind::Continuation) => (true, true, false),
            (LineState::AfterConditionalBlock, WriteKind::Continuation) => (false, false, true),
            (LineState::AfterConditionalBlock, WriteKind::Text | WriteKind::Line) => {
                (true, true, false)
            }
        };
        WritePlan {
            close_open_line,
            apply_prefix,
            join_open_line,
        }
    }

    pub(crate) const fn after(kind: WriteKind) -> LineState {
        match kind {
            WriteKind::Text => LineState::Text,
            WriteKind::Line | WriteKind::Continuation => LineState::Empty,
        }
    }
}

/// Restores the prefix length recorded at creation when dropped.
struct PrefixGuard<'a> {
    contents: &'a mut JavaFileContents,
    restore_len: usize,
}

impl Drop for PrefixGuard<'_> {
    fn drop(&mut self) {
        self.contents.line_prefix.truncate(self.restore_len);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaFileContents {
    lines: Vec<String>,
    current_line: String,
    line_prefix: String,
    state: LineState,
}

impl JavaFileContents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_prefix(&self) -> &str {
        &self.line_prefix
    }

    /// Number of [`INDENT`] units in the current prefix, ignoring comment markers.
    pub fn indent_level(&self) -> usize {
        self.line_prefix.matches(INDENT).count()
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    /// Whether any completed line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }

    pub fn increase_indent(&mut self) {
        self.line_prefix.push_str(INDENT);
    }

    pub fn decrease_indent(&mut self) {
        self.remove_from_prefix(INDENT);
    }

    /// Runs `f` one indentation level deeper.
    pub fn indent<R>(&mut self, f: impl FnOnce(&mut JavaFileContents) -> R) -> R {
        self.with_prefix(INDENT, f)
    }

    pub(crate) fn with_prefix<R>(
        &mut self,
        segment: &str,
        f: impl FnOnce(&mut JavaFileContents) -> R,
    ) -> R {
        let restore_len = self.line_prefix.len();
        self.line_prefix.push_str(segment);
        let mut guard = PrefixGuard {
            contents: self,
            restore_len,
        };
        let result = f(&mut *guard.contents);
        drop(guard);
        result
    }

    fn remove_from_prefix(&mut self, segment: &str) {
        if self.line_prefix.len() <= segment.len() {
            self.line_prefix.clear();
        } else {
            let len = self.line_prefix.len() - segment.len();
            self.line_prefix.truncate(len);
        }
    }

    /// Appends `text` to the current line without ending it.
    pub fn text(&mut self, text: &str) {
        self.write(WriteKind::Text, text);
    }

    /// Appends `text` and ends the line.
    pub fn line(&mut self, text: &str) {
        self.write(WriteKind::Line, text);
    }

    pub fn blank_line(&mut self) {
        self.line("");
    }

    pub(crate) fn write(&mut self, kind: WriteKind, text: &str) {
        let plan = self.state.plan(kind);
        if plan.close_open_line {
            self.complete_current_line();
        }

        let text = if kind == WriteKind::Continuation && plan.join_open_line {
            format!(" {text}")
        } else {
            text.to_string()
        };

        let trailing_newline = !text.is_empty() && text.ends_with('\n');
        let body = if trailing_newline {
            &text[..text.len() - 1]
        } else {
            text.as_str()
        };
        let complete_last = kind != WriteKind::Text || trailing_newline;

        let mut pieces = body.split('\n').peekable();
        let mut apply_prefix = plan.apply_prefix;
        while let Some(piece) = pieces.next() {
            let complete = pieces.peek().is_some() || complete_last;
            self.push_piece(piece, apply_prefix, complete);
            // Continuation lines of multi-line text always start fresh.
            apply_prefix = true;
        }

        self.state = if trailing_newline {
            LineState::Empty
        } else {
            LineState::after(kind)
        };
    }

    fn push_piece(&mut self, piece: &str, apply_prefix: bool, complete: bool) {
        if apply_prefix && !self.line_prefix.is_empty() {
            let prefix_is_blank = self.line_prefix.trim().is_empty();
            let piece_is_blank = piece.trim().is_empty();
            if !piece_is_blank {
                self.current_line.push_str(&self.line_prefix);
            } else if !prefix_is_blank {
                // Blank comment lines keep the marker but not its trailing space.
                self.current_line.push_str(self.line_prefix.trim_end());
            }
        }
        self.current_line.push_str(piece);
        if complete {
            self.complete_current_line();
        }
    }

    fn complete_current_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current_line));
    }

    /// Writes the closing `}` of a body that may be continued by `else`/`catch`/`finally`.
    pub(crate) fn close_conditional_body(&mut self) {
        self.text("}");
        self.state = LineState::AfterConditionalBlock;
    }

    pub fn declare_package(&mut self, package: &str) {
        self.line(&format!("package {package};"));
    }

    /// Writes `import` lines in canonical order followed by one blank line.
    ///
    /// Duplicates and empty entries are dropped. Nothing is written when no import is left.
    /// Filtering against the file's own package is done by [`crate::JavaFile`].
    pub fn declare_import<I, S>(&mut self, imports: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = imports
            .into_iter()
            .map(|import| import.as_ref().trim().to_string())
            .filter(|import| !import.is_empty())
            .collect();
        sorted.sort_by(|a, b| compare_imports(a, b));
        sorted.dedup();
        if sorted.is_empty() {
            return;
        }
        for import in &sorted {
            self.line(&format!("import {import};"));
        }
        self.blank_line();
    }

    /// `header {`, an indented body, then `}`.
    pub fn block(&mut self, header: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.line(&format!("{header} {{"));
        self.indent(|contents| body(&mut JavaBlock::new(contents)));
        self.line("}");
    }

    pub fn line_comment(&mut self, text: &str) {
        self.line_comment_with(|comment| comment.line(text));
    }

    pub fn line_comment_with(&mut self, f: impl FnOnce(&mut JavaLineComment<'_>)) {
        self.with_prefix(LINE_COMMENT_PREFIX, |contents| {
            f(&mut JavaLineComment::new(contents))
        });
    }

    pub fn block_comment(&mut self, text: &str) {
        self.block_comment_with(|comment| comment.line(text));
    }

    pub fn block_comment_with(&mut self, f: impl FnOnce(&mut JavaLineComment<'_>)) {
        self.line("/*");
        self.with_prefix(BLOCK_COMMENT_PREFIX, |contents| {
            f(&mut JavaLineComment::new(contents))
        });
        self.line(" */");
    }

    /// A Javadoc block holding only `description`.
    pub fn javadoc_comment(&mut self, description: &str) {
        self.javadoc_comment_with(|comment| comment.description(description));
    }

    pub fn javadoc_comment_with(&mut self, f: impl FnOnce(&mut JavaJavadocComment<'_>)) {
        self.line("/**");
        self.with_prefix(BLOCK_COMMENT_PREFIX, |contents| {
            f(&mut JavaJavadocComment::new(contents))
        });
        self.line(" */");
    }

    pub fn method_return(&mut self, expression: &str) {
        self.line(&format!("return {expression};"));
    }

    /// `return Declaration {` with a class body, closed by `};`.
    pub fn return_anonymous_class(
        &mut self,
        declaration: &str,
        body: impl FnOnce(&mut JavaClass<'_>),
    ) {
        self.line(&format!("return {declaration} {{"));
        self.indent(|contents| body(&mut JavaClass::new(contents)));
        self.line("};");
    }

    /// `Type name = new Type() {` with a class body, closed by `};`.
    pub fn anonymous_class(
        &mut self,
        declaration: &str,
        instance_name: &str,
        body: impl FnOnce(&mut JavaClass<'_>),
    ) {
        self.line(&format!(
            "{declaration} {instance_name} = new {declaration}() {{"
        ));
        self.indent(|contents| body(&mut JavaClass::new(contents)));
        self.line("};");
    }

    /// One `@Annotation` line per non-empty entry. The `@` is added when missing.
    pub fn annotation<I, S>(&mut self, annotations: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for annotation in annotations {
            let annotation = annotation.as_ref().trim();
            if annotation.is_empty() {
                continue;
            }
            if annotation.starts_with('@') {
                self.line(annotation);
            } else {
                self.line(&format!("@{annotation}"));
            }
        }
    }

    pub fn class_block(
        &mut self,
        visibility: Visibility,
        modifiers: &[JavaModifier],
        declaration: &str,
        body: impl FnOnce(&mut JavaClass<'_>),
    ) {
        let header = declaration_header(visibility, modifiers, &format!("class {declaration}"));
        self.line(&format!("{header} {{"));
        self.indent(|contents| body(&mut JavaClass::new(contents)));
        self.line("}");
    }

    pub fn method(
        &mut self,
        visibility: Visibility,
        modifiers: &[JavaModifier],
        signature: &str,
        body: impl FnOnce(&mut JavaBlock<'_>),
    ) {
        let header = declaration_header(visibility, modifiers, signature);
        self.block(&header, body);
    }

    pub fn constructor(
        &mut self,
        visibility: Visibility,
        signature: &str,
        body: impl FnOnce(&mut JavaBlock<'_>),
    ) {
        let header = declaration_header(visibility, &[], signature);
        self.block(&header, body);
    }

    pub fn enum_block(
        &mut self,
        visibility: Visibility,
        name: &str,
        body: impl FnOnce(&mut JavaEnum<'_>),
    ) {
        let header = declaration_header(visibility, &[], &format!("enum {name}"));
        self.line(&format!("{header} {{"));
        self.indent(|contents| {
            let mut java_enum = JavaEnum::new(contents);
            body(&mut java_enum);
            java_enum.finish();
        });
        self.line("}");
    }

    pub fn interface_block(
        &mut self,
        visibility: Visibility,
        signature: &str,
        body: impl FnOnce(&mut JavaInterface<'_>),
    ) {
        let header = declaration_header(visibility, &[], &format!("interface {signature}"));
        self.line(&format!("{header} {{"));
        self.indent(|contents| body(&mut JavaInterface::new(contents)));
        self.line("}");
    }

    pub fn if_block(&mut self, condition: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.line(&format!("if ({condition}) {{"));
        self.indent(|contents| body(&mut JavaBlock::new(contents)));
        self.close_conditional_body();
    }

    pub fn else_if_block(&mut self, condition: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.write(WriteKind::Continuation, &format!("else if ({condition}) {{"));
        self.indent(|contents| body(&mut JavaBlock::new(contents)));
        self.close_conditional_body();
    }

    pub fn else_block(&mut self, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.write(WriteKind::Continuation, "else {");
        self.indent(|contents| body(&mut JavaBlock::new(contents)));
        self.line("}");
    }

    pub fn try_block(&mut self, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.line("try {");
        self.indent(|contents| body(&mut JavaBlock::new(contents)));
        self.close_conditional_body();
    }

    pub fn try_with_resource_block(
        &mut self,
        resource: &str,
        body: impl FnOnce(&mut JavaBlock<'_>),
    ) {
        self.line(&format!("try ({resource}) {{"));
        self.indent(|contents| body(&mut JavaBlock::new(contents)));
        self.close_conditional_body();
    }

    /// A `catch` body. Further `catch` or `finally` blocks continue on the closing line.
    pub fn catch_block(&mut self, exception: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.write(WriteKind::Continuation, &format!("catch ({exception}) {{"));
        self.indent(|contents| body(&mut JavaBlock::new(contents)));
        self.close_conditional_body();
    }

    pub fn finally_block(&mut self, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.write(WriteKind::Continuation, "finally {");
        self.indent(|contents| body(&mut JavaBlock::new(contents)));
        self.line("}");
    }

    /// `(Type name) -> ` followed by whatever `body` writes.
    pub fn lambda(
        &mut self,
        parameter_type: &str,
        parameter_name: &str,
        body: impl FnOnce(&mut JavaLambda<'_>),
    ) {
        self.text(&format!("({parameter_type} {parameter_name}) -> "));
        let mut lambda = JavaLambda::new(self);
        body(&mut lambda);
        lambda.finish();
    }

    /// A single-expression lambda.
    pub fn lambda_expression(
        &mut self,
        parameter_type: &str,
        parameter_name: &str,
        expression: &str,
    ) {
        self.lambda(parameter_type, parameter_name, |lambda| {
            lambda.lambda_return(expression)
        });
    }
}

impl fmt::Display for JavaFileContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))?;
        if !self.lines.is_empty() {
            f.write_str("\n")?;
        }
        f.write_str(&self.current_line)
    }
}
