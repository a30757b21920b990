//! Javadoc blocks and the text normalization applied to every description.
//!
//! Descriptions come from service definitions, which are written in plain text or light
//! Markdown and may contain characters that break a Javadoc comment. [`process_description`]
//! turns such text into something that renders the same way in generated API docs:
//!
//! 1. surrounding whitespace is trimmed and empty text yields nothing
//! 2. `&`, `<` and `>` are escaped as HTML entities
//! 3. tabs become four spaces
//! 4. `@` is escaped as `&#64;` unless it opens an inline tag (`{@code ...}`)
//! 5. Markdown lists, bold and italic become `<ul>`/`<ol>`, `<b>` and `<i>`
//! 6. a trailing period is added unless the text ends with one or with a list
//! 7. `*/` is broken up as `*&#47;` so it cannot close the comment early

use std::sync::OnceLock;

use regex::Regex;

use crate::contents::{JavaFileContents, INDENT};

/// Lines inside a `/** ... */` block.
///
/// The description and free-form lines come first; the first tag (`@param`, `@return`,
/// `@throws`, ...) is preceded by a single blank ` *` line when anything was written above it.
pub struct JavaJavadocComment<'a> {
    contents: &'a mut JavaFileContents,
    expects_line_separator: bool,
}

impl<'a> JavaJavadocComment<'a> {
    pub(crate) fn new(contents: &'a mut JavaFileContents) -> Self {
        Self {
            contents,
            expects_line_separator: false,
        }
    }

    fn add_expected_line_separator(&mut self) {
        if self.expects_line_separator {
            self.contents.blank_line();
            self.expects_line_separator = false;
        }
    }

    pub fn description(&mut self, text: &str) {
        if let Some(text) = process_description(text) {
            self.contents.line(&text);
            self.expects_line_separator = true;
        }
    }

    /// A raw line, written as-is apart from `*/` protection.
    pub fn line(&mut self, text: &str) {
        self.contents.line(&escape_comment_end(text));
        self.expects_line_separator = true;
    }

    pub fn param(&mut self, name: &str, description: &str) {
        self.tag(&format!("@param {name}"), description);
    }

    pub fn method_returns(&mut self, description: &str) {
        self.tag("@return", description);
    }

    pub fn method_throws(&mut self, exception: &str, description: &str) {
        self.tag(&format!("@throws {exception}"), description);
    }

    pub fn see(&mut self, reference: &str) {
        self.tag(&format!("@see {reference}"), "");
    }

    pub fn since(&mut self, version: &str) {
        self.tag(&format!("@since {version}"), "");
    }

    pub fn deprecated(&mut self, description: &str) {
        self.tag("@deprecated", description);
    }

    pub fn inherit_doc(&mut self) {
        self.contents.line("{@inheritDoc}");
        self.expects_line_separator = true;
    }

    fn tag(&mut self, head: &str, description: &str) {
        self.add_expected_line_separator();
        match process_description(description) {
            Some(description) => self.contents.line(&format!("{head} {description}")),
            None => self.contents.line(head),
        }
    }
}

/// Normalizes free text for use inside a Javadoc block. Returns `None` for blank input.
pub fn process_description(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let text = html_escape::encode_text(text).replace('\t', INDENT);
    let text = escape_at_signs(&text);
    let text = markdown_to_html(&text);
    let text = ensure_period(text);
    Some(escape_comment_end(&text))
}

/// Breaks up `*/` so the text cannot terminate the enclosing comment.
pub fn escape_comment_end(text: &str) -> String {
    text.replace("*/", "*&#47;")
}

fn escape_at_signs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous = None;
    for ch in text.chars() {
        if ch == '@' && previous != Some('{') {
            out.push_str("&#64;");
        } else {
            out.push(ch);
        }
        previous = Some(ch);
    }
    out
}

fn ensure_period(mut text: String) -> String {
    let last_line = text.lines().last().unwrap_or_default();
    if text.ends_with('.') || last_line.ends_with("</ul>") || last_line.ends_with("</ol>") {
        return text;
    }
    text.push('.');
    text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    static UNORDERED: OnceLock<Regex> = OnceLock::new();
    static ORDERED: OnceLock<Regex> = OnceLock::new();
    let unordered =
        UNORDERED.get_or_init(|| Regex::new(r"^\s*[-*]\s+(.+)$").expect("valid regex"));
    let ordered = ORDERED.get_or_init(|| Regex::new(r"^\s*\d+\.\s+(.+)$").expect("valid regex"));

    if let Some(caps) = unordered.captures(line) {
        return caps.get(1).map(|m| (ListKind::Unordered, m.as_str()));
    }
    ordered
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| (ListKind::Ordered, m.as_str()))
}

fn inline_markup(text: &str) -> String {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    static ITALIC_STAR: OnceLock<Regex> = OnceLock::new();
    static ITALIC_UNDERSCORE: OnceLock<Regex> = OnceLock::new();
    let bold = BOLD
        .get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").expect("valid regex"));
    let italic_star = ITALIC_STAR
        .get_or_init(|| Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").expect("valid regex"));
    let italic_underscore = ITALIC_UNDERSCORE
        .get_or_init(|| Regex::new(r"\b_([^_\s](?:[^_]*[^_\s])?)_\b").expect("valid regex"));

    let text = bold.replace_all(text, |caps: &regex::Captures<'_>| {
        let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        format!("<b>{inner}</b>")
    });
    let text = italic_star.replace_all(&text, "<i>$1</i>");
    italic_underscore
        .replace_all(&text, "<i>$1</i>")
        .into_owned()
}

/// Collapses runs of Markdown list items into single HTML list lines and converts emphasis.
fn markdown_to_html(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut open_list: Option<(ListKind, String)> = None;

    for line in text.lines() {
        match list_item(line) {
            Some((kind, item)) => {
                let item = format!("<li>{}</li>", inline_markup(item.trim()));
                if let Some((open_kind, items)) = open_list.as_mut() {
                    if *open_kind == kind {
                        items.push_str(&item);
                        continue;
                    }
                }
                if let Some((open_kind, items)) = open_list.take() {
                    out.push(close_list(open_kind, &items));
                }
                open_list = Some((kind, item));
            }
            None => {
                if let Some((open_kind, items)) = open_list.take() {
                    out.push(close_list(open_kind, &items));
                }
                out.push(inline_markup(line));
            }
        }
    }
    if let Some((open_kind, items)) = open_list.take() {
        out.push(close_list(open_kind, &items));
    }
    out.join("\n")
}

fn close_list(kind: ListKind, items: &str) -> String {
    format!("<{tag}>{items}</{tag}>", tag = kind.tag())
}
