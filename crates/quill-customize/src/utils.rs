//! Line-level helpers shared by the customization handles.
//!
//! Everything here works on the editor's lines of one file and assumes code in the shape the
//! generator writes: one declaration header per line, closing braces on their own line at the
//! declaration's indentation, annotations on the lines directly above a declaration.

use std::sync::OnceLock;

use quill_emit::organize_imports;
use regex::Regex;

use crate::editor::leading_whitespace;
use crate::modifiers::Modifiers;

pub(crate) const MEMBER_INDENT: &str = "    ";

fn line(lines: &[String], index: u32) -> &str {
    lines.get(index as usize).map_or("", String::as_str)
}

fn is_annotation_line(text: &str) -> bool {
    text.trim_start().starts_with('@')
}

/// First line of the annotations directly above `decl`, or `decl` itself.
pub(crate) fn annotation_block_start(lines: &[String], decl: u32) -> u32 {
    let mut start = decl;
    while start > 0 && is_annotation_line(line(lines, start - 1)) {
        start -= 1;
    }
    start
}

/// Lines `start..=end` of the `/** ... */` block ending right above `anchor`.
pub(crate) fn javadoc_block(lines: &[String], anchor: u32) -> Option<(u32, u32)> {
    if anchor == 0 || !line(lines, anchor - 1).trim_end().ends_with("*/") {
        return None;
    }
    let end = anchor - 1;
    let mut start = end;
    loop {
        let text = line(lines, start).trim_start();
        if text.starts_with("/**") {
            return Some((start, end));
        }
        if text.starts_with("/*") || start == 0 {
            return None;
        }
        start -= 1;
    }
}

/// First line belonging to the declaration at `decl`: its Javadoc, annotations or itself.
pub(crate) fn declaration_start(lines: &[String], decl: u32) -> u32 {
    let anchor = annotation_block_start(lines, decl);
    javadoc_block(lines, anchor).map_or(anchor, |(start, _)| start)
}

/// Where a declaration's body braces are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Body {
    /// Declaration ends with `;` on line `end`.
    None { end: u32 },
    /// `{ ... }` opened and closed on line `line`.
    SingleLine { line: u32 },
    /// Opened at the end of line `open`, closed by the `indent}` line `close`.
    Block { open: u32, close: u32 },
}

impl Body {
    pub(crate) fn last_line(self) -> u32 {
        match self {
            Body::None { end } => end,
            Body::SingleLine { line } => line,
            Body::Block { close, .. } => close,
        }
    }
}

pub(crate) fn find_body(lines: &[String], decl: u32) -> Option<Body> {
    let indent = leading_whitespace(line(lines, decl));
    let closing = format!("{indent}}}");
    let len = u32::try_from(lines.len()).unwrap_or(u32::MAX);
    let mut index = decl;
    while index < len {
        let text = strip_line_comment(line(lines, index)).trim_end();
        if text.ends_with(';') {
            return Some(Body::None { end: index });
        }
        if let Some(brace) = text.find('{') {
            if text[brace..].trim_end().ends_with('}') && brace + 1 < text.len() {
                return Some(Body::SingleLine { line: index });
            }
            let open = index;
            let close = (open + 1..len).find(|i| line(lines, *i).trim_end() == closing)?;
            return Some(Body::Block { open, close });
        }
        index += 1;
    }
    None
}

fn strip_line_comment(text: &str) -> &str {
    match text.find("//") {
        Some(offset) => &text[..offset],
        None => text,
    }
}

/// Lines to delete when removing the member declared at `decl`, including one separating
/// blank line.
pub(crate) fn member_removal_span(lines: &[String], decl: u32) -> Option<(u32, u32)> {
    let mut start = declaration_start(lines, decl);
    let mut end = find_body(lines, decl)?.last_line();
    let blank = |index: u32| line(lines, index).trim().is_empty();
    let len = u32::try_from(lines.len()).unwrap_or(u32::MAX);
    let after_opener =
        start >= 2 && blank(start - 1) && line(lines, start - 2).trim_end().ends_with('{');
    if start > 0 && blank(start - 1) && !after_opener {
        start -= 1;
    } else if end + 1 < len && blank(end + 1) {
        end += 1;
    } else if start > 0 && blank(start - 1) {
        start -= 1;
    }
    Some((start, end))
}

/// The line closing the type declared at `decl`.
pub(crate) fn type_close_line(lines: &[String], decl: u32) -> Option<u32> {
    match find_body(lines, decl)? {
        Body::Block { close, .. } => Some(close),
        Body::SingleLine { line } => Some(line),
        Body::None { .. } => None,
    }
}

/// Splits `header {}` into `header {` and `indent}`. Returns the new lines for `decl`.
pub(crate) fn expand_single_line_body(text: &str) -> Option<(String, String)> {
    let indent = leading_whitespace(text);
    let trimmed = text.trim_end();
    let brace = trimmed.find('{')?;
    let inner = trimmed[brace + 1..].trim_end().strip_suffix('}')?;
    if !inner.trim().is_empty() {
        return None;
    }
    Some((trimmed[..=brace].to_string(), format!("{indent}}}")))
}

/// Re-indents `code` under `indent`: the common leading whitespace is removed, every non-empty
/// line is prefixed, and surrounding blank lines are dropped.
pub(crate) fn indent_lines(code: &str, indent: &str) -> Vec<String> {
    let lines: Vec<&str> = code.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return Vec::new();
    };
    let lines = &lines[first..=last];
    let common = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_whitespace(l).len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| {
            let l = l.trim_end();
            if l.is_empty() {
                String::new()
            } else {
                format!("{indent}{}", &l[common.min(leading_whitespace(l).len())..])
            }
        })
        .collect()
}

/// Byte range of the type written in front of the name at `name_offset`, after any inline
/// annotations, modifiers and type parameters.
pub(crate) fn declared_type_span(text: &str, name_offset: usize) -> Option<(usize, usize)> {
    let head = &text[..name_offset];
    let mut cursor = leading_whitespace(head).len();
    loop {
        let rest = &head[cursor..];
        let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = &rest[..word_len];
        let skip = word.starts_with('@') || Modifiers::keyword(word).is_some() || word == "default";
        if !skip || word.is_empty() {
            break;
        }
        cursor += word_len;
        cursor += head[cursor..].len() - head[cursor..].trim_start().len();
    }
    if head[cursor..].starts_with('<') {
        let mut depth = 0i32;
        for (offset, ch) in head[cursor..].char_indices() {
            match ch {
                '<' => depth += 1,
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        cursor += offset + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        cursor += head[cursor..].len() - head[cursor..].trim_start().len();
    }
    let end = head.trim_end().len();
    (cursor < end).then_some((cursor, end))
}

/// Index, within `code`, of the line holding the declaration header.
pub(crate) fn declaration_offset(code: &[String]) -> usize {
    let mut in_javadoc = false;
    for (index, text) in code.iter().enumerate() {
        let text = text.trim();
        if in_javadoc {
            if text.ends_with("*/") {
                in_javadoc = false;
            }
            continue;
        }
        if text.starts_with("/*") {
            in_javadoc = !text.ends_with("*/");
            continue;
        }
        if text.is_empty() || text.starts_with("//") || text.starts_with('@') {
            continue;
        }
        return index;
    }
    0
}

/// The declaration text from `decl` up to its body or terminating `;`, on one line.
pub(crate) fn declaration_text(lines: &[String], decl: u32) -> String {
    let mut out = String::new();
    let len = u32::try_from(lines.len()).unwrap_or(u32::MAX);
    for index in decl..len {
        let text = strip_line_comment(line(lines, index));
        let cut = text.find(['{', ';']);
        out.push(' ');
        out.push_str(cut.map_or(text, |cut| &text[..cut]));
        if cut.is_some() {
            break;
        }
    }
    normalize_whitespace(&out)
}

/// Collapses whitespace and drops it next to brackets and commas.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars: Vec<char> = collapsed.chars().collect();
    let tight = |c: Option<&char>| c.is_some_and(|c| "()<>,[]".contains(*c));
    chars
        .iter()
        .enumerate()
        .filter(|(index, ch)| {
            let before = index.checked_sub(1).and_then(|i| chars.get(i));
            **ch != ' ' || !(tight(before) || tight(chars.get(index + 1)))
        })
        .map(|(_, ch)| *ch)
        .collect()
}

/// Strips a trailing `{`, access and other modifiers from a user-supplied signature.
pub(crate) fn clean_signature(signature: &str) -> String {
    let signature = signature.trim().trim_end_matches('{').trim_end();
    let words: Vec<&str> = signature
        .split_whitespace()
        .skip_while(|word| Modifiers::keyword(word).is_some() || *word == "default")
        .collect();
    normalize_whitespace(&words.join(" "))
}

/// The identifier right before the first `(`.
pub(crate) fn name_before_paren(signature: &str) -> Option<&str> {
    let paren = signature.find('(')?;
    let head = signature[..paren].trim_end();
    let start = head
        .char_indices()
        .rev()
        .take_while(|(_, ch)| ch.is_alphanumeric() || *ch == '_' || *ch == '$')
        .last()
        .map(|(offset, _)| offset)?;
    Some(&head[start..])
}

/// Rewrites the modifiers in front of the name at byte offset `name_offset` of `text`.
///
/// Annotations written inline before the modifiers are kept, as is whatever sits between the
/// modifiers and the name (type parameters, the return or field type, `class`, `default`).
pub(crate) fn rewrite_modifiers(text: &str, name_offset: usize, modifiers: Modifiers) -> String {
    let indent = leading_whitespace(text);
    let head = &text[indent.len()..name_offset];
    let mut kept_annotations = Vec::new();
    let mut rest = Vec::new();
    let mut in_modifiers = true;
    for word in head.split_whitespace() {
        if in_modifiers && word.starts_with('@') {
            kept_annotations.push(word);
        } else if in_modifiers && Modifiers::keyword(word).is_some() {
            continue;
        } else {
            in_modifiers = false;
            rest.push(word);
        }
    }
    let mut parts: Vec<String> = kept_annotations.into_iter().map(str::to_string).collect();
    if !modifiers.is_empty() {
        parts.push(modifiers.to_string());
    }
    parts.extend(rest.into_iter().map(str::to_string));
    let mut out = String::from(indent);
    for part in parts {
        out.push_str(&part);
        out.push(' ');
    }
    out.push_str(&text[name_offset..]);
    out
}

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*import\s+(static\s+)?([\w.$*]+)\s*;\s*$").expect("valid regex")
    })
}

fn package_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*package\s+([\w.]+)\s*;").expect("valid regex"))
}

/// Merges `imports` into the file's import block, keeping it sorted.
///
/// Returns the new lines of the file, or `None` when every import was already present or
/// redundant.
pub(crate) fn merge_imports<S: AsRef<str>>(lines: &[String], imports: &[S]) -> Option<Vec<String>> {
    let package_line = lines.iter().position(|l| package_re().is_match(l));
    let package = package_line
        .and_then(|index| package_re().captures(&lines[index]))
        .map(|caps| caps[1].to_string());

    let mut regular = Vec::new();
    let mut statics = Vec::new();
    let mut import_lines = Vec::new();
    for (index, text) in lines.iter().enumerate() {
        if let Some(caps) = import_re().captures(text) {
            import_lines.push(index);
            let name = caps[2].to_string();
            if caps.get(1).is_some() {
                statics.push(name);
            } else {
                regular.push(name);
            }
        }
    }

    let mut changed = false;
    for import in imports {
        let import = import.as_ref().trim();
        let import = import.strip_prefix("import ").unwrap_or(import).trim_end_matches(';').trim();
        if import.is_empty() {
            continue;
        }
        let (target, name) = match import.strip_prefix("static ") {
            Some(name) => (&mut statics, name.trim()),
            None => (&mut regular, import),
        };
        if target.iter().any(|existing| existing == name) {
            continue;
        }
        if name
            .strip_prefix("java.lang.")
            .is_some_and(|member| !member.contains('.'))
        {
            continue;
        }
        if package
            .as_deref()
            .is_some_and(|package| quill_emit::is_same_package_member(name, package))
        {
            continue;
        }
        target.push(name.to_string());
        changed = true;
    }
    if !changed {
        return None;
    }

    let mut block: Vec<String> = organize_imports(&regular, package.as_deref())
        .into_iter()
        .map(|name| format!("import {name};"))
        .collect();
    let statics = organize_imports(&statics, None);
    if !statics.is_empty() && !block.is_empty() {
        block.push(String::new());
    }
    block.extend(statics.into_iter().map(|name| format!("import static {name};")));

    let mut out: Vec<String> = Vec::with_capacity(lines.len() + block.len() + 2);
    match (import_lines.first(), import_lines.last()) {
        (Some(&first), Some(&last)) => {
            out.extend_from_slice(&lines[..first]);
            out.extend(block);
            out.extend(
                lines[first..=last]
                    .iter()
                    .enumerate()
                    .filter(|(offset, text)| {
                        !import_lines.contains(&(first + offset)) && !text.trim().is_empty()
                    })
                    .map(|(_, text)| text.clone()),
            );
            out.extend_from_slice(&lines[last + 1..]);
        }
        _ => {
            let at = package_line.map_or(0, |index| index + 1);
            out.extend_from_slice(&lines[..at]);
            if at > 0 {
                out.push(String::new());
            }
            out.extend(block);
            let rest = &lines[at..];
            let rest = match rest.iter().position(|l| !l.trim().is_empty()) {
                Some(skip) => &rest[skip..],
                None => rest,
            };
            out.push(String::new());
            out.extend_from_slice(rest);
        }
    }
    Some(out)
}
