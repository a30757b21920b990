//! Edits shared by several handle types.
//!
//! Each function checks the handle, edits the editor and returns the line the declaration sits
//! on afterwards. None of them notify the language client; the calling handle sends one
//! `CHANGED` event once all of its edits are done.

use lsp_types::{FileChangeType, FileEvent, Position, SymbolKind};

use crate::editor::leading_whitespace;
use crate::error::{CustomizationError, Result};
use crate::handle::CodeCustomization;
use crate::library::{simple_name, LibraryCustomization};
use crate::modifiers::{DeclarationKind, Modifiers};
use crate::text_pos;
use crate::utils::{self, Body, MEMBER_INDENT};

pub(crate) fn shift(line: u32, delta: i64) -> u32 {
    u32::try_from((i64::from(line) + delta).max(0)).unwrap_or(u32::MAX)
}

fn annotation_name(annotation: &str) -> &str {
    let name = annotation.trim().trim_start_matches('@');
    name.split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or(name)
}

/// Whether `text` starts (after indentation) with the annotation `name`.
fn starts_with_annotation(text: &str, name: &str) -> bool {
    text.trim_start()
        .strip_prefix('@')
        .and_then(|rest| rest.strip_prefix(name))
        .is_some_and(|rest| {
            !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '.')
        })
}

pub(crate) fn add_annotation(
    library: &mut LibraryCustomization,
    code: &CodeCustomization,
    annotation: &str,
) -> Result<u32> {
    code.check(library.editor())?;
    let annotation = annotation.trim();
    if annotation.is_empty() || annotation == "@" {
        return Err(CustomizationError::InvalidArgument(
            "annotation must not be empty".to_string(),
        ));
    }
    let annotation = if annotation.starts_with('@') {
        annotation.to_string()
    } else {
        format!("@{annotation}")
    };

    let file = code.file_name();
    let decl = code.line();
    let lines = library.editor().file_lines(file)?;
    let start = utils::annotation_block_start(lines, decl);
    if (start..decl).any(|line| lines[line as usize].trim() == annotation) {
        return Ok(decl);
    }
    let indent = leading_whitespace(&lines[decl as usize]).to_string();
    library
        .editor_mut()
        .insert_lines(file, decl, vec![format!("{indent}{annotation}")])?;
    tracing::debug!(target = "quill.customize", file, %annotation, "added annotation");
    Ok(decl + 1)
}

pub(crate) fn remove_annotation(
    library: &mut LibraryCustomization,
    code: &CodeCustomization,
    annotation: &str,
) -> Result<u32> {
    code.check(library.editor())?;
    let name = annotation_name(annotation).to_string();
    let file = code.file_name();
    let decl = code.line();
    let lines = library.editor().file_lines(file)?;
    let start = utils::annotation_block_start(lines, decl);

    if let Some(first) =
        (start..decl).find(|line| starts_with_annotation(&lines[*line as usize], &name))
    {
        // The arguments may continue on following lines.
        let mut depth = 0i32;
        let mut last = first;
        for line in first..decl {
            let text = &lines[line as usize];
            depth += text.matches('(').count() as i32 - text.matches(')').count() as i32;
            last = line;
            if depth <= 0 {
                break;
            }
        }
        library.editor_mut().remove_lines(file, first, last)?;
        return Ok(decl - (last - first + 1));
    }

    let text = &lines[decl as usize];
    let pattern = format!(r"@{}\b(?:\s*\([^()]*\))?\s*", regex::escape(&name));
    let inline = regex::Regex::new(&pattern)
        .map_err(|err| CustomizationError::InvalidArgument(err.to_string()))?;
    if inline.is_match(text) {
        let updated = inline.replace(text, "").into_owned();
        let end = Position::new(decl, text_pos::utf16_len(text));
        library
            .editor_mut()
            .replace(file, Position::new(decl, 0), end, &updated)?;
        return Ok(decl);
    }
    Err(CustomizationError::InvalidArgument(format!(
        "annotation @{name} is not present on {}",
        code.symbol().name
    )))
}

pub(crate) fn set_modifier(
    library: &mut LibraryCustomization,
    code: &CodeCustomization,
    kind: DeclarationKind,
    modifiers: Modifiers,
) -> Result<u32> {
    code.check(library.editor())?;
    modifiers.validate(kind)?;
    let file = code.file_name();
    let decl = code.line();
    let offset = code.name_offset(library.editor())?;
    let text = library.editor().file_line(file, decl)?.to_string();
    let updated = utils::rewrite_modifiers(&text, offset, modifiers);
    if updated != text {
        let end = Position::new(decl, text_pos::utf16_len(&text));
        library
            .editor_mut()
            .replace(file, Position::new(decl, 0), end, &updated)?;
    }
    Ok(decl)
}

/// Turns a `header { ... }` line into a block spanning three or more lines.
/// A single-line body `text` laid out as a block: opener, statement if any, closing brace.
pub(crate) fn single_line_as_block(text: &str, file: &str, line: u32) -> Result<Vec<String>> {
    let indent = leading_whitespace(text);
    let Some(brace) = text.find('{') else {
        return Err(CustomizationError::IllegalState(format!(
            "no body brace on line {line} of {file}"
        )));
    };
    let close = text.rfind('}').unwrap_or(text.len());
    let inner = text[brace + 1..close.max(brace + 1)].trim();
    let mut block = vec![text[..=brace].trim_end().to_string()];
    if !inner.is_empty() {
        block.push(format!("{indent}{MEMBER_INDENT}{inner}"));
    }
    block.push(format!("{indent}}}"));
    Ok(block)
}

fn expand_single_line(
    library: &mut LibraryCustomization,
    file: &str,
    line: u32,
) -> Result<(u32, u32)> {
    let text = library.editor().file_line(file, line)?.to_string();
    let replacement = single_line_as_block(&text, file, line)?;
    let count = replacement.len() as u32;
    let editor = library.editor_mut();
    editor.remove_lines(file, line, line)?;
    editor.insert_lines(file, line, replacement)?;
    Ok((line, line + count - 1))
}

/// The block body of the declaration at `decl`, expanding a single-line body first.
pub(crate) fn block_body(
    library: &mut LibraryCustomization,
    file: &str,
    decl: u32,
    what: &str,
) -> Result<(u32, u32)> {
    let body = utils::find_body(library.editor().file_lines(file)?, decl);
    match body {
        Some(Body::Block { open, close }) => Ok((open, close)),
        Some(Body::SingleLine { line }) => expand_single_line(library, file, line),
        Some(Body::None { .. }) | None => Err(CustomizationError::IllegalState(format!(
            "{what} has no body"
        ))),
    }
}

pub(crate) fn replace_body(
    library: &mut LibraryCustomization,
    code: &CodeCustomization,
    body: &str,
) -> Result<u32> {
    code.check(library.editor())?;
    let file = code.file_name();
    let decl = code.line();
    let (open, close) = block_body(library, file, decl, &code.symbol().name)?;
    let indent = format!(
        "{}{MEMBER_INDENT}",
        leading_whitespace(library.editor().file_line(file, decl)?)
    );
    let lines = utils::indent_lines(body, &indent);
    let editor = library.editor_mut();
    if close > open + 1 {
        editor.remove_lines(file, open + 1, close - 1)?;
    }
    editor.insert_lines(file, open + 1, lines)?;
    tracing::debug!(
        target = "quill.customize",
        file,
        symbol = %code.symbol().name,
        "replaced body"
    );
    Ok(decl)
}

pub(crate) fn replace_parameters(
    library: &mut LibraryCustomization,
    code: &CodeCustomization,
    parameters: &str,
) -> Result<u32> {
    code.check(library.editor())?;
    let file = code.file_name();
    let decl = code.line();
    let offset = code.name_offset(library.editor())?;
    let lines = library.editor().file_lines(file)?;

    let first = &lines[decl as usize];
    let open = first[offset..]
        .find('(')
        .map(|paren| offset + paren)
        .ok_or_else(|| {
            CustomizationError::IllegalState(format!(
                "no parameter list found for {}",
                code.symbol().name
            ))
        })?;

    let mut depth = 0i32;
    let mut close = None;
    'lines: for (index, text) in lines.iter().enumerate().skip(decl as usize) {
        let from = if index == decl as usize { open } else { 0 };
        for (column, ch) in text[from..].char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some((index as u32, from + column));
                        break 'lines;
                    }
                }
                _ => {}
            }
        }
    }
    let (close_line, close_offset) = close.ok_or_else(|| {
        CustomizationError::IllegalState(format!(
            "unbalanced parameter list for {}",
            code.symbol().name
        ))
    })?;

    let start_character = text_pos::utf16_column(first, open + 1).unwrap_or_default();
    let end_character =
        text_pos::utf16_column(&lines[close_line as usize], close_offset).unwrap_or_default();
    library.editor_mut().replace(
        file,
        Position::new(decl, start_character),
        Position::new(close_line, end_character),
        parameters.trim(),
    )?;
    Ok(decl)
}

/// Merges `imports` into `file`. Returns how many lines the file grew by.
pub(crate) fn add_imports<S: AsRef<str>>(
    library: &mut LibraryCustomization,
    file: &str,
    imports: &[S],
) -> Result<i64> {
    if imports.is_empty() {
        return Ok(0);
    }
    let lines = library.editor().file_lines(file)?;
    let Some(updated) = utils::merge_imports(lines, imports) else {
        return Ok(0);
    };
    let delta = updated.len() as i64 - lines.len() as i64;
    library
        .editor_mut()
        .replace_file(file.to_string(), &updated.join("\n"));
    tracing::debug!(target = "quill.customize", file, added = imports.len(), "merged imports");
    Ok(delta)
}

/// Deletes the declaration with its Javadoc, annotations and one separating blank line.
pub(crate) fn remove_declaration(
    library: &mut LibraryCustomization,
    code: &CodeCustomization,
) -> Result<()> {
    code.check(library.editor())?;
    let file = code.file_name();
    let lines = library.editor().file_lines(file)?;
    let (start, end) = utils::member_removal_span(lines, code.line()).ok_or_else(|| {
        CustomizationError::IllegalState(format!(
            "could not find the end of {} in {file}",
            code.symbol().name
        ))
    })?;
    library.editor_mut().remove_lines(file, start, end)?;
    tracing::debug!(
        target = "quill.customize",
        file,
        symbol = %code.symbol().name,
        start,
        end,
        "removed declaration"
    );
    Ok(())
}

/// Asks the language client to rename the symbol and applies the edits without notifying.
/// Returns the changed files.
pub(crate) fn rename_edits(
    library: &mut LibraryCustomization,
    code: &CodeCustomization,
    new_name: &str,
) -> Result<Vec<String>> {
    code.check(library.editor())?;
    let symbol = code.symbol();
    let rename_error = |reason: String| CustomizationError::Rename {
        symbol: symbol.name.clone(),
        new_name: new_name.to_string(),
        reason,
    };
    let edit = library
        .client()
        .rename_symbol(code.file_uri(), symbol.location.range.start, new_name)
        .map_err(|err| rename_error(err.to_string()))?;
    if edit.changes.as_ref().map_or(true, |changes| changes.is_empty())
        && edit.document_changes.is_none()
    {
        return Err(rename_error(
            "the language client produced no edits".to_string(),
        ));
    }
    let changed = library.apply_workspace_edit(&edit)?;
    tracing::debug!(
        target = "quill.customize",
        symbol = %symbol.name,
        new_name,
        files = changed.len(),
        "renamed symbol"
    );
    Ok(changed)
}

/// [`rename_edits`] followed by a `CHANGED` notification for every touched file.
pub(crate) fn rename_symbol(
    library: &mut LibraryCustomization,
    code: &CodeCustomization,
    new_name: &str,
) -> Result<()> {
    let changed = rename_edits(library, code, new_name)?;
    library.notify_changed(&changed)
}

/// Renames a field, then every method of `class_name` whose name `accessor` maps to a new name.
///
/// Accessors are found before the field is renamed and re-resolved by line afterwards; renames
/// never move declarations between lines. Returns the field's line.
pub(crate) fn rename_with_accessors(
    library: &mut LibraryCustomization,
    field: &CodeCustomization,
    class_name: &str,
    new_name: &str,
    accessor: impl Fn(&str) -> Option<String>,
) -> Result<u32> {
    field.check(library.editor())?;
    let accessors: Vec<(u32, String)> = library
        .document_symbols(field.file_uri())?
        .into_iter()
        .filter(|symbol| {
            symbol.kind == SymbolKind::METHOD
                && symbol.container_name.as_deref() == Some(class_name)
        })
        .filter_map(|symbol| {
            let renamed = accessor(simple_name(&symbol))?;
            (renamed != simple_name(&symbol)).then_some((symbol.location.range.start.line, renamed))
        })
        .collect();

    rename_symbol(library, field, new_name)?;
    for (line, renamed) in accessors {
        let symbol =
            library.symbol_at_line(field.file_uri(), class_name, &[SymbolKind::METHOD], line)?;
        let method = CodeCustomization::resolve(library.editor(), symbol)?;
        rename_symbol(library, &method, &renamed)?;
    }
    Ok(field.line())
}

/// Events for a file that moved from `old` to `new`.
pub(crate) fn move_events(
    library: &LibraryCustomization,
    old: &str,
    new: &str,
) -> Result<Vec<FileEvent>> {
    let editor = library.editor();
    Ok(vec![
        FileEvent::new(editor.uri_for(old)?, FileChangeType::DELETED),
        FileEvent::new(editor.uri_for(new)?, FileChangeType::CREATED),
    ])
}
