use lsp_types::{SymbolInformation, SymbolKind};

use crate::class::ClassCustomization;
use crate::editor::leading_whitespace;
use crate::error::{CustomizationError, Result};
use crate::handle::CodeCustomization;
use crate::javadoc::JavadocCustomization;
use crate::library::{simple_name, LibraryCustomization};
use crate::modifiers::{DeclarationKind, Modifiers};
use crate::ops;
use crate::utils::{self, Body, MEMBER_INDENT};

/// A method of a class in the library.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCustomization {
    code: CodeCustomization,
    package_name: String,
    class_name: String,
    method_name: String,
}

impl MethodCustomization {
    pub(crate) fn resolve(
        library: &LibraryCustomization,
        package_name: &str,
        class_name: &str,
        symbol: SymbolInformation,
    ) -> Result<Self> {
        let method_name = simple_name(&symbol).to_string();
        Ok(Self {
            code: CodeCustomization::resolve(library.editor(), symbol)?,
            package_name: package_name.to_string(),
            class_name: class_name.to_string(),
            method_name,
        })
    }

    pub fn code(&self) -> &CodeCustomization {
        &self.code
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// The method declared on `line` of this handle's file, after an edit.
    fn at_line(&self, library: &LibraryCustomization, line: u32) -> Result<Self> {
        let symbol = library.symbol_at_line(
            self.code.file_uri(),
            &self.class_name,
            &[SymbolKind::METHOD],
            line,
        )?;
        Self::resolve(library, &self.package_name, &self.class_name, symbol)
    }

    fn changed(&self, library: &mut LibraryCustomization, line: u32) -> Result<Self> {
        library.notify_changed(&[self.code.file_name()])?;
        self.at_line(library, line)
    }

    pub fn get_class(&self, library: &LibraryCustomization) -> Result<ClassCustomization> {
        library.get_class(&self.package_name, &self.class_name)
    }

    pub fn get_javadoc(&self, library: &LibraryCustomization) -> Result<JavadocCustomization> {
        JavadocCustomization::resolve(library.editor(), self.code.clone())
    }

    /// Renames this method and its call sites. Overloads keep their name.
    pub fn rename(&self, library: &mut LibraryCustomization, new_name: &str) -> Result<Self> {
        ops::rename_symbol(library, &self.code, new_name)?;
        self.at_line(library, self.code.line())
    }

    pub fn add_annotation(
        &self,
        library: &mut LibraryCustomization,
        annotation: &str,
    ) -> Result<Self> {
        let line = ops::add_annotation(library, &self.code, annotation)?;
        self.changed(library, line)
    }

    pub fn remove_annotation(
        &self,
        library: &mut LibraryCustomization,
        annotation: &str,
    ) -> Result<Self> {
        let line = ops::remove_annotation(library, &self.code, annotation)?;
        self.changed(library, line)
    }

    /// Replaces the method's modifiers. Pass [`Modifiers::NONE`] to remove them all.
    pub fn set_modifier(
        &self,
        library: &mut LibraryCustomization,
        modifiers: Modifiers,
    ) -> Result<Self> {
        let line = ops::set_modifier(library, &self.code, DeclarationKind::Method, modifiers)?;
        self.changed(library, line)
    }

    /// Replaces everything between the parameter list's parentheses.
    pub fn replace_parameters<S: AsRef<str>>(
        &self,
        library: &mut LibraryCustomization,
        parameters: &str,
        imports: &[S],
    ) -> Result<Self> {
        let line = ops::replace_parameters(library, &self.code, parameters)?;
        let delta = ops::add_imports(library, self.code.file_name(), imports)?;
        self.changed(library, ops::shift(line, delta))
    }

    /// Replaces the statements of the body. `body` is re-indented under the method.
    pub fn replace_body<S: AsRef<str>>(
        &self,
        library: &mut LibraryCustomization,
        body: &str,
        imports: &[S],
    ) -> Result<Self> {
        let line = ops::replace_body(library, &self.code, body)?;
        let delta = ops::add_imports(library, self.code.file_name(), imports)?;
        self.changed(library, ops::shift(line, delta))
    }

    /// Changes the return type and adapts the last `return` statement.
    ///
    /// * new type `void`: the last return statement is removed and `formatter` is ignored.
    /// * old type `void`, or no return statement: `return <formatter>;` is appended to the body.
    /// * otherwise the old value is kept in a `returnValue` local and `return <formatter>;`
    ///   follows it, with the first `%s` in `formatter` replaced by `returnValue`.
    pub fn set_return_type(
        &self,
        library: &mut LibraryCustomization,
        new_type: &str,
        formatter: &str,
    ) -> Result<Self> {
        self.code.check(library.editor())?;
        let new_type = new_type.trim();
        if new_type.is_empty() {
            return Err(CustomizationError::InvalidArgument(
                "return type must not be empty".to_string(),
            ));
        }
        let file = self.code.file_name();
        let decl = self.code.line();
        let offset = self.code.name_offset(library.editor())?;
        let text = library.editor().file_line(file, decl)?.to_string();
        let (start, end) = utils::declared_type_span(&text, offset).ok_or_else(|| {
            CustomizationError::IllegalState(format!(
                "cannot find the return type of {}",
                self.code.symbol().name
            ))
        })?;
        let old_type = text[start..end].to_string();

        let mut lines = library.editor().file_lines(file)?.to_vec();
        lines[decl as usize] = format!("{}{new_type}{}", &text[..start], &text[end..]);
        match utils::find_body(&lines, decl) {
            Some(Body::Block { open, close }) => {
                self.rewrite_return(&mut lines, (open, close), &old_type, new_type, formatter);
            }
            Some(Body::SingleLine { line }) => {
                let block = ops::single_line_as_block(&lines[line as usize], file, line)?;
                let close = line + block.len() as u32 - 1;
                lines.splice(line as usize..=line as usize, block);
                self.rewrite_return(&mut lines, (line, close), &old_type, new_type, formatter);
            }
            Some(Body::None { .. }) | None => {}
        }
        library.editor_mut().replace_file(file, &lines.join("\n"));

        tracing::debug!(
            target = "quill.customize",
            method = %self.code.symbol().name,
            old_type = %old_type,
            new_type,
            "changed return type"
        );
        self.changed(library, decl)
    }

    /// Rewrites the last `return` of the block `open..=close` in `lines` for a new return type.
    fn rewrite_return(
        &self,
        lines: &mut Vec<String>,
        (open, close): (u32, u32),
        old_type: &str,
        new_type: &str,
        formatter: &str,
    ) {
        let indent = format!(
            "{}{MEMBER_INDENT}",
            leading_whitespace(&lines[self.code.line() as usize])
        );
        let return_line = (open + 1..close).rev().find(|line| {
            let text = lines[*line as usize].trim_start();
            text.starts_with("return ") || text.starts_with("return;")
        });
        let statement_end = |lines: &[String], from: u32| -> u32 {
            (from..close)
                .find(|line| lines[*line as usize].trim_end().ends_with(';'))
                .unwrap_or(from)
        };

        match return_line {
            Some(line) if new_type == "void" => {
                let end = statement_end(&lines[..], line);
                lines.drain(line as usize..=end as usize);
            }
            Some(line) if old_type != "void" => {
                let end = statement_end(&lines[..], line);
                let value = formatter.replacen("%s", "returnValue", 1);
                lines.insert(end as usize + 1, format!("{indent}return {value};"));
                let assigned = format!("{old_type} returnValue = ");
                lines[line as usize] = lines[line as usize].replacen("return ", &assigned, 1);
            }
            _ if new_type == "void" => {}
            Some(line) if lines[line as usize].trim() == "return;" => {
                lines[line as usize] = format!("{indent}return {formatter};");
            }
            _ => {
                lines.insert(close as usize, format!("{indent}return {formatter};"));
            }
        }
    }
}
