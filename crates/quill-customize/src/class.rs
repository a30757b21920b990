use lsp_types::{SymbolInformation, SymbolKind};

use crate::constant::ConstantCustomization;
use crate::constructor::ConstructorCustomization;
use crate::editor::leading_whitespace;
use crate::error::{CustomizationError, Result};
use crate::handle::CodeCustomization;
use crate::javadoc::JavadocCustomization;
use crate::library::{simple_name, LibraryCustomization};
use crate::method::MethodCustomization;
use crate::modifiers::{DeclarationKind, Modifiers};
use crate::ops;
use crate::property::PropertyCustomization;
use crate::utils::{self, Body, MEMBER_INDENT};

/// Where a new member goes inside the class body.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    /// Right after the opening brace.
    Start,
    /// Right before the closing brace.
    End,
    /// After the line with this index.
    After(u32),
}

/// A top-level type of the library.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassCustomization {
    code: CodeCustomization,
    package_name: String,
    class_name: String,
}

impl ClassCustomization {
    pub(crate) fn resolve(
        library: &LibraryCustomization,
        package_name: &str,
        class_name: &str,
        symbol: SymbolInformation,
    ) -> Result<Self> {
        Ok(Self {
            code: CodeCustomization::resolve(library.editor(), symbol)?,
            package_name: package_name.to_string(),
            class_name: class_name.to_string(),
        })
    }

    pub fn code(&self) -> &CodeCustomization {
        &self.code
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    fn refresh(&self, library: &LibraryCustomization) -> Result<Self> {
        library.get_class(&self.package_name, &self.class_name)
    }

    /// Symbols declared directly in this class.
    fn members(&self, library: &LibraryCustomization) -> Result<Vec<SymbolInformation>> {
        Ok(library
            .document_symbols(self.code.file_uri())?
            .into_iter()
            .filter(|symbol| symbol.container_name.as_deref() == Some(self.class_name.as_str()))
            .collect())
    }

    /// Finds a method or constructor by bare name or by signature.
    fn find_callable(
        &self,
        library: &LibraryCustomization,
        kind: SymbolKind,
        query: &str,
    ) -> Result<SymbolInformation> {
        self.code.check(library.editor())?;
        let signature = utils::clean_signature(query);
        let has_signature = signature.contains('(');
        let name = if has_signature {
            utils::name_before_paren(&signature).ok_or_else(|| {
                CustomizationError::InvalidArgument(format!("{query:?} is not a method signature"))
            })?
        } else {
            signature.as_str()
        };

        let lines = library.editor().file_lines(self.code.file_name())?;
        let mut matches: Vec<SymbolInformation> = self
            .members(library)?
            .into_iter()
            .filter(|symbol| symbol.kind == kind && simple_name(symbol) == name)
            .filter(|symbol| {
                !has_signature
                    || utils::normalize_whitespace(&symbol.name) == signature
                    || utils::declaration_text(lines, symbol.location.range.start.line)
                        .contains(&signature)
            })
            .collect();

        if matches.len() > 1 {
            return Err(CustomizationError::IllegalState(format!(
                "{} overloads of {name} in class {} match {query:?}; pass a full signature",
                matches.len(),
                self.class_name
            )));
        }
        matches.pop().ok_or_else(|| {
            let what = if kind == SymbolKind::CONSTRUCTOR { "Constructor" } else { "Method" };
            CustomizationError::InvalidArgument(format!(
                "{what} {query:?} does not exist in class {}",
                self.class_name
            ))
        })
    }

    fn find_field(
        &self,
        library: &LibraryCustomization,
        kind: SymbolKind,
        name: &str,
    ) -> Result<SymbolInformation> {
        self.code.check(library.editor())?;
        self.members(library)?
            .into_iter()
            .find(|symbol| symbol.kind == kind && symbol.name == name)
            .ok_or_else(|| {
                let what = if kind == SymbolKind::CONSTANT { "Constant" } else { "Property" };
                CustomizationError::InvalidArgument(format!(
                    "{what} {name} does not exist in class {}",
                    self.class_name
                ))
            })
    }

    pub fn get_method(
        &self,
        library: &LibraryCustomization,
        method: &str,
    ) -> Result<MethodCustomization> {
        let symbol = self.find_callable(library, SymbolKind::METHOD, method)?;
        MethodCustomization::resolve(library, &self.package_name, &self.class_name, symbol)
    }

    pub fn get_constructor(
        &self,
        library: &LibraryCustomization,
        constructor: &str,
    ) -> Result<ConstructorCustomization> {
        let symbol = self.find_callable(library, SymbolKind::CONSTRUCTOR, constructor)?;
        ConstructorCustomization::resolve(library, &self.package_name, &self.class_name, symbol)
    }

    pub fn get_property(
        &self,
        library: &LibraryCustomization,
        property: &str,
    ) -> Result<PropertyCustomization> {
        let symbol = self.find_field(library, SymbolKind::FIELD, property)?;
        PropertyCustomization::resolve(library, &self.package_name, &self.class_name, symbol)
    }

    pub fn get_constant(
        &self,
        library: &LibraryCustomization,
        constant: &str,
    ) -> Result<ConstantCustomization> {
        let symbol = self.find_field(library, SymbolKind::CONSTANT, constant)?;
        ConstantCustomization::resolve(library, &self.package_name, &self.class_name, symbol)
    }

    pub fn get_javadoc(&self, library: &LibraryCustomization) -> Result<JavadocCustomization> {
        JavadocCustomization::resolve(library.editor(), self.code.clone())
    }

    /// Adds imports to the class's file.
    pub fn add_imports<S: AsRef<str>>(
        &self,
        library: &mut LibraryCustomization,
        imports: &[S],
    ) -> Result<Self> {
        self.code.check(library.editor())?;
        if ops::add_imports(library, self.code.file_name(), imports)? != 0 {
            library.notify_changed(&[self.code.file_name()])?;
        }
        self.refresh(library)
    }

    /// Last line of the last member of one of `kinds`, if any.
    fn last_member_end(
        &self,
        library: &LibraryCustomization,
        kinds: &[SymbolKind],
    ) -> Result<Option<u32>> {
        let lines = library.editor().file_lines(self.code.file_name())?;
        Ok(self
            .members(library)?
            .iter()
            .filter(|symbol| kinds.contains(&symbol.kind))
            .filter_map(|symbol| {
                utils::find_body(lines, symbol.location.range.start.line).map(Body::last_line)
            })
            .max())
    }

    /// Inserts `code` as a new member and returns the line of its declaration header.
    fn insert_member(
        &self,
        library: &mut LibraryCustomization,
        anchor: Anchor,
        code: &str,
    ) -> Result<u32> {
        let file = self.code.file_name();
        let decl = self.code.line();
        let lines = library.editor().file_lines(file)?;
        let class_indent = leading_whitespace(&lines[decl as usize]).to_string();
        let member_indent = format!("{class_indent}{MEMBER_INDENT}");
        let new_lines = utils::indent_lines(code, &member_indent);
        if new_lines.is_empty() {
            return Err(CustomizationError::InvalidArgument(
                "code to add must not be empty".to_string(),
            ));
        }

        let (open, close) = match utils::find_body(lines, decl) {
            Some(Body::Block { open, close }) => (open, close),
            Some(Body::SingleLine { line }) => {
                let (header, closing) = utils::expand_single_line_body(&lines[line as usize])
                    .ok_or_else(|| {
                        CustomizationError::IllegalState(format!(
                            "cannot expand the body of {}",
                            self.class_name
                        ))
                    })?;
                let editor = library.editor_mut();
                editor.remove_lines(file, line, line)?;
                editor.insert_lines(file, line, vec![header, closing])?;
                (line, line + 1)
            }
            _ => {
                return Err(CustomizationError::IllegalState(format!(
                    "{} has no body",
                    self.class_name
                )))
            }
        };

        let at = match anchor {
            Anchor::Start => open + 1,
            Anchor::End => close,
            Anchor::After(line) => line + 1,
        };
        let lines = library.editor().file_lines(file)?;
        let previous = lines[at as usize - 1].trim_end();
        let blank_before = !previous.trim().is_empty() && !previous.ends_with('{');
        let next = lines.get(at as usize).map_or("", |line| line.trim());
        let blank_after = !next.is_empty() && next != "}";

        let header = at + u32::from(blank_before) + utils::declaration_offset(&new_lines) as u32;
        let mut block = Vec::with_capacity(new_lines.len() + 2);
        if blank_before {
            block.push(String::new());
        }
        block.extend(new_lines);
        if blank_after {
            block.push(String::new());
        }
        library.editor_mut().insert_lines(file, at, block)?;
        Ok(header)
    }

    /// Adds imports after an insertion and notifies the client. Returns the shifted `line`.
    fn finish_insert<S: AsRef<str>>(
        &self,
        library: &mut LibraryCustomization,
        line: u32,
        imports: &[S],
    ) -> Result<u32> {
        let file = self.code.file_name();
        let delta = ops::add_imports(library, file, imports)?;
        library.notify_changed(&[file])?;
        Ok(ops::shift(line, delta))
    }

    /// Appends a method to the end of the class body.
    pub fn add_method<S: AsRef<str>>(
        &self,
        library: &mut LibraryCustomization,
        code: &str,
        imports: &[S],
    ) -> Result<MethodCustomization> {
        self.code.check(library.editor())?;
        let header = self.insert_member(library, Anchor::End, code)?;
        let header = self.finish_insert(library, header, imports)?;
        let symbol = library.symbol_at_line(
            self.code.file_uri(),
            &self.class_name,
            &[SymbolKind::METHOD],
            header,
        )?;
        tracing::debug!(
            target = "quill.customize",
            class = %self.class_name,
            method = %symbol.name,
            "added method"
        );
        MethodCustomization::resolve(library, &self.package_name, &self.class_name, symbol)
    }

    /// Adds a constructor after the last constructor, else after the fields.
    pub fn add_constructor<S: AsRef<str>>(
        &self,
        library: &mut LibraryCustomization,
        code: &str,
        imports: &[S],
    ) -> Result<ConstructorCustomization> {
        self.code.check(library.editor())?;
        let anchor = match self.last_member_end(library, &[SymbolKind::CONSTRUCTOR])? {
            Some(line) => Anchor::After(line),
            None => self.after_fields(library)?,
        };
        let header = self.insert_member(library, anchor, code)?;
        let header = self.finish_insert(library, header, imports)?;
        let symbol = library.symbol_at_line(
            self.code.file_uri(),
            &self.class_name,
            &[SymbolKind::CONSTRUCTOR],
            header,
        )?;
        tracing::debug!(
            target = "quill.customize",
            class = %self.class_name,
            constructor = %symbol.name,
            "added constructor"
        );
        ConstructorCustomization::resolve(library, &self.package_name, &self.class_name, symbol)
    }

    fn after_fields(&self, library: &LibraryCustomization) -> Result<Anchor> {
        Ok(self
            .last_member_end(library, &[SymbolKind::FIELD, SymbolKind::CONSTANT])?
            .map_or(Anchor::Start, Anchor::After))
    }

    /// Adds `code` to the class's static initializer, creating one after the fields if needed.
    pub fn add_static_block<S: AsRef<str>>(
        &self,
        library: &mut LibraryCustomization,
        code: &str,
        imports: &[S],
    ) -> Result<Self> {
        self.code.check(library.editor())?;
        let file = self.code.file_name();
        let lines = library.editor().file_lines(file)?;
        let member_indent = format!(
            "{}{MEMBER_INDENT}",
            leading_whitespace(&lines[self.code.line() as usize])
        );
        let opener = format!("{member_indent}static {{");
        let closing = format!("{member_indent}}}");
        let existing = utils::find_body(lines, self.code.line()).and_then(|body| match body {
            Body::Block { open, close } => (open + 1..close)
                .find(|line| lines[*line as usize].trim_end() == opener)
                .and_then(|start| {
                    (start + 1..close).find(|line| lines[*line as usize].trim_end() == closing)
                }),
            _ => None,
        });

        match existing {
            Some(close) => {
                let statements =
                    utils::indent_lines(code, &format!("{member_indent}{MEMBER_INDENT}"));
                if statements.is_empty() {
                    return Err(CustomizationError::InvalidArgument(
                        "code to add must not be empty".to_string(),
                    ));
                }
                library.editor_mut().insert_lines(file, close, statements)?;
            }
            None => {
                let block = format!(
                    "static {{\n{}\n}}",
                    utils::indent_lines(code, MEMBER_INDENT).join("\n")
                );
                let anchor = self.after_fields(library)?;
                self.insert_member(library, anchor, &block)?;
            }
        }
        self.finish_insert(library, 0, imports)?;
        tracing::debug!(
            target = "quill.customize",
            class = %self.class_name,
            "added static block code"
        );
        self.refresh(library)
    }

    /// Removes a method with its Javadoc and annotations.
    pub fn remove_method(&self, library: &mut LibraryCustomization, method: &str) -> Result<Self> {
        let method = self.get_method(library, method)?;
        ops::remove_declaration(library, method.code())?;
        library.notify_changed(&[self.code.file_name()])?;
        self.refresh(library)
    }

    /// Renames the class and every reference to it. A top-level class also moves to
    /// `NewName.java`, which must not exist yet.
    pub fn rename(&self, library: &mut LibraryCustomization, new_name: &str) -> Result<Self> {
        self.code.check(library.editor())?;
        let old_file = self.code.file_name().to_string();
        let moved = old_file
            .rsplit_once('/')
            .map_or(old_file.as_str(), |(_, name)| name)
            == format!("{}.java", self.class_name);
        let new_file = match old_file.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/{new_name}.java"),
            None => format!("{new_name}.java"),
        };
        if moved && library.editor().contains(&new_file) {
            return Err(CustomizationError::Rename {
                symbol: self.class_name.clone(),
                new_name: new_name.to_string(),
                reason: format!("{new_file} already exists"),
            });
        }

        let changed = ops::rename_edits(library, &self.code, new_name)?;
        let mut events = Vec::with_capacity(changed.len() + 1);
        for file in changed.iter().filter(|file| !moved || **file != old_file) {
            events.push(lsp_types::FileEvent::new(
                library.editor().uri_for(file)?,
                lsp_types::FileChangeType::CHANGED,
            ));
        }
        if moved {
            library.editor_mut().rename_file(&old_file, &new_file)?;
            events.extend(ops::move_events(library, &old_file, &new_file)?);
        }
        library.notify(events)?;
        tracing::debug!(
            target = "quill.customize",
            class = %self.class_name,
            new_name,
            file = %new_file,
            "renamed class"
        );
        library.get_class(&self.package_name, new_name)
    }

    pub fn add_annotation(
        &self,
        library: &mut LibraryCustomization,
        annotation: &str,
    ) -> Result<Self> {
        ops::add_annotation(library, &self.code, annotation)?;
        library.notify_changed(&[self.code.file_name()])?;
        self.refresh(library)
    }

    pub fn remove_annotation(
        &self,
        library: &mut LibraryCustomization,
        annotation: &str,
    ) -> Result<Self> {
        ops::remove_annotation(library, &self.code, annotation)?;
        library.notify_changed(&[self.code.file_name()])?;
        self.refresh(library)
    }

    /// Replaces the class's modifiers. Pass [`Modifiers::NONE`] to remove them all.
    pub fn set_modifier(
        &self,
        library: &mut LibraryCustomization,
        modifiers: Modifiers,
    ) -> Result<Self> {
        let kind = if self.code.symbol().kind == SymbolKind::INTERFACE {
            DeclarationKind::Interface
        } else {
            DeclarationKind::Class
        };
        ops::set_modifier(library, &self.code, kind, modifiers)?;
        library.notify_changed(&[self.code.file_name()])?;
        self.refresh(library)
    }
}
