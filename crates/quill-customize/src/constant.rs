use heck::{ToLowerCamelCase, ToUpperCamelCase};
use lsp_types::{SymbolInformation, SymbolKind};

use crate::class::ClassCustomization;
use crate::error::Result;
use crate::handle::CodeCustomization;
use crate::javadoc::JavadocCustomization;
use crate::library::LibraryCustomization;
use crate::modifiers::{DeclarationKind, Modifiers};
use crate::ops;

/// A `static final` field of a class in the library.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantCustomization {
    code: CodeCustomization,
    package_name: String,
    class_name: String,
    constant_name: String,
}

impl ConstantCustomization {
    pub(crate) fn resolve(
        library: &LibraryCustomization,
        package_name: &str,
        class_name: &str,
        symbol: SymbolInformation,
    ) -> Result<Self> {
        let constant_name = symbol.name.clone();
        Ok(Self {
            code: CodeCustomization::resolve(library.editor(), symbol)?,
            package_name: package_name.to_string(),
            class_name: class_name.to_string(),
            constant_name,
        })
    }

    pub fn code(&self) -> &CodeCustomization {
        &self.code
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn constant_name(&self) -> &str {
        &self.constant_name
    }

    fn at_line(&self, library: &LibraryCustomization, line: u32) -> Result<Self> {
        let symbol = library.symbol_at_line(
            self.code.file_uri(),
            &self.class_name,
            &[SymbolKind::CONSTANT],
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

    /// Renames the constant and the methods derived from it: renaming `MAX_SIZE` to
    /// `MAX_LENGTH` turns `getMaxSize` into `getMaxLength` and `maxSize()` into `maxLength()`.
    pub fn rename(&self, library: &mut LibraryCustomization, new_name: &str) -> Result<Self> {
        let old_upper = self.constant_name.to_upper_camel_case();
        let old_lower = self.constant_name.to_lower_camel_case();
        let new_upper = new_name.to_upper_camel_case();
        let new_lower = new_name.to_lower_camel_case();
        let accessor = |method: &str| {
            if method == old_lower {
                Some(new_lower.clone())
            } else if method.contains(&old_upper) {
                Some(method.replace(&old_upper, &new_upper))
            } else {
                None
            }
        };
        let line =
            ops::rename_with_accessors(library, &self.code, &self.class_name, new_name, accessor)?;
        self.at_line(library, line)
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

    /// Replaces the constant's modifiers. `static final` is always kept.
    pub fn set_modifier(
        &self,
        library: &mut LibraryCustomization,
        modifiers: Modifiers,
    ) -> Result<Self> {
        let modifiers = modifiers | Modifiers::STATIC | Modifiers::FINAL;
        let line = ops::set_modifier(library, &self.code, DeclarationKind::Field, modifiers)?;
        self.changed(library, line)
    }
}
