use lsp_types::{SymbolInformation, SymbolKind};

use crate::class::ClassCustomization;
use crate::error::Result;
use crate::handle::CodeCustomization;
use crate::javadoc::JavadocCustomization;
use crate::library::LibraryCustomization;
use crate::modifiers::{DeclarationKind, Modifiers};
use crate::ops;

/// A constructor of a class in the library.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorCustomization {
    code: CodeCustomization,
    package_name: String,
    class_name: String,
}

impl ConstructorCustomization {
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

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    fn changed(&self, library: &mut LibraryCustomization, line: u32) -> Result<Self> {
        library.notify_changed(&[self.code.file_name()])?;
        let symbol = library.symbol_at_line(
            self.code.file_uri(),
            &self.class_name,
            &[SymbolKind::CONSTRUCTOR],
            line,
        )?;
        Self::resolve(library, &self.package_name, &self.class_name, symbol)
    }

    pub fn get_class(&self, library: &LibraryCustomization) -> Result<ClassCustomization> {
        library.get_class(&self.package_name, &self.class_name)
    }

    pub fn get_javadoc(&self, library: &LibraryCustomization) -> Result<JavadocCustomization> {
        JavadocCustomization::resolve(library.editor(), self.code.clone())
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

    /// Replaces the access modifier. Constructors accept only `public`, `protected`, `private`
    /// or none.
    pub fn set_modifier(
        &self,
        library: &mut LibraryCustomization,
        modifiers: Modifiers,
    ) -> Result<Self> {
        let line = ops::set_modifier(library, &self.code, DeclarationKind::Constructor, modifiers)?;
        self.changed(library, line)
    }

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
}
