use lsp_types::{SymbolInformation, SymbolKind};
use quill_emit::{JavaFileContents, Visibility};

use crate::class::ClassCustomization;
use crate::error::{CustomizationError, Result};
use crate::handle::CodeCustomization;
use crate::javadoc::JavadocCustomization;
use crate::library::{simple_name, LibraryCustomization};
use crate::modifiers::{DeclarationKind, Modifiers};
use crate::ops;
use crate::utils;

/// `name` with its first character upper-cased, as used in bean accessor names.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// An instance field of a class in the library.
///
/// Constant (`static final`) fields are handled by
/// [`ConstantCustomization`](crate::ConstantCustomization).
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCustomization {
    code: CodeCustomization,
    package_name: String,
    class_name: String,
    property_name: String,
}

impl PropertyCustomization {
    pub(crate) fn resolve(
        library: &LibraryCustomization,
        package_name: &str,
        class_name: &str,
        symbol: SymbolInformation,
    ) -> Result<Self> {
        let property_name = symbol.name.clone();
        Ok(Self {
            code: CodeCustomization::resolve(library.editor(), symbol)?,
            package_name: package_name.to_string(),
            class_name: class_name.to_string(),
            property_name,
        })
    }

    pub fn code(&self) -> &CodeCustomization {
        &self.code
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    fn at_line(&self, library: &LibraryCustomization, line: u32) -> Result<Self> {
        let symbol = library.symbol_at_line(
            self.code.file_uri(),
            &self.class_name,
            &[SymbolKind::FIELD],
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

    /// Renames the field and its references, then the accessors named after it:
    /// `getName` becomes `getTitle` and a fluent `name(...)` becomes `title(...)`.
    pub fn rename(&self, library: &mut LibraryCustomization, new_name: &str) -> Result<Self> {
        let old_name = self.property_name.clone();
        let old_pascal = capitalize(&old_name);
        let new_pascal = capitalize(new_name);
        let accessor = |method: &str| {
            if method == old_name {
                Some(new_name.to_string())
            } else if method.contains(&old_pascal) {
                Some(method.replace(&old_pascal, &new_pascal))
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

    pub fn set_modifier(
        &self,
        library: &mut LibraryCustomization,
        modifiers: Modifiers,
    ) -> Result<Self> {
        let line = ops::set_modifier(library, &self.code, DeclarationKind::Field, modifiers)?;
        self.changed(library, line)
    }

    /// Adds a getter and a fluent setter for the field. Accessors that already exist are kept,
    /// and `final` fields get no setter.
    pub fn generate_getter_and_setter(&self, library: &mut LibraryCustomization) -> Result<Self> {
        self.code.check(library.editor())?;
        let text = library
            .editor()
            .file_line(self.code.file_name(), self.code.line())?
            .to_string();
        let offset = self.code.name_offset(library.editor())?;
        let (start, end) = utils::declared_type_span(&text, offset).ok_or_else(|| {
            CustomizationError::IllegalState(format!(
                "cannot find the type of property {}",
                self.property_name
            ))
        })?;
        let field_type = &text[start..end];
        let is_final = text[..start].split_whitespace().any(|word| word == "final");

        let name = &self.property_name;
        let pascal = capitalize(name);
        let getter = if field_type == "boolean" {
            format!("is{pascal}")
        } else {
            format!("get{pascal}")
        };
        let setter = format!("set{pascal}");

        let existing: Vec<String> = library
            .document_symbols(self.code.file_uri())?
            .iter()
            .filter(|symbol| {
                symbol.kind == SymbolKind::METHOD
                    && symbol.container_name.as_deref() == Some(self.class_name.as_str())
            })
            .map(|symbol| simple_name(symbol).to_string())
            .collect();

        let mut methods = Vec::new();
        if !existing.contains(&getter) {
            let mut contents = JavaFileContents::new();
            contents.javadoc_comment_with(|doc| {
                doc.description(&format!("Get the {name} property"));
                doc.method_returns(&format!("the {name} value"));
            });
            contents.method(
                Visibility::Public,
                &[],
                &format!("{field_type} {getter}()"),
                |body| body.method_return(&format!("this.{name}")),
            );
            methods.push(contents.to_string());
        }
        if !is_final && !existing.contains(&setter) {
            let mut contents = JavaFileContents::new();
            contents.javadoc_comment_with(|doc| {
                doc.description(&format!("Set the {name} property"));
                doc.param(name, &format!("the {name} value to set"));
                doc.method_returns(&format!("the {} object itself", self.class_name));
            });
            contents.method(
                Visibility::Public,
                &[],
                &format!("{} {setter}({field_type} {name})", self.class_name),
                |body| {
                    body.line(&format!("this.{name} = {name};"));
                    body.method_return("this");
                },
            );
            methods.push(contents.to_string());
        }

        let line = self.code.line();
        for method in &methods {
            self.get_class(library)?
                .add_method(library, method, &[] as &[&str])?;
        }
        tracing::debug!(
            target = "quill.customize",
            property = %name,
            added = methods.len(),
            "generated accessors"
        );
        self.at_line(library, line)
    }
}
