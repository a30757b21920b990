use std::fmt;

use crate::block::JavaLineComment;
use crate::class::JavaClass;
use crate::contents::JavaFileContents;
use crate::enums::JavaEnum;
use crate::imports::organize_imports;
use crate::interface::JavaInterface;
use crate::javadoc::JavaJavadocComment;
use crate::visibility::{JavaModifier, Visibility};

/// A single `.java` file at a relative output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    file_path: String,
    package: Option<String>,
    contents: JavaFileContents,
}

impl JavaFile {
    /// An empty file. Use [`JavaFile::declare_package`] to start it with `package ...;`.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            package: None,
            contents: JavaFileContents::new(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn contents(&self) -> &JavaFileContents {
        &self.contents
    }

    /// Direct access to the line sink for writes that have no wrapper here.
    pub fn contents_mut(&mut self) -> &mut JavaFileContents {
        &mut self.contents
    }

    /// Writes `package ...;` and a blank line, and records the package for import filtering.
    pub fn declare_package(&mut self, package: &str) {
        self.package = Some(package.to_string());
        self.contents.declare_package(package);
        self.contents.blank_line();
    }

    /// Writes the import block, dropping types of this file's own package.
    pub fn declare_import<I, S>(&mut self, imports: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let imports = organize_imports(imports, self.package.as_deref());
        self.contents.declare_import(imports);
    }

    pub fn line(&mut self, text: &str) {
        self.contents.line(text);
    }

    pub fn text(&mut self, text: &str) {
        self.contents.text(text);
    }

    pub fn blank_line(&mut self) {
        self.contents.blank_line();
    }

    pub fn javadoc_comment(&mut self, description: &str) {
        self.contents.javadoc_comment(description);
    }

    pub fn javadoc_comment_with(&mut self, f: impl FnOnce(&mut JavaJavadocComment<'_>)) {
        self.contents.javadoc_comment_with(f);
    }

    pub fn line_comment(&mut self, text: &str) {
        self.contents.line_comment(text);
    }

    pub fn block_comment_with(&mut self, f: impl FnOnce(&mut JavaLineComment<'_>)) {
        self.contents.block_comment_with(f);
    }

    pub fn annotation<I, S>(&mut self, annotations: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.contents.annotation(annotations);
    }

    pub fn class_block(
        &mut self,
        visibility: Visibility,
        modifiers: &[JavaModifier],
        declaration: &str,
        body: impl FnOnce(&mut JavaClass<'_>),
    ) {
        self.contents
            .class_block(visibility, modifiers, declaration, body);
    }

    pub fn public_class(&mut self, declaration: &str, body: impl FnOnce(&mut JavaClass<'_>)) {
        self.class_block(Visibility::Public, &[], declaration, body);
    }

    pub fn public_final_class(&mut self, declaration: &str, body: impl FnOnce(&mut JavaClass<'_>)) {
        self.class_block(Visibility::Public, &[JavaModifier::Final], declaration, body);
    }

    pub fn enum_block(
        &mut self,
        visibility: Visibility,
        name: &str,
        body: impl FnOnce(&mut JavaEnum<'_>),
    ) {
        self.contents.enum_block(visibility, name, body);
    }

    pub fn public_enum(&mut self, name: &str, body: impl FnOnce(&mut JavaEnum<'_>)) {
        self.enum_block(Visibility::Public, name, body);
    }

    pub fn interface_block(
        &mut self,
        visibility: Visibility,
        signature: &str,
        body: impl FnOnce(&mut JavaInterface<'_>),
    ) {
        self.contents.interface_block(visibility, signature, body);
    }

    pub fn public_interface(&mut self, signature: &str, body: impl FnOnce(&mut JavaInterface<'_>)) {
        self.interface_block(Visibility::Public, signature, body);
    }
}

impl fmt::Display for JavaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.contents, f)
    }
}

/// Source set a file is generated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceSet {
    Main,
    Test,
    Samples,
}

impl SourceSet {
    pub const fn root(self) -> &'static str {
        match self {
            SourceSet::Main => "src/main/java",
            SourceSet::Test => "src/test/java",
            SourceSet::Samples => "src/samples/java",
        }
    }
}

/// Creates files at the conventional Maven layout paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaFileFactory;

impl JavaFileFactory {
    pub fn new() -> Self {
        Self
    }

    /// `<root>/<package path>/<name>.java`, with the `package` line already written.
    pub fn create_file(&self, source_set: SourceSet, package: &str, name: &str) -> JavaFile {
        let mut file = JavaFile::new(package_file_path(
            source_set,
            package,
            &format!("{name}.java"),
        ));
        file.declare_package(package);
        file
    }

    pub fn create_source_file(&self, package: &str, name: &str) -> JavaFile {
        self.create_file(SourceSet::Main, package, name)
    }

    pub fn create_test_file(&self, package: &str, name: &str) -> JavaFile {
        self.create_file(SourceSet::Test, package, name)
    }

    pub fn create_sample_file(&self, package: &str, name: &str) -> JavaFile {
        self.create_file(SourceSet::Samples, package, name)
    }

    /// `package-info.java`; the package line is left to the caller since it follows the
    /// package Javadoc.
    pub fn create_package_info(&self, package: &str) -> JavaFile {
        JavaFile::new(package_file_path(SourceSet::Main, package, "package-info.java"))
    }

    pub fn create_module_info(&self) -> JavaFile {
        JavaFile::new(format!("{}/module-info.java", SourceSet::Main.root()))
    }
}

pub fn package_path(package: &str) -> String {
    package.replace('.', "/")
}

fn package_file_path(source_set: SourceSet, package: &str, file_name: &str) -> String {
    if package.is_empty() {
        format!("{}/{file_name}", source_set.root())
    } else {
        format!("{}/{}/{file_name}", source_set.root(), package_path(package))
    }
}
