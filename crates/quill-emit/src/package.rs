use std::collections::{BTreeMap, BTreeSet};

use crate::file::{JavaFile, JavaFileFactory};

/// A non-Java output file (resources, configuration, docs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    pub file_path: String,
    pub contents: String,
}

impl TextFile {
    pub fn new(file_path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            contents: contents.into(),
        }
    }
}

/// Every file produced by one generation run.
#[derive(Debug, Default)]
pub struct JavaPackage {
    factory: JavaFileFactory,
    java_files: Vec<JavaFile>,
    text_files: Vec<TextFile>,
    file_paths: BTreeSet<String>,
}

impl JavaPackage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factory(&self) -> JavaFileFactory {
        self.factory
    }

    pub fn java_files(&self) -> &[JavaFile] {
        &self.java_files
    }

    pub fn text_files(&self) -> &[TextFile] {
        &self.text_files
    }

    /// Adds a finished file. A path that was already added is logged and the later file wins
    /// when rendering.
    pub fn add_java_file(&mut self, file: JavaFile) {
        self.check_duplicate_file(file.file_path());
        self.java_files.push(file);
    }

    pub fn add_text_file(&mut self, file: TextFile) {
        self.check_duplicate_file(&file.file_path);
        self.text_files.push(file);
    }

    fn check_duplicate_file(&mut self, file_path: &str) {
        if !self.file_paths.insert(file_path.to_string()) {
            tracing::warn!(
                target = "quill.emit",
                file_path,
                "name conflict for output file"
            );
        }
    }

    /// Path to rendered contents, in path order.
    pub fn render(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        for file in &self.java_files {
            out.insert(file.file_path().to_string(), file.to_string());
        }
        for file in &self.text_files {
            out.insert(file.file_path.clone(), file.contents.clone());
        }
        out
    }
}
