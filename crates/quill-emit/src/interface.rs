use crate::block::JavaBlock;
use crate::contents::JavaFileContents;
use crate::javadoc::JavaJavadocComment;
use crate::visibility::{JavaModifier, Visibility};

/// The body of an interface. Members are separated the same way as in [`crate::JavaClass`].
pub struct JavaInterface<'a> {
    contents: &'a mut JavaFileContents,
    add_new_line: bool,
}

impl<'a> JavaInterface<'a> {
    pub(crate) fn new(contents: &'a mut JavaFileContents) -> Self {
        Self {
            contents,
            add_new_line: false,
        }
    }

    fn add_expected_new_line(&mut self) {
        if self.add_new_line {
            self.contents.blank_line();
            self.add_new_line = false;
        }
    }

    /// An abstract method: `signature;`.
    pub fn method(&mut self, signature: &str) {
        self.add_expected_new_line();
        self.contents.line(&format!("{signature};"));
        self.add_new_line = true;
    }

    pub fn default_method(&mut self, signature: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.add_expected_new_line();
        self.contents
            .method(Visibility::PackagePrivate, &[JavaModifier::Default], signature, body);
        self.add_new_line = true;
    }

    pub fn static_method(&mut self, signature: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.add_expected_new_line();
        self.contents
            .method(Visibility::PackagePrivate, &[JavaModifier::Static], signature, body);
        self.add_new_line = true;
    }

    /// A constant; interface fields are implicitly `public static final`.
    pub fn constant(&mut self, declaration: &str) {
        self.add_expected_new_line();
        self.contents.line(&format!("{declaration};"));
        self.add_new_line = true;
    }

    pub fn javadoc_comment(&mut self, description: &str) {
        self.add_expected_new_line();
        self.contents.javadoc_comment(description);
    }

    pub fn javadoc_comment_with(&mut self, f: impl FnOnce(&mut JavaJavadocComment<'_>)) {
        self.add_expected_new_line();
        self.contents.javadoc_comment_with(f);
    }

    pub fn annotation<I, S>(&mut self, annotations: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_expected_new_line();
        self.contents.annotation(annotations);
    }

    pub fn line_comment(&mut self, text: &str) {
        self.add_expected_new_line();
        self.contents.line_comment(text);
    }
}
