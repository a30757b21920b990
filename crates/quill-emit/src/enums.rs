use crate::block::JavaBlock;
use crate::contents::JavaFileContents;
use crate::javadoc::JavaJavadocComment;
use crate::visibility::{declaration_header, JavaModifier, Visibility};

/// The body of an `enum`.
///
/// Values are written first. Each value is separated from the next by `,` and a blank line;
/// the first member after the values terminates the list with `;`. When the body ends, the
/// last value's line is closed without a separator.
pub struct JavaEnum<'a> {
    contents: &'a mut JavaFileContents,
    add_new_line: bool,
    previously_added_value: bool,
}

impl<'a> JavaEnum<'a> {
    pub(crate) fn new(contents: &'a mut JavaFileContents) -> Self {
        Self {
            contents,
            add_new_line: false,
            previously_added_value: false,
        }
    }

    fn add_expected_new_line(&mut self) {
        if self.add_new_line {
            self.contents.blank_line();
            self.add_new_line = false;
        }
    }

    fn terminate_value(&mut self, separator: &str) {
        if self.previously_added_value {
            self.contents.line(separator);
            self.previously_added_value = false;
            self.add_new_line = true;
        }
    }

    /// `NAME(argument)`; pass an empty argument for a bare constant.
    pub fn value(&mut self, name: &str, argument: &str) {
        self.terminate_value(",");
        self.add_expected_new_line();
        if argument.is_empty() {
            self.contents.text(name);
        } else {
            self.contents.text(&format!("{name}({argument})"));
        }
        self.previously_added_value = true;
    }

    /// A value preceded by its own Javadoc.
    pub fn documented_value(&mut self, description: &str, name: &str, argument: &str) {
        self.terminate_value(",");
        self.add_expected_new_line();
        self.contents.javadoc_comment(description);
        self.value(name, argument);
    }

    fn before_member(&mut self) {
        self.terminate_value(";");
        self.add_expected_new_line();
    }

    pub fn variable(
        &mut self,
        visibility: Visibility,
        modifiers: &[JavaModifier],
        declaration: &str,
    ) {
        self.before_member();
        let line = declaration_header(visibility, modifiers, declaration);
        self.contents.line(&format!("{line};"));
        self.add_new_line = true;
    }

    pub fn constructor(
        &mut self,
        visibility: Visibility,
        signature: &str,
        body: impl FnOnce(&mut JavaBlock<'_>),
    ) {
        self.before_member();
        self.contents.constructor(visibility, signature, body);
        self.add_new_line = true;
    }

    pub fn method(
        &mut self,
        visibility: Visibility,
        modifiers: &[JavaModifier],
        signature: &str,
        body: impl FnOnce(&mut JavaBlock<'_>),
    ) {
        self.before_member();
        self.contents.method(visibility, modifiers, signature, body);
        self.add_new_line = true;
    }

    pub fn public_method(&mut self, signature: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.method(Visibility::Public, &[], signature, body);
    }

    pub fn public_static_method(&mut self, signature: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.method(Visibility::Public, &[JavaModifier::Static], signature, body);
    }

    /// Javadoc for the member that follows. Use [`JavaEnum::documented_value`] for values.
    pub fn javadoc_comment(&mut self, description: &str) {
        self.before_member();
        self.contents.javadoc_comment(description);
    }

    pub fn javadoc_comment_with(&mut self, f: impl FnOnce(&mut JavaJavadocComment<'_>)) {
        self.before_member();
        self.contents.javadoc_comment_with(f);
    }

    pub fn annotation<I, S>(&mut self, annotations: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.before_member();
        self.contents.annotation(annotations);
    }

    pub(crate) fn finish(&mut self) {
        if self.previously_added_value {
            self.contents.blank_line();
            self.previously_added_value = false;
        }
    }
}
