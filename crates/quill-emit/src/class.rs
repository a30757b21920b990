use crate::block::{JavaBlock, JavaLineComment};
use crate::contents::JavaFileContents;
use crate::interface::JavaInterface;
use crate::javadoc::JavaJavadocComment;
use crate::visibility::{declaration_header, JavaModifier, Visibility};

/// The body of a class (top-level, nested or anonymous).
///
/// Fields, constructors, methods, nested types and static initializers are separated by
/// exactly one blank line. Javadoc, annotations and comments flush a pending separator but
/// don't request one, so they stay attached to the member that follows them.
pub struct JavaClass<'a> {
    contents: &'a mut JavaFileContents,
    add_new_line: bool,
}

impl<'a> JavaClass<'a> {
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

    fn member(&mut self, write: impl FnOnce(&mut JavaFileContents)) {
        self.add_expected_new_line();
        write(&mut *self.contents);
        self.add_new_line = true;
    }

    /// A field declaration; `declaration` is everything after the modifiers, without `;`.
    pub fn variable(
        &mut self,
        visibility: Visibility,
        modifiers: &[JavaModifier],
        declaration: &str,
    ) {
        let line = declaration_header(visibility, modifiers, declaration);
        self.member(|contents| contents.line(&format!("{line};")));
    }

    pub fn member_variable(&mut self, visibility: Visibility, declaration: &str) {
        self.variable(visibility, &[], declaration);
    }

    pub fn private_member_variable(&mut self, declaration: &str) {
        self.variable(Visibility::Private, &[], declaration);
    }

    pub fn private_final_member_variable(&mut self, declaration: &str) {
        self.variable(Visibility::Private, &[JavaModifier::Final], declaration);
    }

    pub fn public_static_final_variable(&mut self, declaration: &str) {
        self.variable(
            Visibility::Public,
            &[JavaModifier::Static, JavaModifier::Final],
            declaration,
        );
    }

    pub fn private_static_final_variable(&mut self, declaration: &str) {
        self.variable(
            Visibility::Private,
            &[JavaModifier::Static, JavaModifier::Final],
            declaration,
        );
    }

    pub fn constructor(
        &mut self,
        visibility: Visibility,
        signature: &str,
        body: impl FnOnce(&mut JavaBlock<'_>),
    ) {
        self.member(|contents| contents.constructor(visibility, signature, body));
    }

    pub fn public_constructor(&mut self, signature: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.constructor(Visibility::Public, signature, body);
    }

    pub fn private_constructor(&mut self, signature: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.constructor(Visibility::Private, signature, body);
    }

    pub fn method(
        &mut self,
        visibility: Visibility,
        modifiers: &[JavaModifier],
        signature: &str,
        body: impl FnOnce(&mut JavaBlock<'_>),
    ) {
        self.member(|contents| contents.method(visibility, modifiers, signature, body));
    }

    pub fn public_method(&mut self, signature: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.method(Visibility::Public, &[], signature, body);
    }

    pub fn private_method(&mut self, signature: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.method(Visibility::Private, &[], signature, body);
    }

    pub fn public_static_method(&mut self, signature: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.method(Visibility::Public, &[JavaModifier::Static], signature, body);
    }

    /// A bodiless declaration such as an `abstract` or `native` method.
    pub fn method_declaration(
        &mut self,
        visibility: Visibility,
        modifiers: &[JavaModifier],
        signature: &str,
    ) {
        let line = declaration_header(visibility, modifiers, signature);
        self.member(|contents| contents.line(&format!("{line};")));
    }

    pub fn interface_block(
        &mut self,
        visibility: Visibility,
        signature: &str,
        body: impl FnOnce(&mut JavaInterface<'_>),
    ) {
        self.member(|contents| contents.interface_block(visibility, signature, body));
    }

    pub fn class_block(
        &mut self,
        visibility: Visibility,
        modifiers: &[JavaModifier],
        declaration: &str,
        body: impl FnOnce(&mut JavaClass<'_>),
    ) {
        self.member(|contents| contents.class_block(visibility, modifiers, declaration, body));
    }

    pub fn static_final_class(
        &mut self,
        visibility: Visibility,
        declaration: &str,
        body: impl FnOnce(&mut JavaClass<'_>),
    ) {
        self.class_block(
            visibility,
            &[JavaModifier::Static, JavaModifier::Final],
            declaration,
            body,
        );
    }

    pub fn static_block(&mut self, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.member(|contents| contents.block("static", body));
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

    pub fn block_comment_with(&mut self, f: impl FnOnce(&mut JavaLineComment<'_>)) {
        self.add_expected_new_line();
        self.contents.block_comment_with(f);
    }
}
