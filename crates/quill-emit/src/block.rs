use crate::class::JavaClass;
use crate::contents::JavaFileContents;
use crate::lambda::JavaLambda;
use crate::javadoc::JavaJavadocComment;
use crate::visibility::{JavaModifier, Visibility};

/// Statements inside a method, constructor, initializer or control-flow body.
pub struct JavaBlock<'a> {
    contents: &'a mut JavaFileContents,
}

impl<'a> JavaBlock<'a> {
    pub(crate) fn new(contents: &'a mut JavaFileContents) -> Self {
        Self { contents }
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

    pub fn indent(&mut self, f: impl FnOnce(&mut JavaBlock<'_>)) {
        self.contents
            .indent(|contents| f(&mut JavaBlock::new(contents)));
    }

    pub fn increase_indent(&mut self) {
        self.contents.increase_indent();
    }

    pub fn decrease_indent(&mut self) {
        self.contents.decrease_indent();
    }

    /// A nested `header { ... }` block.
    pub fn block(&mut self, header: &str, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.contents.block(header, body);
    }

    pub fn line_comment(&mut self, text: &str) {
        self.contents.line_comment(text);
    }

    pub fn block_comment(&mut self, text: &str) {
        self.contents.block_comment(text);
    }

    pub fn javadoc_comment_with(&mut self, f: impl FnOnce(&mut JavaJavadocComment<'_>)) {
        self.contents.javadoc_comment_with(f);
    }

    pub fn annotation<I, S>(&mut self, annotations: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.contents.annotation(annotations);
    }

    pub fn method_return(&mut self, expression: &str) {
        self.contents.method_return(expression);
    }

    pub fn if_block(
        &mut self,
        condition: &str,
        body: impl FnOnce(&mut JavaBlock<'_>),
    ) -> JavaIfBlock<'_> {
        self.contents.if_block(condition, body);
        JavaIfBlock {
            contents: &mut *self.contents,
        }
    }

    pub fn try_block(&mut self, body: impl FnOnce(&mut JavaBlock<'_>)) -> JavaTryBlock<'_> {
        self.contents.try_block(body);
        JavaTryBlock {
            contents: &mut *self.contents,
        }
    }

    pub fn try_with_resource_block(
        &mut self,
        resource: &str,
        body: impl FnOnce(&mut JavaBlock<'_>),
    ) -> JavaTryBlock<'_> {
        self.contents.try_with_resource_block(resource, body);
        JavaTryBlock {
            contents: &mut *self.contents,
        }
    }

    pub fn lambda(
        &mut self,
        parameter_type: &str,
        parameter_name: &str,
        body: impl FnOnce(&mut JavaLambda<'_>),
    ) {
        self.contents.lambda(parameter_type, parameter_name, body);
    }

    pub fn anonymous_class(
        &mut self,
        declaration: &str,
        instance_name: &str,
        body: impl FnOnce(&mut JavaClass<'_>),
    ) {
        self.contents
            .anonymous_class(declaration, instance_name, body);
    }

    pub fn return_anonymous_class(
        &mut self,
        declaration: &str,
        body: impl FnOnce(&mut JavaClass<'_>),
    ) {
        self.contents.return_anonymous_class(declaration, body);
    }

    /// A local or nested class declared inside the block.
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
}

/// Returned by [`JavaBlock::if_block`] so `else if`/`else` can continue the statement.
pub struct JavaIfBlock<'a> {
    contents: &'a mut JavaFileContents,
}

impl<'a> JavaIfBlock<'a> {
    pub fn else_if_block(
        self,
        condition: &str,
        body: impl FnOnce(&mut JavaBlock<'_>),
    ) -> JavaIfBlock<'a> {
        self.contents.else_if_block(condition, body);
        self
    }

    pub fn else_block(self, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.contents.else_block(body);
    }
}

/// Returned by the `try` helpers so `catch`/`finally` can continue the statement.
pub struct JavaTryBlock<'a> {
    contents: &'a mut JavaFileContents,
}

impl<'a> JavaTryBlock<'a> {
    pub fn catch_block(
        self,
        exception: &str,
        body: impl FnOnce(&mut JavaBlock<'_>),
    ) -> JavaTryBlock<'a> {
        self.contents.catch_block(exception, body);
        self
    }

    pub fn finally_block(self, body: impl FnOnce(&mut JavaBlock<'_>)) {
        self.contents.finally_block(body);
    }
}

/// Lines inside a `//` or `/* */` comment.
pub struct JavaLineComment<'a> {
    contents: &'a mut JavaFileContents,
}

impl<'a> JavaLineComment<'a> {
    pub(crate) fn new(contents: &'a mut JavaFileContents) -> Self {
        Self { contents }
    }

    pub fn line(&mut self, text: &str) {
        self.contents.line(text);
    }
}
