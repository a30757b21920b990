use crate::contents::JavaFileContents;

/// The body of a lambda started by [`JavaFileContents::lambda`].
///
/// A lambda that only returns an expression stays on the arrow line. Writing any statement
/// turns it into a braced block which is closed when the lambda finishes; the closing `}` is
/// left open so the caller can continue the enclosing expression (`});`).
pub struct JavaLambda<'a> {
    contents: &'a mut JavaFileContents,
    is_block: bool,
}

impl<'a> JavaLambda<'a> {
    pub(crate) fn new(contents: &'a mut JavaFileContents) -> Self {
        Self {
            contents,
            is_block: false,
        }
    }

    fn open_block(&mut self) {
        if !self.is_block {
            self.contents.line("{");
            self.contents.increase_indent();
            self.is_block = true;
        }
    }

    pub fn line(&mut self, text: &str) {
        self.open_block();
        self.contents.line(text);
    }

    pub fn lambda_return(&mut self, expression: &str) {
        if self.is_block {
            self.contents.method_return(expression);
        } else {
            self.contents.text(expression);
        }
    }

    pub(crate) fn finish(self) {
        if self.is_block {
            self.contents.decrease_indent();
            self.contents.text("}");
        }
    }
}
