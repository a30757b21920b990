use pretty_assertions::assert_eq;
use quill_emit::{JavaFileContents, LineState, Visibility};

#[test]
fn method_with_control_flow_and_comments() {
    let mut contents = JavaFileContents::new();
    contents.method(Visibility::Public, &[], "int parse(String value)", |body| {
        body.line_comment("null means unset");
        body.if_block("value == null", |then| then.method_return("-1"))
            .else_block(|otherwise| {
                otherwise
                    .try_block(|attempt| attempt.method_return("Integer.parseInt(value)"))
                    .catch_block("NumberFormatException e", |handler| {
                        handler.line("throw new IllegalArgumentException(e);");
                    });
            });
    });

    let expected = "\
public int parse(String value) {
    // null means unset
    if (value == null) {
        return -1;
    } else {
        try {
            return Integer.parseInt(value);
        } catch (NumberFormatException e) {
            throw new IllegalArgumentException(e);
        }
    }
}
";
    assert_eq!(contents.to_string(), expected);
    assert_eq!(contents.state(), LineState::Empty);
}

#[test]
fn else_without_preceding_if_starts_a_new_line() {
    let mut contents = JavaFileContents::new();
    contents.indent(|contents| {
        contents.line("run();");
        contents.else_block(|block| block.line("stop();"));
    });
    assert_eq!(contents.to_string(), "    run();\n    else {\n        stop();\n    }\n");
}

#[test]
fn anonymous_class_instance() {
    let mut contents = JavaFileContents::new();
    contents.anonymous_class("Runnable", "task", |class| {
        class.annotation(["Override"]);
        class.public_method("void run()", |body| body.line("work();"));
    });
    let expected = "\
Runnable task = new Runnable() {
    @Override
    public void run() {
        work();
    }
};
";
    assert_eq!(contents.to_string(), expected);
}

#[test]
fn line_comment_prefix_is_removed_afterwards() {
    let mut contents = JavaFileContents::new();
    contents.indent(|contents| {
        contents.line_comment_with(|comment| {
            comment.line("first");
            comment.line("second");
        });
        contents.line("code();");
    });
    assert_eq!(
        contents.to_string(),
        "    // first\n    // second\n    code();\n"
    );
}
