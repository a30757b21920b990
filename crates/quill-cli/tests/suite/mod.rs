mod cli;
mod customize;
mod generate;

use assert_cmd::Command;

pub(crate) fn quill() -> Command {
    let mut command = Command::new(assert_cmd::cargo::cargo_bin!("quill"));
    command.env_remove("QUILL_CONFIG_PATH").env_remove("RUST_LOG");
    command
}

pub(crate) const WIDGET_SOURCE: &str = r#"package com.example;

public class Widget {
    private String name;

    public String getName() {
        return this.name;
    }

    public Widget setName(String name) {
        this.name = name;
        return this;
    }
}
"#;
