use std::collections::BTreeMap;

use quill_customize::{Editor, LibraryCustomization};

mod javadoc;
mod lookup;
mod members;
mod rename;
mod script;

pub const WIDGET: &str = "src/main/java/com/example/Widget.java";
pub const USER: &str = "src/main/java/com/example/User.java";

pub const WIDGET_SOURCE: &str = r#"package com.example;

import java.util.List;

/**
 * A widget.
 */
public class Widget {
    public static final int MAX_SIZE = 10;

    private String name;

    private final int count;

    /**
     * Creates a widget.
     *
     * @param count the count
     */
    public Widget(int count) {
        this.count = count;
    }

    /**
     * Gets the name.
     *
     * @return the name
     */
    public String getName() {
        return this.name;
    }

    public Widget setName(String name) {
        this.name = name;
        return this;
    }

    public int getMaxSize() {
        return MAX_SIZE;
    }

    public void update(String value) {
        this.name = value;
    }

    public void update(String value, int times) {
        this.name = value + times;
    }
}"#;

pub const USER_SOURCE: &str = r#"package com.example;

public class User {
    public String describe(Widget widget) {
        return widget.getName();
    }
}"#;

pub fn files() -> BTreeMap<String, String> {
    BTreeMap::from([
        (WIDGET.to_string(), WIDGET_SOURCE.to_string()),
        (USER.to_string(), USER_SOURCE.to_string()),
    ])
}

pub fn library() -> LibraryCustomization {
    LibraryCustomization::with_indexed_client(Editor::from_files(files())).unwrap()
}

pub fn library_with(file: &str, source: &str) -> LibraryCustomization {
    LibraryCustomization::with_indexed_client(Editor::from_files([(file, source)])).unwrap()
}

pub fn content(library: &LibraryCustomization, file: &str) -> String {
    library.editor().file_content(file).unwrap()
}

pub fn line(library: &LibraryCustomization, file: &str, line: u32) -> String {
    library.editor().file_line(file, line).unwrap().to_string()
}
