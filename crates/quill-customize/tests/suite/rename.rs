use pretty_assertions::assert_eq;
use quill_customize::{CustomizationError, Editor, LibraryCustomization};

use super::{content, library, library_with, line, USER, WIDGET};

const GADGET: &str = "src/main/java/com/example/Gadget.java";

#[test]
fn class_rename_moves_the_file_and_updates_references() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let class = class.rename(&mut library, "Gadget").unwrap();

    assert_eq!(class.class_name(), "Gadget");
    assert_eq!(class.code().file_name(), GADGET);
    assert!(!library.editor().contains(WIDGET));
    assert_eq!(line(&library, GADGET, 7), "public class Gadget {");
    assert_eq!(line(&library, GADGET, 19), "    public Gadget(int count) {");
    assert_eq!(line(&library, GADGET, 32), "    public Gadget setName(String name) {");
    assert_eq!(line(&library, USER, 3), "    public String describe(Gadget widget) {");

    assert!(library.get_class("com.example", "Gadget").is_ok());
    let err = library.get_class("com.example", "Widget").unwrap_err();
    assert!(matches!(err, CustomizationError::InvalidArgument(_)), "{err}");
}

#[test]
fn class_rename_onto_an_existing_file_fails_without_edits() {
    let mut library = library();
    let before = content(&library, WIDGET);
    let class = library.get_class("com.example", "Widget").unwrap();
    let err = class.rename(&mut library, "User").unwrap_err();
    assert!(matches!(err, CustomizationError::Rename { .. }), "{err}");
    assert_eq!(content(&library, WIDGET), before);
}

#[test]
fn method_rename_updates_callers() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let method = class.get_method(&library, "getName").unwrap();
    let method = method.rename(&mut library, "getTitle").unwrap();

    assert_eq!(method.method_name(), "getTitle");
    assert_eq!(method.code().line(), 28);
    assert_eq!(line(&library, WIDGET, 28), "    public String getTitle() {");
    assert_eq!(line(&library, USER, 4), "        return widget.getTitle();");
}

#[test]
fn method_rename_leaves_other_overloads_alone() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let method = class.get_method(&library, "update(String)").unwrap();
    method.rename(&mut library, "replace").unwrap();

    assert_eq!(line(&library, WIDGET, 41), "    public void replace(String value) {");
    assert_eq!(
        line(&library, WIDGET, 45),
        "    public void update(String value, int times) {"
    );
}

#[test]
fn method_rename_skips_calls_on_other_types() {
    const LOOKUP: &str = "src/main/java/com/example/Lookup.java";
    let mut library = library_with(
        LOOKUP,
        r#"package com.example;

import java.util.Map;

public class Lookup {
    private final Map<String, String> map;

    public Lookup(Map<String, String> map) {
        this.map = map;
    }

    public String get(String key) {
        return map.get(key);
    }

    public String getOrEmpty(String key) {
        String value = this.get(key);
        return value == null ? "" : get(key);
    }
}"#,
    );
    let class = library.get_class("com.example", "Lookup").unwrap();
    let method = class.get_method(&library, "get").unwrap();
    method.rename(&mut library, "fetch").unwrap();

    assert_eq!(line(&library, LOOKUP, 11), "    public String fetch(String key) {");
    assert_eq!(line(&library, LOOKUP, 12), "        return map.get(key);");
    assert_eq!(line(&library, LOOKUP, 16), "        String value = this.fetch(key);");
    assert_eq!(
        line(&library, LOOKUP, 17),
        "        return value == null ? \"\" : fetch(key);"
    );
}

#[test]
fn class_rename_leaves_same_named_classes_in_other_packages_alone() {
    const FOO: &str = "src/main/java/a/b/Foo.java";
    const OTHER_FOO: &str = "src/main/java/x/y/Foo.java";
    const CLIENT: &str = "src/main/java/x/y/Client.java";
    let other_foo = "package x.y;\n\npublic class Foo {\n    public Foo() {}\n}";
    let editor = Editor::from_files([
        (FOO, "package a.b;\n\npublic class Foo {\n    public Foo() {}\n}"),
        (OTHER_FOO, other_foo),
        (
            CLIENT,
            "package x.y;\n\nimport a.b.Foo;\n\npublic class Client {\n    Foo foo = new Foo();\n}",
        ),
    ]);
    let mut library = LibraryCustomization::with_indexed_client(editor).unwrap();
    let class = library.get_class("a.b", "Foo").unwrap();
    class.rename(&mut library, "Bar").unwrap();

    assert_eq!(content(&library, OTHER_FOO), other_foo);
    assert!(!library.editor().contains(FOO));
    assert_eq!(line(&library, "src/main/java/a/b/Bar.java", 2), "public class Bar {");
    assert_eq!(line(&library, CLIENT, 2), "import a.b.Bar;");
    assert_eq!(line(&library, CLIENT, 5), "    Bar foo = new Bar();");
}

#[test]
fn rename_to_an_invalid_identifier_fails() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let method = class.get_method(&library, "getName").unwrap();
    let err = method.rename(&mut library, "get name").unwrap_err();
    assert!(matches!(err, CustomizationError::Rename { .. }), "{err}");
}

#[test]
fn property_rename_follows_accessors() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let property = class.get_property(&library, "name").unwrap();
    let property = property.rename(&mut library, "title").unwrap();

    assert_eq!(property.property_name(), "title");
    assert_eq!(property.code().line(), 10);
    assert_eq!(line(&library, WIDGET, 10), "    private String title;");
    assert_eq!(line(&library, WIDGET, 28), "    public String getTitle() {");
    assert_eq!(line(&library, WIDGET, 29), "        return this.title;");
    assert_eq!(line(&library, WIDGET, 32), "    public Widget setTitle(String name) {");
    assert_eq!(line(&library, WIDGET, 33), "        this.title = name;");
    assert_eq!(line(&library, USER, 4), "        return widget.getTitle();");
}

#[test]
fn constant_rename_follows_accessors() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let constant = class.get_constant(&library, "MAX_SIZE").unwrap();
    let constant = constant.rename(&mut library, "LIMIT_SIZE").unwrap();

    assert_eq!(constant.constant_name(), "LIMIT_SIZE");
    assert_eq!(
        line(&library, WIDGET, 8),
        "    public static final int LIMIT_SIZE = 10;"
    );
    assert_eq!(line(&library, WIDGET, 37), "    public int getLimitSize() {");
    assert_eq!(line(&library, WIDGET, 38), "        return LIMIT_SIZE;");
}
