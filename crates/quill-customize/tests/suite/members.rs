use pretty_assertions::assert_eq;
use quill_customize::{CustomizationError, Modifiers};

use super::{content, library, library_with, line, WIDGET};

#[test]
fn add_method_appends_to_the_class_and_imports() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let method = class
        .add_method(
            &mut library,
            "public String describe() {\n    return name;\n}",
            &["java.util.Map"],
        )
        .unwrap();

    assert_eq!(method.method_name(), "describe");
    assert_eq!(method.code().line(), 50);
    assert_eq!(line(&library, WIDGET, 2), "import java.util.List;");
    assert_eq!(line(&library, WIDGET, 3), "import java.util.Map;");
    let text = content(&library, WIDGET);
    assert!(
        text.ends_with("    }\n\n    public String describe() {\n        return name;\n    }\n}"),
        "{text}"
    );
}

#[test]
fn add_method_rejects_empty_code() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let err = class
        .add_method(&mut library, "  \n", &[] as &[&str])
        .unwrap_err();
    assert!(matches!(err, CustomizationError::InvalidArgument(_)), "{err}");
}

#[test]
fn add_constructor_goes_after_the_last_constructor() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let constructor = class
        .add_constructor(
            &mut library,
            "public Widget() {\n    this(0);\n}",
            &[] as &[&str],
        )
        .unwrap();

    assert_eq!(constructor.code().line(), 23);
    assert_eq!(line(&library, WIDGET, 21), "    }");
    assert_eq!(line(&library, WIDGET, 22), "");
    assert_eq!(line(&library, WIDGET, 23), "    public Widget() {");
    assert_eq!(line(&library, WIDGET, 24), "        this(0);");
    assert_eq!(line(&library, WIDGET, 26), "");
    assert_eq!(line(&library, WIDGET, 27), "    /**");
}

#[test]
fn static_block_is_created_once_then_extended() {
    const REGISTRY: &str = "src/main/java/a/Registry.java";
    let mut library = library_with(
        REGISTRY,
        "package a;\n\nimport java.util.HashMap;\nimport java.util.Map;\n\npublic class Registry {\n    private static final Map<String, String> NAMES = new HashMap<>();\n\n    public String lookup(String key) {\n        return NAMES.get(key);\n    }\n}",
    );
    let class = library.get_class("a", "Registry").unwrap();
    let class = class
        .add_static_block(&mut library, "NAMES.put(\"a\", \"b\");", &[] as &[&str])
        .unwrap();
    class
        .add_static_block(&mut library, "NAMES.put(\"c\", \"d\");", &[] as &[&str])
        .unwrap();

    assert_eq!(
        content(&library, REGISTRY),
        r#"package a;

import java.util.HashMap;
import java.util.Map;

public class Registry {
    private static final Map<String, String> NAMES = new HashMap<>();

    static {
        NAMES.put("a", "b");
        NAMES.put("c", "d");
    }

    public String lookup(String key) {
        return NAMES.get(key);
    }
}"#
    );
}

#[test]
fn removing_the_only_method_leaves_an_empty_body() {
    const FOO: &str = "src/main/java/a/Foo.java";
    let mut library = library_with(
        FOO,
        "package a;\n\npublic class Foo {\n    public void run() {\n    }\n}",
    );
    let class = library.get_class("a", "Foo").unwrap();
    class.remove_method(&mut library, "run").unwrap();
    assert_eq!(content(&library, FOO), "package a;\n\npublic class Foo {\n}");
}

#[test]
fn remove_method_takes_the_declaration_with_it() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let class = class.remove_method(&mut library, "getMaxSize").unwrap();

    let text = content(&library, WIDGET);
    assert!(!text.contains("getMaxSize"), "{text}");
    assert!(!text.contains("\n\n\n"), "{text}");
    assert!(class.get_method(&library, "getName").is_ok());
}

#[test]
fn replace_body_and_parameters() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();

    let method = class.get_method(&library, "getName").unwrap();
    let method = method
        .replace_body(&mut library, "return name == null ? \"\" : name;", &[] as &[&str])
        .unwrap();
    assert_eq!(method.code().line(), 28);
    assert_eq!(line(&library, WIDGET, 29), "        return name == null ? \"\" : name;");
    assert_eq!(line(&library, WIDGET, 30), "    }");

    let class = method.get_class(&library).unwrap();
    let update = class.get_method(&library, "update(String)").unwrap();
    let update = update
        .replace_parameters(&mut library, "Set<String> values", &["java.util.Set"])
        .unwrap();
    assert_eq!(line(&library, WIDGET, 3), "import java.util.Set;");
    assert_eq!(update.code().line(), 42);
    assert_eq!(
        line(&library, WIDGET, 42),
        "    public void update(Set<String> values) {"
    );
}

#[test]
fn set_return_type_keeps_the_old_value() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let method = class.get_method(&library, "getName").unwrap();
    let method = method
        .set_return_type(&mut library, "Optional<String>", "Optional.ofNullable(%s)")
        .unwrap();

    assert_eq!(method.code().line(), 28);
    assert_eq!(line(&library, WIDGET, 28), "    public Optional<String> getName() {");
    assert_eq!(line(&library, WIDGET, 29), "        String returnValue = this.name;");
    assert_eq!(
        line(&library, WIDGET, 30),
        "        return Optional.ofNullable(returnValue);"
    );
    assert_eq!(line(&library, WIDGET, 31), "    }");
}

#[test]
fn set_return_type_to_and_from_void() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();

    let method = class.get_method(&library, "getMaxSize").unwrap();
    method.set_return_type(&mut library, "void", "").unwrap();
    assert_eq!(line(&library, WIDGET, 37), "    public void getMaxSize() {");
    assert_eq!(line(&library, WIDGET, 38), "    }");

    let class = library.get_class("com.example", "Widget").unwrap();
    let update = class.get_method(&library, "update(String)").unwrap();
    let update = update.set_return_type(&mut library, "String", "value").unwrap();
    let at = update.code().line();
    assert_eq!(line(&library, WIDGET, at), "    public String update(String value) {");
    assert_eq!(line(&library, WIDGET, at + 1), "        this.name = value;");
    assert_eq!(line(&library, WIDGET, at + 2), "        return value;");
    assert_eq!(line(&library, WIDGET, at + 3), "    }");
}

#[test]
fn set_return_type_expands_a_single_line_body() {
    const COUNTER: &str = "src/main/java/com/example/Counter.java";
    let mut library = library_with(
        COUNTER,
        "package com.example;\n\npublic class Counter {\n    private int count;\n\n    public int size() { return count; }\n}",
    );
    let class = library.get_class("com.example", "Counter").unwrap();
    let method = class.get_method(&library, "size").unwrap();
    method.set_return_type(&mut library, "long", "(long) %s").unwrap();

    assert_eq!(line(&library, COUNTER, 5), "    public long size() {");
    assert_eq!(line(&library, COUNTER, 6), "        int returnValue = count;");
    assert_eq!(line(&library, COUNTER, 7), "        return (long) returnValue;");
    assert_eq!(line(&library, COUNTER, 8), "    }");
}

#[test]
fn failed_set_return_type_leaves_the_file_alone() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let stale = class.get_method(&library, "getName").unwrap();
    stale.set_modifier(&mut library, Modifiers::PROTECTED).unwrap();
    let before = content(&library, WIDGET);

    let err = stale
        .set_return_type(&mut library, "Optional<String>", "Optional.ofNullable(%s)")
        .unwrap_err();
    assert!(matches!(err, CustomizationError::StaleHandle { .. }), "{err}");
    assert_eq!(content(&library, WIDGET), before);
}

#[test]
fn set_modifier_rewrites_the_keywords() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let method = class.get_method(&library, "getName").unwrap();
    let method = method
        .set_modifier(&mut library, Modifiers::PROTECTED | Modifiers::FINAL)
        .unwrap();
    assert_eq!(line(&library, WIDGET, 28), "    protected final String getName() {");

    let err = method
        .set_modifier(&mut library, Modifiers::PUBLIC | Modifiers::PRIVATE)
        .unwrap_err();
    assert!(matches!(err, CustomizationError::InvalidArgument(_)), "{err}");

    let class = method.get_class(&library).unwrap();
    class.set_modifier(&mut library, Modifiers::PUBLIC | Modifiers::FINAL).unwrap();
    assert_eq!(line(&library, WIDGET, 7), "public final class Widget {");
}

#[test]
fn constants_stay_static_final() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let constant = class.get_constant(&library, "MAX_SIZE").unwrap();
    constant.set_modifier(&mut library, Modifiers::PRIVATE).unwrap();
    assert_eq!(line(&library, WIDGET, 8), "    private static final int MAX_SIZE = 10;");
}

#[test]
fn annotations_are_added_once_and_removed() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let property = class.get_property(&library, "name").unwrap();

    let property = property
        .add_annotation(&mut library, "JsonProperty(\"name\")")
        .unwrap();
    let property = property
        .add_annotation(&mut library, "@JsonProperty(\"name\")")
        .unwrap();
    assert_eq!(property.code().line(), 11);
    assert_eq!(line(&library, WIDGET, 10), "    @JsonProperty(\"name\")");

    let property = property.remove_annotation(&mut library, "JsonProperty").unwrap();
    assert_eq!(property.code().line(), 10);
    assert_eq!(line(&library, WIDGET, 10), "    private String name;");

    let err = property.remove_annotation(&mut library, "Missing").unwrap_err();
    assert!(matches!(err, CustomizationError::InvalidArgument(_)), "{err}");
}

#[test]
fn class_imports_skip_what_is_already_visible() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    class
        .add_imports(
            &mut library,
            &["java.util.Map", "com.example.User", "java.lang.String", "java.util.List"],
        )
        .unwrap();
    assert_eq!(line(&library, WIDGET, 2), "import java.util.List;");
    assert_eq!(line(&library, WIDGET, 3), "import java.util.Map;");
    assert_eq!(line(&library, WIDGET, 4), "");
}

#[test]
fn final_fields_only_get_a_getter() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let property = class.get_property(&library, "count").unwrap();
    let property = property.generate_getter_and_setter(&mut library).unwrap();

    assert_eq!(property.code().line(), 12);
    let text = content(&library, WIDGET);
    assert!(
        text.ends_with(
            "    /**\n     * Get the count property.\n     *\n     * @return the count value.\n     */\n    public int getCount() {\n        return this.count;\n    }\n}"
        ),
        "{text}"
    );
    assert!(!text.contains("setCount"), "{text}");
}

#[test]
fn existing_accessors_are_kept() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let before = class.get_property(&library, "name").unwrap();
    let after = before.generate_getter_and_setter(&mut library).unwrap();
    assert_eq!(after.code().version(), before.code().version());
}

#[test]
fn getter_and_fluent_setter_are_generated() {
    const FOO: &str = "src/main/java/a/Foo.java";
    let mut library = library_with(
        FOO,
        "package a;\n\npublic class Foo {\n    private boolean enabled;\n}",
    );
    let class = library.get_class("a", "Foo").unwrap();
    class
        .get_property(&library, "enabled")
        .unwrap()
        .generate_getter_and_setter(&mut library)
        .unwrap();

    assert_eq!(
        content(&library, FOO),
        r#"package a;

public class Foo {
    private boolean enabled;

    /**
     * Get the enabled property.
     *
     * @return the enabled value.
     */
    public boolean isEnabled() {
        return this.enabled;
    }

    /**
     * Set the enabled property.
     *
     * @param enabled the enabled value to set.
     * @return the Foo object itself.
     */
    public Foo setEnabled(boolean enabled) {
        this.enabled = enabled;
        return this;
    }
}"#
    );
}
