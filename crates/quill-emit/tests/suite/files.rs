use pretty_assertions::assert_eq;
use quill_emit::{JavaFileFactory, JavaModifier, JavaPackage, Visibility};

#[test]
fn model_file_renders_package_imports_and_class() {
    let factory = JavaFileFactory::new();
    let mut file = factory.create_source_file("com.example.models", "Widget");
    file.declare_import([
        "java.util.Map",
        "com.example.models.Gadget",
        "java.util.concurrent.Future",
        "java.util.List",
        "java.util.Map",
        "com.example.models.implementation.WidgetHelper",
    ]);
    file.javadoc_comment("The Widget model");
    file.annotation(["Fluent"]);
    file.public_final_class("Widget", |class| {
        class.javadoc_comment("The name property");
        class.private_member_variable("String name");
        class.javadoc_comment_with(|doc| {
            doc.description("Creates an instance of Widget class");
        });
        class.public_constructor("Widget()", |_| {});
        class.javadoc_comment_with(|doc| {
            doc.description("Get the name property: The name");
            doc.method_returns("the name value");
        });
        class.public_method("String getName()", |body| body.method_return("this.name"));
    });

    let expected = "\
package com.example.models;

import com.example.models.implementation.WidgetHelper;
import java.util.List;
import java.util.Map;
import java.util.concurrent.Future;

/**
 * The Widget model.
 */
@Fluent
public final class Widget {
    /**
     * The name property.
     */
    private String name;

    /**
     * Creates an instance of Widget class.
     */
    public Widget() {
    }

    /**
     * Get the name property: The name.
     *
     * @return the name value.
     */
    public String getName() {
        return this.name;
    }
}
";
    assert_eq!(file.to_string(), expected);
}

#[test]
fn imports_of_only_the_own_package_render_nothing() {
    let factory = JavaFileFactory::new();
    let mut file = factory.create_source_file("com.example", "Client");
    file.declare_import(["com.example.Widget", "com.example.Gadget"]);
    file.public_class("Client", |_| {});
    assert_eq!(
        file.to_string(),
        "package com.example;\n\npublic class Client {\n}\n"
    );
}

#[test]
fn importing_the_own_package_renders_nothing() {
    let factory = JavaFileFactory::new();
    let mut file = factory.create_source_file("com.example", "Foo");
    file.declare_import(["com.example", "com.example.Bar"]);
    file.public_class("Foo", |_| {});
    assert_eq!(file.to_string(), "package com.example;\n\npublic class Foo {\n}\n");
}

#[test]
fn nested_types_keep_indentation_symmetric() {
    let factory = JavaFileFactory::new();
    let mut file = factory.create_source_file("com.example", "Outer");
    file.public_class("Outer", |class| {
        class.interface_block(Visibility::Public, "Listener", |listener| {
            listener.method("void onEvent(String event)");
        });
        class.static_final_class(Visibility::Public, "Builder", |builder| {
            builder.method(
                Visibility::Public,
                &[],
                "Outer build()",
                |body| {
                    body.return_anonymous_class("Outer()", |anonymous| {
                        anonymous.annotation(["Override"]);
                        anonymous.method(
                            Visibility::Public,
                            &[JavaModifier::Final],
                            "String toString()",
                            |body| body.method_return("\"built\""),
                        );
                    });
                },
            );
        });
    });
    file.line("// trailer");

    let rendered = file.to_string();
    assert!(rendered.ends_with("}\n// trailer\n"), "{rendered}");
    assert!(
        rendered.contains(
            "            return Outer() {\n                @Override\n                public final String toString() {\n"
        ),
        "{rendered}"
    );
    assert_eq!(file.contents().line_prefix(), "");
}

#[test]
fn package_renders_every_file_in_path_order() {
    let mut package = JavaPackage::new();
    let factory = package.factory();
    for name in ["Zebra", "Apple"] {
        let mut file = factory.create_source_file("com.example", name);
        file.public_class(name, |_| {});
        package.add_java_file(file);
    }
    let paths: Vec<_> = package.render().into_keys().collect();
    assert_eq!(
        paths,
        vec![
            "src/main/java/com/example/Apple.java".to_string(),
            "src/main/java/com/example/Zebra.java".to_string(),
        ]
    );
}
