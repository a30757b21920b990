use quill_customize::CustomizationError;

use super::{library, line, WIDGET};

#[test]
fn missing_class_is_an_invalid_argument() {
    let library = library();
    let err = library.get_class("com.example", "Missing").unwrap_err();
    assert!(matches!(err, CustomizationError::InvalidArgument(_)), "{err}");
    assert!(err.to_string().contains("Missing"), "{err}");

    let err = library.get_class("com.other", "Widget").unwrap_err();
    assert!(matches!(err, CustomizationError::InvalidArgument(_)), "{err}");
}

#[test]
fn package_lists_its_classes_by_name() {
    let library = library();
    let names: Vec<String> = library
        .get_package("com.example")
        .list_classes(&library)
        .unwrap()
        .iter()
        .map(|class| class.class_name().to_string())
        .collect();
    assert_eq!(names, ["User", "Widget"]);
}

#[test]
fn overloaded_method_needs_a_signature() {
    let library = library();
    let class = library.get_class("com.example", "Widget").unwrap();

    let err = class.get_method(&library, "update").unwrap_err();
    assert!(matches!(err, CustomizationError::IllegalState(_)), "{err}");

    let two = class
        .get_method(&library, "void update(String value, int times)")
        .unwrap();
    assert_eq!(two.method_name(), "update");
    assert_eq!(two.code().line(), 45);

    let one = class.get_method(&library, "update(String)").unwrap();
    assert_eq!(one.code().line(), 41);

    let err = class.get_method(&library, "update(int)").unwrap_err();
    assert!(matches!(err, CustomizationError::InvalidArgument(_)), "{err}");
}

#[test]
fn members_resolve_by_kind() {
    let library = library();
    let class = library.get_class("com.example", "Widget").unwrap();

    let constructor = class.get_constructor(&library, "Widget").unwrap();
    assert_eq!(constructor.code().line(), 19);
    assert_eq!(class.get_property(&library, "name").unwrap().code().line(), 10);
    assert_eq!(
        class.get_constant(&library, "MAX_SIZE").unwrap().code().line(),
        8
    );

    let err = class.get_property(&library, "MAX_SIZE").unwrap_err();
    assert!(matches!(err, CustomizationError::InvalidArgument(_)), "{err}");
    let err = class.get_method(&library, "missing").unwrap_err();
    assert!(matches!(err, CustomizationError::InvalidArgument(_)), "{err}");
}

#[test]
fn handles_go_stale_after_a_mutation() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let method = class.get_method(&library, "getName").unwrap();

    let annotated = method.add_annotation(&mut library, "Deprecated").unwrap();
    assert_eq!(line(&library, WIDGET, 28), "    @Deprecated");
    assert_eq!(annotated.code().line(), 29);
    assert!(annotated.code().version() > method.code().version());

    let err = method.rename(&mut library, "getTitle").unwrap_err();
    assert!(matches!(err, CustomizationError::StaleHandle { .. }), "{err}");
    let err = class.get_method(&library, "getName").unwrap_err();
    assert!(matches!(err, CustomizationError::StaleHandle { .. }), "{err}");

    // The fresh handle keeps working.
    annotated
        .remove_annotation(&mut library, "@Deprecated")
        .unwrap();
    assert_eq!(line(&library, WIDGET, 28), "    public String getName() {");
}
