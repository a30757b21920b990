use pretty_assertions::assert_eq;
use quill_customize::{
    run, run_customization, CustomizationError, CustomizationScript, LibraryCustomization,
};

use super::{files, USER, WIDGET};

const SCRIPT: &str = r#"
[[operation]]
kind = "rename-method"
package = "com.example"
class = "Widget"
method = "getName"
new-name = "getTitle"

[[operation]]
kind = "add-annotation"
package = "com.example"
class = "Widget"
member = { property = "name" }
annotation = "JsonProperty(\"name\")"

[[operation]]
kind = "set-modifier"
package = "com.example"
class = "Widget"
modifiers = ["public", "final"]

[[operation]]
kind = "set-description"
package = "com.example"
class = "Widget"
member = { method = "getTitle" }
description = "Gets the title."
"#;

#[test]
fn script_operations_run_in_order() {
    let script: CustomizationScript = toml::from_str(SCRIPT).unwrap();
    assert_eq!(script.operations.len(), 4);

    let out = run_customization(files(), &script).unwrap();
    let widget = &out[WIDGET];
    assert!(widget.contains("public final class Widget {"), "{widget}");
    assert!(
        widget.contains("    @JsonProperty(\"name\")\n    private String name;"),
        "{widget}"
    );
    assert!(
        widget.contains("     * Gets the title.\n     *\n     * @return the name\n     */\n    public String getTitle() {"),
        "{widget}"
    );
    assert!(out[USER].contains("widget.getTitle()"), "{}", out[USER]);
}

#[test]
fn a_failing_operation_fails_the_run() {
    let script: CustomizationScript = toml::from_str(
        r#"
[[operation]]
kind = "remove-method"
package = "com.example"
class = "Missing"
method = "run"
"#,
    )
    .unwrap();
    let err = run_customization(files(), &script).unwrap_err();
    assert!(matches!(err, CustomizationError::InvalidArgument(_)), "{err}");
}

#[test]
fn closures_are_customizations() {
    let rename = |library: &mut LibraryCustomization| -> quill_customize::Result<()> {
        let class = library.get_class("com.example", "Widget")?;
        class.get_property(library, "name")?.rename(library, "label")?;
        Ok(())
    };
    let out = run_customization(files(), &rename).unwrap();
    assert!(out[WIDGET].contains("    private String label;"));
    assert!(out[USER].contains("widget.getLabel()"));

    let out = run(files(), |library| {
        library
            .get_class("com.example", "User")?
            .rename(library, "Person")?;
        Ok(())
    })
    .unwrap();
    let names: Vec<&String> = out.keys().collect();
    assert_eq!(
        names,
        [
            "src/main/java/com/example/Person.java",
            "src/main/java/com/example/Widget.java",
        ]
    );
}
