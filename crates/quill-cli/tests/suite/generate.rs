use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

use super::quill;

const CODE_MODEL: &str = r#"{
    "packageName": "com.example",
    "models": [
        { "name": "Widget", "properties": [ { "name": "size", "clientType": "int" } ] }
    ],
    "enums": [
        { "name": "Color", "values": [ { "value": "red" } ] }
    ]
}"#;

#[test]
fn generate_writes_sources_under_the_workspace() {
    let temp = TempDir::new().unwrap();
    temp.child("model.json").write_str(CODE_MODEL).unwrap();

    let output = quill()
        .arg("generate")
        .arg(temp.child("model.json").path())
        .arg("--path")
        .arg(temp.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["package"], "com.example");
    assert_eq!(report["customized"], false);
    assert_eq!(
        report["files"],
        serde_json::json!([
            "src/main/java/com/example/models/Color.java",
            "src/main/java/com/example/models/Widget.java",
            "src/main/java/com/example/models/package-info.java",
        ])
    );

    temp.child("src/main/java/com/example/models/Widget.java")
        .assert(predicate::str::contains("    private int size;\n"));
    temp.child("src/main/java/com/example/models/Color.java")
        .assert(predicate::str::contains("public enum Color {"));
}

#[test]
fn config_overrides_package_indentation_and_customizes() {
    let temp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    temp.child("model.json").write_str(CODE_MODEL).unwrap();
    temp.child("quill.toml")
        .write_str(
            "[generator]\nbase_package = \"com.acme\"\nindent_width = 2\ncustomization = \"customize.toml\"\n\n[logging]\nstderr = false\n",
        )
        .unwrap();
    temp.child("customize.toml")
        .write_str(
            r#"
[[operation]]
kind = "rename-class"
package = "com.acme.models"
class = "Widget"
new-name = "Gadget"
"#,
        )
        .unwrap();

    quill()
        .arg("generate")
        .arg(temp.child("model.json").path())
        .arg("--path")
        .arg(temp.path())
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("generated: com.acme (3 files)")
                .and(predicate::str::contains("customized: yes")),
        );

    out.child("src/main/java/com/acme/models/Widget.java")
        .assert(predicate::path::missing());
    out.child("src/main/java/com/acme/models/Gadget.java").assert(
        predicate::str::contains("public final class Gadget {\n")
            .and(predicate::str::contains("\n  private int size;\n"))
            .and(predicate::str::contains("\n    return this.size;\n")),
    );
}

#[test]
fn invalid_code_model_exits_with_code_two() {
    let temp = TempDir::new().unwrap();
    temp.child("model.json")
        .write_str(r#"{ "packageName": "com.example", "models": [ { "name": "class" } ] }"#)
        .unwrap();

    quill()
        .arg("generate")
        .arg(temp.child("model.json").path())
        .arg("--path")
        .arg(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to generate models"));
}
