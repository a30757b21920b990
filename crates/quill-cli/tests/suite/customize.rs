use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

use super::{quill, WIDGET_SOURCE};

const WIDGET_PATH: &str = "src/main/java/com/example/Widget.java";

const RENAME_GETTER: &str = r#"
[[operation]]
kind = "rename-method"
package = "com.example"
class = "Widget"
method = "getName"
new-name = "getTitle"
"#;

#[test]
fn customize_rewrites_changed_files() {
    let temp = TempDir::new().unwrap();
    temp.child(WIDGET_PATH).write_str(WIDGET_SOURCE).unwrap();
    let script = TempDir::new().unwrap();
    script.child("customize.toml").write_str(RENAME_GETTER).unwrap();

    quill()
        .arg("customize")
        .arg(script.child("customize.toml").path())
        .arg("--path")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("changed: {WIDGET_PATH}")));

    temp.child(WIDGET_PATH).assert(
        predicate::str::contains("    public String getTitle() {\n")
            .and(predicate::str::contains("getName").not()),
    );
}

#[test]
fn dry_run_reports_without_writing() {
    let temp = TempDir::new().unwrap();
    temp.child(WIDGET_PATH).write_str(WIDGET_SOURCE).unwrap();
    let script = TempDir::new().unwrap();
    script
        .child("customize.toml")
        .write_str(
            r#"
[[operation]]
kind = "rename-class"
package = "com.example"
class = "Widget"
new-name = "Gadget"
"#,
        )
        .unwrap();

    let output = quill()
        .arg("customize")
        .arg(script.child("customize.toml").path())
        .arg("--path")
        .arg(temp.path())
        .arg("--dry-run")
        .arg("--json")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(
        report["added"],
        serde_json::json!(["src/main/java/com/example/Gadget.java"])
    );
    assert_eq!(report["removed"], serde_json::json!([WIDGET_PATH]));
    temp.child(WIDGET_PATH).assert(WIDGET_SOURCE);
    temp.child("src/main/java/com/example/Gadget.java")
        .assert(predicate::path::missing());
}

#[test]
fn failing_operation_exits_with_code_two() {
    let temp = TempDir::new().unwrap();
    temp.child(WIDGET_PATH).write_str(WIDGET_SOURCE).unwrap();
    let script = TempDir::new().unwrap();
    script
        .child("customize.toml")
        .write_str(RENAME_GETTER.replace("Widget", "Missing").as_str())
        .unwrap();

    quill()
        .arg("customize")
        .arg(script.child("customize.toml").path())
        .arg("--path")
        .arg(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Missing does not exist in package com.example"));
    temp.child(WIDGET_PATH).assert(WIDGET_SOURCE);
}

#[test]
fn unknown_script_keys_are_rejected() {
    let temp = TempDir::new().unwrap();
    let script = TempDir::new().unwrap();
    script
        .child("customize.toml")
        .write_str("[[operations]]\nkind = \"rename-class\"\n")
        .unwrap();

    quill()
        .arg("customize")
        .arg(script.child("customize.toml").path())
        .arg("--path")
        .arg(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to parse customization script"));
}
