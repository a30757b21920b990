use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

use super::{quill, WIDGET_SOURCE};

#[test]
fn help_mentions_core_commands() {
    quill().arg("--help").assert().success().stdout(
        predicate::str::contains("generate")
            .and(predicate::str::contains("customize"))
            .and(predicate::str::contains("symbols")),
    );
}

#[test]
fn symbols_json_lists_declarations_with_containers() {
    let temp = TempDir::new().unwrap();
    temp.child("Widget.java").write_str(WIDGET_SOURCE).unwrap();

    let output = quill()
        .arg("symbols")
        .arg(temp.child("Widget.java").path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert!(
        rows.iter().any(|row| row["name"] == "Widget"
            && row["kind"] == "class"
            && row["line"] == 3
            && row["container"] == "com.example"),
        "{rows:#?}"
    );
    assert!(
        rows.iter()
            .any(|row| row["name"] == "getName()" && row["container"] == "Widget"),
        "{rows:#?}"
    );
}

#[test]
fn missing_file_exits_with_code_two() {
    let temp = TempDir::new().unwrap();
    quill()
        .arg("symbols")
        .arg(temp.child("Missing.java").path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read"));
}
