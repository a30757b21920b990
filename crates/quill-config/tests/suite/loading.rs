use pretty_assertions::assert_eq;
use quill_config::{ConfigError, QuillConfig};
use tempfile::tempdir;

#[test]
fn parses_generator_and_logging_sections() {
    let text = r#"
[generator]
base_package = "com.example.widgets"
indent_width = 2

[logging]
level = "debug"
json = true
stderr = false
"#;
    let config = QuillConfig::load_from_str(text).expect("config should parse");
    assert_eq!(
        config.generator.base_package.as_deref(),
        Some("com.example.widgets")
    );
    assert_eq!(config.generator.indent_width, 2);
    assert_eq!(config.generator.customization, None);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    assert!(!config.logging.stderr);
}

#[test]
fn rejects_out_of_range_indent_width() {
    let err = QuillConfig::load_from_str("[generator]\nindent_width = 0\n").unwrap_err();
    assert!(
        matches!(err, ConfigError::Invalid { key: "generator.indent_width", .. }),
        "{err}"
    );
    let err = QuillConfig::load_from_str("[generator]\nindent_width = 12\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }), "{err}");
}

#[test]
fn rejects_malformed_base_package() {
    let err = QuillConfig::load_from_str("[generator]\nbase_package = \"com..example\"\n")
        .unwrap_err();
    assert!(
        matches!(err, ConfigError::Invalid { key: "generator.base_package", .. }),
        "{err}"
    );
}

#[test]
fn type_errors_are_reported_without_the_source_snippet() {
    let err = QuillConfig::load_from_str("[logging]\njson = \"yes\"\n").unwrap_err();
    let ConfigError::Toml(message) = err else {
        panic!("expected a toml error, got {err:?}");
    };
    assert!(!message.contains("json = "), "{message}");
}

#[test]
fn customization_path_is_relative_to_the_config_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("quill.toml");
    std::fs::write(
        &config_path,
        "[generator]\ncustomization = \"scripts/customize.toml\"\n",
    )
    .unwrap();

    let config = QuillConfig::load_from_path(&config_path).unwrap();
    assert_eq!(
        config.generator.customization,
        Some(dir.path().join("scripts/customize.toml"))
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = QuillConfig::load_from_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "{err}");
}
