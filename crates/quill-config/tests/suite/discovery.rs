use std::ffi::OsString;
use std::sync::Mutex;

use quill_config::{discover_config_path, load_for_workspace, QuillConfig, QUILL_CONFIG_ENV_VAR};
use tempfile::tempdir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct EnvVarGuard {
    key: &'static str,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: &std::path::Path) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value);
        Self { key, prev }
    }

    fn unset(key: &'static str) -> Self {
        let prev = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn discovers_quill_toml_in_workspace_root() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(QUILL_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("quill.toml");
    std::fs::write(&config_path, "[logging]\nlevel = \"warn\"\n").unwrap();

    let discovered = discover_config_path(dir.path()).expect("quill.toml should be discovered");
    assert_eq!(discovered, config_path.canonicalize().unwrap_or(config_path));
}

#[test]
fn hidden_config_is_the_fallback() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(QUILL_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(".quill.toml"), "[generator]\nindent_width = 2\n").unwrap();

    let (config, path) = load_for_workspace(dir.path()).unwrap();
    assert!(path.is_some_and(|path| path.ends_with(".quill.toml")));
    assert_eq!(config.generator.indent_width, 2);
}

#[test]
fn env_override_wins_over_workspace_file() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");

    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("quill.toml"), "[logging]\nlevel = \"warn\"\n").unwrap();
    let override_path = dir.path().join("override.toml");
    std::fs::write(&override_path, "[logging]\nlevel = \"debug\"\n").unwrap();
    let _env = EnvVarGuard::set(QUILL_CONFIG_ENV_VAR, &override_path);

    let (config, path) = load_for_workspace(dir.path()).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        path,
        Some(override_path.canonicalize().unwrap_or(override_path))
    );
}

#[test]
fn no_config_means_defaults() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(QUILL_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    let (config, path) = load_for_workspace(dir.path()).unwrap();
    assert_eq!(config, QuillConfig::default());
    assert_eq!(path, None);
}
