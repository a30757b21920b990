use std::path::{Path, PathBuf};
use std::sync::Once;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

/// Workspace configuration for Quill, read from `quill.toml`.
///
/// ```toml
/// [generator]
/// base_package = "com.example.widgets"
/// indent_width = 4
/// customization = "customization.toml"
///
/// [logging]
/// level = "debug"
/// json = false
/// stderr = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuillConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Global logging settings for Quill crates.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Replaces the package name of the code model when set.
    #[serde(default)]
    pub base_package: Option<String>,

    /// Spaces per indentation level in written files.
    #[serde(default = "GeneratorConfig::default_indent_width")]
    pub indent_width: usize,

    /// Customization script run over the generated sources, relative to the config file.
    #[serde(default)]
    pub customization: Option<PathBuf>,
}

impl GeneratorConfig {
    pub const MAX_INDENT_WIDTH: usize = 8;

    fn default_indent_width() -> usize {
        4
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_package: None,
            indent_width: Self::default_indent_width(),
            customization: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// A level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr. When disabled, logs are dropped.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            // Anything else is treated as an `EnvFilter` directive string.
            _ => trimmed.to_owned(),
        }
    }

    fn config_env_filter(&self) -> tracing_subscriber::EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        tracing_subscriber::EnvFilter::try_new(directives).unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::default()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        })
    }

    /// The effective filter: the configured level, with `RUST_LOG` merged in when set.
    pub fn env_filter(&self) -> tracing_subscriber::EnvFilter {
        let env_directives = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let config_directives = Self::normalize_level_directives(&self.level);

        match env_directives {
            Some(env_directives) => {
                let combined = format!("{config_directives},{env_directives}");
                tracing_subscriber::EnvFilter::try_new(combined)
                    .or_else(|_| tracing_subscriber::EnvFilter::try_new(env_directives))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            None => self.config_env_filter(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
    #[error("invalid config value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` includes a source snippet; keep just the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl QuillConfig {
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config: QuillConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from TOML. A relative `generator.customization` path is resolved
    /// against the directory holding the file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::load_from_str(&text)?;
        if let (Some(script), Some(dir)) = (&config.generator.customization, path.parent()) {
            if script.is_relative() {
                config.generator.customization = Some(dir.join(script));
            }
        }
        tracing::debug!(
            target = "quill.config",
            path = %path.display(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let width = self.generator.indent_width;
        if width == 0 || width > GeneratorConfig::MAX_INDENT_WIDTH {
            return Err(ConfigError::Invalid {
                key: "generator.indent_width",
                message: format!(
                    "expected 1..={}, got {width}",
                    GeneratorConfig::MAX_INDENT_WIDTH
                ),
            });
        }
        if let Some(package) = &self.generator.base_package {
            let valid = !package.is_empty()
                && package.split('.').all(|segment| {
                    segment
                        .chars()
                        .next()
                        .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_')
                        && segment.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
                });
            if !valid {
                return Err(ConfigError::Invalid {
                    key: "generator.base_package",
                    message: format!("{package:?} is not a Java package name"),
                });
            }
        }
        Ok(())
    }
}

pub const QUILL_CONFIG_ENV_VAR: &str = "QUILL_CONFIG_PATH";

/// Discover the Quill configuration file for a workspace root.
///
/// Search order:
/// 1) `QUILL_CONFIG_PATH` (absolute or relative to `workspace_root`)
/// 2) `quill.toml` in `workspace_root`
/// 3) `.quill.toml` in `workspace_root`
pub fn discover_config_path(workspace_root: &Path) -> Option<PathBuf> {
    if let Some(value) = std::env::var_os(QUILL_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            workspace_root.join(candidate)
        };
        return Some(path.canonicalize().unwrap_or(path));
    }

    ["quill.toml", ".quill.toml"]
        .into_iter()
        .map(|name| workspace_root.join(name))
        .find(|path| path.is_file())
        .map(|path| path.canonicalize().unwrap_or(path))
}

/// Load the Quill configuration for a workspace root.
///
/// If no config is present, returns [`QuillConfig::default`] and `None`.
pub fn load_for_workspace(
    workspace_root: &Path,
) -> Result<(QuillConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(workspace_root) else {
        return Ok((QuillConfig::default(), None));
    };

    let config = QuillConfig::load_from_path(&path)?;
    Ok((config, Some(path)))
}

static TRACING_INIT: Once = Once::new();

/// Initializes structured `tracing` logging.
///
/// Safe to call multiple times; only the first call installs a global subscriber.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();
        let make_writer = if config.stderr {
            BoxMakeWriter::new(std::io::stderr)
        } else {
            BoxMakeWriter::new(std::io::sink)
        };

        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!(
                target = "quill.config",
                level = %config.level,
                json = config.json,
                "tracing initialized"
            );
        }
    });
}
