//! Board client configuration.
//!
//! # Responsibility
//! - Describe the options the embedding client passes at construction.
//! - Validate logging options before the backend is started.
//!
//! # Invariants
//! - A validated `LoggingConfig` always has a known level and absolute dir.
//! - `BoardConfig::data_location` always starts with `/`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_DATA_LOCATION: &str = "/data";

/// Invalid configuration input.
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    UnsupportedLogLevel(String),
    EmptyLogDir,
    RelativeLogDir(String),
    InvalidDataLocation(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed config: {err}"),
            Self::UnsupportedLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(dir) => {
                write!(f, "log_dir must be an absolute path, got `{dir}`")
            }
            Self::InvalidDataLocation(location) => {
                write!(f, "data_location must start with `/`, got `{location}`")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Options for one board session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Rejects local edits; inbound pushes still apply.
    pub readonly: bool,
    /// When off, transitions are still classified and logged but the
    /// notifier is not called.
    pub notifications_enabled: bool,
    /// Server path prefix for board resources, e.g. `/data`.
    pub data_location: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            readonly: false,
            notifications_enabled: true,
            data_location: DEFAULT_DATA_LOCATION.to_string(),
        }
    }
}

impl BoardConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.data_location.starts_with('/') {
            return Err(ConfigError::InvalidDataLocation(
                self.data_location.clone(),
            ));
        }
        Ok(())
    }

    /// Resource path for notes, e.g. `/data/stories/`.
    pub fn stories_url(&self) -> String {
        format!("{}/stories/", self.data_location.trim_end_matches('/'))
    }

    /// Resource path for lists, e.g. `/data/lists/`.
    pub fn lists_url(&self) -> String {
        format!("{}/lists/", self.data_location.trim_end_matches('/'))
    }
}

/// Validated options for the file logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: &'static str,
    log_dir: PathBuf,
}

impl LoggingConfig {
    /// # Errors
    /// - `UnsupportedLogLevel` for anything but trace|debug|info|warn|error.
    /// - `EmptyLogDir` / `RelativeLogDir` for unusable directories.
    pub fn new(level: &str, log_dir: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir)?,
        })
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Returns the default log level for current build mode.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str, ConfigError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(ConfigError::UnsupportedLogLevel(other.to_string())),
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyLogDir);
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(ConfigError::RelativeLogDir(trimmed.to_string()));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{BoardConfig, ConfigError, LoggingConfig};

    #[test]
    fn board_config_defaults_fill_missing_fields() {
        let config = BoardConfig::from_json_str(r#"{"readonly": true}"#).unwrap();
        assert!(config.readonly);
        assert!(config.notifications_enabled);
        assert_eq!(config.stories_url(), "/data/stories/");
        assert_eq!(config.lists_url(), "/data/lists/");
    }

    #[test]
    fn board_config_rejects_relative_data_location() {
        let err = BoardConfig::from_json_str(r#"{"data_location": "data"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDataLocation(_)));
    }

    #[test]
    fn logging_config_normalizes_level_and_rejects_relative_dir() {
        let dir = std::env::temp_dir();
        let config = LoggingConfig::new(" WARNING ", dir.to_str().unwrap()).unwrap();
        assert_eq!(config.level(), "warn");

        let err = LoggingConfig::new("info", "logs/dev").unwrap_err();
        assert!(err.to_string().contains("absolute"));
        assert!(matches!(
            LoggingConfig::new("loud", dir.to_str().unwrap()),
            Err(ConfigError::UnsupportedLogLevel(_))
        ));
    }
}
