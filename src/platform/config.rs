// ContentCal - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for ContentCal configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/contentcal/ or %APPDATA%\ContentCal\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[search]` section.
    pub search: SearchSection,
    /// `[source]` section.
    pub source: SourceSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[search]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Maximum records returned per search.
    pub result_limit: Option<usize>,
}

/// `[source]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// Largest CSV export accepted, in bytes.
    pub max_file_size_bytes: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Maximum records returned per search.
    pub result_limit: usize,
    /// Largest CSV export accepted, in bytes.
    pub max_source_file_size: u64,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            result_limit: constants::DEFAULT_RESULT_LIMIT,
            max_source_file_size: constants::DEFAULT_MAX_SOURCE_FILE_SIZE,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// problems. If the file does not exist, returns defaults with no warnings
/// (first run). If the file is unreadable or unparseable, returns defaults
/// and the error; the tool still runs but the user is told.
///
/// Called before logging is initialised (the log level lives here), so
/// problems are returned rather than logged.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut warnings: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let mut config = AppConfig::default();

    // -- Search: result_limit --
    if let Some(limit) = raw.search.result_limit {
        if (constants::MIN_RESULT_LIMIT..=constants::MAX_RESULT_LIMIT).contains(&limit) {
            config.result_limit = limit;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[search] result_limit".to_string(),
                value: limit.to_string(),
                expected: format!(
                    "{}-{} (using default {})",
                    constants::MIN_RESULT_LIMIT,
                    constants::MAX_RESULT_LIMIT,
                    constants::DEFAULT_RESULT_LIMIT,
                ),
            });
        }
    }

    // -- Source: max_file_size_bytes --
    if let Some(size) = raw.source.max_file_size_bytes {
        if (constants::MIN_SOURCE_FILE_SIZE..=constants::ABSOLUTE_MAX_SOURCE_FILE_SIZE)
            .contains(&size)
        {
            config.max_source_file_size = size;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[source] max_file_size_bytes".to_string(),
                value: size.to_string(),
                expected: format!(
                    "{}-{} (using default {})",
                    constants::MIN_SOURCE_FILE_SIZE,
                    constants::ABSOLUTE_MAX_SOURCE_FILE_SIZE,
                    constants::DEFAULT_MAX_SOURCE_FILE_SIZE,
                ),
            });
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[logging] level".to_string(),
                value: level.clone(),
                expected: "error, warn, info, debug, trace (using default info)".to_string(),
            });
        }
    }

    (config, warnings)
}
