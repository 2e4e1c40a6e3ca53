//! Configuration loading from YAML, TOML or JSON files with environment overrides.

use crate::schema::Config;
use crate::validator::ConfigValidator;
use std::env;
use std::path::{Path, PathBuf};
use tcat_common::utils::file_extension;
use tcat_common::{Result as TcatResult, TcatError};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "TCAT_CONFIG_PATH";
/// Environment variable overriding `catalog.locale`.
pub const LOCALE_ENV: &str = "TCAT_LOCALE";
/// Environment variable overriding `logging.level`.
pub const LOG_LEVEL_ENV: &str = "TCAT_LOG_LEVEL";

/// File names probed in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 4] = ["tcat.yaml", "tcat.yml", "tcat.toml", "tcat.json"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension names no supported format
    #[error("Unsupported configuration file {}: expected .yaml, .yml, .toml or .json", .0.display())]
    UnsupportedFile(PathBuf),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Invalid(String),
}

impl From<ConfigError> for TcatError {
    fn from(err: ConfigError) -> Self {
        TcatError::config(err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load, override and validate the configuration at `path`.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let mut config = Self::parse_file(path.as_ref())?;
        Self::apply_env_overrides(&mut config);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from `TCAT_CONFIG_PATH`, then from the first
    /// `tcat.{yaml,yml,toml,json}` in the working directory, falling back to
    /// defaults.
    pub fn load() -> TcatResult<Config> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES.iter().map(Path::new).find(|path| path.exists()) {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TcatResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Parse a configuration file without overrides or validation.
    pub fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path.to_string_lossy();
        let config = match file_extension(&name) {
            Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => return Err(ConfigError::UnsupportedFile(path.to_path_buf())),
        };

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) {
        Self::apply_overrides(config, |var| env::var(var).ok());
    }

    /// Apply overrides read through `lookup`.
    pub fn apply_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(locale) = lookup(LOCALE_ENV).filter(|value| !value.is_empty()) {
            debug!("Overriding locale from {LOCALE_ENV}");
            config.catalog.locale = Some(locale);
        }

        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|value| !value.is_empty()) {
            debug!("Overriding log level from {LOG_LEVEL_ENV}");
            config.logging.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcat_common::test_utils::write_fixture;

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides(&mut config, |var| match var {
            LOCALE_ENV => Some("de-DE".to_string()),
            LOG_LEVEL_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.catalog.locale.as_deref(), Some("de-DE"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "tcat.ini", "level = debug");
        assert!(matches!(
            ConfigLoader::parse_file(&path),
            Err(ConfigError::UnsupportedFile(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::parse_file(Path::new("/nonexistent/tcat.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/tcat.yaml"));
    }

    #[test]
    fn test_error_converts_to_common_error() {
        let err: TcatError = ConfigError::Invalid("bad".to_string()).into();
        assert!(matches!(err, TcatError::Config(_)));
    }
}
