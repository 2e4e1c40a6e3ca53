//! Runtime validation of loaded configuration.

use crate::loader::ConfigError;
use crate::schema::{Config, SourceConfig};
use tracing::level_filters::LevelFilter;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every problem at once.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let problems = Self::problems(config);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }

    /// Every problem found in `config`, in field order.
    pub fn problems(config: &Config) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(locale) = &config.catalog.locale {
            if tcat_i18n::parse_locale(locale).is_none() {
                problems.push(format!("catalog.locale {locale:?} is not a valid locale tag"));
            }
        }

        for (i, source) in config.catalog.sources.iter().enumerate() {
            if let Err(problem) = validate_source(source) {
                problems.push(format!("catalog.sources[{i}]: {problem}"));
            }
        }

        let cache = &config.cache;
        for (field, value) in [
            ("initial_capacity", cache.initial_capacity),
            ("small_divisor", cache.small_divisor),
            ("large_divisor", cache.large_divisor),
            ("min_capacity", cache.min_capacity),
        ] {
            if value == 0 {
                problems.push(format!("cache.{field} must be greater than 0"));
            }
        }

        if config.logging.level.parse::<LevelFilter>().is_err() {
            problems.push(format!("logging.level {:?} is not a log level", config.logging.level));
        }

        problems
    }
}

/// Validate a single catalog source
pub fn validate_source(source: &SourceConfig) -> Result<(), String> {
    match source {
        SourceConfig::File { path } | SourceConfig::Dir { path } if path.as_os_str().is_empty() => {
            Err("path cannot be empty".to_string())
        }
        SourceConfig::File { .. } | SourceConfig::Dir { .. } => Ok(()),
        SourceConfig::Url { url, .. } if url.trim().is_empty() => Err("url cannot be empty".to_string()),
        SourceConfig::Url {
            format: Some(format), ..
        } => tcat_i18n::resolve_format(format).map(|_| ()).map_err(|err| err.to_string()),
        SourceConfig::Url { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_all_problems_reported() {
        let mut config = Config::default();
        config.catalog.locale = Some("not a locale".to_string());
        config.cache.large_divisor = 0;
        config.cache.initial_capacity = 0;
        config.logging.level = "loud".to_string();
        config.catalog.sources = vec![
            SourceConfig::Dir { path: PathBuf::new() },
            SourceConfig::Url {
                url: "example.com/en.yaml".to_string(),
                format: Some("xml".to_string()),
            },
        ];

        let problems = ConfigValidator::problems(&config);
        assert_eq!(problems.len(), 6, "{problems:?}");
        assert!(problems[1].starts_with("catalog.sources[0]"));
        assert!(problems[2].contains("unsupported format"));
    }

    #[test]
    fn test_valid_sources() {
        assert!(validate_source(&SourceConfig::File {
            path: "i18n/en-US.yaml".into()
        })
        .is_ok());
        assert!(validate_source(&SourceConfig::Url {
            url: "https://example.com/en.json".to_string(),
            format: None,
        })
        .is_ok());
        assert!(validate_source(&SourceConfig::Url {
            url: " ".to_string(),
            format: None,
        })
        .is_err());
    }

    #[test]
    fn test_log_levels() {
        for level in ["trace", "DEBUG", "info", "warn", "error", "off"] {
            let mut config = Config::default();
            config.logging.level = level.to_string();
            assert!(ConfigValidator::validate(&config).is_ok(), "{level}");
        }
    }
}
