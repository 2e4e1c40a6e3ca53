//! Default values for configuration sections.

use crate::schema::LoggingConfig;

/// Default log level for tcat crates.
pub const DEFAULT_LOG_LEVEL: &str = "info";

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}
