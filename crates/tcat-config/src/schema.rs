//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tcat_i18n::ResizePolicy;

/// Main configuration structure for tcat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which catalogs to load and for which locale.
    pub catalog: CatalogConfig,
    /// Message cache sizing.
    pub cache: ResizePolicy,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Locale tag such as `en-US`; the process locale when unset.
    pub locale: Option<String>,
    /// Sources loaded in order; later sources override earlier keys.
    pub sources: Vec<SourceConfig>,
}

/// A single catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// One catalog file; the format comes from its extension.
    File {
        /// Path to the file.
        path: PathBuf,
    },
    /// A directory holding a `<locale>/` tree or `<locale>.<ext>` files.
    Dir {
        /// Path to the directory.
        path: PathBuf,
    },
    /// A remote catalog fetched over HTTP.
    Url {
        /// The URL; `http://` is assumed when no scheme is given.
        url: String,
        /// Format hint; derived from the URL path when unset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for tcat crates, overridden by `RUST_LOG`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}
