//! Command line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tcat_config::{Config, SourceConfig};
use tcat_i18n::Params;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Locale to resolve against, overriding configuration
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Extra catalog directory, loaded after configured sources
    #[arg(long = "dir", value_name = "PATH")]
    pub dirs: Vec<PathBuf>,

    /// Extra catalog file, loaded after configured sources
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Extra remote catalog, loaded after configured sources
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Log level, overriding configuration
    #[arg(long)]
    pub log_level: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// What to do with the loaded catalog.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Render a message, failing if the key is missing
    Get {
        /// Dotted message key
        key: String,
        /// Template parameter as NAME=VALUE; VALUE is parsed as JSON when possible
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, serde_json::Value)>,
    },
    /// Render a message, printing a placeholder if the key is missing
    Try {
        /// Dotted message key
        key: String,
        /// Template parameter as NAME=VALUE; VALUE is parsed as JSON when possible
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, serde_json::Value)>,
    },
    /// List every key in the catalog
    Keys,
    /// Show catalog and cache statistics
    Stats,
}

impl Args {
    /// Fold command line overrides into `config`.
    ///
    /// Sources given on the command line are appended, so they win over
    /// configured ones for duplicate keys.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(locale) = &self.locale {
            config.catalog.locale = Some(locale.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        let sources = &mut config.catalog.sources;
        sources.extend(self.dirs.iter().cloned().map(|path| SourceConfig::Dir { path }));
        sources.extend(self.files.iter().cloned().map(|path| SourceConfig::File { path }));
        sources.extend(self.urls.iter().cloned().map(|url| SourceConfig::Url { url, format: None }));
    }
}

impl Command {
    /// Template parameters passed to `get` or `try`.
    pub fn params(&self) -> Params {
        match self {
            Self::Get { params, .. } | Self::Try { params, .. } => params.iter().cloned().collect(),
            Self::Keys | Self::Stats => Params::new(),
        }
    }
}

/// Parse a `NAME=VALUE` parameter.
///
/// VALUE is read as JSON when it parses, so `count=3` yields a number and
/// `tags=["a","b"]` a list; anything else is kept as a string.
pub fn parse_param(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter {raw:?}: expected NAME=VALUE"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid parameter {raw:?}: empty name"));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((name.to_string(), value))
}
