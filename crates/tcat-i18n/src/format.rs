//! Format routing: file extensions and hints to decoders

use crate::error::{CatalogError, CatalogResult, DecodeError};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hints accepted by [`resolve_format`], in directory-scan order.
pub const RECOGNIZED_EXTENSIONS: [&str; 4] = ["yaml", "yml", "json", "toml"];

/// A decoder signature: raw document bytes in, format-independent tree out.
pub type DecodeFn = fn(&[u8]) -> Result<Value, DecodeError>;

/// Catalog document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// YAML, from either a `yaml` or a `yml` hint
    #[serde(alias = "yml")]
    Yaml,
    /// TOML
    Toml,
    /// JSON
    Json,
}

impl Format {
    /// Canonical name of the format
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    /// Decode `bytes` with this format's decoder.
    pub fn decode(self, bytes: &[u8]) -> CatalogResult<Value> {
        decoder_for(self)(bytes).map_err(|source| CatalogError::Decode {
            format: self,
            source,
        })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_format(s)
    }
}

/// Resolve a format hint. Matching is exact and case-sensitive.
pub fn resolve_format(hint: &str) -> CatalogResult<Format> {
    match hint {
        "yaml" | "yml" => Ok(Format::Yaml),
        "toml" => Ok(Format::Toml),
        "json" => Ok(Format::Json),
        other => Err(CatalogError::UnsupportedFormat(other.to_string())),
    }
}

/// The decoder for a resolved format.
pub fn decoder_for(format: Format) -> DecodeFn {
    match format {
        Format::Yaml => decode_yaml,
        Format::Toml => decode_toml,
        Format::Json => decode_json,
    }
}

/// Decode a YAML document.
pub fn decode_yaml(bytes: &[u8]) -> Result<Value, DecodeError> {
    let doc: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
    Ok(doc.into())
}

/// Decode a TOML document. TOML is text-only, so the bytes must be UTF-8.
pub fn decode_toml(bytes: &[u8]) -> Result<Value, DecodeError> {
    let text = std::str::from_utf8(bytes)?;
    let doc: toml::Value = toml::from_str(text)?;
    Ok(doc.into())
}

/// Decode a JSON document.
pub fn decode_json(bytes: &[u8]) -> Result<Value, DecodeError> {
    let doc: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(doc.into())
}
