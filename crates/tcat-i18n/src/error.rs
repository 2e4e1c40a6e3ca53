//! Error types for catalog loading and resolution

use crate::format::Format;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by a format decoder.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The YAML document could not be parsed
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// The TOML document could not be parsed
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// The JSON document could not be parsed
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The document is not valid UTF-8 (TOML only)
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Errors raised while parsing or executing a message template.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The raw message is not a valid template
    #[error("template: {name}: {message}")]
    Parse {
        /// Template name, which is the message key
        name: String,
        /// The parser's description of the problem
        message: String,
    },

    /// The template could not be evaluated against the supplied params
    #[error("template: {name}: {message}")]
    Exec {
        /// Template name, which is the message key
        name: String,
        /// The executor's description of the problem
        message: String,
    },

    /// Writing rendered output to the sink failed
    #[error("template: {name}: write failed: {source}")]
    Write {
        /// Template name, which is the message key
        name: String,
        /// The sink's error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while loading or resolving catalog entries
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Zero-length input
    #[error("empty input")]
    Empty,

    /// A format hint that is not one of yaml, yml, toml, json
    #[error("unsupported format: {0:?}")]
    UnsupportedFormat(String),

    /// No format hint could be derived
    #[error("unknown format: no file extension to derive it from")]
    UnknownFormat,

    /// The path does not exist
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// A file was expected but the path names a directory
    #[error("target path is a directory: {}", .0.display())]
    TargetIsDirectory(PathBuf),

    /// A directory was expected but the path names a regular file
    #[error("target path is a regular file: {}", .0.display())]
    TargetIsRegularFile(PathBuf),

    /// The decoded document root is neither a list nor a map
    #[error("decoded document root must be a list or a map, found {0}")]
    IncorrectDecodedShape(&'static str),

    /// The key is absent from the catalog
    #[error("translation not found: locale {locale} key {key:?}")]
    NotFound {
        /// Locale of the bundle that was asked
        locale: String,
        /// The missing key
        key: String,
    },

    /// A remote URL whose scheme is neither http nor https
    #[error("incorrect remote protocol {0:?}, expected http or https")]
    IncorrectProtocol(String),

    /// A remote URL that cannot be parsed
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A cache capacity of zero
    #[error("cache capacity must be greater than zero")]
    InvalidCapacity,

    /// The decoder rejected the document
    #[error("decoding {format} failed: {source}")]
    Decode {
        /// Format the document was decoded as
        format: Format,
        /// The decoder's error
        #[source]
        source: DecodeError,
    },

    /// A caller-supplied decoder rejected the document
    #[error("decoding failed: {0}")]
    CustomDecode(#[source] DecodeError),

    /// The message template failed to compile or render
    #[error("rendering {key:?} failed: {source}")]
    Template {
        /// Key of the message being rendered
        key: String,
        /// The template error
        #[source]
        source: TemplateError,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A loader failure annotated with the operation and its target
    #[error("{op}: {target}: {source}")]
    Load {
        /// The loader operation, e.g. `load file`
        op: &'static str,
        /// Path or URL being loaded
        target: String,
        /// The underlying failure
        #[source]
        source: Box<CatalogError>,
    },
}

impl CatalogError {
    /// Annotate an error with the loader operation and the path or URL involved.
    pub fn in_load(self, op: &'static str, target: impl Into<String>) -> Self {
        Self::Load {
            op,
            target: target.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through any [`CatalogError::Load`] wrappers.
    pub fn root(&self) -> &Self {
        let mut err = self;
        while let Self::Load { source, .. } = err {
            err = source.as_ref();
        }
        err
    }

    /// Whether the root cause is a missing translation key.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound { .. })
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
