//! Common error and result types.

/// Common result type for the configuration and CLI layers.
pub type Result<T> = std::result::Result<T, TcatError>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum TcatError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog loading or resolution error.
    #[error("Catalog error: {0}")]
    Catalog(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TcatError {
    /// Builds a configuration error from anything displayable.
    pub fn config(message: impl std::fmt::Display) -> Self {
        Self::Config(message.to_string())
    }

    /// Wraps a catalog error, keeping it as the source.
    pub fn catalog(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Catalog(Box::new(err))
    }
}
