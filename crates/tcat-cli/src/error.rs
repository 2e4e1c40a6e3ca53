//! Application-wide error types using thiserror.

use tcat_common::TcatError;
use tcat_i18n::CatalogError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] TcatError),

    /// Catalog loading or resolution error.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the CLI application.
pub type CliResult<T> = Result<T, CliError>;
