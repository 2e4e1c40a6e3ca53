//! # tcat
//!
//! Command-line front end for tcat translation catalogs.
//!
//! Loads configuration, builds a [`tcat_i18n::Bundle`] from the configured
//! sources and resolves, lists or inspects messages from it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use cli::*;
pub use commands::*;
pub use error::*;
pub use logging::*;
