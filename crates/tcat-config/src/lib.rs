//! # tcat config
//!
//! Type-safe configuration for tcat.
//!
//! This crate loads configuration from YAML, TOML or JSON files, applies
//! environment overrides, validates the result and builds a ready-to-use
//! [`tcat_i18n::Bundle`] from the configured catalog sources.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use builder::*;
pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
