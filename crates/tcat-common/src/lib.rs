//! # tcat Common
//!
//! Shared types, utilities, and common functionality for tcat.
//!
//! This crate provides the error type used by the configuration and CLI
//! layers, the key/path helpers shared by the catalog loaders, and (behind the
//! `testing` feature) fixtures for the other crates' test suites.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use types::*;
pub use utils::*;
