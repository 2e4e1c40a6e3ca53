//! Translation catalogs for tcat
//!
//! This crate loads hierarchical localization documents into a flat
//! key → message table and resolves keys to rendered strings. It includes:
//!
//! - YAML, TOML and JSON decoding into one [`Value`] tree
//! - Flattening into dotted keys (`menu.items[2].label`)
//! - Loading from files, directories, buffers, readers, HTTP and embedded trees
//! - A bounded LRU cache that follows the catalog size
//! - Lazily compiled `{{ .field }}` message templates
//!
//! # Example
//!
//! ```rust
//! use tcat_i18n::{params, Bundle};
//!
//! # fn example() -> Result<(), tcat_i18n::CatalogError> {
//! let bundle = Bundle::new("en-US".parse().unwrap());
//! bundle.load_bytes(b"greet: \"Hello, {{ .name }}!\"", "yaml")?;
//!
//! let params = params! { "name" => "world" };
//! assert_eq!(bundle.resolve("greet", &[Some(&params)])?, "Hello, world!");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bundle;
pub mod cache;
pub mod catalog;
pub mod error;
pub mod flatten;
pub mod format;
pub mod global;
mod loader;
pub mod locale;
pub mod message;
pub mod params;
pub mod template;
pub mod value;
pub mod vfs;

pub use bundle::{Bundle, NotFoundHandler};
pub use cache::{MessageCache, ResizePolicy};
pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult, DecodeError, TemplateError};
pub use flatten::{flatten_into, ingest_document};
pub use format::{decode_json, decode_toml, decode_yaml, decoder_for, resolve_format, DecodeFn, Format};
pub use global::{global, install_global};
pub use locale::{default_locale, parse_locale, system_locale};
pub use message::{Message, TemplateState};
pub use params::{merge_params, Params};
pub use template::Template;
pub use unic_langid::LanguageIdentifier;
pub use value::Value;
pub use vfs::{MemoryFs, VfsEntry, VirtualFs};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
