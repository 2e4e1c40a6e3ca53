//! Key flattening: decoded trees to dotted-path catalog keys
//!
//! `{a: {b: [x, y]}}` becomes `a.b[0] -> x` and `a.b[1] -> y`. Numbers are
//! stored as their decimal text; nulls and booleans carry no message and are
//! skipped.

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::value::Value;
use tcat_common::utils::{index_key, join_key};
use tracing::trace;

/// Flatten `value` into `catalog` beneath `prefix`.
///
/// Returns the number of keys written.
pub fn flatten_into(catalog: &mut Catalog, prefix: &str, value: &Value) -> usize {
    match value {
        Value::String(text) => {
            catalog.insert(prefix, text.as_str());
            1
        }
        Value::Integer(i) => {
            catalog.insert(prefix, i.to_string());
            1
        }
        Value::Float(f) => {
            catalog.insert(prefix, f.to_string());
            1
        }
        Value::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| flatten_into(catalog, &index_key(prefix, i), item))
            .sum(),
        Value::Map(entries) => entries
            .iter()
            .map(|(key, item)| flatten_into(catalog, &join_key(prefix, key), item))
            .sum(),
        Value::Null | Value::Bool(_) => {
            trace!(key = prefix, kind = value.kind(), "skipping leaf without message text");
            0
        }
    }
}

/// Check that a decoded document can be ingested.
///
/// The root must be a list or a map; scalars have no key to live under.
pub fn check_shape(root: &Value) -> CatalogResult<()> {
    match root {
        Value::List(_) | Value::Map(_) => Ok(()),
        other => Err(CatalogError::IncorrectDecodedShape(other.kind())),
    }
}

/// Flatten a whole decoded document into `catalog`, returning the number of
/// keys written.
pub fn ingest_document(catalog: &mut Catalog, root: &Value) -> CatalogResult<usize> {
    check_shape(root)?;
    Ok(flatten_into(catalog, "", root))
}
