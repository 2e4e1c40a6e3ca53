//! Test utilities and shared test helpers for tcat.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use std::path::{Path, PathBuf};
use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `contents` to `relative` beneath `root`, creating parent directories.
///
/// Returns the full path of the written file.
pub fn write_fixture(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}

/// Catalog documents shared by the loader and bundle test suites.
pub mod catalog_fixtures {
    /// A nested YAML catalog whose leaves sit under integer keys.
    pub fn nested_yaml() -> &'static str {
        r"
a:
  b:
    1: b1
    2: b2
    3: b3
    c:
      1: c1
      2: c2
"
    }

    /// The flattened keys and values produced by [`nested_yaml`].
    pub fn nested_expected() -> Vec<(&'static str, &'static str)> {
        vec![
            ("a.b.1", "b1"),
            ("a.b.2", "b2"),
            ("a.b.3", "b3"),
            ("a.b.c.1", "c1"),
            ("a.b.c.2", "c2"),
        ]
    }

    /// The same catalog as [`nested_yaml`], expressed as JSON.
    pub fn nested_json() -> &'static str {
        r#"{"a": {"b": {"1": "b1", "2": "b2", "3": "b3", "c": {"1": "c1", "2": "c2"}}}}"#
    }

    /// The same catalog as [`nested_yaml`], expressed as TOML.
    pub fn nested_toml() -> &'static str {
        concat!(
            "[a.b]\n",
            "1 = \"b1\"\n",
            "2 = \"b2\"\n",
            "3 = \"b3\"\n",
            "\n",
            "[a.b.c]\n",
            "1 = \"c1\"\n",
            "2 = \"c2\"\n",
        )
    }

    /// A catalog with templated messages, lists, and numeric leaves.
    pub fn templated_yaml() -> &'static str {
        r#"
greet: "Hello, {{ .name }}!"
inbox:
  unread: "{{ .user.name }} has {{ .count }} unread messages"
menu:
  - Open
  - Save
  - label: Quit
limits:
  retries: 3
  ratio: 1.5
  enabled: true
"#
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for generating map keys that never contain separators.
    pub fn key_segment_strategy() -> impl Strategy<Value = String> {
        r"[a-z][a-z0-9_]{0,8}".prop_map(|s| s.to_string())
    }

    /// Strategy for generating leaf message text.
    pub fn message_text_strategy() -> impl Strategy<Value = String> {
        r"[A-Za-z0-9 ,!?']{0,24}".prop_map(|s| s.to_string())
    }
}
