//! Integration tests for tcat-common crate.

use std::error::Error;
use tcat_common::{file_extension, index_key, join_key, strip_locale_suffix, TcatError};

#[test]
fn test_config_error_display() {
    let err = TcatError::config("cache.large_divisor must be greater than zero");
    assert_eq!(
        err.to_string(),
        "Configuration error: cache.large_divisor must be greater than zero"
    );
}

#[test]
fn test_catalog_error_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "locales/zh-Hans.yaml");
    let err = TcatError::catalog(io);
    assert_eq!(err.to_string(), "Catalog error: locales/zh-Hans.yaml");
    assert!(err.source().is_some());
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: TcatError = io.into();
    assert!(matches!(err, TcatError::Io(_)));
}

#[test]
fn test_key_helpers_compose() {
    let key = join_key(&index_key(&join_key("", "menu"), 1), "label");
    assert_eq!(key, "menu[1].label");
}

#[test]
fn test_file_extension_ignores_directory_dots() {
    assert_eq!(file_extension("v1.2/en"), None);
    assert_eq!(file_extension("v1.2/en.yml"), Some("yml"));
}

#[test]
fn test_strip_locale_suffix_keeps_region() {
    assert_eq!(strip_locale_suffix("pt_BR.ISO-8859-1"), Some("pt_BR"));
}
