//! Building a bundle from configuration.

use crate::loader::ConfigError;
use crate::schema::{Config, SourceConfig};
use tcat_common::{Result, TcatError};
use tcat_i18n::{default_locale, parse_locale, Bundle, CatalogResult, LanguageIdentifier};
use tracing::info;

impl Config {
    /// The configured locale, or the process locale when none is set.
    pub fn locale(&self) -> std::result::Result<LanguageIdentifier, ConfigError> {
        match &self.catalog.locale {
            Some(tag) => parse_locale(tag)
                .ok_or_else(|| ConfigError::Invalid(format!("{tag:?} is not a valid locale tag"))),
            None => Ok(default_locale()),
        }
    }

    /// Create a bundle and load every configured source in order.
    pub fn build_bundle(&self) -> Result<Bundle> {
        let locale = self.locale()?;
        let bundle = Bundle::with_policy(locale, self.cache).map_err(TcatError::catalog)?;

        for source in &self.catalog.sources {
            load_source(&bundle, source).map_err(TcatError::catalog)?;
        }

        info!(
            locale = %bundle.locale(),
            sources = self.catalog.sources.len(),
            keys = bundle.len(),
            "Catalog ready"
        );
        Ok(bundle)
    }
}

/// Load one configured source into `bundle`.
pub fn load_source(bundle: &Bundle, source: &SourceConfig) -> CatalogResult<usize> {
    match source {
        SourceConfig::File { path } => bundle.load_file(path),
        SourceConfig::Dir { path } => bundle.load_dir(path),
        SourceConfig::Url { url, format } => bundle.load_url(url, format.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tcat_common::test_utils::write_fixture;

    #[test]
    fn test_build_bundle_loads_sources_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let base = write_fixture(dir.path(), "base.yaml", "title: Base\nfooter: Base footer\n");
        write_fixture(dir.path(), "i18n/fr/overrides.json", r#"{"title": "Titre"}"#);

        let mut config = Config::default();
        config.catalog.locale = Some("fr".to_string());
        config.catalog.sources = vec![
            SourceConfig::File { path: base },
            SourceConfig::Dir {
                path: dir.path().join("i18n"),
            },
        ];

        let bundle = config.build_bundle().unwrap();
        assert_eq!(bundle.locale().to_string(), "fr");
        assert_eq!(bundle.resolve("title", &[]).unwrap(), "Titre");
        assert_eq!(bundle.resolve("footer", &[]).unwrap(), "Base footer");
    }

    #[test]
    fn test_build_bundle_reports_failing_source() {
        let mut config = Config::default();
        config.catalog.locale = Some("en".to_string());
        config.catalog.sources = vec![SourceConfig::File {
            path: "/nonexistent/en.yaml".into(),
        }];

        let err = config.build_bundle().unwrap_err();
        assert!(matches!(err, TcatError::Catalog(_)));
        assert!(err.to_string().contains("/nonexistent/en.yaml"));
    }

    #[test]
    fn test_locale_parsing() {
        let mut config = Config::default();
        config.catalog.locale = Some("pt_BR".to_string());
        assert_eq!(config.locale().unwrap().to_string(), "pt-BR");

        config.catalog.locale = Some("???".to_string());
        assert!(config.locale().is_err());
    }
}
