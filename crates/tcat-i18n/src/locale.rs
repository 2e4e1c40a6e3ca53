//! Locale parsing and detection

use tcat_common::utils::strip_locale_suffix;
use tracing::debug;
use unic_langid::LanguageIdentifier;

/// Environment variables consulted by [`system_locale`], highest priority first.
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Locale used when nothing else can be determined
pub const FALLBACK_LOCALE: &str = "en-US";

/// Parse a locale tag, accepting POSIX underscores (`zh_CN`) as well as BCP 47
/// hyphens (`zh-CN`).
pub fn parse_locale(tag: &str) -> Option<LanguageIdentifier> {
    tag.trim().replace('_', "-").parse().ok()
}

/// The first usable locale among raw POSIX locale values.
pub fn detect_locale<I, S>(values: I) -> Option<LanguageIdentifier>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flatten()
        .find_map(|raw| strip_locale_suffix(raw.as_ref()).and_then(parse_locale))
}

fn fallback_locale() -> LanguageIdentifier {
    parse_locale(FALLBACK_LOCALE).unwrap_or_default()
}

/// The locale of the running process, from `LC_ALL`, `LC_MESSAGES` or `LANG`,
/// falling back to `en-US`.
pub fn system_locale() -> LanguageIdentifier {
    let detected = detect_locale(LOCALE_ENV_VARS.iter().map(|var| std::env::var(var).ok()));
    match detected {
        Some(locale) => locale,
        None => {
            debug!("no usable locale in environment, using {FALLBACK_LOCALE}");
            fallback_locale()
        }
    }
}

/// Locale used when configuration names none.
pub fn default_locale() -> LanguageIdentifier {
    system_locale()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale_accepts_underscores() {
        assert_eq!(parse_locale("zh_CN").unwrap().to_string(), "zh-CN");
        assert_eq!(parse_locale("zh-Hans").unwrap().to_string(), "zh-Hans");
        assert!(parse_locale("not a locale").is_none());
    }

    #[test]
    fn test_detect_skips_unusable_values() {
        let values = [None, Some(""), Some("C"), Some("POSIX.UTF-8"), Some("de_DE.UTF-8@euro")];
        assert_eq!(detect_locale(values).unwrap().to_string(), "de-DE");
    }

    #[test]
    fn test_detect_prefers_first_value() {
        let values = [Some("fr_FR.UTF-8"), Some("en_US.UTF-8")];
        assert_eq!(detect_locale(values).unwrap().to_string(), "fr-FR");
    }

    #[test]
    fn test_detect_nothing() {
        assert!(detect_locale::<_, &str>([None, Some("C")]).is_none());
    }

    #[test]
    fn test_fallback_is_en_us() {
        assert_eq!(fallback_locale().to_string(), "en-US");
    }
}
