//! Shared helpers for catalog keys and file names.

/// Returns the text after the last `.` of a file name, if there is one.
///
/// Only the final path component is considered, so `dir.v2/strings` has no
/// extension while `dir/strings.v2.yaml` has `yaml`.
pub fn file_extension(name: &str) -> Option<&str> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.rsplit_once('.').map(|(_, ext)| ext)
}

/// Joins a map key onto a flattened prefix with a `.` separator.
pub fn join_key(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Appends a list index to a flattened prefix, e.g. `menu[2]`.
pub fn index_key(prefix: &str, index: usize) -> String {
    format!("{prefix}[{index}]")
}

/// Strips the encoding and modifier suffixes from a POSIX locale string.
///
/// `zh_CN.UTF-8@pinyin` becomes `zh_CN`. Returns `None` for empty values and
/// for the `C`/`POSIX` pseudo-locales, which name no language.
pub fn strip_locale_suffix(raw: &str) -> Option<&str> {
    let name = raw.split(['.', '@']).next().unwrap_or_default().trim();
    match name {
        "" | "C" | "POSIX" => None,
        _ => Some(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("zh-Hans.yaml"), Some("yaml"));
        assert_eq!(file_extension("menu.v2.toml"), Some("toml"));
        assert_eq!(file_extension("locales/en/main.json"), Some("json"));
        assert_eq!(file_extension("locales.d/README"), None);
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension("trailing."), Some(""));
    }

    #[test]
    fn test_join_key() {
        assert_eq!(join_key("", "greeting"), "greeting");
        assert_eq!(join_key("menu", "file"), "menu.file");
        assert_eq!(join_key("menu[0]", "label"), "menu[0].label");
    }

    #[test]
    fn test_index_key() {
        assert_eq!(index_key("", 0), "[0]");
        assert_eq!(index_key("items", 3), "items[3]");
        assert_eq!(index_key("grid[1]", 2), "grid[1][2]");
    }

    #[test]
    fn test_strip_locale_suffix() {
        assert_eq!(strip_locale_suffix("zh_CN.UTF-8"), Some("zh_CN"));
        assert_eq!(strip_locale_suffix("de_DE@euro"), Some("de_DE"));
        assert_eq!(strip_locale_suffix("en_US.UTF-8@latin"), Some("en_US"));
        assert_eq!(strip_locale_suffix("C.UTF-8"), None);
        assert_eq!(strip_locale_suffix("POSIX"), None);
        assert_eq!(strip_locale_suffix(""), None);
    }
}
