//! Template data supplied at resolution time

/// Template data: a JSON object whose fields are visible to `{{ .field }}` actions.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Merge parameter sets left to right.
///
/// Later sets override keys of earlier ones, `None` entries are skipped, and
/// an all-`None` (or empty) slice yields an empty map.
pub fn merge_params(params: &[Option<&Params>]) -> Params {
    let mut merged = Params::new();
    for set in params.iter().flatten() {
        for (key, value) in *set {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Build a [`Params`] map from `key => value` pairs.
///
/// Values are anything [`serde_json::json!`] accepts.
///
/// ```
/// use tcat_i18n::params;
///
/// let params = params! {
///     "name" => "Ada",
///     "count" => 3,
/// };
/// assert_eq!(params["name"], "Ada");
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::new();
        $(
            params.insert(::std::string::String::from($key), $crate::__private::serde_json::json!($value));
        )+
        params
    }};
}
