//! The bundle: one locale's catalog, cache, and resolution API

use crate::cache::{MessageCache, ResizePolicy, DEFAULT_INITIAL_CAPACITY};
use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::flatten::{check_shape, flatten_into, ingest_document};
use crate::message::Message;
use crate::params::Params;
use crate::value::Value;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

/// Called by the `try_*` resolvers when a key is missing.
pub type NotFoundHandler = Arc<dyn Fn(&str, &mut dyn Write, &[Option<&Params>]) + Send + Sync>;

fn ignore_missing(_key: &str, _out: &mut dyn Write, _params: &[Option<&Params>]) {}

struct State {
    catalog: Catalog,
    cache: MessageCache,
    policy: ResizePolicy,
}

impl State {
    /// Invalidate everything written since the last sweep and resize the cache.
    fn sweep(&mut self) -> CatalogResult<()> {
        if self.catalog.pending().is_empty() {
            return Ok(());
        }

        let pending = self.catalog.take_pending();
        for key in &pending {
            if let Some(message) = self.catalog.get(key) {
                message.mark_dirty();
            }
            self.cache.remove(key);
        }
        debug!(invalidated = pending.len(), total = self.catalog.len(), "swept pending catalog updates");
        self.policy.apply(&mut self.cache, self.catalog.len())
    }

    fn lookup(&mut self, locale: &LanguageIdentifier, key: &str) -> CatalogResult<Arc<Message>> {
        self.sweep()?;
        if let Some(message) = self.cache.get(key) {
            return Ok(message);
        }

        let message = self.catalog.get(key).ok_or_else(|| CatalogError::NotFound {
            locale: locale.to_string(),
            key: key.to_string(),
        })?;
        self.cache.put(key, Arc::clone(&message));
        Ok(message)
    }
}

/// A translation catalog for a single locale.
///
/// All state sits behind one lock. Resolution takes the write lock only to
/// sweep and look up the message, then renders after releasing it, so a
/// `Bundle` can be shared freely between threads.
pub struct Bundle {
    locale: LanguageIdentifier,
    state: RwLock<State>,
    not_found: RwLock<NotFoundHandler>,
}

impl Bundle {
    /// Create an empty bundle for `locale` with the default resize policy.
    pub fn new(locale: LanguageIdentifier) -> Self {
        Self::from_parts(
            locale,
            MessageCache::with_capacity(DEFAULT_INITIAL_CAPACITY),
            ResizePolicy::default(),
        )
    }

    /// Create an empty bundle with a custom resize policy.
    pub fn with_policy(locale: LanguageIdentifier, policy: ResizePolicy) -> CatalogResult<Self> {
        let cache = policy.new_cache()?;
        Ok(Self::from_parts(locale, cache, policy))
    }

    fn from_parts(locale: LanguageIdentifier, cache: MessageCache, policy: ResizePolicy) -> Self {
        let not_found: NotFoundHandler = Arc::new(ignore_missing);
        Self {
            locale,
            state: RwLock::new(State {
                catalog: Catalog::new(),
                cache,
                policy,
            }),
            not_found: RwLock::new(not_found),
        }
    }

    /// The locale this bundle was created for
    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Replace the handler used by [`Bundle::try_resolve_to`] for missing keys.
    pub fn set_not_found_handler<F>(&self, handler: F)
    where
        F: Fn(&str, &mut dyn Write, &[Option<&Params>]) + Send + Sync + 'static,
    {
        let handler: NotFoundHandler = Arc::new(handler);
        *self.not_found.write() = handler;
    }

    /// Resolve `key` and render it into `out`.
    pub fn resolve_to(&self, key: &str, out: &mut dyn Write, params: &[Option<&Params>]) -> CatalogResult<()> {
        let message = self.state.write().lookup(&self.locale, key)?;
        message.render(out, params).map_err(|source| CatalogError::Template {
            key: key.to_string(),
            source,
        })
    }

    /// Resolve `key` and render it into a new string.
    pub fn resolve(&self, key: &str, params: &[Option<&Params>]) -> CatalogResult<String> {
        let mut buf = Vec::new();
        self.resolve_to(key, &mut buf, params)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Resolve `key` into `out`, never failing.
    ///
    /// A missing key is handed to the not-found handler; any other failure is
    /// logged and dropped.
    pub fn try_resolve_to(&self, key: &str, out: &mut dyn Write, params: &[Option<&Params>]) {
        match self.resolve_to(key, out, params) {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                warn!(locale = %self.locale, key, "translation not found");
                let handler = Arc::clone(&*self.not_found.read());
                handler(key, out, params);
            }
            Err(err) => warn!(locale = %self.locale, key, error = %err, "failed to resolve translation"),
        }
    }

    /// String form of [`Bundle::try_resolve_to`].
    pub fn try_resolve(&self, key: &str, params: &[Option<&Params>]) -> String {
        let mut buf = Vec::new();
        self.try_resolve_to(key, &mut buf, params);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Resolve `key` into `out`.
    ///
    /// # Panics
    ///
    /// Panics on any resolution failure, including a missing key.
    pub fn must_resolve_to(&self, key: &str, out: &mut dyn Write, params: &[Option<&Params>]) {
        if let Err(err) = self.resolve_to(key, out, params) {
            panic!("{err}");
        }
    }

    /// String form of [`Bundle::must_resolve_to`].
    ///
    /// # Panics
    ///
    /// Panics on any resolution failure, including a missing key.
    pub fn must_resolve(&self, key: &str, params: &[Option<&Params>]) -> String {
        let mut buf = Vec::new();
        self.must_resolve_to(key, &mut buf, params);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Flatten an in-memory value beneath `prefix`, bypassing format decoding.
    ///
    /// With an empty prefix the value must be a map or a list, as for a
    /// decoded document.
    pub fn load_value(&self, prefix: &str, value: &Value) -> CatalogResult<usize> {
        if prefix.is_empty() {
            check_shape(value)?;
        }
        let written = flatten_into(&mut self.state.write().catalog, prefix, value);
        debug!(locale = %self.locale, prefix, keys = written, "loaded in-memory value");
        Ok(written)
    }

    /// Ingest already decoded documents in one critical section.
    pub(crate) fn commit(&self, documents: &[Value]) -> CatalogResult<usize> {
        let mut state = self.state.write();
        let mut written = 0;
        for document in documents {
            written += ingest_document(&mut state.catalog, document)?;
        }
        Ok(written)
    }

    /// Number of catalog entries
    pub fn len(&self) -> usize {
        self.state.read().catalog.len()
    }

    /// Whether nothing has been loaded
    pub fn is_empty(&self) -> bool {
        self.state.read().catalog.is_empty()
    }

    /// Whether `key` is in the catalog. Does not touch the cache.
    pub fn contains_key(&self, key: &str) -> bool {
        self.state.read().catalog.contains_key(key)
    }

    /// All catalog keys in ascending order
    pub fn keys(&self) -> Vec<String> {
        self.state.read().catalog.keys()
    }

    /// A snapshot of every key and its raw message text.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.state.read().catalog.snapshot()
    }

    /// Number of cached messages
    pub fn cache_len(&self) -> usize {
        self.state.read().cache.len()
    }

    /// Current cache capacity
    pub fn cache_capacity(&self) -> usize {
        self.state.read().cache.cap()
    }

    /// The resize policy in effect
    pub fn policy(&self) -> ResizePolicy {
        self.state.read().policy
    }
}

impl fmt::Debug for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Bundle")
            .field("locale", &self.locale.to_string())
            .field("messages", &state.catalog.len())
            .field("pending", &state.catalog.pending().len())
            .field("cache", &state.cache)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    fn bundle() -> Bundle {
        Bundle::new("en-US".parse().unwrap())
    }

    fn load(bundle: &Bundle, entries: &[(&str, &str)]) {
        let value: Value = entries.iter().copied().collect();
        bundle.load_value("", &value).unwrap();
    }

    #[test]
    fn test_bundle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Bundle>();
    }

    #[test]
    fn test_resolve_plain_and_templated() {
        let bundle = bundle();
        load(&bundle, &[("title", "Inbox"), ("greet", "{{.name}}")]);

        assert_eq!(bundle.resolve("title", &[]).unwrap(), "Inbox");
        let params = params! { "name" => "world" };
        assert_eq!(bundle.resolve("greet", &[Some(&params)]).unwrap(), "world");
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let bundle = bundle();
        match bundle.resolve("nope", &[]) {
            Err(CatalogError::NotFound { locale, key }) => {
                assert_eq!(locale, "en-US");
                assert_eq!(key, "nope");
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn test_template_errors_carry_key() {
        let bundle = bundle();
        load(&bundle, &[("broken", "{{ .a")]);
        match bundle.resolve("broken", &[]) {
            Err(CatalogError::Template { key, .. }) => assert_eq!(key, "broken"),
            other => panic!("expected template error, got {other:?}"),
        }
    }

    #[test]
    fn test_resolution_fills_cache_and_sweep_clears_it() {
        let bundle = bundle();
        load(&bundle, &[("a", "1"), ("b", "2")]);
        bundle.resolve("a", &[]).unwrap();
        bundle.resolve("b", &[]).unwrap();
        assert_eq!(bundle.cache_len(), 2);

        load(&bundle, &[("a", "one")]);
        assert_eq!(bundle.resolve("a", &[]).unwrap(), "one");
        assert_eq!(bundle.resolve("b", &[]).unwrap(), "2");
        assert_eq!(bundle.cache_len(), 2);
    }

    #[test]
    fn test_try_resolve_uses_handler_for_missing_keys() {
        let bundle = bundle();
        assert_eq!(bundle.try_resolve("missing", &[]), "");

        bundle.set_not_found_handler(|key, out, _params| {
            let _ = write!(out, "[{key}]");
        });
        assert_eq!(bundle.try_resolve("missing", &[]), "[missing]");
    }

    #[test]
    fn test_try_resolve_swallows_template_errors() {
        let bundle = bundle();
        load(&bundle, &[("broken", "{{ .a")]);
        bundle.set_not_found_handler(|_, out, _| {
            let _ = out.write_all(b"handler");
        });
        assert_eq!(bundle.try_resolve("broken", &[]), "");
    }

    #[test]
    #[should_panic(expected = "translation not found")]
    fn test_must_resolve_panics_on_missing_key() {
        bundle().must_resolve("missing", &[]);
    }

    #[test]
    fn test_with_policy_rejects_zero_capacity() {
        let policy = ResizePolicy {
            initial_capacity: 0,
            ..ResizePolicy::default()
        };
        assert!(matches!(
            Bundle::with_policy("en".parse().unwrap(), policy),
            Err(CatalogError::InvalidCapacity)
        ));
    }

    #[test]
    fn test_inspection() {
        let bundle = bundle();
        assert!(bundle.is_empty());
        load(&bundle, &[("b", "2"), ("a", "1")]);

        assert_eq!(bundle.len(), 2);
        assert!(bundle.contains_key("a"));
        assert_eq!(bundle.keys(), vec!["a", "b"]);
        assert_eq!(bundle.messages()["b"], "2");
        assert_eq!(bundle.cache_capacity(), 64);
        assert_eq!(bundle.policy(), ResizePolicy::default());
        assert!(format!("{bundle:?}").contains("en-US"));
    }
}
