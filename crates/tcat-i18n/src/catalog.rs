//! Flat key to message table with its pending-update log

use crate::message::Message;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// The source of truth for a bundle's messages.
///
/// Every write is also appended to the pending-update log, which the bundle
/// drains during its next invalidation sweep.
#[derive(Debug, Default)]
pub struct Catalog {
    messages: HashMap<String, Arc<Message>>,
    pending: Vec<String>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `raw` under `key`, replacing any previous message.
    pub fn insert(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        let key = key.into();
        let message = Arc::new(Message::new(key.clone(), raw));
        self.pending.push(key.clone());
        self.messages.insert(key, message);
    }

    /// The message stored under `key`
    pub fn get(&self, key: &str) -> Option<Arc<Message>> {
        self.messages.get(key).cloned()
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the catalog holds no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// All keys in ascending order
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.messages.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Keys written since the last sweep, in write order.
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Drain the pending-update log.
    pub fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    /// Copy of the key to raw text mapping.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.messages
            .iter()
            .map(|(key, message)| (key.clone(), message.raw().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_logs_pending_in_order() {
        let mut catalog = Catalog::new();
        catalog.insert("b", "1");
        catalog.insert("a", "2");
        catalog.insert("b", "3");

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.pending(), ["b", "a", "b"]);
        assert_eq!(catalog.get("b").unwrap().raw(), "3");

        assert_eq!(catalog.take_pending().len(), 3);
        assert!(catalog.pending().is_empty());
    }

    #[test]
    fn test_keys_sorted_and_snapshot() {
        let mut catalog = Catalog::new();
        catalog.insert("z", "last");
        catalog.insert("a.b", "first");

        assert_eq!(catalog.keys(), vec!["a.b", "z"]);
        let snapshot = catalog.snapshot();
        assert_eq!(snapshot["z"], "last");
        assert!(catalog.contains_key("a.b"));
        assert!(!catalog.is_empty());
    }
}
