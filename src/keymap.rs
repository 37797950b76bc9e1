//! Single-owner key lookup table

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Maps an original trace key to whatever replaces it
///
/// Each pipeline run owns exactly one of these and threads it through the
/// encoding steps explicitly.
#[derive(Debug, Clone)]
pub struct KeyMap<V> {
    entries: HashMap<String, V>,
}

impl<V> KeyMap<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a mapping, replacing any earlier one for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    /// Look up `key` referenced from trace line `line`
    pub fn resolve(&self, key: &str, line: usize) -> Result<&V> {
        self.entries.get(key).ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
            line,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for KeyMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_missing_key() {
        let mut map = KeyMap::new();
        map.insert("user3", 0usize);

        assert_eq!(*map.resolve("user3", 1).unwrap(), 0);
        match map.resolve("user4", 9) {
            Err(Error::MissingKey { key, line }) => {
                assert_eq!(key, "user4");
                assert_eq!(line, 9);
            }
            other => panic!("expected missing key, got {:?}", other),
        }
    }

    #[test]
    fn test_later_insert_wins() {
        let mut map = KeyMap::with_capacity(2);
        assert!(map.insert("k", 1).is_none());
        assert_eq!(map.insert("k", 2), Some(1));
        assert_eq!(map.get("k"), Some(&2));
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
    }
}
