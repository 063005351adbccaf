//! The key registry collaborator: the explicit, statically-declared set of
//! regular translation keys the table must define.
//!
//! The loader validates rows against this set and patches registered keys
//! that never appeared in the file. Temporary `@@` keys are never registered.

use std::collections::HashSet;

/// Enumerable set of valid regular translation keys.
///
/// Declaration order is preserved so missing-key diagnostics come out in a
/// stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRegistry {
    order: Vec<String>,
    set: HashSet<String>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from key names, dropping duplicates.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = KeyRegistry::new();
        for key in keys {
            registry.insert(key);
        }
        registry
    }

    /// Registers a key; returns false if it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.set.contains(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.set.insert(key);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.set.contains(key)
    }

    /// Iterates keys in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KeyRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        KeyRegistry::from_keys(iter)
    }
}
