//! Accumulating build tables and the published per-locale lookup table.
//!
//! During a build four sub-tables accumulate values: {default, active} ×
//! {regular, temporary}. Insertion order is preserved because inline
//! reference resolution walks keys strictly in file order. Temporary keys
//! live in their own sub-tables and never reach the published table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which locale context a field is being resolved in.
///
/// References resolve only within their own context: the default column
/// against default tables, the active column against active tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LocaleContext {
    Default,
    Active,
}

/// Key→value map that remembers first-insertion (file) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ValueTable {
    values: HashMap<String, String>,
    order: Vec<String>,
}

impl ValueTable {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Sets the value for `key`, or appends newline-joined if one exists.
    pub fn append(&mut self, key: &str, value: &str) {
        match self.values.get_mut(key) {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(value);
            }
            None => {
                self.values.insert(key.to_string(), value.to_string());
                self.order.push(key.to_string());
            }
        }
    }

    /// Iterates entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .map(|key| (key.as_str(), self.values[key].as_str()))
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.values
    }
}

/// All mutable state accumulated over one table build.
#[derive(Debug, Default)]
pub(crate) struct TableBuilder {
    pub default_regular: ValueTable,
    pub active_regular: ValueTable,
    pub default_temporary: ValueTable,
    pub active_temporary: ValueTable,
    /// Rows seen per registered key; zero after the pass means the key is
    /// missing from the file entirely.
    pub occurrences: HashMap<String, usize>,
}

impl TableBuilder {
    pub fn regular(&self, context: LocaleContext) -> &ValueTable {
        match context {
            LocaleContext::Default => &self.default_regular,
            LocaleContext::Active => &self.active_regular,
        }
    }

    pub fn temporary(&self, context: LocaleContext) -> &ValueTable {
        match context {
            LocaleContext::Default => &self.default_temporary,
            LocaleContext::Active => &self.active_temporary,
        }
    }

    pub fn table_mut(&mut self, context: LocaleContext, temporary: bool) -> &mut ValueTable {
        match (context, temporary) {
            (LocaleContext::Default, false) => &mut self.default_regular,
            (LocaleContext::Active, false) => &mut self.active_regular,
            (LocaleContext::Default, true) => &mut self.default_temporary,
            (LocaleContext::Active, true) => &mut self.active_temporary,
        }
    }
}

/// Published, effectively-immutable key→value table for one locale.
///
/// Built once per activated locale and shared as a snapshot; lookups never
/// fail and never return an empty string for a registered key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleTable {
    locale: String,
    values: HashMap<String, String>,
}

impl LocaleTable {
    pub(crate) fn new(locale: impl Into<String>, values: HashMap<String, String>) -> Self {
        LocaleTable {
            locale: locale.into(),
            values,
        }
    }

    /// The locale this table was built for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Resolved value for `key`, echoing the key itself when unknown.
    pub fn get(&self, key: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Strict lookup, `None` when the key was never published.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
