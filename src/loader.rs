//! Loader/orchestrator: reacts to active-locale changes, builds locale
//! tables on first activation, and serves cached snapshots forever after.
//!
//! A build runs synchronously to completion. The finished table enters the
//! cache before the snapshot is handed out, so a re-entrant activation
//! triggered by publication observes a cache hit instead of re-parsing.
//! A failed build leaves previously built locales untouched and servable.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, record},
    error::Error,
    header::parse_header,
    host::{HostDictionary, ResourceProvider},
    registry::KeyRegistry,
    row::{RowContext, process_row},
    table::{LocaleTable, TableBuilder},
};

/// Outcome of one activation: whether a build ran, and what it complained
/// about. Diagnostics are warning-class; fatal conditions surface as
/// [`Error`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub locale: String,
    /// False when the activation was served from the cache.
    pub rebuilt: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    fn cached(locale: &str) -> Self {
        LoadReport {
            locale: locale.to_string(),
            rebuilt: false,
            diagnostics: Vec::new(),
        }
    }

    /// Serializes the report to JSON for host-side logging or CI artifacts.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Locale-resolving translation-table loader.
///
/// Owns the per-locale table cache for the process lifetime. Tables are
/// built once per distinct activated locale and never spontaneously
/// invalidated; the underlying resource is assumed stable at runtime.
pub struct Loader<P, H> {
    provider: P,
    host: H,
    registry: KeyRegistry,
    default_locale: String,
    cache: HashMap<String, Arc<LocaleTable>>,
    active: Option<String>,
}

impl<P: ResourceProvider, H: HostDictionary> Loader<P, H> {
    pub fn new(
        provider: P,
        host: H,
        registry: KeyRegistry,
        default_locale: impl Into<String>,
    ) -> Self {
        Loader {
            provider,
            host,
            registry,
            default_locale: default_locale.into(),
            cache: HashMap::new(),
            active: None,
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// The locale most recently activated successfully.
    pub fn active_locale(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// True once a table for `locale` has been built and cached.
    pub fn is_built(&self, locale: &str) -> bool {
        self.cache.contains_key(locale)
    }

    /// Cached table snapshot for `locale`, if ever built.
    pub fn table(&self, locale: &str) -> Option<Arc<LocaleTable>> {
        self.cache.get(locale).cloned()
    }

    /// Snapshot of the active locale's table.
    pub fn active_table(&self) -> Option<Arc<LocaleTable>> {
        self.active.as_deref().and_then(|locale| self.table(locale))
    }

    /// Reacts to an active-locale change (or the initial load).
    ///
    /// Cache hit: no-op beyond switching the served table. Cache miss: reads
    /// the resource, builds the table for `locale`, caches it, and returns
    /// the build's diagnostics. On error the previous active locale keeps
    /// serving.
    pub fn activate(&mut self, locale: &str) -> Result<LoadReport, Error> {
        if self.cache.contains_key(locale) {
            tracing::debug!(locale, "locale table cache hit");
            self.active = Some(locale.to_string());
            return Ok(LoadReport::cached(locale));
        }

        let (table, diagnostics) = self.build_table(locale)?;
        // Cache before anything external can observe the table; a
        // re-entrant activation of the same locale must hit the cache.
        self.cache.insert(locale.to_string(), Arc::new(table));
        self.active = Some(locale.to_string());
        tracing::debug!(
            locale,
            diagnostics = diagnostics.len(),
            "locale table built"
        );

        Ok(LoadReport {
            locale: locale.to_string(),
            rebuilt: true,
            diagnostics,
        })
    }

    /// Resolved value for `key` in the active locale.
    ///
    /// Never fails: before any successful activation, or for a key the table
    /// never published, the key itself comes back as a last-resort value.
    pub fn get(&self, key: &str) -> String {
        match self.active_table() {
            Some(table) => table.get(key),
            None => key.to_string(),
        }
    }

    fn build_table(&self, locale: &str) -> Result<(LocaleTable, Vec<Diagnostic>), Error> {
        let source = self.provider.read_source()?;
        let mut diagnostics = Vec::new();

        let mut lines = source.lines();
        let header_line = lines
            .next()
            .ok_or_else(|| Error::header_error("resource is empty"))?;
        let locales = parse_header(header_line, &self.default_locale, &mut diagnostics)?;

        if !locales.iter().any(|declared| declared.as_str() == locale) {
            record(
                &mut diagnostics,
                Diagnostic::new(
                    DiagnosticKind::MissingLocale,
                    format!("locale `{locale}` is not declared in the resource header"),
                )
                .with_locale(locale),
            );
        }

        let ctx = RowContext {
            locales: &locales,
            default_locale: &self.default_locale,
            active_locale: locale,
            registry: &self.registry,
            host: &self.host,
        };

        let mut tables = TableBuilder::default();
        for (index, line) in lines.enumerate() {
            // Header is line 1; data starts at line 2.
            process_row(line, index + 2, &ctx, &mut tables, &mut diagnostics);
        }

        // Registered keys with no row at all still get a lookup value so
        // `get` never comes back empty for them.
        for key in self.registry.iter() {
            if tables.occurrences.get(key).copied().unwrap_or(0) == 0 {
                record(
                    &mut diagnostics,
                    Diagnostic::new(
                        DiagnosticKind::MissingKey,
                        format!("registered key `{key}` has no row in the resource"),
                    )
                    .with_key(key)
                    .with_locale(locale),
                );
                tables.active_regular.append(key, key);
            }
        }

        let table = LocaleTable::new(locale, tables.active_regular.into_map());
        Ok((table, diagnostics))
    }
}
