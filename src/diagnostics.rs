//! Warning-class diagnostics accumulated while building a locale table.
//!
//! A diagnostic never aborts the build; the row processor substitutes a
//! best-effort value (key name, or the marker left verbatim) and keeps going.
//! Callers receive the full list in the [`LoadReport`](crate::loader::LoadReport)
//! and decide whether to surface them.

use serde::{Deserialize, Serialize};

/// Issue type captured during a table build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Row key is not in the key registry; the row was skipped.
    UnknownKey,
    /// Default-locale field was blank; the key name was used as the value.
    MissingDefaultValue,
    /// An inline `@@` reference did not resolve; the marker stays verbatim.
    UnresolvedReference,
    /// A `$$` pass-through missed the host dictionary; left verbatim.
    UnresolvedPassThrough,
    /// A registered key had no row at all; the key name was published.
    MissingKey,
    /// The requested locale is not declared in the header.
    MissingLocale,
    /// A declared locale id does not parse as BCP 47. Matching is unaffected.
    MalformedLocale,
}

/// Per-row (or per-key) diagnostic details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub line: Option<usize>,
    pub detail: String,
}

impl Diagnostic {
    /// Creates a new diagnostic with a human-readable detail message.
    pub fn new(kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            key: None,
            locale: None,
            line: None,
            detail: detail.into(),
        }
    }

    /// Attaches the offending translation key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attaches the locale context being resolved.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Attaches the 1-based resource line number.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Appends a diagnostic to the sink and logs it.
pub(crate) fn record(sink: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    tracing::warn!(
        kind = ?diagnostic.kind,
        key = diagnostic.key.as_deref(),
        locale = diagnostic.locale.as_deref(),
        line = diagnostic.line,
        "{}",
        diagnostic.detail
    );
    sink.push(diagnostic);
}
