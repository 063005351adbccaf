#![forbid(unsafe_code)]
//! Locale-resolving translation-table loader.
//!
//! Reads a CSV-like resource holding translations for many keys across many
//! locales, validates the header, resolves blank-value fallback, inline
//! `@@key` references, and `$$key` host-dictionary pass-throughs, and caches
//! one immutable key→value table per locale ever activated.
//!
//! # Quick Start
//!
//! ```rust
//! use langtable::{KeyRegistry, Loader, MemoryProvider, NoHostDictionary};
//!
//! let resource = ",en-US,fr-FR\nGreeting,Hello,Bonjour\n";
//! let mut loader = Loader::new(
//!     MemoryProvider::new(resource),
//!     NoHostDictionary,
//!     KeyRegistry::from_keys(["Greeting"]),
//!     "en-US",
//! );
//!
//! loader.activate("fr-FR")?;
//! assert_eq!(loader.get("Greeting"), "Bonjour");
//! # Ok::<(), langtable::Error>(())
//! ```
//!
//! # Resource format
//!
//! - Row 1: an empty field, then one locale id per column; the configured
//!   default locale must come first.
//! - Data rows: a translation key, then one field per declared locale in
//!   header order. Fields may be double-quoted (`""` for a literal quote),
//!   and a literal `\n` embeds a newline.
//! - `#` leading a key comments the row out; `@@` leading a key defines a
//!   temporary key usable only for inline `@@name` references; `$$name`
//!   leading a value redirects to the host dictionary.
//!
//! Structural header defects abort the load; everything else is a
//! warning-class [`Diagnostic`] collected into the [`LoadReport`], and
//! lookups degrade to echoing the key rather than failing.

pub mod diagnostics;
pub mod error;
pub mod host;
pub mod loader;
pub mod registry;
pub mod table;
pub mod tokenizer;

mod header;
mod row;

// Re-export most used types for easy consumption
pub use crate::{
    diagnostics::{Diagnostic, DiagnosticKind},
    error::Error,
    host::{
        FileProvider, HostDictionary, MapHostDictionary, MemoryProvider, NoHostDictionary,
        ResourceProvider,
    },
    loader::{LoadReport, Loader},
    registry::KeyRegistry,
    table::LocaleTable,
};
