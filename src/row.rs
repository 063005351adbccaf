//! Row processor and reference resolver: classifies one data row, resolves
//! blank-value fallback, `$$` host pass-throughs, and inline `@@`
//! references, then accumulates values into the build tables.
//!
//! Resolution order is strictly file order and never crosses locale
//! contexts: the default column resolves against the default tables, the
//! active column against the active tables. A reference to a key defined on
//! a later row does not resolve; the marker stays verbatim.

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, record},
    host::HostDictionary,
    registry::KeyRegistry,
    table::{LocaleContext, TableBuilder},
    tokenizer::FieldCursor,
};

/// Leading `#` on the key column marks a comment row.
pub(crate) const COMMENT_MARKER: char = '#';
/// Leading `@@` on the key column defines a temporary key.
pub(crate) const TEMP_KEY_PREFIX: &str = "@@";
/// `@@name` inside a value substitutes the already-resolved value of `name`.
pub(crate) const REFERENCE_MARKER: &str = "@@";
/// `$$name` leading a value redirects to the host dictionary's `name`.
pub(crate) const PASS_THROUGH_MARKER: &str = "$$";

/// Read-only surroundings of one table build.
pub(crate) struct RowContext<'a> {
    pub locales: &'a [String],
    pub default_locale: &'a str,
    pub active_locale: &'a str,
    pub registry: &'a KeyRegistry,
    pub host: &'a dyn HostDictionary,
}

/// Processes one data line, accumulating into `tables`.
pub(crate) fn process_row(
    line: &str,
    line_no: usize,
    ctx: &RowContext<'_>,
    tables: &mut TableBuilder,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if line.trim().is_empty() {
        return;
    }

    let mut cursor = FieldCursor::new(line);
    let key_field = cursor.next_field();
    if key_field.is_empty() || key_field.starts_with(COMMENT_MARKER) {
        return;
    }

    let temporary = key_field.starts_with(TEMP_KEY_PREFIX);
    let stored_key = if temporary {
        key_field[TEMP_KEY_PREFIX.len()..].to_string()
    } else {
        key_field.clone()
    };

    if !temporary {
        if !ctx.registry.contains(&key_field) {
            record(
                diagnostics,
                Diagnostic::new(
                    DiagnosticKind::UnknownKey,
                    format!("key `{key_field}` is not registered; row skipped"),
                )
                .with_key(&key_field)
                .with_line(line_no),
            );
            return;
        }
        *tables.occurrences.entry(key_field.clone()).or_insert(0) += 1;
    }

    for locale in ctx.locales {
        // Every declared column is read, retained or not, to keep the
        // cursor aligned with header order.
        let raw = cursor.next_field();
        let is_default = locale.as_str() == ctx.default_locale;
        let is_active = locale.as_str() == ctx.active_locale;

        if is_default {
            let value = resolve_field(
                &raw,
                &key_field,
                &stored_key,
                temporary,
                LocaleContext::Default,
                ctx,
                tables,
                line_no,
                diagnostics,
            );
            tables
                .table_mut(LocaleContext::Default, temporary)
                .append(&stored_key, &value);
            if is_active {
                // Default and active coincide: the single column feeds both
                // contexts.
                tables
                    .table_mut(LocaleContext::Active, temporary)
                    .append(&stored_key, &value);
            }
        } else if is_active {
            let value = resolve_field(
                &raw,
                &key_field,
                &stored_key,
                temporary,
                LocaleContext::Active,
                ctx,
                tables,
                line_no,
                diagnostics,
            );
            tables
                .table_mut(LocaleContext::Active, temporary)
                .append(&stored_key, &value);
        }
    }
}

/// Resolves one retained field: blank fallback, then pass-through, then
/// inline references, in that order.
#[allow(clippy::too_many_arguments)]
fn resolve_field(
    raw: &str,
    key_field: &str,
    stored_key: &str,
    temporary: bool,
    context: LocaleContext,
    ctx: &RowContext<'_>,
    tables: &TableBuilder,
    line_no: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    let target_locale = match context {
        LocaleContext::Default => ctx.default_locale,
        LocaleContext::Active => ctx.active_locale,
    };

    // Blank-value fallback. The asymmetry is intentional: a blank default
    // warns and substitutes the key name; a blank non-default silently takes
    // the value already accumulated for the default locale.
    let mut value = if raw.is_empty() {
        match context {
            LocaleContext::Default => {
                record(
                    diagnostics,
                    Diagnostic::new(
                        DiagnosticKind::MissingDefaultValue,
                        format!(
                            "key `{key_field}` has no value for default locale `{target_locale}`"
                        ),
                    )
                    .with_key(key_field)
                    .with_locale(target_locale)
                    .with_line(line_no),
                );
                key_field.to_string()
            }
            LocaleContext::Active => {
                let source = if temporary {
                    tables.temporary(LocaleContext::Default)
                } else {
                    tables.regular(LocaleContext::Default)
                };
                source.get(stored_key).unwrap_or_default().to_string()
            }
        }
    } else {
        raw.to_string()
    };

    // Whole-value redirect to the host dictionary. A host-supplied string is
    // not re-scanned for inline references.
    if value.starts_with(PASS_THROUGH_MARKER) {
        let host_key = value[PASS_THROUGH_MARKER.len()..].to_string();
        match ctx.host.try_get(target_locale, &host_key) {
            Some(host_value) => value = host_value,
            None => record(
                diagnostics,
                Diagnostic::new(
                    DiagnosticKind::UnresolvedPassThrough,
                    format!(
                        "host dictionary has no `{host_key}` for locale `{target_locale}`"
                    ),
                )
                .with_key(key_field)
                .with_locale(target_locale)
                .with_line(line_no),
            ),
        }
        return value;
    }

    // Inline substitution: regular keys first, then temporary keys, each in
    // file order within the matching locale context.
    if value.contains(REFERENCE_MARKER) {
        for (key, resolved) in tables.regular(context).iter() {
            value = value.replace(&format!("{REFERENCE_MARKER}{key}"), resolved);
        }
        for (key, resolved) in tables.temporary(context).iter() {
            value = value.replace(&format!("{REFERENCE_MARKER}{key}"), resolved);
        }
        if value.contains(REFERENCE_MARKER) {
            record(
                diagnostics,
                Diagnostic::new(
                    DiagnosticKind::UnresolvedReference,
                    format!("key `{key_field}` keeps an unresolved `{REFERENCE_MARKER}` reference"),
                )
                .with_key(key_field)
                .with_locale(target_locale)
                .with_line(line_no),
            );
        }
    }

    value
}
