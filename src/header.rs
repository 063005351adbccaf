//! Header parser: extracts the ordered locale declarations from row 1.
//!
//! All header defects are structural failures that abort the whole load;
//! nothing is published for the locale being built.

use unic_langid::LanguageIdentifier;

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, record},
    error::Error,
    row::COMMENT_MARKER,
    tokenizer::FieldCursor,
};

/// Parses the header line into the ordered, de-duplicated locale list.
///
/// The first field must be blank (the key column has no heading); the first
/// declared locale must equal `default_locale`. The declaration list ends at
/// the first empty field or end of line.
pub(crate) fn parse_header(
    line: &str,
    default_locale: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<String>, Error> {
    if line.trim().is_empty() {
        return Err(Error::header_error("header line is blank"));
    }
    if line.starts_with(COMMENT_MARKER) {
        return Err(Error::header_error("header line starts with `#`"));
    }

    let mut cursor = FieldCursor::new(line);
    let leading = cursor.next_field();
    if !leading.is_empty() {
        return Err(Error::header_error(format!(
            "leading column must be blank, found `{leading}`"
        )));
    }

    let mut locales: Vec<String> = Vec::new();
    while !cursor.at_end() {
        let locale = cursor.next_field();
        if locale.is_empty() {
            break;
        }
        if locales.iter().any(|declared| *declared == locale) {
            return Err(Error::header_error(format!(
                "duplicate locale `{locale}`"
            )));
        }
        if locales.is_empty() && locale != default_locale {
            return Err(Error::header_error(format!(
                "first declared locale `{locale}` is not the default `{default_locale}`"
            )));
        }
        if locale.parse::<LanguageIdentifier>().is_err() {
            record(
                diagnostics,
                Diagnostic::new(
                    DiagnosticKind::MalformedLocale,
                    format!("locale `{locale}` is not a well-formed language identifier"),
                )
                .with_locale(locale.clone())
                .with_line(1),
            );
        }
        locales.push(locale);
    }

    if locales.is_empty() {
        return Err(Error::header_error("no locales declared"));
    }

    Ok(locales)
}
