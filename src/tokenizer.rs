//! Field tokenizer for one line of the translation resource.
//!
//! Comma-delimited with optional double-quote wrapping: inside quotes a comma
//! is literal and `""` is a literal `"`. An unterminated quote is read
//! permissively to end of line rather than rejected. After extraction the
//! two-character escape `\n` becomes a real line break. No whitespace
//! trimming is performed.

/// Cursor over a single resource line, yielding one field per call.
#[derive(Debug, Clone)]
pub struct FieldCursor<'a> {
    rest: &'a str,
}

impl<'a> FieldCursor<'a> {
    /// Creates a cursor positioned at the start of `line`.
    pub fn new(line: &'a str) -> Self {
        FieldCursor { rest: line }
    }

    /// True once every delimiter on the line has been consumed.
    ///
    /// `next_field` keeps yielding empty fields past this point, which keeps
    /// the row processor's column cursor aligned for short rows.
    pub fn at_end(&self) -> bool {
        self.rest.is_empty()
    }

    /// Returns the next field and advances past its trailing comma.
    pub fn next_field(&mut self) -> String {
        let mut field = String::new();

        if let Some(inner) = self.rest.strip_prefix('"') {
            let mut chars = inner.char_indices().peekable();
            // Byte offset in `inner` just past the closing quote.
            let mut closed_at = None;
            while let Some((i, c)) = chars.next() {
                if c == '"' {
                    if let Some(&(_, '"')) = chars.peek() {
                        field.push('"');
                        chars.next();
                    } else {
                        closed_at = Some(i + 1);
                        break;
                    }
                } else {
                    field.push(c);
                }
            }

            match closed_at {
                Some(after_quote) => {
                    // Stray text between the closing quote and the delimiter
                    // is ignored.
                    let tail = &inner[after_quote..];
                    self.rest = match tail.find(',') {
                        Some(comma) => &tail[comma + 1..],
                        None => "",
                    };
                }
                // Unterminated quote: the field runs to end of line.
                None => self.rest = "",
            }
        } else {
            match self.rest.find(',') {
                Some(comma) => {
                    field.push_str(&self.rest[..comma]);
                    self.rest = &self.rest[comma + 1..];
                }
                None => {
                    field.push_str(self.rest);
                    self.rest = "";
                }
            }
        }

        field.replace(r"\n", "\n")
    }
}
