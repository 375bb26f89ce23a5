//! Field escaping
//!
//! Field text may contain the grammar's own delimiters, so three characters
//! are escaped before a value is placed in a well entry:
//!
//! | char | escaped |
//! |------|---------|
//! | `-`  | `~d`    |
//! | `*`  | `~a`    |
//! | `~`  | `~~`    |
//!
//! Decoding is a single left-to-right scan. Any other `~X` pair, and a lone
//! trailing `~`, pass through literally.

use std::borrow::Cow;

/// Separates fields inside a well entry
pub(crate) const FIELD_SEPARATOR: char = '-';
/// Separates well entries
pub(crate) const WELL_SEPARATOR: char = '*';
/// Introduces an escape sequence
pub(crate) const ESCAPE: char = '~';

/// Escape a field value for embedding in a well entry
#[must_use]
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if !value.contains(|c| matches!(c, FIELD_SEPARATOR | WELL_SEPARATOR | ESCAPE)) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match c {
            FIELD_SEPARATOR => out.push_str("~d"),
            WELL_SEPARATOR => out.push_str("~a"),
            ESCAPE => out.push_str("~~"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Reverse [`escape_field`] on a single value
#[must_use]
pub fn unescape_field(value: &str) -> String {
    scan(value, false).into_iter().next().unwrap_or_default()
}

/// Split a well entry's field list on unescaped `-` and unescape each field
///
/// Always yields at least one (possibly empty) field.
pub(crate) fn split_fields(data: &str) -> Vec<String> {
    scan(data, true)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Text,
    AfterEscape,
}

fn scan(data: &str, split: bool) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut state = ScanState::Text;

    for c in data.chars() {
        if state == ScanState::AfterEscape {
            state = ScanState::Text;
            match c {
                'd' => {
                    current.push(FIELD_SEPARATOR);
                    continue;
                }
                'a' => {
                    current.push(WELL_SEPARATOR);
                    continue;
                }
                ESCAPE => {
                    current.push(ESCAPE);
                    continue;
                }
                // Unknown sequence: keep the `~` and handle `c` as plain text
                _ => current.push(ESCAPE),
            }
        }

        match c {
            ESCAPE => state = ScanState::AfterEscape,
            FIELD_SEPARATOR if split => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if state == ScanState::AfterEscape {
        current.push(ESCAPE);
    }
    fields.push(current);
    fields
}
