//! Ingestion parsers producing the shared [`Tabdata`](crate::Tabdata) model.
//!
//! Three ingestion paths exist:
//!
//! - [`positional`]: derives fixed column offsets from a header line
//!   and a separator pattern, then slices every data line by them.
//! - [`csv`]: delimiter-aware reader, selected when the configured
//!   separator is exactly one literal character.
//! - [`json`]: a top-level array of flat objects, with the first
//!   object's key order defining the header order.
//!
//! All three uphold the same invariant: every emitted row has exactly
//! as many cells as there are headers.

pub mod csv;
pub mod json;
pub mod positional;

/// Default separator: two-or-more whitespace characters, or a single tab.
pub const DEFAULT_SEPARATOR: &str = r"(\s{2,}|\t)";

/// A separator of exactly one ASCII character selects the CSV reader
/// instead of the positional algorithm.
pub fn csv_delimiter(separator: &str) -> Option<u8> {
    let mut bytes = separator.bytes();
    match (bytes.next(), bytes.next()) {
        (Some(b), None) if b.is_ascii() => Some(b),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_delimiter_single_char_only() {
        assert_eq!(csv_delimiter(","), Some(b','));
        assert_eq!(csv_delimiter(";"), Some(b';'));
        assert_eq!(csv_delimiter(DEFAULT_SEPARATOR), None);
        assert_eq!(csv_delimiter(",,"), None);
        assert_eq!(csv_delimiter(""), None);
    }
}
