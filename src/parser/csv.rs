//! CSV ingestion.
//!
//! Selected when the configured separator is exactly one literal
//! character. Records are split by a quoting-aware reader rather than
//! the positional algorithm; the first record supplies the headers
//! verbatim (no trimming) and every later record becomes an entry
//! verbatim, padded to the header length.

use std::io::Read;

use log::debug;

use crate::error::RetabError;
use crate::tabdata::Tabdata;
use crate::Result;

/// Parse delimiter-separated input into a [`Tabdata`].
///
/// `columns` is the header field count. (The behavior this replaces
/// derived it from the record count; see DESIGN.md.)
pub fn parse(reader: impl Read, delimiter: u8) -> Result<Tabdata> {
    let mut csv_reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => {
            let record = record.map_err(|e| RetabError::InvalidFormat(e.to_string()))?;
            record.iter().map(str::to_string).collect()
        }
        None => return Ok(Tabdata::default()),
    };

    let mut data = Tabdata::with_headers(headers);
    for record in records {
        let record = record.map_err(|e| RetabError::InvalidFormat(e.to_string()))?;
        data.push_row(record.iter().map(str::to_string).collect());
    }
    debug!("csv input: {} column(s), {} row(s)", data.columns, data.entries.len());

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_and_entries_verbatim() {
        let data = parse("Name, Age\nalice,42\nbob,7\n".as_bytes(), b',').unwrap();
        // No trimming on the CSV path.
        assert_eq!(data.headers, vec!["Name", " Age"]);
        assert_eq!(
            data.entries,
            vec![vec!["alice", "42"], vec!["bob", "7"]]
        );
    }

    #[test]
    fn test_columns_is_header_field_count() {
        let data = parse("a,b,c\n1,2,3\n4,5,6\n7,8,9\n".as_bytes(), b',').unwrap();
        assert_eq!(data.columns, 3);
    }

    #[test]
    fn test_quoted_fields_keep_delimiter() {
        let data = parse("name,desc\nx,\"a, quoted, value\"\n".as_bytes(), b',').unwrap();
        assert_eq!(data.entries[0][1], "a, quoted, value");
    }

    #[test]
    fn test_short_records_are_padded() {
        let data = parse("a,b,c\n1,2\n".as_bytes(), b',').unwrap();
        assert_eq!(data.entries[0], vec!["1", "2", ""]);
    }

    #[test]
    fn test_alternate_delimiter() {
        let data = parse("a;b\n1;2\n".as_bytes(), b';').unwrap();
        assert_eq!(data.headers, vec!["a", "b"]);
        assert_eq!(data.entries, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_empty_input() {
        let data = parse("".as_bytes(), b',').unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let headers = vec!["h1".to_string(), "h2".to_string()];
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ];
        let mut serialized = headers.join(",");
        serialized.push('\n');
        for row in &rows {
            serialized.push_str(&row.join(","));
            serialized.push('\n');
        }

        let data = parse(serialized.as_bytes(), b',').unwrap();
        assert_eq!(data.headers, headers);
        assert_eq!(data.entries, rows);
    }
}
