//! Column transforms: selection, header overrides, numbering and
//! transpose-with-replace.

use log::debug;
use regex::Regex;

use crate::error::RetabError;
use crate::tabdata::Tabdata;
use crate::Result;

/// Reduce a table to the given 1-based column numbers.
///
/// Numbers may arrive in any order and contain duplicates; the
/// displayed columns are the intersection with existing columns,
/// always in original column order. An empty selection means "all
/// columns" and passes the table through untouched.
pub fn select_columns(data: Tabdata, numbers: &[usize]) -> Tabdata {
    if numbers.is_empty() {
        return data;
    }
    let keep: Vec<usize> = (0..data.columns)
        .filter(|i| numbers.contains(&(i + 1)))
        .collect();
    debug!("selecting {} of {} column(s)", keep.len(), data.columns);

    let headers = keep.iter().map(|&i| data.headers[i].clone()).collect();
    let mut selected = Tabdata::with_headers(headers);
    for row in &data.entries {
        selected.push_row(keep.iter().map(|&i| row[i].clone()).collect());
    }
    selected
}

/// Override header labels positionally.
///
/// A count mismatch is not an error: surplus labels are ignored and
/// missing ones leave the original header text untouched.
pub fn replace_headers(data: &mut Tabdata, labels: &[String]) {
    for (header, label) in data.headers.iter_mut().zip(labels) {
        *header = label.clone();
    }
    data.recompute_widths();
}

/// Append the 1-based position to every header label, `Name(N)`.
///
/// Run before [`select_columns`] so N reflects the original ordering
/// even when columns are dropped for display.
pub fn number_headers(data: &mut Tabdata) {
    data.headers = data.numbered_headers();
    data.recompute_widths();
}

/// A search/replace rule bound positionally to one designated column.
#[derive(Debug, Clone)]
pub struct Transposer {
    pub search: Regex,
    pub replacement: String,
}

impl Transposer {
    /// Parse a `/search/replace/` rule.
    ///
    /// The rule's first character is its delimiter and must reappear so
    /// the rule splits into exactly four parts; any other count is
    /// [`RetabError::InvalidTransposerSyntax`]. The search part is a
    /// regular expression and the replacement may use `$1`-style
    /// back-references.
    pub fn parse(spec: &str) -> Result<Self> {
        let delimiter = spec
            .chars()
            .next()
            .ok_or_else(|| RetabError::InvalidTransposerSyntax(spec.to_string()))?;
        let parts: Vec<&str> = spec.split(delimiter).collect();
        if parts.len() != 4 {
            return Err(RetabError::InvalidTransposerSyntax(spec.to_string()));
        }
        let search = Regex::new(parts[1]).map_err(|e| RetabError::bad_pattern(parts[1], e))?;
        Ok(Transposer {
            search,
            replacement: parts[2].to_string(),
        })
    }

    /// Parse a list of rules, failing on the first bad one.
    pub fn parse_all(specs: &[String]) -> Result<Vec<Self>> {
        specs.iter().map(|s| Transposer::parse(s)).collect()
    }
}

/// Apply N replacement rules to N designated 1-based columns.
///
/// Counts are validated before any row is touched; a mismatch is
/// [`RetabError::ConfigMismatch`]. Substitution can change cell
/// lengths, so the result's width caches are rebuilt by construction.
pub fn transpose(
    data: Tabdata,
    columns: &[usize],
    transposers: &[Transposer],
) -> Result<Tabdata> {
    if columns.len() != transposers.len() {
        return Err(RetabError::ConfigMismatch {
            columns: columns.len(),
            rules: transposers.len(),
        });
    }
    if columns.is_empty() {
        return Ok(data);
    }

    let mut rewritten = data.clone_without_rows();
    for row in &data.entries {
        let mut cells = row.clone();
        for (number, transposer) in columns.iter().zip(transposers) {
            let Some(index) = number.checked_sub(1) else {
                continue;
            };
            if let Some(cell) = cells.get_mut(index) {
                *cell = transposer
                    .search
                    .replace_all(cell, transposer.replacement.as_str())
                    .into_owned();
            }
        }
        rewritten.push_row(cells);
    }
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Tabdata {
        let mut data = Tabdata::with_headers(vec![
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
        ]);
        data.push_row(vec!["a1".to_string(), "b1".to_string(), "c1".to_string()]);
        data.push_row(vec!["a2".to_string(), "b2".to_string(), "c2".to_string()]);
        data
    }

    #[test]
    fn test_selection_keeps_original_order() {
        let selected = select_columns(table(), &[3, 1]);
        assert_eq!(selected.headers, vec!["A", "C"]);
        assert_eq!(selected.entries[0], vec!["a1", "c1"]);
    }

    #[test]
    fn test_selection_tolerates_duplicates_and_out_of_range() {
        let selected = select_columns(table(), &[2, 2, 9]);
        assert_eq!(selected.headers, vec!["B"]);
        assert_eq!(selected.entries, vec![vec!["b1"], vec!["b2"]]);
    }

    #[test]
    fn test_empty_selection_is_passthrough() {
        let data = table();
        let selected = select_columns(data.clone(), &[]);
        assert_eq!(selected, data);
    }

    #[test]
    fn test_replace_headers_positionally() {
        let mut data = table();
        replace_headers(&mut data, &["X".to_string(), "Y".to_string()]);
        assert_eq!(data.headers, vec!["X", "Y", "C"]);
    }

    #[test]
    fn test_replace_headers_ignores_surplus_labels() {
        let mut data = table();
        let labels: Vec<String> = ["1", "2", "3", "4", "5"].iter().map(|s| s.to_string()).collect();
        replace_headers(&mut data, &labels);
        assert_eq!(data.headers, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_number_headers() {
        let mut data = table();
        number_headers(&mut data);
        assert_eq!(data.headers, vec!["A(1)", "B(2)", "C(3)"]);
    }

    #[test]
    fn test_transposer_parse() {
        let t = Transposer::parse("/foo/bar/").unwrap();
        assert!(t.search.is_match("foo"));
        assert_eq!(t.replacement, "bar");
    }

    #[test]
    fn test_transposer_alternate_delimiter() {
        let t = Transposer::parse("|a/b|c|").unwrap();
        assert!(t.search.is_match("a/b"));
        assert_eq!(t.replacement, "c");
    }

    #[test]
    fn test_transposer_wrong_part_count() {
        for spec in ["/missing-tail", "/too/many/parts/here/", "plain"] {
            let err = Transposer::parse(spec).unwrap_err();
            assert!(matches!(err, RetabError::InvalidTransposerSyntax(_)), "{spec}");
        }
    }

    #[test]
    fn test_transposer_bad_regex() {
        let err = Transposer::parse("/(/x/").unwrap_err();
        assert!(matches!(err, RetabError::InvalidPattern { .. }));
    }

    #[test]
    fn test_transpose_rewrites_designated_columns() {
        let t = Transposer::parse_all(&["/1/9/".to_string()]).unwrap();
        let rewritten = transpose(table(), &[2], &t).unwrap();
        assert_eq!(rewritten.entries[0], vec!["a1", "b9", "c1"]);
        assert_eq!(rewritten.entries[1], vec!["a2", "b2", "c2"]);
    }

    #[test]
    fn test_transpose_supports_backreferences() {
        let t = Transposer::parse_all(&["/([a-z])(\\d)/$2$1/".to_string()]).unwrap();
        let rewritten = transpose(table(), &[1], &t).unwrap();
        assert_eq!(rewritten.entries[0][0], "1a");
    }

    #[test]
    fn test_transpose_count_mismatch_mutates_nothing() {
        let t = Transposer::parse_all(&["/1/9/".to_string()]).unwrap();
        let original = table();
        let err = transpose(original.clone(), &[1, 2], &t).unwrap_err();
        assert!(matches!(
            err,
            RetabError::ConfigMismatch { columns: 2, rules: 1 }
        ));
        // Validation happens before any row is touched.
        assert_eq!(original.entries[0], vec!["a1", "b1", "c1"]);
    }

    #[test]
    fn test_transpose_recomputes_widths() {
        let t = Transposer::parse_all(&["/b1/much-longer-value/".to_string()]).unwrap();
        let rewritten = transpose(table(), &[2], &t).unwrap();
        assert_eq!(rewritten.maxwidth_per_column[1], 17);
    }
}
