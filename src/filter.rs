//! Per-column field filters.
//!
//! A field filter constrains one column with a regular expression and
//! an equality sense, and the whole set combines with a global invert
//! flag. Expressions arrive as `field=regex` or `field!=regex`; field
//! names match headers case-insensitively.

use std::collections::HashMap;

use log::debug;
use regex::Regex;

use crate::error::RetabError;
use crate::tabdata::Tabdata;
use crate::Result;

/// The equality sense of one filter.
///
/// Modeled as a tagged variant rather than a bare negate flag so the
/// interaction with the global invert is explicit: a cell satisfies
/// its filter when (regex matches) for `Equals` and (regex does not
/// match) for `NotEquals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Keep rows whose cell matches the regex
    Equals,
    /// Keep rows whose cell does not match the regex
    NotEquals,
}

/// One compiled per-column constraint.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    pub op: FilterOp,
    pub regex: Regex,
}

impl FieldFilter {
    /// Whether a cell satisfies this filter, before the global invert.
    fn satisfied_by(&self, cell: &str) -> bool {
        match self.op {
            FilterOp::Equals => self.regex.is_match(cell),
            FilterOp::NotEquals => !self.regex.is_match(cell),
        }
    }
}

/// The full filter set, keyed by lower-cased field name. At most one
/// filter per field; later expressions for the same field overwrite
/// earlier ones.
#[derive(Debug, Clone, Default)]
pub struct FieldFilters {
    by_field: HashMap<String, FieldFilter>,
}

impl FieldFilters {
    /// Parse raw `field=regex` / `field!=regex` expressions.
    ///
    /// `!=` is checked first so `a!=b` is a negated filter on `a`, not
    /// an equality filter on `a!`. Anything without either operator
    /// fails with [`RetabError::InvalidFilterSyntax`]; a bad regex
    /// fails with [`RetabError::InvalidPattern`]. Both happen before
    /// any row is processed.
    pub fn parse(expressions: &[String]) -> Result<Self> {
        let mut by_field = HashMap::new();
        for expression in expressions {
            let (field, op, raw) = if let Some((field, raw)) = expression.split_once("!=") {
                (field, FilterOp::NotEquals, raw)
            } else if let Some((field, raw)) = expression.split_once('=') {
                (field, FilterOp::Equals, raw)
            } else {
                return Err(RetabError::InvalidFilterSyntax(expression.clone()));
            };
            if field.is_empty() {
                return Err(RetabError::InvalidFilterSyntax(expression.clone()));
            }
            let regex = Regex::new(raw).map_err(|e| RetabError::bad_pattern(raw, e))?;
            by_field.insert(field.to_lowercase(), FieldFilter { op, regex });
        }
        Ok(FieldFilters { by_field })
    }

    /// True when no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    /// Apply the filter set, deriving a new table from the old one.
    ///
    /// Only columns with a configured filter constrain a row; the
    /// row's local keep value is the AND across those columns, and the
    /// final decision is `local_keep != invert`. With no filters
    /// configured the table passes through untouched and `changed` is
    /// false, so callers can skip the clone.
    pub fn apply(&self, data: Tabdata, invert: bool) -> (Tabdata, bool) {
        if self.is_empty() {
            return (data, false);
        }

        let active: Vec<(usize, &FieldFilter)> = data
            .headers
            .iter()
            .enumerate()
            .filter_map(|(i, header)| {
                self.by_field
                    .get(&header.trim().to_lowercase())
                    .map(|filter| (i, filter))
            })
            .collect();

        let mut kept = data.clone_without_rows();
        for row in &data.entries {
            let local_keep = active
                .iter()
                .all(|(column, filter)| filter.satisfied_by(&row[*column]));
            if local_keep != invert {
                kept.push_row(row.clone());
            }
        }
        debug!(
            "field filter kept {} of {} row(s)",
            kept.entries.len(),
            data.entries.len()
        );
        (kept, true)
    }
}
