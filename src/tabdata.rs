//! The in-memory row/column model shared by every pipeline stage.
//!
//! A [`Tabdata`] is produced once per input source by an ingestion
//! parser and then handed from stage to stage. Stages either mutate it
//! in place (sort) or derive a new value via [`Tabdata::clone_without_rows`]
//! plus [`Tabdata::push_row`] (filter, transpose); the superseded value
//! is dropped, never aliased.

use serde::{Deserialize, Serialize};

/// Ordered headers plus ordered string rows, with cached width metrics
/// for the rendering collaborator.
///
/// Invariant: after ingestion every row has exactly `headers.len()`
/// cells; short rows are padded with empty strings before any
/// downstream stage runs. Header uniqueness is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tabdata {
    /// Column labels in display order
    pub headers: Vec<String>,
    /// Data rows; each row has one cell per header
    pub entries: Vec<Vec<String>>,
    /// Column count as determined at ingestion time
    pub columns: usize,
    /// Width (in chars) of the widest header label
    pub maxwidth_header: usize,
    /// Width (in chars) of the widest cell per column, headers included
    pub maxwidth_per_column: Vec<usize>,
}

/// Character width of a cell, which is what the width caches track.
fn width(s: &str) -> usize {
    s.chars().count()
}

impl Tabdata {
    /// Create an empty table with the given headers.
    pub fn with_headers(headers: Vec<String>) -> Self {
        let columns = headers.len();
        let maxwidth_header = headers.iter().map(|h| width(h)).max().unwrap_or(0);
        let maxwidth_per_column = headers.iter().map(|h| width(h)).collect();
        Tabdata {
            headers,
            entries: Vec::new(),
            columns,
            maxwidth_header,
            maxwidth_per_column,
        }
    }

    /// Copy headers, column count and header widths but no rows.
    ///
    /// This is the derive pattern used by the filter and transpose
    /// stages: clone the shell, then [`push_row`](Self::push_row) the
    /// surviving (or rewritten) rows.
    pub fn clone_without_rows(&self) -> Self {
        Tabdata::with_headers(self.headers.clone())
    }

    /// Append a row, padding it to the header count and updating the
    /// width caches.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns, String::new());
        for (i, cell) in cells.iter().enumerate() {
            let w = width(cell.trim());
            if let Some(max) = self.maxwidth_per_column.get_mut(i) {
                if w > *max {
                    *max = w;
                }
            }
        }
        self.entries.push(cells);
    }

    /// Recompute all width caches from scratch.
    ///
    /// Must be called after any stage that rewrites cell or header
    /// content in place (header override, transpose).
    pub fn recompute_widths(&mut self) {
        self.maxwidth_header = self.headers.iter().map(|h| width(h)).max().unwrap_or(0);
        self.maxwidth_per_column = self.headers.iter().map(|h| width(h)).collect();
        for row in &self.entries {
            for (i, cell) in row.iter().enumerate() {
                let w = width(cell.trim());
                if let Some(max) = self.maxwidth_per_column.get_mut(i) {
                    if w > *max {
                        *max = w;
                    }
                }
            }
        }
    }

    /// Header labels with their 1-based position appended, `Name(N)`.
    ///
    /// The pipeline numbers headers before column selection, so N
    /// always reflects a column's position in the original ordering.
    pub fn numbered_headers(&self) -> Vec<String> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{}({})", h, i + 1))
            .collect()
    }

    /// True when the table has no headers and no rows.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.entries.is_empty()
    }
}
