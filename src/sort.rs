//! Type-aware, stable row ordering.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::tabdata::Tabdata;

/// How cell text is interpreted when comparing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Direct string comparison of trimmed cell text
    #[default]
    Lexicographic,
    /// Floating-point comparison; unparsable cells sort lowest
    Numeric,
    /// Timestamp comparison over a prioritized list of layouts;
    /// unparsable cells sort as the earliest representable time
    Chronological,
    /// Duration comparison over lenient `<integer><unit>` tokens
    Duration,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexicographic" | "string" => Ok(SortMode::Lexicographic),
            "numeric" | "number" => Ok(SortMode::Numeric),
            "chronological" | "time" => Ok(SortMode::Chronological),
            "duration" | "age" => Ok(SortMode::Duration),
            _ => Err(format!("Unknown sort mode: {}", s)),
        }
    }
}

/// Timestamp layouts tried in order; the first successful parse wins.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a cell as a timestamp, in seconds since the epoch.
///
/// Unparsable values degrade to the earliest representable time rather
/// than erroring.
fn timestamp(cell: &str) -> i64 {
    let cell = cell.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(cell) {
        return parsed.timestamp();
    }
    for layout in DATETIME_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(cell, layout) {
            return parsed.and_utc().timestamp();
        }
    }
    for layout in DATE_LAYOUTS {
        if let Ok(parsed) = NaiveDate::parse_from_str(cell, layout) {
            if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
                return midnight.and_utc().timestamp();
            }
        }
    }
    i64::MIN
}

/// Sum recognized `<integer><unit>` pairs into total seconds, unit one
/// of `d`, `h`, `m`, `s`. Unrecognized characters and digit runs
/// without a unit are silently skipped.
fn duration_seconds(cell: &str) -> u64 {
    let mut total: u64 = 0;
    let mut number: Option<u64> = None;
    for c in cell.chars() {
        if let Some(digit) = c.to_digit(10) {
            number = Some(
                number
                    .unwrap_or(0)
                    .saturating_mul(10)
                    .saturating_add(u64::from(digit)),
            );
        } else if let Some(n) = number.take() {
            let seconds = match c {
                'd' => n.saturating_mul(86_400),
                'h' => n.saturating_mul(3_600),
                'm' => n.saturating_mul(60),
                's' => n,
                _ => 0,
            };
            total = total.saturating_add(seconds);
        }
    }
    total
}

/// Parse a cell as a float, degrading to the lowest value.
fn numeric(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(f64::NEG_INFINITY)
}

/// Compare two cells under the given mode.
fn compare(a: &str, b: &str, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Lexicographic => a.trim().cmp(b.trim()),
        SortMode::Numeric => numeric(a).partial_cmp(&numeric(b)).unwrap_or(Ordering::Equal),
        SortMode::Chronological => timestamp(a).cmp(&timestamp(b)),
        SortMode::Duration => duration_seconds(a).cmp(&duration_seconds(b)),
    }
}

/// Sort rows in place by the given 1-based column, stable under ties.
///
/// `column <= 0` is a no-op; an out-of-range column falls back to
/// column 1. `descending` negates the comparator result (never a
/// reversal of the sorted output), so ties retain their original
/// relative order in both directions.
pub fn sort_rows(data: &mut Tabdata, column: i64, mode: SortMode, descending: bool) {
    if column <= 0 {
        return;
    }
    let mut index = (column as usize) - 1;
    if index >= data.columns {
        index = 0;
    }
    debug!("sorting by column {} ({:?}, descending={})", index + 1, mode, descending);

    data.entries.sort_by(|a, b| {
        let left = a.get(index).map(String::as_str).unwrap_or("");
        let right = b.get(index).map(String::as_str).unwrap_or("");
        let ordering = compare(left, right, mode);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}
