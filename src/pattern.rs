//! Row-inclusion pattern matching.
//!
//! A [`Pattern`] is backed either by a compiled regular expression or
//! by case-insensitive fuzzy subsequence matching. Which backend is
//! used is a configuration choice, never inferred from the pattern
//! text itself.

use regex::{Regex, RegexBuilder};

use crate::error::RetabError;
use crate::Result;

/// The matching backend behind a [`Pattern`].
#[derive(Debug, Clone)]
enum Matcher {
    /// Compiled regular expression
    Regex(Regex),
    /// Lower-cased needle for fuzzy subsequence matching
    Fuzzy(String),
}

/// A compiled row-inclusion pattern.
///
/// Supports the `/regex/flags` literal syntax where `i` enables
/// case-insensitive matching and `!` sets the per-pattern negate flag.
/// Text without the surrounding slashes is taken as a plain pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// The pattern text as given, literal syntax included
    pub raw: String,
    matcher: Matcher,
    /// Parsed from the `!` flag. Stored for completeness but not
    /// consulted by [`matches`](Self::matches); the active line matcher
    /// keeps the observed behavior of ignoring it.
    pub negate: bool,
}

/// Split `/body/flags` literal syntax into its pieces.
///
/// Returns `(body, case_insensitive, negate)`. Input that is not a
/// literal comes back unchanged with both flags off.
fn split_literal(raw: &str) -> (&str, bool, bool) {
    if raw.len() >= 2 && raw.starts_with('/') {
        if let Some(close) = raw.rfind('/') {
            if close > 0 {
                let body = &raw[1..close];
                let flags = &raw[close + 1..];
                let ci = flags.contains('i');
                let negate = flags.contains('!');
                return (body, ci, negate);
            }
        }
    }
    (raw, false, false)
}

/// Case-insensitive, order-preserving subsequence match.
fn fuzzy_match(needle: &str, haystack: &str) -> bool {
    let mut wanted = needle.chars();
    let mut next = match wanted.next() {
        Some(c) => c,
        None => return true,
    };
    for c in haystack.chars().flat_map(char::to_lowercase) {
        if c == next {
            next = match wanted.next() {
                Some(c) => c,
                None => return true,
            };
        }
    }
    false
}

impl Pattern {
    /// Compile a pattern, selecting the fuzzy backend when `fuzzy` is
    /// set. An invalid regular expression fails with
    /// [`RetabError::InvalidPattern`] before any input is read.
    pub fn compile(raw: &str, fuzzy: bool) -> Result<Self> {
        let (body, case_insensitive, negate) = split_literal(raw);
        let matcher = if fuzzy {
            Matcher::Fuzzy(body.to_lowercase())
        } else {
            let regex = RegexBuilder::new(body)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| RetabError::bad_pattern(raw, e))?;
            Matcher::Regex(regex)
        };
        Ok(Pattern {
            raw: raw.to_string(),
            matcher,
            negate,
        })
    }

    /// Whether the line matches this pattern.
    pub fn matches(&self, line: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(re) => re.is_match(line),
            Matcher::Fuzzy(needle) => fuzzy_match(needle, line),
        }
    }

    /// The row-inclusion rule shared by both ingestion paths: a line is
    /// kept when `matches(line) != invert`.
    pub fn keeps(&self, line: &str, invert: bool) -> bool {
        self.matches(line) != invert
    }
}
