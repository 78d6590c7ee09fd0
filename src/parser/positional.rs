//! Positional schema parser.
//!
//! The first non-empty input line is the header line. Every
//! non-overlapping match of the separator pattern within it, together
//! with the preceding gap, defines one column's `[begin, end)` span in
//! character offsets; the text after the last match forms a final
//! column whose end is open ("to end of line"). Data lines are sliced
//! by these fixed offsets rather than re-split, so cell content may
//! legitimately contain the separator pattern as long as it stays
//! inside its column's span.

use std::io::BufRead;

use log::debug;
use regex::Regex;

use crate::hooks::HookRegistry;
use crate::pattern::Pattern;
use crate::tabdata::Tabdata;
use crate::Result;

/// One column's character-offset span. `end == None` means "to end of
/// line", so trailing content wider than the header is still captured.
#[derive(Debug, Clone, Copy)]
struct Span {
    begin: usize,
    end: Option<usize>,
}

/// Derive column spans from the header line.
///
/// A header with zero separator matches yields exactly one column
/// spanning the whole line.
fn header_spans(header: &str, separator: &Regex) -> Vec<Span> {
    // Regex matches are byte offsets; spans are kept in char offsets so
    // multibyte data lines slice safely.
    let char_at = |byte: usize| header[..byte].chars().count();

    let mut spans = Vec::new();
    let mut begin = 0usize;
    for m in separator.find_iter(header) {
        let end = char_at(m.end());
        spans.push(Span {
            begin,
            end: Some(end),
        });
        begin = end;
    }
    spans.push(Span { begin, end: None });
    spans
}

/// Slice one span out of a line, trimmed. Spans beyond the line's end
/// produce an empty cell, which is how short rows get padded.
fn slice(chars: &[char], span: Span) -> String {
    let begin = span.begin.min(chars.len());
    let end = span.end.unwrap_or(chars.len()).min(chars.len());
    chars[begin..end].iter().collect::<String>().trim().to_string()
}

/// Parse positionally structured text into a [`Tabdata`].
///
/// The optional row pattern plus the global invert flag are evaluated
/// per data line before slicing, as are any registered filter hooks;
/// rejected lines never become rows. Empty input yields an empty table,
/// not an error.
pub fn parse(
    reader: impl BufRead,
    separator: &Regex,
    row_pattern: Option<&Pattern>,
    invert: bool,
    hooks: &HookRegistry,
) -> Result<Tabdata> {
    let mut lines = reader.lines();

    let header = loop {
        match lines.next() {
            Some(line) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => return Ok(Tabdata::default()),
        }
    };

    let spans = header_spans(&header, separator);
    let header_chars: Vec<char> = header.chars().collect();
    let headers: Vec<String> = spans.iter().map(|s| slice(&header_chars, *s)).collect();
    let mut data = Tabdata::with_headers(headers);
    debug!("positional header: {} column(s)", data.columns);

    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if !hooks.keep_line(&line) {
            continue;
        }
        if let Some(pattern) = row_pattern {
            if !pattern.keeps(&line, invert) {
                continue;
            }
        }
        let chars: Vec<char> = line.chars().collect();
        let cells: Vec<String> = spans.iter().map(|s| slice(&chars, *s)).collect();
        data.push_row(cells);
    }

    Ok(data)
}
