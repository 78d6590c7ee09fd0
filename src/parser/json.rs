//! JSON ingestion.
//!
//! Accepts only a top-level array of flat, one-level-deep objects. The
//! key order of the first object establishes the header order and an
//! index map from key to column position; later objects may omit keys
//! (empty string at the mapped position) or present them in a
//! different order, but must not introduce unseen keys and must not
//! nest. serde_json's `preserve_order` feature supplies the
//! order-preserving object decode the first-object rule depends on.

use std::collections::HashMap;
use std::io::Read;

use log::debug;
use serde_json::Value;

use crate::error::RetabError;
use crate::hooks::HookRegistry;
use crate::pattern::Pattern;
use crate::tabdata::Tabdata;
use crate::Result;

/// Render a scalar leaf as cell text.
///
/// Integral floating values format with no decimal point (`Display` on
/// f64 already does this), non-integral values keep full precision,
/// and `null` renders as the empty string.
fn scalar_text(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else if let Some(f) = n.as_f64() {
                // f64's Display drops the decimal point on integral
                // values and keeps full precision otherwise.
                Ok(f.to_string())
            } else {
                Ok(n.to_string())
            }
        }
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) => Err(RetabError::InvalidFormat(
            "objects must be flat, nested values are not supported".to_string(),
        )),
    }
}

/// Parse a JSON array of flat objects into a [`Tabdata`].
///
/// After all rows are built, each row is joined with single spaces and
/// passed through the same row-inclusion test as the positional parser
/// (and any registered filter hooks), filtering the data set in one
/// pass.
pub fn parse(
    reader: impl Read,
    row_pattern: Option<&Pattern>,
    invert: bool,
    hooks: &HookRegistry,
) -> Result<Tabdata> {
    let value: Value =
        serde_json::from_reader(reader).map_err(|e| RetabError::InvalidFormat(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        _ => {
            return Err(RetabError::InvalidFormat(
                "expected a top-level array of objects".to_string(),
            ))
        }
    };

    let mut headers: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for (position, item) in items.iter().enumerate() {
        let object = match item {
            Value::Object(object) => object,
            _ => {
                return Err(RetabError::InvalidFormat(
                    "array elements must be objects".to_string(),
                ))
            }
        };

        // First object fixes the schema; key order is decode order.
        if position == 0 {
            for key in object.keys() {
                index.insert(key.clone(), headers.len());
                headers.push(key.clone());
            }
        }

        let mut row = vec![String::new(); headers.len()];
        for (key, value) in object {
            let position = *index.get(key).ok_or_else(|| {
                RetabError::InvalidFormat(format!(
                    "key '{}' does not appear in the first object",
                    key
                ))
            })?;
            row[position] = scalar_text(value)?;
        }
        rows.push(row);
    }

    let mut data = Tabdata::with_headers(headers);
    for row in rows {
        let line = row.join(" ");
        if !hooks.keep_line(&line) {
            continue;
        }
        if let Some(pattern) = row_pattern {
            if !pattern.keeps(&line, invert) {
                continue;
            }
        }
        data.push_row(row);
    }
    debug!("json input: {} column(s), {} row(s)", data.columns, data.entries.len());

    Ok(data)
}
