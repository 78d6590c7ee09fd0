//! # retab
//!
//! Reshape irregular tabular text (typically command-line tool output)
//! into a structured row/column model, then filter, transform and sort
//! that model before handing it to a renderer.
//!
//! ## Overview
//!
//! Most CLI tools emit columns aligned with runs of whitespace, which
//! is pleasant to read and miserable to post-process. retab derives
//! fixed column offsets from the header line and slices every data
//! line by them, so cell content containing the separator pattern
//! stays intact. CSV and JSON inputs take alternate ingestion paths
//! into the same [`Tabdata`] model.
//!
//! The pipeline runs fixed stages strictly in sequence, once per input
//! source:
//!
//! 1. **Ingestion**: positional, CSV (single-character separator) or
//!    JSON (array of flat objects), with optional row-inclusion
//!    pattern matching (regex or fuzzy).
//! 2. **Field filter**: per-column `field=regex` / `field!=regex`
//!    constraints combined with a global invert flag.
//! 3. **Transpose**: `/search/replace/` rules applied to designated
//!    columns.
//! 4. **Sort**: stable, type-aware (lexicographic, numeric,
//!    chronological, duration).
//! 5. **Column transforms**: custom headers, `Name(N)` numbering,
//!    column selection in original order.
//! 6. **Process hooks**: the scripting-extension seam.
//!
//! Rendering, CLI wiring, configuration files, clipboard and the
//! interactive editor are external collaborators; see [`render`] and
//! [`hooks`] for the seams they plug into.
//!
//! ## Example
//!
//! ```rust
//! use retab::{Pipeline, PipelineOptions, SortMode};
//!
//! let input = "NAME   AGE\nalice  42\nbob    7\n";
//!
//! let options = PipelineOptions::new()
//!     .sort_column(2)
//!     .sort_mode(SortMode::Numeric);
//! let pipeline = Pipeline::new(options).unwrap();
//!
//! let data = pipeline.process_reader(input.as_bytes()).unwrap();
//! assert_eq!(data.headers, vec!["NAME", "AGE"]);
//! assert_eq!(data.entries[0], vec!["bob", "7"]);
//! assert_eq!(data.entries[1], vec!["alice", "42"]);
//! ```

pub mod error;
pub mod filter;
pub mod hooks;
pub mod parser;
pub mod pattern;
pub mod pipeline;
pub mod render;
pub mod sort;
pub mod tabdata;
pub mod transform;

pub use error::RetabError;
pub use filter::{FieldFilter, FieldFilters, FilterOp};
pub use hooks::{FilterHook, HookRegistry, ProcessHook};
pub use parser::DEFAULT_SEPARATOR;
pub use pattern::Pattern;
pub use pipeline::{Pipeline, PipelineOptions};
pub use render::{OutputMode, Renderer};
pub use sort::{sort_rows, SortMode};
pub use tabdata::Tabdata;
pub use transform::{select_columns, transpose, Transposer};

/// Result type for retab operations
pub type Result<T> = std::result::Result<T, RetabError>;
