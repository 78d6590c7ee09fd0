//! The pipeline orchestrator.
//!
//! Composes ingestion, field filtering, transpose, sort and the column
//! transforms in a fixed order, once per input source, strictly
//! sequentially. All configuration is compiled and validated in
//! [`Pipeline::new`], before any input is read; the per-source entry
//! points then only move data through the stages.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use regex::Regex;

use crate::error::RetabError;
use crate::filter::FieldFilters;
use crate::hooks::HookRegistry;
use crate::parser::{self, csv_delimiter, DEFAULT_SEPARATOR};
use crate::pattern::Pattern;
use crate::sort::{sort_rows, SortMode};
use crate::tabdata::Tabdata;
use crate::transform::{
    number_headers, replace_headers, select_columns, transpose, Transposer,
};
use crate::Result;

/// Everything the configuration collaborator supplies, as raw values.
///
/// Built with chained setters and handed to [`Pipeline::new`], which
/// compiles and validates it.
#[derive(Debug, Default)]
pub struct PipelineOptions {
    /// Column separator; defaults to two-or-more whitespace characters
    /// or a single tab. Exactly one literal character selects CSV
    /// ingestion instead of the positional parser.
    pub separator: Option<String>,
    /// Row-inclusion pattern, `/regex/flags` literal syntax allowed
    pub pattern: Option<String>,
    /// Use fuzzy subsequence matching instead of a regex
    pub fuzzy: bool,
    /// Global invert flag for the row pattern and the field filters
    pub invert: bool,
    /// Raw `field=regex` / `field!=regex` filter expressions
    pub filters: Vec<String>,
    /// 1-based columns to display; empty means all
    pub use_columns: Vec<usize>,
    /// Positional replacement labels for headers
    pub custom_headers: Vec<String>,
    /// Append `(N)` position suffixes to headers
    pub numbered_headers: bool,
    /// 1-based columns designated for transpose rules
    pub transpose_columns: Vec<usize>,
    /// Raw `/search/replace/` transpose rules, paired positionally
    /// with `transpose_columns`
    pub transposers: Vec<String>,
    /// 1-based sort column; zero or negative disables sorting
    pub sort_column: i64,
    /// Cell interpretation for sorting
    pub sort_mode: SortMode,
    /// Negate the sort comparator
    pub sort_descending: bool,
    /// Treat input as a JSON array of flat objects
    pub json_input: bool,
    /// Extension hooks, threaded through ingestion and the tail of the
    /// pipeline
    pub hooks: HookRegistry,
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn filters(mut self, filters: Vec<String>) -> Self {
        self.filters = filters;
        self
    }

    pub fn use_columns(mut self, columns: Vec<usize>) -> Self {
        self.use_columns = columns;
        self
    }

    pub fn custom_headers(mut self, headers: Vec<String>) -> Self {
        self.custom_headers = headers;
        self
    }

    pub fn numbered_headers(mut self, numbered: bool) -> Self {
        self.numbered_headers = numbered;
        self
    }

    pub fn transpose(mut self, columns: Vec<usize>, rules: Vec<String>) -> Self {
        self.transpose_columns = columns;
        self.transposers = rules;
        self
    }

    pub fn sort_column(mut self, column: i64) -> Self {
        self.sort_column = column;
        self
    }

    pub fn sort_mode(mut self, mode: SortMode) -> Self {
        self.sort_mode = mode;
        self
    }

    pub fn sort_descending(mut self, descending: bool) -> Self {
        self.sort_descending = descending;
        self
    }

    pub fn json_input(mut self, json: bool) -> Self {
        self.json_input = json;
        self
    }

    pub fn hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }
}

/// Which ingestion path an input source takes.
#[derive(Debug, Clone)]
enum Ingest {
    Positional(Regex),
    Csv(u8),
    Json,
}

/// A compiled, validated pipeline. Create once, then run against any
/// number of input sources.
#[derive(Debug)]
pub struct Pipeline {
    ingest: Ingest,
    row_pattern: Option<Pattern>,
    invert: bool,
    filters: FieldFilters,
    use_columns: Vec<usize>,
    custom_headers: Vec<String>,
    numbered_headers: bool,
    transpose_columns: Vec<usize>,
    transposers: Vec<Transposer>,
    sort_column: i64,
    sort_mode: SortMode,
    sort_descending: bool,
    hooks: HookRegistry,
}

impl Pipeline {
    /// Compile and validate the options.
    ///
    /// Every configuration failure surfaces here: bad separator, row
    /// pattern, filter or transposer regexes as
    /// [`RetabError::InvalidPattern`], malformed filter expressions as
    /// [`RetabError::InvalidFilterSyntax`], malformed transpose rules
    /// as [`RetabError::InvalidTransposerSyntax`] and a transpose
    /// column/rule count mismatch as [`RetabError::ConfigMismatch`],
    /// all before a single input line is read.
    pub fn new(options: PipelineOptions) -> Result<Self> {
        let separator = options
            .separator
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());

        let ingest = if options.json_input {
            Ingest::Json
        } else if let Some(delimiter) = csv_delimiter(&separator) {
            Ingest::Csv(delimiter)
        } else {
            let regex =
                Regex::new(&separator).map_err(|e| RetabError::bad_pattern(&separator, e))?;
            Ingest::Positional(regex)
        };

        let row_pattern = options
            .pattern
            .as_deref()
            .map(|raw| Pattern::compile(raw, options.fuzzy))
            .transpose()?;

        let filters = FieldFilters::parse(&options.filters)?;

        let transposers = Transposer::parse_all(&options.transposers)?;
        if options.transpose_columns.len() != transposers.len() {
            return Err(RetabError::ConfigMismatch {
                columns: options.transpose_columns.len(),
                rules: transposers.len(),
            });
        }

        Ok(Pipeline {
            ingest,
            row_pattern,
            invert: options.invert,
            filters,
            use_columns: options.use_columns,
            custom_headers: options.custom_headers,
            numbered_headers: options.numbered_headers,
            transpose_columns: options.transpose_columns,
            transposers,
            sort_column: options.sort_column,
            sort_mode: options.sort_mode,
            sort_descending: options.sort_descending,
            hooks: options.hooks,
        })
    }

    /// Run the full pipeline over one input source.
    ///
    /// Stage order is fixed: ingestion, field filter, transpose, sort,
    /// header override, header numbering, column selection, process
    /// hooks. Ownership of the table moves from stage to stage.
    pub fn process_reader(&self, reader: impl BufRead) -> Result<Tabdata> {
        let mut data = match &self.ingest {
            Ingest::Positional(separator) => parser::positional::parse(
                reader,
                separator,
                self.row_pattern.as_ref(),
                self.invert,
                &self.hooks,
            )?,
            Ingest::Csv(delimiter) => parser::csv::parse(reader, *delimiter)?,
            Ingest::Json => parser::json::parse(
                reader,
                self.row_pattern.as_ref(),
                self.invert,
                &self.hooks,
            )?,
        };
        debug!("ingested {} row(s), {} column(s)", data.entries.len(), data.columns);

        let (filtered, changed) = self.filters.apply(data, self.invert);
        data = filtered;
        if changed {
            debug!("field filter left {} row(s)", data.entries.len());
        }

        data = transpose(data, &self.transpose_columns, &self.transposers)?;

        sort_rows(&mut data, self.sort_column, self.sort_mode, self.sort_descending);

        if !self.custom_headers.is_empty() {
            replace_headers(&mut data, &self.custom_headers);
        }
        if self.numbered_headers {
            number_headers(&mut data);
        }
        data = select_columns(data, &self.use_columns);

        let (hooked, data) = self.hooks.run_processors(data);
        if hooked {
            debug!("process hooks rewrote the table");
        }

        Ok(data)
    }

    /// Run the pipeline over a file.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<Tabdata> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RetabError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.process_reader(BufReader::new(file))
    }

    /// Run the pipeline over several files, strictly in order.
    ///
    /// Files are fully independent; no state is shared or aggregated
    /// across them. The first error aborts the whole run (fail-fast,
    /// no partial-result policy).
    pub fn process_files(
        &self,
        paths: impl IntoIterator<Item = impl AsRef<Path>>,
    ) -> Result<Vec<Tabdata>> {
        let mut results = Vec::new();
        for path in paths {
            results.push(self.process_file(path)?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(options: PipelineOptions, input: &str) -> Tabdata {
        Pipeline::new(options)
            .unwrap()
            .process_reader(input.as_bytes())
            .unwrap()
    }

    #[test]
    fn test_end_to_end_default_separator() {
        let data = run(PipelineOptions::new(), "ONE  TWO  THREE\nfoo  bar  baz\n");
        assert_eq!(data.headers, vec!["ONE", "TWO", "THREE"]);
        assert_eq!(data.entries, vec![vec!["foo", "bar", "baz"]]);
    }

    #[test]
    fn test_end_to_end_field_filter() {
        let input = "ONE    TWO    THREE\nasd    19191  8d8\nigig   29292  hmpf\n";
        let data = run(
            PipelineOptions::new().filters(vec!["one=19".to_string()]),
            input,
        );
        assert!(data.entries.is_empty());
        let data = run(
            PipelineOptions::new().filters(vec!["two=19".to_string()]),
            input,
        );
        assert_eq!(data.entries.len(), 1);
        assert!(data.entries[0].iter().any(|c| c == "19191"));
    }

    #[test]
    fn test_field_filter_keeps_only_matching_row() {
        let input = "ONE    TWO\n19191  asd\n29292  igig\n";
        let data = run(
            PipelineOptions::new().filters(vec!["one=19".to_string()]),
            input,
        );
        assert_eq!(data.entries, vec![vec!["19191", "asd"]]);
    }

    #[test]
    fn test_single_char_separator_selects_csv() {
        let data = run(
            PipelineOptions::new().separator(","),
            "a,b\n1,\"x, y\"\n",
        );
        assert_eq!(data.headers, vec!["a", "b"]);
        assert_eq!(data.entries, vec![vec!["1", "x, y"]]);
    }

    #[test]
    fn test_json_input_flag() {
        let data = run(
            PipelineOptions::new().json_input(true),
            r#"[{"a":1,"b":2}]"#,
        );
        assert_eq!(data.headers, vec!["a", "b"]);
        assert_eq!(data.entries, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_config_errors_surface_before_reading() {
        assert!(matches!(
            Pipeline::new(PipelineOptions::new().separator("(bad")).unwrap_err(),
            RetabError::InvalidPattern { .. }
        ));
        assert!(matches!(
            Pipeline::new(PipelineOptions::new().pattern("(bad")).unwrap_err(),
            RetabError::InvalidPattern { .. }
        ));
        assert!(matches!(
            Pipeline::new(PipelineOptions::new().filters(vec!["bad".to_string()])).unwrap_err(),
            RetabError::InvalidFilterSyntax(_)
        ));
        assert!(matches!(
            Pipeline::new(
                PipelineOptions::new().transpose(vec![1, 2], vec!["/a/b/".to_string()])
            )
            .unwrap_err(),
            RetabError::ConfigMismatch { columns: 2, rules: 1 }
        ));
        assert!(matches!(
            Pipeline::new(PipelineOptions::new().transpose(vec![1], vec!["bad".to_string()]))
                .unwrap_err(),
            RetabError::InvalidTransposerSyntax(_)
        ));
    }

    #[test]
    fn test_sort_runs_before_selection() {
        // Sorting by column 2 then selecting column 1 only: the sort
        // key column is gone from the output but ordered the rows.
        let input = "NAME  AGE\nbob   30\nalice  7\n";
        let data = run(
            PipelineOptions::new()
                .sort_column(2)
                .sort_mode(SortMode::Numeric)
                .use_columns(vec![1]),
            input,
        );
        assert_eq!(data.headers, vec!["NAME"]);
        assert_eq!(data.entries, vec![vec!["alice"], vec!["bob"]]);
    }

    #[test]
    fn test_numbering_reflects_original_positions_after_selection() {
        let input = "A  B  C\nx  y  z\n";
        let data = run(
            PipelineOptions::new()
                .numbered_headers(true)
                .use_columns(vec![3, 1]),
            input,
        );
        assert_eq!(data.headers, vec!["A(1)", "C(3)"]);
    }

    #[test]
    fn test_custom_headers_then_numbering() {
        let input = "A  B\nx  y\n";
        let data = run(
            PipelineOptions::new()
                .custom_headers(vec!["X".to_string()])
                .numbered_headers(true),
            input,
        );
        assert_eq!(data.headers, vec!["X(1)", "B(2)"]);
    }

    #[test]
    fn test_transpose_through_pipeline() {
        let input = "HOST     STATE\nweb-1    running\nweb-2    stopped\n";
        let data = run(
            PipelineOptions::new().transpose(vec![2], vec!["/running/up/".to_string()]),
            input,
        );
        assert_eq!(data.entries[0], vec!["web-1", "up"]);
        assert_eq!(data.entries[1], vec!["web-2", "stopped"]);
    }

    #[test]
    fn test_fuzzy_pattern_through_pipeline() {
        let input = "NAME  ROLE\nalice  admin\nbob    user\n";
        let data = run(
            PipelineOptions::new().pattern("alc").fuzzy(true),
            input,
        );
        assert_eq!(data.entries, vec![vec!["alice", "admin"]]);
    }

    #[test]
    fn test_process_hooks_run_last() {
        let mut hooks = HookRegistry::new();
        hooks.register_process(|mut data| {
            data.entries.retain(|row| row[0] != "drop-me");
            (true, data)
        });
        let input = "A  B\nkeep  1\ndrop-me  2\n";
        let data = run(PipelineOptions::new().hooks(hooks), input);
        assert_eq!(data.entries, vec![vec!["keep", "1"]]);
    }

    #[test]
    fn test_missing_file_is_file_read_error() {
        let pipeline = Pipeline::new(PipelineOptions::new()).unwrap();
        let err = pipeline.process_file("/no/such/file").unwrap_err();
        assert!(matches!(err, RetabError::FileRead { .. }));
    }
}
