//! The rendering seam.
//!
//! Renderers are external collaborators: this module only defines the
//! output-mode tag and the trait a renderer implements to receive the
//! final [`Tabdata`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tabdata::Tabdata;
use crate::Result;

/// Which output format a renderer should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputMode {
    /// ASCII-aligned table
    #[default]
    Ascii,
    /// Markdown table
    Markdown,
    /// Emacs org-mode table
    Orgtbl,
    /// Shell `KEY="value"` lines
    Shell,
    /// List of per-row mappings keyed by lower-cased header
    Yaml,
    /// Comma-separated values
    Csv,
}

impl OutputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Ascii => "ascii",
            OutputMode::Markdown => "markdown",
            OutputMode::Orgtbl => "orgtbl",
            OutputMode::Shell => "shell",
            OutputMode::Yaml => "yaml",
            OutputMode::Csv => "csv",
        }
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascii" | "table" => Ok(OutputMode::Ascii),
            "markdown" | "md" => Ok(OutputMode::Markdown),
            "orgtbl" | "org" => Ok(OutputMode::Orgtbl),
            "shell" => Ok(OutputMode::Shell),
            "yaml" => Ok(OutputMode::Yaml),
            "csv" => Ok(OutputMode::Csv),
            _ => Err(format!("Unknown output mode: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receives the final table. Implemented by the rendering collaborator.
pub trait Renderer {
    fn render(&mut self, data: &Tabdata, mode: OutputMode) -> Result<()>;
}
