//! # critpath-parser
//!
//! Reads task tables and turns them into validated [`Plan`]s.
//!
//! This crate provides:
//! - A row tokenizer for whitespace- or character-delimited tables
//! - Plan construction that reports the offending line on failure
//!
//! ## Example
//!
//! ```rust
//! use critpath_parser::parse_plan;
//!
//! let input = "
//! A 3
//! B 2 A
//! C 4 A
//! D 1 B,C
//! ";
//!
//! let plan = parse_plan(input, None).unwrap();
//! assert_eq!(plan.len(), 4);
//! ```

pub mod table;

pub use table::{parse_row, parse_table, Row};

use std::path::{Path, PathBuf};

use critpath_core::{Plan, PlanError};
use thiserror::Error;
use tracing::debug;

/// Parsing error
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: malformed row: {message}")]
    MalformedRow { line: usize, message: String },

    #[error("line {line}: {error}")]
    Plan { line: usize, error: PlanError },

    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Line the error was found on, if it came from the table
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedRow { line, .. } | ParseError::Plan { line, .. } => Some(*line),
            ParseError::Io { .. } => None,
        }
    }
}

/// Build a plan from table text, adding rows in the order given
pub fn parse_plan(input: &str, delimiter: Option<char>) -> Result<Plan, ParseError> {
    let rows = parse_table(input, delimiter)?;
    let mut plan = Plan::new();

    for row in &rows {
        let preds: Vec<&str> = row.predecessors.iter().map(String::as_str).collect();
        plan.add_task(&row.name, row.duration, &preds)
            .map_err(|error| ParseError::Plan {
                line: row.line,
                error,
            })?;
        debug!(line = row.line, task = %row.name, "added task");
    }

    Ok(plan)
}

/// Read and parse a table file
pub fn parse_file(path: &Path, delimiter: Option<char>) -> Result<Plan, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_plan(&content, delimiter)
}
