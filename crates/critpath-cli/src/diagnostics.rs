//! Error reporting for CLI output
//!
//! Failures are written rustc-style to stderr:
//!
//! ```text
//! error: unknown predecessor: task 'B' depends on 'C', which is not defined before it
//!   --> plan.txt:2
//! ```
//!
//! ## Exit Code Semantics
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Success: the plan was built and rendered |
//! | 1 | Failure: input, construction, scheduling or output error |
//!
//! Nothing is rendered when the exit code is 1.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use critpath_parser::ParseError;

// ============================================================================
// Exit Code
// ============================================================================

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: plan built and rendered
    Success = 0,
    /// Failure: any error was reported
    Failure = 1,
}

impl ExitCode {
    /// Get the numeric value
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code as u8)
    }
}

// ============================================================================
// Diagnostic
// ============================================================================

/// A single reportable failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub file: Option<PathBuf>,
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: None,
            line: None,
        }
    }

    /// Build from a parser failure, pointing at `file` and the offending line
    pub fn from_parse_error(err: &ParseError, file: &Path) -> Self {
        let message = match err {
            ParseError::MalformedRow { message, .. } => format!("malformed row: {}", message),
            ParseError::Plan { error, .. } => error.to_string(),
            ParseError::Io { source, .. } => format!("cannot read input: {}", source),
        };
        Self {
            message,
            file: Some(file.to_path_buf()),
            line: err.line(),
        }
    }

    /// Build from any error, using the parser location when there is one
    pub fn from_error(err: &anyhow::Error, file: &Path) -> Self {
        match err.downcast_ref::<ParseError>() {
            Some(parse_err) => Self::from_parse_error(parse_err, file),
            None => Self::new(format!("{:#}", err)),
        }
    }
}

/// Write a diagnostic in `error: message` / `--> file:line` form
pub fn emit<W: Write>(writer: &mut W, diagnostic: &Diagnostic) -> std::io::Result<()> {
    writeln!(writer, "error: {}", diagnostic.message)?;
    if let Some(file) = &diagnostic.file {
        match diagnostic.line {
            Some(line) => writeln!(writer, "  --> {}:{}", file.display(), line)?,
            None => writeln!(writer, "  --> {}", file.display())?,
        }
    }
    Ok(())
}
