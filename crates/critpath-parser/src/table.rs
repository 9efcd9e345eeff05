//! Delimited task table
//!
//! One task per line:
//!
//! ```text
//! # name  duration  predecessors
//! A       3
//! B       2         A
//! D       1         B,C
//! ```
//!
//! Fields are separated by runs of whitespace unless a delimiter character
//! is given. Every field after the duration is a comma-separated list of
//! predecessor names; all of them are concatenated. Blank lines and lines
//! starting with `#` are ignored.

use crate::ParseError;

/// One parsed table row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number in the input
    pub line: usize,
    pub name: String,
    pub duration: i64,
    pub predecessors: Vec<String>,
}

/// Parse a single line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_row(
    line_no: usize,
    line: &str,
    delimiter: Option<char>,
) -> Result<Option<Row>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = match delimiter {
        Some(d) => trimmed.split(d).map(str::trim).collect(),
        None => trimmed.split_whitespace().collect(),
    };

    if fields.len() < 2 {
        return Err(ParseError::MalformedRow {
            line: line_no,
            message: format!(
                "expected at least 2 fields (name, duration), found {}",
                fields.len()
            ),
        });
    }

    let name = fields[0];
    if name.is_empty() {
        return Err(ParseError::MalformedRow {
            line: line_no,
            message: "missing task name".into(),
        });
    }

    let duration = fields[1]
        .parse::<i64>()
        .map_err(|_| ParseError::MalformedRow {
            line: line_no,
            message: format!("duration '{}' of task '{}' is not an integer", fields[1], name),
        })?;

    let predecessors = fields[2..]
        .iter()
        .flat_map(|field| field.split(','))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();

    Ok(Some(Row {
        line: line_no,
        name: name.to_string(),
        duration,
        predecessors,
    }))
}

/// Parse every row of a table, stopping at the first malformed one
pub fn parse_table(input: &str, delimiter: Option<char>) -> Result<Vec<Row>, ParseError> {
    let mut rows = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        if let Some(row) = parse_row(idx + 1, line, delimiter)? {
            rows.push(row);
        }
    }
    Ok(rows)
}
