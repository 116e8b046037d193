//! Line-addressed parse diagnostics with a highlighted source window.

use std::fmt::{self, Display, Formatter};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::dialect::Dialect;

/// Lines shown on each side of the faulting line.
pub const CONTEXT_RADIUS: usize = 2;

static PREFIXED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^([A-Za-z]+): line (\d+): (.*)$").expect("valid regex"));
static LEADING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^line (\d+): (.*)$").expect("valid regex"));
static ANY_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bline (\d+)\b").expect("valid regex"));

/// A structural fault located in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFault {
    /// 1-indexed line number.
    pub line: usize,
    /// Column, 0 when unknown.
    pub column: usize,
    /// Text of the faulting line, empty if the line is outside the input.
    pub content: String,
    /// Up to [`CONTEXT_RADIUS`] lines before and after, including the faulting line.
    pub context: Vec<String>,
    pub message: String,
    pub dialect: Option<Dialect>,
}

impl ParseFault {
    /// Build a fault for `line`/`column` of `input`.
    ///
    /// A line outside `1..=line_count` still yields a fault, just without
    /// content or context.
    pub fn at(
        input: &str,
        line: usize,
        column: usize,
        dialect: Dialect,
        message: impl Into<String>,
    ) -> Self {
        let (context, content) = extract_context(input, line, CONTEXT_RADIUS).unwrap_or_default();
        Self {
            line,
            column,
            content,
            context,
            message: message.into(),
            dialect: Some(dialect),
        }
    }

    /// Recover a line number from a library error message.
    ///
    /// Recognises `"<dialect>: line N: msg"`, `"line N: msg"` and a bare
    /// `"line N"` anywhere in the text. A line number that does not fit in
    /// `usize` falls through to the next shape. Returns `None` when no shape
    /// matches.
    pub fn from_native(input: &str, dialect: Dialect, message: &str) -> Option<Self> {
        if let Some(caps) = PREFIXED_LINE.captures(message) {
            if caps[1].eq_ignore_ascii_case(dialect.as_str()) {
                if let Ok(line) = caps[2].parse() {
                    return Some(Self::at(input, line, 0, dialect, &caps[3]));
                }
            }
        }

        if let Some(caps) = LEADING_LINE.captures(message) {
            if let Ok(line) = caps[1].parse() {
                return Some(Self::at(input, line, 0, dialect, &caps[2]));
            }
        }

        ANY_LINE.captures_iter(message).find_map(|caps| {
            let line = caps[1].parse().ok()?;
            Some(Self::at(input, line, 0, dialect, message))
        })
    }

    fn first_context_line(&self) -> usize {
        self.line.saturating_sub(CONTEXT_RADIUS).max(1)
    }
}

impl Display for ParseFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at line {}", self.line)?;
        if self.column > 0 {
            write!(f, ", column {}", self.column)?;
        }
        if let Some(dialect) = self.dialect {
            write!(f, " ({dialect} format)")?;
        }
        f.write_str(":")?;

        if self.context.is_empty() {
            return write!(f, " {}", self.message);
        }

        f.write_str("\n\n")?;
        let start = self.first_context_line();
        for (offset, text) in self.context.iter().enumerate() {
            let number = start + offset;
            if number == self.line {
                writeln!(f, ">>> {number:4} | {text}")?;
            } else {
                writeln!(f, "    {number:4} | {text}")?;
            }
        }
        write!(f, "\n{}", self.message)
    }
}

impl std::error::Error for ParseFault {}

/// Return the window around `line` and the line's own text.
///
/// `None` if `line` is outside `1..=line_count`.
pub fn extract_context(input: &str, line: usize, radius: usize) -> Option<(Vec<String>, String)> {
    let lines: Vec<&str> = input.lines().collect();
    if line == 0 || line > lines.len() {
        return None;
    }

    let idx = line - 1;
    let start = idx.saturating_sub(radius);
    let end = (idx + radius + 1).min(lines.len());
    let context = lines[start..end].iter().map(|l| l.to_string()).collect();
    Some((context, lines[idx].to_string()))
}
