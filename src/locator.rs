//! Maps findings back to the formatted text for highlighting

use crate::finding::Finding;
use serde::Serialize;

/// Character range in a string, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// 1-based line and column of the span start within `text`
    pub fn start_position(&self, text: &str) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for c in text.chars().take(self.start) {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

/// A finding message located in the formatted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub message: String,
    pub span: Span,
}

/// Locate each finding's message in `formatted`, one entry per finding
///
/// Only the first literal occurrence counts. Messages that do not occur in the
/// text yield `None`.
pub fn locate(formatted: &str, findings: &[Finding]) -> Vec<Option<Highlight>> {
    findings
        .iter()
        .map(|finding| {
            let byte_start = formatted.find(finding.message.as_str())?;
            let start = formatted[..byte_start].chars().count();
            let end = start + finding.message.chars().count();
            Some(Highlight {
                message: finding.message.clone(),
                span: Span::new(start, end),
            })
        })
        .collect()
}
