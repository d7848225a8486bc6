//! Validation findings

use serde::Serialize;
use std::fmt;

/// Rule id used for findings produced by the parser
pub const SYNTAX_RULE_ID: &str = "syntax";

/// A single validation finding
///
/// Findings have no severity; any finding means the document did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Id of the rule that produced this finding
    pub rule_id: String,

    /// Human-readable message
    pub message: String,
}

impl Finding {
    pub fn new(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Finding for markup that could not be parsed
    pub fn syntax_error(error: impl fmt::Display) -> Self {
        Self::new(SYNTAX_RULE_ID, format!("Syntax error: {}", error))
    }

    pub fn is_syntax_error(&self) -> bool {
        self.rule_id == SYNTAX_RULE_ID
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
