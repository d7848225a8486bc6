//! Format-and-validate pipeline

use crate::config::Config;
use crate::document::{ParseError, XamlDocument};
use crate::engine::RuleEngine;
use crate::finding::Finding;
use crate::locator::{locate, Highlight};
use crate::normalizer::{serialize, strip_whitespace};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse XAML: {0}")]
    Parse(#[from] ParseError),
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatOutput {
    /// Canonical text, or the input unchanged if it could not be parsed
    pub formatted: String,
    pub findings: Vec<Finding>,
}

impl FormatOutput {
    pub fn messages(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.message.clone()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has_syntax_error(&self) -> bool {
        self.findings.iter().any(Finding::is_syntax_error)
    }

    /// Spans of the findings in the formatted text
    pub fn highlights(&self) -> Vec<Option<Highlight>> {
        locate(&self.formatted, &self.findings)
    }
}

/// XAML formatter with a configured rule engine
pub struct XamlFormatter {
    engine: RuleEngine,
    validate: bool,
}

impl Default for XamlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl XamlFormatter {
    /// Formatter with the built-in vocabulary and all rules
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self::with_engine(RuleEngine::from_config(config))
    }

    pub fn with_engine(engine: RuleEngine) -> Self {
        Self {
            engine,
            validate: true,
        }
    }

    /// Skip the rules; only syntax errors are reported
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Canonical text only
    pub fn format(&self, source: &str) -> Result<String, ParseError> {
        let doc = XamlDocument::parse(source)?;
        Ok(serialize(&strip_whitespace(&doc)))
    }

    /// Parse, normalize and validate
    ///
    /// Never fails: unparseable input comes back unchanged with a single
    /// syntax-error finding.
    pub fn format_and_validate(&self, source: &str) -> FormatOutput {
        let doc = match XamlDocument::parse(source) {
            Ok(doc) => doc,
            Err(e) => {
                log::debug!("parse failed: {}", e);
                return FormatOutput {
                    formatted: source.to_string(),
                    findings: vec![Finding::syntax_error(e)],
                };
            }
        };

        let stripped = strip_whitespace(&doc);
        let formatted = serialize(&stripped);
        log::debug!("formatted {} bytes into {} bytes", source.len(), formatted.len());

        let findings = if self.validate {
            self.engine.validate(&stripped)
        } else {
            Vec::new()
        };

        FormatOutput {
            formatted,
            findings,
        }
    }

    /// Read a UTF-8 file and run the pipeline on it
    pub fn format_file(&self, path: &Path) -> Result<FormatOutput, FormatError> {
        let source = fs::read_to_string(path).map_err(|e| FormatError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::debug!("formatting {}", path.display());
        Ok(self.format_and_validate(&source))
    }
}

/// Format and validate with the built-in vocabulary
pub fn format_and_validate(source: &str) -> FormatOutput {
    XamlFormatter::new().format_and_validate(source)
}
