//! Rendering of per-file results for the command line

use crate::finding::Finding;
use crate::formatter::FormatOutput;
use colored::*;
use serde::Serialize;

/// Outcome of processing one input
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Display name (`-` for stdin)
    pub path: String,
    pub output: FormatOutput,
    /// Formatted text differs from the input
    pub changed: bool,
}

impl FileReport {
    pub fn new(path: impl Into<String>, source: &str, output: FormatOutput) -> Self {
        let changed = !output.has_syntax_error() && output.formatted != source;
        Self {
            path: path.into(),
            output,
            changed,
        }
    }
}

/// Output formatter trait
pub trait ReportFormatter: Send + Sync {
    fn format(&self, reports: &[FileReport]) -> String;
}

/// Human-readable findings, grouped by file
pub struct TextFormatter {
    pub colored: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { colored: true }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn format_finding(
        &self,
        report: &FileReport,
        finding: &Finding,
        position: Option<(usize, usize)>,
    ) -> String {
        let location = match position {
            Some((line, column)) => format!("{}:{}:{}", report.path, line, column),
            None => report.path.clone(),
        };
        let rule = format!("[{}]", finding.rule_id);
        if self.colored {
            format!("  {} {} {}", location.bold(), finding.message.red(), rule.dimmed())
        } else {
            format!("  {} {} {}", location, finding.message, rule)
        }
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, reports: &[FileReport]) -> String {
        let mut output = String::new();
        let mut total = 0;

        for report in reports.iter().filter(|r| !r.output.is_clean()) {
            if self.colored {
                output.push_str(&format!("{}\n", report.path.underline()));
            } else {
                output.push_str(&format!("{}\n", report.path));
            }

            let highlights = report.output.highlights();
            for (finding, highlight) in report.output.findings.iter().zip(&highlights) {
                let position = highlight
                    .as_ref()
                    .map(|h| h.span.start_position(&report.output.formatted));
                output.push_str(&self.format_finding(report, finding, position));
                output.push('\n');
                total += 1;
            }
            output.push('\n');
        }

        let summary = format!(
            "{} {} checked, {} {}",
            reports.len(),
            if reports.len() == 1 { "file" } else { "files" },
            total,
            if total == 1 { "finding" } else { "findings" }
        );
        if self.colored {
            let summary = if total > 0 { summary.red().bold() } else { summary.green() };
            output.push_str(&format!("{}\n", summary));
        } else {
            output.push_str(&summary);
            output.push('\n');
        }

        output
    }
}

/// Machine-readable report
#[derive(Default)]
pub struct JsonFormatter {
    /// Include the formatted text of each file
    pub include_formatted: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_formatted(mut self) -> Self {
        self.include_formatted = true;
        self
    }
}

#[derive(Serialize)]
struct JsonFile<'a> {
    file: &'a str,
    changed: bool,
    findings: Vec<JsonFinding<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonFinding<'a> {
    rule_id: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, reports: &[FileReport]) -> String {
        let files: Vec<JsonFile> = reports
            .iter()
            .map(|report| {
                let highlights = report.output.highlights();
                let findings = report
                    .output
                    .findings
                    .iter()
                    .zip(highlights)
                    .map(|(finding, highlight)| {
                        let position =
                            highlight.map(|h| h.span.start_position(&report.output.formatted));
                        JsonFinding {
                            rule_id: &finding.rule_id,
                            message: &finding.message,
                            line: position.map(|(line, _)| line),
                            column: position.map(|(_, column)| column),
                        }
                    })
                    .collect();
                JsonFile {
                    file: &report.path,
                    changed: report.changed,
                    findings,
                    formatted: self
                        .include_formatted
                        .then_some(report.output.formatted.as_str()),
                }
            })
            .collect();

        serde_json::to_string_pretty(&files).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::format_and_validate;

    fn report(path: &str, source: &str) -> FileReport {
        FileReport::new(path, source, format_and_validate(source))
    }

    #[test]
    fn test_changed() {
        assert!(report("a.xaml", "<Grid><Border Width=\"1\"/></Grid>").changed);
        assert!(!report("a.xaml", "<Grid>\n  <Border Width=\"1\" />\n</Grid>\n").changed);
        assert!(!report("a.xaml", "<Grid>").changed);
    }

    #[test]
    fn test_text_output() {
        let reports = vec![
            report("Main.xaml", r#"<Grid><TextBlock Text="Hi" Foo="x"/></Grid>"#),
            report("Clean.xaml", r#"<Grid Background="Red" />"#),
        ];
        let output = TextFormatter::new().without_color().format(&reports);
        assert!(output.contains("Main.xaml\n"));
        assert!(output.contains(
            "  Main.xaml Unknown attribute Foo in element <TextBlock> [invalid-attribute]"
        ));
        assert!(!output.contains("Clean.xaml"));
        assert!(output.ends_with("2 files checked, 1 finding\n"));
    }

    #[test]
    fn test_text_output_clean() {
        let reports = vec![report("a.xaml", r#"<Grid Background="Red" />"#)];
        let output = TextFormatter::new().without_color().format(&reports);
        assert_eq!(output, "1 file checked, 0 findings\n");
    }

    #[test]
    fn test_json_output() {
        let reports = vec![report("Main.xaml", "<Grid><Grid>")];
        let output = JsonFormatter::new().format(&reports);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["file"], "Main.xaml");
        assert_eq!(value[0]["changed"], false);
        assert_eq!(value[0]["findings"][0]["rule_id"], "syntax");
        assert!(value[0].get("formatted").is_none());
    }

    #[test]
    fn test_json_output_with_formatted() {
        let reports = vec![report("a.xaml", r#"<Grid Background="Red"/>"#)];
        let output = JsonFormatter::new().with_formatted().format(&reports);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["formatted"], "<Grid Background=\"Red\" />\n");
        assert_eq!(value[0]["findings"].as_array().unwrap().len(), 0);
    }
}
