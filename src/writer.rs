//! Canonical XAML text writer

use crate::document::Declaration;

/// Indentation unit of the canonical form
pub const INDENT: &str = "  ";

/// Append-only writer that tracks the current nesting depth
pub struct XamlWriter {
    output: String,
    indent_level: usize,
}

impl Default for XamlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XamlWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    /// Get the formatted output
    pub fn finish(self) -> String {
        self.output
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Write current indentation
    pub fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Write the XML declaration with only the fields the source had
    pub fn write_declaration(&mut self, decl: &Declaration) {
        self.output.push_str("<?xml version=\"");
        self.output.push_str(&escape_attr(&decl.version));
        self.output.push('"');
        if let Some(enc) = &decl.encoding {
            self.output.push_str(" encoding=\"");
            self.output.push_str(&escape_attr(enc));
            self.output.push('"');
        }
        if let Some(standalone) = &decl.standalone {
            self.output.push_str(" standalone=\"");
            self.output.push_str(&escape_attr(standalone));
            self.output.push('"');
        }
        self.output.push_str("?>");
    }

    pub fn write_comment(&mut self, text: &str) {
        self.output.push_str("<!--");
        self.output.push_str(text);
        self.output.push_str("-->");
    }

    /// Write `<name`
    pub fn write_element_start(&mut self, name: &str) {
        self.output.push('<');
        self.output.push_str(name);
    }

    pub fn write_attribute(&mut self, name: &str, value: &str) {
        self.output.push(' ');
        self.output.push_str(name);
        self.output.push_str("=\"");
        self.output.push_str(&escape_attr(value));
        self.output.push('"');
    }

    /// Close opening tag (not self-closing)
    pub fn write_element_end(&mut self) {
        self.output.push('>');
    }

    /// Close self-closing tag
    pub fn write_element_end_empty(&mut self) {
        self.output.push_str(" />");
    }

    pub fn write_close_tag(&mut self, name: &str) {
        self.output.push_str("</");
        self.output.push_str(name);
        self.output.push('>');
    }

    pub fn write_text(&mut self, text: &str) {
        self.output.push_str(&escape_text(text));
    }
}

/// Escape what an attribute value needs to survive a re-parse unchanged
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '"' => result.push_str("&quot;"),
            '\t' => result.push_str("&#9;"),
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            _ => result.push(c),
        }
    }
    result
}

fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}
