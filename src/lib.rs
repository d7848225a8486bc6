//! XAML formatter and validator
//!
//! Parses XAML into an owned tree, prints it in a canonical layout and runs a
//! fixed set of static checks over it. Checks are plausibility checks against
//! a closed vocabulary of WinUI 3 names, extensible through configuration.
//!
//! ```
//! let output = xaml_fmt::format_and_validate(r#"<Grid><TextBlock Text="Hi" Foo="x"/></Grid>"#);
//! assert_eq!(output.formatted, "<Grid>\n  <TextBlock Text=\"Hi\" Foo=\"x\" />\n</Grid>\n");
//! assert_eq!(output.messages(), vec!["Unknown attribute Foo in element <TextBlock>"]);
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod finding;
pub mod formatter;
pub mod locator;
pub mod normalizer;
pub mod output;
pub mod rules;
pub mod vocabulary;
mod writer;

pub use config::{Config, ConfigError};
pub use document::{parse, Attribute, Element, Node, ParseError, XamlDocument};
pub use engine::RuleEngine;
pub use finding::Finding;
pub use formatter::{format_and_validate, FormatError, FormatOutput, XamlFormatter};
pub use locator::{locate, Highlight, Span};
pub use normalizer::{normalize, serialize, strip_whitespace};
pub use rules::Rule;
pub use vocabulary::{ExtensionRegistry, Vocabulary};
