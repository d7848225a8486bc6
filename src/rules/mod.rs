//! Validation rules
//!
//! Every rule inspects the whole (whitespace-stripped) document and returns
//! its findings in document order. Rules are independent of each other and
//! never fail; text that does not match a rule's pattern is simply skipped.

mod bindings;
mod namespaces;
mod resources;
mod structure;
mod vocabulary;

pub use bindings::{
    BindingPathRule, ConverterRule, EventHandlerRule, MarkupExtensionRule, TemplateBindingRule,
};
pub use namespaces::NamespacePrefixRule;
pub use resources::{ResourceReferenceRule, StyleConflictRule, StyleTemplateRule};
pub use structure::{
    ControlTemplatePartRule, DataTemplateRule, MissingContentRule, StoryboardTargetRule,
    VisualTreeRule,
};
pub use vocabulary::{InvalidAttributeRule, UnknownControlRule, UnknownElementRule};

use crate::config::Config;
use crate::document::{Attribute, Element, XamlDocument};
use crate::finding::Finding;
use std::sync::Arc;

/// A static check over a parsed document
pub trait Rule: Send + Sync {
    /// Stable identifier, used in output and in `disabledRules`
    fn id(&self) -> &'static str;

    /// One-line summary of what the rule checks
    fn description(&self) -> &'static str;

    /// Run the rule and return its findings in document order
    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding>;
}

/// The built-in rules in registration order, set up from `config`
pub fn builtin_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    let vocabulary = Arc::new(config.vocabulary());
    let registry = Arc::new(config.registry());
    let mut namespaces = NamespacePrefixRule::new();
    if config.root_namespace_declarations {
        namespaces = namespaces.with_root_declarations();
    }

    vec![
        Box::new(MissingContentRule),
        Box::new(UnknownElementRule::new(Arc::clone(&vocabulary))),
        Box::new(InvalidAttributeRule::new(Arc::clone(&vocabulary))),
        Box::new(BindingPathRule),
        Box::new(ResourceReferenceRule),
        Box::new(StyleTemplateRule),
        Box::new(namespaces),
        Box::new(UnknownControlRule::new(vocabulary)),
        Box::new(EventHandlerRule),
        Box::new(TemplateBindingRule),
        Box::new(VisualTreeRule),
        Box::new(DataTemplateRule),
        Box::new(ConverterRule::new(Arc::clone(&registry))),
        Box::new(StyleConflictRule),
        Box::new(StoryboardTargetRule),
        Box::new(MarkupExtensionRule::new(registry)),
        Box::new(ControlTemplatePartRule),
    ]
}

/// Every attribute of every element, in document order
fn attributes(doc: &XamlDocument) -> impl Iterator<Item = (&Element, &Attribute)> {
    doc.elements()
        .flat_map(|element| element.attributes().iter().map(move |attr| (element, attr)))
}

#[cfg(test)]
pub(crate) fn messages(rule: &dyn Rule, source: &str) -> Vec<String> {
    let doc = crate::document::parse(source).unwrap().without_whitespace();
    rule.evaluate(&doc).into_iter().map(|f| f.message).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_order() {
        let rules = builtin_rules(&Config::default());
        let ids: Vec<_> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(
            ids,
            vec![
                "missing-content",
                "unknown-element",
                "invalid-attribute",
                "binding-path",
                "resource-reference",
                "style-template",
                "namespace-prefix",
                "unknown-control",
                "event-handler",
                "template-binding",
                "visual-tree",
                "data-template",
                "converter",
                "style-conflict",
                "storyboard-target",
                "markup-extension",
                "control-template-part",
            ]
        );
    }

    #[test]
    fn test_ids_unique_and_described() {
        let rules = builtin_rules(&Config::default());
        let ids: HashSet<_> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), rules.len());
        assert!(rules.iter().all(|r| !r.description().is_empty()));
    }

    #[test]
    fn test_attributes_document_order() {
        let doc = crate::document::parse(r#"<A a="1"><B b="2" c="3" /></A>"#).unwrap();
        let names: Vec<_> = attributes(&doc).map(|(e, a)| (e.name(), a.name.as_str())).collect();
        assert_eq!(names, vec![("A", "a"), ("B", "b"), ("B", "c")]);
    }
}
