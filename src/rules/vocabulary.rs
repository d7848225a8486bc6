//! Whitelist rules backed by the configured vocabulary

use super::Rule;
use crate::document::XamlDocument;
use crate::finding::Finding;
use crate::vocabulary::Vocabulary;
use std::sync::Arc;

pub struct UnknownElementRule {
    vocabulary: Arc<Vocabulary>,
}

impl UnknownElementRule {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }
}

impl Rule for UnknownElementRule {
    fn id(&self) -> &'static str {
        "unknown-element"
    }

    fn description(&self) -> &'static str {
        "Tag name is not a known element"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        doc.elements()
            .filter(|e| !self.vocabulary.is_known_element(e.name()))
            .map(|e| Finding::new(self.id(), format!("Unknown element: <{}>", e.name())))
            .collect()
    }
}

/// Attributes outside an element's whitelist; elements without one are not checked
pub struct InvalidAttributeRule {
    vocabulary: Arc<Vocabulary>,
}

impl InvalidAttributeRule {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }
}

impl Rule for InvalidAttributeRule {
    fn id(&self) -> &'static str {
        "invalid-attribute"
    }

    fn description(&self) -> &'static str {
        "Attribute is not allowed on this element"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        let mut findings = Vec::new();

        for element in doc.elements() {
            let Some(allowed) = self.vocabulary.allowed_attributes(element.name()) else {
                continue;
            };
            for attr in element.attributes() {
                if !allowed.contains(&attr.name) {
                    findings.push(Finding::new(
                        self.id(),
                        format!("Unknown attribute {} in element <{}>", attr.name, element.name()),
                    ));
                }
            }
        }

        findings
    }
}

pub struct UnknownControlRule {
    vocabulary: Arc<Vocabulary>,
}

impl UnknownControlRule {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }
}

impl Rule for UnknownControlRule {
    fn id(&self) -> &'static str {
        "unknown-control"
    }

    fn description(&self) -> &'static str {
        "Tag name is not a known control"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        doc.elements()
            .filter(|e| !self.vocabulary.is_known_control(e.name()))
            .map(|e| Finding::new(self.id(), format!("Unknown control: <{}>", e.name())))
            .collect()
    }
}
