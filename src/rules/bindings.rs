//! Rules over markup extension usage inside attribute values

use super::{attributes, Rule};
use crate::document::XamlDocument;
use crate::finding::Finding;
use crate::vocabulary::ExtensionRegistry;
use regex::Regex;
use std::sync::{Arc, LazyLock};

static BINDING_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{Binding\s+Path=([^,}]*)").unwrap());

static HANDLER_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*$").unwrap());

static TEMPLATE_BINDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{TemplateBinding\s+(\w+)\}").unwrap());

static CONVERTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\w+Converter)\}").unwrap());

static MARKUP_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+Extension)\}").unwrap());

/// `{Binding Path=...}` with nothing after `Path=`
pub struct BindingPathRule;

impl Rule for BindingPathRule {
    fn id(&self) -> &'static str {
        "binding-path"
    }

    fn description(&self) -> &'static str {
        "Binding has an empty Path"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        attributes(doc)
            .filter(|(_, attr)| {
                BINDING_PATH
                    .captures_iter(&attr.value)
                    .any(|caps| caps[1].trim().is_empty())
            })
            .map(|(element, attr)| {
                Finding::new(
                    self.id(),
                    format!(
                        "Binding path error in attribute {} of element <{}>",
                        attr.name,
                        element.name()
                    ),
                )
            })
            .collect()
    }
}

/// Event attributes must name a plain identifier
pub struct EventHandlerRule;

impl Rule for EventHandlerRule {
    fn id(&self) -> &'static str {
        "event-handler"
    }

    fn description(&self) -> &'static str {
        "Event handler is not a valid identifier"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        attributes(doc)
            .filter(|(_, attr)| attr.name.contains("Click") || attr.name.contains("Handler"))
            .filter(|(_, attr)| !HANDLER_NAME.is_match(&attr.value))
            .map(|(element, attr)| {
                Finding::new(
                    self.id(),
                    format!(
                        "Invalid event handler name '{}' in attribute {} of element <{}>",
                        attr.value,
                        attr.name,
                        element.name()
                    ),
                )
            })
            .collect()
    }
}

/// `{TemplateBinding P}` where `P` is not set on the same element
pub struct TemplateBindingRule;

impl Rule for TemplateBindingRule {
    fn id(&self) -> &'static str {
        "template-binding"
    }

    fn description(&self) -> &'static str {
        "TemplateBinding names a property the element does not set"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (element, attr) in attributes(doc) {
            for caps in TEMPLATE_BINDING.captures_iter(&attr.value) {
                let property = &caps[1];
                if !element.has_attr(property) {
                    findings.push(Finding::new(
                        self.id(),
                        format!(
                            "Invalid TemplateBinding '{}' in element <{}>",
                            property,
                            element.name()
                        ),
                    ));
                }
            }
        }

        findings
    }
}

/// `{NameConverter}` in a converter attribute that the registry does not list
pub struct ConverterRule {
    registry: Arc<ExtensionRegistry>,
}

impl ConverterRule {
    pub fn new(registry: Arc<ExtensionRegistry>) -> Self {
        Self { registry }
    }
}

impl Rule for ConverterRule {
    fn id(&self) -> &'static str {
        "converter"
    }

    fn description(&self) -> &'static str {
        "Converter is not registered"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        let known = self.registry.converters();
        if known.is_empty() {
            return Vec::new();
        }

        let mut findings = Vec::new();
        for (element, attr) in attributes(doc).filter(|(_, a)| a.name.contains("Converter")) {
            for caps in CONVERTER.captures_iter(&attr.value) {
                let name = &caps[1];
                if !known.contains(name) {
                    findings.push(Finding::new(
                        self.id(),
                        format!("Converter '{}' not found in element <{}>", name, element.name()),
                    ));
                }
            }
        }
        findings
    }
}

/// `{NameExtension}` in a value mentioning MarkupExtension that the registry does not list
pub struct MarkupExtensionRule {
    registry: Arc<ExtensionRegistry>,
}

impl MarkupExtensionRule {
    pub fn new(registry: Arc<ExtensionRegistry>) -> Self {
        Self { registry }
    }
}

impl Rule for MarkupExtensionRule {
    fn id(&self) -> &'static str {
        "markup-extension"
    }

    fn description(&self) -> &'static str {
        "Markup extension is not registered"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        let known = self.registry.markup_extensions();
        if known.is_empty() {
            return Vec::new();
        }

        let mut findings = Vec::new();
        let candidates =
            attributes(doc).filter(|(_, a)| a.value.contains("MarkupExtension"));
        for (element, attr) in candidates {
            for caps in MARKUP_EXTENSION.captures_iter(&attr.value) {
                let name = &caps[1];
                if !known.contains(name) {
                    findings.push(Finding::new(
                        self.id(),
                        format!(
                            "MarkupExtension '{}' not found in element <{}>",
                            name,
                            element.name()
                        ),
                    ));
                }
            }
        }
        findings
    }
}
