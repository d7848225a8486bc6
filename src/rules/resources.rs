//! Resource and style rules

use super::{attributes, Rule};
use crate::document::XamlDocument;
use crate::finding::Finding;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static RESOURCE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(Static|Dynamic)Resource\s+(\w+)\}").unwrap());

static BASED_ON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{StaticResource \w+\}").unwrap());

/// `x:Key` values of the direct children of every resource container
///
/// The set covers the whole document, so a reference may appear before the
/// resource it names.
fn resource_keys(doc: &XamlDocument) -> HashSet<&str> {
    doc.elements()
        .filter(|e| e.name() == "ResourceDictionary" || e.name().contains("Resource"))
        .flat_map(|container| container.child_elements())
        .filter_map(|child| child.attr("x:Key"))
        .collect()
}

/// `{StaticResource K}` / `{DynamicResource K}` where `K` is never defined
pub struct ResourceReferenceRule;

impl Rule for ResourceReferenceRule {
    fn id(&self) -> &'static str {
        "resource-reference"
    }

    fn description(&self) -> &'static str {
        "Resource reference has no matching x:Key"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        let keys = resource_keys(doc);
        log::trace!("{} resource keys defined", keys.len());

        let mut findings = Vec::new();
        for (element, attr) in attributes(doc) {
            for caps in RESOURCE_REFERENCE.captures_iter(&attr.value) {
                let key = &caps[2];
                if !keys.contains(key) {
                    findings.push(Finding::new(
                        self.id(),
                        format!("Resource '{}' not found in element <{}>", key, element.name()),
                    ));
                }
            }
        }
        findings
    }
}

/// Styles and templates need a TargetType; `BasedOn` must be a static resource
pub struct StyleTemplateRule;

impl Rule for StyleTemplateRule {
    fn id(&self) -> &'static str {
        "style-template"
    }

    fn description(&self) -> &'static str {
        "Style or template is missing TargetType or has a bad BasedOn"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        let mut findings = Vec::new();

        for element in doc.elements() {
            let name = element.name();
            if !name.contains("Style") && !name.contains("Template") {
                continue;
            }

            if !element.has_attr("TargetType") {
                findings.push(Finding::new(
                    self.id(),
                    format!(
                        "Style or Template in element <{}> missing 'TargetType' attribute",
                        name
                    ),
                ));
            }

            if name == "Style" {
                if let Some(based_on) = element.attr("BasedOn") {
                    if !BASED_ON.is_match(based_on) {
                        findings.push(Finding::new(
                            self.id(),
                            format!("Invalid BasedOn reference '{}' in <{}>", based_on, name),
                        ));
                    }
                }
            }
        }

        findings
    }
}

/// Two or more Styles for the same TargetType
pub struct StyleConflictRule;

impl Rule for StyleConflictRule {
    fn id(&self) -> &'static str {
        "style-conflict"
    }

    fn description(&self) -> &'static str {
        "Several styles share a TargetType"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        let targets: Vec<&str> = doc
            .elements_named("Style")
            .filter_map(|style| style.attr("TargetType"))
            .collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for target in &targets {
            *counts.entry(*target).or_insert(0) += 1;
        }

        targets
            .iter()
            .filter(|target| counts[*target] > 1)
            .map(|target| {
                Finding::new(
                    self.id(),
                    format!("Conflicting styles for TargetType '{}' in element <Style>", target),
                )
            })
            .collect()
    }
}
