//! Structural rules: empty containers and incomplete template children

use super::Rule;
use crate::document::XamlDocument;
use crate::finding::Finding;

/// Elements with neither children nor attributes
pub struct MissingContentRule;

impl Rule for MissingContentRule {
    fn id(&self) -> &'static str {
        "missing-content"
    }

    fn description(&self) -> &'static str {
        "Element has no children and no attributes"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        doc.elements()
            .filter(|e| !e.has_children() && !e.has_attributes())
            .map(|e| {
                Finding::new(
                    self.id(),
                    format!(
                        "Element <{}> is empty and might be missing child elements or attributes.",
                        e.name()
                    ),
                )
            })
            .collect()
    }
}

pub struct VisualTreeRule;

impl Rule for VisualTreeRule {
    fn id(&self) -> &'static str {
        "visual-tree"
    }

    fn description(&self) -> &'static str {
        "VisualTree element has no children"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        doc.elements_named("VisualTree")
            .filter(|e| !e.has_children())
            .map(|e| Finding::new(self.id(), format!("VisualTree element <{}> is empty", e.name())))
            .collect()
    }
}

pub struct DataTemplateRule;

impl Rule for DataTemplateRule {
    fn id(&self) -> &'static str {
        "data-template"
    }

    fn description(&self) -> &'static str {
        "DataTemplate element has no children"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        doc.elements_named("DataTemplate")
            .filter(|e| !e.has_children())
            .map(|e| {
                Finding::new(
                    self.id(),
                    format!("DataTemplate element <{}> is empty", e.name()),
                )
            })
            .collect()
    }
}

/// Animations inside a Storyboard must say which property they animate
///
/// Goes further than a plain `TargetProperty` check on purpose: the attached
/// form `Storyboard.TargetProperty`, which is how WinUI markup usually writes
/// it, is accepted as well.
pub struct StoryboardTargetRule;

impl Rule for StoryboardTargetRule {
    fn id(&self) -> &'static str {
        "storyboard-target"
    }

    fn description(&self) -> &'static str {
        "Storyboard animation lacks a TargetProperty"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        doc.elements_named("Storyboard")
            .flat_map(|storyboard| storyboard.child_elements())
            .filter(|child| {
                !child.has_attr("TargetProperty") && !child.has_attr("Storyboard.TargetProperty")
            })
            .map(|child| {
                Finding::new(
                    self.id(),
                    format!(
                        "Animation <{}> in Storyboard missing 'TargetProperty' attribute",
                        child.name()
                    ),
                )
            })
            .collect()
    }
}

/// Direct children of a ControlTemplate need an `x:Name` to be addressable as parts
pub struct ControlTemplatePartRule;

impl Rule for ControlTemplatePartRule {
    fn id(&self) -> &'static str {
        "control-template-part"
    }

    fn description(&self) -> &'static str {
        "ControlTemplate part lacks x:Name"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        let mut findings = Vec::new();

        for template in doc.elements().filter(|e| e.name().contains("ControlTemplate")) {
            for part in template.child_elements().filter(|c| !c.has_attr("x:Name")) {
                findings.push(Finding::new(
                    self.id(),
                    format!(
                        "ControlTemplate part <{}> missing 'x:Name' attribute in element <{}>",
                        part.name(),
                        template.name()
                    ),
                ));
            }
        }

        findings
    }
}
