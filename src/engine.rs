//! Rule engine - runs registered rules in order

use crate::config::Config;
use crate::document::XamlDocument;
use crate::finding::Finding;
use crate::rules::{builtin_rules, Rule};

/// Ordered list of rules applied to a document
#[derive(Default)]
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Create an engine with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with the built-in rules, minus the ones the config disables
    pub fn from_config(config: &Config) -> Self {
        let mut engine = Self::new();
        for rule in builtin_rules(config) {
            if config.is_rule_disabled(rule.id()) {
                log::debug!("rule {} disabled by config", rule.id());
                continue;
            }
            engine.register(rule);
        }
        engine
    }

    /// Append a rule; it runs after every rule registered before it
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Run every rule and concatenate the findings in registration order
    pub fn validate(&self, doc: &XamlDocument) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in &self.rules {
            let found = rule.evaluate(doc);
            log::debug!("rule {}: {} finding(s)", rule.id(), found.len());
            findings.extend(found);
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    struct RootRule(&'static str);

    impl Rule for RootRule {
        fn id(&self) -> &'static str {
            self.0
        }

        fn description(&self) -> &'static str {
            "reports the root"
        }

        fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
            vec![Finding::new(self.0, format!("{} saw <{}>", self.0, doc.root().name()))]
        }
    }

    #[test]
    fn test_empty_engine() {
        let engine = RuleEngine::new();
        let doc = parse("<Grid />").unwrap();
        assert!(engine.validate(&doc).is_empty());
        assert!(engine.rule_ids().is_empty());
    }

    #[test]
    fn test_registration_order() {
        let mut engine = RuleEngine::new();
        engine.register(Box::new(RootRule("second")));
        engine.register(Box::new(RootRule("first")));
        let doc = parse("<Grid />").unwrap();
        let messages: Vec<_> = engine.validate(&doc).into_iter().map(|f| f.message).collect();
        assert_eq!(messages, vec!["second saw <Grid>", "first saw <Grid>"]);
        assert_eq!(engine.rule_ids(), vec!["second", "first"]);
    }

    #[test]
    fn test_from_config_all_rules() {
        let engine = RuleEngine::from_config(&Config::default());
        assert_eq!(engine.rules().len(), 17);
    }

    #[test]
    fn test_from_config_disabled() {
        let config = Config {
            disabled_rules: vec!["unknown-control".to_string(), "missing-content".to_string()],
            ..Default::default()
        };
        let engine = RuleEngine::from_config(&config);
        let ids = engine.rule_ids();
        assert_eq!(ids.len(), 15);
        assert!(!ids.contains(&"unknown-control"));
        assert_eq!(ids[0], "unknown-element");
    }

    #[test]
    fn test_findings_grouped_by_rule() {
        let engine = RuleEngine::from_config(&Config::default());
        let doc = parse(r#"<Grid><Foo /><TextBlock Text="Hi" Bar="x" /></Grid>"#).unwrap();
        let ids: Vec<_> = engine.validate(&doc).into_iter().map(|f| f.rule_id).collect();
        assert_eq!(
            ids,
            vec!["missing-content", "unknown-element", "invalid-attribute", "unknown-control"]
        );
    }

    #[test]
    fn test_from_config_root_namespace_declarations() {
        let doc = parse(r#"<Page xmlns:x="urn:x"><Grid x:Name="a" /></Page>"#).unwrap();
        let namespace_findings = |config: &Config| {
            RuleEngine::from_config(config)
                .validate(&doc)
                .into_iter()
                .filter(|f| f.rule_id == "namespace-prefix")
                .count()
        };

        assert_eq!(namespace_findings(&Config::default()), 2);
        let config = Config {
            root_namespace_declarations: true,
            ..Default::default()
        };
        assert_eq!(namespace_findings(&config), 0);
    }
}
