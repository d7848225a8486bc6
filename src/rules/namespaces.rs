//! Namespace prefix usage on attributes

use super::{attributes, Rule};
use crate::document::XamlDocument;
use crate::finding::Finding;
use std::collections::HashSet;

const RESERVED_PREFIXES: &[&str] = &["xml", "xmlns"];

/// Attribute `p:name` where `p` is not a prefix known at the document root
///
/// By default the only known prefix is the root element's own one, so an
/// `xmlns:p` declaration does not by itself make `p` usable. With
/// [`with_root_declarations`](Self::with_root_declarations) the `xmlns:p`
/// declarations on the root and the reserved `xml` / `xmlns` prefixes count
/// as well.
#[derive(Debug, Default)]
pub struct NamespacePrefixRule {
    root_declarations: bool,
}

impl NamespacePrefixRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_declarations(mut self) -> Self {
        self.root_declarations = true;
        self
    }

    fn known_prefixes<'a>(&self, doc: &'a XamlDocument) -> HashSet<&'a str> {
        let root = doc.root();
        let mut prefixes: HashSet<&str> = root.prefix().into_iter().collect();
        if self.root_declarations {
            prefixes.extend(RESERVED_PREFIXES.iter().copied());
            prefixes.extend(
                root.attributes()
                    .iter()
                    .filter_map(|attr| attr.name.strip_prefix("xmlns:")),
            );
        }
        prefixes
    }
}

impl Rule for NamespacePrefixRule {
    fn id(&self) -> &'static str {
        "namespace-prefix"
    }

    fn description(&self) -> &'static str {
        "Attribute uses an undeclared namespace prefix"
    }

    fn evaluate(&self, doc: &XamlDocument) -> Vec<Finding> {
        let prefixes = self.known_prefixes(doc);

        attributes(doc)
            .filter_map(|(element, attr)| {
                let prefix = attr.prefix()?;
                (!prefixes.contains(prefix)).then(|| {
                    Finding::new(
                        self.id(),
                        format!(
                            "Namespace prefix '{}' not defined for attribute {} in element <{}>",
                            prefix,
                            attr.name,
                            element.name()
                        ),
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::messages;

    #[test]
    fn test_root_prefix_counts() {
        let xml = r#"<local:MainPage><Grid local:Tag="x" /></local:MainPage>"#;
        assert!(messages(&NamespacePrefixRule::new(), xml).is_empty());
    }

    #[test]
    fn test_undeclared_prefix() {
        let xml = r#"<Grid><TextBlock x:Name="t" /></Grid>"#;
        let result = messages(&NamespacePrefixRule::new(), xml);
        assert_eq!(
            result,
            vec!["Namespace prefix 'x' not defined for attribute x:Name in element <TextBlock>"]
        );
    }

    #[test]
    fn test_xmlns_declaration_not_scanned() {
        let xml = r#"<Page xmlns:x="urn:x"><Grid x:Name="a" /></Page>"#;
        let result = messages(&NamespacePrefixRule::new(), xml);
        assert_eq!(
            result,
            vec![
                "Namespace prefix 'xmlns' not defined for attribute xmlns:x in element <Page>",
                "Namespace prefix 'x' not defined for attribute x:Name in element <Grid>",
            ]
        );
    }

    #[test]
    fn test_root_declarations() {
        let rule = NamespacePrefixRule::new().with_root_declarations();
        let xml = r#"<Page xmlns="urn:p" xmlns:x="urn:x"><Grid x:Name="Root" /></Page>"#;
        assert!(messages(&rule, xml).is_empty());
    }

    #[test]
    fn test_root_declarations_reserved_prefixes() {
        let rule = NamespacePrefixRule::new().with_root_declarations();
        let xml = r#"<Grid xml:lang="en"><TextBlock xml:space="preserve" /></Grid>"#;
        assert!(messages(&rule, xml).is_empty());
    }

    #[test]
    fn test_root_declarations_nested_not_visible() {
        let rule = NamespacePrefixRule::new().with_root_declarations();
        let xml = r#"<Page><Grid xmlns:d="urn:d" d:Width="1" /></Page>"#;
        let result = messages(&rule, xml);
        assert_eq!(
            result,
            vec![
                "Namespace prefix 'xmlns' not defined for attribute xmlns:d in element <Grid>",
                "Namespace prefix 'd' not defined for attribute d:Width in element <Grid>",
            ]
        );
    }

    #[test]
    fn test_dotted_attributes_ignored() {
        let xml = r#"<Grid><TextBlock Grid.Row="1" /></Grid>"#;
        assert!(messages(&NamespacePrefixRule::new(), xml).is_empty());
    }
}
