//! Whitespace normalization and canonical serialization

use crate::document::{Element, Node, XamlDocument};
use crate::writer::XamlWriter;

/// Rebuild the document without whitespace-only text nodes
pub fn strip_whitespace(doc: &XamlDocument) -> XamlDocument {
    doc.without_whitespace()
}

/// Serialize a document in canonical form, as-is
///
/// Whitespace-only text is written like any other text; callers wanting the
/// canonical layout should go through [`normalize`].
pub fn serialize(doc: &XamlDocument) -> String {
    let mut writer = XamlWriter::new();

    if let Some(decl) = doc.declaration() {
        writer.write_declaration(decl);
        writer.newline();
    }

    for node in doc.leading() {
        write_node(node, &mut writer);
    }
    write_element(doc.root(), &mut writer);
    for node in doc.trailing() {
        write_node(node, &mut writer);
    }

    writer.finish()
}

/// Strip insignificant whitespace and serialize in canonical form
pub fn normalize(doc: &XamlDocument) -> String {
    serialize(&strip_whitespace(doc))
}

fn write_node(node: &Node, writer: &mut XamlWriter) {
    match node {
        Node::Element(element) => write_element(element, writer),
        Node::Text(text) => {
            writer.write_indent();
            writer.write_text(text.trim());
            writer.newline();
        }
        Node::Comment(comment) => {
            writer.write_indent();
            writer.write_comment(comment);
            writer.newline();
        }
    }
}

fn write_element(element: &Element, writer: &mut XamlWriter) {
    writer.write_indent();
    writer.write_element_start(element.name());

    for attr in element.attributes() {
        writer.write_attribute(&attr.name, &attr.value);
    }

    if !element.has_children() {
        writer.write_element_end_empty();
        writer.newline();
        return;
    }

    writer.write_element_end();
    writer.newline();
    writer.indent();
    for child in element.children() {
        write_node(child, writer);
    }
    writer.dedent();
    writer.write_indent();
    writer.write_close_tag(element.name());
    writer.newline();
}
