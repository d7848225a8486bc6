//! XAML document model and parser
//!
//! Parses markup into an owned tree that keeps qualified names and attribute
//! order exactly as written. Namespace prefixes are not resolved here; an
//! undeclared prefix is reported by the `namespace-prefix` rule instead of
//! failing the parse.

use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::path::Path;
use std::{fs, str};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{source} (at byte {position})")]
    Xml {
        position: usize,
        source: quick_xml::Error,
    },
    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] str::Utf8Error),
    #[error("unclosed element <{0}>")]
    UnclosedElement(String),
    #[error("closing tag </{0}> has no matching start tag")]
    UnexpectedEnd(String),
    #[error("no root element found")]
    NoRootElement,
    #[error("junk after document element: <{0}>")]
    MultipleRoots(String),
    #[error("text outside of the root element")]
    TextOutsideRoot,
    #[error("XML declaration allowed only at the start of the document (at byte {0})")]
    MisplacedDeclaration(usize),
}

/// A single attribute as written on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Namespace prefix of the attribute name (`x` for `x:Key`)
    pub fn prefix(&self) -> Option<&str> {
        split_prefix(&self.name).0
    }
}

/// A child node of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Decoded character data (CDATA included)
    Text(String),
    /// Raw comment content between `<!--` and `-->`
    Comment(String),
}

impl Node {
    /// Whitespace-only text
    pub fn is_insignificant(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

/// A XAML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Qualified tag name as written (e.g. `controls:DataGrid`)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> Option<&str> {
        split_prefix(&self.name).0
    }

    pub fn local_name(&self) -> &str {
        split_prefix(&self.name).1
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Direct child elements, skipping text and comments
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// This element and every element below it, in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Concatenated significant text of the direct text children, trimmed
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .children
            .iter()
            .filter_map(|c| match c {
                Node::Text(t) => Some(t.trim()),
                _ => None,
            })
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// Copy of this element without whitespace-only text nodes, at any depth
    pub fn without_whitespace(&self) -> Element {
        Element {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            children: self
                .children
                .iter()
                .filter(|c| !c.is_insignificant())
                .map(|c| match c {
                    Node::Element(e) => Node::Element(e.without_whitespace()),
                    other => other.clone(),
                })
                .collect(),
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }
}

/// Pre-order element iterator
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        // Reverse so children come out left-to-right
        self.stack.extend(element.child_elements().collect::<Vec<_>>().into_iter().rev());
        Some(element)
    }
}

/// The `<?xml ...?>` declaration, if the source had one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Declaration {
    /// Read the pseudo-attributes of an `<?xml ...?>` event
    fn from_event(decl: &BytesDecl<'_>, position: usize) -> Result<Self, ParseError> {
        let version = decl
            .version()
            .map_err(|source| ParseError::Xml { position, source })?;

        Ok(Self {
            version: decode(&version)?,
            encoding: decode_optional(decl.encoding())?,
            standalone: decode_optional(decl.standalone())?,
        })
    }
}

fn decode(value: &[u8]) -> Result<String, ParseError> {
    Ok(str::from_utf8(value)?.to_string())
}

fn decode_optional(
    value: Option<Result<Cow<'_, [u8]>, AttrError>>,
) -> Result<Option<String>, ParseError> {
    value.map(|v| decode(&v?)).transpose()
}

/// A parsed XAML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XamlDocument {
    declaration: Option<Declaration>,
    /// Comments before the root element
    leading: Vec<Node>,
    root: Element,
    /// Comments after the root element
    trailing: Vec<Node>,
}

impl XamlDocument {
    /// Wrap an already-built element tree
    pub fn from_root(root: Element) -> Self {
        Self {
            declaration: None,
            leading: Vec::new(),
            root,
            trailing: Vec::new(),
        }
    }

    /// Parse a file from disk
    pub fn parse_file(path: &Path) -> Result<Self, crate::FormatError> {
        let source = fs::read_to_string(path).map_err(|e| crate::FormatError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::parse(&source)?)
    }

    /// Parse markup from a string
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().check_end_names = true;

        let mut declaration = None;
        let mut leading = Vec::new();
        let mut trailing = Vec::new();
        let mut root: Option<Element> = None;
        let mut stack: Vec<Element> = Vec::new();
        let mut at_start = true;

        loop {
            let event = reader.read_event().map_err(|e| ParseError::Xml {
                position: reader.error_position() as usize,
                source: e,
            })?;

            let position = reader.buffer_position() as usize;
            let first = std::mem::replace(&mut at_start, false);

            match event {
                Event::Decl(decl) => {
                    if !first {
                        return Err(ParseError::MisplacedDeclaration(position));
                    }
                    declaration = Some(Declaration::from_event(&decl, position)?);
                }
                Event::Start(start) => {
                    let element = element_from_start(&start, position)?;
                    if root.is_some() && stack.is_empty() {
                        return Err(ParseError::MultipleRoots(element.name));
                    }
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start, position)?;
                    close_element(element, &mut stack, &mut root)?;
                }
                Event::End(end) => {
                    let name = str::from_utf8(end.name().as_ref())?.to_string();
                    let element = stack.pop().ok_or(ParseError::UnexpectedEnd(name))?;
                    close_element(element, &mut stack, &mut root)?;
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|source| ParseError::Xml { position, source })?;
                    append_text(&text, &mut stack)?;
                }
                Event::CData(cdata) => {
                    let text = str::from_utf8(&cdata)?;
                    append_text(text, &mut stack)?;
                }
                Event::Comment(comment) => {
                    let node = Node::Comment(str::from_utf8(&comment)?.to_string());
                    match (stack.last_mut(), &root) {
                        (Some(parent), _) => parent.children.push(node),
                        (None, None) => leading.push(node),
                        (None, Some(_)) => trailing.push(node),
                    }
                }
                Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.pop() {
            return Err(ParseError::UnclosedElement(open.name));
        }

        let root = root.ok_or(ParseError::NoRootElement)?;
        log::trace!("parsed document with root <{}>", root.name);

        Ok(Self {
            declaration,
            leading,
            root,
            trailing,
        })
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    pub fn leading(&self) -> &[Node] {
        &self.leading
    }

    pub fn trailing(&self) -> &[Node] {
        &self.trailing
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// All elements in document order, root first
    pub fn elements(&self) -> Descendants<'_> {
        self.root.descendants()
    }

    /// All elements whose qualified name is exactly `name`, in document order
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    /// Copy of the document with whitespace-only text removed everywhere
    pub fn without_whitespace(&self) -> XamlDocument {
        XamlDocument {
            declaration: self.declaration.clone(),
            leading: self.leading.clone(),
            root: self.root.without_whitespace(),
            trailing: self.trailing.clone(),
        }
    }
}

fn element_from_start(start: &BytesStart<'_>, position: usize) -> Result<Element, ParseError> {
    let mut element = Element::new(str::from_utf8(start.name().as_ref())?);

    for attr in start.attributes() {
        let attr = attr?;
        let name = str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|source| ParseError::Xml { position, source })?;
        element.attributes.push(Attribute::new(name, value.into_owned()));
    }

    Ok(element)
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_some() => return Err(ParseError::MultipleRoots(element.name)),
        None => *root = Some(element),
    }
    Ok(())
}

fn append_text(text: &str, stack: &mut [Element]) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.push_text(text),
        None if text.trim().is_empty() => {}
        None => return Err(ParseError::TextOutsideRoot),
    }
    Ok(())
}

fn split_prefix(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

/// Parse markup into a document
pub fn parse(source: &str) -> Result<XamlDocument, ParseError> {
    XamlDocument::parse(source)
}
