//! Minimal ordered XML tree for Dublin Core payloads
//!
//! Parses a payload into elements, text, CDATA and comments, keeping document
//! order so the record can be written back out verbatim. Only the root
//! element and the XML declaration survive a round trip; processing
//! instructions, doctype and comments outside the root are dropped.

use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Reader;

use crate::error::DcError;

/// Deepest element nesting accepted; Dublin Core records are flat
pub const MAX_DEPTH: usize = 32;

/// Declaration written when the payload did not carry one
const DEFAULT_DECLARATION: &str = r#"version="1.0""#;

/// A node inside an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
}

/// An XML element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Qualified name as written in the payload (e.g. `dc:title`)
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

/// A parsed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    declaration: Option<String>,
    root: XmlElement,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element name without its namespace prefix
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Direct text content (text and CDATA children, concatenated)
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) | XmlNode::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace all text content with a single text node
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children
            .retain(|node| !matches!(node, XmlNode::Text(_) | XmlNode::CData(_)));
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Append a child element holding only text
    pub fn append_text_element(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let mut element = XmlElement::new(name);
        element.children.push(XmlNode::Text(text.into()));
        self.children.push(XmlNode::Element(element));
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write_to(out),
                XmlNode::Text(text) => out.push_str(&partial_escape(text.as_str())),
                XmlNode::CData(text) => {
                    out.push_str("<![CDATA[");
                    out.push_str(text);
                    out.push_str("]]>");
                }
                XmlNode::Comment(text) => {
                    out.push_str("<!--");
                    out.push_str(text);
                    out.push_str("-->");
                }
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl XmlDocument {
    /// Parse a payload into a document tree
    ///
    /// Fails with [`DcError::MalformedInput`] on XML syntax errors, mismatched
    /// or unclosed tags, text outside the root, a second root element,
    /// elements nested deeper than [`MAX_DEPTH`], or a payload without any
    /// element.
    pub fn parse(data: &str) -> Result<Self, DcError> {
        let mut reader = Reader::from_str(data);
        reader.check_end_names(true);

        let mut declaration = None;
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                DcError::MalformedInput(format!(
                    "XML parsing error at position {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Decl(decl) => declaration = Some(declaration_attributes(&decl)?),
                Event::Start(start) => {
                    ensure_single_root(&root, &stack)?;
                    ensure_depth(&stack)?;
                    stack.push(element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    ensure_single_root(&root, &stack)?;
                    ensure_depth(&stack)?;
                    let element = element_from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None => root = Some(element),
                    }
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        DcError::MalformedInput("Closing tag without an open element".to_string())
                    })?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None => root = Some(element),
                    }
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| DcError::MalformedInput(format!("Invalid text: {}", e)))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Text(text.into_owned())),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(DcError::MalformedInput(
                                "Text content outside the root element".to_string(),
                            ))
                        }
                    }
                }
                Event::CData(cdata) => {
                    let text = String::from_utf8(cdata.into_inner().into_owned())
                        .map_err(|e| DcError::MalformedInput(format!("Invalid CDATA: {}", e)))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::CData(text)),
                        None => {
                            return Err(DcError::MalformedInput(
                                "CDATA outside the root element".to_string(),
                            ))
                        }
                    }
                }
                Event::Comment(comment) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = std::str::from_utf8(&comment)
                            .map_err(|e| DcError::MalformedInput(format!("Invalid comment: {}", e)))?;
                        parent.children.push(XmlNode::Comment(text.to_string()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(DcError::MalformedInput(format!(
                "Unclosed element <{}>",
                open.name
            )));
        }

        let root = root.ok_or_else(|| {
            DcError::MalformedInput("Payload does not contain a root element".to_string())
        })?;

        Ok(Self { declaration, root })
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    /// Render the document, declaration first, as the export form
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml ");
        out.push_str(self.declaration.as_deref().unwrap_or(DEFAULT_DECLARATION));
        out.push_str("?>\n");
        self.root.write_to(&mut out);
        out.push('\n');
        out
    }
}

fn ensure_single_root(root: &Option<XmlElement>, stack: &[XmlElement]) -> Result<(), DcError> {
    if root.is_some() && stack.is_empty() {
        return Err(DcError::MalformedInput(
            "Payload contains more than one root element".to_string(),
        ));
    }
    Ok(())
}

fn ensure_depth(stack: &[XmlElement]) -> Result<(), DcError> {
    if stack.len() >= MAX_DEPTH {
        return Err(DcError::MalformedInput(format!(
            "Elements nested deeper than {} levels",
            MAX_DEPTH
        )));
    }
    Ok(())
}

/// Pseudo-attributes of the XML declaration, e.g. `version="1.0" encoding="UTF-8"`
fn declaration_attributes(decl: &BytesDecl<'_>) -> Result<String, DcError> {
    let invalid =
        |e: &dyn std::fmt::Display| DcError::MalformedInput(format!("Invalid XML declaration: {}", e));

    let version = decl.version().map_err(|e| invalid(&e))?;
    let mut attributes = format!("version=\"{}\"", String::from_utf8_lossy(&version));
    if let Some(encoding) = decl.encoding() {
        let encoding = encoding.map_err(|e| invalid(&e))?;
        attributes.push_str(&format!(" encoding=\"{}\"", String::from_utf8_lossy(&encoding)));
    }
    if let Some(standalone) = decl.standalone() {
        let standalone = standalone.map_err(|e| invalid(&e))?;
        attributes.push_str(&format!(" standalone=\"{}\"", String::from_utf8_lossy(&standalone)));
    }
    Ok(attributes)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, DcError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| DcError::MalformedInput(format!("Invalid element name: {}", e)))?
        .to_string();

    let mut element = XmlElement::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DcError::MalformedInput(format!("Invalid attribute: {}", e)))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| DcError::MalformedInput(format!("Invalid attribute name: {}", e)))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| DcError::MalformedInput(format!("Invalid attribute value: {}", e)))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}
