//! Parsed document tree and the `NodeQuery` facade the engines read through.
//!
//! The engines never look at raw markup. They see an immutable tree of
//! elements in document order and ask it four kinds of questions: attribute
//! lookup, text lookup, child-path selection, and descendant selection.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::DocumentError;

/// Read-only structural queries over an element tree.
///
/// Implementors supply the four primitive accessors; path selection and
/// descendant iteration are derived from them and always yield nodes in
/// document order.
pub trait NodeQuery: Sized {
    /// Element name.
    fn tag(&self) -> &str;

    /// Attribute value, if present.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Child elements in document order.
    fn children(&self) -> &[Self];

    /// Concatenated direct text content.
    fn text(&self) -> &str;

    /// Attribute value, or `""` when absent.
    fn attr_or_empty(&self, name: &str) -> &str {
        self.attr(name).unwrap_or("")
    }

    /// Attribute value with surrounding whitespace removed (`""` when absent).
    fn attr_trimmed(&self, name: &str) -> &str {
        self.attr_or_empty(name).trim()
    }

    /// Select elements along a slash-separated child path, e.g.
    /// `meta/geometry/roles/role`. An empty path selects `self`.
    fn select(&self, path: &str) -> Vec<&Self> {
        let mut current: Vec<&Self> = vec![self];
        for step in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|node| node.children().iter().filter(move |c| c.tag() == step))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }

    /// First element along `path`, if any.
    fn select_first(&self, path: &str) -> Option<&Self> {
        self.select(path).into_iter().next()
    }

    /// All descendants named `tag`, pre-order (the `//tag` selection).
    fn descendants(&self, tag: &str) -> Vec<&Self> {
        let mut out = Vec::new();
        let mut stack: Vec<&Self> = self.children().iter().rev().collect();
        while let Some(node) = stack.pop() {
            if node.tag() == tag {
                out.push(node);
            }
            stack.extend(node.children().iter().rev());
        }
        out
    }
}

/// A single element of the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, DocumentError> {
        let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
        for attr in start.attributes() {
            let attr = attr.map_err(|e| DocumentError::Syntax {
                position: 0,
                message: e.to_string(),
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| DocumentError::Syntax {
                    position: 0,
                    message: e.to_string(),
                })?
                .into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }
}

impl NodeQuery for Element {
    fn tag(&self) -> &str {
        &self.name
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// An immutable parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse markup text into a tree.
    pub fn parse(input: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader.read_event().map_err(|e| DocumentError::Syntax {
                position: reader.error_position() as u64,
                message: e.to_string(),
            })?;
            match event {
                Event::Start(start) => {
                    if let Some(done) = &root {
                        return Err(DocumentError::TrailingElement(done.name.clone()));
                    }
                    stack.push(Element::from_start(&start)?);
                }
                Event::Empty(start) => {
                    if let Some(done) = &root {
                        return Err(DocumentError::TrailingElement(done.name.clone()));
                    }
                    let element = Element::from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Event::End(_) => {
                    let Some(element) = stack.pop() else {
                        return Err(DocumentError::Syntax {
                            position: reader.buffer_position() as u64,
                            message: "closing tag without an open element".to_string(),
                        });
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let value = text.unescape().map_err(|e| DocumentError::Syntax {
                            position: reader.buffer_position() as u64,
                            message: e.to_string(),
                        })?;
                        current.text.push_str(&value);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(DocumentError::Unclosed(open.name));
        }
        root.map(|root| Self { root }).ok_or(DocumentError::Empty)
    }

    /// The document element.
    pub fn root(&self) -> &Element {
        &self.root
    }
}
