use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::ExtractError;

// @module: Minimal in-memory XML element tree

/// An element with its attributes, child elements and text content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    // @field: Tag name, empty for the document node
    pub name: String,

    // @field: Attributes in document order
    pub attributes: Vec<(String, String)>,

    // @field: Child elements in document order
    pub children: Vec<XmlElement>,

    // @field: Concatenated text and CDATA content
    pub text: String,
}

impl XmlElement {
    /// Parse a whole document.
    ///
    /// The returned node is a nameless document node whose children are the
    /// top-level elements.
    pub fn parse_document(xml: &str) -> Result<Self, ExtractError> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<XmlElement> = vec![XmlElement::default()];

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(ExtractError::Xml {
                        position: reader.buffer_position(),
                        message: e.to_string(),
                    });
                }
            };

            match event {
                Event::Start(start) => {
                    stack.push(Self::from_start(&start, reader.buffer_position())?);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&start, reader.buffer_position())?;
                    Self::attach(&mut stack, element);
                }
                Event::End(_) => {
                    // The document node never sees its own End event
                    if stack.len() < 2 {
                        return Err(ExtractError::Xml {
                            position: reader.buffer_position(),
                            message: "closing tag without matching opening tag".to_string(),
                        });
                    }
                    if let Some(element) = stack.pop() {
                        Self::attach(&mut stack, element);
                    }
                }
                Event::Text(text) => {
                    let unescaped = text.unescape().map_err(|e| ExtractError::Xml {
                        position: reader.buffer_position(),
                        message: e.to_string(),
                    })?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&unescaped);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if stack.len() > 1 {
            let unclosed = stack.last().map(|e| e.name.clone()).unwrap_or_default();
            return Err(ExtractError::Xml {
                position: reader.buffer_position(),
                message: format!("unclosed element <{}>", unclosed),
            });
        }

        let document = stack.pop().unwrap_or_default();
        if document.children.is_empty() {
            return Err(ExtractError::NoRootElement);
        }

        Ok(document)
    }

    fn from_start(start: &BytesStart, position: usize) -> Result<Self, ExtractError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| ExtractError::Xml {
                position,
                message: format!("bad attribute on <{}>: {}", name, e),
            })?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| ExtractError::Xml {
                    position,
                    message: format!("bad attribute value on <{}>: {}", name, e),
                })?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn attach(stack: &mut [XmlElement], element: XmlElement) {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(element);
        }
    }

    /// Value of the named attribute, if present
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// True if this element has the given tag and attribute value
    pub fn is(&self, name: &str, key: &str, value: &str) -> bool {
        self.name == name && self.attribute(key) == Some(value)
    }

    /// First direct child with the given tag
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All descendants with the given tag, in document order
    pub fn descendants(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// Text content without surrounding whitespace
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}
