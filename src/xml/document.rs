use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::XmlError;
use super::element::{Element, Node};

/// Parsed XML document: optional declaration plus a single root element
#[derive(Debug, Clone)]
pub struct Document {
    declaration: Option<BytesDecl<'static>>,
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            declaration: None,
            root,
        }
    }

    /// Parse XML text into an element tree
    ///
    /// Whitespace-only text between elements is dropped and text content is
    /// trimmed. Processing instructions and DOCTYPE declarations are skipped.
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut declaration = None;
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader.read_event().map_err(|e| XmlError::Syntax {
                position,
                message: e.to_string(),
            })?;

            match event {
                Event::Decl(decl) => declaration = Some(decl.into_owned()),
                Event::Start(start) => stack.push(start_element(&start, position)?),
                Event::Empty(start) => {
                    let element = start_element(&start, position)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(end) => {
                    let element = stack.pop().ok_or_else(|| XmlError::UnexpectedEnd {
                        found: String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                        position,
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let value = text.unescape().map_err(|e| XmlError::Syntax {
                        position,
                        message: e.to_string(),
                    })?;
                    if value.is_empty() {
                        continue;
                    }
                    let parent = stack
                        .last_mut()
                        .ok_or_else(|| outside_root(position, "text"))?;
                    parent.push_node(Node::Text(value.into_owned()));
                }
                Event::CData(cdata) => {
                    let parent = stack
                        .last_mut()
                        .ok_or_else(|| outside_root(position, "CDATA"))?;
                    parent.push_node(Node::CData(String::from_utf8_lossy(&cdata).into_owned()));
                }
                Event::Comment(comment) => {
                    // Comments outside the root element are not kept
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .push_node(Node::Comment(String::from_utf8_lossy(&comment).into_owned()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(XmlError::Unclosed(open.name().to_string()));
        }

        let root = root.ok_or(XmlError::MissingRoot)?;
        Ok(Self { declaration, root })
    }

    /// Serialize the document without indentation
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Vec::new());

        if let Some(decl) = &self.declaration {
            writer
                .write_event(Event::Decl(decl.clone()))
                .map_err(|e| XmlError::Write(e.to_string()))?;
        }
        write_element(&mut writer, &self.root)?;

        String::from_utf8(writer.into_inner()).map_err(|e| XmlError::Write(e.to_string()))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Default namespace declared on the root element, if any
    pub fn default_namespace(&self) -> Option<&str> {
        self.root.attribute("xmlns")
    }

}

fn outside_root(position: u64, what: &str) -> XmlError {
    XmlError::Syntax {
        position,
        message: format!("{} outside the root element", what),
    }
}

fn start_element(start: &BytesStart<'_>, position: u64) -> Result<Element, XmlError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::Syntax {
            position,
            message: e.to_string(),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| XmlError::Syntax {
            position,
            message: e.to_string(),
        })?;
        attributes.push((key, value.into_owned()));
    }

    Ok(Element::new(name).with_attributes(attributes))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.push_node(Node::Element(element)),
        None if root.is_some() => return Err(XmlError::MultipleRoots),
        None => *root = Some(element),
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children().is_empty() {
        return write_event(writer, Event::Empty(start));
    }

    write_event(writer, Event::Start(start))?;
    for node in element.children() {
        match node {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => write_event(writer, Event::Text(BytesText::new(text)))?,
            Node::CData(text) => write_event(writer, Event::CData(BytesCData::new(text.as_str())))?,
            Node::Comment(text) => {
                write_event(writer, Event::Comment(BytesText::from_escaped(text.as_str())))?
            }
        }
    }
    write_event(writer, Event::End(BytesEnd::new(element.name())))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), XmlError> {
    writer
        .write_event(event)
        .map_err(|e| XmlError::Write(e.to_string()))
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod document_tests;
