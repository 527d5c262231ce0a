/// Child node of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
}

/// XML element with its qualified name, attributes in document order and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element with no attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<(String, String)>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_text(mut self, value: &str) -> Self {
        self.set_text(value);
        self
    }

    /// Qualified name as written in the document (e.g. `witsml:log`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its namespace prefix
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(super) fn push_node(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Concatenated text and CDATA content of direct children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) | Node::CData(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace all children with a single text node
    ///
    /// An empty value is kept as an explicit empty text node so the element
    /// is written as `<a></a>` rather than `<a/>`.
    pub fn set_text(&mut self, value: &str) {
        self.children = vec![Node::Text(value.to_string())];
    }

    /// Direct child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First direct child element with the given local name
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.elements().find(|e| e.local_name() == local_name)
    }

    pub fn child_mut(&mut self, local_name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) if element.local_name() == local_name => Some(element),
            _ => None,
        })
    }

    /// Position of the first child element with the given local name among all child nodes
    pub fn child_position(&self, local_name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|node| matches!(node, Node::Element(e) if e.local_name() == local_name))
    }

    pub fn has_child(&self, local_name: &str) -> bool {
        self.child_position(local_name).is_some()
    }

    pub fn insert_first(&mut self, element: Element) {
        self.children.insert(0, Node::Element(element));
    }

    pub fn push(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Replace the child node at `index` with `element`
    pub fn replace_at(&mut self, index: usize, element: Element) {
        if let Some(slot) = self.children.get_mut(index) {
            *slot = Node::Element(element);
        }
    }

    /// Keep non-element children and only the child elements matching `keep`
    pub fn retain_elements(&mut self, mut keep: impl FnMut(&Element) -> bool) {
        self.children.retain(|node| match node {
            Node::Element(element) => keep(element),
            _ => true,
        });
    }
}

#[cfg(test)]
#[path = "element_tests.rs"]
mod element_tests;
