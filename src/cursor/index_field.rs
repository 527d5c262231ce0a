use crate::xml::Element;

/// Detached copy of an index element: local name, text value and attributes
///
/// The cursor builds the next checkpoint as a value instead of splicing
/// attributes between live elements, then turns it into a fresh element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexField {
    name: String,
    value: String,
    attributes: Vec<(String, String)>,
}

impl IndexField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    pub fn from_element(element: &Element) -> Self {
        Self {
            name: element.local_name().to_string(),
            value: element.text().trim().to_string(),
            attributes: element.attributes().to_vec(),
        }
    }

    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn without_attributes(mut self) -> Self {
        self.attributes.clear();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Build an element, qualified with `prefix` when the parent uses one
    pub fn to_element(&self, prefix: Option<&str>) -> Element {
        let name = match prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        };
        Element::new(name)
            .with_attributes(self.attributes.clone())
            .with_text(&self.value)
    }
}

#[cfg(test)]
#[path = "index_field_tests.rs"]
mod index_field_tests;
