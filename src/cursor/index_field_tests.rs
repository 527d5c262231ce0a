//! Tests for index field

use super::*;

fn end_index() -> Element {
    Element::new("w:endIndex")
        .with_attributes(vec![("uom".to_string(), "m".to_string())])
        .with_text(" 250 ")
}

#[test]
fn test_from_element_uses_local_name_and_trimmed_value() {
    let field = IndexField::from_element(&end_index());
    assert_eq!(field.name(), "endIndex");
    assert_eq!(field.value(), "250");
    assert_eq!(field.attributes(), &[("uom".to_string(), "m".to_string())]);
}

#[test]
fn test_renamed_keeps_value_and_attributes() {
    let field = IndexField::from_element(&end_index()).renamed("startIndex");
    assert_eq!(field.name(), "startIndex");
    assert_eq!(field.value(), "250");
    assert_eq!(field.attributes().len(), 1);
}

#[test]
fn test_without_attributes() {
    let field = IndexField::from_element(&end_index()).without_attributes();
    assert!(field.attributes().is_empty());
}

#[test]
fn test_with_value() {
    let field = IndexField::new("endIndex", "250").with_value("");
    assert_eq!(field.value(), "");
}

#[test]
fn test_to_element_unprefixed() {
    let element = IndexField::from_element(&end_index())
        .renamed("startIndex")
        .to_element(None);
    assert_eq!(element.name(), "startIndex");
    assert_eq!(element.attribute("uom"), Some("m"));
    assert_eq!(element.text(), "250");
}

#[test]
fn test_to_element_prefixed() {
    let element = IndexField::new("startIndex", "1").to_element(Some("w"));
    assert_eq!(element.name(), "w:startIndex");
    assert_eq!(element.local_name(), "startIndex");
}

#[test]
fn test_source_element_is_untouched() {
    let source = end_index();
    let _ = IndexField::from_element(&source)
        .renamed("startIndex")
        .with_value("0")
        .to_element(None);
    assert_eq!(source.name(), "w:endIndex");
    assert_eq!(source.text(), " 250 ");
}
