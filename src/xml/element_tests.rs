//! Tests for element

use super::*;

fn log_element() -> Element {
    let mut log = Element::new("log");
    log.push(Element::new("indexType").with_text("measured depth"));
    log.push(
        Element::new("startIndex")
            .with_attributes(vec![("uom".to_string(), "m".to_string())])
            .with_text("100"),
    );
    log.push(Element::new("logCurveInfo"));
    log
}

#[test]
fn test_local_name_strips_prefix() {
    let element = Element::new("witsml:log");
    assert_eq!(element.name(), "witsml:log");
    assert_eq!(element.local_name(), "log");
}

#[test]
fn test_local_name_without_prefix() {
    assert_eq!(Element::new("log").local_name(), "log");
}

#[test]
fn test_child_lookup_by_local_name() {
    let mut log = Element::new("w:log");
    log.push(Element::new("w:endIndex").with_text("250"));

    let end = log.child("endIndex").expect("endIndex child");
    assert_eq!(end.text(), "250");
    assert!(log.child("startIndex").is_none());
}

#[test]
fn test_child_lookup_is_case_sensitive() {
    let log = log_element();
    assert!(log.child("startindex").is_none());
    assert!(log.child("startIndex").is_some());
}

#[test]
fn test_attribute_lookup() {
    let log = log_element();
    let start = log.child("startIndex").unwrap();
    assert_eq!(start.attribute("uom"), Some("m"));
    assert_eq!(start.attribute("missing"), None);
}

#[test]
fn test_set_text_replaces_children() {
    let mut element = Element::new("startIndex").with_text("100");
    element.set_text("250");
    assert_eq!(element.text(), "250");
    assert_eq!(element.children().len(), 1);
}

#[test]
fn test_set_text_empty_keeps_text_node() {
    let mut element = Element::new("endIndex");
    element.set_text("");
    assert_eq!(element.text(), "");
    assert_eq!(element.children(), &[Node::Text(String::new())]);
}

#[test]
fn test_insert_first_and_position() {
    let mut log = log_element();
    log.insert_first(Element::new("direction"));
    assert_eq!(log.child_position("direction"), Some(0));
    assert_eq!(log.child_position("indexType"), Some(1));
}

#[test]
fn test_replace_at_keeps_position() {
    let mut log = log_element();
    let position = log.child_position("startIndex").unwrap();
    log.replace_at(position, Element::new("startIndex").with_text("300"));

    assert_eq!(log.child_position("startIndex"), Some(position));
    assert_eq!(log.child("startIndex").unwrap().text(), "300");
    assert!(log.child("startIndex").unwrap().attributes().is_empty());
}

#[test]
fn test_retain_elements_removes_unmatched() {
    let mut log = log_element();
    log.retain_elements(|e| e.local_name() != "logCurveInfo");

    let names: Vec<&str> = log.elements().map(|e| e.local_name()).collect();
    assert_eq!(names, vec!["indexType", "startIndex"]);
}

#[test]
fn test_text_includes_cdata() {
    let mut element = Element::new("description");
    element.push_node(Node::Text("a".to_string()));
    element.push_node(Node::CData("<b>".to_string()));
    assert_eq!(element.text(), "a<b>");
}
