//! Shared test utilities for witsml-autoquery
//!
//! This module provides common test fixtures and helper functions
//! used across multiple test modules.

#[cfg(test)]
pub mod test_helpers {
    use crate::session::StoreResponse;
    use crate::xml::{Document, Element};

    /// Depth log query with a checkpoint at 0 m and an open end index
    pub const DEPTH_QUERY: &str =
        r#"<logs><log><startIndex uom="m">0</startIndex><endIndex uom="m"/></log></logs>"#;

    /// Result document for a depth log ending at `end` metres
    pub fn depth_result(end: u32) -> String {
        format!(
            r#"<logs><log><endIndex uom="m">{}</endIndex></log></logs>"#,
            end
        )
    }

    /// Store response carrying a depth log page ending at `end` metres
    pub fn depth_page(return_code: i16, end: u32) -> StoreResponse {
        StoreResponse {
            return_code,
            result_xml: depth_result(end),
            message: None,
        }
    }

    /// Parse a query and return a copy of its log element
    pub fn query_log(query: &str) -> Element {
        Document::parse(query)
            .expect("query parses")
            .root()
            .child("log")
            .cloned()
            .expect("query has a log element")
    }

    /// Text of the query's startIndex element, empty when absent
    pub fn start_index(query: &str) -> String {
        query_log(query)
            .child("startIndex")
            .map(|e| e.text())
            .unwrap_or_default()
    }
}
