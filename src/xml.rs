//! XML Document Model
//!
//! Minimal owned element tree for WITSML query and result documents.
//! Parsing and writing are delegated to `quick-xml`; this module only keeps
//! the structure the auto-query cursor needs to read and rewrite.

mod document;
mod element;

pub use document::Document;
pub use element::{Element, Node};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XmlError {
    #[error("syntax error at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("unexpected closing tag </{found}> at byte {position}")]
    UnexpectedEnd { found: String, position: u64 },

    #[error("element <{0}> is not closed")]
    Unclosed(String),

    #[error("document has no root element")]
    MissingRoot,

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("failed to write XML: {0}")]
    Write(String),
}
