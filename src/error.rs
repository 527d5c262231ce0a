use thiserror::Error;

use crate::xml::XmlError;

#[derive(Debug, Error)]
pub enum AutoQueryError {
    #[error("Invalid XML: {0}")]
    Xml(#[from] XmlError),

    #[error("Unsupported index direction '{0}': only increasing logs can be auto-queried")]
    UnsupportedDirection(String),

    #[error("Store request {request_id} failed: {message}")]
    Store { request_id: u64, message: String },

    #[error("Replay transcript exhausted after {0} responses")]
    ReplayExhausted(usize),

    #[error("Invalid transcript: {0}")]
    InvalidTranscript(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
