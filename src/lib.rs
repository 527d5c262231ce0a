//! witsml-autoquery library - Incremental auto-query for WITSML growing objects
//!
//! This library exposes the query cursor, the session loop that drives it and
//! the XML model both are built on.

pub mod config;
pub mod cursor;
pub mod error;
pub mod session;
#[cfg(test)]
pub mod test_utils;
pub mod xml;

// Re-export commonly used types for convenience
pub use config::Config;
pub use cursor::{CursorUpdate, GrowingObjectCursor, StopReason};
pub use error::AutoQueryError;
pub use session::{AutoQuerySession, QueryRequest, StoreClient, StoreResponse};
