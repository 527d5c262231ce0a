//! Growing-Object Query Cursor
//!
//! Rewrites a WITSML growing-object query after each partial result so the
//! next round trip only asks for data appended since the last checkpoint.
//!
//! Only `log` objects with an increasing index are supported. Depth logs
//! carry the checkpoint in `startIndex`/`endIndex`; time logs use
//! `startDateTimeIndex`/`endDateTimeIndex`.

mod growing;
mod index_field;
mod types;

pub use growing::GrowingObjectCursor;
pub use index_field::IndexField;
pub use types::{CursorUpdate, IndexKind, StopReason};

use crate::xml::Document;

/// The only growing object type the cursor knows how to continue
pub const LOG_OBJECT_TYPE: &str = "log";

/// Infer the object type from a plural WITSML query root (`logs` -> `log`)
pub fn object_type_of(document: &Document) -> String {
    let root = document.root().local_name();
    root.strip_suffix('s').unwrap_or(root).to_string()
}
