use tokio_util::sync::CancellationToken;

use super::LOG_OBJECT_TYPE;
use super::index_field::IndexField;
use super::types::{CursorUpdate, IndexKind, StopReason};
use crate::error::AutoQueryError;
use crate::xml::{Document, Element};

const INDEX_TYPE: &str = "indexType";
const DIRECTION: &str = "direction";
const INCREASING: &str = "increasing";
const UOM: &str = "uom";

/// Incremental query cursor for one auto-query session
#[derive(Debug)]
pub struct GrowingObjectCursor {
    object_type: String,
    current_query: String,
    cancel_token: CancellationToken,
}

impl GrowingObjectCursor {
    pub fn new(object_type: impl Into<String>, query_xml: impl Into<String>) -> Self {
        Self::with_cancel_token(object_type, query_xml, CancellationToken::new())
    }

    /// Create a cursor that shares cancellation with its session
    pub fn with_cancel_token(
        object_type: impl Into<String>,
        query_xml: impl Into<String>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            object_type: object_type.into(),
            current_query: query_xml.into(),
            cancel_token,
        }
    }

    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// Query text that will be rewritten by the next update
    pub fn current_query(&self) -> &str {
        &self.current_query
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Cancellation cannot be undone for the lifetime of the cursor
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Compute the next query from the latest result
    ///
    /// Returns an empty string when there is nothing further to query.
    /// Invalid XML and non-increasing logs are reported as errors.
    pub fn update_data_query(&mut self, result_xml: &str) -> Result<String, AutoQueryError> {
        Ok(self.next_query(result_xml)?.into_query())
    }

    /// Same as [`update_data_query`](Self::update_data_query) but keeps the reason for stopping
    pub fn next_query(&mut self, result_xml: &str) -> Result<CursorUpdate, AutoQueryError> {
        if !self.object_type.eq_ignore_ascii_case(LOG_OBJECT_TYPE) {
            return Ok(self.stop(StopReason::UnsupportedObjectType));
        }

        let mut query = Document::parse(&self.current_query)?;
        let result = Document::parse(result_xml)?;

        let Some(query_log) = query.root_mut().child_mut(LOG_OBJECT_TYPE) else {
            return Ok(self.stop(StopReason::MissingQueryLog));
        };
        let Some(result_log) = result.root().child(LOG_OBJECT_TYPE) else {
            return Ok(self.stop(StopReason::MissingResultLog));
        };

        ensure_increasing(query_log)?;
        ensure_increasing(result_log)?;

        let kind = if result_log.has_child(IndexKind::Depth.end_name()) {
            IndexKind::Depth
        } else if result_log.has_child(IndexKind::Time.end_name()) {
            IndexKind::Time
        } else {
            return Ok(self.stop(StopReason::MissingEndIndex));
        };

        let Some(result_end) = result_log.child(kind.end_name()) else {
            return Ok(self.stop(StopReason::MissingEndIndex));
        };
        let mut end = IndexField::from_element(result_end);
        if !kind.copies_attributes() {
            end = end.without_attributes();
        }
        if end.value().is_empty() {
            return Ok(self.stop(StopReason::MissingEndIndex));
        }

        if let Some(previous) = query_log.child(kind.start_name()) {
            // Values in different units are not comparable
            let same_unit = previous.attribute(UOM) == result_end.attribute(UOM);
            if same_unit && kind.is_regression(&previous.text(), end.value()) {
                log::warn!(
                    "{} {} is before current checkpoint {}",
                    kind.end_name(),
                    end.value(),
                    previous.text().trim()
                );
                return Ok(self.stop(StopReason::CheckpointRegressed));
            }
        }

        let checkpoint = end.clone().renamed(kind.start_name());
        let open_end = end.with_value("");
        apply_checkpoint(query_log, kind, &checkpoint, &open_end);

        let next = query.to_xml_string()?;
        log::debug!(
            "Auto-query checkpoint {}={}",
            kind.start_name(),
            checkpoint.value()
        );
        self.current_query = next.clone();
        Ok(CursorUpdate::Continue(next))
    }

    fn stop(&self, reason: StopReason) -> CursorUpdate {
        log::debug!(
            "Auto-query for '{}' stopped: {}",
            self.object_type,
            reason.description()
        );
        CursorUpdate::Stop(reason)
    }
}

fn ensure_increasing(log: &Element) -> Result<(), AutoQueryError> {
    let Some(direction) = log.child(DIRECTION) else {
        return Ok(());
    };
    let value = direction.text();
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(INCREASING) {
        Ok(())
    } else {
        Err(AutoQueryError::UnsupportedDirection(value.to_string()))
    }
}

/// Rewrite the query log so it starts at `checkpoint` with an open upper bound
fn apply_checkpoint(
    log: &mut Element,
    kind: IndexKind,
    checkpoint: &IndexField,
    open_end: &IndexField,
) {
    let prefix = log.prefix().map(str::to_string);
    let prefix = prefix.as_deref();

    for name in [INDEX_TYPE, DIRECTION] {
        if !log.has_child(name) {
            log.push(Element::new(qualify(prefix, name)));
        }
    }

    let start = checkpoint.to_element(prefix);
    match log.child_position(kind.start_name()) {
        Some(position) => log.replace_at(position, start),
        None => log.insert_first(start),
    }

    log.retain_elements(|e| kind.retains(e.local_name()));

    match log.child_mut(kind.end_name()) {
        Some(end) => end.set_text(""),
        None => log.push(open_end.to_element(prefix)),
    }
}

fn qualify(prefix: Option<&str>, local_name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, local_name),
        None => local_name.to_string(),
    }
}

#[cfg(test)]
#[path = "growing_tests.rs"]
mod growing_tests;
