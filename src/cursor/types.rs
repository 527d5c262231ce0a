use chrono::DateTime;

/// Why the cursor produced no further query
///
/// Every variant surfaces as an empty query string through
/// [`GrowingObjectCursor::update_data_query`](super::GrowingObjectCursor::update_data_query).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Object type is not a supported growing object
    UnsupportedObjectType,
    /// Current query has no growing-object element under its root
    MissingQueryLog,
    /// Result has no growing-object element under its root
    MissingResultLog,
    /// Result reported neither `endIndex` nor `endDateTimeIndex`, or left it empty
    MissingEndIndex,
    /// Result end index lies before the checkpoint already in the query
    CheckpointRegressed,
}

impl StopReason {
    pub fn description(&self) -> &'static str {
        match self {
            StopReason::UnsupportedObjectType => "object type does not support auto-query",
            StopReason::MissingQueryLog => "query has no log element",
            StopReason::MissingResultLog => "result has no log element",
            StopReason::MissingEndIndex => "result did not report an end index",
            StopReason::CheckpointRegressed => "result end index is before the current checkpoint",
        }
    }
}

/// Outcome of a single cursor update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorUpdate {
    /// Next query text to submit
    Continue(String),
    Stop(StopReason),
}

impl CursorUpdate {
    /// Next query text, or an empty string when auto-query should stop
    pub fn into_query(self) -> String {
        match self {
            CursorUpdate::Continue(query) => query,
            CursorUpdate::Stop(_) => String::new(),
        }
    }
}

/// Index style of a growing log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Depth,
    Time,
}

impl IndexKind {
    pub fn start_name(self) -> &'static str {
        match self {
            IndexKind::Depth => "startIndex",
            IndexKind::Time => "startDateTimeIndex",
        }
    }

    pub fn end_name(self) -> &'static str {
        match self {
            IndexKind::Depth => "endIndex",
            IndexKind::Time => "endDateTimeIndex",
        }
    }

    /// Depth values carry unit-of-measure attributes; datetime values do not
    pub fn copies_attributes(self) -> bool {
        matches!(self, IndexKind::Depth)
    }

    /// Whether a query child element survives the rewrite
    pub fn retains(self, local_name: &str) -> bool {
        local_name == "indexType"
            || local_name == "direction"
            || local_name == self.start_name()
            || local_name == self.end_name()
    }

    /// True when `next` is strictly before `previous`
    ///
    /// Values that cannot be parsed for this index kind are never reported
    /// as a regression.
    pub fn is_regression(self, previous: &str, next: &str) -> bool {
        let (previous, next) = (previous.trim(), next.trim());
        if previous.is_empty() || next.is_empty() {
            return false;
        }

        match self {
            IndexKind::Depth => match (previous.parse::<f64>(), next.parse::<f64>()) {
                (Ok(previous), Ok(next)) => next < previous,
                _ => false,
            },
            IndexKind::Time => match (
                DateTime::parse_from_rfc3339(previous),
                DateTime::parse_from_rfc3339(next),
            ) {
                (Ok(previous), Ok(next)) => next < previous,
                _ => false,
            },
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
