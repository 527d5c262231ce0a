//! Session Types
//!
//! Request, response and progress types exchanged between the auto-query
//! session, its store client and whoever is watching the session.

use serde::Serialize;

use super::options::OptionsIn;

/// Outcome class of a store response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryStatus {
    Success,
    /// Server returned a subset of the requested data and more is available
    PartialSuccess,
    Error,
}

impl QueryStatus {
    /// Classify a WITSML return code
    ///
    /// `2` is partial success, other positive codes are success (possibly
    /// with a warning) and zero or negative codes are errors.
    pub fn from_return_code(code: i16) -> Self {
        match code {
            2 => QueryStatus::PartialSuccess,
            c if c > 0 => QueryStatus::Success,
            _ => QueryStatus::Error,
        }
    }
}

/// Values of the WITSML `returnElements` option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnElements {
    All,
    IdOnly,
    HeaderOnly,
    DataOnly,
    StationLocationOnly,
    LatestChangeOnly,
    Requested,
}

impl ReturnElements {
    pub const OPTION_KEY: &'static str = "returnElements";

    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnElements::All => "all",
            ReturnElements::IdOnly => "id-only",
            ReturnElements::HeaderOnly => "header-only",
            ReturnElements::DataOnly => "data-only",
            ReturnElements::StationLocationOnly => "station-location-only",
            ReturnElements::LatestChangeOnly => "latest-change-only",
            ReturnElements::Requested => "requested",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        [
            ReturnElements::All,
            ReturnElements::IdOnly,
            ReturnElements::HeaderOnly,
            ReturnElements::DataOnly,
            ReturnElements::StationLocationOnly,
            ReturnElements::LatestChangeOnly,
            ReturnElements::Requested,
        ]
        .into_iter()
        .find(|r| r.as_str().eq_ignore_ascii_case(value))
    }
}

/// Request sent to the store
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    /// Unique ID for tracking this request within a session
    pub request_id: u64,
    /// Growing object type (e.g. "log")
    pub object_type: String,
    pub query_xml: String,
    pub options_in: OptionsIn,
    /// True for continuation requests issued by the auto-query cursor
    pub is_partial_query: bool,
}

impl QueryRequest {
    pub fn new(
        request_id: u64,
        object_type: impl Into<String>,
        query_xml: impl Into<String>,
        options_in: OptionsIn,
    ) -> Self {
        Self {
            request_id,
            object_type: object_type.into(),
            query_xml: query_xml.into(),
            options_in,
            is_partial_query: false,
        }
    }
}

/// Response received from the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreResponse {
    pub return_code: i16,
    pub result_xml: String,
    /// Supplemental message from the server
    pub message: Option<String>,
}

impl StoreResponse {
    pub fn status(&self) -> QueryStatus {
        QueryStatus::from_return_code(self.return_code)
    }
}

/// Behaviour switches for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Continue automatically when the server reports partial success
    pub retrieve_partial_results: bool,
    /// Safety bound on round trips; 0 means unlimited
    pub max_round_trips: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            retrieve_partial_results: true,
            max_round_trips: 0,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionOutcome {
    /// Last response did not ask for a continuation
    Completed,
    Cancelled,
    /// Partial success, but there was no further query to issue
    Stopped,
    /// Round-trip limit was reached while data was still pending
    LimitReached,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionOutcome::Completed => "completed",
            SessionOutcome::Cancelled => "cancelled",
            SessionOutcome::Stopped => "stopped",
            SessionOutcome::LimitReached => "limit-reached",
        }
    }
}

/// Summary of a finished session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub round_trips: u32,
    pub final_status: Option<QueryStatus>,
    pub outcome: SessionOutcome,
    /// Query the session ended on
    pub last_query: String,
}

/// Progress reported by a background session
#[derive(Debug)]
pub enum SessionEvent {
    /// One request/response exchange completed
    RoundTrip {
        request: QueryRequest,
        response: StoreResponse,
    },
    Finished(SessionSummary),
    /// Session ended with an error (store failure, invalid XML, unsupported direction)
    Failed { message: String },
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
