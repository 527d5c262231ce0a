use tokio_util::sync::CancellationToken;

use super::client::StoreClient;
use super::types::{
    QueryRequest, QueryStatus, ReturnElements, SessionOutcome, SessionSettings, SessionSummary,
    StoreResponse,
};
use crate::cursor::GrowingObjectCursor;
use crate::error::AutoQueryError;

/// Continuation rules for one auto-query session
///
/// The cursor is created on the first partial result and dropped as soon as
/// the session has nothing more to request.
#[derive(Debug)]
pub struct AutoQuerySession {
    settings: SessionSettings,
    cancel_token: CancellationToken,
    cursor: Option<GrowingObjectCursor>,
}

impl AutoQuerySession {
    pub fn new(settings: SessionSettings, cancel_token: CancellationToken) -> Self {
        Self {
            settings,
            cancel_token,
            cursor: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn cursor(&self) -> Option<&GrowingObjectCursor> {
        self.cursor.as_ref()
    }

    /// Decide whether `response` to `request` needs a continuation request
    ///
    /// Returns the next request to submit, or `None` when the session is over.
    /// Cursor errors end the session and are returned to the caller.
    pub fn handle_response(
        &mut self,
        request: &QueryRequest,
        response: &StoreResponse,
    ) -> Result<Option<QueryRequest>, AutoQueryError> {
        if response.status() != QueryStatus::PartialSuccess
            || !self.settings.retrieve_partial_results
            || self.is_cancelled()
        {
            self.cursor = None;
            return Ok(None);
        }

        let cancel_token = self.cancel_token.clone();
        let cursor = self.cursor.get_or_insert_with(|| {
            log::debug!(
                "Starting auto-query for '{}' from request {}",
                request.object_type,
                request.request_id
            );
            GrowingObjectCursor::with_cancel_token(
                request.object_type.clone(),
                request.query_xml.clone(),
                cancel_token,
            )
        });

        let next_query = match cursor.update_data_query(&response.result_xml) {
            Ok(query) => query,
            Err(e) => {
                log::warn!("Auto-query update failed: {}", e);
                self.cursor = None;
                return Err(e);
            }
        };

        if next_query.is_empty() {
            self.cursor = None;
            return Ok(None);
        }

        if let Some(original) = request.options_in.return_elements() {
            if original != ReturnElements::DataOnly {
                log::debug!(
                    "Continuation overrides returnElements={} with {}",
                    original.as_str(),
                    ReturnElements::DataOnly.as_str()
                );
            }
        }

        Ok(Some(QueryRequest {
            request_id: request.request_id + 1,
            object_type: request.object_type.clone(),
            query_xml: next_query,
            options_in: request
                .options_in
                .clone()
                .with_return_elements(ReturnElements::DataOnly),
            is_partial_query: true,
        }))
    }

    /// Submit `initial` and keep submitting continuations until the session ends
    ///
    /// `observer` sees every request together with its response, in order.
    pub fn run<C, F>(
        &mut self,
        client: &mut C,
        initial: QueryRequest,
        mut observer: F,
    ) -> Result<SessionSummary, AutoQueryError>
    where
        C: StoreClient + ?Sized,
        F: FnMut(&QueryRequest, &StoreResponse),
    {
        let mut request = initial;
        let mut round_trips = 0u32;
        let mut final_status = None;

        loop {
            if self.is_cancelled() {
                self.cursor = None;
                return Ok(self.summary(
                    round_trips,
                    final_status,
                    SessionOutcome::Cancelled,
                    request,
                ));
            }

            log::debug!(
                "Submitting request {} (partial: {})",
                request.request_id,
                request.is_partial_query
            );
            let response = match client.get_from_store(&request) {
                Ok(response) => response,
                Err(e) => {
                    self.cursor = None;
                    return Err(e);
                }
            };
            round_trips += 1;
            let status = response.status();
            final_status = Some(status);
            observer(&request, &response);

            match self.handle_response(&request, &response)? {
                Some(next) => {
                    if self.settings.max_round_trips > 0
                        && round_trips >= self.settings.max_round_trips
                    {
                        log::warn!(
                            "Auto-query stopped after {} round trips with data still pending",
                            round_trips
                        );
                        self.cursor = None;
                        return Ok(self.summary(
                            round_trips,
                            final_status,
                            SessionOutcome::LimitReached,
                            request,
                        ));
                    }
                    request = next;
                }
                None => {
                    let outcome = if self.is_cancelled() {
                        SessionOutcome::Cancelled
                    } else if status == QueryStatus::PartialSuccess
                        && self.settings.retrieve_partial_results
                    {
                        SessionOutcome::Stopped
                    } else {
                        SessionOutcome::Completed
                    };
                    return Ok(self.summary(round_trips, final_status, outcome, request));
                }
            }
        }
    }

    fn summary(
        &self,
        round_trips: u32,
        final_status: Option<QueryStatus>,
        outcome: SessionOutcome,
        last_request: QueryRequest,
    ) -> SessionSummary {
        log::info!(
            "Auto-query finished: {:?} after {} round trips",
            outcome,
            round_trips
        );
        SessionSummary {
            round_trips,
            final_status,
            outcome,
            last_query: last_request.query_xml,
        }
    }
}

#[cfg(test)]
#[path = "auto_query_tests.rs"]
mod auto_query_tests;
