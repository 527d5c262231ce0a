//! Replay Client
//!
//! Serves store responses recorded in a TOML transcript, one per request,
//! so sessions can be exercised without a live WITSML server.
//!
//! ```toml
//! [[response]]
//! return_code = 2
//! result_file = "page-1.xml"
//!
//! [[response]]
//! return_code = 1
//! result = "<logs><log/></logs>"
//! message = "done"
//! ```

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::client::StoreClient;
use super::types::{QueryRequest, StoreResponse};
use crate::error::AutoQueryError;

/// Recorded sequence of store responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transcript {
    #[serde(rename = "response", default)]
    pub responses: Vec<RecordedResponse>,
}

/// One recorded response; the result is given inline or as a file
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedResponse {
    pub return_code: i16,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub result_file: Option<PathBuf>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Transcript {
    pub fn parse(text: &str) -> Result<Self, AutoQueryError> {
        toml::from_str(text).map_err(|e| AutoQueryError::InvalidTranscript(e.to_string()))
    }

    /// Load a transcript and read any `result_file` relative to it
    pub fn load(path: &Path) -> Result<Self, AutoQueryError> {
        let contents = fs::read_to_string(path)?;
        let mut transcript = Self::parse(&contents)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        for (i, response) in transcript.responses.iter_mut().enumerate() {
            let Some(file) = &response.result_file else {
                continue;
            };
            if response.result.is_some() {
                return Err(AutoQueryError::InvalidTranscript(format!(
                    "response {} has both result and result_file",
                    i + 1
                )));
            }
            let result_path = base.join(file);
            log::debug!("Reading recorded result from {:?}", result_path);
            response.result = Some(fs::read_to_string(&result_path)?);
            response.result_file = None;
        }

        Ok(transcript)
    }
}

/// Store client that answers with recorded responses in order
#[derive(Debug, Default)]
pub struct ReplayClient {
    responses: VecDeque<StoreResponse>,
    served: usize,
    requests: Vec<QueryRequest>,
}

impl ReplayClient {
    pub fn new(responses: Vec<StoreResponse>) -> Self {
        Self {
            responses: responses.into(),
            served: 0,
            requests: Vec::new(),
        }
    }

    pub fn from_transcript(transcript: Transcript) -> Result<Self, AutoQueryError> {
        let responses = transcript
            .responses
            .into_iter()
            .enumerate()
            .map(|(i, recorded)| {
                if recorded.result_file.is_some() {
                    return Err(AutoQueryError::InvalidTranscript(format!(
                        "response {} refers to a result file that was not loaded",
                        i + 1
                    )));
                }
                Ok(StoreResponse {
                    return_code: recorded.return_code,
                    result_xml: recorded.result.unwrap_or_default(),
                    message: recorded.message,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(responses))
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> &[QueryRequest] {
        &self.requests
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl StoreClient for ReplayClient {
    fn get_from_store(&mut self, request: &QueryRequest) -> Result<StoreResponse, AutoQueryError> {
        self.requests.push(request.clone());
        let response = self
            .responses
            .pop_front()
            .ok_or(AutoQueryError::ReplayExhausted(self.served))?;
        self.served += 1;
        Ok(response)
    }
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod replay_tests;
