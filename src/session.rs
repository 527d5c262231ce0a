//! Auto-Query Session
//!
//! Drives repeated store requests for a growing object until the server
//! stops reporting partial success, the cursor has nothing left to ask for,
//! or the session is cancelled.
//!
//! ## Architecture
//!
//! - [`StoreClient`] is the transport seam; the WITSML wire protocol lives
//!   behind it
//! - [`AutoQuerySession`] applies the continuation rules to each response
//! - [`spawn_session`] runs a session on a background thread and reports
//!   progress over a channel, following strict request/response alternation
//! - [`ReplayClient`] serves recorded responses for offline runs and tests
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::mpsc::channel;
//! use tokio_util::sync::CancellationToken;
//! use witsml_autoquery::session::{spawn_session, QueryRequest, SessionEvent, SessionSettings};
//!
//! let (event_tx, event_rx) = channel();
//! let cancel_token = CancellationToken::new();
//! spawn_session(client, request, SessionSettings::default(), cancel_token.clone(), event_tx);
//!
//! while let Ok(event) = event_rx.recv() {
//!     match event {
//!         SessionEvent::RoundTrip { request, response } => println!("{}", request.query_xml),
//!         SessionEvent::Finished(summary) => break,
//!         SessionEvent::Failed { message } => eprintln!("{}", message),
//!     }
//! }
//! ```

mod auto_query;
mod client;
mod options;
mod replay;
mod types;
mod worker;

pub use auto_query::AutoQuerySession;
pub use client::StoreClient;
pub use options::OptionsIn;
pub use replay::{RecordedResponse, ReplayClient, Transcript};
pub use types::{
    QueryRequest, QueryStatus, ReturnElements, SessionEvent, SessionOutcome, SessionSettings,
    SessionSummary, StoreResponse,
};
pub use worker::spawn_session;
