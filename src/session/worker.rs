//! Session Worker Thread
//!
//! Runs an auto-query session on a background thread so the caller stays
//! responsive, and streams progress back over a channel.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use tokio_util::sync::CancellationToken;

use super::auto_query::AutoQuerySession;
use super::client::StoreClient;
use super::types::{QueryRequest, SessionEvent, SessionSettings};

/// Spawn a background thread that drives one auto-query session
///
/// Every round trip is reported as [`SessionEvent::RoundTrip`]; the session
/// ends with exactly one [`SessionEvent::Finished`] or [`SessionEvent::Failed`].
/// Cancel through `cancel_token`; the worker checks it before each request.
///
/// # Arguments
/// * `client` - Transport used for every request in the session
/// * `initial` - First query to submit
/// * `settings` - Partial-result and round-trip settings
/// * `cancel_token` - Token for cancelling the session
/// * `event_tx` - Channel to send progress events
pub fn spawn_session<C>(
    mut client: C,
    initial: QueryRequest,
    settings: SessionSettings,
    cancel_token: CancellationToken,
    event_tx: Sender<SessionEvent>,
) -> JoinHandle<()>
where
    C: StoreClient + Send + 'static,
{
    std::thread::spawn(move || {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            run_session(&mut client, initial, settings, cancel_token, &event_tx);
        }));

        if let Err(e) = result {
            let panic_msg = panic_message(e.as_ref());
            log::error!("Auto-query worker panicked: {}", panic_msg);
            let _ = event_tx.send(SessionEvent::Failed {
                message: format!("Auto-query worker crashed: {}", panic_msg),
            });
        }
    })
}

fn run_session<C: StoreClient>(
    client: &mut C,
    initial: QueryRequest,
    settings: SessionSettings,
    cancel_token: CancellationToken,
    event_tx: &Sender<SessionEvent>,
) {
    log::debug!("Auto-query worker started for request {}", initial.request_id);
    let mut session = AutoQuerySession::new(settings, cancel_token);

    let result = session.run(client, initial, |request, response| {
        let _ = event_tx.send(SessionEvent::RoundTrip {
            request: request.clone(),
            response: response.clone(),
        });
    });

    match result {
        Ok(summary) => {
            let _ = event_tx.send(SessionEvent::Finished(summary));
        }
        Err(e) => {
            log::debug!("Auto-query session failed: {}", e);
            let _ = event_tx.send(SessionEvent::Failed {
                message: e.to_string(),
            });
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
