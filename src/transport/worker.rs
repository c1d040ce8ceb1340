//! Off-thread execution of transport requests.
//!
//! Each request runs on its own short-lived thread and reports back over a
//! channel. Nothing is cancelled: superseded fetches complete normally and
//! the engine drops their results as stale.

use crate::model::{ActionSubmission, RequestId};
use crate::state::Event;
use crate::transport::Transport;
use std::collections::BTreeMap;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// Runs transport calls in the background and posts completions as events.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    events: Sender<Event>,
}

impl Dispatcher {
    /// Dispatcher posting completions to `events`.
    pub fn new(transport: Arc<dyn Transport>, events: Sender<Event>) -> Self {
        Self { transport, events }
    }

    /// Fetch a view; the result arrives as `Event::FetchCompleted`.
    pub fn fetch(&self, request: RequestId, args: BTreeMap<String, String>) {
        let transport = Arc::clone(&self.transport);
        let events = self.events.clone();
        thread::spawn(move || {
            let result = transport.fetch_view(&args);
            if let Err(err) = &result {
                warn!(%request, error = %err, "Fetch failed");
            }
            if events
                .send(Event::FetchCompleted { request, result })
                .is_err()
            {
                debug!(%request, "Event loop gone; dropping completion");
            }
        });
    }

    /// Submit an action without waiting. Failures are only logged.
    pub fn submit(&self, submission: ActionSubmission) {
        let transport = Arc::clone(&self.transport);
        thread::spawn(move || {
            if let Err(err) = transport.submit_action(&submission) {
                warn!(endpoint = %submission.endpoint, error = %err, "Action submission failed");
            }
        });
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}
