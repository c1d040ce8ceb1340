//! Network access for the engine.
//!
//! This module provides the two operations the engine requests as effects:
//! - Fetch-view: read a view (optionally only items newer than a mark)
//! - Submit-action: fire-and-forget write used by item controls
//!
//! [`Transport`] is the seam between the blocking HTTP client and the
//! worker threads that run requests off the UI thread.

use crate::model::{ActionSubmission, TransportError, ViewPayload};
use std::collections::BTreeMap;
use std::time::Duration;

pub mod http;
pub mod worker;

pub use http::HttpTransport;
pub use worker::Dispatcher;

/// Client-side bound on fetch-view requests.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(15);
/// Client-side bound on action submissions.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking network operations.
///
/// Implementations must return within their timeout and report it as
/// [`TransportError::Timeout`] instead of hanging.
pub trait Transport: Send + Sync {
    /// Fetch a view. `args` carries `page`, the kind's argument
    /// parameter, and optionally `tophid`.
    fn fetch_view(&self, args: &BTreeMap<String, String>) -> Result<ViewPayload, TransportError>;

    /// Post an action. The response body is ignored.
    fn submit_action(&self, submission: &ActionSubmission) -> Result<(), TransportError>;
}
