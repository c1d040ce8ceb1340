//! Incremental refresh of the visible view.

use crate::model::{TransportError, ViewPayload};
use crate::state::engine::{Effect, EngineState, RefreshTrigger};
use crate::state::merger;
use tracing::{debug, warn};

/// Start pulling items newer than the visible view's mark.
///
/// Ignored while the trigger is disabled or a navigation load is pending.
pub fn request_refresh(state: &mut EngineState) -> Vec<Effect> {
    if state.phase().is_loading() {
        debug!("Refresh ignored while loading");
        return Vec::new();
    }
    if !state.is_refresh_ready() {
        debug!("Refresh ignored while one is in flight");
        return Vec::new();
    }

    merger::clear_highlight(&mut state.fragment);
    let key = state.visible_key().clone();
    let request = state.issue_request();
    let args = state.refresh_args(&key);
    debug!(view = %key, %request, "Refreshing");
    state.refresh = RefreshTrigger::InFlight { request, key };
    vec![Effect::FetchView { request, args }]
}

/// Apply the result of the in-flight refresh.
///
/// Success merges the new items with the highlight set and reports how
/// many arrived. Failure reports the error and leaves every fragment and
/// mark untouched. The trigger is re-enabled in both cases.
pub fn complete_refresh(
    state: &mut EngineState,
    result: Result<ViewPayload, TransportError>,
) -> Vec<Effect> {
    let key = match std::mem::replace(&mut state.refresh, RefreshTrigger::Ready) {
        RefreshTrigger::InFlight { key, .. } => key,
        RefreshTrigger::Ready => return Vec::new(),
    };

    match result {
        Ok(payload) => {
            state.marks.record(&key, payload.high_water);
            state.counters = payload.counters;
            state.status = payload.status;
            let count = merger::merge(&mut state.fragment, payload.items, key.kind, true);
            state.fragment.mark_loaded();
            state.rebind();
            debug!(view = %key, count, "Refresh merged");
            state.status_line = format!(" {} new", count);
        }
        Err(err) => {
            warn!(view = %key, error = %err, "Refresh failed");
            state.status_line = err.status_text();
        }
    }
    Vec::new()
}

/// Scroll to the last item bearing the "new" highlight, if any.
pub fn jump_to_oldest_new(state: &EngineState) -> Vec<Effect> {
    state
        .fragment()
        .last_highlighted()
        .map(|id| vec![Effect::ScrollToItem(id.clone())])
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "refresh_handler_tests.rs"]
mod tests;
