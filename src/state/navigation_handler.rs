//! View switching: stash, restore or fetch, and history integration.
//!
//! Pure functions that transform [`EngineState`] in response to navigation
//! intents and navigation-load completions.

use crate::model::{Fragment, ItemId, TransportError, ViewKey, ViewPayload};
use crate::state::engine::{Effect, EngineState, Phase, RefreshTrigger};
use crate::state::history::HistoryEntry;
use crate::state::merger;
use std::mem;
use tracing::{debug, warn};

/// Switch the visible view to `entry.key`.
///
/// # Arguments
/// * `state` - Engine state to transform
/// * `entry` - Target view and the URL that led to it
/// * `anchor` - Item to scroll to once the target is displayed
/// * `push` - `true` for user navigation, `false` when replaying history
///
/// Navigating to the visible view only applies `anchor`: it scrolls there
/// when settled, or replaces the pending anchor while loading. Otherwise the visible
/// fragment is stashed (when it holds loaded content), any in-flight
/// refresh is abandoned, and the target is restored from the cache or
/// fetched into a fresh placeholder.
pub fn navigate(
    state: &mut EngineState,
    entry: HistoryEntry,
    anchor: Option<ItemId>,
    push: bool,
) -> Vec<Effect> {
    let current = state.visible_key().clone();
    if entry.key == current {
        debug!(view = %current, "Navigate to visible view ignored");
        return match (anchor, &mut state.phase) {
            (Some(anchor), Phase::Idle { .. }) => vec![Effect::ScrollToItem(anchor)],
            (Some(anchor), Phase::Loading { anchor: pending, .. }) => {
                *pending = Some(anchor);
                Vec::new()
            }
            (None, _) => Vec::new(),
        };
    }

    leave_visible(state);

    let key = entry.key.clone();
    let mut effects = Vec::new();
    let restored = match state.cache.lookup(&key) {
        Some((fragment, status)) => {
            debug!(from = %current, to = %key, "Restoring cached view");
            state.fragment = fragment;
            state.status = status;
            state.phase = Phase::Idle {
                current: key.clone(),
            };
            state.rebind();
            true
        }
        None => {
            let request = state.issue_request();
            let args = key.query_args();
            debug!(from = %current, to = %key, %request, "Loading view");
            state.phase = Phase::Loading {
                target: key.clone(),
                request,
                anchor: anchor.clone(),
            };
            effects.push(Effect::FetchView { request, args });
            false
        }
    };

    if push {
        effects.push(Effect::PushHistory(entry));
    }
    match anchor {
        Some(anchor) if restored => effects.push(Effect::ScrollToItem(anchor)),
        Some(_) => {}
        None if push => effects.push(Effect::ScrollToTop),
        None => {}
    }
    effects
}

/// User navigation to `key`, optionally through a link URL.
///
/// Without a URL the history entry uses the view's default URL. An
/// explicit anchor wins over one encoded in the URL.
pub fn navigate_to(
    state: &mut EngineState,
    key: ViewKey,
    url: Option<String>,
    anchor: Option<ItemId>,
) -> Vec<Effect> {
    let entry = match url {
        Some(url) => HistoryEntry::new(key, url),
        None => HistoryEntry::for_key(key),
    };
    let anchor = anchor.or_else(|| entry.anchor());
    navigate(state, entry, anchor, true)
}

/// Detach the visible fragment, leaving an empty placeholder in its place.
fn leave_visible(state: &mut EngineState) {
    let key = state.visible_key().clone();
    merger::clear_highlight(&mut state.fragment);
    let fragment = mem::replace(&mut state.fragment, Fragment::placeholder());
    let status = mem::take(&mut state.status);
    if fragment.is_loaded() {
        state.cache.stash(key, fragment, status);
    } else {
        debug!(view = %key, "Discarding unloaded placeholder");
    }

    if let RefreshTrigger::InFlight { request, key } = &state.refresh {
        debug!(view = %key, %request, "Abandoning in-flight refresh");
        state.refresh = RefreshTrigger::Ready;
    }
    state.status_line.clear();
}

/// Apply the result of the pending navigation load.
///
/// The caller has already matched the completion against the pending
/// request. Success populates the placeholder; failure leaves it empty
/// and reports the error. Either way the engine settles in `Idle`.
pub fn complete_load(
    state: &mut EngineState,
    result: Result<ViewPayload, TransportError>,
) -> Vec<Effect> {
    let (target, anchor) = match &state.phase {
        Phase::Loading { target, anchor, .. } => (target.clone(), anchor.clone()),
        Phase::Idle { .. } => return Vec::new(),
    };

    let mut effects = Vec::new();
    match result {
        Ok(payload) => {
            state.marks.record(&target, payload.high_water);
            state.counters = payload.counters;
            state.status = payload.status;
            let count = merger::merge(&mut state.fragment, payload.items, target.kind, false);
            state.fragment.mark_loaded();
            state.rebind();
            debug!(view = %target, count, "View loaded");
            if let Some(anchor) = anchor {
                effects.push(Effect::ScrollToItem(anchor));
            }
        }
        Err(err) => {
            warn!(view = %target, error = %err, "View load failed");
            state.status_line = err.status_text();
        }
    }
    state.phase = Phase::Idle { current: target };
    effects
}

#[cfg(test)]
#[path = "navigation_handler_tests.rs"]
mod tests;
