//! Activation of bound item controls and navigation links.

use crate::model::{Command, ItemId, Removal};
use crate::state::engine::{Effect, EngineState};
use crate::state::navigation_handler;
use tracing::{debug, warn};

/// Fire control `index` of `item` in the visible fragment.
///
/// Unbound controls do nothing. Disabled controls have already fired.
pub fn activate_control(state: &mut EngineState, item: &ItemId, index: usize) -> Vec<Effect> {
    let Some(control) = state
        .fragment
        .get_mut(item)
        .and_then(|it| it.controls.get_mut(index))
    else {
        debug!(%item, index, "No such control");
        return Vec::new();
    };
    if control.disabled {
        return Vec::new();
    }
    let Some(command) = control.binding().cloned() else {
        warn!(%item, kind = %control.kind, "Control activated while unbound");
        return Vec::new();
    };

    match command {
        Command::Submit {
            submission,
            removal,
        } => {
            control.mark_spent();
            match removal {
                Removal::None => {}
                Removal::Item(id) => {
                    state.fragment.remove_item(&id);
                }
                Removal::Conversation(convoy) => {
                    let removed = state.fragment.remove_conversation(&convoy);
                    debug!(%convoy, removed, "Muted conversation");
                }
            }
            vec![Effect::SubmitAction(submission)]
        }
        Command::Navigate { key, url } => navigation_handler::navigate_to(state, key, url, None),
        Command::Compose { reply_to, mention } => vec![Effect::OpenComposer { reply_to, mention }],
    }
}

/// Follow navigation link `index` of `item` in the visible fragment.
pub fn follow_link(state: &mut EngineState, item: &ItemId, index: usize) -> Vec<Effect> {
    let Some(link) = state
        .fragment
        .get(item)
        .and_then(|it| it.links.get(index))
    else {
        debug!(%item, index, "No such link");
        return Vec::new();
    };
    match link.binding().cloned() {
        Some(Command::Navigate { key, url }) => navigation_handler::navigate_to(state, key, url, None),
        Some(other) => {
            warn!(%item, command = ?other, "Link bound to non-navigation command");
            Vec::new()
        }
        None => {
            warn!(%item, "Link followed while unbound");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "action_handler_tests.rs"]
mod tests;
