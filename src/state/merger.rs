//! Fragment merging and control binding (pure).
//!
//! Incoming payload items are inserted into the visible fragment in the
//! order the view kind requires. Every control and navigation link is then
//! given a command so the fragment becomes interactive.

use crate::model::{
    ActionKind, ActionSubmission, Command, Control, Fragment, Item, ItemId, Removal, ViewKey,
    ViewKind,
};
use tracing::{debug, warn};

/// Attach a command to every control and link in the fragment.
///
/// Idempotent: already-bound controls are re-bound to an equal command.
/// Must run after every insertion and every cache restore.
pub fn bind(fragment: &mut Fragment, csrf: &str) {
    for item in fragment.items_mut() {
        let id = item.id.clone();
        let convoy = item.convoy.clone();
        let author = item.author.clone();
        for control in &mut item.controls {
            match command_for(control, &id, convoy.as_deref(), author.as_deref(), csrf) {
                Some(command) => control.bind(command),
                None => warn!(item = %id, kind = %control.kind, "Control has no command"),
            }
        }
        for link in &mut item.links {
            let command = Command::Navigate {
                key: link.target.clone(),
                url: link.url.clone(),
            };
            link.bind(command);
        }
    }
}

fn command_for(
    control: &Control,
    id: &ItemId,
    convoy: Option<&str>,
    author: Option<&str>,
    csrf: &str,
) -> Option<Command> {
    match control.kind {
        ActionKind::Reply => Some(Command::Compose {
            reply_to: control.target.clone(),
            mention: author.map(str::to_string),
        }),
        ActionKind::ExpandThread => {
            let convoy = convoy.unwrap_or(&control.target);
            Some(Command::Navigate {
                key: ViewKey::conversation(convoy),
                url: None,
            })
        }
        kind => {
            let submission = ActionSubmission::for_action(kind, &control.target, csrf)?;
            let removal = match kind {
                ActionKind::Zonk => Removal::Item(id.clone()),
                ActionKind::Mute => Removal::Conversation(control.target.clone()),
                _ => Removal::None,
            };
            Some(Command::Submit {
                submission,
                removal,
            })
        }
    }
}

/// Insert payload items into the visible fragment.
///
/// `items` arrive newest-first. They are walked last to first; every kind
/// but [`ViewKind::Conversation`] prepends each one, so the fragment starts
/// with the payload in server order. Conversations append, keeping the
/// thread oldest-first. When `highlight` is set each inserted item gets the
/// transient "new" highlight.
///
/// Returns the number of items inserted, which is always `items.len()`.
pub fn merge(fragment: &mut Fragment, items: Vec<Item>, kind: ViewKind, highlight: bool) -> usize {
    let count = items.len();
    for mut item in items.into_iter().rev() {
        item.set_highlighted(highlight);
        if kind.is_chronological() {
            fragment.append(item);
        } else {
            fragment.prepend(item);
        }
    }
    if count > 0 {
        debug!(kind = %kind, count, highlight, "Merged items");
    }
    count
}

/// Clear the transient highlight on every visible item.
pub fn clear_highlight(fragment: &mut Fragment) {
    fragment.clear_highlight();
}

#[cfg(test)]
#[path = "merger_tests.rs"]
mod tests;
