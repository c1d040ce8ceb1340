//! Per-item action controls: the closed set of action kinds and the
//! commands a control is bound to.

use crate::model::{ItemId, ViewKey};
use std::fmt;
use std::str::FromStr;

/// Kind of an actionable control inside an item.
///
/// Attached as data (`data-action`) on each control at render time; the
/// merger's bind step switches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Boost the item.
    Bonk,
    /// Withdraw a boost.
    Unbonk,
    /// Mute the whole conversation.
    Mute,
    /// Delete the item.
    Zonk,
    /// Mark the item read.
    Ack,
    /// Mark the item unread.
    Deack,
    /// Save the item.
    Save,
    /// Remove the item from saved.
    Unsave,
    /// Mark the item as tagged.
    Tag,
    /// Remove the tag mark.
    Untag,
    /// Send a reaction.
    React,
    /// Reply to the item.
    Reply,
    /// Open the item's whole thread.
    ExpandThread,
}

impl ActionKind {
    /// Every kind, in markup order.
    pub const ALL: [ActionKind; 13] = [
        ActionKind::Bonk,
        ActionKind::Unbonk,
        ActionKind::Mute,
        ActionKind::Zonk,
        ActionKind::Ack,
        ActionKind::Deack,
        ActionKind::Save,
        ActionKind::Unsave,
        ActionKind::Tag,
        ActionKind::Untag,
        ActionKind::React,
        ActionKind::Reply,
        ActionKind::ExpandThread,
    ];

    /// Value of the `data-action` attribute.
    pub fn markup_name(self) -> &'static str {
        match self {
            ActionKind::Bonk => "bonk",
            ActionKind::Unbonk => "unbonk",
            ActionKind::Mute => "mute",
            ActionKind::Zonk => "zonk",
            ActionKind::Ack => "ack",
            ActionKind::Deack => "deack",
            ActionKind::Save => "save",
            ActionKind::Unsave => "unsave",
            ActionKind::Tag => "tag",
            ActionKind::Untag => "untag",
            ActionKind::React => "react",
            ActionKind::Reply => "reply",
            ActionKind::ExpandThread => "expand",
        }
    }

    /// The `wherefore` verb sent to the zonkit endpoint.
    ///
    /// `None` for kinds that do not go through zonkit.
    pub fn wherefore(self) -> Option<&'static str> {
        match self {
            ActionKind::Bonk | ActionKind::Reply | ActionKind::ExpandThread => None,
            ActionKind::Mute => Some("zonvoy"),
            other => Some(other.markup_name()),
        }
    }

    /// Label shown on the control once it has fired.
    pub fn spent_label(self) -> &'static str {
        match self {
            ActionKind::Bonk => "bonked",
            ActionKind::Unbonk => "unbonked",
            ActionKind::Mute => "muted",
            ActionKind::Zonk => "zonked",
            ActionKind::Ack => "acked",
            ActionKind::Deack => "deacked",
            ActionKind::Save => "saved",
            ActionKind::Unsave => "unsaved",
            ActionKind::Tag => "tagged",
            ActionKind::Untag => "untagged",
            ActionKind::React => "badonked",
            ActionKind::Reply => "reply",
            ActionKind::ExpandThread => "expand",
        }
    }

    /// Whether firing this control submits a write request.
    pub fn submits(self) -> bool {
        !matches!(self, ActionKind::Reply | ActionKind::ExpandThread)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.markup_name())
    }
}

impl FromStr for ActionKind {
    type Err = UnknownActionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.markup_name() == s)
            .ok_or_else(|| UnknownActionKind(s.to_string()))
    }
}

/// A `data-action` value outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown action kind: {0}")]
pub struct UnknownActionKind(pub String);

/// A fire-and-forget write request.
///
/// Posted url-encoded to `<server>/<endpoint>`; no response body is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSubmission {
    /// Path below the server root.
    pub endpoint: String,
    /// Form fields in send order.
    pub fields: Vec<(String, String)>,
}

impl ActionSubmission {
    /// Build the submission for an action kind against a target.
    ///
    /// Returns `None` for kinds that never submit.
    pub fn for_action(kind: ActionKind, target: &str, csrf: &str) -> Option<Self> {
        if kind == ActionKind::Bonk {
            return Some(Self {
                endpoint: "bonk".to_string(),
                fields: vec![
                    ("js".to_string(), "2".to_string()),
                    ("CSRF".to_string(), csrf.to_string()),
                    ("xid".to_string(), target.to_string()),
                ],
            });
        }
        let wherefore = kind.wherefore()?;
        Some(Self {
            endpoint: "zonkit".to_string(),
            fields: vec![
                ("CSRF".to_string(), csrf.to_string()),
                ("wherefore".to_string(), wherefore.to_string()),
                ("what".to_string(), target.to_string()),
            ],
        })
    }

    /// Value of the first field called `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// What the visible fragment loses when a control fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// Nothing is removed.
    None,
    /// Remove the single item.
    Item(ItemId),
    /// Remove every item of the conversation.
    Conversation(String),
}

/// Handler attached to a control or link by the bind step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a write request, relabel the control, optionally remove items.
    Submit {
        /// The write request.
        submission: ActionSubmission,
        /// Items dropped from the visible fragment.
        removal: Removal,
    },
    /// Switch the visible view.
    Navigate {
        /// Target view.
        key: ViewKey,
        /// URL recorded in history.
        url: Option<String>,
    },
    /// Open the reply composer.
    Compose {
        /// Item being replied to.
        reply_to: String,
        /// Handle to mention, if any.
        mention: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_names_round_trip() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.markup_name().parse::<ActionKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_markup_name_is_rejected() {
        assert!("frobnicate".parse::<ActionKind>().is_err());
    }

    #[test]
    fn mute_uses_zonvoy_wherefore() {
        assert_eq!(ActionKind::Mute.wherefore(), Some("zonvoy"));
    }

    #[test]
    fn spent_labels_follow_past_tense() {
        assert_eq!(ActionKind::Ack.spent_label(), "acked");
        assert_eq!(ActionKind::Untag.spent_label(), "untagged");
        assert_eq!(ActionKind::Tag.spent_label(), "tagged");
        assert_eq!(ActionKind::Save.spent_label(), "saved");
        assert_eq!(ActionKind::React.spent_label(), "badonked");
    }

    #[test]
    fn bonk_posts_to_bonk_endpoint_with_js_flag() {
        let sub = ActionSubmission::for_action(ActionKind::Bonk, "xid-1", "tok").unwrap();
        assert_eq!(sub.endpoint, "bonk");
        assert_eq!(sub.field("js"), Some("2"));
        assert_eq!(sub.field("CSRF"), Some("tok"));
        assert_eq!(sub.field("xid"), Some("xid-1"));
    }

    #[test]
    fn zonkit_actions_carry_wherefore_and_what() {
        let sub = ActionSubmission::for_action(ActionKind::Unsave, "xid-2", "tok").unwrap();
        assert_eq!(sub.endpoint, "zonkit");
        assert_eq!(sub.field("wherefore"), Some("unsave"));
        assert_eq!(sub.field("what"), Some("xid-2"));
    }

    #[test]
    fn reply_and_expand_never_submit() {
        assert!(ActionSubmission::for_action(ActionKind::Reply, "x", "t").is_none());
        assert!(ActionSubmission::for_action(ActionKind::ExpandThread, "x", "t").is_none());
        assert!(!ActionKind::Reply.submits());
        assert!(ActionKind::Zonk.submits());
    }
}
