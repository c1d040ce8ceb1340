//! Domain-level keyboard actions independent of key bindings.

use crate::model::ViewKind;

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Menu navigation
    /// Switch to an argument-less view. Default: 1-5
    OpenView(ViewKind),

    // Refresh
    /// Pull new items into the visible view. Default: r
    Refresh,
    /// Scroll to the oldest newly arrived item. Default: s
    JumpToOldestNew,

    // Item selection
    /// Select next item. Default: j/↓
    NextItem,
    /// Select previous item. Default: k/↑
    PrevItem,
    /// Jump to first item. Default: g/Home
    ScrollToTop,
    /// Cycle focus between the selected item's controls. Default: Tab
    NextControl,
    /// Fire the focused control. Default: Enter
    ActivateControl,

    // Links inside the selected item
    /// Open the item's conversation. Default: c
    OpenConversation,
    /// Open the item's author. Default: o
    OpenAuthor,
    /// Open the first combo link of the item. Default: t
    OpenCombo,

    // History
    /// Go back one history entry. Default: Backspace/Alt+←
    Back,
    /// Go forward one history entry. Default: Alt+→
    Forward,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_view_carries_kind() {
        let action = KeyAction::OpenView(ViewKind::Saved);
        match action {
            KeyAction::OpenView(kind) => assert_eq!(kind, ViewKind::Saved),
            _ => panic!("OpenView should match OpenView variant"),
        }
    }

    #[test]
    fn open_view_variants_differ_by_kind() {
        assert_ne!(
            KeyAction::OpenView(ViewKind::Home),
            KeyAction::OpenView(ViewKind::First)
        );
    }

    #[test]
    fn key_action_is_copy() {
        let action = KeyAction::Refresh;
        let copied = action;
        assert_eq!(action, copied);
    }
}
