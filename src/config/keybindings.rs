//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::model::ViewKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings with option to override via configuration.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Shifted characters are matched with the shift modifier dropped, so
    /// terminals that report `'G'` with or without SHIFT behave alike.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let key = KeyEvent::new(key.code, key.modifiers);
        self.bindings.get(&key).copied().or_else(|| match key.code {
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::SHIFT) => self
                .bindings
                .get(&KeyEvent::new(key.code, key.modifiers.difference(KeyModifiers::SHIFT)))
                .copied(),
            _ => None,
        })
    }

    /// Bind (or rebind) a key.
    pub fn insert(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let plain = |c: char| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

        // Menu views
        bindings.insert(plain('1'), KeyAction::OpenView(ViewKind::Home));
        bindings.insert(plain('2'), KeyAction::OpenView(ViewKind::AtMentions));
        bindings.insert(plain('3'), KeyAction::OpenView(ViewKind::First));
        bindings.insert(plain('4'), KeyAction::OpenView(ViewKind::Saved));
        bindings.insert(plain('5'), KeyAction::OpenView(ViewKind::LongAgo));

        // Refresh
        bindings.insert(plain('r'), KeyAction::Refresh);
        bindings.insert(plain('s'), KeyAction::JumpToOldestNew);

        // Vim-style item selection
        bindings.insert(plain('j'), KeyAction::NextItem);
        bindings.insert(plain('k'), KeyAction::PrevItem);
        bindings.insert(plain('g'), KeyAction::ScrollToTop);
        bindings.insert(
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            KeyAction::NextItem,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            KeyAction::PrevItem,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Home, KeyModifiers::NONE),
            KeyAction::ScrollToTop,
        );

        // Controls
        bindings.insert(
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            KeyAction::NextControl,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            KeyAction::ActivateControl,
        );

        // Links
        bindings.insert(plain('c'), KeyAction::OpenConversation);
        bindings.insert(plain('o'), KeyAction::OpenAuthor);
        bindings.insert(plain('t'), KeyAction::OpenCombo);

        // History
        bindings.insert(
            KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            KeyAction::Back,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Left, KeyModifiers::ALT),
            KeyAction::Back,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Right, KeyModifiers::ALT),
            KeyAction::Forward,
        );

        // Application controls
        bindings.insert(plain('q'), KeyAction::Quit);
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );

        Self { bindings }
    }
}
