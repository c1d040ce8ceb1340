//! Session history: a back/forward stack of visited views.
//!
//! The terminal has no browser history, so the shell keeps its own. The
//! engine only produces entries (via `Effect::PushHistory`) and consumes
//! them (via `Event::HistoryPop`); it never inspects the stack.

use crate::model::{ItemId, ViewKey};
use serde::{Deserialize, Serialize};

/// One history entry: the view and the URL that led to it.
///
/// The URL may carry a `#anchor` naming an item to scroll to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The view.
    pub key: ViewKey,
    /// Display URL, possibly with a `#anchor`.
    pub url: String,
}

impl HistoryEntry {
    /// Entry for `key` reached through `url`.
    pub fn new(key: ViewKey, url: impl Into<String>) -> Self {
        Self {
            key,
            url: url.into(),
        }
    }

    /// Entry for a view using its default URL.
    pub fn for_key(key: ViewKey) -> Self {
        let url = key.default_url();
        Self { key, url }
    }

    /// Item named by the URL's `#fragment`, if any.
    pub fn anchor(&self) -> Option<ItemId> {
        self.url
            .split_once('#')
            .and_then(|(_, anchor)| ItemId::new(anchor).ok())
    }

    /// The state object stored with the entry: `{name, arg}`.
    pub fn state(&self) -> HistoryState {
        HistoryState {
            name: self.key.kind.wire_name().to_string(),
            arg: self.key.arg.clone(),
        }
    }
}

/// Serialized form of an entry's view, as `{"name": ..., "arg": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Wire name of the view kind.
    pub name: String,
    /// View argument.
    pub arg: String,
}

/// Linear history with a cursor.
///
/// Pushing while the cursor is behind the newest entry discards the
/// forward entries.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    /// Start a history whose first entry describes the initial view.
    pub fn new(initial: HistoryEntry) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Entry under the cursor.
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    /// Replace the current entry in place.
    pub fn replace(&mut self, entry: HistoryEntry) {
        self.entries[self.cursor] = entry;
    }

    /// Push a new entry after the cursor and move onto it.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    /// Step back. Returns the entry to pop to.
    pub fn back(&mut self) -> Option<HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward. Returns the entry to pop to.
    pub fn forward(&mut self) -> Option<HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Whether `back` would move.
    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    /// Whether `forward` would move.
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history starts with one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
