//! Per-view item and control selection.
//!
//! Selection tracks an `ItemId`, not an index, so it survives items being
//! prepended by a refresh.

use crate::model::{Fragment, Item, ItemId, ViewKey};
use std::collections::HashMap;

/// Selected item and focused control within it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    item: Option<ItemId>,
    control: usize,
}

impl Cursor {
    /// Id of the selected item.
    pub fn item(&self) -> Option<&ItemId> {
        self.item.as_ref()
    }

    /// Index of the focused control inside the selected item.
    pub fn control(&self) -> usize {
        self.control
    }

    /// The selected item, if it is still part of `fragment`.
    pub fn selected<'a>(&self, fragment: &'a Fragment) -> Option<&'a Item> {
        self.item.as_ref().and_then(|id| fragment.get(id))
    }

    /// Select a specific item; resets control focus.
    pub fn select(&mut self, id: ItemId) {
        if self.item.as_ref() != Some(&id) {
            self.control = 0;
        }
        self.item = Some(id);
    }

    /// Select the first item, or nothing if the fragment is empty.
    pub fn select_first(&mut self, fragment: &Fragment) {
        self.control = 0;
        self.item = fragment.items().first().map(|item| item.id.clone());
    }

    /// Move to the next item, wrapping from last to first.
    pub fn next_item(&mut self, fragment: &Fragment) {
        let len = fragment.len();
        if len == 0 {
            return;
        }
        let next = match self.position(fragment) {
            Some(idx) => (idx + 1) % len,
            None => 0,
        };
        self.select_index(fragment, next);
    }

    /// Move to the previous item, wrapping from first to last.
    pub fn prev_item(&mut self, fragment: &Fragment) {
        let len = fragment.len();
        if len == 0 {
            return;
        }
        let prev = match self.position(fragment) {
            Some(idx) if idx > 0 => idx - 1,
            Some(_) => len - 1,
            None => len - 1,
        };
        self.select_index(fragment, prev);
    }

    /// Focus the next control of the selected item, wrapping.
    pub fn next_control(&mut self, fragment: &Fragment) {
        let count = self
            .selected(fragment)
            .map(|item| item.controls.len())
            .unwrap_or(0);
        self.control = if count == 0 {
            0
        } else {
            (self.control + 1) % count
        };
    }

    fn position(&self, fragment: &Fragment) -> Option<usize> {
        self.item.as_ref().and_then(|id| fragment.index_of(id))
    }

    fn select_index(&mut self, fragment: &Fragment, index: usize) {
        if let Some(item) = fragment.items().get(index) {
            self.select(item.id.clone());
        }
    }
}

/// One cursor per view, kept across navigation so returning to a cached
/// view restores the selection.
#[derive(Debug, Clone, Default)]
pub struct Selections {
    cursors: HashMap<ViewKey, Cursor>,
}

impl Selections {
    /// No selections yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor of a view, if one was created.
    pub fn get(&self, key: &ViewKey) -> Option<&Cursor> {
        self.cursors.get(key)
    }

    /// Cursor of a view, created on first use.
    pub fn cursor_mut(&mut self, key: &ViewKey) -> &mut Cursor {
        self.cursors.entry(key.clone()).or_default()
    }
}
