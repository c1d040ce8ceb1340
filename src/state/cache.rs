//! Session-scoped stores keyed by view: detached fragments and high-water marks.
//!
//! Neither store evicts. Entries live for the session; feed history is
//! small in practice.

use crate::model::{Fragment, HighWaterMark, StatusNode, ViewKey};
use std::collections::HashMap;
use tracing::debug;

/// A fragment parked while its view is not visible.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedView {
    fragment: Fragment,
    status: StatusNode,
}

/// Detached fragments of previously visited views.
///
/// Entries are consumed on restore: a restored fragment becomes the visible
/// one and is no longer cached until the next navigation away from it.
#[derive(Debug, Default)]
pub struct FragmentCache {
    entries: HashMap<ViewKey, CachedView>,
}

impl FragmentCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detach and store a fragment with its status node.
    ///
    /// Overwrites any prior entry for the key. Control bindings are dropped;
    /// the fragment must be re-bound when it is restored.
    pub fn stash(&mut self, key: ViewKey, mut fragment: Fragment, status: StatusNode) {
        fragment.unbind_all();
        debug!(view = %key, items = fragment.len(), "Stashing fragment");
        self.entries.insert(key, CachedView { fragment, status });
    }

    /// Remove and return the entry for a key.
    pub fn lookup(&mut self, key: &ViewKey) -> Option<(Fragment, StatusNode)> {
        self.entries
            .remove(key)
            .map(|cached| (cached.fragment, cached.status))
    }

    /// Whether an entry exists, without consuming it.
    pub fn contains(&self, key: &ViewKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Borrow a parked fragment without consuming it.
    pub fn peek(&self, key: &ViewKey) -> Option<&Fragment> {
        self.entries.get(key).map(|cached| &cached.fragment)
    }

    /// Number of stashed views.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stashed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Newest-item marks, one per view.
#[derive(Debug, Default)]
pub struct HighWaterMarks {
    marks: HashMap<ViewKey, HighWaterMark>,
}

impl HighWaterMarks {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored mark for `key`.
    pub fn get(&self, key: &ViewKey) -> Option<&HighWaterMark> {
        self.marks.get(key)
    }

    /// Record the mark returned by a successful fetch.
    ///
    /// Unset marks are ignored, as is a numeric mark below a numeric stored
    /// one. Returns whether the stored mark changed.
    pub fn record(&mut self, key: &ViewKey, mark: HighWaterMark) -> bool {
        let accepted = match self.marks.get(key) {
            Some(existing) => mark.supersedes(existing),
            None => !mark.is_unset(),
        };
        if accepted {
            self.marks.insert(key.clone(), mark);
        } else {
            debug!(view = %key, new = %mark, "Keeping stored mark");
        }
        accepted
    }

    /// Number of views with a mark.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether no view has a mark.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
