//! Core identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time.

use std::fmt;

/// Identity of one rendered item (post) inside a fragment.
///
/// Taken from the `id` (or `data-xid`) attribute of the item's article
/// element. Two items with the same id are the same post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Smart constructor: validates non-empty, non-blank id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidItemId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidItemId::Empty);
        }
        Ok(Self(raw))
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tag attached to every fetch the engine issues.
///
/// Issued from a monotonically increasing counter; a completion carrying
/// an id the engine is no longer waiting for is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Id of the first fetch.
    pub const FIRST: RequestId = RequestId(1);

    /// Wrap a raw counter value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The id issued after this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// The raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ===== Error Types =====

/// Rejected item id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidItemId {
    /// Empty or whitespace-only.
    #[error("Item ID cannot be empty")]
    Empty,
}

// ===== Tests =====
