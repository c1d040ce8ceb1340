//! Decoded response of a fetch-view request.

use crate::model::{Counters, HighWaterMark, Item, StatusNode};

/// Successful fetch-view result.
///
/// `items` are in server order (newest first). Where they land in the
/// visible fragment is decided by the merger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPayload {
    /// Delivered items, newest first.
    pub items: Vec<Item>,
    /// Server message (`Srvmsg`).
    pub status: StatusNode,
    /// Newest delivered item (`Tophid`).
    pub high_water: HighWaterMark,
    /// Unread counters (`MeCount`, `ChatCount`).
    pub counters: Counters,
}

impl ViewPayload {
    /// Payload with no items, as returned when nothing is newer than the mark.
    pub fn empty(high_water: HighWaterMark) -> Self {
        Self {
            items: Vec::new(),
            status: StatusNode::default(),
            high_water,
            counters: Counters::default(),
        }
    }
}
