//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod action;
pub mod error;
pub mod fragment;
pub mod identifiers;
pub mod key_action;
pub mod payload;
pub mod view_key;

// Re-export for convenience
pub use action::{ActionKind, ActionSubmission, Command, Removal, UnknownActionKind};
pub use error::{AppError, TransportError};
pub use fragment::{Control, Counters, Fragment, Item, NavLink, StatusNode};
pub use identifiers::{InvalidItemId, ItemId, RequestId};
pub use key_action::KeyAction;
pub use payload::ViewPayload;
pub use view_key::{HighWaterMark, UnknownViewKind, ViewKey, ViewKind};
