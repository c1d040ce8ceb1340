//! Navigation engine (pure).
//!
//! All state transitions are pure functions testable without a terminal or
//! network.

pub mod action_handler;
pub mod cache;
pub mod engine;
pub mod history;
pub mod merger;
pub mod navigation_handler;
pub mod refresh_handler;

// Re-export for convenience
pub use cache::{FragmentCache, HighWaterMarks};
pub use engine::{handle_event, Effect, EngineState, Event, Phase, RefreshTrigger, Seed};
pub use history::{History, HistoryEntry, HistoryState};
