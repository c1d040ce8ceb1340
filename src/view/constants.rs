//! Layout dimension constants for TUI rendering.

/// Height of the header bar (view title, counters, server status).
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the footer bar (refresh trigger and status line).
pub const FOOTER_HEIGHT: u16 = 1;

/// Lines kept visible below the selected item's first line before the
/// body scrolls.
pub const ITEM_LOOKAHEAD: usize = 4;

/// Prefix of the selected item's first line.
pub const SELECTED_MARKER: &str = "> ";

/// Indent of every other item line.
pub const ITEM_INDENT: &str = "  ";

/// Event poll interval of the run loop.
pub const TICK_INTERVAL_MS: u64 = 100;
