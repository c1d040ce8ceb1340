//! Refresh trigger widget for the footer.
//!
//! Shows `refresh` while a refresh can be requested and `refreshing`
//! (dimmed, disabled) while one is in flight.

use crate::state::RefreshTrigger;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Footer widget mirroring the engine's refresh trigger.
///
/// Pure and stateless: the label comes from the trigger, the style from
/// whether the trigger is enabled.
#[derive(Debug, Clone)]
pub struct RefreshIndicator<'a> {
    trigger: &'a RefreshTrigger,
}

impl<'a> RefreshIndicator<'a> {
    /// Indicator for `trigger`.
    pub fn new(trigger: &'a RefreshTrigger) -> Self {
        Self { trigger }
    }

    /// The trigger's label text.
    pub fn label(&self) -> &'static str {
        match self.trigger {
            RefreshTrigger::Ready => crate::state::engine::REFRESH_READY_LABEL,
            RefreshTrigger::InFlight { .. } => crate::state::engine::REFRESH_BUSY_LABEL,
        }
    }

    /// Render the indicator as a ratatui Span.
    ///
    /// - `Ready` → green label
    /// - `InFlight` → dark gray, dimmed label
    pub fn render(&self) -> Span<'static> {
        let style = match self.trigger {
            RefreshTrigger::Ready => Style::default().fg(Color::Green),
            RefreshTrigger::InFlight { .. } => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        };
        Span::styled(self.label(), style)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "refresh_indicator_tests.rs"]
mod tests;
