//! Feed styling configuration.
//!
//! Distinct styles for glowing (newly refreshed) items, the selection,
//! controls and navigation links.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== FeedStyles =====

/// Styles used when drawing a view.
///
/// Without colors, glow and focus fall back to text modifiers so they stay
/// visible on monochrome terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedStyles {
    /// Newly merged items.
    pub glow: Style,
    /// Selected item marker.
    pub selected: Style,
    /// Live controls.
    pub control: Style,
    /// Focused control of the selected item.
    pub control_focused: Style,
    /// Controls that have fired.
    pub control_spent: Style,
    /// View-switching links.
    pub link: Style,
    /// Header line.
    pub header: Style,
    /// Footer status text.
    pub status_line: Style,
}

impl FeedStyles {
    /// Styles honoring `NO_COLOR`.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Create styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                glow: Style::default().fg(Color::Yellow),
                selected: Style::default().add_modifier(Modifier::BOLD),
                control: Style::default().fg(Color::Cyan),
                control_focused: Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                control_spent: Style::default().fg(Color::DarkGray),
                link: Style::default().fg(Color::Blue),
                header: Style::default().fg(Color::Cyan),
                status_line: Style::default().fg(Color::Gray),
            }
        } else {
            Self {
                glow: Style::default().add_modifier(Modifier::BOLD),
                selected: Style::default().add_modifier(Modifier::BOLD),
                control: Style::default(),
                control_focused: Style::default().add_modifier(Modifier::REVERSED),
                control_spent: Style::default().add_modifier(Modifier::DIM),
                link: Style::default().add_modifier(Modifier::UNDERLINED),
                header: Style::default(),
                status_line: Style::default(),
            }
        }
    }
}

impl Default for FeedStyles {
    fn default() -> Self {
        Self::new()
    }
}
