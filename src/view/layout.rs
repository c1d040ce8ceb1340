//! Screen layout: header, item list, footer.
//!
//! Text composition is kept in plain functions so it can be asserted
//! without a terminal.

use crate::model::{Fragment, Item, ViewKey, ViewKind};
use crate::state::EngineState;
use crate::view::constants::{
    FOOTER_HEIGHT, HEADER_HEIGHT, ITEM_INDENT, ITEM_LOOKAHEAD, SELECTED_MARKER,
};
use crate::view::refresh_indicator::RefreshIndicator;
use crate::view::selection::Cursor;
use crate::view::styles::FeedStyles;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Everything one frame needs.
pub struct Screen<'a> {
    /// Engine state to draw.
    pub engine: &'a EngineState,
    /// Selection in the visible view.
    pub cursor: Option<&'a Cursor>,
    /// Transient shell message (composer requests, history bounds).
    pub notice: Option<&'a str>,
    /// Styles to draw with.
    pub styles: &'a FeedStyles,
}

/// Human title of a view.
pub fn view_title(key: &ViewKey) -> String {
    let name = match key.kind {
        ViewKind::Home => "home",
        ViewKind::AtMentions => "@me",
        ViewKind::First => "first",
        ViewKind::Saved => "saved",
        ViewKind::LongAgo => "long ago",
        ViewKind::Conversation => "convoy",
        ViewKind::Combo => "combo",
        ViewKind::Honker => "honker",
        ViewKind::User => "user",
    };
    if key.arg.is_empty() {
        name.to_string()
    } else {
        format!("{}: {}", name, key.arg)
    }
}

/// Header text: title, mention and chat counters, server status.
pub fn header_text(engine: &EngineState) -> String {
    let counters = engine.counters();
    let mut text = format!(
        "{}  @me{}  chat{}",
        view_title(engine.visible_key()),
        counters.mecount_label(),
        counters.chatcount_label()
    );
    let status = engine.status().text.trim();
    if !status.is_empty() {
        text.push_str("  | ");
        text.push_str(status);
    }
    text
}

/// Footer text after the refresh trigger.
pub fn footer_tail(engine: &EngineState, notice: Option<&str>) -> String {
    let mut text = engine.status_line().to_string();
    if let Some(notice) = notice {
        text.push_str("  ");
        text.push_str(notice);
    }
    text
}

/// Cut `text` to at most `width` display columns.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// First body line to show so the selected item stays on screen.
pub fn scroll_offset(selected_start: Option<usize>, height: usize) -> usize {
    match selected_start {
        Some(start) if start + ITEM_LOOKAHEAD >= height => start.saturating_sub(height / 3),
        _ => 0,
    }
}

fn item_lines(
    item: &Item,
    cursor: Option<&Cursor>,
    styles: &FeedStyles,
    width: usize,
) -> Vec<Line<'static>> {
    let selected = cursor.and_then(|c| c.item()) == Some(&item.id);
    let mut title_style = if item.is_highlighted() {
        styles.glow
    } else {
        ratatui::style::Style::default()
    };
    if selected {
        title_style = title_style.patch(styles.selected);
    }

    let marker = if selected { SELECTED_MARKER } else { ITEM_INDENT };
    let who = item.author.as_deref().unwrap_or(item.id.as_str());
    let mut lines = vec![Line::from(Span::styled(
        truncate_to_width(&format!("{}{}", marker, who), width),
        title_style,
    ))];

    if !item.text.is_empty() {
        let body = format!("{}{}", ITEM_INDENT, item.text);
        let style = if item.is_highlighted() {
            styles.glow
        } else {
            ratatui::style::Style::default()
        };
        lines.push(Line::from(Span::styled(truncate_to_width(&body, width), style)));
    }

    if !item.controls.is_empty() || !item.links.is_empty() {
        let mut spans = vec![Span::raw(ITEM_INDENT)];
        for (index, control) in item.controls.iter().enumerate() {
            let style = if control.disabled {
                styles.control_spent
            } else if selected && cursor.map(Cursor::control) == Some(index) {
                styles.control_focused
            } else {
                styles.control
            };
            spans.push(Span::styled(format!("[{}]", control.label), style));
            spans.push(Span::raw(" "));
        }
        for link in &item.links {
            spans.push(Span::styled(link.label.clone(), styles.link));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines
}

/// Body lines for a fragment and the line where the selected item starts.
pub fn body_lines(
    engine: &EngineState,
    cursor: Option<&Cursor>,
    styles: &FeedStyles,
    width: usize,
) -> (Vec<Line<'static>>, Option<usize>) {
    let fragment: &Fragment = engine.fragment();
    if engine.phase().is_loading() {
        return (
            vec![Line::from(format!(
                "{}loading {}",
                ITEM_INDENT,
                view_title(engine.visible_key())
            ))],
            None,
        );
    }
    if fragment.is_empty() {
        let text = if fragment.is_loaded() {
            "nothing here"
        } else {
            "not loaded"
        };
        return (vec![Line::from(format!("{}{}", ITEM_INDENT, text))], None);
    }

    let selected = cursor.and_then(Cursor::item);
    let mut lines = Vec::new();
    let mut selected_start = None;
    for item in fragment.items() {
        if selected == Some(&item.id) {
            selected_start = Some(lines.len());
        }
        lines.extend(item_lines(item, cursor, styles, width));
    }
    (lines, selected_start)
}

/// Render the whole screen.
pub fn render_layout(frame: &mut Frame, screen: &Screen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], screen);
    render_body(frame, chunks[1], screen);
    render_footer(frame, chunks[2], screen);
}

fn render_header(frame: &mut Frame, area: Rect, screen: &Screen) {
    let text = truncate_to_width(&header_text(screen.engine), area.width as usize);
    frame.render_widget(
        Paragraph::new(Line::from(text)).style(screen.styles.header),
        area,
    );
}

fn render_body(frame: &mut Frame, area: Rect, screen: &Screen) {
    let (lines, selected_start) = body_lines(
        screen.engine,
        screen.cursor,
        screen.styles,
        area.width as usize,
    );
    let offset = scroll_offset(selected_start, area.height as usize);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

fn render_footer(frame: &mut Frame, area: Rect, screen: &Screen) {
    let indicator = RefreshIndicator::new(screen.engine.refresh_trigger());
    let line = Line::from(vec![
        Span::raw("["),
        indicator.render(),
        Span::raw("]"),
        Span::styled(
            footer_tail(screen.engine, screen.notice),
            screen.styles.status_line,
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
