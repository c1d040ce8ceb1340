//! Tests for screen layout rendering.

use super::*;
use crate::model::{
    ActionKind, Control, Counters, HighWaterMark, ItemId, StatusNode, ViewPayload,
};
use crate::state::{handle_event, Effect, Event, Seed};
use crate::view::styles::ColorConfig;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

// ===== Test Helpers =====

fn item(id: &str) -> Item {
    Item::new(ItemId::new(id).unwrap())
}

fn engine_with(items: Vec<Item>) -> EngineState {
    EngineState::new(
        Seed::new(ViewKey::home(), "tok")
            .with_high_water(HighWaterMark::new("10"))
            .with_items(items),
    )
}

fn refresh_with(engine: &mut EngineState, items: Vec<Item>, counters: Counters) {
    let effects = handle_event(engine, Event::RefreshRequested);
    let request = match effects.as_slice() {
        [Effect::FetchView { request, .. }] => *request,
        other => panic!("expected one fetch, got {:?}", other),
    };
    handle_event(
        engine,
        Event::FetchCompleted {
            request,
            result: Ok(ViewPayload {
                items,
                status: StatusNode::default(),
                high_water: HighWaterMark::new("12"),
                counters,
            }),
        },
    );
}

fn buffer_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

fn mono() -> FeedStyles {
    FeedStyles::with_color_config(ColorConfig::from_env_and_args(true))
}

// ===== Titles =====

#[test]
fn view_title_includes_argument_when_present() {
    assert_eq!(view_title(&ViewKey::home()), "home");
    assert_eq!(view_title(&ViewKey::conversation("cv1")), "convoy: cv1");
    assert_eq!(view_title(&ViewKey::of(ViewKind::AtMentions)), "@me");
}

// ===== Header =====

#[test]
fn header_shows_title_with_empty_counters() {
    let engine = engine_with(vec![item("0")]);
    insta::assert_snapshot!(header_text(&engine), @"home  @me  chat");
}

#[test]
fn header_shows_counters_after_refresh() {
    let mut engine = engine_with(vec![item("0")]);
    refresh_with(
        &mut engine,
        vec![item("1")],
        Counters {
            mentions: 3,
            chats: 1,
        },
    );
    insta::assert_snapshot!(header_text(&engine), @"home  @me(3)  chat(1)");
}

#[test]
fn header_appends_server_status() {
    let engine = EngineState::new(
        Seed::new(ViewKey::of(ViewKind::Saved), "tok")
            .with_status(StatusNode::new("<p>saved honks</p>", "saved honks"))
            .with_items(vec![]),
    );
    insta::assert_snapshot!(header_text(&engine), @"saved  @me  chat  | saved honks");
}

// ===== Footer =====

#[test]
fn footer_tail_reports_new_item_count() {
    let mut engine = engine_with(vec![item("0")]);
    refresh_with(&mut engine, vec![item("1"), item("2")], Counters::default());
    insta::assert_snapshot!(footer_tail(&engine, None), @" 2 new");
}

#[test]
fn footer_tail_appends_notice() {
    let engine = engine_with(vec![]);
    assert_eq!(footer_tail(&engine, Some("at start")), "  at start");
}

// ===== Helpers =====

#[test]
fn truncate_respects_wide_characters() {
    assert_eq!(truncate_to_width("héllo", 3), "hél");
    assert_eq!(truncate_to_width("日本語", 5), "日本", "wide chars take two columns");
    assert_eq!(truncate_to_width("abc", 10), "abc");
}

#[test]
fn scroll_offset_stays_at_top_while_selection_fits() {
    assert_eq!(scroll_offset(None, 20), 0);
    assert_eq!(scroll_offset(Some(3), 20), 0);
}

#[test]
fn scroll_offset_moves_when_selection_nears_bottom() {
    let offset = scroll_offset(Some(30), 12);
    assert!(offset > 0, "selection below the fold should scroll");
    assert!(offset <= 30, "selected line must stay visible");
}

// ===== Body =====

#[test]
fn body_marks_selected_item_and_focused_control() {
    let engine = engine_with(vec![
        item("a").with_text("first post"),
        item("b")
            .with_text("second post")
            .with_control(Control::new(ActionKind::Bonk, "b", "bonk")),
    ]);
    let mut cursor = Cursor::default();
    cursor.select(ItemId::new("b").unwrap());

    let (lines, start) = body_lines(&engine, Some(&cursor), &mono(), 80);
    let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();

    assert_eq!(start, Some(3), "item a takes title, text and a blank line");
    assert_eq!(text[3], "> b");
    assert_eq!(text[4], "  second post");
    assert_eq!(text[5], "  [bonk] ");
}

#[test]
fn body_reports_empty_loaded_view() {
    let engine = engine_with(vec![]);
    let (lines, _) = body_lines(&engine, None, &mono(), 80);
    assert_eq!(lines[0].to_string(), "  nothing here");
}

#[test]
fn body_shows_loading_while_fetching() {
    let mut engine = engine_with(vec![item("a")]);
    handle_event(
        &mut engine,
        Event::Navigate {
            key: ViewKey::of(ViewKind::First),
            url: None,
            anchor: None,
        },
    );
    let (lines, start) = body_lines(&engine, None, &mono(), 80);
    assert_eq!(lines[0].to_string(), "  loading first");
    assert_eq!(start, None);
}

// ===== Full frame =====

#[test]
fn render_layout_draws_header_items_and_footer() {
    let backend = TestBackend::new(40, 8);
    let mut terminal = Terminal::new(backend).unwrap();
    let engine = engine_with(vec![item("a").with_text("hello")]);
    let styles = mono();

    terminal
        .draw(|frame| {
            render_layout(
                frame,
                &Screen {
                    engine: &engine,
                    cursor: None,
                    notice: None,
                    styles: &styles,
                },
            )
        })
        .unwrap();

    let lines = buffer_lines(&terminal);
    assert_eq!(lines[0], "home  @me  chat");
    assert_eq!(lines[1], "  a");
    assert_eq!(lines[2], "  hello");
    assert_eq!(lines[7], "[refresh]", "footer shows the ready trigger");
}

#[test]
fn render_layout_footer_shows_refreshing_while_in_flight() {
    let backend = TestBackend::new(40, 6);
    let mut terminal = Terminal::new(backend).unwrap();
    let mut engine = engine_with(vec![item("a")]);
    handle_event(&mut engine, Event::RefreshRequested);
    let styles = mono();

    terminal
        .draw(|frame| {
            render_layout(
                frame,
                &Screen {
                    engine: &engine,
                    cursor: None,
                    notice: None,
                    styles: &styles,
                },
            )
        })
        .unwrap();

    assert_eq!(buffer_lines(&terminal)[5], "[refreshing]");
}
