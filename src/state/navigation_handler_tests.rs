//! Tests for view switching.
//!
//! Tests verify the navigation state machine:
//! - Navigating to the visible view is a no-op
//! - Leaving a loaded view stashes it; returning restores it
//! - Cache misses load into a placeholder
//! - Stale completions never touch the visible fragment
//! - Failed loads settle in Idle with an empty placeholder

use super::*;
use crate::model::{
    ActionKind, Control, Counters, HighWaterMark, Item, NavLink, RequestId, StatusNode, ViewKey,
    ViewKind,
};
use crate::state::engine::{handle_event, Event, Seed};
use crate::state::history::HistoryEntry;

// ===== Test Helpers =====

fn item(id: &str) -> Item {
    Item::new(ItemId::new(id).expect("valid item id"))
}

fn payload(mark: &str, ids: &[&str]) -> ViewPayload {
    ViewPayload {
        items: ids.iter().map(|id| item(id)).collect(),
        status: StatusNode::new("<p>hi</p>", "hi"),
        high_water: HighWaterMark::new(mark),
        counters: Counters {
            mentions: 1,
            chats: 0,
        },
    }
}

fn home_state(ids: &[&str]) -> EngineState {
    EngineState::new(
        Seed::new(ViewKey::home(), "tok").with_items(ids.iter().map(|id| item(id)).collect()),
    )
}

fn go(state: &mut EngineState, key: ViewKey) -> Vec<Effect> {
    handle_event(
        state,
        Event::Navigate {
            key,
            url: None,
            anchor: None,
        },
    )
}

fn fetched_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::FetchView { request, .. } => Some(*request),
            _ => None,
        })
        .expect("a fetch was issued")
}

fn complete(
    state: &mut EngineState,
    request: RequestId,
    result: Result<ViewPayload, TransportError>,
) -> Vec<Effect> {
    handle_event(state, Event::FetchCompleted { request, result })
}

fn ids(state: &EngineState) -> Vec<&str> {
    state
        .fragment()
        .items()
        .iter()
        .map(|i| i.id.as_str())
        .collect()
}

// ===== No-op navigation =====

#[test]
fn navigate_to_current_view_is_noop() {
    let mut state = home_state(&["1", "2"]);

    let effects = go(&mut state, ViewKey::home());

    assert!(effects.is_empty(), "no fetch, no history push");
    assert_eq!(ids(&state), vec!["1", "2"]);
    assert!(state.cache().is_empty(), "no fragment churn");
}

#[test]
fn navigate_to_loading_target_is_noop() {
    let mut state = home_state(&["1"]);
    go(&mut state, ViewKey::of(ViewKind::Saved));

    let effects = go(&mut state, ViewKey::of(ViewKind::Saved));

    assert!(effects.is_empty());
}

#[test]
fn history_pop_within_visible_view_scrolls_to_anchor() {
    let convoy = ViewKey::conversation("cv");
    let mut state = EngineState::new(
        Seed::new(convoy.clone(), "tok").with_items(vec![item("1"), item("2")]),
    );

    let effects = handle_event(
        &mut state,
        Event::HistoryPop(HistoryEntry::new(convoy.clone(), "/t/cv#2")),
    );

    assert_eq!(
        effects,
        vec![Effect::ScrollToItem(ItemId::new("2").expect("valid item id"))]
    );
    assert_eq!(state.visible_key(), &convoy);
    assert_eq!(ids(&state), vec!["1", "2"], "fragment untouched");
}

#[test]
fn anchor_for_loading_target_replaces_pending_anchor() {
    let mut state = home_state(&["1"]);
    let saved = ViewKey::of(ViewKind::Saved);
    let request = fetched_request(&go(&mut state, saved.clone()));

    let effects = handle_event(
        &mut state,
        Event::Navigate {
            key: saved,
            url: None,
            anchor: Some(ItemId::new("s2").expect("valid item id")),
        },
    );
    assert!(effects.is_empty(), "no second fetch");

    let effects = complete(&mut state, request, Ok(payload("4", &["s1", "s2"])));
    assert_eq!(
        effects,
        vec![Effect::ScrollToItem(ItemId::new("s2").expect("valid item id"))]
    );
}

// ===== Cache miss =====

#[test]
fn navigate_on_miss_stashes_and_loads_placeholder() {
    let mut state = home_state(&["1"]);

    let effects = go(&mut state, ViewKey::of(ViewKind::AtMentions));

    assert!(state.cache().contains(&ViewKey::home()));
    assert!(state.fragment().is_empty());
    assert!(!state.fragment().is_loaded());
    assert!(matches!(state.phase(), Phase::Loading { target, .. } if target.kind == ViewKind::AtMentions));
    match &effects[..] {
        [Effect::FetchView { args, .. }, Effect::PushHistory(entry), Effect::ScrollToTop] => {
            assert_eq!(args["page"], "atme");
            assert!(!args.contains_key("tophid"));
            assert_eq!(entry.url, "/atme");
            assert_eq!(entry.state().name, "atme");
        }
        other => panic!("Unexpected effects: {:?}", other),
    }
}

#[test]
fn load_success_populates_placeholder_and_records_mark() {
    let mut state = home_state(&["1"]);
    let request = fetched_request(&go(&mut state, ViewKey::conversation("cv")));

    let effects = complete(&mut state, request, Ok(payload("9", &["9", "8", "7"])));

    assert!(effects.is_empty());
    assert_eq!(ids(&state), vec!["7", "8", "9"], "conversation reads oldest-first");
    assert_eq!(
        state.high_water(&ViewKey::conversation("cv")),
        Some(&HighWaterMark::new("9"))
    );
    assert_eq!(state.status().text, "hi");
    assert_eq!(state.counters().mecount_label(), "(1)");
    assert_eq!(
        state.phase(),
        &Phase::Idle {
            current: ViewKey::conversation("cv")
        }
    );
    assert_eq!(state.fragment().last_highlighted(), None, "loads do not glow");
}

#[test]
fn load_with_empty_payload_still_updates_counters_and_status() {
    let mut state = home_state(&["1"]);
    let request = fetched_request(&go(&mut state, ViewKey::of(ViewKind::LongAgo)));

    complete(&mut state, request, Ok(payload("0", &[])));

    assert!(state.fragment().is_empty());
    assert!(state.fragment().is_loaded());
    assert_eq!(state.counters().mentions, 1);
    assert_eq!(state.status().text, "hi");
}

// ===== Failure =====

#[test]
fn timeout_settles_idle_with_empty_placeholder() {
    let mut state = home_state(&["1"]);
    let request = fetched_request(&go(&mut state, ViewKey::of(ViewKind::Saved)));

    complete(&mut state, request, Err(TransportError::Timeout));

    assert_eq!(
        state.phase(),
        &Phase::Idle {
            current: ViewKey::of(ViewKind::Saved)
        }
    );
    assert!(state.fragment().is_empty());
    assert_eq!(state.status_line(), " timed out");
}

#[test]
fn http_error_is_reported_with_status() {
    let mut state = home_state(&["1"]);
    let request = fetched_request(&go(&mut state, ViewKey::of(ViewKind::Saved)));

    complete(&mut state, request, Err(TransportError::Http { status: 503 }));

    assert_eq!(state.status_line(), " status: 503");
}

#[test]
fn failed_placeholder_is_discarded_and_refetched() {
    let mut state = home_state(&["1"]);
    let request = fetched_request(&go(&mut state, ViewKey::of(ViewKind::Saved)));
    complete(&mut state, request, Err(TransportError::Timeout));

    go(&mut state, ViewKey::home());
    assert!(!state.cache().contains(&ViewKey::of(ViewKind::Saved)));

    let effects = go(&mut state, ViewKey::of(ViewKind::Saved));
    assert!(
        effects.iter().any(|e| matches!(e, Effect::FetchView { .. })),
        "returning to a failed view fetches again"
    );
}

// ===== Restore =====

#[test]
fn returning_to_visited_view_restores_it() {
    let mut state = home_state(&["1", "2"]);
    let request = fetched_request(&go(&mut state, ViewKey::of(ViewKind::First)));
    complete(&mut state, request, Ok(payload("5", &["5"])));

    let effects = go(&mut state, ViewKey::home());

    assert_eq!(ids(&state), vec!["1", "2"]);
    assert!(!effects.iter().any(|e| matches!(e, Effect::FetchView { .. })));
    assert!(effects.iter().any(|e| matches!(e, Effect::PushHistory(_))));
    assert!(!state.cache().contains(&ViewKey::home()), "restore consumes");
    assert!(state.cache().contains(&ViewKey::of(ViewKind::First)));
}

#[test]
fn restored_fragment_is_rebound() {
    let seeded = item("1").with_control(Control::new(ActionKind::Bonk, "1", "bonk"));
    let mut state = EngineState::new(Seed::new(ViewKey::home(), "tok").with_items(vec![seeded]));
    handle_event(&mut state, Event::Boot);
    let request = fetched_request(&go(&mut state, ViewKey::of(ViewKind::First)));
    complete(&mut state, request, Ok(payload("5", &[])));

    go(&mut state, ViewKey::home());

    assert!(state.fragment().is_fully_bound());
}

#[test]
fn leaving_view_clears_highlight() {
    let mut state = home_state(&["1"]);
    let request = fetched_request(&handle_event(&mut state, Event::RefreshRequested));
    complete(&mut state, request, Ok(payload("2", &["2"])));
    assert!(state.fragment().last_highlighted().is_some());

    go(&mut state, ViewKey::of(ViewKind::Saved));

    assert_eq!(
        state.cache().peek(&ViewKey::home()).and_then(|f| f.last_highlighted()),
        None
    );
}

// ===== Stale race =====

#[test]
fn stale_load_never_alters_new_view() {
    let mut state = home_state(&["1"]);
    let a = fetched_request(&go(&mut state, ViewKey::of(ViewKind::First)));
    let b = fetched_request(&go(&mut state, ViewKey::of(ViewKind::Saved)));
    complete(&mut state, b, Ok(payload("30", &["30"])));
    let before = state.fragment().clone();

    let effects = complete(&mut state, a, Ok(payload("20", &["20", "19"])));

    assert!(effects.is_empty());
    assert_eq!(state.fragment(), &before);
    assert_eq!(state.visible_key(), &ViewKey::of(ViewKind::Saved));
    assert_eq!(state.high_water(&ViewKey::of(ViewKind::First)), None);
}

#[test]
fn stale_load_while_second_is_pending_is_dropped() {
    let mut state = home_state(&["1"]);
    let a = fetched_request(&go(&mut state, ViewKey::of(ViewKind::First)));
    go(&mut state, ViewKey::of(ViewKind::Saved));

    complete(&mut state, a, Ok(payload("20", &["20"])));

    assert!(state.phase().is_loading(), "still waiting for the second load");
    assert!(state.fragment().is_empty());
}

#[test]
fn navigation_abandons_in_flight_refresh() {
    let mut state = home_state(&["1"]);
    let refresh = fetched_request(&handle_event(&mut state, Event::RefreshRequested));
    assert!(!state.is_refresh_ready());

    let load = fetched_request(&go(&mut state, ViewKey::of(ViewKind::First)));
    assert!(state.is_refresh_ready());
    complete(&mut state, load, Ok(payload("4", &["4"])));

    complete(&mut state, refresh, Ok(payload("99", &["99"])));

    assert_eq!(ids(&state), vec!["4"]);
    assert_eq!(state.high_water(&ViewKey::home()), None);
}

// ===== History =====

#[test]
fn history_pop_does_not_push() {
    let mut state = home_state(&["1"]);
    let request = fetched_request(&go(&mut state, ViewKey::of(ViewKind::First)));
    complete(&mut state, request, Ok(payload("5", &["5"])));

    let effects = handle_event(
        &mut state,
        Event::HistoryPop(HistoryEntry::for_key(ViewKey::home())),
    );

    assert!(effects.is_empty(), "restore from history has no effects");
    assert_eq!(ids(&state), vec!["1"]);
}

#[test]
fn link_url_and_anchor_are_used() {
    let mut state = home_state(&["1"]);
    let request = fetched_request(&go(&mut state, ViewKey::conversation("cv")));
    complete(&mut state, request, Ok(payload("3", &["3", "2"])));
    go(&mut state, ViewKey::home());

    let effects = handle_event(
        &mut state,
        Event::Navigate {
            key: ViewKey::conversation("cv"),
            url: Some("/t?c=cv#2".to_string()),
            anchor: None,
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::PushHistory(HistoryEntry::new(ViewKey::conversation("cv"), "/t?c=cv#2")),
            Effect::ScrollToItem(ItemId::new("2").unwrap()),
        ]
    );
}

#[test]
fn anchor_waits_for_load_completion() {
    let mut state = home_state(&["1"]);
    let effects = handle_event(
        &mut state,
        Event::HistoryPop(HistoryEntry::new(ViewKey::conversation("cv"), "/t?c=cv#8")),
    );
    assert!(!effects.iter().any(|e| matches!(e, Effect::ScrollToItem(_))));

    let request = fetched_request(&effects);
    let effects = complete(&mut state, request, Ok(payload("8", &["8"])));

    assert_eq!(effects, vec![Effect::ScrollToItem(ItemId::new("8").unwrap())]);
}

#[test]
fn followed_link_navigates_with_its_url() {
    let linked = item("1").with_link(NavLink::new(
        ViewKey::new(ViewKind::Combo, "pets"),
        "pets",
        Some("/c/pets".to_string()),
    ));
    let mut state = EngineState::new(Seed::new(ViewKey::home(), "tok").with_items(vec![linked]));
    handle_event(&mut state, Event::Boot);

    let effects = handle_event(
        &mut state,
        Event::FollowLink {
            item: ItemId::new("1").unwrap(),
            link: 0,
        },
    );

    assert_eq!(state.visible_key(), &ViewKey::new(ViewKind::Combo, "pets"));
    assert!(effects.contains(&Effect::PushHistory(HistoryEntry::new(
        ViewKey::new(ViewKind::Combo, "pets"),
        "/c/pets"
    ))));
}
