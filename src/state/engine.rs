//! Navigation-and-sync engine state machine (pure).
//!
//! The engine owns every piece of mutable navigation state. The shell feeds
//! it [`Event`]s and performs the [`Effect`]s it returns; the engine itself
//! never touches the network, the terminal, or the clock.
//!
//! # Staleness
//!
//! Every fetch is tagged with a fresh [`RequestId`]. A completion is applied
//! only if its id matches the pending navigation load or the in-flight
//! refresh. Anything else was superseded and is dropped.

use crate::model::{
    ActionSubmission, Counters, Fragment, HighWaterMark, Item, ItemId, RequestId, StatusNode,
    TransportError, ViewKey, ViewPayload,
};
use crate::state::action_handler;
use crate::state::cache::{FragmentCache, HighWaterMarks};
use crate::state::history::HistoryEntry;
use crate::state::merger;
use crate::state::navigation_handler;
use crate::state::refresh_handler;
use std::collections::BTreeMap;
use tracing::debug;

/// Label of the refresh trigger when a refresh may start.
pub const REFRESH_READY_LABEL: &str = "refresh";
/// Label of the refresh trigger while a refresh is in flight.
pub const REFRESH_BUSY_LABEL: &str = "refreshing";

/// Navigation phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// `current` is displayed and settled.
    Idle {
        /// The visible view.
        current: ViewKey,
    },
    /// A placeholder for `target` is displayed while `request` is pending.
    Loading {
        /// The view being loaded.
        target: ViewKey,
        /// The fetch whose completion settles the load.
        request: RequestId,
        /// Item to scroll to once the load completes.
        anchor: Option<ItemId>,
    },
}

impl Phase {
    /// The view whose fragment is visible.
    pub fn key(&self) -> &ViewKey {
        match self {
            Phase::Idle { current } => current,
            Phase::Loading { target, .. } => target,
        }
    }

    /// Whether a navigation load is pending.
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading { .. })
    }
}

/// State of the refresh trigger control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Enabled; a refresh may start.
    Ready,
    /// Disabled until `request` resolves.
    InFlight {
        /// The refresh fetch.
        request: RequestId,
        /// The view being refreshed.
        key: ViewKey,
    },
}

/// Page-embedded metadata the engine starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// The initial view.
    pub key: ViewKey,
    /// Newest item already delivered for the initial view.
    pub high_water: Option<HighWaterMark>,
    /// Server message shown with the initial view.
    pub status: StatusNode,
    /// Anti-forgery token sent with every action.
    pub csrf: String,
    /// Items already rendered for the initial view. `None` means the view
    /// still has to be fetched.
    pub items: Option<Vec<Item>>,
}

impl Seed {
    /// Seed for `key` with nothing rendered yet.
    pub fn new(key: ViewKey, csrf: impl Into<String>) -> Self {
        Self {
            key,
            high_water: None,
            status: StatusNode::default(),
            csrf: csrf.into(),
            items: None,
        }
    }

    /// Set the initial mark.
    pub fn with_high_water(mut self, mark: HighWaterMark) -> Self {
        self.high_water = Some(mark);
        self
    }

    /// Set the initial server message.
    pub fn with_status(mut self, status: StatusNode) -> Self {
        self.status = status;
        self
    }

    /// Set the items already rendered for the initial view.
    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = Some(items);
        self
    }
}

/// Input to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The shell is ready; bind the seeded view or start loading it.
    Boot,
    /// User navigation intent.
    Navigate {
        /// Target view.
        key: ViewKey,
        /// URL of the link followed, if any.
        url: Option<String>,
        /// Item to scroll to once the target is displayed.
        anchor: Option<ItemId>,
    },
    /// Back/forward replay of a history entry.
    HistoryPop(HistoryEntry),
    /// A fetch issued through `Effect::FetchView` resolved.
    FetchCompleted {
        /// Id of the fetch.
        request: RequestId,
        /// Parsed payload or the failure.
        result: Result<ViewPayload, TransportError>,
    },
    /// Refresh trigger pressed, by the user or the timer.
    RefreshRequested,
    /// Scroll to the oldest highlighted item.
    JumpToOldestNew,
    /// A control of a visible item was activated.
    ActivateControl {
        /// Item owning the control.
        item: ItemId,
        /// Index into the item's controls.
        control: usize,
    },
    /// A navigation link of a visible item was followed.
    FollowLink {
        /// Item owning the link.
        item: ItemId,
        /// Index into the item's links.
        link: usize,
    },
}

/// Side effect requested by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue a read request; answer with `Event::FetchCompleted`.
    FetchView {
        /// Id to echo back in the completion.
        request: RequestId,
        /// Query arguments for the hydra endpoint.
        args: BTreeMap<String, String>,
    },
    /// Fire-and-forget write request.
    SubmitAction(ActionSubmission),
    /// Record a user navigation in history.
    PushHistory(HistoryEntry),
    /// Scroll the visible view to its first item.
    ScrollToTop,
    /// Scroll the visible view to an item.
    ScrollToItem(ItemId),
    /// Open a reply composer.
    OpenComposer {
        /// Item being replied to.
        reply_to: String,
        /// Handle to mention, if any.
        mention: Option<String>,
    },
}

/// All mutable navigation state.
#[derive(Debug)]
pub struct EngineState {
    pub(crate) phase: Phase,
    pub(crate) fragment: Fragment,
    pub(crate) status: StatusNode,
    pub(crate) cache: FragmentCache,
    pub(crate) marks: HighWaterMarks,
    pub(crate) counters: Counters,
    pub(crate) refresh: RefreshTrigger,
    pub(crate) status_line: String,
    pub(crate) csrf: String,
    next_request: RequestId,
}

impl EngineState {
    /// Build the state for the seeded initial view.
    ///
    /// A seed with items starts `Idle` with a loaded fragment. A seed
    /// without items starts `Idle` on an empty placeholder; `Event::Boot`
    /// then issues the first fetch.
    pub fn new(seed: Seed) -> Self {
        let mut marks = HighWaterMarks::new();
        if let Some(mark) = seed.high_water.filter(|m| !m.is_unset()) {
            marks.record(&seed.key, mark);
        }
        let fragment = match seed.items {
            Some(items) => Fragment::loaded(items),
            None => Fragment::placeholder(),
        };
        Self {
            phase: Phase::Idle { current: seed.key },
            fragment,
            status: seed.status,
            cache: FragmentCache::new(),
            marks,
            counters: Counters::default(),
            refresh: RefreshTrigger::Ready,
            status_line: String::new(),
            csrf: seed.csrf,
            next_request: RequestId::FIRST,
        }
    }

    /// Current navigation phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The view whose fragment is visible.
    pub fn visible_key(&self) -> &ViewKey {
        self.phase.key()
    }

    /// The visible fragment.
    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    /// Server message of the visible view.
    pub fn status(&self) -> &StatusNode {
        &self.status
    }

    /// Unread counters from the latest successful fetch.
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Views stashed while not visible.
    pub fn cache(&self) -> &FragmentCache {
        &self.cache
    }

    /// Stored mark for `key`.
    pub fn high_water(&self, key: &ViewKey) -> Option<&HighWaterMark> {
        self.marks.get(key)
    }

    /// Text of the refresh status box.
    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    /// State of the refresh trigger.
    pub fn refresh_trigger(&self) -> &RefreshTrigger {
        &self.refresh
    }

    /// Label shown on the refresh trigger.
    pub fn refresh_label(&self) -> &'static str {
        match self.refresh {
            RefreshTrigger::Ready => REFRESH_READY_LABEL,
            RefreshTrigger::InFlight { .. } => REFRESH_BUSY_LABEL,
        }
    }

    /// Whether a refresh may start.
    pub fn is_refresh_ready(&self) -> bool {
        self.refresh == RefreshTrigger::Ready
    }

    /// Anti-forgery token.
    pub fn csrf(&self) -> &str {
        &self.csrf
    }

    /// Allocate the id for the next fetch.
    pub(crate) fn issue_request(&mut self) -> RequestId {
        let id = self.next_request;
        self.next_request = id.next();
        id
    }

    /// Refresh arguments for a view: its query args plus its mark, if any.
    ///
    /// Full loads send the bare query args so the server returns the
    /// whole view.
    pub(crate) fn refresh_args(&self, key: &ViewKey) -> BTreeMap<String, String> {
        let mut args = key.query_args();
        if let Some(mark) = self.marks.get(key).filter(|m| !m.is_unset()) {
            args.insert("tophid".to_string(), mark.as_str().to_string());
        }
        args
    }

    /// Re-bind the visible fragment after it changed.
    pub(crate) fn rebind(&mut self) {
        merger::bind(&mut self.fragment, &self.csrf);
    }
}

/// Apply one event, returning the effects to perform.
pub fn handle_event(state: &mut EngineState, event: Event) -> Vec<Effect> {
    match event {
        Event::Boot => boot(state),
        Event::Navigate { key, url, anchor } => {
            navigation_handler::navigate_to(state, key, url, anchor)
        }
        Event::HistoryPop(entry) => {
            let anchor = entry.anchor();
            navigation_handler::navigate(state, entry, anchor, false)
        }
        Event::FetchCompleted { request, result } => complete_fetch(state, request, result),
        Event::RefreshRequested => refresh_handler::request_refresh(state),
        Event::JumpToOldestNew => refresh_handler::jump_to_oldest_new(state),
        Event::ActivateControl { item, control } => {
            action_handler::activate_control(state, &item, control)
        }
        Event::FollowLink { item, link } => action_handler::follow_link(state, &item, link),
    }
}

fn boot(state: &mut EngineState) -> Vec<Effect> {
    if state.fragment.is_loaded() || state.phase.is_loading() {
        state.rebind();
        debug!(view = %state.visible_key(), "Boot with seeded view");
        return Vec::new();
    }
    let key = state.visible_key().clone();
    let request = state.issue_request();
    let args = key.query_args();
    debug!(view = %key, %request, "Boot: loading initial view");
    state.phase = Phase::Loading {
        target: key,
        request,
        anchor: None,
    };
    vec![Effect::FetchView { request, args }]
}

/// Route a completion to the transition it belongs to, or drop it.
fn complete_fetch(
    state: &mut EngineState,
    request: RequestId,
    result: Result<ViewPayload, TransportError>,
) -> Vec<Effect> {
    if matches!(&state.phase, Phase::Loading { request: pending, .. } if *pending == request) {
        return navigation_handler::complete_load(state, result);
    }
    if matches!(&state.refresh, RefreshTrigger::InFlight { request: pending, .. } if *pending == request)
    {
        return refresh_handler::complete_refresh(state, result);
    }
    debug!(%request, "Dropping stale response");
    Vec::new()
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
