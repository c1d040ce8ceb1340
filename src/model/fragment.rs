//! Renderable content: items, their controls, and the fragments that hold them.
//!
//! A [`Fragment`] is a movable subtree handle. It is owned by exactly one of
//! the visible surface or the fragment cache at any time; Rust move
//! semantics make that exclusive ownership structural.

use crate::model::{ActionKind, Command, ItemId, ViewKey};

/// An actionable control inside an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// What firing the control does.
    pub kind: ActionKind,
    /// Item xid or conversation id the action applies to.
    pub target: String,
    /// Text shown on the control.
    pub label: String,
    /// Set once the control has fired.
    pub disabled: bool,
    binding: Option<Command>,
}

impl Control {
    /// Unbound, enabled control.
    pub fn new(kind: ActionKind, target: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            label: label.into(),
            disabled: false,
            binding: None,
        }
    }

    /// Command attached by the last bind, if the control is live.
    pub fn binding(&self) -> Option<&Command> {
        self.binding.as_ref()
    }

    /// Whether the last bind attached a command.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub(crate) fn bind(&mut self, command: Command) {
        self.binding = Some(command);
    }

    pub(crate) fn unbind(&mut self) {
        self.binding = None;
    }

    /// Relabel and disable after the control fired.
    pub(crate) fn mark_spent(&mut self) {
        self.label = self.kind.spent_label().to_string();
        self.disabled = true;
    }
}

/// A link inside an item that switches views instead of leaving the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// View the link switches to.
    pub target: ViewKey,
    /// Link text.
    pub label: String,
    /// Display URL from the link's `href`.
    pub url: Option<String>,
    binding: Option<Command>,
}

impl NavLink {
    /// Unbound link.
    pub fn new(target: ViewKey, label: impl Into<String>, url: Option<String>) -> Self {
        Self {
            target,
            label: label.into(),
            url,
            binding: None,
        }
    }

    /// Command attached by the last bind.
    pub fn binding(&self) -> Option<&Command> {
        self.binding.as_ref()
    }

    /// Whether the last bind attached a command.
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub(crate) fn bind(&mut self, command: Command) {
        self.binding = Some(command);
    }

    pub(crate) fn unbind(&mut self) {
        self.binding = None;
    }
}

/// One rendered post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Stable identity within a view.
    pub id: ItemId,
    /// Server ordering position (post id), when the markup carries one.
    pub position: Option<i64>,
    /// Conversation the item belongs to.
    pub convoy: Option<String>,
    /// Author xid.
    pub author: Option<String>,
    /// Body reduced to plain text.
    pub text: String,
    /// Action controls in document order.
    pub controls: Vec<Control>,
    /// View-switching links in document order.
    pub links: Vec<NavLink>,
    highlighted: bool,
}

impl Item {
    /// Bare item with no content.
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            position: None,
            convoy: None,
            author: None,
            text: String::new(),
            controls: Vec::new(),
            links: Vec::new(),
            highlighted: false,
        }
    }

    /// Set the server ordering position.
    pub fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the conversation id.
    pub fn with_convoy(mut self, convoy: impl Into<String>) -> Self {
        self.convoy = Some(convoy.into());
        self
    }

    /// Set the body text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append a control.
    pub fn with_control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    /// Append a link.
    pub fn with_link(mut self, link: NavLink) -> Self {
        self.links.push(link);
        self
    }

    /// Whether the transient "new" highlight is set.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(crate) fn set_highlighted(&mut self, on: bool) {
        self.highlighted = on;
    }

    fn unbind_all(&mut self) {
        self.controls.iter_mut().for_each(Control::unbind);
        self.links.iter_mut().for_each(NavLink::unbind);
    }
}

/// Ordered sequence of items for one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    items: Vec<Item>,
    loaded: bool,
}

impl Fragment {
    /// Empty fragment shown while a view's first fetch is pending.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Fragment already holding content (e.g. seeded at startup).
    pub fn loaded(items: Vec<Item>) -> Self {
        Self {
            items,
            loaded: true,
        }
    }

    /// Whether a successful fetch has populated this fragment.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the fragment holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item ids in display order.
    pub fn item_ids(&self) -> Vec<&ItemId> {
        self.items.iter().map(|item| &item.id).collect()
    }

    /// Whether an item with `id` is present.
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// Item with `id`, if present.
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Display position of the item with `id`.
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    pub(crate) fn prepend(&mut self, item: Item) {
        self.items.insert(0, item);
    }

    pub(crate) fn append(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove one item. Returns whether it was present.
    pub(crate) fn remove_item(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Remove every item of a conversation. Returns the number removed.
    pub(crate) fn remove_conversation(&mut self, convoy: &str) -> usize {
        let before = self.items.len();
        self.items
            .retain(|item| item.convoy.as_deref() != Some(convoy));
        before - self.items.len()
    }

    /// Clear the transient highlight on every item.
    pub(crate) fn clear_highlight(&mut self) {
        self.items
            .iter_mut()
            .for_each(|item| item.set_highlighted(false));
    }

    /// Last item bearing the highlight, in display order.
    pub fn last_highlighted(&self) -> Option<&ItemId> {
        self.items
            .iter()
            .rev()
            .find(|item| item.is_highlighted())
            .map(|item| &item.id)
    }

    /// Drop every control and link binding. Detached fragments are inert.
    pub(crate) fn unbind_all(&mut self) {
        self.items.iter_mut().for_each(Item::unbind_all);
    }

    /// Whether every control and link is bound.
    pub fn is_fully_bound(&self) -> bool {
        self.items.iter().all(|item| {
            item.controls.iter().all(Control::is_bound) && item.links.iter().all(NavLink::is_bound)
        })
    }
}

/// Server status message shown above the items of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusNode {
    /// Message markup as delivered.
    pub html: String,
    /// Plain display text derived from `html`.
    pub text: String,
}

impl StatusNode {
    /// Status with both renderings.
    pub fn new(html: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            text: text.into(),
        }
    }
}

/// Unread counters shown in the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Unread mentions (`MeCount`).
    pub mentions: i64,
    /// Unread chats (`ChatCount`).
    pub chats: i64,
}

impl Counters {
    /// Label for the mentions counter: `"(N)"`, empty when zero.
    pub fn mecount_label(&self) -> String {
        count_label(self.mentions)
    }

    /// Label for the chat counter: `"(N)"`, empty when zero.
    pub fn chatcount_label(&self) -> String {
        count_label(self.chats)
    }
}

fn count_label(n: i64) -> String {
    if n != 0 {
        format!("({})", n)
    } else {
        String::new()
    }
}
