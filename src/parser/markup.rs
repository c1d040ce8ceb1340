//! Scanner for server-rendered item markup.
//!
//! The hydra endpoint delivers items as a flat sequence of `<article>`
//! elements. Only the parts the engine needs are extracted: item identity
//! and ordering attributes, action controls, navigation links, and a plain
//! text rendering of everything else.

use crate::model::{ActionKind, Control, Item, ItemId, NavLink, ViewKey, ViewKind};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

static ARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<article\b([^>]*)>(.*?)</article\s*>").expect("valid article regex")
});
static BUTTON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<button\b([^>]*)>(.*?)</button\s*>").expect("valid button regex")
});
static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("valid anchor regex"));
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("valid attribute regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));
static SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

const CONVOY_LINK_CLASS: &str = "convoylink";
const COMBO_LINK_CLASS: &str = "combolink";
const HONKER_LINK_CLASS: &str = "honkerlink";

/// Parse a fragment sequence into items, in document order.
///
/// Articles without a usable id are skipped with a warning. A fragment
/// containing no articles yields an empty vec.
pub fn parse_items(html: &str) -> Vec<Item> {
    ARTICLE_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let attrs = parse_attrs(caps.get(1).map_or("", |m| m.as_str()));
            let body = caps.get(2).map_or("", |m| m.as_str());
            parse_article(&attrs, body)
        })
        .collect()
}

fn parse_article(attrs: &HashMap<String, String>, body: &str) -> Option<Item> {
    let raw_id = attrs.get("id").or_else(|| attrs.get("data-xid"));
    let id = match raw_id.map(|raw| ItemId::new(raw.as_str())) {
        Some(Ok(id)) => id,
        _ => {
            warn!(attrs = ?attrs, "Skipping article without id");
            return None;
        }
    };

    let mut item = Item::new(id);
    item.position = attrs
        .get("data-hid")
        .and_then(|hid| hid.parse().ok())
        .or_else(|| item.id.as_str().parse().ok());
    item.convoy = attrs.get("data-convoy").filter(|c| !c.is_empty()).cloned();
    item.author = attrs.get("data-honker").filter(|h| !h.is_empty()).cloned();
    item.controls = parse_controls(body, &item);
    item.links = parse_links(body);
    item.text = plain_text(&BUTTON_RE.replace_all(body, " "));
    Some(item)
}

fn parse_controls(body: &str, item: &Item) -> Vec<Control> {
    let mut controls = Vec::new();
    for caps in BUTTON_RE.captures_iter(body) {
        let attrs = parse_attrs(caps.get(1).map_or("", |m| m.as_str()));
        let Some(action) = attrs.get("data-action") else {
            continue;
        };
        let kind: ActionKind = match action.parse() {
            Ok(kind) => kind,
            Err(err) => {
                warn!(item = %item.id, "{}", err);
                continue;
            }
        };
        let target = attrs
            .get("data-what")
            .filter(|t| !t.is_empty())
            .cloned()
            .unwrap_or_else(|| default_target(kind, item));
        let label = plain_text(caps.get(2).map_or("", |m| m.as_str()));
        let label = if label.is_empty() {
            kind.markup_name().to_string()
        } else {
            label
        };
        controls.push(Control::new(kind, target, label));
    }
    controls
}

fn default_target(kind: ActionKind, item: &Item) -> String {
    match (kind, &item.convoy) {
        (ActionKind::Mute | ActionKind::ExpandThread, Some(convoy)) => convoy.clone(),
        _ => item.id.as_str().to_string(),
    }
}

fn parse_links(body: &str) -> Vec<NavLink> {
    let mut links = Vec::new();
    for caps in ANCHOR_RE.captures_iter(body) {
        let attrs = parse_attrs(caps.get(1).map_or("", |m| m.as_str()));
        let text = plain_text(caps.get(2).map_or("", |m| m.as_str()));
        let classes: Vec<&str> = attrs
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default();
        let target = if classes.contains(&CONVOY_LINK_CLASS) {
            Some(ViewKey::new(ViewKind::Conversation, text.clone()))
        } else if classes.contains(&COMBO_LINK_CLASS) {
            Some(ViewKey::new(ViewKind::Combo, text.clone()))
        } else if classes.contains(&HONKER_LINK_CLASS) {
            attrs
                .get("data-xid")
                .map(|xid| ViewKey::new(ViewKind::Honker, xid.clone()))
        } else {
            None
        };
        if let Some(target) = target.filter(|t| !t.arg.is_empty()) {
            links.push(NavLink::new(target, text, attrs.get("href").cloned()));
        }
    }
    links
}

/// Parse the attribute list of a start tag. Names are lowercased.
pub fn parse_attrs(raw: &str) -> HashMap<String, String> {
    ATTR_RE
        .captures_iter(raw)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or(String::new(), |m| decode_entities(m.as_str()));
            (name, value)
        })
        .collect()
}

/// Reduce markup to display text: tags stripped, entities decoded,
/// whitespace collapsed.
pub fn plain_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, " ");
    let decoded = decode_entities(&stripped);
    SPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
