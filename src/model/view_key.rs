//! Logical page identity and per-view high-water marks.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of logical feed view.
///
/// The wire name (`page=` parameter, history `name`) is the server's
/// vocabulary, see [`ViewKind::wire_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// The home timeline.
    Home,
    /// Posts mentioning the user.
    #[serde(rename = "atme")]
    AtMentions,
    /// First-class posts only.
    First,
    /// Saved posts.
    Saved,
    /// Posts from this day in earlier years.
    #[serde(rename = "longago")]
    LongAgo,
    /// A single conversation (argument: conversation id).
    #[serde(rename = "convoy")]
    Conversation,
    /// A tag/combo view (argument: combo name).
    Combo,
    /// A single remote author (argument: author xid).
    Honker,
    /// A local user (argument: user name).
    User,
}

impl ViewKind {
    /// Every kind, in menu order.
    pub const ALL: [ViewKind; 9] = [
        ViewKind::Home,
        ViewKind::AtMentions,
        ViewKind::First,
        ViewKind::Saved,
        ViewKind::LongAgo,
        ViewKind::Conversation,
        ViewKind::Combo,
        ViewKind::Honker,
        ViewKind::User,
    ];

    /// Name used by the hydra endpoint and in history entries.
    pub fn wire_name(self) -> &'static str {
        match self {
            ViewKind::Home => "home",
            ViewKind::AtMentions => "atme",
            ViewKind::First => "first",
            ViewKind::Saved => "saved",
            ViewKind::LongAgo => "longago",
            ViewKind::Conversation => "convoy",
            ViewKind::Combo => "combo",
            ViewKind::Honker => "honker",
            ViewKind::User => "user",
        }
    }

    /// Query parameter carrying the view argument, if the kind takes one.
    pub fn arg_param(self) -> Option<&'static str> {
        match self {
            ViewKind::Conversation | ViewKind::Combo => Some("c"),
            ViewKind::Honker => Some("xid"),
            ViewKind::User => Some("uname"),
            _ => None,
        }
    }

    /// Conversation views read oldest-first; every other view newest-first.
    pub fn is_chronological(self) -> bool {
        self == ViewKind::Conversation
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ViewKind {
    type Err = UnknownViewKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewKind::ALL
            .into_iter()
            .find(|kind| kind.wire_name() == s)
            .ok_or_else(|| UnknownViewKind(s.to_string()))
    }
}

/// A wire name outside the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown view kind: {0}")]
pub struct UnknownViewKind(pub String);

/// Identity of a logical page: kind plus argument.
///
/// Equality is structural; two keys name the same cache slot iff kind
/// and argument are equal. Kinds without an argument use the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewKey {
    /// Kind of view.
    pub kind: ViewKind,
    /// Kind-specific argument; empty for menu views.
    pub arg: String,
}

impl ViewKey {
    /// Key for `kind` with `arg`.
    pub fn new(kind: ViewKind, arg: impl Into<String>) -> Self {
        Self {
            kind,
            arg: arg.into(),
        }
    }

    /// Key for an argument-less view.
    pub fn of(kind: ViewKind) -> Self {
        Self::new(kind, "")
    }

    /// The home timeline.
    pub fn home() -> Self {
        Self::of(ViewKind::Home)
    }

    /// A conversation view.
    pub fn conversation(convoy: impl Into<String>) -> Self {
        Self::new(ViewKind::Conversation, convoy)
    }

    /// Query arguments identifying this view to the hydra endpoint.
    ///
    /// Always contains `page`; contains the kind's argument parameter
    /// when the kind takes one.
    pub fn query_args(&self) -> BTreeMap<String, String> {
        let mut args = BTreeMap::new();
        args.insert("page".to_string(), self.kind.wire_name().to_string());
        if let Some(param) = self.kind.arg_param() {
            args.insert(param.to_string(), self.arg.clone());
        }
        args
    }

    /// Display URL used when a link does not carry its own.
    pub fn default_url(&self) -> String {
        if self.arg.is_empty() {
            format!("/{}", self.kind.wire_name())
        } else {
            format!("/{}/{}", self.kind.wire_name(), self.arg)
        }
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.wire_name(), self.arg)
    }
}

/// Opaque server-issued token marking the newest item delivered for a view.
///
/// The server issues numeric post ids, but any other token is taken as
/// given: only two numeric marks are ever ordered against each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighWaterMark(String);

impl HighWaterMark {
    /// Wrap a token as delivered.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this mark carries no information (`""` or `"0"`).
    pub fn is_unset(&self) -> bool {
        self.0.is_empty() || self.0 == "0"
    }

    /// Numeric ordering, if both marks are numeric.
    pub fn numeric_cmp(&self, other: &HighWaterMark) -> Option<Ordering> {
        match (self.0.parse::<i64>(), other.0.parse::<i64>()) {
            (Ok(a), Ok(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }

    /// Whether a freshly delivered mark should replace `stored`.
    ///
    /// Unset marks never replace anything. A numeric mark below a numeric
    /// `stored` is refused; any other differing token replaces it.
    pub fn supersedes(&self, stored: &HighWaterMark) -> bool {
        if self.is_unset() {
            return false;
        }
        match self.numeric_cmp(stored) {
            Some(order) => order == Ordering::Greater,
            None => self != stored,
        }
    }
}

impl fmt::Display for HighWaterMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
