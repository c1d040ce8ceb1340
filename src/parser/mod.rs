//! Hydra payload parser.
//!
//! This module provides pure parsing functions for converting a raw
//! fetch-view response body into a validated [`ViewPayload`].

pub mod markup;

use crate::model::{Counters, HighWaterMark, StatusNode, TransportError, ViewPayload};
use serde::Deserialize;

/// Raw JSON structure of a hydra response.
///
/// `Tophid` and `Honks` are required; a body without them is malformed.
#[derive(Debug, Deserialize)]
struct RawHydration {
    #[serde(rename = "Tophid")]
    tophid: RawMark,
    #[serde(rename = "Srvmsg", default)]
    srvmsg: String,
    #[serde(rename = "Honks")]
    honks: String,
    #[serde(rename = "MeCount", default)]
    me_count: i64,
    #[serde(rename = "ChatCount", default)]
    chat_count: i64,
}

/// The server sends post ids as integers; accept strings too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMark {
    Number(i64),
    Text(String),
}

impl From<RawMark> for HighWaterMark {
    fn from(raw: RawMark) -> Self {
        match raw {
            RawMark::Number(n) => HighWaterMark::new(n.to_string()),
            RawMark::Text(s) => HighWaterMark::new(s),
        }
    }
}

/// Parse a hydra response body.
///
/// # Errors
///
/// Returns `TransportError::MalformedPayload` if the body is not JSON or a
/// required field is missing.
pub fn parse_payload(body: &str) -> Result<ViewPayload, TransportError> {
    let raw: RawHydration =
        serde_json::from_str(body).map_err(|e| TransportError::MalformedPayload {
            reason: e.to_string(),
        })?;

    Ok(ViewPayload {
        items: markup::parse_items(&raw.honks),
        status: StatusNode::new(raw.srvmsg.clone(), markup::plain_text(&raw.srvmsg)),
        high_water: raw.tophid.into(),
        counters: Counters {
            mentions: raw.me_count,
            chats: raw.chat_count,
        },
    })
}
