//! Cheap pre-filter in front of the extraction service.
//!
//! Runs on every chat message the transport delivers and drops the ones that
//! cannot be trip posts before any LLM call is made.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domains::routing::RoutingTable;
use crate::domains::trips::models::RawMessage;

const GROUP_SUFFIX: &str = "@g.us";
const STATUS_BROADCAST: &str = "status@broadcast";
const UNKNOWN_SENDER: &str = "Unknown";

lazy_static! {
    // City names and travel words
    static ref KEYWORD_REGEX: Regex = Regex::new(
        r"(?i)(?:صنعاء|عدن|سيئون|المكلا|تريم|بيحان|عتق|القطن|ركاب|باص|رحلة|متواجد|طالع|نازل|مسافر|متحرك|سيتحرك|سوف يتحرك)"
    )
    .unwrap();

    // Saudi/Omani cities and selling or job ads
    static ref FOREIGN_OR_SELLING_REGEX: Regex = Regex::new(
        r"(?:للبيع|بيع|شراء|للإيجار|للتأجير|عقار|شقة|أرض|وظيفة|توظيف|مطلوب موظف|مندوب|تسليم|عرض خاص|تخفيض|الرياض|جدة|جده|مكة|مكه|الطائف|الدمام|الخبر|المدينة|المدينه|تبوك|أبها|ابها|نجران|جيزان|جازان|خميس مشيط|ينبع|شرورة|شروره|حائل|الجبيل|القصيم|بريدة|صلالة|صلاله|المزيونة|المزيونه|ثمريت|هيما)"
    )
    .unwrap();
}

/// A chat message as delivered by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub chat_id: String,
    /// Participant id; may be an anonymized `@lid` id.
    pub sender_id: String,
    /// Phone-number JID for the participant, when the network exposes one.
    #[serde(default)]
    pub sender_alt_id: Option<String>,
    #[serde(default)]
    pub push_name: Option<String>,
    #[serde(default)]
    pub from_me: bool,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl InboundMessage {
    /// Message text, or the media caption when there is no text.
    pub fn body(&self) -> Option<&str> {
        [self.text.as_deref(), self.caption.as_deref()]
            .into_iter()
            .flatten()
            .find(|b| !b.trim().is_empty())
    }

    /// Best identifier for the sender: the phone JID when known.
    pub fn sender_identifier(&self) -> &str {
        self.sender_alt_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.sender_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("not a group chat")]
    NotGroup,
    #[error("status broadcast")]
    StatusBroadcast,
    #[error("sent by this account")]
    FromSelf,
    #[error("no text")]
    EmptyBody,
    #[error("no travel keyword")]
    NoKeyword,
    #[error("foreign city or selling ad")]
    ForeignOrSelling,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotGroup => "not_group",
            Self::StatusBroadcast => "status_broadcast",
            Self::FromSelf => "from_self",
            Self::EmptyBody => "empty_body",
            Self::NoKeyword => "no_keyword",
            Self::ForeignOrSelling => "foreign_or_selling",
        }
    }
}

/// Filter one inbound message and, if it survives, route it into a
/// [`RawMessage`].
pub fn prefilter(message: &InboundMessage, routing: &RoutingTable) -> Result<RawMessage, SkipReason> {
    if message.chat_id == STATUS_BROADCAST {
        return Err(SkipReason::StatusBroadcast);
    }
    if !message.chat_id.ends_with(GROUP_SUFFIX) {
        return Err(SkipReason::NotGroup);
    }
    if message.from_me {
        return Err(SkipReason::FromSelf);
    }

    let body = message.body().ok_or(SkipReason::EmptyBody)?;
    if !KEYWORD_REGEX.is_match(body) {
        return Err(SkipReason::NoKeyword);
    }
    if FOREIGN_OR_SELLING_REGEX.is_match(body) {
        return Err(SkipReason::ForeignOrSelling);
    }

    let route = routing.route(&message.chat_id);
    let display_name = message
        .push_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_SENDER);

    let mut raw = RawMessage::new(body, display_name)
        .with_sender_identifier(message.sender_identifier())
        .with_group(&message.chat_id)
        .with_operator(route.operator_id);
    raw.default_origin_city = route.default_from_city;

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::routing::RouteEntry;

    fn group_message(text: &str) -> InboundMessage {
        InboundMessage {
            chat_id: "120363@g.us".to_string(),
            sender_id: "998877@lid".to_string(),
            sender_alt_id: Some("967770551092@s.whatsapp.net".to_string()),
            push_name: Some("Saleh".to_string()),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_trip_post_passes() {
        let routing = RoutingTable::default().with_entry(
            "120363@g.us",
            RouteEntry::Detailed {
                operator_id: "OP_7".into(),
                default_from_city: Some("سيئون".into()),
            },
        );

        let raw = prefilter(&group_message("باص طالع صنعاء بكرة"), &routing).unwrap();
        assert_eq!(raw.text, "باص طالع صنعاء بكرة");
        assert_eq!(raw.sender_display_name, "Saleh");
        assert_eq!(raw.sender_identifier, "967770551092@s.whatsapp.net");
        assert_eq!(raw.group_identifier, "120363@g.us");
        assert_eq!(raw.routed_operator_id, "OP_7");
        assert_eq!(raw.default_origin_city.as_deref(), Some("سيئون"));
    }

    #[test]
    fn test_non_group_and_self_are_skipped() {
        let routing = RoutingTable::default();

        let mut direct = group_message("رحلة صنعاء");
        direct.chat_id = "967770551092@s.whatsapp.net".into();
        assert_eq!(prefilter(&direct, &routing), Err(SkipReason::NotGroup));

        let mut status = group_message("رحلة صنعاء");
        status.chat_id = STATUS_BROADCAST.into();
        assert_eq!(prefilter(&status, &routing), Err(SkipReason::StatusBroadcast));

        let mut own = group_message("رحلة صنعاء");
        own.from_me = true;
        assert_eq!(prefilter(&own, &routing), Err(SkipReason::FromSelf));
    }

    #[test]
    fn test_caption_and_empty_body() {
        let routing = RoutingTable::default();

        let mut captioned = group_message("");
        captioned.text = None;
        captioned.caption = Some("رحلة عدن".into());
        assert_eq!(prefilter(&captioned, &routing).unwrap().text, "رحلة عدن");

        let mut empty = group_message("   ");
        empty.caption = None;
        assert_eq!(prefilter(&empty, &routing), Err(SkipReason::EmptyBody));
    }

    #[test]
    fn test_keyword_and_foreign_filters() {
        let routing = RoutingTable::default();
        assert_eq!(
            prefilter(&group_message("السلام عليكم"), &routing),
            Err(SkipReason::NoKeyword)
        );
        assert_eq!(
            prefilter(&group_message("باص من صنعاء الى الرياض"), &routing),
            Err(SkipReason::ForeignOrSelling)
        );
        assert_eq!(
            prefilter(&group_message("باص للبيع"), &routing),
            Err(SkipReason::ForeignOrSelling)
        );
    }

    #[test]
    fn test_defaults_for_unknown_sender_and_group() {
        let mut message = group_message("رحلة صنعاء");
        message.push_name = None;
        message.sender_alt_id = None;

        let raw = prefilter(&message, &RoutingTable::default()).unwrap();
        assert_eq!(raw.sender_display_name, UNKNOWN_SENDER);
        assert_eq!(raw.sender_identifier, "998877@lid");
        assert_eq!(raw.routed_operator_id, "OP_GENERAL");
        assert_eq!(raw.default_origin_city, None);
    }
}
