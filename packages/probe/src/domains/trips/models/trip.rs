//! Pipeline outputs: the normalized trip, the gate's verdicts and the
//! payload posted to the backend.

use serde::Serialize;
use thiserror::Error;

use super::extraction::Classification;
use super::message::RawMessage;

/// A trip whose fields have all been normalized and checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTrip {
    pub classification: Classification,
    pub driver_name: String,
    /// Phones exactly as the service extracted them.
    pub candidate_phones: Vec<String>,
    pub from_city: String,
    pub to_city: String,
    /// Strict ISO calendar date (`YYYY-MM-DD`).
    pub date: String,
    pub time: Option<String>,
    pub vehicle_raw: Option<String>,
    pub price: Option<f64>,
}

/// Gate verdict for a submittable trip.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedTrip {
    pub trip: NormalizedTrip,
    /// Valid local-format phones, in the order they should be tried.
    pub phones: Vec<String>,
    /// True when `phones` came from the sender identity, not the text.
    pub used_sender_phone: bool,
}

/// The states a message moves through in the validation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStage {
    Received,
    Classified,
    NameResolved,
    OriginDefaulted,
    DateResolved,
    NameChecked,
    CitiesChecked,
    PhonesResolved,
}

impl GateStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Classified => "classified",
            Self::NameResolved => "name_resolved",
            Self::OriginDefaulted => "origin_defaulted",
            Self::DateResolved => "date_resolved",
            Self::NameChecked => "name_checked",
            Self::CitiesChecked => "cities_checked",
            Self::PhonesResolved => "phones_resolved",
        }
    }
}

/// Why a message did not become a trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("classified as an ad")]
    InvalidAd,

    #[error("classified as a passenger question")]
    Question,

    #[error("classification missing or unrecognized")]
    Unclassified,

    #[error("no usable driver name")]
    NoName,

    #[error("missing city (from={from:?}, to={to:?})")]
    MissingCity {
        from: Option<String>,
        to: Option<String>,
    },

    #[error("city not in the official list (from={from}, to={to})")]
    InvalidCity { from: String, to: String },

    #[error("no valid phone number in text or sender")]
    NoPhone,
}

impl Rejection {
    /// Stable tag for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidAd => "invalid_ad",
            Self::Question => "question",
            Self::Unclassified => "unclassified",
            Self::NoName => "no_name",
            Self::MissingCity { .. } => "missing_city",
            Self::InvalidCity { .. } => "invalid_city",
            Self::NoPhone => "no_phone",
        }
    }

    /// Stage whose check produced this rejection.
    pub fn stage(&self) -> GateStage {
        match self {
            Self::InvalidAd | Self::Question | Self::Unclassified => GateStage::Classified,
            Self::NoName => GateStage::NameChecked,
            Self::MissingCity { .. } | Self::InvalidCity { .. } => GateStage::CitiesChecked,
            Self::NoPhone => GateStage::PhonesResolved,
        }
    }
}

/// Body of one submission attempt: the trip plus the phone being tried and
/// where the message came from.
#[derive(Debug, Clone, Serialize)]
pub struct TripSubmission<'a> {
    #[serde(flatten)]
    pub trip: &'a NormalizedTrip,
    pub phone: &'a str,
    pub original_text: &'a str,
    pub reported_by: &'a str,
    pub operator_id: &'a str,
    pub source_group: &'a str,
}

impl<'a> TripSubmission<'a> {
    pub fn new(trip: &'a NormalizedTrip, phone: &'a str, message: &'a RawMessage) -> Self {
        Self {
            trip,
            phone,
            original_text: &message.text,
            reported_by: &message.sender_display_name,
            operator_id: &message.routed_operator_id,
            source_group: &message.group_identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trip() -> NormalizedTrip {
        NormalizedTrip {
            classification: Classification::Trip,
            driver_name: "محمد علي".to_string(),
            candidate_phones: vec!["967770551092".to_string()],
            from_city: "صنعاء".to_string(),
            to_city: "عدن".to_string(),
            date: "2026-10-20".to_string(),
            time: Some("07:00".to_string()),
            vehicle_raw: None,
            price: None,
        }
    }

    #[test]
    fn submission_flattens_trip_fields() {
        let trip = sample_trip();
        let message = RawMessage::new("رحلة صنعاء عدن", "Mohammed")
            .with_group("123@g.us")
            .with_operator("OP_7");

        let body = serde_json::to_value(TripSubmission::new(&trip, "770551092", &message)).unwrap();

        assert_eq!(body["classification"], "trip");
        assert_eq!(body["driver_name"], "محمد علي");
        assert_eq!(body["date"], "2026-10-20");
        assert_eq!(body["phone"], "770551092");
        assert_eq!(body["original_text"], "رحلة صنعاء عدن");
        assert_eq!(body["reported_by"], "Mohammed");
        assert_eq!(body["operator_id"], "OP_7");
        assert_eq!(body["source_group"], "123@g.us");
        assert!(body["price"].is_null());
    }

    #[test]
    fn rejection_tags_are_stable() {
        let missing = Rejection::MissingCity {
            from: Some("صنعاء".into()),
            to: None,
        };
        assert_eq!(missing.reason(), "missing_city");
        assert_eq!(Rejection::NoPhone.reason(), "no_phone");
        assert_eq!(Rejection::Question.stage(), GateStage::Classified);
        assert_eq!(Rejection::NoName.stage(), GateStage::NameChecked);
        assert_eq!(missing.stage(), GateStage::CitiesChecked);
        assert_eq!(Rejection::NoPhone.stage().as_str(), "phones_resolved");
    }
}
