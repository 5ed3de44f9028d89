//! The extraction service's answer for one message.
//!
//! This is untrusted model output, so decoding is lenient: wrong types,
//! `"null"` strings and missing keys degrade to absent values instead of
//! failing the whole message.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Whether a message is a genuine trip offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Trip,
    /// Sale, rental or other spam.
    InvalidAd,
    /// A passenger asking for a ride.
    Question,
    /// Anything the service produced that is none of the above.
    #[default]
    Unknown,
}

impl Classification {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw
            .trim()
            .to_lowercase()
            .replace(|c: char| c == '-' || c.is_whitespace(), "_");

        match normalized.as_str() {
            "trip" => Self::Trip,
            "invalid_ad" => Self::InvalidAd,
            "question" => Self::Question,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trip => "trip",
            Self::InvalidAd => "invalid_ad",
            Self::Question => "question",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractionResult {
    #[serde(default, deserialize_with = "lenient_classification")]
    pub classification: Classification,
    #[serde(default, deserialize_with = "lenient_text")]
    pub driver_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub candidate_phones: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub from_city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub to_city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub vehicle_raw: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
}

impl ExtractionResult {
    /// A trip-classified result with nothing else filled in.
    pub fn trip() -> Self {
        Self {
            classification: Classification::Trip,
            ..Default::default()
        }
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    pub fn with_driver_name(mut self, name: impl Into<String>) -> Self {
        self.driver_name = Some(name.into());
        self
    }

    pub fn with_route(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_city = Some(from.into());
        self.to_city = Some(to.into());
        self
    }

    pub fn with_from_city(mut self, city: impl Into<String>) -> Self {
        self.from_city = Some(city.into());
        self
    }

    pub fn with_to_city(mut self, city: impl Into<String>) -> Self {
        self.to_city = Some(city.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_phones<I, S>(mut self, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidate_phones = phones.into_iter().map(Into::into).collect();
        self
    }

    /// Decode service output, tolerating Markdown fences around the JSON.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(openai_client::strip_code_blocks(raw))
    }
}

// =============================================================================
// Lenient decoders
// =============================================================================

fn lenient_classification<'de, D>(deserializer: D) -> Result<Classification, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Classification::parse(&s),
        _ => Classification::Unknown,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_text))
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(value_to_text).collect(),
        Some(other) => value_to_text(other).into_iter().collect(),
        None => Vec::new(),
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    })
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("null") {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
