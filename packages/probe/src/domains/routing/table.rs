//! Group → operator routing.
//!
//! Loaded once at startup and read-only afterwards. Groups without an entry
//! belong to the general operator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Operator that owns every group without a specific entry.
pub const GENERAL_OPERATOR_ID: &str = "OP_GENERAL";

/// One configured entry: either a bare operator id or an object with an
/// optional default origin city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteEntry {
    Operator(String),
    Detailed {
        operator_id: String,
        #[serde(default)]
        default_from_city: Option<String>,
    },
}

/// Where a group's trips go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub operator_id: String,
    pub default_from_city: Option<String>,
    /// False for the general fallback.
    pub specific: bool,
}

impl Route {
    pub fn general() -> Self {
        Self {
            operator_id: GENERAL_OPERATOR_ID.to_string(),
            default_from_city: None,
            specific: false,
        }
    }

    pub fn describe(&self) -> &'static str {
        if self.specific {
            "specific"
        } else {
            "general"
        }
    }
}

impl From<&RouteEntry> for Route {
    fn from(entry: &RouteEntry) -> Self {
        match entry {
            RouteEntry::Operator(operator_id) => Self {
                operator_id: operator_id.clone(),
                default_from_city: None,
                specific: true,
            },
            RouteEntry::Detailed {
                operator_id,
                default_from_city,
            } => Self {
                operator_id: operator_id.clone(),
                default_from_city: default_from_city
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string),
                specific: true,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RoutingTable {
    entries: BTreeMap<String, RouteEntry>,
}

impl RoutingTable {
    /// Parse the `GROUP_ROUTING_JSON` value. Surrounding single quotes (left
    /// over from `.env` quoting) are ignored.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        let raw = raw.trim();
        let raw = raw.strip_prefix('\'').unwrap_or(raw);
        let raw = raw.strip_suffix('\'').unwrap_or(raw);
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw)
    }

    pub fn with_entry(mut self, group_id: impl Into<String>, entry: RouteEntry) -> Self {
        self.entries.insert(group_id.into(), entry);
        self
    }

    /// Total: unknown groups get the general route.
    pub fn route(&self, group_id: &str) -> Route {
        self.entries
            .get(group_id)
            .map(Route::from)
            .unwrap_or_else(Route::general)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Specific entries in group-id order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, Route)> {
        self.entries
            .iter()
            .map(|(group, entry)| (group.as_str(), Route::from(entry)))
    }
}
