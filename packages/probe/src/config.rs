use anyhow::{Context, Result};
use chrono_tz::Tz;
use dotenvy::dotenv;
use std::env;

use crate::domains::routing::RoutingTable;
use crate::domains::trips::models::{FastingPeriod, TripRules};
use crate::kernel::DEFAULT_MODEL;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub mishwari_api_url: String,
    pub mishwari_api_key: Option<String>,
    pub routing: RoutingTable,
    pub timezone: Tz,
    /// `None` keeps the built-in periods.
    pub fasting_periods: Option<Vec<FastingPeriod>>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let timezone_name = env::var("PROBE_TIMEZONE").unwrap_or_else(|_| "Asia/Aden".to_string());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|e| anyhow::anyhow!("PROBE_TIMEZONE '{}' is not a timezone: {}", timezone_name, e))?;

        let fasting_periods = match env::var("FASTING_PERIODS") {
            Ok(raw) => Some(
                FastingPeriod::parse_list(&raw).context("FASTING_PERIODS must be START..END[,START..END]")?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            llm_api_key: env::var("LLM_API_KEY")
                .or_else(|_| env::var("GEMINI_API_KEY"))
                .context("LLM_API_KEY or GEMINI_API_KEY must be set")?,
            llm_base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| openai_client::DEFAULT_BASE_URL.to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            mishwari_api_url: env::var("MISHWARI_API_URL")
                .unwrap_or_else(|_| mishwari_client::DEFAULT_API_URL.to_string()),
            mishwari_api_key: env::var("MISHWARI_API_KEY").ok().filter(|k| !k.is_empty()),
            routing: env::var("GROUP_ROUTING_JSON")
                .map(|raw| load_routing(&raw))
                .unwrap_or_default(),
            timezone,
            fasting_periods,
        })
    }

    /// Production rules with the configured timezone and fasting periods.
    pub fn trip_rules(&self) -> TripRules {
        let mut rules = TripRules::default();
        rules.dates.timezone = self.timezone;
        if let Some(periods) = &self.fasting_periods {
            rules.dates.fasting_periods = periods.clone();
        }
        rules
    }
}

/// Routing table alone, for commands that make no external calls.
pub fn routing_from_env() -> RoutingTable {
    let _ = dotenv();
    env::var("GROUP_ROUTING_JSON")
        .map(|raw| load_routing(&raw))
        .unwrap_or_default()
}

/// A broken routing value must not stop the probe; everything routes to the
/// general operator instead.
fn load_routing(raw: &str) -> RoutingTable {
    match RoutingTable::from_json(raw) {
        Ok(table) => {
            tracing::info!(groups = table.len(), "Loaded group routing rules");
            table
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse GROUP_ROUTING_JSON, using general routing only");
            RoutingTable::default()
        }
    }
}
