//! Driver name refinement.
//!
//! Good names (two or more Arabic words, not a nickname) pass straight
//! through. Anything else costs one refinement call; when that fails we keep
//! whatever was extracted.

use tracing::{debug, info, warn};

use crate::domains::trips::models::NameRules;
use crate::kernel::BaseExtractionService;

/// Local acceptance check; no external call.
pub fn is_acceptable_name(name: &str, rules: &NameRules) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }

    let in_script = name
        .chars()
        .all(|c| c.is_whitespace() || rules.script.contains(&c));
    if !in_script {
        return false;
    }

    let tokens = name
        .split_whitespace()
        .filter(|w| w.chars().count() > 1)
        .count();
    if tokens < rules.min_tokens {
        return false;
    }

    !starts_with_nickname(name, rules)
}

fn starts_with_nickname(name: &str, rules: &NameRules) -> bool {
    let first = name.split_whitespace().next().unwrap_or_default();
    rules.nickname_prefixes.iter().any(|p| p == first)
}

/// Resolve the driver name for a message.
///
/// Returns `None` only when neither the extraction, the refinement nor the
/// fallback produced any name.
pub async fn refine_driver_name(
    extracted: Option<&str>,
    sender_name: &str,
    rules: &NameRules,
    extractor: &dyn BaseExtractionService,
) -> Option<String> {
    let extracted = extracted.unwrap_or_default().trim();
    let sender_name = sender_name.trim();

    if is_acceptable_name(extracted, rules) {
        return Some(extracted.to_string());
    }

    info!(extracted = %extracted, sender = %sender_name, "Refining driver name");

    match extractor.refine_name(extracted, sender_name).await {
        Ok(Some(refined)) if !refined.trim().is_empty() => {
            let refined = refined.trim().to_string();
            info!(refined = %refined, "Driver name refined");
            return Some(refined);
        }
        Ok(_) => debug!("Refinement returned no name, keeping original"),
        Err(e) => warn!(error = %e, "Name refinement failed, keeping original"),
    }

    (!extracted.is_empty()).then(|| extracted.to_string())
}
