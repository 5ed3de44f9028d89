//! Final allow-list gate for trip endpoints.
//!
//! Mapping colloquial spellings to official names is left to the extraction
//! prompt; this only decides membership.

use crate::domains::trips::models::{Rejection, TripRules};

/// Both endpoints, trimmed, if they are present and official.
pub fn check_cities(
    from: Option<&str>,
    to: Option<&str>,
    rules: &TripRules,
) -> Result<(String, String), Rejection> {
    let from = from.map(str::trim).filter(|c| !c.is_empty());
    let to = to.map(str::trim).filter(|c| !c.is_empty());

    let (Some(from), Some(to)) = (from, to) else {
        return Err(Rejection::MissingCity {
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        });
    };

    if !rules.is_official_city(from) || !rules.is_official_city(to) {
        return Err(Rejection::InvalidCity {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    Ok((from.to_string(), to.to_string()))
}
