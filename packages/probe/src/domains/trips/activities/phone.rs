//! Phone normalization and candidate resolution.
//!
//! Turns whatever the extraction service or the chat network hands us into
//! local-format mobile numbers (`7XXXXXXXX`).

use tracing::{debug, info};

use crate::domains::trips::models::PhoneRules;

/// Canonicalize a bare number or chat identifier into a local mobile number.
///
/// Returns `None` for anonymized identifiers, foreign numbers and anything
/// that is not a valid local mobile number. Pure: already-normalized numbers
/// come back unchanged.
pub fn normalize_phone(raw: &str, rules: &PhoneRules) -> Option<String> {
    if is_anonymized(raw, rules) {
        return None;
    }

    let user_part = raw.split('@').next().unwrap_or_default();
    let mut digits: String = user_part.chars().filter_map(ascii_digit).collect();

    // international dialing prefix, only in front of the country code
    if let Some(rest) = digits.strip_prefix("00") {
        if rest.starts_with(rules.country_code.as_str()) {
            digits = rest.to_string();
        }
    }
    if let Some(rest) = digits.strip_prefix(rules.country_code.as_str()) {
        digits = rest.to_string();
    }

    let valid = digits.len() == rules.local_length
        && rules
            .mobile_prefixes
            .iter()
            .any(|prefix| digits.starts_with(prefix.as_str()));

    valid.then_some(digits)
}

/// Whether the identifier is an anonymized id with no recoverable number.
pub fn is_anonymized(raw: &str, rules: &PhoneRules) -> bool {
    !rules.anonymized_marker.is_empty() && raw.contains(rules.anonymized_marker.as_str())
}

/// Map ASCII, Arabic-Indic and Extended Arabic-Indic digits to ASCII; drop the rest.
fn ascii_digit(c: char) -> Option<char> {
    match c {
        '0'..='9' => Some(c),
        '\u{0660}'..='\u{0669}' => char::from_digit(c as u32 - 0x0660, 10),
        '\u{06F0}'..='\u{06F9}' => char::from_digit(c as u32 - 0x06F0, 10),
        _ => None,
    }
}

/// Outcome of resolving a message's phone candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneResolution {
    /// Valid numbers in first-occurrence order, without duplicates.
    pub phones: Vec<String>,
    /// Raw candidates that did not normalize.
    pub ignored: Vec<String>,
    pub used_sender_fallback: bool,
}

/// Normalize the extracted candidates; fall back to the sender identity only
/// when the text yielded no valid number at all.
pub fn resolve_phone_candidates(
    candidates: &[String],
    sender_identifier: &str,
    rules: &PhoneRules,
) -> PhoneResolution {
    let mut resolution = PhoneResolution::default();
    let mut seen_raw: Vec<&str> = Vec::with_capacity(candidates.len());

    for raw in candidates {
        let raw = raw.trim();
        if seen_raw.contains(&raw) {
            continue;
        }
        seen_raw.push(raw);

        match normalize_phone(raw, rules) {
            Some(phone) if !resolution.phones.contains(&phone) => resolution.phones.push(phone),
            Some(_) => {}
            None => {
                debug!(candidate = %raw, "Ignoring invalid or foreign phone");
                resolution.ignored.push(raw.to_string());
            }
        }
    }

    if resolution.phones.is_empty() && !sender_identifier.is_empty() {
        match normalize_phone(sender_identifier, rules) {
            Some(phone) => {
                info!(phone = %phone, "No valid phone in text, using sender phone");
                resolution.phones.push(phone);
                resolution.used_sender_fallback = true;
            }
            None => {
                debug!(sender = %sender_identifier, "Sender phone also invalid or hidden");
            }
        }
    }

    resolution
}
