//! Phone normalization and candidate resolution.

use probe_core::domains::trips::activities::{is_anonymized, normalize_phone, resolve_phone_candidates};
use probe_core::domains::trips::models::PhoneRules;

#[test]
fn strips_country_code() {
    let rules = PhoneRules::default();
    assert_eq!(normalize_phone("967770551092", &rules).as_deref(), Some("770551092"));
}

#[test]
fn double_zero_only_counts_before_country_code() {
    let rules = PhoneRules::default();
    assert_eq!(normalize_phone("00967770551092", &rules).as_deref(), Some("770551092"));
    assert_eq!(normalize_phone("00770551092", &rules), None);
    assert!(resolve_phone_candidates(&["00770551092".to_string()], "", &rules)
        .phones
        .is_empty());
}

#[test]
fn normalization_is_idempotent() {
    let rules = PhoneRules::default();
    for raw in ["967770551092", "+967 733-123-456", "٠٠٩٦٧٧١١٢٢٢٣٣٣", "778899001"] {
        let once = normalize_phone(raw, &rules).unwrap();
        assert_eq!(normalize_phone(&once, &rules), Some(once.clone()), "{}", raw);
    }
}

#[test]
fn rejects_short_and_anonymized() {
    let rules = PhoneRules::default();
    assert_eq!(normalize_phone("123", &rules), None);
    assert_eq!(normalize_phone("210987654321098@lid", &rules), None);
    assert!(is_anonymized("210987654321098@lid", &rules));
    assert!(!is_anonymized("967770551092@s.whatsapp.net", &rules));
}

#[test]
fn every_mobile_prefix_is_accepted() {
    let rules = PhoneRules::default();
    for prefix in ["70", "71", "73", "77", "78"] {
        let phone = format!("{}1234567", prefix);
        assert_eq!(normalize_phone(&phone, &rules), Some(phone.clone()));
    }
    assert_eq!(normalize_phone("761234567", &rules), None);
}

#[test]
fn dedup_keeps_first_occurrence() {
    let rules = PhoneRules::default();
    let candidates: Vec<String> = vec!["770551092".into(), "967770551092".into(), "770551092".into()];

    let resolution = resolve_phone_candidates(&candidates, "", &rules);

    assert_eq!(resolution.phones, vec!["770551092".to_string()]);
    assert!(!resolution.used_sender_fallback);
}

#[test]
fn sender_fallback_is_single_attempt() {
    let rules = PhoneRules::default();

    let resolution = resolve_phone_candidates(&[], "967733123456@s.whatsapp.net", &rules);
    assert_eq!(resolution.phones, vec!["733123456".to_string()]);
    assert!(resolution.used_sender_fallback);

    let none = resolve_phone_candidates(&["12".to_string()], "445566@lid", &rules);
    assert!(none.phones.is_empty());
    assert!(!none.used_sender_fallback);
    assert_eq!(none.ignored, vec!["12".to_string()]);
}
