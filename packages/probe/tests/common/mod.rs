// Shared fixtures for probe integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use probe_core::domains::trips::models::{ExtractionResult, RawMessage};

/// Local time in Aden. 2026-10-19 is a Monday.
pub fn aden(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
    chrono_tz::Asia::Aden
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
}

/// Monday morning, well before any cutoff.
pub fn monday_morning() -> DateTime<Tz> {
    aden(2026, 10, 19, 9, 30)
}

pub fn group_message(text: &str) -> RawMessage {
    RawMessage::new(text, "Mohammed Ali")
        .with_sender_identifier("967711222333@s.whatsapp.net")
        .with_group("120363000000@g.us")
        .with_operator("OP_7")
}

/// Extraction for "محمد علي, صنعاء → عدن, بكرة, 770551092".
pub fn sanaa_to_aden_tomorrow() -> ExtractionResult {
    ExtractionResult::trip()
        .with_driver_name("محمد علي")
        .with_route("صنعاء", "عدن")
        .with_date("بكرة")
        .with_phones(["770551092"])
}
