//! Trip validation gate.
//!
//! Takes one message and the extraction service's answer for it and decides
//! whether a trip can be submitted. Stages run in a fixed order:
//!
//! 1. classification (anything but `trip` short-circuits)
//! 2. driver name refinement
//! 3. default origin from the group's routing
//! 4. date resolution (never fails)
//! 5. name check, rejecting when no name at all survived refinement
//! 6. city presence, then allow-list membership
//! 7. phone candidates, with the sender fallback

use chrono::DateTime;
use chrono_tz::Tz;
use tracing::{debug, info};

use super::cities::check_cities;
use super::dates::resolve_date;
use super::names::refine_driver_name;
use super::phone::resolve_phone_candidates;
use crate::domains::trips::models::{
    AcceptedTrip, Classification, ExtractionResult, GateStage, NormalizedTrip, RawMessage,
    Rejection, TripRules,
};
use crate::kernel::BaseExtractionService;

/// Run the gate. Never panics or errors on malformed extraction input; every
/// failure is a [`Rejection`].
pub async fn validate_trip(
    message: &RawMessage,
    extraction: ExtractionResult,
    now: &DateTime<Tz>,
    rules: &TripRules,
    extractor: &dyn BaseExtractionService,
) -> Result<AcceptedTrip, Rejection> {
    trace_stage(GateStage::Received);

    match extraction.classification {
        Classification::Trip => {}
        Classification::InvalidAd => return Err(Rejection::InvalidAd),
        Classification::Question => return Err(Rejection::Question),
        Classification::Unknown => return Err(Rejection::Unclassified),
    }
    trace_stage(GateStage::Classified);

    let driver_name = refine_driver_name(
        extraction.driver_name.as_deref(),
        &message.sender_display_name,
        &rules.names,
        extractor,
    )
    .await;
    trace_stage(GateStage::NameResolved);

    let mut from_city = extraction.from_city.filter(|c| !c.trim().is_empty());
    if from_city.is_none() {
        if let Some(default_origin) = &message.default_origin_city {
            info!(origin = %default_origin, "Applying default origin");
            from_city = Some(default_origin.clone());
        }
    }
    trace_stage(GateStage::OriginDefaulted);

    let resolved = resolve_date(extraction.date.as_deref(), now, &rules.dates);
    debug!(date = %resolved.iso(), source = ?resolved.source, "Date resolved");
    trace_stage(GateStage::DateResolved);

    let driver_name = driver_name.ok_or(Rejection::NoName)?;
    trace_stage(GateStage::NameChecked);

    let (from_city, to_city) =
        check_cities(from_city.as_deref(), extraction.to_city.as_deref(), rules)?;
    trace_stage(GateStage::CitiesChecked);

    let phones = resolve_phone_candidates(
        &extraction.candidate_phones,
        &message.sender_identifier,
        &rules.phone,
    );
    if phones.phones.is_empty() {
        return Err(Rejection::NoPhone);
    }
    trace_stage(GateStage::PhonesResolved);

    Ok(AcceptedTrip {
        trip: NormalizedTrip {
            classification: Classification::Trip,
            driver_name,
            candidate_phones: extraction.candidate_phones,
            from_city,
            to_city,
            date: resolved.iso(),
            time: extraction.time,
            vehicle_raw: extraction.vehicle_raw,
            price: extraction.price,
        },
        phones: phones.phones,
        used_sender_phone: phones.used_sender_fallback,
    })
}

fn trace_stage(stage: GateStage) {
    tracing::trace!(stage = stage.as_str(), "Trip gate stage passed");
}
