//! Trip validation gate: ordering, short-circuits and end-to-end verdicts.

mod common;

use common::{aden, group_message, monday_morning, sanaa_to_aden_tomorrow};
use probe_core::domains::trips::activities::validate_trip;
use probe_core::domains::trips::models::{
    Classification, ExtractionResult, GateStage, Rejection, TripRules,
};
use probe_core::kernel::MockExtractionService;

#[tokio::test]
async fn accepts_sanaa_to_aden_tomorrow() {
    let extractor = MockExtractionService::new();
    let rules = TripRules::default();

    let accepted = validate_trip(
        &group_message("محمد علي صنعاء عدن بكرة 770551092"),
        sanaa_to_aden_tomorrow(),
        &monday_morning(),
        &rules,
        &extractor,
    )
    .await
    .unwrap();

    assert_eq!(accepted.trip.driver_name, "محمد علي");
    assert_eq!(accepted.trip.from_city, "صنعاء");
    assert_eq!(accepted.trip.to_city, "عدن");
    assert_eq!(accepted.trip.date, "2026-10-20");
    assert_eq!(accepted.phones, vec!["770551092".to_string()]);
    assert!(!accepted.used_sender_phone);

    // good name needs no refinement call
    assert!(extractor.refine_calls().is_empty());
}

#[tokio::test]
async fn missing_destination_is_rejected() {
    let extractor = MockExtractionService::new();
    let mut extraction = sanaa_to_aden_tomorrow();
    extraction.to_city = None;

    let result = validate_trip(
        &group_message("محمد علي من صنعاء بكرة"),
        extraction,
        &monday_morning(),
        &TripRules::default(),
        &extractor,
    )
    .await;

    assert_eq!(
        result,
        Err(Rejection::MissingCity {
            from: Some("صنعاء".to_string()),
            to: None,
        })
    );
}

#[tokio::test]
async fn non_trip_classifications_always_short_circuit() {
    let rules = TripRules::default();

    for (classification, expected) in [
        (Classification::InvalidAd, Rejection::InvalidAd),
        (Classification::Question, Rejection::Question),
        (Classification::Unknown, Rejection::Unclassified),
    ] {
        let extractor = MockExtractionService::new().with_refined_name(Some("صالح احمد"));
        // every other field would pass
        let extraction = sanaa_to_aden_tomorrow().with_classification(classification);

        let result = validate_trip(
            &group_message("x"),
            extraction,
            &monday_morning(),
            &rules,
            &extractor,
        )
        .await;

        assert_eq!(result, Err(expected));
        assert!(extractor.refine_calls().is_empty());
    }
}

#[tokio::test]
async fn nickname_is_refined_once() {
    let extractor = MockExtractionService::new().with_refined_name(Some("صالح باعلوي"));
    let extraction = sanaa_to_aden_tomorrow().with_driver_name("ابو محمد");

    let accepted = validate_trip(
        &group_message("ابو محمد صنعاء عدن"),
        extraction,
        &monday_morning(),
        &TripRules::default(),
        &extractor,
    )
    .await
    .unwrap();

    assert_eq!(accepted.trip.driver_name, "صالح باعلوي");

    let calls = extractor.refine_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].extracted_name, "ابو محمد");
    assert_eq!(calls[0].sender_name, "Mohammed Ali");
}

#[tokio::test]
async fn failed_refinement_keeps_extracted_name() {
    let extractor = MockExtractionService::new().with_refine_error("model overloaded");
    let extraction = sanaa_to_aden_tomorrow().with_driver_name("ابو محمد");

    let accepted = validate_trip(
        &group_message("x"),
        extraction,
        &monday_morning(),
        &TripRules::default(),
        &extractor,
    )
    .await
    .unwrap();

    assert_eq!(accepted.trip.driver_name, "ابو محمد");
}

#[tokio::test]
async fn no_name_anywhere_is_rejected() {
    let extractor = MockExtractionService::new().with_refined_name(None);
    let mut extraction = sanaa_to_aden_tomorrow();
    extraction.driver_name = None;

    let result = validate_trip(
        &group_message("x"),
        extraction,
        &monday_morning(),
        &TripRules::default(),
        &extractor,
    )
    .await;

    assert_eq!(result, Err(Rejection::NoName));
    assert_eq!(extractor.refine_calls().len(), 1);
    assert_eq!(Rejection::NoName.stage(), GateStage::NameChecked);
}

#[tokio::test]
async fn name_is_checked_before_cities() {
    let extractor = MockExtractionService::new().with_refined_name(None);
    let mut extraction = sanaa_to_aden_tomorrow();
    extraction.driver_name = None;
    extraction.to_city = None;

    let rejection = validate_trip(
        &group_message("x"),
        extraction,
        &monday_morning(),
        &TripRules::default(),
        &extractor,
    )
    .await
    .unwrap_err();

    assert_eq!(rejection, Rejection::NoName);
    assert_eq!(rejection.stage(), GateStage::NameChecked);
}

#[tokio::test]
async fn default_origin_fills_missing_from_city() {
    let extractor = MockExtractionService::new();
    let mut extraction = sanaa_to_aden_tomorrow();
    extraction.from_city = None;

    let message = group_message("باص الى عدن").with_default_origin("سيئون");
    let accepted = validate_trip(
        &message,
        extraction,
        &monday_morning(),
        &TripRules::default(),
        &extractor,
    )
    .await
    .unwrap();

    assert_eq!(accepted.trip.from_city, "سيئون");
    assert_eq!(accepted.trip.to_city, "عدن");
}

#[tokio::test]
async fn default_origin_never_overrides_extracted_city() {
    let extractor = MockExtractionService::new();
    let message = group_message("x").with_default_origin("سيئون");

    let accepted = validate_trip(
        &message,
        sanaa_to_aden_tomorrow(),
        &monday_morning(),
        &TripRules::default(),
        &extractor,
    )
    .await
    .unwrap();

    assert_eq!(accepted.trip.from_city, "صنعاء");
}

#[tokio::test]
async fn unofficial_city_is_rejected() {
    let extractor = MockExtractionService::new();
    let extraction = sanaa_to_aden_tomorrow().with_to_city("الرياض");

    let result = validate_trip(
        &group_message("x"),
        extraction,
        &monday_morning(),
        &TripRules::default(),
        &extractor,
    )
    .await;

    assert_eq!(
        result,
        Err(Rejection::InvalidCity {
            from: "صنعاء".to_string(),
            to: "الرياض".to_string(),
        })
    );
}

#[tokio::test]
async fn sender_phone_is_the_last_resort() {
    let extractor = MockExtractionService::new();
    let extraction = sanaa_to_aden_tomorrow().with_phones(["0501234567"]);

    let accepted = validate_trip(
        &group_message("x"),
        extraction,
        &monday_morning(),
        &TripRules::default(),
        &extractor,
    )
    .await
    .unwrap();

    assert_eq!(accepted.phones, vec!["711222333".to_string()]);
    assert!(accepted.used_sender_phone);
    // raw candidates are kept as extracted
    assert_eq!(accepted.trip.candidate_phones, vec!["0501234567".to_string()]);
}

#[tokio::test]
async fn hidden_sender_and_no_phone_is_rejected() {
    let extractor = MockExtractionService::new();
    let extraction = sanaa_to_aden_tomorrow().with_phones(Vec::<String>::new());
    let message = group_message("x").with_sender_identifier("210987654321098@lid");

    let result = validate_trip(
        &message,
        extraction,
        &monday_morning(),
        &TripRules::default(),
        &extractor,
    )
    .await;

    assert_eq!(result, Err(Rejection::NoPhone));
}

#[tokio::test]
async fn missing_city_wins_over_missing_phone() {
    let extractor = MockExtractionService::new();
    let extraction = ExtractionResult::trip()
        .with_driver_name("محمد علي")
        .with_from_city("عدن");
    let message = group_message("x").with_sender_identifier("");

    let result = validate_trip(
        &message,
        extraction,
        &monday_morning(),
        &TripRules::default(),
        &extractor,
    )
    .await;

    assert_eq!(result.unwrap_err().reason(), "missing_city");
}

#[tokio::test]
async fn undated_late_post_is_for_tomorrow() {
    let extractor = MockExtractionService::new();
    let mut extraction = sanaa_to_aden_tomorrow();
    extraction.date = None;

    let accepted = validate_trip(
        &group_message("x"),
        extraction,
        &aden(2026, 10, 19, 22, 15),
        &TripRules::default(),
        &extractor,
    )
    .await
    .unwrap();

    assert_eq!(accepted.trip.date, "2026-10-20");
}
