// ProbeKernel - the message pipeline with its dependencies
//
// Holds the extraction service and trip backend behind traits so the whole
// pipeline runs against mocks in tests.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{BaseExtractionService, BaseTripBackend};
use crate::domains::inbound::{prefilter, InboundMessage, SkipReason};
use crate::domains::routing::RoutingTable;
use crate::domains::trips::activities::{submit_trip, validate_trip, SubmissionOutcome};
use crate::domains::trips::models::{RawMessage, Rejection, TripRules};
use crate::domains::trips::prompts::format_extract_prompt;

/// What happened to one message. Every variant is terminal; nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageOutcome {
    /// Dropped by the inbound filter before any external call.
    Skipped(SkipReason),
    /// Extraction failed or returned something that is not a trip object.
    Unextractable(String),
    /// A business rule rejected the message.
    Rejected(Rejection),
    /// The trip reached the backend submission loop.
    Processed(SubmissionOutcome),
}

impl MessageOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skipped(_) => "skipped",
            Self::Unextractable(_) => "unextractable",
            Self::Rejected(_) => "rejected",
            Self::Processed(outcome) if outcome.is_created() => "created",
            Self::Processed(_) => "not_created",
        }
    }
}

pub struct ProbeKernel {
    pub extractor: Arc<dyn BaseExtractionService>,
    pub backend: Arc<dyn BaseTripBackend>,
    pub rules: TripRules,
}

impl ProbeKernel {
    pub fn new(
        extractor: Arc<dyn BaseExtractionService>,
        backend: Arc<dyn BaseTripBackend>,
        rules: TripRules,
    ) -> Self {
        Self {
            extractor,
            backend,
            rules,
        }
    }

    /// Current wall-clock time in the operating timezone.
    pub fn local_now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.rules.dates.timezone)
    }

    /// Filter, route and process one transport message.
    pub async fn handle_inbound(
        &self,
        message: &InboundMessage,
        routing: &RoutingTable,
    ) -> MessageOutcome {
        match prefilter(message, routing) {
            Ok(raw) => self.handle_message(raw).await,
            Err(reason) => {
                tracing::debug!(chat_id = %message.chat_id, reason = reason.as_str(), "Message skipped");
                MessageOutcome::Skipped(reason)
            }
        }
    }

    /// Run the full pipeline for one message. Never fails; every error is
    /// contained in the returned outcome.
    pub async fn handle_message(&self, message: RawMessage) -> MessageOutcome {
        let now = self.local_now();
        self.handle_message_at(message, now).await
    }

    /// [`handle_message`](Self::handle_message) with an explicit clock.
    #[instrument(skip(self, message, now), fields(group = %message.group_identifier, operator = %message.routed_operator_id))]
    pub async fn handle_message_at(&self, message: RawMessage, now: DateTime<Tz>) -> MessageOutcome {
        let prompt = format_extract_prompt(
            &message.text,
            &message.sender_display_name,
            &now,
            &self.rules,
        );

        let extraction = match self.extractor.extract_trip(&prompt).await {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!(error = %e, "Extraction failed, dropping message");
                return MessageOutcome::Unextractable(format!("{:#}", e));
            }
        };

        let accepted = match validate_trip(
            &message,
            extraction,
            &now,
            &self.rules,
            self.extractor.as_ref(),
        )
        .await
        {
            Ok(accepted) => accepted,
            Err(rejection) => {
                info!(
                    reason = rejection.reason(),
                    stage = rejection.stage().as_str(),
                    detail = %rejection,
                    "Trip rejected"
                );
                return MessageOutcome::Rejected(rejection);
            }
        };

        info!(
            driver = %accepted.trip.driver_name,
            from = %accepted.trip.from_city,
            to = %accepted.trip.to_city,
            date = %accepted.trip.date,
            phones = ?accepted.phones,
            used_sender_phone = accepted.used_sender_phone,
            "Trip validated"
        );

        let outcome = submit_trip(&accepted, &message, self.backend.as_ref()).await;
        MessageOutcome::Processed(outcome)
    }
}
