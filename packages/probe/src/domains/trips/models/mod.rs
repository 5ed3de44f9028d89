pub mod extraction;
pub mod message;
pub mod rules;
pub mod trip;

pub use extraction::{Classification, ExtractionResult};
pub use message::RawMessage;
pub use rules::{DateLexicon, DateRules, FastingPeriod, Keyword, NameRules, PhoneRules, TripRules};
pub use trip::{AcceptedTrip, GateStage, NormalizedTrip, Rejection, TripSubmission};
