//! Trips domain activities - the pipeline stages
//!
//! Pure stages (phone, dates, cities) take rules and return values.
//! Stages that call out (names, submit) take the infrastructure trait they need.

pub mod cities;
pub mod dates;
pub mod names;
pub mod phone;
pub mod submit;
pub mod validate;

pub use cities::check_cities;
pub use dates::{default_date, resolve_date, DateSource, ResolvedDate};
pub use names::{is_acceptable_name, refine_driver_name};
pub use phone::{is_anonymized, normalize_phone, resolve_phone_candidates, PhoneResolution};
pub use submit::{submit_trip, SubmissionOutcome};
pub use validate::validate_trip;
