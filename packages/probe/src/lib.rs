// Trip Probe - Core
//
// Turns free-text trip announcements from intercity transport chat groups into
// validated trip records and submits them to the booking backend.
//
// Business logic lives in domains/, infrastructure seams in kernel/.

pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
