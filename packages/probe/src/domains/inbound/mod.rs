pub mod filter;

pub use filter::{prefilter, InboundMessage, SkipReason};
