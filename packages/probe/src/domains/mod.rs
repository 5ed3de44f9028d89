// Business domains
pub mod inbound;
pub mod routing;
pub mod trips;
