pub mod table;

pub use table::{Route, RouteEntry, RoutingTable, GENERAL_OPERATOR_ID};
