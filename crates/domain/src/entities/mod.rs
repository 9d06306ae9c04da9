//! Domain entities - Normalized routes and the selection flow state

mod route;
mod route_set;
mod selection;

pub use route::{Route, RouteStep, TransitDetail};
pub use route_set::RouteSet;
pub use selection::SelectionState;
