//! Application services

pub mod place_search;
pub mod polyline;
pub mod session;
pub mod trip_planner;

pub use place_search::{PlaceSearchConfig, PlaceSearchService, SuggestOutcome};
pub use session::SessionService;
pub use trip_planner::{FetchOutcome, TripPlannerService};
