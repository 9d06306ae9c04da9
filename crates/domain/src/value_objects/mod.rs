//! Value Objects - Immutable, identity-less domain primitives

mod drag_panel;
mod fare;
mod geo_location;
mod place;

pub use drag_panel::{DragPanel, InvalidPanelBounds};
pub use fare::{DEFAULT_RATE_PER_KM, FareSchedule, estimate};
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use place::Place;
