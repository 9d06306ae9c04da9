//! Port adapters over the integration clients

mod account_adapter;
mod directions_adapter;
mod location_adapter;
mod places_adapter;

pub use account_adapter::AccountAdapter;
pub use directions_adapter::DirectionsAdapter;
pub use location_adapter::ConfiguredLocationAdapter;
pub use places_adapter::PlacesAdapter;
