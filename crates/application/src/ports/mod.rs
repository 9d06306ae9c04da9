//! Port definitions
//!
//! Async trait boundaries between the application layer and the outside
//! world. Infrastructure adapters implement these over the integration
//! clients; tests implement them with mocks.

mod account_port;
mod device_location_port;
mod directions_port;
mod places_port;

pub use account_port::{AccountPort, AuthSession, ProfileUpdate, ReviewSubmission, UserAccount};
pub use device_location_port::DeviceLocationPort;
pub use directions_port::DirectionsPort;
pub use places_port::{PlaceSuggestion, PlacesPort};

#[cfg(test)]
pub use account_port::MockAccountPort;
#[cfg(test)]
pub use device_location_port::MockDeviceLocationPort;
#[cfg(test)]
pub use directions_port::MockDirectionsPort;
#[cfg(test)]
pub use places_port::MockPlacesPort;
