//! Resolved place value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::GeoLocation;

/// A resolved place: coordinates plus the provider's display name and address
///
/// Produced by place resolution (autocomplete pick, reverse geocode, map tap).
/// Immutable once created; a re-resolution replaces the whole value. The trip
/// planner keeps two independent instances, origin and destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Where the place is
    pub location: GeoLocation,
    /// Display name (e.g., "Manila City Hall")
    pub name: String,
    /// Formatted street address
    pub address: String,
}

impl Place {
    /// Create a new place
    #[must_use]
    pub fn new(location: GeoLocation, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            location,
            name: name.into(),
            address: address.into(),
        }
    }

    /// Place for the device's own position, named accordingly
    #[must_use]
    pub fn my_location(location: GeoLocation, address: impl Into<String>) -> Self {
        Self::new(location, "My Location", address)
    }

    /// Place dropped by tapping the map
    #[must_use]
    pub fn pinned(location: GeoLocation, address: impl Into<String>) -> Self {
        Self::new(location, "Pinned Location", address)
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}
