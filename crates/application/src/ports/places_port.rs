//! Place resolution port
//!
//! Turns free text or coordinates into resolved places. Backed by an
//! external places/geocoding provider in the infrastructure layer.

use async_trait::async_trait;
use domain::value_objects::{GeoLocation, Place};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// One autocomplete candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    /// Opaque provider identifier, resolvable to a full place
    pub place_id: String,
    /// Human-readable description shown in the suggestion list
    pub description: String,
}

/// Port for place search and resolution
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlacesPort: Send + Sync {
    /// Suggest places for a partial text query
    ///
    /// Candidates without a usable place identifier are dropped before
    /// this returns. An empty candidate set surfaces as
    /// [`ApplicationError::NoResults`].
    async fn autocomplete(&self, query: &str) -> Result<Vec<PlaceSuggestion>, ApplicationError>;

    /// Resolve a suggestion's place id to a full place
    async fn place_details(&self, place_id: &str) -> Result<Place, ApplicationError>;

    /// Resolve coordinates to the nearest addressed place
    async fn reverse_geocode(&self, location: GeoLocation) -> Result<Place, ApplicationError>;
}
