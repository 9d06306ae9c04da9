//! Places adapter - Implements PlacesPort using integration_places

use application::error::ApplicationError;
use application::ports::{PlaceSuggestion, PlacesPort};
use async_trait::async_trait;
use domain::value_objects::{GeoLocation, Place};
use integration_places::{GooglePlacesClient, PlacePrediction, PlacesClient, PlacesError};
use tracing::{instrument, warn};

/// Adapter for place resolution using the Google-backed places client
pub struct PlacesAdapter {
    client: GooglePlacesClient,
}

impl std::fmt::Debug for PlacesAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesAdapter")
            .field("client", &"GooglePlacesClient")
            .finish()
    }
}

impl PlacesAdapter {
    /// Create a new places adapter
    #[must_use]
    pub const fn new(client: GooglePlacesClient) -> Self {
        Self { client }
    }

    /// Map an autocomplete error to the application taxonomy
    fn map_autocomplete_error(error: &PlacesError) -> ApplicationError {
        match error {
            PlacesError::NoResults(_) => ApplicationError::NoResults,
            other => Self::map_resolution_error(other),
        }
    }

    /// Map a resolution error, keeping the not-found distinction
    fn map_resolution_error(error: &PlacesError) -> ApplicationError {
        ApplicationError::ResolutionFailed {
            not_found: error.is_not_found(),
            detail: error.to_string(),
        }
    }

    fn convert_prediction(prediction: PlacePrediction) -> PlaceSuggestion {
        PlaceSuggestion {
            place_id: prediction.place_id,
            description: prediction.description,
        }
    }
}

#[async_trait]
impl PlacesPort for PlacesAdapter {
    #[instrument(skip(self))]
    async fn autocomplete(&self, query: &str) -> Result<Vec<PlaceSuggestion>, ApplicationError> {
        let predictions = self
            .client
            .autocomplete(query)
            .await
            .map_err(|e| Self::map_autocomplete_error(&e))?;

        Ok(predictions
            .into_iter()
            .map(Self::convert_prediction)
            .collect())
    }

    #[instrument(skip(self))]
    async fn place_details(&self, place_id: &str) -> Result<Place, ApplicationError> {
        self.client.place_details(place_id).await.map_err(|e| {
            warn!(%place_id, error = %e, "Place resolution failed");
            Self::map_resolution_error(&e)
        })
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(&self, location: GeoLocation) -> Result<Place, ApplicationError> {
        let address = self
            .client
            .reverse_geocode(location.latitude(), location.longitude())
            .await
            .map_err(|e| {
                warn!(%location, error = %e, "Reverse geocode failed");
                Self::map_resolution_error(&e)
            })?;

        Ok(Place::pinned(location, address))
    }
}
