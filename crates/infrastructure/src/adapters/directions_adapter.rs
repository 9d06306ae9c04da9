//! Directions adapter - Implements DirectionsPort using integration_directions

use application::error::ApplicationError;
use application::ports::DirectionsPort;
use async_trait::async_trait;
use domain::entities::RouteSet;
use domain::value_objects::Place;
use integration_directions::{DirectionsClient, DirectionsError, GoogleDirectionsClient};
use tracing::{instrument, warn};

/// Adapter for route queries using the Google-backed directions client
pub struct DirectionsAdapter {
    client: GoogleDirectionsClient,
}

impl std::fmt::Debug for DirectionsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionsAdapter")
            .field("client", &"GoogleDirectionsClient")
            .finish()
    }
}

impl DirectionsAdapter {
    /// Create a new directions adapter
    #[must_use]
    pub const fn new(client: GoogleDirectionsClient) -> Self {
        Self { client }
    }

    /// Map a directions error to the application taxonomy
    fn map_error(error: &DirectionsError) -> ApplicationError {
        match error {
            DirectionsError::NoRoutesFound { .. } => ApplicationError::NoRoutesFound,
            DirectionsError::InvalidLocation(detail) => ApplicationError::ResolutionFailed {
                not_found: true,
                detail: detail.clone(),
            },
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }
}

#[async_trait]
impl DirectionsPort for DirectionsAdapter {
    #[instrument(skip(self, origin, destination))]
    async fn route_alternatives(
        &self,
        origin: &Place,
        destination: &Place,
    ) -> Result<RouteSet, ApplicationError> {
        self.client
            .route_alternatives(origin, destination)
            .await
            .map_err(|e| {
                warn!(error = %e, "Route fetch failed");
                Self::map_error(&e)
            })
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_routes_maps_to_no_routes_found() {
        let err = DirectionsAdapter::map_error(&DirectionsError::NoRoutesFound {
            from: "Manila City Hall".to_string(),
            to: "Quezon City Hall".to_string(),
        });
        assert!(matches!(err, ApplicationError::NoRoutesFound));
        assert_eq!(err.user_notice(), "No available routes found.");
    }

    #[test]
    fn invalid_location_maps_to_not_found_resolution() {
        let err =
            DirectionsAdapter::map_error(&DirectionsError::InvalidLocation("nowhere".to_string()));
        assert!(matches!(
            err,
            ApplicationError::ResolutionFailed { not_found: true, .. }
        ));
    }

    #[test]
    fn transport_failure_maps_to_external_service() {
        let err = DirectionsAdapter::map_error(&DirectionsError::Timeout { timeout_secs: 15 });
        assert!(matches!(err, ApplicationError::ExternalService(_)));
        assert!(err.is_retryable());
    }
}
