//! Directions port
//!
//! Fetches ranked multi-modal route alternatives between two resolved
//! places. The adapter normalizes the provider payload into the domain
//! [`RouteSet`] before it crosses this boundary.

use async_trait::async_trait;
use domain::entities::RouteSet;
use domain::value_objects::Place;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for commute route queries
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectionsPort: Send + Sync {
    /// Fetch the ranked route alternatives for one origin/destination pair
    ///
    /// The returned set preserves the provider's ranking. Zero usable
    /// routes surface as [`ApplicationError::NoRoutesFound`].
    async fn route_alternatives(
        &self,
        origin: &Place,
        destination: &Place,
    ) -> Result<RouteSet, ApplicationError>;

    /// Check if the directions service is reachable
    async fn is_available(&self) -> bool;
}
