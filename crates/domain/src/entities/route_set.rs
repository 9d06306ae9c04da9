//! Ranked set of alternative routes

use serde::{Deserialize, Serialize};

use super::Route;
use crate::errors::DomainError;

/// Stroke colors by rank: best route, runner-up, everything after
const RANK_COLORS: [&str; 3] = ["#00DF82", "#FFA500", "#FF4500"];

/// The alternative routes for one origin/destination query
///
/// Order is the provider's ranking (first = default/fastest) and is never
/// re-sorted. A successful query always yields at least one route, which
/// the constructor enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    /// Create a route set, rejecting an empty list
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyRouteSet` when `routes` is empty.
    pub fn new(routes: Vec<Route>) -> Result<Self, DomainError> {
        if routes.is_empty() {
            return Err(DomainError::EmptyRouteSet);
        }
        Ok(Self { routes })
    }

    /// All routes in provider rank order
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route at `index`, if in range
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    /// Number of alternatives
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always false by construction; present for slice-like ergonomics
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Polyline stroke color for a route rank (capped palette: 0, 1, ≥2)
    #[must_use]
    pub const fn rank_color(index: usize) -> &'static str {
        match index {
            0 => RANK_COLORS[0],
            1 => RANK_COLORS[1],
            _ => RANK_COLORS[2],
        }
    }
}
