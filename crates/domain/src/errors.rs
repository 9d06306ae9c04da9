//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A route set must contain at least one route
    #[error("A route set must contain at least one route")]
    EmptyRouteSet,

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
