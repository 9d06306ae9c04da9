//! Application-level errors
//!
//! Every upstream failure is converted into one of these kinds at the
//! component boundary; no raw transport error reaches a caller. Each
//! recoverable kind maps to a one-line notice via [`ApplicationError::user_notice`].

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A place search produced no candidates
    #[error("No matching places found")]
    NoResults,

    /// A place or address lookup failed
    #[error("Place resolution failed: {detail}")]
    ResolutionFailed {
        /// True when the place simply does not exist upstream, false for
        /// transport/service failures; the UI may collapse both, the code
        /// keeps them apart
        not_found: bool,
        /// Upstream detail
        detail: String,
    },

    /// The directions provider returned zero usable routes
    #[error("No available routes found")]
    NoRoutesFound,

    /// Route fetch attempted without both endpoints resolved
    #[error("Both a starting point and a destination are required")]
    MissingEndpoints,

    /// Route selection outside the fetched set; a programming error,
    /// guarded in the UI by only offering selectable rows
    #[error("Route index {index} is out of range (route set has {len} routes)")]
    SelectionOutOfRange {
        /// The offending index
        index: usize,
        /// Number of routes in the set
        len: usize,
    },

    /// Device position unavailable (permission denied or sensor failure)
    #[error("Device location unavailable: {0}")]
    LocationUnavailable(String),

    /// Operation requires a logged-in session
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if retrying the same operation may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ExternalService(_)
                | Self::LocationUnavailable(_)
                | Self::ResolutionFailed {
                    not_found: false,
                    ..
                }
        )
    }

    /// One-line human-readable notice for recoverable failures
    ///
    /// The app never drops a user action silently; this is the line shown
    /// for it.
    #[must_use]
    pub fn user_notice(&self) -> String {
        match self {
            Self::NoResults => "No matching places found. Try a different search.".to_string(),
            Self::ResolutionFailed { .. } => {
                "Could not retrieve location details. Please try again.".to_string()
            }
            Self::NoRoutesFound => "No available routes found.".to_string(),
            Self::MissingEndpoints => {
                "Please select a source and destination.".to_string()
            }
            Self::LocationUnavailable(_) => {
                "Location permission is required to use this feature.".to_string()
            }
            Self::NotAuthorized(_) => "Please log in first.".to_string(),
            Self::ExternalService(_) => {
                "Service is temporarily unavailable. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}
