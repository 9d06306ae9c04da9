//! Places error types

use thiserror::Error;

/// Errors that can occur during place resolution
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Connection to the places service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the places service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a response from the places service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The query produced no candidates
    #[error("No places found for query: {0}")]
    NoResults(String),

    /// The place id or coordinates resolve to nothing upstream
    ///
    /// Kept apart from the transport failures so callers can tell "does
    /// not exist" from "could not reach the service".
    #[error("Place not found: {0}")]
    NotFound(String),

    /// Rate limit or query quota exceeded
    #[error("Query limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl PlacesError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded
        )
    }

    /// Returns true when the place simply does not exist upstream
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NoResults(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(PlacesError::ConnectionFailed("reset".to_string()).is_retryable());
        assert!(PlacesError::RequestFailed("HTTP 500".to_string()).is_retryable());
        assert!(PlacesError::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(PlacesError::RateLimitExceeded.is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!PlacesError::NotFound("ChIJxyz".to_string()).is_retryable());
        assert!(!PlacesError::NoResults("zzz".to_string()).is_retryable());
        assert!(!PlacesError::ParseError("bad json".to_string()).is_retryable());
        assert!(!PlacesError::ConfigurationError("no key".to_string()).is_retryable());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(PlacesError::NotFound("ChIJxyz".to_string()).is_not_found());
        assert!(PlacesError::NoResults("zzz".to_string()).is_not_found());
        assert!(!PlacesError::ConnectionFailed("reset".to_string()).is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = PlacesError::NotFound("ChIJxyz".to_string());
        assert!(err.to_string().contains("ChIJxyz"));

        let err = PlacesError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));
    }
}
