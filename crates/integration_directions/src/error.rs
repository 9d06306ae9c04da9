//! Directions error types

use thiserror::Error;

/// Errors that can occur fetching or normalizing routes
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// Connection to the directions service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the directions service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a response from the directions service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No usable routes between origin and destination
    #[error("No routes found from {from} to {to}")]
    NoRoutesFound {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// An endpoint could not be located by the provider
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Rate limit or query quota exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the API)
        retry_after_secs: Option<u64>,
    },

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

impl DirectionsError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(DirectionsError::ConnectionFailed("reset".to_string()).is_retryable());
        assert!(DirectionsError::RequestFailed("HTTP 502".to_string()).is_retryable());
        assert!(DirectionsError::Timeout { timeout_secs: 15 }.is_retryable());
        assert!(
            DirectionsError::RateLimitExceeded {
                retry_after_secs: Some(30)
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(
            !DirectionsError::NoRoutesFound {
                from: "Manila City Hall".to_string(),
                to: "Quezon City Hall".to_string(),
            }
            .is_retryable()
        );
        assert!(!DirectionsError::InvalidLocation("nowhere".to_string()).is_retryable());
        assert!(!DirectionsError::ParseError("bad json".to_string()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = DirectionsError::NoRoutesFound {
            from: "Manila City Hall".to_string(),
            to: "Quezon City Hall".to_string(),
        };
        assert!(err.to_string().contains("Manila City Hall"));
        assert!(err.to_string().contains("Quezon City Hall"));
    }
}
