//! Account backend error types

use thiserror::Error;

/// Errors that can occur talking to the account backend
#[derive(Debug, Error)]
pub enum AccountError {
    /// Connection to the backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the backend failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse a backend response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Wrong email/password pair
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration with an email that already has an account
    #[error("Email already in use")]
    EmailInUse,

    /// No account behind the given email
    #[error("User not found")]
    UserNotFound,

    /// Wrong or expired OTP code
    #[error("Invalid OTP")]
    InvalidOtp,

    /// Bearer token missing, expired, or rejected
    #[error("Invalid token")]
    InvalidToken,

    /// Backend rejected the request with its own message
    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl AccountError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RequestFailed(_) | Self::Timeout { .. }
        )
    }
}
