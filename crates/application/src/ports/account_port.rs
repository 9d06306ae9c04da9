//! Account backend port
//!
//! The companion backend (registration, login with email OTP, profile
//! and review CRUD) is an external collaborator consumed through its
//! request/response envelope. This port treats it as opaque
//! authenticated CRUD: login yields a bearer token, authenticated calls
//! consume it.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// An authenticated session as returned by login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token consumed by subsequent calls
    pub token: String,
    /// Account role (0 = admin, 1 = commuter)
    pub role: u8,
}

/// Account fields exposed by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Display name
    pub username: String,
    /// Login email
    pub email: String,
    /// Account role (0 = admin, 1 = commuter)
    pub role: u8,
}

/// Profile fields to change; `None` leaves a field untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New display name
    pub username: Option<String>,
    /// New login email
    pub email: Option<String>,
    /// New password
    pub password: Option<String>,
    /// Current password, required to authorize any change
    pub current_password: String,
}

/// A service review submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    /// What went wrong
    pub issue: String,
    /// What could be better
    pub suggestion: String,
    /// Rating, 1 to 5
    pub rating: u8,
}

/// Port for the account backend
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountPort: Send + Sync {
    /// Create an account; the backend emails an OTP to verify
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApplicationError>;

    /// Exchange credentials for a bearer token
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApplicationError>;

    /// Verify the emailed OTP code
    async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), ApplicationError>;

    /// Request a fresh OTP email
    async fn resend_otp(&self, email: &str) -> Result<(), ApplicationError>;

    /// Fetch the account behind a bearer token
    async fn user_data(&self, token: &str) -> Result<UserAccount, ApplicationError>;

    /// Change profile fields, authorized by the current password
    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<(), ApplicationError>;

    /// Change an account's role (admin feature)
    async fn update_role(&self, email: &str, role: u8) -> Result<(), ApplicationError>;

    /// Submit a service review
    async fn submit_review(
        &self,
        token: &str,
        review: &ReviewSubmission,
    ) -> Result<(), ApplicationError>;

    /// List all accounts (admin feature)
    async fn list_users(&self) -> Result<Vec<UserAccount>, ApplicationError>;
}
