//! Account session service
//!
//! Holds the bearer token obtained at login and gates the authenticated
//! account operations on it. Nothing is persisted: the session lives for
//! one run and is rebuilt by logging in again.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{AccountPort, AuthSession, ProfileUpdate, ReviewSubmission, UserAccount};

/// Service wrapping the account backend with in-memory session state
pub struct SessionService {
    account: Arc<dyn AccountPort>,
    session: Mutex<Option<AuthSession>>,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}

impl SessionService {
    /// Create a session service over an account port
    #[must_use]
    pub fn new(account: Arc<dyn AccountPort>) -> Self {
        Self {
            account,
            session: Mutex::new(None),
        }
    }

    /// Whether a bearer token is currently held
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.lock().is_some()
    }

    /// Role of the logged-in account, if any
    #[must_use]
    pub fn role(&self) -> Option<u8> {
        self.session.lock().as_ref().map(|s| s.role)
    }

    /// Register a new account; the backend sends the verification OTP
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApplicationError> {
        self.account.register(username, email, password).await
    }

    /// Log in and hold the returned bearer token
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<u8, ApplicationError> {
        let session = self.account.login(email, password).await?;
        let role = session.role;
        debug!(role, "Login succeeded");
        *self.session.lock() = Some(session);
        Ok(role)
    }

    /// Drop the held token; idempotent
    pub fn logout(&self) {
        *self.session.lock() = None;
    }

    /// Verify the emailed OTP code
    #[instrument(skip(self, otp))]
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), ApplicationError> {
        self.account.verify_otp(email, otp).await
    }

    /// Request a fresh OTP email
    #[instrument(skip(self))]
    pub async fn resend_otp(&self, email: &str) -> Result<(), ApplicationError> {
        self.account.resend_otp(email).await
    }

    /// Fetch the logged-in account's data
    #[instrument(skip(self))]
    pub async fn user_data(&self) -> Result<UserAccount, ApplicationError> {
        let token = self.require_token()?;
        self.account.user_data(&token).await
    }

    /// Update the logged-in account's profile
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApplicationError> {
        let token = self.require_token()?;
        self.account.update_profile(&token, update).await
    }

    /// Submit a service review as the logged-in account
    #[instrument(skip(self, review))]
    pub async fn submit_review(&self, review: &ReviewSubmission) -> Result<(), ApplicationError> {
        if !(1..=5).contains(&review.rating) {
            return Err(ApplicationError::Domain(
                domain::DomainError::ValidationError("rating must be 1 to 5".to_string()),
            ));
        }
        let token = self.require_token()?;
        self.account.submit_review(&token, review).await
    }

    /// Change an account's role (admin feature); roles are 0 or 1
    #[instrument(skip(self))]
    pub async fn update_role(&self, email: &str, role: u8) -> Result<(), ApplicationError> {
        if role > 1 {
            return Err(ApplicationError::Domain(
                domain::DomainError::ValidationError("role must be 0 or 1".to_string()),
            ));
        }
        self.account.update_role(email, role).await
    }

    /// List all accounts (admin feature)
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserAccount>, ApplicationError> {
        self.account.list_users().await
    }

    fn require_token(&self) -> Result<String, ApplicationError> {
        self.session
            .lock()
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or_else(|| ApplicationError::NotAuthorized("no active session".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockAccountPort;

    fn session() -> AuthSession {
        AuthSession {
            token: "jwt-token".to_string(),
            role: 1,
        }
    }

    #[tokio::test]
    async fn login_stores_token() {
        let mut mock = MockAccountPort::new();
        mock.expect_login().returning(|_, _| Ok(session()));
        let service = SessionService::new(Arc::new(mock));

        assert!(!service.is_logged_in());
        let role = service.login("a@b.ph", "secret").await.unwrap();
        assert_eq!(role, 1);
        assert!(service.is_logged_in());
        assert_eq!(service.role(), Some(1));
    }

    #[tokio::test]
    async fn logout_drops_token() {
        let mut mock = MockAccountPort::new();
        mock.expect_login().returning(|_, _| Ok(session()));
        let service = SessionService::new(Arc::new(mock));

        service.login("a@b.ph", "secret").await.unwrap();
        service.logout();
        assert!(!service.is_logged_in());
        service.logout(); // idempotent
    }

    #[tokio::test]
    async fn authenticated_call_without_login_is_rejected() {
        let mock = MockAccountPort::new();
        let service = SessionService::new(Arc::new(mock));

        let result = service.user_data().await;
        assert!(matches!(result, Err(ApplicationError::NotAuthorized(_))));
    }

    #[tokio::test]
    async fn user_data_passes_held_token() {
        let mut mock = MockAccountPort::new();
        mock.expect_login().returning(|_, _| Ok(session()));
        mock.expect_user_data()
            .withf(|token| token == "jwt-token")
            .returning(|_| {
                Ok(UserAccount {
                    username: "juan".to_string(),
                    email: "a@b.ph".to_string(),
                    role: 1,
                })
            });
        let service = SessionService::new(Arc::new(mock));

        service.login("a@b.ph", "secret").await.unwrap();
        let account = service.user_data().await.unwrap();
        assert_eq!(account.username, "juan");
    }

    #[tokio::test]
    async fn review_rating_is_validated_client_side() {
        let mock = MockAccountPort::new();
        let service = SessionService::new(Arc::new(mock));

        let review = ReviewSubmission {
            issue: "Late buses".to_string(),
            suggestion: "More trips".to_string(),
            rating: 6,
        };
        let result = service.submit_review(&review).await;
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }

    #[tokio::test]
    async fn role_is_validated_client_side() {
        let mock = MockAccountPort::new();
        let service = SessionService::new(Arc::new(mock));

        let result = service.update_role("a@b.ph", 3).await;
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }

    #[tokio::test]
    async fn login_failure_leaves_session_empty() {
        let mut mock = MockAccountPort::new();
        mock.expect_login().returning(|_, _| {
            Err(ApplicationError::NotAuthorized("Invalid credentials".to_string()))
        });
        let service = SessionService::new(Arc::new(mock));

        let result = service.login("a@b.ph", "wrong").await;
        assert!(result.is_err());
        assert!(!service.is_logged_in());
    }
}
