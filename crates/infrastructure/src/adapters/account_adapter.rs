//! Account adapter - Implements AccountPort using integration_account

use application::error::ApplicationError;
use application::ports::{AccountPort, AuthSession, ProfileUpdate, ReviewSubmission, UserAccount};
use async_trait::async_trait;
use domain::DomainError;
use integration_account::{AccountClient, AccountError, AccountUser, BackendAccountClient};
use tracing::instrument;

/// Adapter for the companion account backend
pub struct AccountAdapter {
    client: BackendAccountClient,
}

impl std::fmt::Debug for AccountAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountAdapter")
            .field("client", &"BackendAccountClient")
            .finish()
    }
}

impl AccountAdapter {
    /// Create a new account adapter
    #[must_use]
    pub const fn new(client: BackendAccountClient) -> Self {
        Self { client }
    }

    /// Map a backend error to the application taxonomy
    ///
    /// Transport failures become retryable external-service errors;
    /// credential and token rejections become authorization failures; the
    /// remaining rejections are user-correctable validation outcomes.
    fn map_error(error: AccountError) -> ApplicationError {
        match error {
            AccountError::InvalidCredentials | AccountError::InvalidToken => {
                ApplicationError::NotAuthorized(error.to_string())
            }
            AccountError::EmailInUse
            | AccountError::UserNotFound
            | AccountError::InvalidOtp
            | AccountError::Rejected(_) => {
                ApplicationError::Domain(DomainError::ValidationError(error.to_string()))
            }
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }

    fn convert_user(user: AccountUser) -> UserAccount {
        UserAccount {
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

#[async_trait]
impl AccountPort for AccountAdapter {
    #[instrument(skip(self, password))]
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApplicationError> {
        self.client
            .register(username, email, password)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApplicationError> {
        let outcome = self
            .client
            .login(email, password)
            .await
            .map_err(Self::map_error)?;
        Ok(AuthSession {
            token: outcome.token,
            role: outcome.role,
        })
    }

    #[instrument(skip(self, otp))]
    async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), ApplicationError> {
        self.client
            .verify_otp(email, otp)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn resend_otp(&self, email: &str) -> Result<(), ApplicationError> {
        self.client.resend_otp(email).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, token))]
    async fn user_data(&self, token: &str) -> Result<UserAccount, ApplicationError> {
        let user = self.client.user_data(token).await.map_err(Self::map_error)?;
        Ok(Self::convert_user(user))
    }

    #[instrument(skip(self, token, update))]
    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<(), ApplicationError> {
        self.client
            .update_profile(
                token,
                update.username.as_deref(),
                update.email.as_deref(),
                update.password.as_deref(),
                &update.current_password,
            )
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn update_role(&self, email: &str, role: u8) -> Result<(), ApplicationError> {
        self.client
            .update_role(email, role)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, token, review))]
    async fn submit_review(
        &self,
        token: &str,
        review: &ReviewSubmission,
    ) -> Result<(), ApplicationError> {
        self.client
            .submit_review(token, &review.issue, &review.suggestion, review.rating)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserAccount>, ApplicationError> {
        let users = self.client.list_users().await.map_err(Self::map_error)?;
        Ok(users.into_iter().map(Self::convert_user).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_map_to_not_authorized() {
        let err = AccountAdapter::map_error(AccountError::InvalidCredentials);
        assert!(matches!(err, ApplicationError::NotAuthorized(_)));

        let err = AccountAdapter::map_error(AccountError::InvalidToken);
        assert!(matches!(err, ApplicationError::NotAuthorized(_)));
    }

    #[test]
    fn user_correctable_rejections_map_to_validation() {
        for error in [
            AccountError::EmailInUse,
            AccountError::UserNotFound,
            AccountError::InvalidOtp,
            AccountError::Rejected("All fields are required".to_string()),
        ] {
            let err = AccountAdapter::map_error(error);
            assert!(matches!(err, ApplicationError::Domain(_)));
        }
    }

    #[test]
    fn transport_failures_stay_retryable() {
        let err = AccountAdapter::map_error(AccountError::Timeout { timeout_secs: 10 });
        assert!(matches!(err, ApplicationError::ExternalService(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn user_conversion_keeps_fields() {
        let account = AccountAdapter::convert_user(AccountUser {
            username: "juan".to_string(),
            email: "juan@b.ph".to_string(),
            role: 0,
        });
        assert_eq!(account.username, "juan");
        assert_eq!(account.role, 0);
    }
}
