//! Account backend client
//!
//! Talks to the companion backend's JSON endpoints. Replies arrive in a
//! loose `{status, data}` / `{message}` envelope with the interesting
//! detail sometimes in `data`, sometimes in `message`, sometimes in
//! `error`; rejection classification lives in one place here so every
//! endpoint surfaces the same typed errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use crate::config::AccountConfig;
use crate::error::AccountError;

/// A successful login: the bearer token plus the account role
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginOutcome {
    /// Bearer token for subsequent calls
    pub token: String,
    /// Account role (0 = admin, 1 = commuter)
    pub role: u8,
}

/// Account fields as the backend reports them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUser {
    /// Display name
    pub username: String,
    /// Login email
    pub email: String,
    /// Account role (0 = admin, 1 = commuter)
    #[serde(default = "default_role")]
    pub role: u8,
}

const fn default_role() -> u8 {
    1
}

/// Trait for account backend clients
#[async_trait]
pub trait AccountClient: Send + Sync {
    /// Create an account; the backend emails an OTP for verification
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AccountError>;

    /// Exchange credentials for a bearer token
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AccountError>;

    /// Verify the emailed OTP code
    async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), AccountError>;

    /// Request a fresh OTP email
    async fn resend_otp(&self, email: &str) -> Result<(), AccountError>;

    /// Fetch the account behind a bearer token
    async fn user_data(&self, token: &str) -> Result<AccountUser, AccountError>;

    /// Update profile fields, authorized by the current password
    async fn update_profile(
        &self,
        token: &str,
        username: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
        current_password: &str,
    ) -> Result<(), AccountError>;

    /// Change an account's role (admin feature)
    async fn update_role(&self, email: &str, role: u8) -> Result<(), AccountError>;

    /// Submit a service review
    async fn submit_review(
        &self,
        token: &str,
        issue: &str,
        suggestion: &str,
        rating: u8,
    ) -> Result<(), AccountError>;

    /// List all accounts (admin feature)
    async fn list_users(&self) -> Result<Vec<AccountUser>, AccountError>;
}

/// HTTP client for the companion account backend
#[derive(Debug)]
pub struct BackendAccountClient {
    client: Client,
    config: AccountConfig,
}

impl BackendAccountClient {
    /// Create a new account backend client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &AccountConfig) -> Result<Self, AccountError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("komyut/0.2")
            .build()
            .map_err(|e| AccountError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url)
    }

    /// Send a request, returning HTTP status and body with transport
    /// failures already typed
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, String), AccountError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AccountError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                AccountError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AccountError::ParseError(e.to_string()))?;
        Ok((status, body))
    }

    /// Map a non-success reply to a typed rejection
    fn classify_rejection(status: StatusCode, body: &str) -> AccountError {
        if status.is_server_error() {
            return AccountError::RequestFailed(format!("HTTP {status}"));
        }

        let detail = serde_json::from_str::<RawEnvelope>(body)
            .ok()
            .and_then(|env| {
                env.message
                    .or(env.error)
                    .or_else(|| env.data.and_then(|d| d.as_str().map(str::to_string)))
            })
            .unwrap_or_default();

        let lowered = detail.to_lowercase();
        if lowered.contains("invalid credentials") {
            AccountError::InvalidCredentials
        } else if lowered.contains("already in use") {
            AccountError::EmailInUse
        } else if lowered.contains("doesn't exist") || lowered.contains("not found") {
            AccountError::UserNotFound
        } else if lowered.contains("invalid otp") {
            AccountError::InvalidOtp
        } else if lowered.contains("invalid token") || status == StatusCode::UNAUTHORIZED {
            AccountError::InvalidToken
        } else if detail.is_empty() {
            AccountError::RequestFailed(format!("HTTP {status}"))
        } else {
            AccountError::Rejected(detail)
        }
    }
}

#[async_trait]
impl AccountClient for BackendAccountClient {
    #[instrument(skip(self, password))]
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AccountError> {
        let body = json!({ "username": username, "email": email, "password": password });
        let (status, reply) = self
            .send(self.client.post(self.url("/register")).json(&body))
            .await?;

        if !status.is_success() {
            return Err(Self::classify_rejection(status, &reply));
        }
        debug!(%email, "Account registered, OTP dispatched");
        Ok(())
    }

    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AccountError> {
        let body = json!({ "email": email, "password": password });
        let (status, reply) = self
            .send(self.client.post(self.url("/login")).json(&body))
            .await?;

        if !status.is_success() {
            return Err(Self::classify_rejection(status, &reply));
        }

        let envelope: RawDataEnvelope<LoginOutcome> =
            serde_json::from_str(&reply).map_err(|e| AccountError::ParseError(e.to_string()))?;
        debug!(%email, role = envelope.data.role, "Login succeeded");
        Ok(envelope.data)
    }

    #[instrument(skip(self, otp))]
    async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), AccountError> {
        let body = json!({ "email": email, "otp": otp });
        let (status, reply) = self
            .send(self.client.post(self.url("/verify-otp")).json(&body))
            .await?;

        if !status.is_success() {
            return Err(Self::classify_rejection(status, &reply));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn resend_otp(&self, email: &str) -> Result<(), AccountError> {
        let body = json!({ "email": email });
        let (status, reply) = self
            .send(self.client.post(self.url("/resend-otp")).json(&body))
            .await?;

        if !status.is_success() {
            return Err(Self::classify_rejection(status, &reply));
        }
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn user_data(&self, token: &str) -> Result<AccountUser, AccountError> {
        // the backend reads the token from the request body on this route
        let body = json!({ "token": token });
        let (status, reply) = self
            .send(self.client.post(self.url("/userdata")).json(&body))
            .await?;

        if !status.is_success() {
            return Err(Self::classify_rejection(status, &reply));
        }

        let envelope: RawDataEnvelope<AccountUser> =
            serde_json::from_str(&reply).map_err(|e| AccountError::ParseError(e.to_string()))?;
        Ok(envelope.data)
    }

    #[instrument(skip(self, token, password, current_password))]
    async fn update_profile(
        &self,
        token: &str,
        username: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
        current_password: &str,
    ) -> Result<(), AccountError> {
        let body = json!({
            "username": username,
            "email": email,
            "password": password,
            "currentPassword": current_password,
        });
        let (status, reply) = self
            .send(
                self.client
                    .put(self.url("/profile/update"))
                    .bearer_auth(token)
                    .json(&body),
            )
            .await?;

        if !status.is_success() {
            return Err(Self::classify_rejection(status, &reply));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_role(&self, email: &str, role: u8) -> Result<(), AccountError> {
        let body = json!({ "email": email, "role": role });
        let (status, reply) = self
            .send(self.client.put(self.url("/update-role")).json(&body))
            .await?;

        if !status.is_success() {
            return Err(Self::classify_rejection(status, &reply));
        }
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn submit_review(
        &self,
        token: &str,
        issue: &str,
        suggestion: &str,
        rating: u8,
    ) -> Result<(), AccountError> {
        let body = json!({ "issue": issue, "suggestion": suggestion, "rating": rating });
        let (status, reply) = self
            .send(
                self.client
                    .post(self.url("/review"))
                    .bearer_auth(token)
                    .json(&body),
            )
            .await?;

        if !status.is_success() {
            return Err(Self::classify_rejection(status, &reply));
        }
        debug!("Review submitted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<AccountUser>, AccountError> {
        let (status, reply) = self.send(self.client.get(self.url("/users"))).await?;

        if !status.is_success() {
            return Err(Self::classify_rejection(status, &reply));
        }

        let envelope: RawDataEnvelope<Vec<AccountUser>> =
            serde_json::from_str(&reply).map_err(|e| AccountError::ParseError(e.to_string()))?;
        Ok(envelope.data)
    }
}

// --- Raw envelope types for deserialization ---

/// Loose rejection envelope: the detail may sit in any of these fields
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    message: Option<String>,
    error: Option<String>,
    data: Option<serde_json::Value>,
}

/// Success envelope with a typed `data` payload
#[derive(Debug, Deserialize)]
struct RawDataEnvelope<T> {
    data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_invalid_credentials() {
        let err = BackendAccountClient::classify_rejection(
            StatusCode::BAD_REQUEST,
            r#"{ "status": "error", "data": "Invalid credentials" }"#,
        );
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[test]
    fn test_classify_email_in_use() {
        let err = BackendAccountClient::classify_rejection(
            StatusCode::BAD_REQUEST,
            r#"{ "data": "Email already in use" }"#,
        );
        assert!(matches!(err, AccountError::EmailInUse));
    }

    #[test]
    fn test_classify_user_not_found() {
        let err = BackendAccountClient::classify_rejection(
            StatusCode::BAD_REQUEST,
            r#"{ "data": "User doesn't exist" }"#,
        );
        assert!(matches!(err, AccountError::UserNotFound));

        let err = BackendAccountClient::classify_rejection(
            StatusCode::NOT_FOUND,
            r#"{ "message": "User not found" }"#,
        );
        assert!(matches!(err, AccountError::UserNotFound));
    }

    #[test]
    fn test_classify_invalid_otp() {
        let err = BackendAccountClient::classify_rejection(
            StatusCode::BAD_REQUEST,
            r#"{ "message": "Invalid OTP" }"#,
        );
        assert!(matches!(err, AccountError::InvalidOtp));
    }

    #[test]
    fn test_classify_invalid_token() {
        let err = BackendAccountClient::classify_rejection(
            StatusCode::UNAUTHORIZED,
            r#"{ "error": "Invalid token" }"#,
        );
        assert!(matches!(err, AccountError::InvalidToken));
    }

    #[test]
    fn test_classify_server_error() {
        let err = BackendAccountClient::classify_rejection(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{ "status": "error", "data": "Registration failed" }"#,
        );
        assert!(matches!(err, AccountError::RequestFailed(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_classify_other_rejection_keeps_message() {
        let err = BackendAccountClient::classify_rejection(
            StatusCode::BAD_REQUEST,
            r#"{ "message": "All fields are required" }"#,
        );
        match err {
            AccountError::Rejected(detail) => assert_eq!(detail, "All fields are required"),
            other => unreachable!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_unparseable_body() {
        let err =
            BackendAccountClient::classify_rejection(StatusCode::BAD_REQUEST, "<html>oops</html>");
        assert!(matches!(err, AccountError::RequestFailed(_)));
    }

    #[test]
    fn test_login_envelope_parsing() {
        let json = r#"{ "status": "ok", "data": { "token": "jwt-abc", "role": 1 } }"#;
        let envelope: RawDataEnvelope<LoginOutcome> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.token, "jwt-abc");
        assert_eq!(envelope.data.role, 1);
    }

    #[test]
    fn test_user_envelope_parsing_with_missing_role() {
        let json = r#"{ "status": "ok", "data": { "username": "juan", "email": "juan@b.ph" } }"#;
        let envelope: RawDataEnvelope<AccountUser> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.role, 1);
    }
}
