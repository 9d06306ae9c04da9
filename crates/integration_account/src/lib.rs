//! Account backend integration for komyut
//!
//! Client for the companion account service: registration and login with
//! email OTP verification, profile updates, role management, service
//! reviews, and the user listing. The backend is consumed purely through
//! its `{status, data}` / `{message}` response envelope; a bearer token
//! from login authorizes the protected calls.
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern shared by the integration
//! crates. [`AccountClient`] defines the interface, implemented by
//! [`BackendAccountClient`]; backend replies are mapped into typed
//! results and [`AccountError`] kinds at this boundary.

mod client;
mod config;
mod error;

pub use client::{AccountClient, AccountUser, BackendAccountClient, LoginOutcome};
pub use config::AccountConfig;
pub use error::AccountError;
