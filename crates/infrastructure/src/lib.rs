//! Infrastructure layer for komyut
//!
//! Binds the integration clients to the application ports and loads the
//! aggregated configuration. Each adapter converts integration errors to
//! [`application::ApplicationError`] kinds at the boundary; nothing below
//! this layer leaks a raw transport error upward.

pub mod adapters;
pub mod config;

pub use adapters::{
    AccountAdapter, ConfiguredLocationAdapter, DirectionsAdapter, PlacesAdapter,
};
pub use config::{AppConfig, HomeLocationConfig};
