//! Directions integration for komyut
//!
//! Fetches multi-modal commute routes from the Google Directions web API
//! (transit mode, alternatives enabled) and normalizes the raw payload
//! into the domain's ranked [`RouteSet`](domain::entities::RouteSet):
//! summaries, durations, computed fares, step instructions with transit
//! detail, and the untouched encoded overview polyline.
//!
//! # Architecture
//!
//! The crate follows the client-trait pattern shared by the integration
//! crates. [`DirectionsClient`] defines the interface, implemented by
//! [`GoogleDirectionsClient`]; the normalization pipeline
//! (`parse_directions_response` → per-route → per-step conversion) is
//! pure and unit-tested without the network.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_directions::{DirectionsConfig, GoogleDirectionsClient};
//!
//! let config = DirectionsConfig::default();
//! let client = GoogleDirectionsClient::new(&config)?;
//!
//! let routes = client.route_alternatives(&origin, &destination).await?;
//! println!("{}", routes.routes()[0].format_summary());
//! ```

mod client;
mod config;
mod error;

pub use client::{DirectionsClient, GoogleDirectionsClient};
pub use config::DirectionsConfig;
pub use error::DirectionsError;
