//! Device location adapter
//!
//! The CLI has no location sensor; a configured home position stands in
//! for it. Absent configuration behaves exactly like a denied permission:
//! a reported error, never a crash or a silent no-op.

use application::error::ApplicationError;
use application::ports::DeviceLocationPort;
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use tracing::debug;

/// Location port backed by an optional configured position
#[derive(Debug)]
pub struct ConfiguredLocationAdapter {
    home: Option<GeoLocation>,
}

impl ConfiguredLocationAdapter {
    /// Create the adapter from the configured home position, if any
    #[must_use]
    pub const fn new(home: Option<GeoLocation>) -> Self {
        Self { home }
    }
}

#[async_trait]
impl DeviceLocationPort for ConfiguredLocationAdapter {
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError> {
        match self.home {
            Some(location) => {
                debug!(%location, "Using configured position");
                Ok(location)
            }
            None => Err(ApplicationError::LocationUnavailable(
                "no home position configured".to_string(),
            )),
        }
    }
}
