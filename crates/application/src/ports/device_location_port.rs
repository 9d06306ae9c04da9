//! Device location port
//!
//! Models the scoped sensor acquisition: request access, read one
//! position, release. A denied permission surfaces as
//! [`ApplicationError::LocationUnavailable`], never a crash or a silent
//! no-op.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for reading the device's own position
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeviceLocationPort: Send + Sync {
    /// Request access and read the current position once
    async fn current_position(&self) -> Result<GeoLocation, ApplicationError>;
}
