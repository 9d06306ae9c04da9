//! Directions service configuration

use domain::value_objects::DEFAULT_RATE_PER_KM;
use serde::{Deserialize, Serialize};

/// Configuration for the directions service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionsConfig {
    /// Base URL for the maps web APIs
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent with every request
    #[serde(default)]
    pub api_key: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Request alternative routes, not just the provider's best
    #[serde(default = "default_alternatives")]
    pub alternatives: bool,

    /// Per-kilometer rate for fares the provider does not supply
    #[serde(default = "default_fare_rate_per_km")]
    pub fare_rate_per_km: f64,
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_alternatives() -> bool {
    true
}

const fn default_fare_rate_per_km() -> f64 {
    DEFAULT_RATE_PER_KM
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            alternatives: default_alternatives(),
            fare_rate_per_km: default_fare_rate_per_km(),
        }
    }
}

impl DirectionsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.api_key.is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if !self.fare_rate_per_km.is_finite() || self.fare_rate_per_km < 0.0 {
            return Err("fare_rate_per_km must be a non-negative number".to_string());
        }

        Ok(())
    }
}
