//! Application configuration
//!
//! One aggregated config deserialized from `komyut.toml` plus
//! `KOMYUT_`-prefixed environment overrides. Each integration keeps its
//! own config struct with serde defaults; this file only composes them
//! and adds the app-level knobs.

use application::services::PlaceSearchConfig;
use domain::value_objects::GeoLocation;
use integration_account::AccountConfig;
use integration_directions::DirectionsConfig;
use integration_places::PlacesConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configured home position for the locate-me flow
///
/// Stands in for the device sensor: absent configuration behaves like a
/// denied location permission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeLocationConfig {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// Aggregated application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Places / geocoding service
    #[serde(default)]
    pub places: PlacesConfig,

    /// Directions service
    #[serde(default)]
    pub directions: DirectionsConfig,

    /// Account backend
    #[serde(default)]
    pub account: AccountConfig,

    /// Suggestion channel tuning
    #[serde(default)]
    pub search: PlaceSearchConfig,

    /// Viewport height the modal clamp range derives from
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,

    /// Home position, if granted
    #[serde(default)]
    pub home: Option<HomeLocationConfig>,
}

const fn default_viewport_height() -> f64 {
    800.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            places: PlacesConfig::default(),
            directions: DirectionsConfig::default(),
            account: AccountConfig::default(),
            search: PlaceSearchConfig::default(),
            viewport_height: default_viewport_height(),
            home: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// # Errors
    ///
    /// Returns an error when the file or environment values cannot be
    /// parsed into the config shape.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("komyut").required(false))
            // Override with environment variables (e.g., KOMYUT_VIEWPORT_HEIGHT)
            .add_source(
                config::Environment::with_prefix("KOMYUT")
                    .separator("_")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!("Configuration loaded");
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, prefixed with its section.
    pub fn validate(&self) -> Result<(), String> {
        self.places
            .validate()
            .map_err(|e| format!("places: {e}"))?;
        self.directions
            .validate()
            .map_err(|e| format!("directions: {e}"))?;
        self.account
            .validate()
            .map_err(|e| format!("account: {e}"))?;

        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err("viewport_height must be positive".to_string());
        }

        if self.home_location().is_none() && self.home.is_some() {
            return Err("home: latitude/longitude out of range".to_string());
        }

        Ok(())
    }

    /// The configured home position as a validated coordinate
    #[must_use]
    pub fn home_location(&self) -> Option<GeoLocation> {
        self.home
            .and_then(|h| GeoLocation::new(h.latitude, h.longitude).ok())
    }
}
