//! Places service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the places / geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Base URL for the maps web APIs
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent with every request
    #[serde(default)]
    pub api_key: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Autocomplete bias center latitude
    #[serde(default = "default_bias_latitude")]
    pub bias_latitude: f64,

    /// Autocomplete bias center longitude
    #[serde(default = "default_bias_longitude")]
    pub bias_longitude: f64,

    /// Autocomplete bias radius in meters
    #[serde(default = "default_bias_radius_meters")]
    pub bias_radius_meters: u32,

    /// Place-details cache TTL in minutes (0 to disable)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u32,
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

// Bias suggestions around Metro Manila, the service area
const fn default_bias_latitude() -> f64 {
    14.5995
}

const fn default_bias_longitude() -> f64 {
    120.9842
}

const fn default_bias_radius_meters() -> u32 {
    50_000
}

const fn default_cache_ttl_minutes() -> u32 {
    60
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            bias_latitude: default_bias_latitude(),
            bias_longitude: default_bias_longitude(),
            bias_radius_meters: default_bias_radius_meters(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
        }
    }
}

impl PlacesConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            cache_ttl_minutes: 0,
            ..Default::default()
        }
    }

    /// Check if place-details caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
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

        if self.bias_radius_meters == 0 {
            return Err("bias_radius_meters must be greater than 0".to_string());
        }

        if !(-90.0..=90.0).contains(&self.bias_latitude)
            || !(-180.0..=180.0).contains(&self.bias_longitude)
        {
            return Err("bias center must be valid coordinates".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlacesConfig::default();
        assert_eq!(config.base_url, "https://maps.googleapis.com/maps/api");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.bias_radius_meters, 50_000);
        assert!((config.bias_latitude - 14.5995).abs() < f64::EPSILON);
        assert!((config.bias_longitude - 120.9842).abs() < f64::EPSILON);
        assert!(config.caching_enabled());
    }

    #[test]
    fn test_testing_config() {
        let config = PlacesConfig::for_testing();
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.caching_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = PlacesConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = PlacesConfig {
            timeout_secs: 0,
            ..PlacesConfig::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_radius() {
        let config = PlacesConfig {
            bias_radius_meters: 0,
            ..PlacesConfig::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_bias() {
        let config = PlacesConfig {
            bias_latitude: 120.0,
            ..PlacesConfig::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = PlacesConfig::for_testing();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PlacesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.base_url, config.base_url);
        assert_eq!(deserialized.bias_radius_meters, config.bias_radius_meters);
    }
}
