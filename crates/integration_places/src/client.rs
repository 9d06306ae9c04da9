//! Places / geocoding client
//!
//! Autocomplete, place-detail resolution, and reverse geocoding against
//! the Google maps web APIs. Responses carry their own `status` field on
//! top of the HTTP status; both are checked here, and raw payloads are
//! converted into typed results at this boundary.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::{GeoLocation, Place};
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::PlacesConfig;
use crate::error::PlacesError;

/// Name used when the provider returns a place without one
const UNKNOWN_NAME: &str = "Unknown Location";

/// Address used when the provider returns a place without one
const UNKNOWN_ADDRESS: &str = "No address available";

/// One autocomplete candidate, resolvable to a full place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacePrediction {
    /// Opaque provider place identifier
    pub place_id: String,
    /// Human-readable candidate description
    pub description: String,
}

/// Trait for place resolution clients
#[async_trait]
pub trait PlacesClient: Send + Sync {
    /// Suggest places for a partial text query, biased to the configured
    /// service area
    async fn autocomplete(&self, query: &str) -> Result<Vec<PlacePrediction>, PlacesError>;

    /// Resolve a place id to coordinates, name, and address
    async fn place_details(&self, place_id: &str) -> Result<Place, PlacesError>;

    /// Resolve coordinates to the nearest formatted address
    async fn reverse_geocode(&self, latitude: f64, longitude: f64)
    -> Result<String, PlacesError>;
}

/// Places client backed by the Google Places and Geocoding web APIs
#[derive(Debug)]
pub struct GooglePlacesClient {
    client: Client,
    config: PlacesConfig,
    details_cache: Cache<String, Place>,
}

impl GooglePlacesClient {
    /// Create a new places client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &PlacesConfig) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("komyut/0.2")
            .build()
            .map_err(|e| PlacesError::ConnectionFailed(e.to_string()))?;

        let cache_ttl = if config.cache_ttl_minutes > 0 {
            Duration::from_secs(u64::from(config.cache_ttl_minutes) * 60)
        } else {
            Duration::from_secs(1) // Minimal TTL when "disabled"
        };

        let details_cache = Cache::builder()
            .max_capacity(500)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            client,
            config: config.clone(),
            details_cache,
        })
    }

    /// Issue a GET and surface transport failures as typed errors
    async fn get_body(&self, url: &str, params: &[(&str, String)]) -> Result<String, PlacesError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PlacesError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    PlacesError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PlacesError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(PlacesError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| PlacesError::ParseError(e.to_string()))
    }

    /// Parse the raw autocomplete payload, dropping candidates without a
    /// place id
    fn parse_autocomplete_response(
        body: &str,
        query: &str,
    ) -> Result<Vec<PlacePrediction>, PlacesError> {
        let raw: RawAutocompleteResponse =
            serde_json::from_str(body).map_err(|e| PlacesError::ParseError(e.to_string()))?;

        match raw.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(PlacesError::NoResults(query.to_string())),
            "OVER_QUERY_LIMIT" => return Err(PlacesError::RateLimitExceeded),
            other => return Err(PlacesError::RequestFailed(format!("status {other}"))),
        }

        let total = raw.predictions.len();
        let predictions: Vec<PlacePrediction> = raw
            .predictions
            .into_iter()
            .filter_map(|p| {
                let place_id = p.place_id?;
                Some(PlacePrediction {
                    place_id,
                    description: p.description.unwrap_or_default(),
                })
            })
            .collect();

        if predictions.len() < total {
            debug!(
                dropped = total - predictions.len(),
                "Dropped predictions without a place id"
            );
        }

        if predictions.is_empty() {
            return Err(PlacesError::NoResults(query.to_string()));
        }

        Ok(predictions)
    }

    /// Parse the raw place-details payload into a domain place
    fn parse_details_response(body: &str, place_id: &str) -> Result<Place, PlacesError> {
        let raw: RawDetailsResponse =
            serde_json::from_str(body).map_err(|e| PlacesError::ParseError(e.to_string()))?;

        match raw.status.as_str() {
            "OK" => {}
            "NOT_FOUND" | "ZERO_RESULTS" => {
                return Err(PlacesError::NotFound(place_id.to_string()));
            }
            "OVER_QUERY_LIMIT" => return Err(PlacesError::RateLimitExceeded),
            other => return Err(PlacesError::RequestFailed(format!("status {other}"))),
        }

        let result = raw
            .result
            .ok_or_else(|| PlacesError::ParseError("response has no result".to_string()))?;
        let coords = result
            .geometry
            .and_then(|g| g.location)
            .ok_or_else(|| PlacesError::ParseError("result has no geometry".to_string()))?;

        let location = GeoLocation::new(coords.lat, coords.lng)
            .map_err(|e| PlacesError::ParseError(e.to_string()))?;

        Ok(Place::new(
            location,
            result.name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            result
                .formatted_address
                .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
        ))
    }

    /// Parse the raw reverse-geocode payload into the first address
    fn parse_reverse_response(
        body: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, PlacesError> {
        let raw: RawGeocodeResponse =
            serde_json::from_str(body).map_err(|e| PlacesError::ParseError(e.to_string()))?;

        match raw.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => {
                return Err(PlacesError::NotFound(format!("{latitude},{longitude}")));
            }
            "OVER_QUERY_LIMIT" => return Err(PlacesError::RateLimitExceeded),
            other => return Err(PlacesError::RequestFailed(format!("status {other}"))),
        }

        raw.results
            .into_iter()
            .find_map(|r| r.formatted_address)
            .ok_or_else(|| PlacesError::NotFound(format!("{latitude},{longitude}")))
    }
}

#[async_trait]
impl PlacesClient for GooglePlacesClient {
    #[instrument(skip(self))]
    async fn autocomplete(&self, query: &str) -> Result<Vec<PlacePrediction>, PlacesError> {
        if query.trim().is_empty() {
            return Err(PlacesError::NoResults(query.to_string()));
        }

        let url = format!("{}/place/autocomplete/json", self.config.base_url);
        let params = [
            ("input", query.to_string()),
            (
                "location",
                format!("{},{}", self.config.bias_latitude, self.config.bias_longitude),
            ),
            ("radius", self.config.bias_radius_meters.to_string()),
            ("key", self.config.api_key.clone()),
        ];

        debug!(%query, "Requesting place suggestions");
        let body = self.get_body(&url, &params).await?;
        let predictions = Self::parse_autocomplete_response(&body, query)?;

        debug!(count = predictions.len(), "Suggestions found");
        Ok(predictions)
    }

    #[instrument(skip(self))]
    async fn place_details(&self, place_id: &str) -> Result<Place, PlacesError> {
        if let Some(place) = self.details_cache.get(place_id).await {
            debug!(%place_id, "Place details cache hit");
            return Ok(place);
        }

        let url = format!("{}/place/details/json", self.config.base_url);
        let params = [
            ("place_id", place_id.to_string()),
            ("fields", "geometry,name,formatted_address".to_string()),
            ("key", self.config.api_key.clone()),
        ];

        debug!(%place_id, "Resolving place details");
        let body = self.get_body(&url, &params).await?;
        let place = Self::parse_details_response(&body, place_id)?;

        self.details_cache
            .insert(place_id.to_string(), place.clone())
            .await;
        debug!(%place_id, name = %place.name, "Place resolved");
        Ok(place)
    }

    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, PlacesError> {
        let url = format!("{}/geocode/json", self.config.base_url);
        let params = [
            ("latlng", format!("{latitude},{longitude}")),
            ("key", self.config.api_key.clone()),
        ];

        debug!(%latitude, %longitude, "Reverse geocoding");
        let body = self.get_body(&url, &params).await?;
        let address = Self::parse_reverse_response(&body, latitude, longitude)?;

        if address.is_empty() {
            warn!(%latitude, %longitude, "Reverse geocode returned an empty address");
        }
        Ok(address)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawAutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<RawPrediction>,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    place_id: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDetailsResponse {
    status: String,
    result: Option<RawPlaceResult>,
}

#[derive(Debug, Deserialize)]
struct RawPlaceResult {
    name: Option<String>,
    formatted_address: Option<String>,
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    location: Option<RawLatLng>,
}

#[derive(Debug, Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct RawGeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<RawGeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct RawGeocodeResult {
    formatted_address: Option<String>,
}
