//! Directions client and route normalization
//!
//! Issues one directions query per origin/destination pair and turns the
//! provider's multi-route payload into the domain [`RouteSet`]. Candidate
//! order is the provider's ranking and is preserved exactly; nothing here
//! re-sorts. The encoded overview polyline is carried through unmodified,
//! decoding is deferred to render time so unopened routes never pay for it.
//!
//! Fare rule: a provider route fare wins outright; failing that, the
//! per-step transit fares are summed; with neither, the fare is estimated
//! from the leg distance at the configured per-kilometer rate.

use std::time::Duration;

use async_trait::async_trait;
use domain::entities::{Route, RouteSet, RouteStep, TransitDetail};
use domain::value_objects::{FareSchedule, GeoLocation, Place};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::DirectionsConfig;
use crate::error::DirectionsError;

/// Trait for commute route clients
#[async_trait]
pub trait DirectionsClient: Send + Sync {
    /// Fetch ranked route alternatives between two resolved places
    async fn route_alternatives(
        &self,
        origin: &Place,
        destination: &Place,
    ) -> Result<RouteSet, DirectionsError>;

    /// Check if the directions service is reachable
    async fn is_healthy(&self) -> bool;
}

/// Directions client backed by the Google Directions web API
#[derive(Debug)]
pub struct GoogleDirectionsClient {
    client: Client,
    config: DirectionsConfig,
    fare_schedule: FareSchedule,
}

impl GoogleDirectionsClient {
    /// Create a new directions client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &DirectionsConfig) -> Result<Self, DirectionsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("komyut/0.2")
            .build()
            .map_err(|e| DirectionsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            fare_schedule: FareSchedule {
                rate_per_km: config.fare_rate_per_km,
            },
        })
    }

    /// Parse the raw directions payload into a normalized route set
    ///
    /// Output count and order equal the payload's candidate count and
    /// order for every non-empty payload.
    fn parse_directions_response(
        body: &str,
        origin: &str,
        destination: &str,
        fare_schedule: &FareSchedule,
    ) -> Result<RouteSet, DirectionsError> {
        let raw: RawDirectionsResponse =
            serde_json::from_str(body).map_err(|e| DirectionsError::ParseError(e.to_string()))?;

        match raw.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => {
                return Err(DirectionsError::NoRoutesFound {
                    from: origin.to_string(),
                    to: destination.to_string(),
                });
            }
            "NOT_FOUND" => {
                return Err(DirectionsError::InvalidLocation(format!(
                    "{origin} or {destination}"
                )));
            }
            "OVER_QUERY_LIMIT" => {
                return Err(DirectionsError::RateLimitExceeded {
                    retry_after_secs: None,
                });
            }
            other => return Err(DirectionsError::RequestFailed(format!("status {other}"))),
        }

        if raw.routes.is_empty() {
            return Err(DirectionsError::NoRoutesFound {
                from: origin.to_string(),
                to: destination.to_string(),
            });
        }

        let routes: Vec<Route> = raw
            .routes
            .into_iter()
            .enumerate()
            .map(|(index, route)| Self::convert_route(route, index, fare_schedule))
            .collect();

        RouteSet::new(routes).map_err(|e| DirectionsError::ParseError(e.to_string()))
    }

    /// Convert one raw candidate, rank `index`, to a normalized route
    fn convert_route(raw: RawRoute, index: usize, fare_schedule: &FareSchedule) -> Route {
        let fare = Self::route_fare(&raw, fare_schedule);

        // the first leg carries the journey for a single o/d query
        let leg = raw.legs.first();
        let duration = leg
            .and_then(|l| l.duration.as_ref())
            .map(|d| d.text.clone())
            .unwrap_or_default();

        let steps: Vec<RouteStep> = leg
            .map(|l| l.steps.iter().map(Self::convert_step).collect())
            .unwrap_or_default();

        let summary = Self::route_summary(&raw, &steps, index);

        Route {
            summary,
            duration,
            fare,
            polyline: raw
                .overview_polyline
                .map(|p| p.points)
                .unwrap_or_default(),
            steps,
        }
    }

    /// Convert one raw provider step to a route step
    ///
    /// Transit steps keep line, vehicle, per-step fare, duration text, and
    /// the boarding coordinate; everything else becomes a bare instruction.
    /// A boarding coordinate that is missing or invalid stays `None` so no
    /// marker is drawn for it.
    fn convert_step(raw: &RawStep) -> RouteStep {
        let instruction = raw.html_instructions.clone().unwrap_or_default();

        let Some(transit) = &raw.transit_details else {
            return RouteStep::walking(instruction);
        };

        let line = transit
            .line
            .as_ref()
            .and_then(|l| l.short_name.clone().or_else(|| l.name.clone()));
        let vehicle = transit
            .line
            .as_ref()
            .and_then(|l| l.vehicle.as_ref())
            .and_then(|v| v.name.clone().or_else(|| v.vehicle_type.clone()));
        let boarding = transit
            .departure_stop
            .as_ref()
            .and_then(|s| s.location.as_ref())
            .and_then(|loc| GeoLocation::new(loc.lat, loc.lng).ok());

        RouteStep::transit(
            instruction,
            TransitDetail {
                line,
                vehicle,
                fare: transit.fare.as_ref().and_then(|f| f.value),
                duration: raw.duration.as_ref().map(|d| d.text.clone()),
                boarding,
            },
        )
    }

    /// Determine the route fare
    ///
    /// Provider route fare first; else the sum of provider step fares
    /// (partial coverage sums what is there); else estimated from the leg
    /// distance.
    fn route_fare(raw: &RawRoute, fare_schedule: &FareSchedule) -> f64 {
        if let Some(value) = raw.fare.as_ref().and_then(|f| f.value) {
            return value;
        }

        let step_fares: Vec<f64> = raw
            .legs
            .first()
            .map(|leg| {
                leg.steps
                    .iter()
                    .filter_map(|s| s.transit_details.as_ref())
                    .filter_map(|t| t.fare.as_ref().and_then(|f| f.value))
                    .collect()
            })
            .unwrap_or_default();

        if !step_fares.is_empty() {
            return step_fares.iter().sum();
        }

        let distance_meters = raw
            .legs
            .first()
            .and_then(|l| l.distance.as_ref())
            .map_or(0.0, |d| d.value);
        fare_schedule.estimate(distance_meters)
    }

    /// Summary verbatim when present, else the first transit line, else a
    /// rank-based placeholder
    fn route_summary(raw: &RawRoute, steps: &[RouteStep], index: usize) -> String {
        if let Some(summary) = raw.summary.as_deref() {
            if !summary.is_empty() {
                return summary.to_string();
            }
        }

        steps
            .iter()
            .find_map(|s| s.transit.as_ref().and_then(|t| t.line.clone()))
            .unwrap_or_else(|| format!("Route {}", index + 1))
    }
}

#[async_trait]
impl DirectionsClient for GoogleDirectionsClient {
    #[instrument(skip(self, origin, destination), fields(from = %origin.name, to = %destination.name))]
    async fn route_alternatives(
        &self,
        origin: &Place,
        destination: &Place,
    ) -> Result<RouteSet, DirectionsError> {
        let url = format!("{}/directions/json", self.config.base_url);
        let params = [
            (
                "origin",
                format!(
                    "{},{}",
                    origin.location.latitude(),
                    origin.location.longitude()
                ),
            ),
            (
                "destination",
                format!(
                    "{},{}",
                    destination.location.latitude(),
                    destination.location.longitude()
                ),
            ),
            ("mode", "transit".to_string()),
            ("alternatives", self.config.alternatives.to_string()),
            ("key", self.config.api_key.clone()),
        ];

        debug!("Fetching route alternatives");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DirectionsError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    DirectionsError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectionsError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(DirectionsError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DirectionsError::ParseError(e.to_string()))?;

        let result = Self::parse_directions_response(
            &body,
            &origin.name,
            &destination.name,
            &self.fare_schedule,
        );

        match &result {
            Ok(routes) => debug!(count = routes.len(), "Routes normalized"),
            Err(e) if !e.is_retryable() => warn!(%e, "No usable routes"),
            Err(_) => {}
        }
        result
    }

    async fn is_healthy(&self) -> bool {
        let url = format!("{}/directions/json", self.config.base_url);
        self.client.get(&url).send().await.is_ok()
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawDirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    summary: Option<String>,
    overview_polyline: Option<RawPolyline>,
    fare: Option<RawFare>,
    #[serde(default)]
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
struct RawPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct RawFare {
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    duration: Option<RawText>,
    distance: Option<RawDistance>,
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
struct RawText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawDistance {
    /// Meters
    value: f64,
}

#[derive(Debug, Deserialize)]
struct RawStep {
    html_instructions: Option<String>,
    duration: Option<RawText>,
    transit_details: Option<RawTransitDetails>,
}

#[derive(Debug, Deserialize)]
struct RawTransitDetails {
    line: Option<RawLine>,
    departure_stop: Option<RawStop>,
    fare: Option<RawFare>,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    name: Option<String>,
    short_name: Option<String>,
    vehicle: Option<RawVehicle>,
}

#[derive(Debug, Deserialize)]
struct RawVehicle {
    name: Option<String>,
    #[serde(rename = "type")]
    vehicle_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStop {
    location: Option<RawLatLng>,
}

#[derive(Debug, Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}
