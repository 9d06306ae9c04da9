//! Normalized commute routes
//!
//! A `Route` is one candidate way of getting from origin to destination:
//! a summary, a total duration, a fare, the provider's encoded overview
//! polyline, and the ordered step-by-step instructions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::GeoLocation;

/// Transit-specific detail attached to a step
///
/// Present only for transit steps (jeepney, bus, rail); walking steps
/// carry no detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitDetail {
    /// Line name (e.g., "LRT-1", "EDSA Carousel")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    /// Vehicle type (e.g., "Bus", "Subway", "Jeepney")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    /// Fare for this step, when the provider supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fare: Option<f64>,
    /// Duration text for this step (e.g., "24 mins")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Boarding coordinate; `None` means no marker is drawn (never (0,0))
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boarding: Option<GeoLocation>,
}

/// One instruction line of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Human-readable instruction (e.g., "Walk to Lawton Underpass")
    pub instruction: String,
    /// Transit detail, absent for walking steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit: Option<TransitDetail>,
}

impl RouteStep {
    /// Create a walking step (no transit detail)
    #[must_use]
    pub fn walking(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            transit: None,
        }
    }

    /// Create a transit step
    #[must_use]
    pub fn transit(instruction: impl Into<String>, detail: TransitDetail) -> Self {
        Self {
            instruction: instruction.into(),
            transit: Some(detail),
        }
    }

    /// Whether this step rides a transit vehicle
    #[must_use]
    pub const fn is_transit(&self) -> bool {
        self.transit.is_some()
    }

    /// Format this step as the detail-view block
    #[must_use]
    pub fn format_detail(&self) -> String {
        let mut out = self.instruction.clone();
        if let Some(detail) = &self.transit {
            if let Some(line) = &detail.line {
                out.push_str(&format!("\n  🚇 Line: {line}"));
            }
            if let Some(vehicle) = &detail.vehicle {
                out.push_str(&format!("\n  🚍 Vehicle: {vehicle}"));
            }
            if let Some(fare) = detail.fare {
                out.push_str(&format!("\n  💵 Fare: ₱{fare:.2}"));
            }
            if let Some(duration) = &detail.duration {
                out.push_str(&format!("\n  ⏱ Duration: {duration}"));
            }
        }
        out
    }
}

impl fmt::Display for RouteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_detail())
    }
}

/// One candidate route from origin to destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Short route summary (main road or line)
    pub summary: String,
    /// Total duration text from the provider (e.g., "1 hour 5 mins")
    pub duration: String,
    /// Total fare: provider-supplied, or estimated from distance
    pub fare: f64,
    /// Encoded overview polyline, kept as returned and decoded only at
    /// render time
    pub polyline: String,
    /// Instructions in traversal order, exactly as returned upstream
    pub steps: Vec<RouteStep>,
}

impl Route {
    /// Number of steps that ride a transit vehicle
    #[must_use]
    pub fn transit_step_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_transit()).count()
    }

    /// Format as the one-line list entry
    #[must_use]
    pub fn format_summary(&self) -> String {
        format!(
            "🚍 {} · ⏳ {} · 💰 ₱{:.2}",
            self.summary, self.duration, self.fare
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}
