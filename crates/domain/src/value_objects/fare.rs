//! Distance-based fare estimation
//!
//! Used when the directions provider returns no fare for a route: the
//! fare is then estimated from the leg's travel distance at a flat
//! per-kilometer rate.

use serde::{Deserialize, Serialize};

/// Default rate in pesos per kilometer
pub const DEFAULT_RATE_PER_KM: f64 = 10.0;

/// Estimate a fare from a travel distance
///
/// Pure: `rate_per_km * distance_meters / 1000`. A zero distance yields a
/// zero fare. A negative distance is a caller bug; it is clamped to zero
/// rather than producing a negative charge.
#[must_use]
pub fn estimate(distance_meters: f64, rate_per_km: f64) -> f64 {
    rate_per_km * (distance_meters.max(0.0) / 1000.0)
}

/// Flat per-kilometer fare schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareSchedule {
    /// Rate charged per kilometer traveled
    #[serde(default = "default_rate_per_km")]
    pub rate_per_km: f64,
}

const fn default_rate_per_km() -> f64 {
    DEFAULT_RATE_PER_KM
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            rate_per_km: DEFAULT_RATE_PER_KM,
        }
    }
}

impl FareSchedule {
    /// Estimate a fare for the given distance under this schedule
    #[must_use]
    pub fn estimate(&self, distance_meters: f64) -> f64 {
        estimate(distance_meters, self.rate_per_km)
    }
}
