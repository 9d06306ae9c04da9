//! Encoded polyline decoding
//!
//! Decodes the provider's compact polyline encoding (5-decimal-place
//! precision, delta-encoded, zig-zag signed, 5-bit groups with a 0x20
//! continuation flag) into an ordered coordinate sequence.
//!
//! Decoding happens at render time, per route the user actually opens;
//! the encoded string travels through the domain untouched. The public
//! entry point fails softly: one malformed route must not abort drawing
//! the others.

use domain::value_objects::GeoLocation;
use thiserror::Error;
use tracing::warn;

/// Errors from strict polyline decoding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// Input ended in the middle of a coordinate
    #[error("Unexpected end of polyline input")]
    UnexpectedEnd,

    /// A byte outside the printable encoding range
    #[error("Invalid polyline character {0:?}")]
    InvalidCharacter(char),

    /// More continuation groups than any coordinate can need
    #[error("Polyline value group overflow")]
    Overflow,

    /// The decoded pair is not a valid latitude/longitude
    #[error("Decoded coordinate out of range")]
    CoordinateOutOfRange,
}

/// Decode an encoded polyline, never failing to the caller
///
/// Malformed input yields an empty sequence and a warning log line, so a
/// single bad route in a set skips only its own line on the map.
#[must_use]
pub fn decode(encoded: &str) -> Vec<GeoLocation> {
    match try_decode(encoded) {
        Ok(points) => points,
        Err(error) => {
            warn!(%error, "Skipping malformed polyline");
            Vec::new()
        }
    }
}

/// Strictly decode an encoded polyline
///
/// # Errors
///
/// Returns a [`PolylineError`] describing the first malformed position.
pub fn try_decode(encoded: &str) -> Result<Vec<GeoLocation>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat_e5: i64 = 0;
    let mut lng_e5: i64 = 0;

    while index < bytes.len() {
        lat_e5 += next_value(bytes, &mut index)?;
        lng_e5 += next_value(bytes, &mut index)?;

        let latitude = lat_e5 as f64 * 1e-5;
        let longitude = lng_e5 as f64 * 1e-5;
        let point = GeoLocation::new(latitude, longitude)
            .map_err(|_| PolylineError::CoordinateOutOfRange)?;
        points.push(point);
    }

    Ok(points)
}

/// Read one zig-zag encoded delta starting at `index`
fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut accumulator: i64 = 0;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::UnexpectedEnd);
        };
        *index += 1;

        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter(char::from(byte)));
        }
        // 7 five-bit groups cover every coordinate delta at 1e-5 precision
        if shift > 30 {
            return Err(PolylineError::Overflow);
        }

        let group = i64::from(byte - 63);
        accumulator |= (group & 0x1f) << shift;
        shift += 5;

        if group & 0x20 == 0 {
            break;
        }
    }

    // undo zig-zag
    Ok(if accumulator & 1 == 1 {
        !(accumulator >> 1)
    } else {
        accumulator >> 1
    })
}
