//! Drag-to-resize state for a bottom-sheet panel
//!
//! Both the route-list panel and the route-detail panel resize through the
//! same mechanics: a stream of drag deltas during one gesture, with the
//! height clamped to a viewport-derived range on every single update.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest allowed panel height, as a fraction of the viewport
pub const MIN_VIEWPORT_FRACTION: f64 = 0.3;

/// Largest allowed panel height, as a fraction of the viewport
pub const MAX_VIEWPORT_FRACTION: f64 = 0.7;

/// Error type for a malformed clamp range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPanelBounds;

impl fmt::Display for InvalidPanelBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid panel bounds: min and max must be finite with 0 <= min <= max")
    }
}

impl std::error::Error for InvalidPanelBounds {}

/// Resizable panel state: current height plus its clamp range
///
/// The height never leaves `[min, max]`, not even transiently, regardless
/// of how far a drag overshoots. Each panel owns an independent instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragPanel {
    height: f64,
    min: f64,
    max: f64,
}

impl DragPanel {
    /// Create a panel with an explicit clamp range, starting at `min`
    ///
    /// # Errors
    ///
    /// Returns `InvalidPanelBounds` when the range is non-finite, negative,
    /// or inverted.
    pub fn new(min: f64, max: f64) -> Result<Self, InvalidPanelBounds> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(InvalidPanelBounds);
        }
        Ok(Self {
            height: min,
            min,
            max,
        })
    }

    /// Derive the clamp range from the viewport height (30% to 70%)
    ///
    /// # Errors
    ///
    /// Returns `InvalidPanelBounds` for a non-finite or non-positive viewport.
    pub fn from_viewport(viewport_height: f64) -> Result<Self, InvalidPanelBounds> {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return Err(InvalidPanelBounds);
        }
        Self::new(
            viewport_height * MIN_VIEWPORT_FRACTION,
            viewport_height * MAX_VIEWPORT_FRACTION,
        )
    }

    /// Apply one drag delta, clamping the result into `[min, max]`
    ///
    /// Positive deltas grow the panel, negative deltas shrink it. Non-finite
    /// deltas are ignored. No snapping happens on gesture end; the height
    /// simply freezes at the last clamped value.
    pub fn apply_drag(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.height = (self.height + delta).clamp(self.min, self.max);
    }

    /// Current panel height
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Lower clamp bound
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper clamp bound
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_min() {
        let panel = DragPanel::from_viewport(800.0).expect("valid viewport");
        assert!((panel.height() - 240.0).abs() < f64::EPSILON);
        assert!((panel.min() - 240.0).abs() < f64::EPSILON);
        assert!((panel.max() - 560.0).abs() < f64::EPSILON);
    }

    #[test]
    fn drag_grows_within_bounds() {
        let mut panel = DragPanel::from_viewport(800.0).expect("valid viewport");
        panel.apply_drag(100.0);
        assert!((panel.height() - 340.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overshoot_up_clamps_to_max() {
        let mut panel = DragPanel::from_viewport(800.0).expect("valid viewport");
        panel.apply_drag(10_000.0);
        assert!((panel.height() - panel.max()).abs() < f64::EPSILON);
    }

    #[test]
    fn overshoot_down_clamps_to_min() {
        let mut panel = DragPanel::from_viewport(800.0).expect("valid viewport");
        panel.apply_drag(300.0);
        panel.apply_drag(-10_000.0);
        assert!((panel.height() - panel.min()).abs() < f64::EPSILON);
    }

    #[test]
    fn sequence_of_deltas_stays_in_bounds() {
        let mut panel = DragPanel::from_viewport(640.0).expect("valid viewport");
        for delta in [55.0, -300.0, 480.0, -12.5, 9000.0, -9000.0] {
            panel.apply_drag(delta);
            assert!(panel.height() >= panel.min());
            assert!(panel.height() <= panel.max());
        }
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let mut panel = DragPanel::from_viewport(800.0).expect("valid viewport");
        let before = panel.height();
        panel.apply_drag(f64::NAN);
        panel.apply_drag(f64::INFINITY);
        assert!((panel.height() - before).abs() < f64::EPSILON);
    }

    #[test]
    fn inverted_bounds_rejected() {
        assert!(DragPanel::new(500.0, 100.0).is_err());
    }

    #[test]
    fn negative_min_rejected() {
        assert!(DragPanel::new(-10.0, 100.0).is_err());
    }

    #[test]
    fn bad_viewport_rejected() {
        assert!(DragPanel::from_viewport(0.0).is_err());
        assert!(DragPanel::from_viewport(-600.0).is_err());
        assert!(DragPanel::from_viewport(f64::NAN).is_err());
    }

    #[test]
    fn panels_are_independent() {
        let mut list_panel = DragPanel::from_viewport(800.0).expect("valid viewport");
        let detail_panel = DragPanel::from_viewport(800.0).expect("valid viewport");
        list_panel.apply_drag(150.0);
        assert!((detail_panel.height() - detail_panel.min()).abs() < f64::EPSILON);
        assert!(list_panel.height() > detail_panel.height());
    }
}
