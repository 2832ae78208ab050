//! Build configuration for boundary reconstruction.

use serde::{Deserialize, Serialize};

/// Tunable parameters for one boundary build.
///
/// The quantization scale used for the integer union and the geometric
/// snap-matching tolerance are independent knobs: one controls how world
/// coordinates map onto the union backend's integer grid, the other how far a
/// union vertex may sit from an analytic snap point and still be matched.
/// They must never be conflated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// World-units-to-integer multiplier for the boolean union step.
    pub union_scale: f64,
    /// Maximum sagitta (world units) when flattening arcs into polygons.
    pub chord_tolerance: f64,
    /// Maximum distance (world units) between a union vertex and the snap
    /// point it is matched to.
    pub snap_tolerance: f64,
    /// Minimum number of interior vertices between two snap points for the
    /// run to be reconstructed as an ARC rather than a LINE.
    pub arc_point_threshold: usize,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            union_scale: 10_000.0,
            chord_tolerance: 0.01,
            snap_tolerance: 0.02,
            arc_point_threshold: 3,
        }
    }
}

impl BoundaryConfig {
    /// Returns a copy with invalid values clamped to safe defaults.
    ///
    /// Non-finite or non-positive tolerances/scales never abort a build; they
    /// fall back to the default for that field at the point of use.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let clamp = |value: f64, default: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                default
            }
        };
        Self {
            union_scale: clamp(self.union_scale, defaults.union_scale),
            chord_tolerance: clamp(self.chord_tolerance, defaults.chord_tolerance),
            snap_tolerance: clamp(self.snap_tolerance, defaults.snap_tolerance),
            arc_point_threshold: self.arc_point_threshold.max(1),
        }
    }
}
