//! Planar geometry primitives and numeric helpers.
//!
//! Everything in here is plain 2D math over `f64` world coordinates: points,
//! circles, signed angular sweeps, 3-point circle fitting and the
//! chordal-sagitta rule used when flattening arcs into polygons.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::error::{GeometryError, GeometryResult};

/// Epsilon used for degeneracy checks (zero-length segments, collinear fits).
pub const EPSILON: f64 = 1e-9;

/// A point in 2D world coordinates (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// True when both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A circle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// A signed angular sweep on a circle.
///
/// `sweep` is positive for counter-clockwise travel and negative for
/// clockwise travel, measured from `start_angle` (radians, from `atan2`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSweep {
    pub start_angle: f64,
    pub sweep: f64,
}

/// Cross product of `(a - o)` and `(b - o)`.
///
/// Positive when `o -> a -> b` turns counter-clockwise.
pub fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Normalizes an angle into `[0, 2*pi)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle % TAU;
    if a < 0.0 {
        a + TAU
    } else {
        a
    }
}

/// Angle of `p` about `center`, in `(-pi, pi]`.
pub fn angle_of(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

/// Point on the circle `(center, radius)` at the given angle.
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Fits a circle through three points.
///
/// Fails when the points are collinear (or coincident) within epsilon, or when
/// any coordinate is non-finite.
pub fn fit_circle(a: Point, b: Point, c: Point) -> GeometryResult<Circle> {
    if !a.is_finite() || !b.is_finite() || !c.is_finite() {
        return Err(GeometryError::NonFiniteInput);
    }

    // Twice the signed triangle area; vanishes for collinear points.
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < EPSILON {
        return Err(GeometryError::CollinearArcPoints);
    }

    let aa = a.x * a.x + a.y * a.y;
    let bb = b.x * b.x + b.y * b.y;
    let cc = c.x * c.x + c.y * c.y;

    let ux = (aa * (b.y - c.y) + bb * (c.y - a.y) + cc * (a.y - b.y)) / d;
    let uy = (aa * (c.x - b.x) + bb * (a.x - c.x) + cc * (b.x - a.x)) / d;

    let center = Point::new(ux, uy);
    Ok(Circle {
        center,
        radius: center.distance_to(&a),
    })
}

/// Computes the signed sweep of a 3-point arc about its fitted center.
///
/// The sweep direction comes from one cross-product test on the defining
/// points (`p1 -> p_mid -> p2`): positive cross means counter-clockwise. The
/// same test must be used everywhere an arc's direction matters, or offset
/// bodies and candidate curves will disagree on which side is "outer".
pub fn arc_sweep(center: Point, p1: Point, p_mid: Point, p2: Point) -> ArcSweep {
    let start_angle = angle_of(center, p1);
    let end_angle = angle_of(center, p2);
    let ccw = cross(p1, p_mid, p2) > 0.0;

    if ccw {
        let mut sweep = normalize_angle(end_angle - start_angle);
        if sweep < EPSILON {
            sweep = TAU;
        }
        ArcSweep { start_angle, sweep }
    } else {
        let mut sweep = normalize_angle(start_angle - end_angle);
        if sweep < EPSILON {
            sweep = TAU;
        }
        ArcSweep {
            start_angle,
            sweep: -sweep,
        }
    }
}

/// Tests whether `angle` lies within a signed sweep, with angular slack `tol`.
///
/// The test is direction-aware: the angular distance is measured from the
/// sweep's start in its own travel direction.
pub fn angle_within_sweep(angle: f64, start_angle: f64, sweep: f64, tol: f64) -> bool {
    let delta = if sweep >= 0.0 {
        normalize_angle(angle - start_angle)
    } else {
        normalize_angle(start_angle - angle)
    };
    delta <= sweep.abs() + tol || delta >= TAU - tol
}

/// Number of subdivisions for flattening an arc into a polyline so the
/// maximum deviation (sagitta) stays within `chord_tol`.
pub fn arc_sample_count(radius: f64, sweep_abs: f64, chord_tol: f64) -> usize {
    if !radius.is_finite() || radius <= 0.0 || !sweep_abs.is_finite() {
        return 4;
    }
    // Clamp keeps acos in domain and bounds the density for absurd tolerances.
    let tol = chord_tol.clamp(radius * 1e-6, radius);
    let step = 2.0 * (1.0 - tol / radius).acos();
    if step < EPSILON {
        return 4096;
    }
    let n = (sweep_abs / step).ceil() as usize;
    n.clamp(4, 4096)
}
