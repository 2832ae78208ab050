//! # CamKit Core
//!
//! Core 2D geometry types and utilities for CamKit.
//! Provides the planar primitives (points, circles, arc sweeps) and the
//! numeric helpers (circle fitting, angle normalization, chordal sampling)
//! shared by the toolpath processing crates.

pub mod error;
pub mod geometry;

pub use error::{GeometryError, GeometryResult};
pub use geometry::{
    angle_of, angle_within_sweep, arc_sample_count, arc_sweep, cross, fit_circle, normalize_angle,
    point_on_circle, ArcSweep, Circle, Point, EPSILON,
};
