//! Input path segment types.

use camkit_core::Point;
use serde::{Deserialize, Serialize};

/// Kinds of tool-center path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Line,
    Arc,
}

/// One tool-center path segment with its tool radius.
///
/// Arcs are defined by three points (start, an interior point, end) rather
/// than center plus sweep; the circle is fitted downstream and the fit fails
/// for collinear points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathSegment {
    pub id: u32,
    pub kind: SegmentKind,
    pub p1: Point,
    pub p2: Point,
    /// Interior defining point, arcs only.
    pub p_mid: Option<Point>,
    pub tool_radius: f64,
}

impl PathSegment {
    /// Creates a line segment.
    pub fn line(id: u32, p1: Point, p2: Point, tool_radius: f64) -> Self {
        Self {
            id,
            kind: SegmentKind::Line,
            p1,
            p2,
            p_mid: None,
            tool_radius,
        }
    }

    /// Creates a 3-point arc segment.
    pub fn arc(id: u32, p1: Point, p_mid: Point, p2: Point, tool_radius: f64) -> Self {
        Self {
            id,
            kind: SegmentKind::Arc,
            p1,
            p2,
            p_mid: Some(p_mid),
            tool_radius,
        }
    }

    /// True when the tool radius can produce a swept body.
    pub fn has_valid_radius(&self) -> bool {
        self.tool_radius.is_finite() && self.tool_radius > 0.0
    }

    /// True when every defining coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.p1.is_finite() && self.p2.is_finite() && self.p_mid.map_or(true, |p| p.is_finite())
    }
}
