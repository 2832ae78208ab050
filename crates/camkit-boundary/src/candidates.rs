//! Analytic candidate curves for boundary snapping.
//!
//! Built from the same input segments as the swept polygons, these are the
//! exact curves the Minkowski boundary is mathematically composed of: offset
//! line segments, offset arcs and the two terminal cap circles. The union
//! result is only a dense point-cloud approximation; snapping its vertices
//! back to intersections of these curves recovers clean geometry.

use camkit_core::{arc_sweep, fit_circle, Point, EPSILON};
use tracing::debug;

use crate::segment::{PathSegment, SegmentKind};

/// Role of a candidate curve relative to its source segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateRole {
    LineLeftOffset,
    LineRightOffset,
    ArcOuter,
    ArcInner,
    Cap,
}

/// Geometric shape of a candidate curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CandidateKind {
    LineSeg {
        p1: Point,
        p2: Point,
    },
    CircleFull {
        center: Point,
        radius: f64,
    },
    /// Arc with a signed sweep: positive counter-clockwise, negative
    /// clockwise, matching [`camkit_core::ArcSweep`].
    CircleArc {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
}

/// One candidate curve with stable id and traceability tags.
#[derive(Debug, Clone)]
pub struct CandidateEntity {
    pub id: u32,
    pub segment_id: u32,
    pub role: CandidateRole,
    pub kind: CandidateKind,
}

/// Builds all candidate curves for a segment chain.
///
/// Lines contribute left/right offsets, arcs contribute outer (and for band
/// arcs inner) offset arcs, and exactly two full-circle caps cover the whole
/// chain: one at the first segment's start and one at the last segment's end.
/// Interior joints get no caps; the union already fuses them.
pub fn build_candidates(segments: &[PathSegment]) -> Vec<CandidateEntity> {
    let mut entities = Vec::new();
    let mut next_id = 0u32;
    let mut push = |entities: &mut Vec<CandidateEntity>,
                    segment_id: u32,
                    role: CandidateRole,
                    kind: CandidateKind| {
        entities.push(CandidateEntity {
            id: next_id,
            segment_id,
            role,
            kind,
        });
        next_id += 1;
    };

    for seg in segments {
        if !seg.is_finite() || !seg.has_valid_radius() {
            continue;
        }
        match seg.kind {
            SegmentKind::Line => {
                let dx = seg.p2.x - seg.p1.x;
                let dy = seg.p2.y - seg.p1.y;
                let len = (dx * dx + dy * dy).sqrt();
                if len < EPSILON {
                    continue;
                }
                let r = seg.tool_radius;
                let nx = -dy / len * r;
                let ny = dx / len * r;
                push(
                    &mut entities,
                    seg.id,
                    CandidateRole::LineLeftOffset,
                    CandidateKind::LineSeg {
                        p1: Point::new(seg.p1.x + nx, seg.p1.y + ny),
                        p2: Point::new(seg.p2.x + nx, seg.p2.y + ny),
                    },
                );
                push(
                    &mut entities,
                    seg.id,
                    CandidateRole::LineRightOffset,
                    CandidateKind::LineSeg {
                        p1: Point::new(seg.p1.x - nx, seg.p1.y - ny),
                        p2: Point::new(seg.p2.x - nx, seg.p2.y - ny),
                    },
                );
            }
            SegmentKind::Arc => {
                let Some(p_mid) = seg.p_mid else { continue };
                let circle = match fit_circle(seg.p1, p_mid, seg.p2) {
                    Ok(c) => c,
                    Err(err) => {
                        debug!(segment = seg.id, %err, "no candidate arcs for degenerate arc");
                        continue;
                    }
                };
                let sweep = arc_sweep(circle.center, seg.p1, p_mid, seg.p2);
                push(
                    &mut entities,
                    seg.id,
                    CandidateRole::ArcOuter,
                    CandidateKind::CircleArc {
                        center: circle.center,
                        radius: circle.radius + seg.tool_radius,
                        start_angle: sweep.start_angle,
                        sweep: sweep.sweep,
                    },
                );
                // Band arcs also bound the swept region from the inside.
                if circle.radius > seg.tool_radius {
                    push(
                        &mut entities,
                        seg.id,
                        CandidateRole::ArcInner,
                        CandidateKind::CircleArc {
                            center: circle.center,
                            radius: circle.radius - seg.tool_radius,
                            start_angle: sweep.start_angle,
                            sweep: sweep.sweep,
                        },
                    );
                }
            }
        }
    }

    // Terminal caps only: the very first segment's start and the very last
    // segment's end, each with its own segment's tool radius.
    if let Some(first) = segments.iter().find(|s| s.is_finite() && s.has_valid_radius()) {
        push(
            &mut entities,
            first.id,
            CandidateRole::Cap,
            CandidateKind::CircleFull {
                center: first.p1,
                radius: first.tool_radius,
            },
        );
    }
    if let Some(last) = segments.iter().rev().find(|s| s.is_finite() && s.has_valid_radius()) {
        push(
            &mut entities,
            last.id,
            CandidateRole::Cap,
            CandidateKind::CircleFull {
                center: last.p2,
                radius: last.tool_radius,
            },
        );
    }

    entities
}
