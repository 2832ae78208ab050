//! Swept-area polygon construction.
//!
//! Each path segment plus its tool radius becomes one or more integer-scaled
//! polygons: a capsule body for lines, a band (annular) or pie (sector) body
//! for arcs, and a full-circle cap at each endpoint. Caps shared by adjacent
//! segments are de-duplicated so a joint produces exactly one cap.

use std::collections::HashSet;
use std::f64::consts::TAU;

use camkit_core::{
    arc_sample_count, arc_sweep, fit_circle, point_on_circle, Point, EPSILON,
};
use tracing::debug;

use crate::config::BoundaryConfig;
use crate::segment::{PathSegment, SegmentKind};
use crate::union::IntRing;

/// Which swept shape a polygon came from. Traceability only; the union step
/// treats all subjects alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetSource {
    LineBody,
    ArcBand,
    ArcPie,
    Cap,
}

/// One swept-area subject polygon on the integer grid.
#[derive(Debug, Clone)]
pub struct OffsetPolygon {
    pub ring: IntRing,
    pub source: OffsetSource,
    pub segment_id: u32,
}

/// Scale used to quantize (center, radius) into a cap de-duplication key.
/// Independent of the union quantization scale.
const CAP_KEY_SCALE: f64 = 10_000.0;

/// Builds the swept polygons for a whole segment list.
pub struct SegmentOffsetBuilder<'a> {
    config: &'a BoundaryConfig,
}

impl<'a> SegmentOffsetBuilder<'a> {
    pub fn new(config: &'a BoundaryConfig) -> Self {
        Self { config }
    }

    /// Builds bodies and de-duplicated caps for every segment.
    ///
    /// Degenerate inputs (non-finite coordinates, zero-length lines,
    /// collinear arc points, invalid radii) are skipped silently; a segment
    /// with no body can still contribute endpoint caps.
    pub fn build(&self, segments: &[PathSegment]) -> Vec<OffsetPolygon> {
        let mut polygons = Vec::new();
        let mut cap_keys: HashSet<(i64, i64, i64)> = HashSet::new();

        for seg in segments {
            if !seg.is_finite() {
                debug!(segment = seg.id, "skipping segment with non-finite points");
                continue;
            }

            if seg.has_valid_radius() {
                match seg.kind {
                    SegmentKind::Line => {
                        if let Some(body) = self.line_body(seg) {
                            polygons.push(body);
                        }
                    }
                    SegmentKind::Arc => {
                        if let Some(body) = self.arc_body(seg) {
                            polygons.push(body);
                        }
                    }
                }
            }

            for endpoint in [seg.p1, seg.p2] {
                if let Some(cap) = self.cap(seg.id, endpoint, seg.tool_radius, &mut cap_keys) {
                    polygons.push(cap);
                }
            }
        }

        debug!(
            segments = segments.len(),
            polygons = polygons.len(),
            "built swept polygons"
        );
        polygons
    }

    /// Quadrilateral capsule body: both endpoints offset by the tool radius
    /// along the segment normal, on each side.
    fn line_body(&self, seg: &PathSegment) -> Option<OffsetPolygon> {
        let dx = seg.p2.x - seg.p1.x;
        let dy = seg.p2.y - seg.p1.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len < EPSILON {
            debug!(segment = seg.id, "skipping zero-length line body");
            return None;
        }
        let r = seg.tool_radius;
        let nx = -dy / len * r;
        let ny = dx / len * r;

        let ring = self.scale_ring(&[
            Point::new(seg.p1.x + nx, seg.p1.y + ny),
            Point::new(seg.p2.x + nx, seg.p2.y + ny),
            Point::new(seg.p2.x - nx, seg.p2.y - ny),
            Point::new(seg.p1.x - nx, seg.p1.y - ny),
        ]);
        Some(OffsetPolygon {
            ring,
            source: OffsetSource::LineBody,
            segment_id: seg.id,
        })
    }

    /// Band (annulus) or pie (sector) body for a 3-point arc.
    ///
    /// A failed circle fit degrades the arc to its endpoint caps only.
    fn arc_body(&self, seg: &PathSegment) -> Option<OffsetPolygon> {
        let p_mid = seg.p_mid?;
        let circle = match fit_circle(seg.p1, p_mid, seg.p2) {
            Ok(c) => c,
            Err(err) => {
                debug!(segment = seg.id, %err, "arc body fit failed, caps only");
                return None;
            }
        };
        let sweep = arc_sweep(circle.center, seg.p1, p_mid, seg.p2);
        let r = seg.tool_radius;
        let outer_radius = circle.radius + r;

        let outer = self.sample_arc(circle.center, outer_radius, sweep.start_angle, sweep.sweep);

        if circle.radius > r {
            // Band: outer ring forward, inner ring back.
            let inner_radius = circle.radius - r;
            let mut inner =
                self.sample_arc(circle.center, inner_radius, sweep.start_angle, sweep.sweep);
            inner.reverse();

            let mut points = outer;
            points.extend(inner);
            Some(OffsetPolygon {
                ring: self.scale_ring(&points),
                source: OffsetSource::ArcBand,
                segment_id: seg.id,
            })
        } else {
            // Pie: sector from the center out to the offset arc.
            let mut points = vec![circle.center];
            points.extend(outer);
            Some(OffsetPolygon {
                ring: self.scale_ring(&points),
                source: OffsetSource::ArcPie,
                segment_id: seg.id,
            })
        }
    }

    /// Full-circle cap at a segment endpoint, de-duplicated across the whole
    /// segment list by a quantized (center, radius) key.
    fn cap(
        &self,
        segment_id: u32,
        center: Point,
        radius: f64,
        seen: &mut HashSet<(i64, i64, i64)>,
    ) -> Option<OffsetPolygon> {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return None;
        }
        let key = (
            (center.x * CAP_KEY_SCALE).round() as i64,
            (center.y * CAP_KEY_SCALE).round() as i64,
            (radius * CAP_KEY_SCALE).round() as i64,
        );
        if !seen.insert(key) {
            return None;
        }

        let n = arc_sample_count(radius, TAU, self.config.chord_tolerance);
        let points: Vec<Point> = (0..n)
            .map(|k| point_on_circle(center, radius, k as f64 * TAU / n as f64))
            .collect();
        Some(OffsetPolygon {
            ring: self.scale_ring(&points),
            source: OffsetSource::Cap,
            segment_id,
        })
    }

    /// Samples an arc into a polyline, endpoints included, with the point
    /// count chosen by the chordal-sagitta rule.
    fn sample_arc(&self, center: Point, radius: f64, start_angle: f64, sweep: f64) -> Vec<Point> {
        let n = arc_sample_count(radius, sweep.abs(), self.config.chord_tolerance);
        (0..=n)
            .map(|k| point_on_circle(center, radius, start_angle + sweep * k as f64 / n as f64))
            .collect()
    }

    fn scale_ring(&self, points: &[Point]) -> IntRing {
        let s = self.config.union_scale;
        points
            .iter()
            .map(|p| [(p.x * s).round() as i64, (p.y * s).round() as i64])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_source(polygons: &[OffsetPolygon], source: OffsetSource) -> usize {
        polygons.iter().filter(|p| p.source == source).count()
    }

    #[test]
    fn test_line_capsule_parts() {
        let config = BoundaryConfig::default();
        let segments = [PathSegment::line(
            0,
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            2.0,
        )];
        let polygons = SegmentOffsetBuilder::new(&config).build(&segments);

        assert_eq!(count_source(&polygons, OffsetSource::LineBody), 1);
        assert_eq!(count_source(&polygons, OffsetSource::Cap), 2);

        // Body is the +/- tool radius quadrilateral, on the integer grid.
        let body = polygons
            .iter()
            .find(|p| p.source == OffsetSource::LineBody)
            .unwrap();
        assert_eq!(
            body.ring,
            vec![[0, 20_000], [100_000, 20_000], [100_000, -20_000], [0, -20_000]]
        );
    }

    #[test]
    fn test_cap_dedup_at_shared_joint() {
        let config = BoundaryConfig::default();
        let segments = [
            PathSegment::line(0, Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0),
            PathSegment::line(1, Point::new(10.0, 0.0), Point::new(10.0, 10.0), 2.0),
        ];
        let polygons = SegmentOffsetBuilder::new(&config).build(&segments);
        // Shared joint produces one cap, not two: 3 caps across the chain.
        assert_eq!(count_source(&polygons, OffsetSource::Cap), 3);
    }

    #[test]
    fn test_band_vs_pie_selection() {
        let config = BoundaryConfig::default();
        let band = PathSegment::arc(
            0,
            Point::new(5.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(-5.0, 0.0),
            2.0,
        );
        let pie = PathSegment::arc(
            1,
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(-1.0, 0.0),
            2.0,
        );
        let polygons = SegmentOffsetBuilder::new(&config).build(&[band, pie]);
        assert_eq!(count_source(&polygons, OffsetSource::ArcBand), 1);
        assert_eq!(count_source(&polygons, OffsetSource::ArcPie), 1);
    }

    #[test]
    fn test_collinear_arc_degrades_to_caps() {
        let config = BoundaryConfig::default();
        let segments = [PathSegment::arc(
            0,
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            2.0,
        )];
        let polygons = SegmentOffsetBuilder::new(&config).build(&segments);
        assert_eq!(count_source(&polygons, OffsetSource::ArcBand), 0);
        assert_eq!(count_source(&polygons, OffsetSource::ArcPie), 0);
        assert_eq!(count_source(&polygons, OffsetSource::Cap), 2);
    }

    #[test]
    fn test_invalid_radius_contributes_nothing() {
        let config = BoundaryConfig::default();
        let segments = [PathSegment::line(
            0,
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            0.0,
        )];
        let polygons = SegmentOffsetBuilder::new(&config).build(&segments);
        assert!(polygons.is_empty());
    }

    #[test]
    fn test_non_finite_segment_skipped() {
        let config = BoundaryConfig::default();
        let segments = [PathSegment::line(
            0,
            Point::new(f64::NAN, 0.0),
            Point::new(10.0, 0.0),
            2.0,
        )];
        let polygons = SegmentOffsetBuilder::new(&config).build(&segments);
        assert!(polygons.is_empty());
    }

    #[test]
    fn test_zero_length_line_still_caps() {
        let config = BoundaryConfig::default();
        let segments = [PathSegment::line(
            0,
            Point::new(3.0, 3.0),
            Point::new(3.0, 3.0),
            1.0,
        )];
        let polygons = SegmentOffsetBuilder::new(&config).build(&segments);
        assert_eq!(count_source(&polygons, OffsetSource::LineBody), 0);
        // Identical endpoints de-duplicate to a single cap.
        assert_eq!(count_source(&polygons, OffsetSource::Cap), 1);
    }
}
