//! Outer/island classification of union result rings.

use camkit_core::Point;
use tracing::debug;

use crate::config::BoundaryConfig;
use crate::union::IntRing;

/// One classified boundary loop in world units.
///
/// `points` is an open ring: the last vertex implicitly connects back to the
/// first. The sign convention is fixed across the whole pipeline:
/// counter-clockwise (positive shoelace area) loops are outer boundaries,
/// clockwise (negative area) loops are holes/islands.
#[derive(Debug, Clone)]
pub struct UnionLoop {
    pub points: Vec<Point>,
    pub is_hole: bool,
    pub signed_area: f64,
}

/// Signed shoelace area of an open ring of world points.
pub fn signed_area(points: &[Point]) -> f64 {
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Classifies every union result ring into an outer or island loop.
pub fn classify_loops(rings: &[IntRing], config: &BoundaryConfig) -> Vec<UnionLoop> {
    let loops: Vec<UnionLoop> = rings
        .iter()
        .filter_map(|ring| classify_ring(ring, config.union_scale))
        .collect();
    debug!(
        rings = rings.len(),
        outer = loops.iter().filter(|l| !l.is_hole).count(),
        islands = loops.iter().filter(|l| l.is_hole).count(),
        "classified union loops"
    );
    loops
}

fn classify_ring(ring: &IntRing, scale: f64) -> Option<UnionLoop> {
    let mut points: Vec<Point> = ring
        .iter()
        .map(|p| Point::new(p[0] as f64 / scale, p[1] as f64 / scale))
        .collect();

    // Integer rounding can leave vertices a grid cell or two apart where the
    // true geometry has one point; collapse them with a grid-derived epsilon.
    let eps = 2.0 / scale;
    points.dedup_by(|b, a| a.distance_to(b) <= eps);
    // Re-check closure: drop an explicit closing vertex left by the backend.
    while points.len() > 1 && points[0].distance_to(points.last().unwrap()) <= eps {
        points.pop();
    }
    if points.len() < 3 {
        debug!("discarding degenerate union loop");
        return None;
    }

    let area = signed_area(&points);
    Some(UnionLoop {
        points,
        is_hole: area < 0.0,
        signed_area: area,
    })
}
