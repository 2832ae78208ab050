//! Boolean union of swept polygons.
//!
//! The union primitive itself is an external capability consumed through the
//! narrow [`BooleanUnion`] trait; [`OverlayUnion`] adapts the `i_overlay`
//! crate to it. Everything else in this module is normalization: subject
//! rings are deduplicated, canonicalized to one winding and validated before
//! they reach the backend, so the non-zero fill rule merges overlapping
//! same-sign shapes instead of treating them as holes.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use tracing::debug;

use crate::error::BoundaryResult;
use crate::offset::OffsetPolygon;

/// A ring of integer-scaled coordinates, implicitly closed (the last vertex
/// connects back to the first; no duplicated closing vertex is stored).
pub type IntRing = Vec<[i64; 2]>;

/// Fill rule for the union step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionFillRule {
    /// Merges overlapping same-winding subjects; the rule used by the
    /// boundary pipeline.
    NonZero,
    /// Alternating rule, kept for completeness of the trait contract.
    EvenOdd,
}

/// Narrow interface over an external boolean-union library.
///
/// Implementations take normalized subject rings and return the rings
/// bounding the unioned region. Backend failures propagate unchanged; the
/// engine has no way to repair a failed union call.
pub trait BooleanUnion {
    fn union(&self, subjects: &[IntRing], fill_rule: UnionFillRule) -> BoundaryResult<Vec<IntRing>>;
}

/// `i_overlay`-backed union implementation.
///
/// Integer rings are fed through the float overlay API as integer-valued
/// coordinates (exact in `f64` at any practical scale) and result vertices
/// are rounded back onto the integer grid.
#[derive(Debug, Default, Clone, Copy)]
pub struct OverlayUnion;

impl BooleanUnion for OverlayUnion {
    fn union(&self, subjects: &[IntRing], fill_rule: UnionFillRule) -> BoundaryResult<Vec<IntRing>> {
        if subjects.is_empty() {
            return Ok(Vec::new());
        }

        let paths: Vec<Vec<[f64; 2]>> = subjects
            .iter()
            .map(|ring| ring.iter().map(|p| [p[0] as f64, p[1] as f64]).collect())
            .collect();

        let fill = match fill_rule {
            UnionFillRule::NonZero => FillRule::NonZero,
            UnionFillRule::EvenOdd => FillRule::EvenOdd,
        };

        let subject = vec![paths[0].clone()];
        let clip: Vec<Vec<[f64; 2]>> = paths[1..].to_vec();
        let shapes = subject.overlay(&clip, OverlayRule::Union, fill);

        let mut rings: Vec<IntRing> = Vec::new();
        for shape in shapes {
            for contour in shape {
                if contour.len() >= 3 {
                    rings.push(
                        contour
                            .iter()
                            .map(|p| [p[0].round() as i64, p[1].round() as i64])
                            .collect(),
                    );
                }
            }
        }
        Ok(rings)
    }
}

/// Normalizes one subject ring for the union step.
///
/// Removes consecutive duplicate vertices, drops an explicit closing vertex,
/// discards rings with fewer than 3 remaining vertices and flips clockwise
/// rings so every subject shares counter-clockwise winding.
pub fn normalize_ring(ring: &[[i64; 2]]) -> Option<IntRing> {
    let mut clean: IntRing = Vec::with_capacity(ring.len());
    for &p in ring {
        if clean.last() != Some(&p) {
            clean.push(p);
        }
    }
    // Rings are implicitly closed; an explicit closing vertex is redundant.
    while clean.len() > 1 && clean.first() == clean.last() {
        clean.pop();
    }
    if clean.len() < 3 {
        return None;
    }
    if signed_area_i64(&clean) < 0 {
        clean.reverse();
    }
    Some(clean)
}

/// Twice the signed shoelace area of an integer ring, in `i128` to avoid
/// overflow at large scales. Positive for counter-clockwise winding.
fn signed_area_i64(ring: &[[i64; 2]]) -> i128 {
    let mut sum: i128 = 0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        sum += a[0] as i128 * b[1] as i128 - b[0] as i128 * a[1] as i128;
    }
    sum
}

/// Unions all swept polygons into boundary rings.
///
/// Pure function: normalizes every subject, delegates to the injected
/// backend with the non-zero fill rule and returns the raw result rings.
pub fn union_polygons(
    polygons: &[OffsetPolygon],
    backend: &dyn BooleanUnion,
) -> BoundaryResult<Vec<IntRing>> {
    let subjects: Vec<IntRing> = polygons
        .iter()
        .filter_map(|p| normalize_ring(&p.ring))
        .collect();

    debug!(
        subjects = subjects.len(),
        dropped = polygons.len() - subjects.len(),
        "unioning swept polygons"
    );

    if subjects.is_empty() {
        return Ok(Vec::new());
    }
    backend.union(&subjects, UnionFillRule::NonZero)
}
