//! Top-level boundary build orchestration.

use tracing::debug;

use crate::candidates::build_candidates;
use crate::config::BoundaryConfig;
use crate::error::BoundaryResult;
use crate::export::format_boundaries;
use crate::loops::{classify_loops, UnionLoop};
use crate::offset::SegmentOffsetBuilder;
use crate::reconstruct::{BoundaryReconstructor, ReconstructedLoop};
use crate::segment::PathSegment;
use crate::snap::resolve_snap_points;
use crate::union::{union_polygons, BooleanUnion, OverlayUnion};

/// Result of one boundary build.
///
/// The classified union loops are kept alongside the reconstructed
/// primitives; a rendering layer consumes the former, the CAD export the
/// latter.
#[derive(Debug)]
pub struct BoundaryOutput {
    pub union_loops: Vec<UnionLoop>,
    pub boundaries: Vec<ReconstructedLoop>,
}

impl BoundaryOutput {
    /// True when no loop could be reconstructed. Callers are expected to
    /// surface this to the user rather than treat it as a failure.
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Serializes the reconstructed boundaries as LINE/ARC text blocks.
    pub fn to_text(&self) -> String {
        format_boundaries(&self.boundaries)
    }
}

/// Runs the whole swept-boundary pipeline for a segment list.
///
/// Every build is a full recompute: the builder holds only the
/// configuration and the union backend, and one [`build`](Self::build) call
/// shares no state with the next.
pub struct BoundaryBuilder {
    config: BoundaryConfig,
    union: Box<dyn BooleanUnion>,
}

impl BoundaryBuilder {
    /// Creates a builder with the default `i_overlay` union backend.
    pub fn new(config: BoundaryConfig) -> Self {
        Self::with_union(config, Box::new(OverlayUnion))
    }

    /// Creates a builder with an injected union backend.
    pub fn with_union(config: BoundaryConfig, union: Box<dyn BooleanUnion>) -> Self {
        Self { config, union }
    }

    /// Computes the swept-region boundary of `segments` as analytic
    /// primitives.
    ///
    /// Degenerate segments and unresolvable loops are skipped; the only
    /// propagated error is a failed boolean-union call.
    pub fn build(&self, segments: &[PathSegment]) -> BoundaryResult<BoundaryOutput> {
        let config = self.config.sanitized();

        let polygons = SegmentOffsetBuilder::new(&config).build(segments);
        let rings = union_polygons(&polygons, self.union.as_ref())?;
        let union_loops = classify_loops(&rings, &config);

        let candidates = build_candidates(segments);
        let snaps = resolve_snap_points(&candidates);

        let reconstructor = BoundaryReconstructor::new(&config, &snaps);
        let boundaries: Vec<ReconstructedLoop> = union_loops
            .iter()
            .filter_map(|l| reconstructor.reconstruct(l))
            .collect();

        debug!(
            segments = segments.len(),
            union_loops = union_loops.len(),
            reconstructed = boundaries.len(),
            "boundary build complete"
        );
        Ok(BoundaryOutput {
            union_loops,
            boundaries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoundaryError;
    use crate::union::{IntRing, UnionFillRule};

    struct FailingUnion;

    impl BooleanUnion for FailingUnion {
        fn union(
            &self,
            _subjects: &[IntRing],
            _fill_rule: UnionFillRule,
        ) -> BoundaryResult<Vec<IntRing>> {
            Err(BoundaryError::Union("injected failure".to_string()))
        }
    }

    #[test]
    fn test_empty_input_builds_empty_output() {
        let builder = BoundaryBuilder::new(BoundaryConfig::default());
        let output = builder.build(&[]).unwrap();
        assert!(output.is_empty());
        assert!(output.union_loops.is_empty());
        assert!(output.to_text().is_empty());
    }

    #[test]
    fn test_union_backend_failure_propagates() {
        use camkit_core::Point;
        let builder =
            BoundaryBuilder::with_union(BoundaryConfig::default(), Box::new(FailingUnion));
        let segments = [PathSegment::line(
            0,
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            2.0,
        )];
        let err = builder.build(&segments).unwrap_err();
        assert!(matches!(err, BoundaryError::Union(_)));
    }

    #[test]
    fn test_invalid_config_is_clamped_not_fatal() {
        use camkit_core::Point;
        let config = BoundaryConfig {
            union_scale: f64::NAN,
            chord_tolerance: -1.0,
            snap_tolerance: f64::INFINITY,
            arc_point_threshold: 0,
        };
        let builder = BoundaryBuilder::new(config);
        let segments = [PathSegment::line(
            0,
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            2.0,
        )];
        // Clamped defaults still produce a reconstructable capsule.
        let output = builder.build(&segments).unwrap();
        assert!(!output.is_empty());
    }
}
