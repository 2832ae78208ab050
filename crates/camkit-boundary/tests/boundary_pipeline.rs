//! End-to-end tests for the swept-boundary reconstruction pipeline.

use camkit_boundary::{BoundaryBuilder, BoundaryConfig, PathSegment, Primitive};
use camkit_core::{fit_circle, Point};

fn count_lines(primitives: &[Primitive]) -> usize {
    primitives
        .iter()
        .filter(|p| matches!(p, Primitive::Line { .. }))
        .count()
}

fn count_arcs(primitives: &[Primitive]) -> usize {
    primitives
        .iter()
        .filter(|p| matches!(p, Primitive::Arc { .. }))
        .count()
}

/// Circumradius of a reconstructed 3-point arc.
fn arc_radius(primitive: &Primitive) -> f64 {
    let Primitive::Arc { p1, p_mid, p2 } = primitive else {
        panic!("expected an arc");
    };
    fit_circle(*p1, *p_mid, *p2).unwrap().radius
}

#[test]
fn test_single_line_capsule() {
    let segments = [PathSegment::line(
        0,
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        2.0,
    )];
    let output = BoundaryBuilder::new(BoundaryConfig::default())
        .build(&segments)
        .unwrap();

    assert_eq!(output.boundaries.len(), 1);
    let capsule = &output.boundaries[0];
    assert!(!capsule.is_hole);
    assert_eq!(capsule.primitives.len(), 4);
    assert_eq!(count_lines(&capsule.primitives), 2);
    assert_eq!(count_arcs(&capsule.primitives), 2);

    // The two arcs are the semicircular end caps of tool radius 2.
    for p in &capsule.primitives {
        if matches!(p, Primitive::Arc { .. }) {
            assert!((arc_radius(p) - 2.0).abs() < 0.01);
        }
    }
}

#[test]
fn test_band_arc_inner_and_outer() {
    // Base radius 5 with tool radius 2: the swept shape is an annular band
    // bounded by arcs of radius 3 and 7 plus the two end caps.
    let segments = [PathSegment::arc(
        0,
        Point::new(5.0, 0.0),
        Point::new(0.0, 5.0),
        Point::new(-5.0, 0.0),
        2.0,
    )];
    let output = BoundaryBuilder::new(BoundaryConfig::default())
        .build(&segments)
        .unwrap();

    assert_eq!(output.boundaries.len(), 1);
    let band = &output.boundaries[0];
    assert!(!band.is_hole);
    assert_eq!(count_arcs(&band.primitives), 4);
    assert_eq!(count_lines(&band.primitives), 0);

    let mut radii: Vec<f64> = band.primitives.iter().map(arc_radius).collect();
    radii.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let expected = [2.0, 2.0, 3.0, 7.0];
    for (r, e) in radii.iter().zip(expected) {
        assert!((r - e).abs() < 0.02, "arc radius {} != {}", r, e);
    }
}

#[test]
fn test_pie_arc_has_no_inner_arc() {
    // Base radius 1 with tool radius 2: the tool swallows the arc's center,
    // so the boundary uses only the outer arc of radius 3 plus the caps.
    let segments = [PathSegment::arc(
        0,
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(-1.0, 0.0),
        2.0,
    )];
    let output = BoundaryBuilder::new(BoundaryConfig::default())
        .build(&segments)
        .unwrap();

    assert_eq!(output.boundaries.len(), 1);
    let pie = &output.boundaries[0];
    assert!(!pie.is_hole);
    assert_eq!(count_lines(&pie.primitives), 0);
    assert_eq!(count_arcs(&pie.primitives), 3);

    let mut radii: Vec<f64> = pie.primitives.iter().map(arc_radius).collect();
    radii.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let expected = [2.0, 2.0, 3.0];
    for (r, e) in radii.iter().zip(expected) {
        assert!((r - e).abs() < 0.02, "arc radius {} != {}", r, e);
    }
}

#[test]
fn test_l_chain_shared_joint() {
    // Two perpendicular lines sharing a joint. The joint gets one fused cap
    // in the union and no candidate cap, yet its outer corner still
    // reconstructs as an arc between the two offset-line endpoints.
    let segments = [
        PathSegment::line(0, Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0),
        PathSegment::line(1, Point::new(10.0, 0.0), Point::new(10.0, 10.0), 2.0),
    ];
    let output = BoundaryBuilder::new(BoundaryConfig::default())
        .build(&segments)
        .unwrap();

    assert_eq!(output.boundaries.len(), 1);
    let outline = &output.boundaries[0];
    assert!(!outline.is_hole);
    assert_eq!(count_lines(&outline.primitives), 4);
    assert_eq!(count_arcs(&outline.primitives), 3);
}

#[test]
fn test_closed_frame_produces_island() {
    // A closed rectangular frame: the union has an outer rounded-corner
    // boundary and a sharp-cornered island where the tool never reaches.
    let segments = [
        PathSegment::line(0, Point::new(0.0, 0.0), Point::new(20.0, 0.0), 1.0),
        PathSegment::line(1, Point::new(20.0, 0.0), Point::new(20.0, 20.0), 1.0),
        PathSegment::line(2, Point::new(20.0, 20.0), Point::new(0.0, 20.0), 1.0),
        PathSegment::line(3, Point::new(0.0, 20.0), Point::new(0.0, 0.0), 1.0),
    ];
    let output = BoundaryBuilder::new(BoundaryConfig::default())
        .build(&segments)
        .unwrap();

    assert_eq!(output.union_loops.len(), 2);
    let outer_count = output.union_loops.iter().filter(|l| !l.is_hole).count();
    let hole_count = output.union_loops.iter().filter(|l| l.is_hole).count();
    assert_eq!(outer_count, 1);
    assert_eq!(hole_count, 1);

    // Signed areas carry the one fixed convention: positive outer, negative
    // island, and the outer region strictly contains the island.
    let outer = output.union_loops.iter().find(|l| !l.is_hole).unwrap();
    let hole = output.union_loops.iter().find(|l| l.is_hole).unwrap();
    assert!(outer.signed_area > 0.0);
    assert!(hole.signed_area < 0.0);
    assert!(outer.signed_area > hole.signed_area.abs());

    assert_eq!(output.boundaries.len(), 2);
    let island = output.boundaries.iter().find(|b| b.is_hole).unwrap();
    // The island is the inner 18x18 square: four sharp line runs.
    assert_eq!(count_lines(&island.primitives), 4);
    assert_eq!(count_arcs(&island.primitives), 0);

    let outline = output.boundaries.iter().find(|b| !b.is_hole).unwrap();
    // Rounded outer rectangle: four sides, four corner arcs.
    assert_eq!(count_lines(&outline.primitives), 4);
    assert_eq!(count_arcs(&outline.primitives), 4);
}

#[test]
fn test_pipeline_is_idempotent() {
    let segments = [
        PathSegment::line(0, Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2.0),
        PathSegment::arc(
            1,
            Point::new(10.0, 0.0),
            Point::new(15.0, 5.0),
            Point::new(20.0, 0.0),
            2.0,
        ),
    ];
    let builder = BoundaryBuilder::new(BoundaryConfig::default());
    let first = builder.build(&segments).unwrap().to_text();
    let second = builder.build(&segments).unwrap().to_text();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_sampling_density_does_not_flip_classification() {
    let segments = [PathSegment::line(
        0,
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        2.0,
    )];

    for chord_tolerance in [0.05, 0.01, 0.005] {
        let config = BoundaryConfig {
            chord_tolerance,
            ..Default::default()
        };
        let output = BoundaryBuilder::new(config).build(&segments).unwrap();
        assert_eq!(output.boundaries.len(), 1);
        let capsule = &output.boundaries[0];
        // Straight edges stay lines and curved caps stay arcs at every
        // sampling density.
        assert_eq!(count_lines(&capsule.primitives), 2, "tol {}", chord_tolerance);
        assert_eq!(count_arcs(&capsule.primitives), 2, "tol {}", chord_tolerance);
    }
}

#[test]
fn test_degenerate_segments_never_abort() {
    let segments = [
        // Collinear arc points: body degrades to caps.
        PathSegment::arc(
            0,
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            2.0,
        ),
        // Zero-length line.
        PathSegment::line(1, Point::new(10.0, 0.0), Point::new(10.0, 0.0), 2.0),
        // Invalid radius.
        PathSegment::line(2, Point::new(10.0, 0.0), Point::new(20.0, 0.0), -1.0),
    ];
    // Nothing to reconstruct, but the build itself must succeed.
    let output = BoundaryBuilder::new(BoundaryConfig::default())
        .build(&segments)
        .unwrap();
    assert!(output.is_empty());
}

#[test]
fn test_export_text_contract() {
    let segments = [PathSegment::line(
        0,
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        2.0,
    )];
    let output = BoundaryBuilder::new(BoundaryConfig::default())
        .build(&segments)
        .unwrap();
    let text = output.to_text();

    assert!(text.starts_with("--- LOOP 0  OUTER ---\n"));
    assert_eq!(text.matches("LINE ").count(), 2);
    assert_eq!(text.matches("ARC  ").count(), 2);
    assert!(!text.contains("ISLAND"));
}
