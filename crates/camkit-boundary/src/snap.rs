//! Snap point resolution.
//!
//! Computes the finite set of points where the true boundary can have a
//! vertex: every candidate curve's endpoints plus all pairwise intersections
//! between candidate curves, restricted to the finite segment/arc sweeps.
//! Points are de-duplicated by a fixed-precision rounding key and keep the
//! set of contributing candidate ids for traceability.

use std::collections::{BTreeSet, HashMap};

use camkit_core::{angle_of, angle_within_sweep, point_on_circle, Point, EPSILON};
use tracing::debug;

use crate::candidates::{CandidateEntity, CandidateKind};

/// Rounding scale for the de-duplication key: 5 decimal places.
const SNAP_KEY_SCALE: f64 = 100_000.0;

/// Slack on segment parameters when rejecting intersections beyond an
/// endpoint.
const PARAM_EPS: f64 = 1e-6;

/// Angular slack for the arc-containment filter.
const ANGLE_EPS: f64 = 1e-6;

/// One de-duplicated snap point with its contributing candidate ids.
#[derive(Debug, Clone)]
pub struct SnapPoint {
    pub pos: Point,
    pub entities: BTreeSet<u32>,
}

/// Insertion-ordered snap point set keyed by 5-decimal rounding.
///
/// Insertion order is preserved so that downstream first-found-wins
/// tie-breaks are deterministic for a given input.
#[derive(Debug, Default)]
pub struct SnapPointSet {
    points: Vec<SnapPoint>,
    index: HashMap<(i64, i64), usize>,
}

impl SnapPointSet {
    pub(crate) fn insert(&mut self, pos: Point, ids: &[u32]) {
        if !pos.is_finite() {
            return;
        }
        let key = (
            (pos.x * SNAP_KEY_SCALE).round() as i64,
            (pos.y * SNAP_KEY_SCALE).round() as i64,
        );
        match self.index.get(&key) {
            Some(&i) => {
                // Collision on the rounded key: merge contributing ids.
                self.points[i].entities.extend(ids.iter().copied());
            }
            None => {
                self.index.insert(key, self.points.len());
                self.points.push(SnapPoint {
                    pos,
                    entities: ids.iter().copied().collect(),
                });
            }
        }
    }

    pub fn points(&self) -> &[SnapPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Resolves all snap points for a candidate curve set.
pub fn resolve_snap_points(candidates: &[CandidateEntity]) -> SnapPointSet {
    let mut set = SnapPointSet::default();

    for entity in candidates {
        for p in endpoints(&entity.kind) {
            set.insert(p, &[entity.id]);
        }
    }

    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            let a = &candidates[i];
            let b = &candidates[j];
            for p in intersect(&a.kind, &b.kind) {
                set.insert(p, &[a.id, b.id]);
            }
        }
    }

    debug!(
        candidates = candidates.len(),
        snap_points = set.len(),
        "resolved snap points"
    );
    set
}

/// Endpoints of a candidate curve. Full circles have none.
fn endpoints(kind: &CandidateKind) -> Vec<Point> {
    match *kind {
        CandidateKind::LineSeg { p1, p2 } => vec![p1, p2],
        CandidateKind::CircleFull { .. } => Vec::new(),
        CandidateKind::CircleArc {
            center,
            radius,
            start_angle,
            sweep,
        } => vec![
            point_on_circle(center, radius, start_angle),
            point_on_circle(center, radius, start_angle + sweep),
        ],
    }
}

/// All intersections between two candidate curves that lie on both finite
/// sweeps. Degenerate pairs (parallel, concentric) intersect nowhere.
fn intersect(a: &CandidateKind, b: &CandidateKind) -> Vec<Point> {
    match (a, b) {
        (&CandidateKind::LineSeg { p1: a1, p2: a2 }, &CandidateKind::LineSeg { p1: b1, p2: b2 }) => {
            line_line(a1, a2, b1, b2).into_iter().collect()
        }
        (&CandidateKind::LineSeg { p1, p2 }, circle) => {
            let Some((center, radius)) = as_circle(circle) else {
                return Vec::new();
            };
            line_circle(p1, p2, center, radius)
                .into_iter()
                .filter(|p| on_sweep(circle, *p))
                .collect()
        }
        (circle, &CandidateKind::LineSeg { p1, p2 }) => {
            let Some((center, radius)) = as_circle(circle) else {
                return Vec::new();
            };
            line_circle(p1, p2, center, radius)
                .into_iter()
                .filter(|p| on_sweep(circle, *p))
                .collect()
        }
        (ca, cb) => {
            let (Some((c1, r1)), Some((c2, r2))) = (as_circle(ca), as_circle(cb)) else {
                return Vec::new();
            };
            circle_circle(c1, r1, c2, r2)
                .into_iter()
                .filter(|p| on_sweep(ca, *p) && on_sweep(cb, *p))
                .collect()
        }
    }
}

fn as_circle(kind: &CandidateKind) -> Option<(Point, f64)> {
    match *kind {
        CandidateKind::CircleFull { center, radius } => Some((center, radius)),
        CandidateKind::CircleArc { center, radius, .. } => Some((center, radius)),
        CandidateKind::LineSeg { .. } => None,
    }
}

/// Arc-containment filter: a point on the full circle must also fall within
/// the arc's signed sweep. Lines are filtered parametrically, full circles
/// accept everything.
fn on_sweep(kind: &CandidateKind, p: Point) -> bool {
    match *kind {
        CandidateKind::CircleArc {
            center,
            start_angle,
            sweep,
            ..
        } => angle_within_sweep(angle_of(center, p), start_angle, sweep, ANGLE_EPS),
        _ => true,
    }
}

/// Segment-segment intersection via the parametric solve; both parameters
/// must land in `[0, 1]` within epsilon. Parallel pairs yield nothing.
fn line_line(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let d1x = a2.x - a1.x;
    let d1y = a2.y - a1.y;
    let d2x = b2.x - b1.x;
    let d2y = b2.y - b1.y;

    let denom = d1x * d2y - d1y * d2x;
    let scale = (d1x * d1x + d1y * d1y).sqrt() * (d2x * d2x + d2y * d2y).sqrt();
    if denom.abs() <= 1e-9 * scale.max(EPSILON) {
        return None;
    }

    let ex = b1.x - a1.x;
    let ey = b1.y - a1.y;
    let t = (ex * d2y - ey * d2x) / denom;
    let u = (ex * d1y - ey * d1x) / denom;
    if !(-PARAM_EPS..=1.0 + PARAM_EPS).contains(&t) || !(-PARAM_EPS..=1.0 + PARAM_EPS).contains(&u)
    {
        return None;
    }
    Some(Point::new(a1.x + t * d1x, a1.y + t * d1y))
}

/// Segment-circle intersection: quadratic along the segment, 0, 1 or 2 roots
/// restricted to the parameter range. Near-zero discriminants are treated as
/// tangency rather than a miss.
fn line_circle(p1: Point, p2: Point, center: Point, radius: f64) -> Vec<Point> {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let fx = p1.x - center.x;
    let fy = p1.y - center.y;

    let a = dx * dx + dy * dy;
    if a < EPSILON {
        return Vec::new();
    }
    let b = 2.0 * (fx * dx + fy * dy);
    let c = fx * fx + fy * fy - radius * radius;

    let mut disc = b * b - 4.0 * a * c;
    let tolerance = 1e-9 * (b * b).max((4.0 * a * c).abs()).max(1.0);
    if disc < -tolerance {
        return Vec::new();
    }
    disc = disc.max(0.0);
    let sq = disc.sqrt();

    let mut points = Vec::new();
    for t in [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)] {
        if (-PARAM_EPS..=1.0 + PARAM_EPS).contains(&t) {
            points.push(Point::new(p1.x + t * dx, p1.y + t * dy));
        }
    }
    points
}

/// Circle-circle intersection via the radical line construction.
/// Concentric or non-touching pairs yield nothing; tangency yields one point.
fn circle_circle(c1: Point, r1: f64, c2: Point, r2: f64) -> Vec<Point> {
    let dx = c2.x - c1.x;
    let dy = c2.y - c1.y;
    let d = (dx * dx + dy * dy).sqrt();
    if d < EPSILON {
        return Vec::new();
    }

    let a = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let h2 = r1 * r1 - a * a;
    let tolerance = 1e-9 * (r1 * r1).max(1.0);
    if h2 < -tolerance {
        return Vec::new();
    }
    let h = h2.max(0.0).sqrt();

    let ux = dx / d;
    let uy = dy / d;
    let base = Point::new(c1.x + a * ux, c1.y + a * uy);
    if h < EPSILON {
        return vec![base];
    }
    vec![
        Point::new(base.x - h * uy, base.y + h * ux),
        Point::new(base.x + h * uy, base.y - h * ux),
    ]
}
