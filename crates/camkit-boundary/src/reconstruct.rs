//! Boundary reconstruction: matching union loop vertices back to analytic
//! snap points and classifying the runs between them as lines or arcs.

use std::collections::HashMap;

use camkit_core::Point;
use tracing::{debug, warn};

use crate::config::BoundaryConfig;
use crate::loops::UnionLoop;
use crate::snap::SnapPointSet;

/// One reconstructed analytic primitive.
///
/// Arcs carry no explicit direction; consumers recover it from the three
/// points when needed.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line { p1: Point, p2: Point },
    Arc { p1: Point, p_mid: Point, p2: Point },
}

/// One boundary loop reconstructed into primitives.
#[derive(Debug, Clone)]
pub struct ReconstructedLoop {
    pub is_hole: bool,
    pub primitives: Vec<Primitive>,
}

/// A matched (snap point, loop vertex) pair.
#[derive(Debug, Clone, Copy)]
struct SnapHit {
    snap: usize,
    vertex: usize,
}

/// Spatial hash over the snap points, cell size equal to the snap tolerance,
/// so a nearest-neighbor query only inspects the 3x3 neighborhood.
struct SnapGrid {
    cell: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SnapGrid {
    fn new(snaps: &SnapPointSet, cell: f64) -> Self {
        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, s) in snaps.points().iter().enumerate() {
            cells.entry(Self::key(s.pos, cell)).or_default().push(i);
        }
        Self { cell, cells }
    }

    fn key(p: Point, cell: f64) -> (i64, i64) {
        ((p.x / cell).floor() as i64, (p.y / cell).floor() as i64)
    }

    /// Nearest not-yet-used snap point within `tol` of `p`.
    ///
    /// Ties are broken first-found: cells are scanned in a fixed dy/dx order
    /// and points within a cell in insertion order, and only a strictly
    /// nearer point replaces the current best. Changing this order would
    /// change which primitive some boundary runs become, so it is part of
    /// the observable behavior.
    fn nearest_unused(
        &self,
        p: Point,
        tol: f64,
        snaps: &SnapPointSet,
        used: &[bool],
    ) -> Option<usize> {
        let (cx, cy) = Self::key(p, self.cell);
        let mut best: Option<(f64, usize)> = None;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(bucket) = self.cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &i in bucket {
                    if used[i] {
                        continue;
                    }
                    let dist = snaps.points()[i].pos.distance_to(&p);
                    if dist <= tol && best.map_or(true, |(b, _)| dist < b) {
                        best = Some((dist, i));
                    }
                }
            }
        }
        best.map(|(_, i)| i)
    }
}

/// Reconstructs classified union loops against one snap point set.
pub struct BoundaryReconstructor<'a> {
    config: BoundaryConfig,
    snaps: &'a SnapPointSet,
    grid: SnapGrid,
}

impl<'a> BoundaryReconstructor<'a> {
    pub fn new(config: &BoundaryConfig, snaps: &'a SnapPointSet) -> Self {
        Self {
            config: *config,
            snaps,
            grid: SnapGrid::new(snaps, config.snap_tolerance),
        }
    }

    /// Reconstructs one loop, or `None` when it cannot be resolved.
    ///
    /// Failures here never abort the whole build; each loop is processed
    /// independently and unresolvable ones are simply omitted.
    pub fn reconstruct(&self, union_loop: &UnionLoop) -> Option<ReconstructedLoop> {
        if self.snaps.is_empty() {
            return None;
        }
        let tol = self.config.snap_tolerance;
        let points = &union_loop.points;

        // Walk the loop vertices in order, matching each to the nearest
        // unused snap point. A fresh visited vector per loop keeps snap
        // points from being claimed twice within the same loop.
        let mut used = vec![false; self.snaps.len()];
        let mut hits: Vec<SnapHit> = Vec::new();
        for (vertex, p) in points.iter().enumerate() {
            if let Some(snap) = self.grid.nearest_unused(*p, tol, self.snaps, &used) {
                used[snap] = true;
                hits.push(SnapHit { snap, vertex });
            }
        }

        // Collapse hits whose snap points are within tolerance of their
        // predecessor's. Removal can create new adjacent near-duplicates, so
        // the scan restarts after each one. The wrap-around pair counts too.
        'scan: loop {
            for i in 1..hits.len() {
                let prev = self.snap_pos(hits[i - 1]);
                if self.snap_pos(hits[i]).distance_to(&prev) <= tol {
                    hits.remove(i);
                    continue 'scan;
                }
            }
            if hits.len() > 1 {
                let last = hits.len() - 1;
                if self.snap_pos(hits[last]).distance_to(&self.snap_pos(hits[0])) <= tol {
                    hits.remove(last);
                    continue 'scan;
                }
            }
            break;
        }

        if hits.len() < 3 {
            warn!(
                vertices = points.len(),
                hits = hits.len(),
                "loop has too few snap matches, dropping"
            );
            return None;
        }

        // Force closure: the final run connects the last hit back to the
        // first around the end of the vertex ring.
        hits.push(hits[0]);

        let n = points.len();
        let mut primitives = Vec::with_capacity(hits.len() - 1);
        for pair in hits.windows(2) {
            let pa = self.snap_pos(pair[0]);
            let pb = self.snap_pos(pair[1]);

            // Interior vertices strictly between the two matched vertices,
            // excluding anything within tolerance of either endpoint snap.
            let mut interior = Vec::new();
            let mut i = (pair[0].vertex + 1) % n;
            while i != pair[1].vertex {
                let v = points[i];
                if v.distance_to(&pa) > tol && v.distance_to(&pb) > tol {
                    interior.push(v);
                }
                i = (i + 1) % n;
            }

            if interior.len() < self.config.arc_point_threshold {
                primitives.push(Primitive::Line { p1: pa, p2: pb });
            } else {
                // Any near-mid interior vertex pins the arc; it does not
                // need to be angularly central.
                let p_mid = interior[interior.len() / 2];
                primitives.push(Primitive::Arc { p1: pa, p_mid, p2: pb });
            }
        }

        debug!(
            is_hole = union_loop.is_hole,
            primitives = primitives.len(),
            "reconstructed loop"
        );
        Some(ReconstructedLoop {
            is_hole: union_loop.is_hole,
            primitives,
        })
    }

    fn snap_pos(&self, hit: SnapHit) -> Point {
        self.snaps.points()[hit.snap].pos
    }
}
