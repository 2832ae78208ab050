//! Text serialization of reconstructed boundaries.
//!
//! The output is a simple interchange contract for a downstream CAD
//! scripting tool: one block per loop, all outer loops before all island
//! loops, each primitive on its own line with fixed-decimal coordinates.

use std::fmt::Write;

use crate::reconstruct::{Primitive, ReconstructedLoop};

/// Formats reconstructed loops as LINE/ARC primitive blocks.
pub fn format_boundaries(loops: &[ReconstructedLoop]) -> String {
    let mut out = String::new();
    let ordered = loops
        .iter()
        .filter(|l| !l.is_hole)
        .chain(loops.iter().filter(|l| l.is_hole));

    for (i, boundary) in ordered.enumerate() {
        let tag = if boundary.is_hole { "ISLAND" } else { "OUTER" };
        let _ = writeln!(out, "--- LOOP {}  {} ---", i, tag);
        for primitive in &boundary.primitives {
            match primitive {
                Primitive::Line { p1, p2 } => {
                    let _ = writeln!(
                        out,
                        "LINE {:.4} {:.4}   {:.4} {:.4}",
                        p1.x, p1.y, p2.x, p2.y
                    );
                }
                Primitive::Arc { p1, p_mid, p2 } => {
                    let _ = writeln!(
                        out,
                        "ARC  {:.4} {:.4}   {:.4} {:.4}   {:.4} {:.4}",
                        p1.x, p1.y, p_mid.x, p_mid.y, p2.x, p2.y
                    );
                }
            }
        }
    }
    out
}
