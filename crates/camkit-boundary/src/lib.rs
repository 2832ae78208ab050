//! # CamKit Boundary
//!
//! Toolpath swept-boundary reconstruction for CNC tool-center paths.
//!
//! Given an ordered list of line/arc path segments, each carrying a tool
//! radius, this crate computes the exact region swept by the tool over the
//! whole path, unions the swept shapes into simplified closed boundaries
//! (outer contours plus islands), and reconstructs those boundaries back
//! into clean analytic LINE/ARC primitives.
//!
//! ## Pipeline
//!
//! 1. [`offset`] - swept polygons per segment (capsule bodies, arc bands or
//!    pies, endpoint caps) on an integer grid
//! 2. [`union`] - boolean union of all swept polygons behind the
//!    [`BooleanUnion`] trait (non-zero fill rule)
//! 3. [`loops`] - outer/island classification of the union result by signed
//!    area
//! 4. [`candidates`] - the analytic offset curves the true boundary lies on
//! 5. [`snap`] - endpoint and pairwise-intersection snap points of those
//!    curves
//! 6. [`reconstruct`] - matching noisy union vertices back to snap points
//!    and classifying each boundary run as a line or an arc
//! 7. [`export`] - LINE/ARC text blocks for downstream CAD consumption
//!
//! The whole pipeline is synchronous and pure over its inputs: one
//! [`BoundaryBuilder::build`] call takes segments plus a [`BoundaryConfig`]
//! and returns primitives, with no shared state between calls.

pub mod builder;
pub mod candidates;
pub mod config;
pub mod error;
pub mod export;
pub mod loops;
pub mod offset;
pub mod reconstruct;
pub mod segment;
pub mod snap;
pub mod union;

pub use builder::{BoundaryBuilder, BoundaryOutput};
pub use candidates::{CandidateEntity, CandidateKind, CandidateRole};
pub use config::BoundaryConfig;
pub use error::{BoundaryError, BoundaryResult};
pub use export::format_boundaries;
pub use loops::UnionLoop;
pub use offset::{OffsetPolygon, OffsetSource, SegmentOffsetBuilder};
pub use reconstruct::{BoundaryReconstructor, Primitive, ReconstructedLoop};
pub use segment::{PathSegment, SegmentKind};
pub use snap::{SnapPoint, SnapPointSet};
pub use union::{BooleanUnion, IntRing, OverlayUnion, UnionFillRule};
