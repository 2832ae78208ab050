//! Error types for geometry operations.

use thiserror::Error;

/// Errors raised by the planar geometry kernel.
///
/// Callers that can recover from a degenerate configuration (for example by
/// skipping the offending entity) are expected to handle these locally rather
/// than propagate them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The three points defining an arc are collinear, so no circle fits them.
    #[error("Collinear arc points: no circle passes through the three defining points")]
    CollinearArcPoints,

    /// A segment's endpoints coincide (length below epsilon).
    #[error("Degenerate segment: endpoints coincide")]
    DegenerateSegment,

    /// An input coordinate is NaN or infinite.
    #[error("Non-finite coordinate in input")]
    NonFiniteInput,
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
