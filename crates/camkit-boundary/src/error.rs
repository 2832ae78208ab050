//! Error types for the boundary reconstruction engine.
//!
//! The engine is designed to degrade rather than fail: geometric degeneracies
//! and unmatched loops are skipped locally. The only error that propagates out
//! of a build is a failed boolean-union call, which the engine has no way to
//! repair.

use thiserror::Error;

/// Errors that can abort a boundary build.
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// The external boolean-union backend failed.
    #[error("Boolean union failed: {0}")]
    Union(String),
}

/// Result type alias for boundary build operations.
pub type BoundaryResult<T> = Result<T, BoundaryError>;
