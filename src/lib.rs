//! # CamKit
//!
//! Toolpath boundary reconstruction for CNC machining:
//! - Swept-area offset polygons around LINE/ARC toolpath segments
//! - Integer-grid boolean union of the swept areas
//! - Loop classification into outlines and islands
//! - Analytic snap-point resolution and LINE/ARC boundary reconstruction
//!
//! ## Architecture
//!
//! CamKit is organized as a workspace:
//!
//! 1. **camkit-core** - Geometry primitives: points, circle fitting, arc math
//! 2. **camkit-boundary** - The boundary reconstruction pipeline
//! 3. **camkit** - Main binary: reads a segment document, writes boundary text

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

pub use camkit_boundary::{
    format_boundaries, BoundaryBuilder, BoundaryConfig, BoundaryError, BoundaryOutput,
    BoundaryResult, PathSegment, Primitive, ReconstructedLoop, SegmentKind,
};
pub use camkit_core::{Circle, GeometryError, Point};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Input document: the toolpath segments plus an optional pipeline
/// configuration. Omitted config fields fall back to their defaults.
#[derive(Debug, Deserialize)]
pub struct BoundaryDocument {
    pub segments: Vec<PathSegment>,
    #[serde(default)]
    pub config: BoundaryConfig,
}

/// Load a segment document from a JSON file and run the boundary
/// pipeline over it, returning the LINE/ARC text blocks.
pub fn run_file(path: &Path) -> anyhow::Result<String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
    let doc: BoundaryDocument = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {}", path.display(), e))?;

    let builder = BoundaryBuilder::new(doc.config);
    let output = builder.build(&doc.segments)?;
    if output.is_empty() {
        warn!(
            "no boundary could be reconstructed from {} segment(s)",
            doc.segments.len()
        );
    }
    Ok(output.to_text())
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output to stderr (stdout carries the boundary text)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
