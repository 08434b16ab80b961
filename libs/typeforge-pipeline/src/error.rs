//! # Pipeline Errors
//!
//! Hard failures abort the whole render call — a half-built mesh is not a
//! valid deliverable. Non-fatal conditions travel on the render report as
//! warnings instead.

use thiserror::Error;
use typeforge_mesh::MeshError;
use typeforge_path::PathError;

/// Errors that abort a render call.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A supplied path outline could not be parsed; `index` names the
    /// offending entry so the caller can fix the source artwork.
    #[error("path {index}: {source}")]
    MalformedPath {
        index: usize,
        #[source]
        source: PathError,
    },

    /// Geometry-stage failure (empty input, invalid dimension, degenerate
    /// footprint, triangulation).
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Non-fatal conditions surfaced to the caller alongside the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// The boolean operation produced a degenerate mesh — usually the two
    /// volumes did not overlap. The degenerate result is still placed in
    /// the scene for inspection.
    EmptyResult { operation: &'static str },
}
