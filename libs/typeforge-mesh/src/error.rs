//! # Mesh Errors
//!
//! Error types for mesh generation operations. All variants are hard
//! failures: the render call that hit one aborts with no partial output.

use thiserror::Error;

/// Errors that can occur during mesh generation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// There was nothing to extrude.
    #[error("empty geometry: {message}")]
    EmptyGeometry { message: String },

    /// A configured size or depth is non-positive or non-finite.
    #[error("invalid dimension: {message}")]
    InvalidDimension { message: String },

    /// Input geometry collapsed to nothing (zero-extent footprint,
    /// zero-area rings).
    #[error("degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Cap triangulation failed.
    #[error("triangulation failed: {message}")]
    TriangulationFailed { message: String },
}

impl MeshError {
    /// Creates an empty geometry error.
    pub fn empty(message: impl Into<String>) -> Self {
        Self::EmptyGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid dimension error.
    pub fn invalid_dimension(message: impl Into<String>) -> Self {
        Self::InvalidDimension {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a triangulation failure.
    pub fn triangulation(message: impl Into<String>) -> Self {
        Self::TriangulationFailed {
            message: message.into(),
        }
    }
}
