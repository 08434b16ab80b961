//! # Typeforge Mesh
//!
//! Triangle-mesh generation for the typeforge pipeline: prism extrusion of
//! interpreted path shapes, base-plate primitives, and CSG booleans.
//!
//! ## Architecture
//!
//! ```text
//! typeforge-path (Shape2D) → typeforge-mesh (Mesh) → typeforge-scene
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust with no native dependencies:
//! - **Boolean Operations**: BSP trees (csg.js algorithm)
//! - **Cap Triangulation**: ear clipping with hole support (`earcutr`)
//! - **Primitives**: direct mesh generation
//!
//! ## Orientation convention
//!
//! A prism extruded with positive depth is wound outward; extruding with a
//! negative depth sweeps downward and yields an inside-out shell. The solid
//! combiner relies on that sign flip when carving recesses, so the mesh
//! transform deliberately never re-winds triangles.

pub mod boolean;
pub mod error;
pub mod extrude;
pub mod mesh;
pub mod primitives;

pub use boolean::BspTree;
pub use error::MeshError;
pub use extrude::extrude_shapes;
pub use mesh::Mesh;
