//! # Typeforge Scene
//!
//! Scene assembly and mesh export for the typeforge pipeline.
//!
//! The scene graph is a tagged variant type — {Mesh, Group, Light, Helper}
//! — so walking it never needs to sniff node types: the exporter matches on
//! the variant and serializes meshes only. Diagnostic overlays (wireframe,
//! face normals, hard edges) are `Helper` nodes and never reach the
//! exported file. The caller owns the scene through [`RenderContext`];
//! there is no module-level scene state.

pub mod node;
pub mod overlay;
pub mod stl;

pub use node::{Group, Helper, HelperKind, Light, Material, MeshInstance, RenderContext, SceneNode};
pub use stl::{export_ascii, export_binary, parse_ascii, StlParseError};
