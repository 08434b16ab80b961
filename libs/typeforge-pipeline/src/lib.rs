//! # Typeforge Pipeline
//!
//! Converts 2D vector path outlines into a solid, 3D-printable mesh: the
//! outlines are extruded into a volume, optionally unioned with or carved
//! into a base plate, and the result is placed into a caller-owned scene
//! for STL export.
//!
//! ## Architecture
//!
//! ```text
//! path data → typeforge-path → typeforge-mesh → typeforge-scene
//!                    ↑ orchestrated by this crate ↑
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use typeforge_pipeline::{render, RenderOptions};
//! use typeforge_scene::{export_ascii, RenderContext};
//!
//! let mut ctx = RenderContext::new();
//! let options = RenderOptions::default();
//! let report = render(&["M 0 0 H 10 V 10 H 0 Z"], &mut ctx.scene, &options)?;
//! let stl = export_ascii(&ctx.scene, "label");
//! ```

pub mod combine;
pub mod error;
pub mod extruder;
pub mod options;
pub mod plate;
pub mod render;

pub use error::{RenderError, RenderWarning};
pub use extruder::ExtrudedMesh;
pub use options::{BasePlateShape, EffectiveParams, RenderOptions};
pub use render::{render, RenderReport};
