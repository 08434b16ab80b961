//! # Typeforge Path
//!
//! Turns SVG path data into closed 2D polygon shapes ready for extrusion.
//!
//! ## Architecture
//!
//! ```text
//! path data (d attribute) → PathOutline (typed commands) → Shape2D (rings)
//! ```
//!
//! Parsing raw SVG markup is the upstream collaborator's job; this crate
//! starts at the per-path command data. Curve commands are flattened into
//! polylines, and subpath winding is resolved into filled contours and
//! holes according to a caller-supplied winding convention (SVG files
//! disagree on whether clockwise means "fill" or "hole", and the path data
//! alone cannot settle it).

pub mod command;
pub mod shape;

pub use command::{PathCommand, PathError, PathOutline};
pub use shape::{interpret, interpret_path_data, Shape2D};
