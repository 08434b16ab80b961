//! # Config Crate
//!
//! Centralized configuration constants for the typeforge pipeline.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{GEOM_EPSILON, CURVE_SEGMENTS};
//!
//! // Use GEOM_EPSILON for floating-point comparisons
//! let value: f64 = 1.0e-11; // smaller than GEOM_EPSILON (1e-9)
//! let is_zero = value.abs() < GEOM_EPSILON;
//! assert!(is_zero);
//!
//! // Use CURVE_SEGMENTS when flattening path curves
//! assert!(CURVE_SEGMENTS >= 4);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
