//! # Render Options
//!
//! The caller-facing configuration record and the derived effective
//! parameters the pipeline actually runs with.
//!
//! `RenderOptions` is immutable for the whole render call; every adjustment
//! the pipeline makes (depth clamping, bevel eligibility) lands in
//! [`EffectiveParams`], derived once up front.

use config::constants::GEOM_EPSILON;
use serde::{Deserialize, Serialize};
use typeforge_mesh::MeshError;

/// Footprint of the optional base plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasePlateShape {
    Rectangular,
    Circular,
}

/// One render call's configuration. Field names deserialize from the
/// camelCase keys the option form submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Solid RGB color applied to the material.
    pub object_color: [f32; 3],
    /// Produce deliberately mirrored, single-sided "inside-out" type.
    pub want_inverted_type: bool,
    /// Generate and combine a base plate.
    pub want_base_plate: bool,
    pub base_plate_shape: BasePlateShape,
    /// Plate thickness along Z.
    pub base_depth: f64,
    /// Extra margin around the extruded footprint when sizing the plate.
    pub base_buffer: f64,
    /// Signed extrusion depth: positive is raised type, negative sunken.
    pub type_depth: f64,
    /// Target size of the larger footprint dimension after scaling.
    pub type_size: f64,
    pub bevel_enabled: bool,
    /// Winding convention of the source paths: true when clockwise
    /// subpaths are the filled ones.
    #[serde(rename = "svgWindingIsCW")]
    pub svg_winding_is_cw: bool,
    pub want_wire_frame: bool,
    pub want_normals: bool,
    pub want_edges: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            object_color: [0.2, 0.6, 0.2],
            want_inverted_type: false,
            want_base_plate: true,
            base_plate_shape: BasePlateShape::Rectangular,
            base_depth: 2.0,
            base_buffer: 5.0,
            type_depth: 5.0,
            type_size: 50.0,
            bevel_enabled: false,
            svg_winding_is_cw: false,
            want_wire_frame: false,
            want_normals: false,
            want_edges: false,
        }
    }
}

/// Parameters after validation, depth clamping, and bevel resolution.
#[derive(Debug, Clone)]
pub struct EffectiveParams {
    pub type_depth: f64,
    pub type_size: f64,
    pub bevel_enabled: bool,
    pub want_base_plate: bool,
    pub base_plate_shape: BasePlateShape,
    pub base_depth: f64,
    pub base_buffer: f64,
    pub want_inverted_type: bool,
    pub svg_winding_is_cw: bool,
}

impl EffectiveParams {
    /// Validates dimensions and resolves the depth clamp and bevel rules.
    ///
    /// A sunken depth deeper than the plate is silently capped at the
    /// plate thickness; that is the pipeline's one auto-correction. The
    /// bevel survives only on raised type over a plate.
    pub fn derive(options: &RenderOptions) -> Result<Self, MeshError> {
        if !(options.type_size > 0.0 && options.type_size.is_finite()) {
            return Err(MeshError::invalid_dimension(format!(
                "typeSize must be positive: {}",
                options.type_size
            )));
        }
        if !options.type_depth.is_finite() || options.type_depth.abs() < GEOM_EPSILON {
            return Err(MeshError::invalid_dimension(format!(
                "typeDepth must be non-zero: {}",
                options.type_depth
            )));
        }
        if options.want_base_plate {
            if !(options.base_depth > 0.0 && options.base_depth.is_finite()) {
                return Err(MeshError::invalid_dimension(format!(
                    "baseDepth must be positive: {}",
                    options.base_depth
                )));
            }
            if !(options.base_buffer >= 0.0 && options.base_buffer.is_finite()) {
                return Err(MeshError::invalid_dimension(format!(
                    "baseBuffer must be non-negative: {}",
                    options.base_buffer
                )));
            }
        }

        // Sunken type cannot reach past the far face of the plate. Raised
        // type never collides with it, so only the negative case clamps.
        let mut type_depth = options.type_depth;
        if options.want_base_plate
            && type_depth < 0.0
            && type_depth.abs() > options.base_depth
        {
            log::debug!(
                "clamping typeDepth {} to -baseDepth {}",
                type_depth,
                -options.base_depth
            );
            type_depth = -options.base_depth;
        }

        // A bevel only makes physical sense on raised, based type.
        let bevel_enabled = options.bevel_enabled && type_depth > 0.0 && options.want_base_plate;

        Ok(Self {
            type_depth,
            type_size: options.type_size,
            bevel_enabled,
            want_base_plate: options.want_base_plate,
            base_plate_shape: options.base_plate_shape,
            base_depth: options.base_depth,
            base_buffer: options.base_buffer,
            want_inverted_type: options.want_inverted_type,
            svg_winding_is_cw: options.svg_winding_is_cw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base() -> RenderOptions {
        RenderOptions {
            base_depth: 3.0,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn test_sunken_depth_clamps_to_base_depth() {
        let options = RenderOptions {
            type_depth: -10.0,
            ..base()
        };
        let params = EffectiveParams::derive(&options).unwrap();
        assert_relative_eq!(params.type_depth, -3.0);
    }

    #[test]
    fn test_shallow_sunken_depth_is_untouched() {
        let options = RenderOptions {
            type_depth: -2.0,
            ..base()
        };
        let params = EffectiveParams::derive(&options).unwrap();
        assert_relative_eq!(params.type_depth, -2.0);
    }

    #[test]
    fn test_raised_depth_never_clamps() {
        let options = RenderOptions {
            type_depth: 10.0,
            ..base()
        };
        let params = EffectiveParams::derive(&options).unwrap();
        assert_relative_eq!(params.type_depth, 10.0);
    }

    #[test]
    fn test_no_clamp_without_plate() {
        let options = RenderOptions {
            type_depth: -10.0,
            want_base_plate: false,
            ..base()
        };
        let params = EffectiveParams::derive(&options).unwrap();
        assert_relative_eq!(params.type_depth, -10.0);
    }

    #[test]
    fn test_bevel_requires_raised_type_and_plate() {
        let raised = RenderOptions {
            bevel_enabled: true,
            type_depth: 5.0,
            ..base()
        };
        assert!(EffectiveParams::derive(&raised).unwrap().bevel_enabled);

        let sunken = RenderOptions {
            bevel_enabled: true,
            type_depth: -2.0,
            ..base()
        };
        assert!(!EffectiveParams::derive(&sunken).unwrap().bevel_enabled);

        let plateless = RenderOptions {
            bevel_enabled: true,
            want_base_plate: false,
            ..base()
        };
        assert!(!EffectiveParams::derive(&plateless).unwrap().bevel_enabled);
    }

    #[test]
    fn test_invalid_dimensions_are_rejected() {
        let bad_size = RenderOptions {
            type_size: 0.0,
            ..base()
        };
        assert!(EffectiveParams::derive(&bad_size).is_err());

        let bad_base = RenderOptions {
            base_depth: -1.0,
            ..base()
        };
        assert!(EffectiveParams::derive(&bad_base).is_err());

        let bad_buffer = RenderOptions {
            base_buffer: -1.0,
            ..base()
        };
        assert!(EffectiveParams::derive(&bad_buffer).is_err());

        // Plate dimensions are not validated when no plate is requested.
        let no_plate = RenderOptions {
            base_depth: -1.0,
            want_base_plate: false,
            ..base()
        };
        assert!(EffectiveParams::derive(&no_plate).is_ok());
    }

    #[test]
    fn test_options_deserialize_from_camel_case() {
        let json = r#"{
            "objectColor": [1.0, 0.0, 0.0],
            "wantBasePlate": true,
            "basePlateShape": "Circular",
            "baseDepth": 3.0,
            "typeDepth": -1.5,
            "svgWindingIsCW": true
        }"#;
        let options: RenderOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.base_plate_shape, BasePlateShape::Circular);
        assert_relative_eq!(options.type_depth, -1.5);
        assert!(options.svg_winding_is_cw);
        // Unlisted fields fall back to defaults.
        assert_relative_eq!(options.type_size, 50.0);
    }
}
