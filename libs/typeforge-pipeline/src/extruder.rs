//! # Extrusion Normalization
//!
//! Turns interpreted shapes into the normalized extrusion the rest of the
//! pipeline consumes. The transform sequence is load-bearing and ordered:
//!
//! 1. raw prism at source scale (bevel inset pre-scaled so the chamfer
//!    angle survives the later X/Y scaling),
//! 2. mirror along X unless inverted type is wanted (the path coordinate
//!    convention is vertically flipped relative to the mesh convention),
//! 3. uniform X/Y scale so the larger footprint dimension equals
//!    `typeSize` (Z is a physical depth and never scales),
//! 4. center on the X/Y origin,
//! 5. rotate 180° about Z (residual orientation mismatch between the two
//!    conventions),
//! 6. cache the final bounds for base-plate sizing.

use crate::options::EffectiveParams;
use config::constants::GEOM_EPSILON;
use glam::{DMat4, DVec2, DVec3};
use std::f64::consts::PI;
use typeforge_mesh::extrude::{extrude_shapes, PrismParams};
use typeforge_mesh::{Mesh, MeshError};
use typeforge_path::Shape2D;

/// A normalized extrusion with its cached bounds.
#[derive(Debug, Clone)]
pub struct ExtrudedMesh {
    pub mesh: Mesh,
    /// Final axis-aligned bounds, cached for plate sizing.
    pub bounds: (DVec3, DVec3),
    /// Final bounding-sphere radius, cached for circular plate sizing.
    pub bounding_radius: f64,
}

impl ExtrudedMesh {
    /// Larger of the footprint's width and height.
    pub fn max_planar_extent(&self) -> f64 {
        let size = self.bounds.1 - self.bounds.0;
        size.x.max(size.y)
    }
}

/// Extrudes and normalizes the shapes per the effective parameters.
pub fn extrude(shapes: &[Shape2D], params: &EffectiveParams) -> Result<ExtrudedMesh, MeshError> {
    if shapes.is_empty() {
        return Err(MeshError::empty("no shapes to extrude"));
    }

    // The unbeveled prism's planar bounds equal the shapes' 2D bounds, so
    // the footprint is measured before building any geometry.
    let (min2, max2) = footprint(shapes);
    let size = max2 - min2;
    let max_extent = size.x.max(size.y);
    if max_extent < GEOM_EPSILON {
        return Err(MeshError::degenerate("shape footprint has zero extent"));
    }

    // Pre-scale the chamfer so it measures `typeDepth` after the X/Y
    // scaling below, keeping the visual bevel at ~45°.
    let bevel_inset = if params.bevel_enabled {
        params.type_depth * (max_extent / params.type_size)
    } else {
        0.0
    };

    let mut mesh = extrude_shapes(
        shapes,
        &PrismParams {
            depth: params.type_depth,
            bevel_inset,
        },
    )?;

    // Mirroring restores the artwork's left-right sense; skipping it is
    // what makes "inverted type" deliberately mirrored. Indices are not
    // rewound, so this flips the shell's orientation — the combiner
    // compensates.
    if !params.want_inverted_type {
        mesh.transform(&DMat4::from_scale(DVec3::new(-1.0, 1.0, 1.0)));
    }

    let scale = params.type_size / max_extent;
    mesh.transform(&DMat4::from_scale(DVec3::new(scale, scale, 1.0)));

    let (min, max) = mesh.bounding_box();
    mesh.translate(DVec3::new(
        -(min.x + max.x) / 2.0,
        -(min.y + max.y) / 2.0,
        0.0,
    ));

    mesh.transform(&DMat4::from_rotation_z(PI));

    let bounds = mesh.bounding_box();
    let (_, bounding_radius) = mesh.bounding_sphere();
    log::debug!(
        "normalized extrusion: {} triangles, footprint {:.3} x {:.3}",
        mesh.triangle_count(),
        (bounds.1 - bounds.0).x,
        (bounds.1 - bounds.0).y
    );

    Ok(ExtrudedMesh {
        mesh,
        bounds,
        bounding_radius,
    })
}

fn footprint(shapes: &[Shape2D]) -> (DVec2, DVec2) {
    let mut min = DVec2::splat(f64::INFINITY);
    let mut max = DVec2::splat(f64::NEG_INFINITY);
    for shape in shapes {
        let (shape_min, shape_max) = shape.bounds();
        min = min.min(shape_min);
        max = max.max(shape_max);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RenderOptions;
    use approx::assert_relative_eq;

    fn square_shape() -> Shape2D {
        Shape2D::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(0.0, 10.0),
        ])
    }

    fn params(update: impl FnOnce(&mut RenderOptions)) -> EffectiveParams {
        let mut options = RenderOptions {
            want_base_plate: false,
            ..RenderOptions::default()
        };
        update(&mut options);
        EffectiveParams::derive(&options).unwrap()
    }

    #[test]
    fn test_scaled_to_type_size_and_centered() {
        let extruded = extrude(&[square_shape()], &params(|_| {})).unwrap();
        let (min, max) = extruded.bounds;
        assert_relative_eq!(max.x - min.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(max.y - min.y, 50.0, epsilon = 1e-9);
        assert_relative_eq!(min.x + max.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(min.y + max.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_depth_is_never_scaled() {
        let extruded = extrude(
            &[square_shape()],
            &params(|o| o.type_depth = 5.0),
        )
        .unwrap();
        let (min, max) = extruded.bounds;
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(max.z, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_aspect_ratio_is_preserved() {
        let rect = Shape2D::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(20.0, 0.0),
            DVec2::new(20.0, 5.0),
            DVec2::new(0.0, 5.0),
        ]);
        let extruded = extrude(&[rect], &params(|_| {})).unwrap();
        let size = extruded.bounds.1 - extruded.bounds.0;
        assert_relative_eq!(size.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(size.y, 12.5, epsilon = 1e-9);
    }

    #[test]
    fn test_mirror_flips_orientation_only_when_not_inverted() {
        let normal = extrude(&[square_shape()], &params(|_| {})).unwrap();
        let inverted = extrude(
            &[square_shape()],
            &params(|o| o.want_inverted_type = true),
        )
        .unwrap();
        // The mirrored (non-inverted) shell is inside-out, the inverted
        // one right-side-out; magnitudes agree.
        assert!(normal.mesh.signed_volume() < 0.0);
        assert!(inverted.mesh.signed_volume() > 0.0);
        assert_relative_eq!(
            normal.mesh.signed_volume(),
            -inverted.mesh.signed_volume(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_bevel_angle_survives_scaling() {
        let p = EffectiveParams::derive(&RenderOptions {
            bevel_enabled: true,
            type_depth: 5.0,
            type_size: 50.0,
            base_depth: 10.0,
            ..RenderOptions::default()
        })
        .unwrap();
        let extruded = extrude(&[square_shape()], &p).unwrap();
        let (min, max) = extruded.bounds;
        // Bottom ring still spans the full footprint.
        assert_relative_eq!(max.x - min.x, 50.0, epsilon = 1e-9);
        // Top ring is inset by ~typeDepth per side after scaling: 45°.
        let top_max_x = extruded
            .mesh
            .vertices()
            .iter()
            .filter(|v| v.z > 4.9)
            .map(|v| v.x.abs())
            .fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(top_max_x, 25.0 - 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_shapes_fail() {
        let result = extrude(&[], &params(|_| {}));
        assert!(matches!(result, Err(MeshError::EmptyGeometry { .. })));
    }

    #[test]
    fn test_bounding_radius_is_cached() {
        let extruded = extrude(&[square_shape()], &params(|_| {})).unwrap();
        // At least the footprint's half-diagonal.
        assert!(extruded.bounding_radius >= (25.0f64 * 25.0 + 25.0 * 25.0).sqrt() - 1e-9);
    }
}
