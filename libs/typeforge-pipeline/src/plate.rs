//! # Base-Plate Sizing
//!
//! Builds the plate from the extrusion's cached bounds. Sizing uses the
//! true post-transform footprint — not the logical `typeSize` — so bevel
//! and clamp adjustments are reflected in the plate.

use crate::extruder::ExtrudedMesh;
use crate::options::{BasePlateShape, EffectiveParams};
use config::constants::PLATE_SEGMENTS;
use typeforge_mesh::primitives::{circular_plate, rectangular_plate};
use typeforge_mesh::{Mesh, MeshError};

/// Builds the plate mesh, resting on the bed at z = 0 and extending up to
/// `baseDepth` where the (pre-shifted) extrusion meets it.
pub fn build_plate(params: &EffectiveParams, extruded: &ExtrudedMesh) -> Result<Mesh, MeshError> {
    let mesh = match params.base_plate_shape {
        BasePlateShape::Rectangular => {
            let side = extruded.max_planar_extent() + params.base_buffer;
            rectangular_plate(side, params.base_depth)?
        }
        BasePlateShape::Circular => {
            let radius = extruded.bounding_radius + params.base_buffer;
            circular_plate(radius, params.base_depth, PLATE_SEGMENTS)?
        }
    };
    log::debug!(
        "base plate: {:?}, {} triangles",
        params.base_plate_shape,
        mesh.triangle_count()
    );
    Ok(mesh)
}
