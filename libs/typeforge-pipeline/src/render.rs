//! # Render Entry Point
//!
//! One synchronous call: path data plus options in, scene group populated,
//! report out. Stages run in a fixed order — interpret, extrude, plate,
//! combine, assemble — and any hard error aborts the whole call.

use crate::error::{RenderError, RenderWarning};
use crate::extruder;
use crate::options::{EffectiveParams, RenderOptions};
use crate::{combine, plate};
use config::constants::{HARD_EDGE_ANGLE_DEG, NORMAL_HELPER_LENGTH};
use glam::DVec3;
use typeforge_path::{interpret, PathOutline, Shape2D};
use typeforge_scene::{overlay, Group, Material, MeshInstance, SceneNode};

/// Summary of a completed render call.
#[derive(Debug, Clone, Default)]
pub struct RenderReport {
    /// Shapes interpreted from the supplied paths.
    pub shape_count: usize,
    /// Triangles in the solid placed into the scene.
    pub triangle_count: usize,
    /// Non-fatal conditions; the scene is still populated when present.
    pub warnings: Vec<RenderWarning>,
}

/// Runs the full pipeline into `group`, replacing its previous contents.
///
/// # Arguments
///
/// * `paths` - One SVG path-data string per source `<path>` element
/// * `group` - Scene group that receives the solid and any overlays
/// * `options` - Immutable configuration for this call
///
/// # Errors
///
/// [`RenderError::MalformedPath`] if any path fails to parse (the group is
/// left untouched — no partial output), or [`RenderError::Mesh`] for
/// geometry-stage failures.
pub fn render(
    paths: &[&str],
    group: &mut Group,
    options: &RenderOptions,
) -> Result<RenderReport, RenderError> {
    let params = EffectiveParams::derive(options)?;

    let mut shapes: Vec<Shape2D> = Vec::new();
    for (index, data) in paths.iter().enumerate() {
        let outline = PathOutline::parse(data)
            .map_err(|source| RenderError::MalformedPath { index, source })?;
        shapes.extend(interpret(&outline, params.svg_winding_is_cw));
    }
    log::debug!(
        "interpreted {} path(s) into {} shape(s)",
        paths.len(),
        shapes.len()
    );
    let shape_count = shapes.len();

    let mut extruded = extruder::extrude(&shapes, &params)?;

    let mut warnings = Vec::new();
    let solid = if params.want_base_plate {
        // Lift the type off the bed so it sits atop (or cuts through) the
        // plate volume before combination.
        extruded.mesh.translate(DVec3::new(0.0, 0.0, params.base_depth));
        let plate_mesh = plate::build_plate(&params, &extruded)?;
        let (combined, warning) = combine::combine(&plate_mesh, &extruded.mesh, &params);
        warnings.extend(warning);
        combined
    } else {
        extruded.mesh
    };

    let report = RenderReport {
        shape_count,
        triangle_count: solid.triangle_count(),
        warnings,
    };

    group.clear();

    let material = Material {
        color: options.object_color,
        double_sided: !options.want_inverted_type,
    };

    if options.want_wire_frame {
        group.add(SceneNode::Helper(overlay::wireframe(&solid)));
    }
    if options.want_normals {
        group.add(SceneNode::Helper(overlay::face_normals(
            &solid,
            NORMAL_HELPER_LENGTH,
        )));
    }
    if options.want_edges {
        group.add(SceneNode::Helper(overlay::hard_edges(
            &solid,
            HARD_EDGE_ANGLE_DEG,
        )));
    }
    group.add(SceneNode::Mesh(MeshInstance::new(solid, material)));

    Ok(report)
}
