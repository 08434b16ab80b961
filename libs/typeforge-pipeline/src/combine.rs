//! # Solid Combination
//!
//! Merges the plate and the (pre-shifted) extrusion with a boolean
//! operation. Raised type fuses onto the plate with a union; sunken type
//! carves a recess by intersecting the plate with the extrusion's
//! complement — the negative-depth prism is already inside-out, so no
//! extra flip is needed beyond the mirror compensation.

use crate::error::RenderWarning;
use crate::options::EffectiveParams;
use config::constants::GEOM_EPSILON;
use typeforge_mesh::{BspTree, Mesh};

/// Combines plate and extrusion.
///
/// The extrusion must already be translated by `+baseDepth` along Z so the
/// two volumes overlap. Returns the combined mesh plus an optional
/// non-fatal warning when the boolean result is degenerate (the caller
/// still receives the mesh for inspection).
pub fn combine(
    plate: &Mesh,
    extruded: &Mesh,
    params: &EffectiveParams,
) -> (Mesh, Option<RenderWarning>) {
    let (plate_tree, mut glyph_tree) = BspTree::build_pair(plate, extruded);

    // The X-mirror in the extruder left the shell's solid side ambiguous
    // for boolean purposes; flip it back unless the type is inverted.
    if !params.want_inverted_type {
        glyph_tree.invert();
    }

    let (operation, combined) = if params.type_depth > 0.0 {
        ("union", plate_tree.union(glyph_tree))
    } else {
        ("intersection", plate_tree.intersect(glyph_tree))
    };
    log::debug!(
        "combined plate and type via {}: {} triangles",
        operation,
        combined.triangle_count()
    );

    let degenerate =
        combined.is_empty() || combined.signed_volume().abs() < GEOM_EPSILON;
    if degenerate {
        log::warn!("boolean {operation} produced a degenerate mesh; the input volumes may not overlap");
        return (combined, Some(RenderWarning::EmptyResult { operation }));
    }
    (combined, None)
}
