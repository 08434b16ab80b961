//! # Prism Extrusion
//!
//! Extrudes interpreted 2D shapes along the Z axis into triangle meshes.
//!
//! Caps are triangulated with ear clipping (hole-aware); side walls stitch
//! the bottom ring set to the top ring set. With a bevel inset the top ring
//! set is shrunk toward the solid interior, producing a single-face chamfer
//! that spans the whole wall.
//!
//! The extrusion runs from z = 0 to z = depth. Depth may be negative: the
//! prism then sweeps downward and comes out inside-out, which the solid
//! combiner exploits when carving sunken type.

use crate::error::MeshError;
use crate::mesh::Mesh;
use config::constants::{BEVEL_MITER_CLAMP, GEOM_EPSILON};
use glam::{DVec2, DVec3};
use typeforge_path::Shape2D;

/// Parameters for prism extrusion.
#[derive(Debug, Clone)]
pub struct PrismParams {
    /// Signed extrusion depth along Z.
    pub depth: f64,
    /// Inward offset of the top ring set, in footprint units before any
    /// later X/Y scaling. Zero disables the bevel.
    pub bevel_inset: f64,
}

impl Default for PrismParams {
    fn default() -> Self {
        Self {
            depth: 1.0,
            bevel_inset: 0.0,
        }
    }
}

/// Extrudes a set of shapes into one mesh.
///
/// # Arguments
///
/// * `shapes` - Filled contours with holes, in canonical orientation
/// * `params` - Depth and optional bevel inset
///
/// # Errors
///
/// [`MeshError::EmptyGeometry`] when `shapes` is empty,
/// [`MeshError::InvalidDimension`] for a zero or non-finite depth or a
/// negative bevel inset, [`MeshError::DegenerateGeometry`] when every shape
/// collapses, and [`MeshError::TriangulationFailed`] when a cap cannot be
/// triangulated.
pub fn extrude_shapes(shapes: &[Shape2D], params: &PrismParams) -> Result<Mesh, MeshError> {
    if shapes.is_empty() {
        return Err(MeshError::empty("no shapes to extrude"));
    }
    if !params.depth.is_finite() || params.depth.abs() < GEOM_EPSILON {
        return Err(MeshError::invalid_dimension(format!(
            "extrusion depth must be non-zero: {}",
            params.depth
        )));
    }
    if !params.bevel_inset.is_finite() || params.bevel_inset < 0.0 {
        return Err(MeshError::invalid_dimension(format!(
            "bevel inset must be non-negative: {}",
            params.bevel_inset
        )));
    }

    let mut mesh = Mesh::new();
    for (index, shape) in shapes.iter().enumerate() {
        let prism = extrude_shape(shape, params, index)?;
        mesh.merge(&prism);
    }
    if mesh.is_empty() {
        return Err(MeshError::degenerate("every shape collapsed to nothing"));
    }

    log::debug!(
        "extruded {} shape(s) into {} triangles (depth {}, bevel inset {})",
        shapes.len(),
        mesh.triangle_count(),
        params.depth,
        params.bevel_inset
    );
    Ok(mesh)
}

fn extrude_shape(shape: &Shape2D, params: &PrismParams, index: usize) -> Result<Mesh, MeshError> {
    if shape.outer().len() < 3 {
        return Ok(Mesh::new());
    }

    let mut rings: Vec<&[DVec2]> = Vec::with_capacity(1 + shape.holes().len());
    rings.push(shape.outer());
    for hole in shape.holes() {
        if hole.len() >= 3 {
            rings.push(hole);
        }
    }

    let cap = triangulate_cap(&rings, index)?;
    let total: usize = rings.iter().map(|r| r.len()).sum();

    let top_rings: Vec<Vec<DVec2>> = if params.bevel_inset > 0.0 {
        rings
            .iter()
            .map(|ring| inset_ring(ring, params.bevel_inset))
            .collect()
    } else {
        rings.iter().map(|ring| ring.to_vec()).collect()
    };

    let mut mesh = Mesh::with_capacity(total * 2, total * 2 + cap.len() / 3 * 2);

    // Bottom ring set at z = 0, top ring set at z = depth; the cap
    // triangulation indexes into either set because insetting preserves
    // ring topology.
    for ring in &rings {
        for p in ring.iter() {
            mesh.add_vertex(DVec3::new(p.x, p.y, 0.0));
        }
    }
    for ring in &top_rings {
        for p in ring {
            mesh.add_vertex(DVec3::new(p.x, p.y, params.depth));
        }
    }

    // Side walls.
    let mut ring_start = 0u32;
    for ring in &rings {
        let n = ring.len() as u32;
        for i in 0..n {
            let j = (i + 1) % n;
            let b0 = ring_start + i;
            let b1 = ring_start + j;
            let t0 = b0 + total as u32;
            let t1 = b1 + total as u32;
            mesh.add_triangle(b0, b1, t1);
            mesh.add_triangle(b0, t1, t0);
        }
        ring_start += n;
    }

    // Caps: ear clipping emits counter-clockwise triangles for the
    // canonical ring orientation, so the top cap uses them as-is and the
    // bottom cap reverses.
    for tri in cap.chunks_exact(3) {
        mesh.add_triangle(tri[0], tri[2], tri[1]);
        mesh.add_triangle(
            tri[0] + total as u32,
            tri[1] + total as u32,
            tri[2] + total as u32,
        );
    }

    Ok(mesh)
}

/// Ear-clips the ring set into triangles; indices address the concatenated
/// ring vertices.
fn triangulate_cap(rings: &[&[DVec2]], shape_index: usize) -> Result<Vec<u32>, MeshError> {
    let mut coords: Vec<f64> = Vec::new();
    let mut hole_indices: Vec<usize> = Vec::new();

    for (i, ring) in rings.iter().enumerate() {
        if i > 0 {
            hole_indices.push(coords.len() / 2);
        }
        for p in ring.iter() {
            coords.push(p.x);
            coords.push(p.y);
        }
    }

    let indices = earcutr::earcut(&coords, &hole_indices, 2).map_err(|e| {
        MeshError::triangulation(format!("shape {shape_index}: ear clipping failed: {e:?}"))
    })?;
    Ok(indices.into_iter().map(|i| i as u32).collect())
}

/// Offsets every ring vertex toward the solid interior by `amount`.
///
/// Works for outer rings and hole rings alike because the canonical
/// orientation makes `(e.y, -e.x)` the away-from-solid direction for both.
/// Miter length is clamped so near-degenerate corners cannot spike.
fn inset_ring(ring: &[DVec2], amount: f64) -> Vec<DVec2> {
    let n = ring.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = ring[(i + n - 1) % n];
        let curr = ring[i];
        let next = ring[(i + 1) % n];

        let n1 = edge_normal(prev, curr);
        let n2 = edge_normal(curr, next);

        let avg = n1 + n2;
        let len = avg.length();
        if len < GEOM_EPSILON {
            // Spike corner: the two edges double back on themselves.
            out.push(curr - n1 * amount);
            continue;
        }
        let avg = avg / len;
        let miter = (2.0 / (1.0 + n1.dot(n2)).max(BEVEL_MITER_CLAMP)).sqrt();
        out.push(curr - avg * amount * miter);
    }
    out
}

fn edge_normal(from: DVec2, to: DVec2) -> DVec2 {
    let e = (to - from).normalize_or_zero();
    DVec2::new(e.y, -e.x)
}

// =============================================================================
// TESTS
// =============================================================================
