//! # Boolean Operations (CSG)
//!
//! Constructive solid geometry on triangle meshes using BSP trees, after
//! the csg.js algorithm by Evan Wallace:
//!
//! - Union: `a.clipTo(b); b.clipTo(a); b.invert(); b.clipTo(a); b.invert();
//!   a.build(b.allPolygons())`
//! - Intersection: `a.invert(); b.clipTo(a); b.invert(); a.clipTo(b);
//!   b.clipTo(a); a.build(b.allPolygons()); a.invert()`
//!
//! The pipeline needs only union and intersection of exactly two solids.
//! [`BspTree`] exposes the tree-level contract (build a tree from a mesh,
//! invert it, combine two trees) so the caller can correct a solid's
//! inside/outside sense before combining — the extrusion stage produces
//! deliberately inverted shells in places.
//!
//! ## Example
//!
//! ```rust,ignore
//! use typeforge_mesh::boolean::BspTree;
//!
//! let (plate, mut glyph) = BspTree::build_pair(&plate_mesh, &glyph_mesh);
//! glyph.invert();
//! let combined = plate.union(glyph);
//! ```

mod bsp;
mod polygon;

#[cfg(test)]
mod tests;

use crate::mesh::Mesh;
use bsp::BspNode;
use glam::DVec3;
use polygon::BspPolygon;

/// BSP-tree representation of a solid, the unit the boolean operations
/// work on.
#[derive(Debug, Clone)]
pub struct BspTree {
    root: BspNode,
}

impl BspTree {
    /// Builds a tree from a mesh (one BSP polygon per triangle).
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            root: BspNode::new(mesh_to_polygons(mesh)),
        }
    }

    /// Builds the two operand trees concurrently. Deterministic; blocks
    /// until both are ready.
    pub fn build_pair(a: &Mesh, b: &Mesh) -> (BspTree, BspTree) {
        rayon::join(|| BspTree::from_mesh(a), || BspTree::from_mesh(b))
    }

    /// Flips the solid's inside/outside sense.
    pub fn invert(&mut self) {
        self.root.invert();
    }

    /// Union of two solids: everything in either.
    pub fn union(self, other: BspTree) -> Mesh {
        let mut a = self.root;
        let mut b = other.root;

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.all_polygons());

        polygons_to_mesh(&a.all_polygons())
    }

    /// Intersection of two solids: only the overlap.
    pub fn intersect(self, other: BspTree) -> Mesh {
        let mut a = self.root;
        let mut b = other.root;

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(b.all_polygons());
        a.invert();

        polygons_to_mesh(&a.all_polygons())
    }

    /// Extracts the tree's polygons back into a triangle mesh.
    pub fn to_mesh(&self) -> Mesh {
        polygons_to_mesh(&self.root.all_polygons())
    }
}

/// Union of two meshes. Convenience over the tree-level API.
pub fn union(a: &Mesh, b: &Mesh) -> Mesh {
    if a.is_empty() {
        return b.clone();
    }
    if b.is_empty() {
        return a.clone();
    }
    let (tree_a, tree_b) = BspTree::build_pair(a, b);
    tree_a.union(tree_b)
}

/// Intersection of two meshes. Convenience over the tree-level API.
pub fn intersection(a: &Mesh, b: &Mesh) -> Mesh {
    if a.is_empty() || b.is_empty() {
        return Mesh::new();
    }
    let (tree_a, tree_b) = BspTree::build_pair(a, b);
    tree_a.intersect(tree_b)
}

// =============================================================================
// CONVERSION HELPERS
// =============================================================================

/// One BSP polygon per triangle; degenerate triangles are skipped.
fn mesh_to_polygons(mesh: &Mesh) -> Vec<BspPolygon> {
    let mut polygons = Vec::with_capacity(mesh.triangle_count());
    for i in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle_points(i);
        if let Some(polygon) = BspPolygon::from_vertices(vec![a, b, c]) {
            polygons.push(polygon);
        }
    }
    polygons
}

/// Fan-triangulates the (convex) BSP polygons back into a mesh.
fn polygons_to_mesh(polygons: &[BspPolygon]) -> Mesh {
    let mut mesh = Mesh::new();
    for polygon in polygons {
        let vertices = polygon.vertices();
        if vertices.len() < 3 {
            continue;
        }
        let base = mesh.vertex_count() as u32;
        for v in vertices {
            mesh.add_vertex(DVec3::new(v.x, v.y, v.z));
        }
        for i in 1..vertices.len() as u32 - 1 {
            mesh.add_triangle(base, base + i, base + i + 1);
        }
    }
    log::debug!(
        "boolean result: {} polygons, {} triangles",
        polygons.len(),
        mesh.triangle_count()
    );
    mesh
}
