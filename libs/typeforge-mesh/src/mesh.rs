//! # Mesh Data Structure
//!
//! Core triangle-mesh representation.

use config::constants::GEOM_EPSILON;
use glam::{DMat4, DVec3};

/// A triangle mesh with vertices and indices.
///
/// All geometry calculations use f64 internally; f32 appears only at the
/// export boundary.
///
/// # Example
///
/// ```rust
/// use typeforge_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// The three corner positions of a triangle.
    #[inline]
    pub fn triangle_points(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners; the zero box for an empty mesh.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }
        (min, max)
    }

    /// Computes the bounding sphere: centered on the bounding-box center,
    /// radius reaching the farthest vertex.
    pub fn bounding_sphere(&self) -> (DVec3, f64) {
        let (min, max) = self.bounding_box();
        let center = (min + max) / 2.0;
        let radius = self
            .vertices
            .iter()
            .map(|v| v.distance(center))
            .fold(0.0, f64::max);
        (center, radius)
    }

    /// Signed enclosed volume via the divergence theorem.
    ///
    /// Positive for an outward-wound closed mesh, negative for an
    /// inside-out one; magnitude near zero for open or degenerate shells.
    pub fn signed_volume(&self) -> f64 {
        let mut acc = 0.0;
        for tri in &self.triangles {
            let a = self.vertices[tri[0] as usize];
            let b = self.vertices[tri[1] as usize];
            let c = self.vertices[tri[2] as usize];
            acc += a.dot(b.cross(c));
        }
        acc / 6.0
    }

    /// Transforms all vertices by a 4x4 matrix.
    ///
    /// Triangle indices are left untouched, so a negative-determinant
    /// matrix (mirror) flips the mesh orientation.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Merges another mesh into this one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        for tri in &other.triangles {
            self.triangles
                .push([tri[0] + offset, tri[1] + offset, tri[2] + offset]);
        }
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks that all triangle indices are in range and that no triangle
    /// is degenerate (repeated index or near-zero area).
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;
        for tri in &self.triangles {
            if tri[0] >= vertex_count || tri[1] >= vertex_count || tri[2] >= vertex_count {
                return false;
            }
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }
            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            if (v1 - v0).cross(v2 - v0).length() < GEOM_EPSILON {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_tetrahedron() -> Mesh {
        let mut mesh = Mesh::new();
        let o = mesh.add_vertex(DVec3::ZERO);
        let x = mesh.add_vertex(DVec3::X);
        let y = mesh.add_vertex(DVec3::Y);
        let z = mesh.add_vertex(DVec3::Z);
        // Outward winding.
        mesh.add_triangle(o, y, x);
        mesh.add_triangle(o, x, z);
        mesh.add_triangle(o, z, y);
        mesh.add_triangle(x, y, z);
        mesh
    }

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        mesh.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_mesh_bounding_sphere() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(-2.0, 0.0, 0.0));
        mesh.add_vertex(DVec3::new(2.0, 0.0, 0.0));
        let (center, radius) = mesh.bounding_sphere();
        assert_eq!(center, DVec3::ZERO);
        assert_relative_eq!(radius, 2.0);
    }

    #[test]
    fn test_signed_volume_of_tetrahedron() {
        let mesh = unit_tetrahedron();
        assert_relative_eq!(mesh.signed_volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mirror_flips_volume_sign() {
        let mut mesh = unit_tetrahedron();
        mesh.transform(&DMat4::from_scale(DVec3::new(-1.0, 1.0, 1.0)));
        assert_relative_eq!(mesh.signed_volume(), -1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mesh_merge() {
        let mut a = unit_tetrahedron();
        let b = unit_tetrahedron();
        a.merge(&b);
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.triangle_count(), 8);
        assert_eq!(a.triangles()[4], [4, 6, 5]);
    }

    #[test]
    fn test_mesh_validate_invalid_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_triangle(0, 1, 2);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_validate_valid() {
        assert!(unit_tetrahedron().validate());
    }

    #[test]
    fn test_translate() {
        let mut mesh = unit_tetrahedron();
        mesh.translate(DVec3::new(0.0, 0.0, 3.0));
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.z, 3.0);
        assert_relative_eq!(max.z, 4.0);
    }
}
