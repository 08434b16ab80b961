//! # Plate Primitives
//!
//! Base-plate meshes: a square slab and a circular disc, both resting on
//! the print bed (z = 0) and extending upward to z = depth, centered on the
//! X/Y origin so they line up with the normalized extrusion.

use crate::error::MeshError;
use crate::mesh::Mesh;
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a square slab plate.
///
/// # Arguments
///
/// * `side` - Edge length of the square footprint
/// * `depth` - Thickness along Z
///
/// # Example
///
/// ```rust
/// use typeforge_mesh::primitives::rectangular_plate;
///
/// let mesh = rectangular_plate(52.0, 3.0).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn rectangular_plate(side: f64, depth: f64) -> Result<Mesh, MeshError> {
    if !(side > 0.0 && side.is_finite()) || !(depth > 0.0 && depth.is_finite()) {
        return Err(MeshError::invalid_dimension(format!(
            "plate side and depth must be positive: side={side}, depth={depth}"
        )));
    }

    let h = side / 2.0;
    let mut mesh = Mesh::with_capacity(8, 12);

    // Bottom face (z = 0)
    let v0 = mesh.add_vertex(DVec3::new(-h, -h, 0.0));
    let v1 = mesh.add_vertex(DVec3::new(h, -h, 0.0));
    let v2 = mesh.add_vertex(DVec3::new(h, h, 0.0));
    let v3 = mesh.add_vertex(DVec3::new(-h, h, 0.0));

    // Top face (z = depth)
    let v4 = mesh.add_vertex(DVec3::new(-h, -h, depth));
    let v5 = mesh.add_vertex(DVec3::new(h, -h, depth));
    let v6 = mesh.add_vertex(DVec3::new(h, h, depth));
    let v7 = mesh.add_vertex(DVec3::new(-h, h, depth));

    // Two triangles per face, wound outward.
    mesh.add_triangle(v0, v2, v1); // bottom
    mesh.add_triangle(v0, v3, v2);
    mesh.add_triangle(v4, v5, v6); // top
    mesh.add_triangle(v4, v6, v7);
    mesh.add_triangle(v0, v1, v5); // front (y = -h)
    mesh.add_triangle(v0, v5, v4);
    mesh.add_triangle(v2, v3, v7); // back (y = +h)
    mesh.add_triangle(v2, v7, v6);
    mesh.add_triangle(v3, v0, v4); // left (x = -h)
    mesh.add_triangle(v3, v4, v7);
    mesh.add_triangle(v1, v2, v6); // right (x = +h)
    mesh.add_triangle(v1, v6, v5);

    Ok(mesh)
}

/// Creates a circular disc plate.
///
/// # Arguments
///
/// * `radius` - Footprint radius
/// * `depth` - Thickness along Z
/// * `segments` - Segment count around the circumference
pub fn circular_plate(radius: f64, depth: f64, segments: u32) -> Result<Mesh, MeshError> {
    if !(radius > 0.0 && radius.is_finite()) || !(depth > 0.0 && depth.is_finite()) {
        return Err(MeshError::invalid_dimension(format!(
            "plate radius and depth must be positive: radius={radius}, depth={depth}"
        )));
    }
    if segments < 3 {
        return Err(MeshError::invalid_dimension(format!(
            "plate segments must be at least 3: {segments}"
        )));
    }

    let mut mesh = Mesh::with_capacity(segments as usize * 2, segments as usize * 4);

    let bottom: Vec<u32> = (0..segments)
        .map(|j| {
            let theta = TAU * j as f64 / segments as f64;
            mesh.add_vertex(DVec3::new(
                radius * theta.cos(),
                radius * theta.sin(),
                0.0,
            ))
        })
        .collect();
    let top: Vec<u32> = (0..segments)
        .map(|j| {
            let theta = TAU * j as f64 / segments as f64;
            mesh.add_vertex(DVec3::new(
                radius * theta.cos(),
                radius * theta.sin(),
                depth,
            ))
        })
        .collect();

    // Side wall.
    for j in 0..segments as usize {
        let j_next = (j + 1) % segments as usize;
        mesh.add_triangle(bottom[j], bottom[j_next], top[j_next]);
        mesh.add_triangle(bottom[j], top[j_next], top[j]);
    }

    // Caps, fanned from the first rim vertex.
    for j in 1..segments as usize - 1 {
        mesh.add_triangle(bottom[0], bottom[j + 1], bottom[j]);
        mesh.add_triangle(top[0], top[j], top[j + 1]);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec3;

    #[test]
    fn test_rectangular_plate_bounds() {
        let mesh = rectangular_plate(52.0, 3.0).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-26.0, -26.0, 0.0));
        assert_eq!(max, DVec3::new(26.0, 26.0, 3.0));
        assert!(mesh.validate());
    }

    #[test]
    fn test_rectangular_plate_volume() {
        let mesh = rectangular_plate(10.0, 2.0).unwrap();
        assert_relative_eq!(mesh.signed_volume(), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_circular_plate_rests_on_bed() {
        let mesh = circular_plate(10.0, 3.0, 64).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.z, 0.0);
        assert_relative_eq!(max.z, 3.0);
        assert!(mesh.validate());
    }

    #[test]
    fn test_circular_plate_volume_approaches_cylinder() {
        let mesh = circular_plate(10.0, 1.0, 256).unwrap();
        let exact = std::f64::consts::PI * 100.0;
        let volume = mesh.signed_volume();
        assert!(volume > 0.0);
        assert!((volume - exact).abs() / exact < 0.01);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert!(rectangular_plate(0.0, 3.0).is_err());
        assert!(rectangular_plate(10.0, -1.0).is_err());
        assert!(circular_plate(10.0, 3.0, 2).is_err());
        assert!(circular_plate(f64::NAN, 3.0, 64).is_err());
    }
}
