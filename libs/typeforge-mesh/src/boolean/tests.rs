//! Boolean-operation tests on axis-aligned slabs, checked by enclosed
//! volume rather than triangle counts — fragment counts are an
//! implementation detail, volumes are not.

use super::*;
use crate::primitives::rectangular_plate;
use approx::assert_relative_eq;

/// 2x2 footprint slab spanning z in [0, 2], shifted along z.
fn slab_at(z_offset: f64) -> Mesh {
    let mut mesh = rectangular_plate(2.0, 2.0).unwrap();
    mesh.translate(DVec3::new(0.0, 0.0, z_offset));
    mesh
}

#[test]
fn test_union_of_overlapping_slabs() {
    let a = slab_at(0.0);
    let b = slab_at(1.0);
    let result = union(&a, &b);
    assert!(result.validate());
    // Combined column spans z in [0, 3] over a 2x2 footprint.
    assert_relative_eq!(result.signed_volume(), 12.0, epsilon = 1e-6);
    let (min, max) = result.bounding_box();
    assert_relative_eq!(min.z, 0.0, epsilon = 1e-9);
    assert_relative_eq!(max.z, 3.0, epsilon = 1e-9);
}

#[test]
fn test_intersection_of_overlapping_slabs() {
    let a = slab_at(0.0);
    let b = slab_at(1.0);
    let result = intersection(&a, &b);
    // Overlap is the z in [1, 2] band.
    assert_relative_eq!(result.signed_volume(), 4.0, epsilon = 1e-6);
}

#[test]
fn test_union_of_disjoint_slabs_keeps_both() {
    let a = slab_at(0.0);
    let b = slab_at(5.0);
    let result = union(&a, &b);
    assert_relative_eq!(result.signed_volume(), 16.0, epsilon = 1e-6);
}

#[test]
fn test_intersection_of_disjoint_slabs_is_empty() {
    let a = slab_at(0.0);
    let b = slab_at(5.0);
    let result = intersection(&a, &b);
    assert!(result.signed_volume().abs() < 1e-6);
}

#[test]
fn test_union_with_empty_mesh() {
    let a = slab_at(0.0);
    let empty = Mesh::new();
    let result = union(&a, &empty);
    assert_relative_eq!(result.signed_volume(), 8.0, epsilon = 1e-6);
}

#[test]
fn test_intersection_with_empty_mesh() {
    let a = slab_at(0.0);
    let empty = Mesh::new();
    assert!(intersection(&a, &empty).is_empty());
}

#[test]
fn test_tree_invert_flips_enclosed_volume() {
    let mut tree = BspTree::from_mesh(&slab_at(0.0));
    tree.invert();
    assert_relative_eq!(tree.to_mesh().signed_volume(), -8.0, epsilon = 1e-6);
}

#[test]
fn test_intersect_with_inverted_operand_subtracts() {
    // plate ∩ complement(glyph) carves the glyph out of the plate — the
    // recipe the pipeline uses for sunken type.
    let plate = rectangular_plate(4.0, 2.0).unwrap();
    let plug = rectangular_plate(2.0, 2.0).unwrap();

    let (plate_tree, mut plug_tree) = BspTree::build_pair(&plate, &plug);
    plug_tree.invert();
    let carved = plate_tree.intersect(plug_tree);

    // 4x4x2 minus 2x2x2.
    assert_relative_eq!(carved.signed_volume(), 32.0 - 8.0, epsilon = 1e-6);
}

#[test]
fn test_union_is_deterministic() {
    let a = slab_at(0.0);
    let b = slab_at(1.0);
    let first = union(&a, &b);
    let second = union(&a, &b);
    assert_eq!(first, second);
}
