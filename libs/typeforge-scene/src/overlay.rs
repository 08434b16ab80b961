//! # Diagnostic Overlays
//!
//! Line-segment helpers for inspecting a mesh in the viewer: wireframe,
//! face normals, and hard edges. Helpers are display-only and the exporter
//! never serializes them.
//!
//! Edge bookkeeping is keyed on quantized vertex positions rather than
//! indices: meshes coming out of the boolean stage do not share vertices
//! between adjacent triangles.

use crate::node::{Helper, HelperKind};
use glam::DVec3;
use std::collections::{HashMap, HashSet};
use typeforge_mesh::Mesh;

/// Quantization grid for position-keyed edge lookup (0.0001 units).
const POSITION_SCALE: f64 = 1.0e4;

type PosKey = (i64, i64, i64);
type EdgeKey = (PosKey, PosKey);

fn pos_key(p: DVec3) -> PosKey {
    (
        (p.x * POSITION_SCALE).round() as i64,
        (p.y * POSITION_SCALE).round() as i64,
        (p.z * POSITION_SCALE).round() as i64,
    )
}

fn edge_key(a: DVec3, b: DVec3) -> EdgeKey {
    let ka = pos_key(a);
    let kb = pos_key(b);
    if ka < kb {
        (ka, kb)
    } else {
        (kb, ka)
    }
}

fn face_normal(points: [DVec3; 3]) -> DVec3 {
    let n = (points[1] - points[0]).cross(points[2] - points[0]);
    if n.length() > 1.0e-12 {
        n.normalize()
    } else {
        DVec3::Z
    }
}

/// Every unique mesh edge as a line segment.
pub fn wireframe(mesh: &Mesh) -> Helper {
    let mut seen: HashSet<EdgeKey> = HashSet::new();
    let mut segments = Vec::new();

    for i in 0..mesh.triangle_count() {
        let points = mesh.triangle_points(i);
        for k in 0..3 {
            let a = points[k];
            let b = points[(k + 1) % 3];
            if seen.insert(edge_key(a, b)) {
                segments.push([a, b]);
            }
        }
    }

    Helper {
        kind: HelperKind::Wireframe,
        segments,
    }
}

/// One segment per face, from its centroid along its normal.
pub fn face_normals(mesh: &Mesh, length: f64) -> Helper {
    let mut segments = Vec::with_capacity(mesh.triangle_count());
    for i in 0..mesh.triangle_count() {
        let points = mesh.triangle_points(i);
        let centroid = (points[0] + points[1] + points[2]) / 3.0;
        segments.push([centroid, centroid + face_normal(points) * length]);
    }
    Helper {
        kind: HelperKind::FaceNormals,
        segments,
    }
}

/// Edges whose faces meet at more than `angle_deg`, plus boundary edges.
pub fn hard_edges(mesh: &Mesh, angle_deg: f64) -> Helper {
    let mut edges: HashMap<EdgeKey, ([DVec3; 2], Vec<DVec3>)> = HashMap::new();

    for i in 0..mesh.triangle_count() {
        let points = mesh.triangle_points(i);
        let normal = face_normal(points);
        for k in 0..3 {
            let a = points[k];
            let b = points[(k + 1) % 3];
            edges
                .entry(edge_key(a, b))
                .or_insert_with(|| ([a, b], Vec::new()))
                .1
                .push(normal);
        }
    }

    let smooth_dot = angle_deg.to_radians().cos();
    let mut segments = Vec::new();
    for (segment, normals) in edges.into_values() {
        let hard = match normals.as_slice() {
            [n1, n2] => n1.dot(*n2) < smooth_dot,
            // Boundary or non-manifold edge: always worth seeing.
            _ => true,
        };
        if hard {
            segments.push(segment);
        }
    }

    Helper {
        kind: HelperKind::HardEdges,
        segments,
    }
}
