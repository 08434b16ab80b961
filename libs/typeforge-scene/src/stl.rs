//! # STL Export
//!
//! Serializes every mesh in a scene to STL, ASCII or binary. The walk is
//! an explicit filter over mesh nodes (helpers, lights, and empty groups
//! contribute nothing), each vertex is taken through its accumulated world
//! transform, and facet normals are computed from the transformed winding.
//!
//! ASCII output uses a fixed number of decimal places
//! ([`config::constants::STL_DECIMALS`]) so identical scene content always
//! serializes to byte-identical text.
//!
//! Binary format: 80-byte header, u32 little-endian triangle count, then
//! one 50-byte record per triangle (3×f32 normal, 3×3×f32 vertices, u16
//! attribute).

use crate::node::Group;
use config::constants::STL_DECIMALS;
use glam::{DMat4, DVec3};
use thiserror::Error;

/// Errors raised while reading ASCII STL text back in.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StlParseError {
    #[error("stl parse error at line {line}: {message}")]
    Syntax { line: usize, message: String },
}

/// Collects the world-space triangles of every mesh node in the scene.
fn world_triangles(root: &Group) -> Vec<[DVec3; 3]> {
    let mut triangles = Vec::new();
    root.visit_meshes(DMat4::IDENTITY, &mut |instance, world| {
        for i in 0..instance.mesh.triangle_count() {
            let [a, b, c] = instance.mesh.triangle_points(i);
            triangles.push([
                world.transform_point3(a),
                world.transform_point3(b),
                world.transform_point3(c),
            ]);
        }
    });
    triangles
}

fn facet_normal(tri: &[DVec3; 3]) -> DVec3 {
    let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
    if n.length() > 1.0e-12 {
        n.normalize()
    } else {
        DVec3::Z
    }
}

/// Exports the scene as ASCII STL.
///
/// # Example
///
/// ```rust,ignore
/// let text = export_ascii(&ctx.scene, "label");
/// assert!(text.starts_with("solid label"));
/// ```
pub fn export_ascii(root: &Group, name: &str) -> String {
    let triangles = world_triangles(root);
    log::debug!("exporting {} triangle(s) as ascii stl", triangles.len());

    let mut out = String::with_capacity(triangles.len() * 256 + 64);
    out.push_str(&format!("solid {name}\n"));

    for tri in &triangles {
        let n = facet_normal(tri);
        out.push_str(&format!(
            "  facet normal {} {} {}\n",
            num(n.x),
            num(n.y),
            num(n.z)
        ));
        out.push_str("    outer loop\n");
        for v in tri {
            out.push_str(&format!(
                "      vertex {} {} {}\n",
                num(v.x),
                num(v.y),
                num(v.z)
            ));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Exports the scene as binary STL.
pub fn export_binary(root: &Group, name: &str) -> Vec<u8> {
    let triangles = world_triangles(root);
    log::debug!("exporting {} triangle(s) as binary stl", triangles.len());

    let mut buf = Vec::with_capacity(80 + 4 + triangles.len() * 50);

    let header = format!("binary STL: {name}");
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&(triangles.len() as u32).to_le_bytes());

    for tri in &triangles {
        let n = facet_normal(tri);
        for component in [n.x, n.y, n.z] {
            buf.extend_from_slice(&(component as f32).to_le_bytes());
        }
        for v in tri {
            for component in [v.x, v.y, v.z] {
                buf.extend_from_slice(&(component as f32).to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    buf
}

/// Fixed-precision coordinate token.
fn num(value: f64) -> String {
    format!("{:.prec$}", value, prec = STL_DECIMALS)
}

/// Reads ASCII STL text back into triangles. Used to verify round-trips;
/// tolerant of whitespace, strict about structure.
pub fn parse_ascii(text: &str) -> Result<Vec<[DVec3; 3]>, StlParseError> {
    let mut triangles = Vec::new();
    let mut pending: Vec<DVec3> = Vec::new();
    let mut saw_solid = false;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let mut tokens = raw.split_whitespace();
        match tokens.next() {
            Some("solid") => saw_solid = true,
            Some("vertex") => {
                let mut component = |axis: &str| -> Result<f64, StlParseError> {
                    tokens
                        .next()
                        .ok_or_else(|| StlParseError::Syntax {
                            line,
                            message: format!("missing {axis} coordinate"),
                        })?
                        .parse::<f64>()
                        .map_err(|e| StlParseError::Syntax {
                            line,
                            message: format!("bad {axis} coordinate: {e}"),
                        })
                };
                let x = component("x")?;
                let y = component("y")?;
                let z = component("z")?;
                pending.push(DVec3::new(x, y, z));
            }
            Some("endloop") => {
                if pending.len() != 3 {
                    return Err(StlParseError::Syntax {
                        line,
                        message: format!("loop with {} vertices", pending.len()),
                    });
                }
                triangles.push([pending[0], pending[1], pending[2]]);
                pending.clear();
            }
            _ => {}
        }
    }

    if !saw_solid {
        return Err(StlParseError::Syntax {
            line: 1,
            message: "missing solid header".into(),
        });
    }
    if !pending.is_empty() {
        return Err(StlParseError::Syntax {
            line: text.lines().count(),
            message: "unterminated facet loop".into(),
        });
    }
    Ok(triangles)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Group, Helper, HelperKind, Light, Material, MeshInstance, SceneNode};
    use glam::{DMat4, DVec3};
    use typeforge_mesh::primitives::rectangular_plate;

    fn box_scene() -> Group {
        let mut group = Group::new();
        group.add(SceneNode::Mesh(MeshInstance::new(
            rectangular_plate(2.0, 2.0).unwrap(),
            Material::default(),
        )));
        group
    }

    #[test]
    fn test_ascii_header_and_footer() {
        let text = export_ascii(&box_scene(), "label");
        assert!(text.starts_with("solid label\n"));
        assert!(text.ends_with("endsolid label\n"));
    }

    #[test]
    fn test_ascii_round_trip() {
        let scene = box_scene();
        let text = export_ascii(&scene, "label");
        let triangles = parse_ascii(&text).unwrap();
        assert_eq!(triangles.len(), 12);

        let original = world_triangles(&scene);
        for (out, src) in triangles.iter().zip(&original) {
            for (a, b) in out.iter().zip(src) {
                assert!(a.distance(*b) < 1e-5);
            }
        }
    }

    #[test]
    fn test_export_is_deterministic() {
        let scene = box_scene();
        assert_eq!(export_ascii(&scene, "x"), export_ascii(&scene, "x"));
        assert_eq!(export_binary(&scene, "x"), export_binary(&scene, "x"));
    }

    #[test]
    fn test_helpers_and_lights_are_not_exported() {
        let mut scene = box_scene();
        scene.add(SceneNode::Light(Light {
            color: [1.0; 3],
            intensity: 1.0,
            position: DVec3::ZERO,
        }));
        scene.add(SceneNode::Helper(Helper {
            kind: HelperKind::Wireframe,
            segments: vec![[DVec3::ZERO, DVec3::X]],
        }));

        let triangles = parse_ascii(&export_ascii(&scene, "x")).unwrap();
        assert_eq!(triangles.len(), 12);
    }

    #[test]
    fn test_world_transform_is_applied() {
        let mut scene = box_scene();
        scene.transform = DMat4::from_translation(DVec3::new(100.0, 0.0, 0.0));
        let triangles = parse_ascii(&export_ascii(&scene, "x")).unwrap();
        assert!(triangles.iter().flatten().all(|v| v.x >= 99.0 - 1e-9));
    }

    #[test]
    fn test_binary_layout() {
        let bytes = export_binary(&box_scene(), "x");
        assert_eq!(bytes.len(), 80 + 4 + 12 * 50);
        let count = u32::from_le_bytes(bytes[80..84].try_into().unwrap());
        assert_eq!(count, 12);
    }

    #[test]
    fn test_empty_scene_exports_empty_solid() {
        let text = export_ascii(&Group::new(), "empty");
        assert_eq!(text, "solid empty\nendsolid empty\n");
        assert!(parse_ascii(&text).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_truncated_loop() {
        let text = "solid x\n  facet normal 0 0 1\n    outer loop\n      vertex 0 0 0\n    endloop\n";
        assert!(parse_ascii(text).is_err());
    }
}
