//! # Scene Nodes
//!
//! Tagged scene-graph types and the caller-owned render context.

use glam::{DMat4, DVec3};
use typeforge_mesh::Mesh;

/// Surface appearance of a mesh node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Solid RGB color, 0..=1 per channel.
    pub color: [f32; 3],
    /// Render both faces. Single-sided when the object is deliberately
    /// inside-out ("inverted type").
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [0.8, 0.8, 0.8],
            double_sided: true,
        }
    }
}

/// A mesh placed in the scene with a material and local transform.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub mesh: Mesh,
    pub material: Material,
    pub transform: DMat4,
}

impl MeshInstance {
    /// Places a mesh with the identity transform.
    pub fn new(mesh: Mesh, material: Material) -> Self {
        Self {
            mesh,
            material,
            transform: DMat4::IDENTITY,
        }
    }
}

/// A point light. Display-only; the exporter skips it.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub color: [f32; 3],
    pub intensity: f64,
    pub position: DVec3,
}

/// Kind of diagnostic overlay a helper draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperKind {
    /// Every mesh edge.
    Wireframe,
    /// One segment per face along its normal.
    FaceNormals,
    /// Edges whose dihedral angle exceeds the configured threshold.
    HardEdges,
}

/// Diagnostic line-segment overlay. Display-only; never exported.
#[derive(Debug, Clone)]
pub struct Helper {
    pub kind: HelperKind,
    pub segments: Vec<[DVec3; 2]>,
}

/// A node in the scene graph.
#[derive(Debug, Clone)]
pub enum SceneNode {
    Mesh(MeshInstance),
    Group(Group),
    Light(Light),
    Helper(Helper),
}

/// An ordered collection of nodes under a shared transform.
#[derive(Debug, Clone)]
pub struct Group {
    pub transform: DMat4,
    pub children: Vec<SceneNode>,
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl Group {
    /// Creates an empty group with the identity transform.
    pub fn new() -> Self {
        Self {
            transform: DMat4::IDENTITY,
            children: Vec::new(),
        }
    }

    /// Removes all children.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Appends a node.
    pub fn add(&mut self, node: SceneNode) {
        self.children.push(node);
    }

    /// Visits every mesh instance in the subtree with its accumulated
    /// world transform. Lights and helpers are skipped; groups recurse.
    pub fn visit_meshes<F>(&self, parent: DMat4, visit: &mut F)
    where
        F: FnMut(&MeshInstance, DMat4),
    {
        let world = parent * self.transform;
        for child in &self.children {
            match child {
                SceneNode::Mesh(instance) => visit(instance, world * instance.transform),
                SceneNode::Group(group) => group.visit_meshes(world, visit),
                SceneNode::Light(_) | SceneNode::Helper(_) => {}
            }
        }
    }
}

/// Caller-owned scene container for one viewer session: construct, render
/// into, discard. Replaces any module-level scene/lighting state.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Root of the scene graph.
    pub scene: Group,
    /// Session lights; display-only.
    pub lights: Vec<Light>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    /// A scene with a neutral key/fill light pair.
    pub fn new() -> Self {
        Self {
            scene: Group::new(),
            lights: vec![
                Light {
                    color: [1.0, 1.0, 1.0],
                    intensity: 1.0,
                    position: DVec3::new(100.0, 100.0, 200.0),
                },
                Light {
                    color: [1.0, 1.0, 1.0],
                    intensity: 0.4,
                    position: DVec3::new(-100.0, -60.0, 80.0),
                },
            ],
        }
    }
}
