//! # BSP Tree Node
//!
//! Binary space partitioning node for CSG boolean operations, after the
//! csg.js algorithm by Evan Wallace.
//!
//! Each node holds a dividing plane, the polygons coplanar with it, and
//! front/back subtrees. `clip_to` removes the parts of one tree's polygons
//! that lie inside another tree's solid; `invert` swaps solid and empty
//! space.

use super::polygon::{BspPolygon, Plane};

/// A node in the BSP tree.
#[derive(Debug, Clone, Default)]
pub struct BspNode {
    /// Dividing plane; `None` for a node that never received polygons.
    plane: Option<Plane>,
    /// Polygons coplanar with the dividing plane.
    polygons: Vec<BspPolygon>,
    /// Subtree on the positive side of the plane.
    front: Option<Box<BspNode>>,
    /// Subtree on the negative side of the plane.
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Builds a tree from polygons.
    pub fn new(polygons: Vec<BspPolygon>) -> Self {
        let mut node = Self::default();
        node.build(polygons);
        node
    }

    /// Inserts polygons, extending the tree where space is not yet split.
    ///
    /// The first polygon's plane becomes the dividing plane of a fresh
    /// node; the rest are partitioned and pushed down.
    pub fn build(&mut self, polygons: Vec<BspPolygon>) {
        if polygons.is_empty() {
            return;
        }

        let plane = match self.plane {
            Some(plane) => plane,
            None => {
                let plane = *polygons[0].plane();
                self.plane = Some(plane);
                plane
            }
        };

        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();
        for polygon in &polygons {
            plane.split_polygon(
                polygon,
                &mut coplanar_front,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
        }
        self.polygons.append(&mut coplanar_front);
        self.polygons.append(&mut coplanar_back);

        if !front.is_empty() {
            self.front
                .get_or_insert_with(|| Box::new(BspNode::default()))
                .build(front);
        }
        if !back.is_empty() {
            self.back
                .get_or_insert_with(|| Box::new(BspNode::default()))
                .build(back);
        }
    }

    /// Converts solid space to empty space and vice versa.
    pub fn invert(&mut self) {
        for polygon in &mut self.polygons {
            polygon.flip();
        }
        if let Some(plane) = &mut self.plane {
            plane.flip();
        }
        std::mem::swap(&mut self.front, &mut self.back);
        if let Some(front) = &mut self.front {
            front.invert();
        }
        if let Some(back) = &mut self.back {
            back.invert();
        }
    }

    /// Returns the subset of `polygons` outside this tree's solid,
    /// splitting spanning polygons along the way.
    pub fn clip_polygons(&self, polygons: Vec<BspPolygon>) -> Vec<BspPolygon> {
        let Some(plane) = self.plane else {
            return polygons;
        };

        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();
        for polygon in &polygons {
            plane.split_polygon(
                polygon,
                &mut coplanar_front,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
        }
        // Coplanar polygons follow the side they face.
        front.append(&mut coplanar_front);
        back.append(&mut coplanar_back);

        let mut front = match &self.front {
            Some(node) => node.clip_polygons(front),
            None => front,
        };
        let back = match &self.back {
            Some(node) => node.clip_polygons(back),
            // No back subtree: that half-space is solid, discard.
            None => Vec::new(),
        };

        front.extend(back);
        front
    }

    /// Removes the parts of this tree's polygons inside `other`'s solid.
    pub fn clip_to(&mut self, other: &BspNode) {
        self.polygons = other.clip_polygons(std::mem::take(&mut self.polygons));
        if let Some(front) = &mut self.front {
            front.clip_to(other);
        }
        if let Some(back) = &mut self.back {
            back.clip_to(other);
        }
    }

    /// Collects every polygon in the tree.
    pub fn all_polygons(&self) -> Vec<BspPolygon> {
        let mut result = Vec::new();
        let mut stack: Vec<&BspNode> = vec![self];
        while let Some(node) = stack.pop() {
            result.extend(node.polygons.iter().cloned());
            if let Some(front) = &node.front {
                stack.push(front);
            }
            if let Some(back) = &node.back {
                stack.push(back);
            }
        }
        result
    }
}
