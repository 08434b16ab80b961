//! # Plane and Polygon for BSP Operations
//!
//! Convex polygon with its containing plane, plus the plane-side
//! classification and splitting that the BSP tree is built from.

use config::constants::BSP_EPSILON;
use glam::DVec3;

/// Which side of a plane a point or polygon lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// On the plane, within tolerance.
    Coplanar,
    /// Positive (normal) side.
    Front,
    /// Negative side.
    Back,
    /// Vertices on both sides.
    Spanning,
}

/// A plane in 3D space defined by unit normal and distance from origin.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Normal vector (unit length).
    pub normal: DVec3,
    /// Distance from origin along the normal.
    pub w: f64,
}

impl Plane {
    /// Create a plane from three points in counter-clockwise order.
    ///
    /// Returns `None` for degenerate (collinear) triples.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a);
        if normal.length() < BSP_EPSILON {
            return None;
        }
        let normal = normal.normalize();
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    /// Reverse the plane's orientation in place.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance from a point; positive on the front side.
    #[inline]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    #[inline]
    fn classify_point(&self, point: DVec3) -> Side {
        let dist = self.signed_distance(point);
        if dist > BSP_EPSILON {
            Side::Front
        } else if dist < -BSP_EPSILON {
            Side::Back
        } else {
            Side::Coplanar
        }
    }

    /// Splits `polygon` by this plane into the four output buckets.
    ///
    /// Coplanar polygons land in `coplanar_front` or `coplanar_back`
    /// depending on whether they face with or against this plane; polygons
    /// entirely on one side pass through; spanning polygons are cut along
    /// the plane with interpolated vertices on the cut line.
    pub fn split_polygon(
        &self,
        polygon: &BspPolygon,
        coplanar_front: &mut Vec<BspPolygon>,
        coplanar_back: &mut Vec<BspPolygon>,
        front: &mut Vec<BspPolygon>,
        back: &mut Vec<BspPolygon>,
    ) {
        let sides: Vec<Side> = polygon
            .vertices
            .iter()
            .map(|v| self.classify_point(*v))
            .collect();
        let polygon_side = combine_sides(&sides);

        match polygon_side {
            Side::Coplanar => {
                if self.normal.dot(polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            }
            Side::Front => front.push(polygon.clone()),
            Side::Back => back.push(polygon.clone()),
            Side::Spanning => {
                let mut front_verts: Vec<DVec3> = Vec::new();
                let mut back_verts: Vec<DVec3> = Vec::new();

                let n = polygon.vertices.len();
                for i in 0..n {
                    let j = (i + 1) % n;
                    let vi = polygon.vertices[i];
                    let vj = polygon.vertices[j];
                    let si = sides[i];
                    let sj = sides[j];

                    if si != Side::Back {
                        front_verts.push(vi);
                    }
                    if si != Side::Front {
                        back_verts.push(vi);
                    }
                    if (si == Side::Front && sj == Side::Back)
                        || (si == Side::Back && sj == Side::Front)
                    {
                        let di = self.signed_distance(vi);
                        let dj = self.signed_distance(vj);
                        let t = di / (di - dj);
                        let cut = vi.lerp(vj, t);
                        front_verts.push(cut);
                        back_verts.push(cut);
                    }
                }

                if front_verts.len() >= 3 {
                    if let Some(poly) = BspPolygon::from_vertices(front_verts) {
                        front.push(poly);
                    }
                }
                if back_verts.len() >= 3 {
                    if let Some(poly) = BspPolygon::from_vertices(back_verts) {
                        back.push(poly);
                    }
                }
            }
        }
    }
}

fn combine_sides(sides: &[Side]) -> Side {
    let mut has_front = false;
    let mut has_back = false;
    for side in sides {
        match side {
            Side::Front => has_front = true,
            Side::Back => has_back = true,
            _ => {}
        }
    }
    match (has_front, has_back) {
        (true, true) => Side::Spanning,
        (true, false) => Side::Front,
        (false, true) => Side::Back,
        (false, false) => Side::Coplanar,
    }
}

/// A convex polygon with its containing plane.
#[derive(Debug, Clone)]
pub struct BspPolygon {
    vertices: Vec<DVec3>,
    plane: Plane,
}

impl BspPolygon {
    /// Create a polygon from vertices in counter-clockwise order.
    ///
    /// Returns `None` when the vertices do not define a plane.
    pub fn from_vertices(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self { vertices, plane })
    }

    /// Polygon vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// The containing plane.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Reverse winding and plane orientation in place.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }
}

// =============================================================================
// TESTS
// =============================================================================
