//! # Shape Interpretation
//!
//! Flattens a path outline into polygon rings and resolves winding into
//! filled contours with holes.

use crate::command::{PathCommand, PathError, PathOutline};
use config::constants::{CURVE_SEGMENTS, GEOM_EPSILON};
use glam::DVec2;

/// A closed 2D polygon with optional holes.
///
/// Canonical orientation: the outer ring is counter-clockwise, every hole
/// ring is clockwise. [`interpret`] always produces this form regardless of
/// the winding in the source data.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape2D {
    outer: Vec<DVec2>,
    holes: Vec<Vec<DVec2>>,
}

impl Shape2D {
    /// Creates a shape from an outer ring, normalizing its orientation.
    pub fn new(outer: Vec<DVec2>) -> Self {
        Self::with_holes(outer, Vec::new())
    }

    /// Creates a shape from an outer ring and hole rings, normalizing the
    /// orientation of every ring.
    pub fn with_holes(mut outer: Vec<DVec2>, mut holes: Vec<Vec<DVec2>>) -> Self {
        if signed_area(&outer) < 0.0 {
            outer.reverse();
        }
        for hole in &mut holes {
            if signed_area(hole) > 0.0 {
                hole.reverse();
            }
        }
        Self { outer, holes }
    }

    /// Outer ring, counter-clockwise.
    #[inline]
    pub fn outer(&self) -> &[DVec2] {
        &self.outer
    }

    /// Hole rings, each clockwise.
    #[inline]
    pub fn holes(&self) -> &[Vec<DVec2>] {
        &self.holes
    }

    /// Total number of ring vertices (outer plus holes).
    pub fn vertex_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }

    /// Axis-aligned bounds of the outer ring.
    pub fn bounds(&self) -> (DVec2, DVec2) {
        let mut min = self.outer[0];
        let mut max = self.outer[0];
        for p in &self.outer[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }
        (min, max)
    }
}

/// Shoelace signed area of a ring; positive for counter-clockwise winding.
pub fn signed_area(ring: &[DVec2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        acc += a.x * b.y - b.x * a.y;
    }
    acc / 2.0
}

/// Even-odd ray-cast containment test.
fn ring_contains(ring: &[DVec2], p: DVec2) -> bool {
    let n = ring.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Parses path data and interprets it in one step.
///
/// Convenience for callers holding raw `d`-attribute text; see [`interpret`].
pub fn interpret_path_data(data: &str, winding_is_cw: bool) -> Result<Vec<Shape2D>, PathError> {
    let outline = PathOutline::parse(data)?;
    Ok(interpret(&outline, winding_is_cw))
}

/// Interprets a path outline as filled shapes.
///
/// Subpaths are flattened to polygon rings (curves sampled at
/// [`CURVE_SEGMENTS`] points each) and classified by winding: a ring whose
/// clockwise-ness matches `winding_is_cw` is a filled contour, an
/// opposite-winding ring is a hole in the smallest filled contour that
/// contains it. Holes contained by no contour are promoted to contours.
/// Rings with fewer than three distinct points or near-zero area are
/// dropped, so the result may be empty.
pub fn interpret(outline: &PathOutline, winding_is_cw: bool) -> Vec<Shape2D> {
    let rings = flatten_rings(outline);

    let mut solids: Vec<(Vec<DVec2>, f64)> = Vec::new();
    let mut orphans: Vec<Vec<DVec2>> = Vec::new();

    for ring in rings {
        let area = signed_area(&ring);
        let is_cw = area < 0.0;
        if is_cw == winding_is_cw {
            solids.push((ring, area.abs()));
        } else {
            orphans.push(ring);
        }
    }

    let mut holes_by_solid: Vec<Vec<Vec<DVec2>>> = vec![Vec::new(); solids.len()];
    for hole in orphans {
        // Smallest containing contour wins, so nested glyph counters land
        // in the innermost ring.
        let probe = hole[0];
        let owner = solids
            .iter()
            .enumerate()
            .filter(|(_, (ring, _))| ring_contains(ring, probe))
            .min_by(|(_, (_, a)), (_, (_, b))| a.total_cmp(b))
            .map(|(i, _)| i);
        match owner {
            Some(i) => holes_by_solid[i].push(hole),
            None => {
                solids.push((hole, 0.0));
                holes_by_solid.push(Vec::new());
            }
        }
    }

    solids
        .into_iter()
        .zip(holes_by_solid)
        .map(|((outer, _), holes)| Shape2D::with_holes(outer, holes))
        .collect()
}

/// Walks the command list, sampling curves, and returns the closed rings.
fn flatten_rings(outline: &PathOutline) -> Vec<Vec<DVec2>> {
    let mut rings = Vec::new();
    let mut ring: Vec<DVec2> = Vec::new();
    let mut cur = DVec2::ZERO;

    let mut push = |ring: &mut Vec<DVec2>, p: DVec2| {
        if ring.last().is_none_or(|last| last.distance(p) > GEOM_EPSILON) {
            ring.push(p);
        }
    };

    for command in outline.commands() {
        match *command {
            PathCommand::MoveTo(p) => {
                flush_ring(&mut rings, std::mem::take(&mut ring));
                push(&mut ring, p);
                cur = p;
            }
            PathCommand::LineTo(p) => {
                if ring.is_empty() {
                    // Drawing resumed after a close; the pen is back at the
                    // subpath start.
                    push(&mut ring, cur);
                }
                push(&mut ring, p);
                cur = p;
            }
            PathCommand::QuadTo { ctrl, to } => {
                if ring.is_empty() {
                    push(&mut ring, cur);
                }
                for step in 1..=CURVE_SEGMENTS {
                    let t = step as f64 / CURVE_SEGMENTS as f64;
                    let u = 1.0 - t;
                    let p = cur * (u * u) + ctrl * (2.0 * u * t) + to * (t * t);
                    push(&mut ring, p);
                }
                cur = to;
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                if ring.is_empty() {
                    push(&mut ring, cur);
                }
                for step in 1..=CURVE_SEGMENTS {
                    let t = step as f64 / CURVE_SEGMENTS as f64;
                    let u = 1.0 - t;
                    let p = cur * (u * u * u)
                        + ctrl1 * (3.0 * u * u * t)
                        + ctrl2 * (3.0 * u * t * t)
                        + to * (t * t * t);
                    push(&mut ring, p);
                }
                cur = to;
            }
            PathCommand::Close => {
                if let Some(&start) = ring.first() {
                    cur = start;
                }
                flush_ring(&mut rings, std::mem::take(&mut ring));
            }
        }
    }
    // An unterminated filled subpath closes implicitly.
    flush_ring(&mut rings, ring);

    rings
}

fn flush_ring(rings: &mut Vec<Vec<DVec2>>, mut ring: Vec<DVec2>) {
    // Drop the duplicated closing point if the data spelled it out.
    if ring.len() >= 2 {
        let first = ring[0];
        if ring.last().is_some_and(|last| last.distance(first) <= GEOM_EPSILON) {
            ring.pop();
        }
    }
    if ring.len() >= 3 && signed_area(&ring).abs() > GEOM_EPSILON {
        rings.push(ring);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SQUARE_CCW: &str = "M 0 0 L 10 0 L 10 10 L 0 10 Z";
    const SQUARE_CW: &str = "M 0 0 L 0 10 L 10 10 L 10 0 Z";
    // CW outer with a CCW counter, like a glyph exported y-down.
    const RING_CW_OUTER: &str =
        "M 0 0 L 0 10 L 10 10 L 10 0 Z M 2 2 L 8 2 L 8 8 L 2 8 Z";

    #[test]
    fn test_single_ring_matching_winding_is_solid() {
        let shapes = interpret_path_data(SQUARE_CW, true).unwrap();
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].holes().is_empty());
        assert_eq!(shapes[0].outer().len(), 4);
    }

    #[test]
    fn test_output_orientation_is_canonical() {
        let shapes = interpret_path_data(SQUARE_CW, true).unwrap();
        assert!(signed_area(shapes[0].outer()) > 0.0, "outer must be CCW");

        let shapes = interpret_path_data(SQUARE_CCW, false).unwrap();
        assert!(signed_area(shapes[0].outer()) > 0.0, "outer must be CCW");
    }

    #[test]
    fn test_ring_with_hole() {
        let shapes = interpret_path_data(RING_CW_OUTER, true).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].holes().len(), 1);
        assert!(signed_area(&shapes[0].holes()[0]) < 0.0, "holes must be CW");
    }

    #[test]
    fn test_winding_flag_flips_fill_sense() {
        // Same data, opposite convention: the inner ring is now the solid.
        let shapes = interpret_path_data(RING_CW_OUTER, false).unwrap();
        let inner = shapes
            .iter()
            .find(|s| {
                let (min, max) = s.bounds();
                (max - min).x < 7.0
            })
            .expect("inner square should be a solid now");
        assert!(inner.holes().is_empty());
    }

    #[test]
    fn test_orphan_hole_is_promoted() {
        // A lone ring wound as a "hole" still yields a filled contour.
        let shapes = interpret_path_data(SQUARE_CCW, true).unwrap();
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].holes().is_empty());
    }

    #[test]
    fn test_nested_counters_pick_innermost_owner() {
        // Three concentric squares: solid, hole, solid-in-hole.
        let data = "M 0 0 L 0 12 L 12 12 L 12 0 Z \
                    M 2 2 L 10 2 L 10 10 L 2 10 Z \
                    M 4 4 L 4 8 L 8 8 L 8 4 Z";
        let shapes = interpret_path_data(data, true).unwrap();
        assert_eq!(shapes.len(), 2);
        let big = &shapes[0];
        assert_eq!(big.holes().len(), 1);
    }

    #[test]
    fn test_curves_are_flattened() {
        let shapes =
            interpret_path_data("M 0 0 Q 5 10 10 0 Z", false).unwrap();
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].outer().len() > 3);
        // Curve apex sits at the Bézier midpoint (5, 5).
        let apex = shapes[0]
            .outer()
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, |acc, p| acc.max(p.y));
        assert_relative_eq!(apex, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_subpaths_are_dropped() {
        let shapes = interpret_path_data("M 0 0 L 5 0 Z", true).unwrap();
        assert!(shapes.is_empty());
    }

    #[test]
    fn test_unclosed_subpath_closes_implicitly() {
        let shapes = interpret_path_data("M 0 0 L 10 0 L 10 10 L 0 10", false).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].outer().len(), 4);
    }

    #[test]
    fn test_signed_area() {
        let ccw = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 4.0),
            DVec2::new(0.0, 4.0),
        ];
        assert_relative_eq!(signed_area(&ccw), 16.0);
        let mut cw = ccw.clone();
        cw.reverse();
        assert_relative_eq!(signed_area(&cw), -16.0);
    }
}
