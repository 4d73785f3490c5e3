//! Collision geometry for circles and the ship hull
//!
//! Everything here is pure: no entity state, no side effects. Asteroids and
//! projectiles are circles; the ship collides through its triangular hull.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tolerance for collinearity and bounding-box checks on segments
pub const SEGMENT_EPSILON: f32 = 1e-3;

/// A positioned circle (asteroid, projectile or ship body)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub position: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// True if the two circles touch or overlap
#[inline]
pub fn circle_collision(a: &Circle, b: &Circle) -> bool {
    distance(a.position, b.position) <= a.radius + b.radius
}

/// True if `point` lies on the segment `start..end` within tolerance
///
/// Requires both collinearity and containment in the segment's bounding box,
/// so points on the infinite line but past either endpoint are rejected.
pub fn point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> bool {
    let seg = end - start;
    let len = seg.length();
    if len <= SEGMENT_EPSILON {
        return distance(point, start) <= SEGMENT_EPSILON;
    }

    // Perpendicular distance from the line, via the 2D cross product
    let cross = seg.perp_dot(point - start);
    if cross.abs() / len > SEGMENT_EPSILON {
        return false;
    }

    let min = start.min(end) - Vec2::splat(SEGMENT_EPSILON);
    let max = start.max(end) + Vec2::splat(SEGMENT_EPSILON);
    point.cmpge(min).all() && point.cmple(max).all()
}

/// Nearest point to `point` on the segment `start..end`
pub fn closest_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> Vec2 {
    let seg = end - start;
    let len_sq = seg.length_squared();
    if len_sq < 0.0001 {
        return start; // Degenerate segment
    }

    let t = (point - start).dot(seg) / len_sq;
    let projected = start + seg * t;
    if point_on_segment(projected, start, end) {
        projected
    } else if t < 0.0 {
        start
    } else {
        end
    }
}

/// True if `point` is inside (or on the boundary of) a convex polygon
///
/// Works for either winding: the point is inside when it is on the same side
/// of every edge.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut has_pos = false;
    let mut has_neg = false;
    for (i, &start) in vertices.iter().enumerate() {
        let end = vertices[(i + 1) % vertices.len()];
        let side = (end - start).perp_dot(point - start);
        if side > 0.0 {
            has_pos = true;
        } else if side < 0.0 {
            has_neg = true;
        }
        if has_pos && has_neg {
            return false;
        }
    }
    true
}

/// True if the circle intersects the convex polygon
///
/// Hits when the centre is inside the polygon (covers a circle swallowed by the
/// hull) or when any edge comes within `radius` of the centre (covers grazing).
pub fn circle_polygon_collision(circle: &Circle, vertices: &[Vec2]) -> bool {
    if point_in_polygon(circle.position, vertices) {
        return true;
    }

    vertices.iter().enumerate().any(|(i, &start)| {
        let end = vertices[(i + 1) % vertices.len()];
        let closest = closest_point_on_segment(circle.position, start, end);
        distance(closest, circle.position) <= circle.radius
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Ship hull at (100, 100), rotation 0
    fn hull() -> [Vec2; 3] {
        [
            Vec2::new(130.0, 100.0),
            Vec2::new(90.0, 110.0),
            Vec2::new(90.0, 90.0),
        ]
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_circle_collision_touching_counts() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(15.0, 0.0), 5.0);
        assert!(circle_collision(&a, &b));

        let c = Circle::new(Vec2::new(15.1, 0.0), 5.0);
        assert!(!circle_collision(&a, &c));
    }

    #[test]
    fn test_point_on_segment() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 10.0);
        assert!(point_on_segment(Vec2::new(5.0, 5.0), a, b));
        assert!(point_on_segment(a, a, b));
        assert!(point_on_segment(b, a, b));
        // Off the line
        assert!(!point_on_segment(Vec2::new(5.0, 6.0), a, b));
    }

    #[test]
    fn test_point_on_segment_rejects_collinear_outside_span() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(!point_on_segment(Vec2::new(-1.0, 0.0), a, b));
        assert!(!point_on_segment(Vec2::new(10.5, 0.0), a, b));
    }

    #[test]
    fn test_closest_point_clamps_to_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(closest_point_on_segment(Vec2::new(5.0, 3.0), a, b), Vec2::new(5.0, 0.0));
        assert_eq!(closest_point_on_segment(Vec2::new(-4.0, 3.0), a, b), a);
        assert_eq!(closest_point_on_segment(Vec2::new(14.0, -3.0), a, b), b);
    }

    #[test]
    fn test_point_in_polygon_either_winding() {
        let tri = hull();
        let mut reversed = tri;
        reversed.reverse();
        let inside = Vec2::new(100.0, 100.0);
        let outside = Vec2::new(140.0, 100.0);
        assert!(point_in_polygon(inside, &tri));
        assert!(point_in_polygon(inside, &reversed));
        assert!(!point_in_polygon(outside, &tri));
        assert!(!point_in_polygon(outside, &reversed));
    }

    #[test]
    fn test_circle_inside_hull() {
        // Small circle entirely within the triangle, no edge contact
        let circle = Circle::new(Vec2::new(100.0, 100.0), 1.0);
        assert!(circle_polygon_collision(&circle, &hull()));
    }

    #[test]
    fn test_circle_grazes_edge() {
        // Rear edge is x = 90; centre is exactly one radius behind it
        let circle = Circle::new(Vec2::new(80.0, 100.0), 10.0);
        assert!(circle_polygon_collision(&circle, &hull()));
    }

    #[test]
    fn test_circle_overlaps_nose() {
        let circle = Circle::new(Vec2::new(135.0, 100.0), 10.0);
        assert!(circle_polygon_collision(&circle, &hull()));
    }

    #[test]
    fn test_circle_disjoint() {
        let circle = Circle::new(Vec2::new(200.0, 200.0), 20.0);
        assert!(!circle_polygon_collision(&circle, &hull()));

        // Just short of the rear edge
        let circle = Circle::new(Vec2::new(79.0, 100.0), 10.0);
        assert!(!circle_polygon_collision(&circle, &hull()));
    }

    proptest! {
        #[test]
        fn prop_circle_collision_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0, ar in 0.1f32..100.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0, br in 0.1f32..100.0,
        ) {
            let a = Circle::new(Vec2::new(ax, ay), ar);
            let b = Circle::new(Vec2::new(bx, by), br);
            prop_assert_eq!(circle_collision(&a, &b), circle_collision(&b, &a));
        }

        #[test]
        fn prop_closest_point_lies_on_segment(
            px in -500.0f32..500.0, py in -500.0f32..500.0,
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assume!(a.distance(b) > 1.0);
            let c = closest_point_on_segment(Vec2::new(px, py), a, b);
            prop_assert!(point_on_segment(c, a, b));
        }
    }
}
