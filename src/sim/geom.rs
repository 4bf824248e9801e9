//! Axis-aligned bounding boxes
//!
//! Bounds are half-open in spirit: two boxes that only share an edge have zero
//! overlap area and do not intersect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in screen space (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box anchored at its top-left corner
    #[inline]
    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self {
            min: corner,
            max: corner + size,
        }
    }

    /// Box centered on a point
    #[inline]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_detected() {
        let a = Aabb::new(Vec2::new(90.0, 87.0), Vec2::new(110.0, 113.0));
        let b = Aabb::new(Vec2::new(95.0, -180.0), Vec2::new(147.0, 140.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::from_corner(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let right = Aabb::from_corner(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let below = Aabb::from_corner(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        let corner = Aabb::from_corner(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(!a.intersects(&corner));
    }

    #[test]
    fn test_separated_on_one_axis() {
        // x overlaps, y does not
        let a = Aabb::from_center(Vec2::new(100.0, 200.0), Vec2::new(20.0, 26.0));
        let b = Aabb::from_corner(Vec2::new(95.0, -180.0), Vec2::new(52.0, 320.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_from_center() {
        let b = Aabb::from_center(Vec2::new(100.0, 50.0), Vec2::new(20.0, 26.0));
        assert_eq!(b.min, Vec2::new(90.0, 37.0));
        assert_eq!(b.max, Vec2::new(110.0, 63.0));
        assert_eq!(b.width(), 20.0);
        assert_eq!(b.height(), 26.0);
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (-500i32..500, -500i32..500, 1i32..200, 1i32..200).prop_map(|(x, y, w, h)| {
            Aabb::from_corner(
                Vec2::new(x as f32, y as f32),
                Vec2::new(w as f32, h as f32),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_intersects_iff_positive_overlap(a in arb_box(), b in arb_box()) {
            let overlap_x = a.max.x.min(b.max.x) - a.min.x.max(b.min.x);
            let overlap_y = a.max.y.min(b.max.y) - a.min.y.max(b.min.y);
            prop_assert_eq!(a.intersects(&b), overlap_x > 0.0 && overlap_y > 0.0);
        }
    }
}
