//! Geometric primitives used by the gesture engine.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between two points.
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_point_new() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(p.x, 10.0);
        assert_eq!(p.y, 20.0);
    }

    #[test]
    fn test_point_origin_is_default() {
        assert_eq!(Point::default(), Point::ORIGIN);
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!((p1.distance(&p2) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_point_midpoint() {
        let p1 = Point::new(100.0, 200.0);
        let p2 = Point::new(200.0, 200.0);
        assert_eq!(p1.midpoint(&p2), Point::new(150.0, 200.0));
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(5.0, 7.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1 + p2, Point::new(7.0, 10.0));
        assert_eq!(p1 - p2, Point::new(3.0, 4.0));
    }

    proptest! {
        #[test]
        fn prop_distance_non_negative(x1 in -1000.0f32..1000.0, y1 in -1000.0f32..1000.0, x2 in -1000.0f32..1000.0, y2 in -1000.0f32..1000.0) {
            let p1 = Point::new(x1, y1);
            let p2 = Point::new(x2, y2);
            prop_assert!(p1.distance(&p2) >= 0.0);
        }

        #[test]
        fn prop_distance_symmetric(x1 in -1000.0f32..1000.0, y1 in -1000.0f32..1000.0, x2 in -1000.0f32..1000.0, y2 in -1000.0f32..1000.0) {
            let p1 = Point::new(x1, y1);
            let p2 = Point::new(x2, y2);
            prop_assert!((p1.distance(&p2) - p2.distance(&p1)).abs() < 0.001);
        }

        #[test]
        fn prop_midpoint_equidistant(x1 in -1000.0f32..1000.0, y1 in -1000.0f32..1000.0, x2 in -1000.0f32..1000.0, y2 in -1000.0f32..1000.0) {
            let p1 = Point::new(x1, y1);
            let p2 = Point::new(x2, y2);
            let mid = p1.midpoint(&p2);
            prop_assert!((p1.distance(&mid) - p2.distance(&mid)).abs() < 0.01);
        }
    }
}
