//! Geometry
//!
//! Points in the unit square where individuals live and events land.

use serde::{Deserialize, Serialize};

/// A point in the unit square `[0, 1] x [0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Whether both coordinates lie inside the closed unit square.
    pub fn in_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_squared() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.3, 0.4);
        assert!((a.distance_squared(&b) - 0.25).abs() < 1e-12);
        assert_eq!(a.distance_squared(&a), 0.0);
    }

    #[test]
    fn test_unit_square() {
        assert!(Point::new(0.0, 1.0).in_unit_square());
        assert!(Point::new(0.5, 0.5).in_unit_square());
        assert!(!Point::new(1.01, 0.5).in_unit_square());
        assert!(!Point::new(0.5, -0.1).in_unit_square());
    }
}
