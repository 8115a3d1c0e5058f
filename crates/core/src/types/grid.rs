//! Grid coordinates for the city map.
//!
//! The map is a flat cartesian grid, not geographic coordinates. Distances
//! are plain euclidean, in grid units.

use serde::{Deserialize, Serialize};

/// A point on the delivery grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
}

impl GridPoint {
    /// Lower bound of both grid axes.
    pub const MIN: f64 = 0.0;
    /// Upper bound of both grid axes.
    pub const MAX: f64 = 100.0;

    /// Create a point without bounds checking.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates fall inside the grid.
    #[must_use]
    pub fn in_bounds(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.x) && (Self::MIN..=Self::MAX).contains(&self.y)
    }

    /// Straight-line distance to another point, in grid units.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        let a = GridPoint::new(0.0, 0.0);
        let b = GridPoint::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < f64::EPSILON);
        assert!((b.distance_to(a) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        assert!(GridPoint::new(0.0, 100.0).in_bounds());
        assert!(GridPoint::new(50.0, 50.0).in_bounds());
        assert!(!GridPoint::new(-0.1, 10.0).in_bounds());
        assert!(!GridPoint::new(10.0, 100.5).in_bounds());
    }
}
