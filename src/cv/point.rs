//! 2D points in image coordinates (origin top-left, y grows downward).

use serde::{Deserialize, Serialize};

/// A real-valued 2D point.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the coordinates as a tuple.
    #[inline]
    pub fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Returns the coordinates truncated toward zero.
    #[inline]
    pub fn xy_ints(&self) -> (i64, i64) {
        (self.x as i64, self.y as i64)
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Cartesian quadrant (1-4), or 0 when the point lies on the y axis.
    pub fn quadrant(&self) -> u8 {
        if self.x > 0.0 {
            if self.y > 0.0 {
                1
            } else {
                4
            }
        } else if self.x < 0.0 {
            if self.y > 0.0 {
                2
            } else {
                3
            }
        } else {
            0
        }
    }

    /// Returns a new point shifted by `(dx, dy)`.
    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_from(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    pub fn is_above(&self, other: &Point) -> bool {
        self.y < other.y
    }

    #[inline]
    pub fn is_below(&self, other: &Point) -> bool {
        self.y > other.y
    }

    #[inline]
    pub fn is_left_of(&self, other: &Point) -> bool {
        self.x < other.x
    }

    #[inline]
    pub fn is_right_of(&self, other: &Point) -> bool {
        self.x > other.x
    }

    pub fn is_top_left_of(&self, other: &Point) -> bool {
        self.is_above(other) && self.is_left_of(other)
    }

    pub fn is_top_right_of(&self, other: &Point) -> bool {
        self.is_above(other) && self.is_right_of(other)
    }

    pub fn is_bottom_left_of(&self, other: &Point) -> bool {
        self.is_below(other) && self.is_left_of(other)
    }

    pub fn is_bottom_right_of(&self, other: &Point) -> bool {
        self.is_below(other) && self.is_right_of(other)
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
