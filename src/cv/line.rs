//! Line segments between two points.

use serde::{Deserialize, Serialize};

use super::direction::{CardinalDirection, OrdinalDirection};
use super::point::Point;
use crate::error::StudioError;

/// A line segment from `pt1` to `pt2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub pt1: Point,
    pub pt2: Point,
}

impl Line {
    #[inline]
    pub fn new(pt1: Point, pt2: Point) -> Self {
        Self { pt1, pt2 }
    }

    /// Midpoint of the segment, floored to whole coordinates.
    pub fn center(&self) -> Point {
        Point::new(
            ((self.pt1.x + self.pt2.x) / 2.0).floor(),
            ((self.pt1.y + self.pt2.y) / 2.0).floor(),
        )
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.pt1.distance_from(&self.pt2)
    }

    /// Rise over run, `(pt2.y - pt1.y) / (pt2.x - pt1.x)`.
    ///
    /// Fails with [`StudioError::VerticalLine`] when both points share an
    /// x coordinate.
    pub fn slope(&self) -> Result<f64, StudioError> {
        let run = self.pt2.x - self.pt1.x;
        if run == 0.0 {
            return Err(StudioError::VerticalLine);
        }
        Ok((self.pt2.y - self.pt1.y) / run)
    }

    /// Dominant cardinal direction of `pt2` as seen from `pt1`.
    ///
    /// Horizontal movement wins over vertical; `None` if the points coincide.
    pub fn cardinal_direction(&self) -> Option<CardinalDirection> {
        let (from, to) = (&self.pt1, &self.pt2);
        if to.is_left_of(from) {
            Some(CardinalDirection::Left)
        } else if to.is_right_of(from) {
            Some(CardinalDirection::Right)
        } else if to.is_above(from) {
            Some(CardinalDirection::Up)
        } else if to.is_below(from) {
            Some(CardinalDirection::Down)
        } else {
            None
        }
    }

    /// Diagonal direction of `pt2` as seen from `pt1`, if it moves on both axes.
    pub fn ordinal_direction(&self) -> Option<OrdinalDirection> {
        let (from, to) = (&self.pt1, &self.pt2);
        if to.is_top_left_of(from) {
            Some(OrdinalDirection::UpLeft)
        } else if to.is_top_right_of(from) {
            Some(OrdinalDirection::UpRight)
        } else if to.is_bottom_left_of(from) {
            Some(OrdinalDirection::DownLeft)
        } else if to.is_bottom_right_of(from) {
            Some(OrdinalDirection::DownRight)
        } else {
            None
        }
    }

    pub fn direction(&self) -> (Option<CardinalDirection>, Option<OrdinalDirection>) {
        (self.cardinal_direction(), self.ordinal_direction())
    }
}
