//! Circles and angular measurements on them.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::point::Point;
use crate::error::StudioError;

/// A circle given by its center and radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn from_xyr(x: f64, y: f64, radius: f64) -> Self {
        Self::new(Point::new(x, y), radius)
    }

    #[inline]
    pub fn to_xyr(&self) -> (f64, f64, f64) {
        (self.center.x, self.center.y, self.radius)
    }

    #[inline]
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    #[inline]
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Leftmost point of the circle.
    pub fn min_x(&self) -> Point {
        self.center.translate(-self.radius, 0.0)
    }

    /// Rightmost point of the circle.
    pub fn max_x(&self) -> Point {
        self.center.translate(self.radius, 0.0)
    }

    /// Topmost point of the circle (smallest y).
    pub fn min_y(&self) -> Point {
        self.center.translate(0.0, -self.radius)
    }

    /// Bottommost point of the circle (largest y).
    pub fn max_y(&self) -> Point {
        self.center.translate(0.0, self.radius)
    }

    /// Central angle, in radians, between two points on the circle.
    ///
    /// Uses the law of cosines on the chord `pt1-pt2`, so both points are
    /// expected to lie `radius` away from the center.
    pub fn radians_between(&self, pt1: &Point, pt2: &Point) -> f64 {
        let chord = pt1.distance_from(pt2);
        let r2 = self.radius * self.radius;
        let cos = (2.0 * r2 - chord * chord) / (2.0 * r2);
        cos.clamp(-1.0, 1.0).acos()
    }

    pub fn degrees_between(&self, pt1: &Point, pt2: &Point) -> f64 {
        self.radians_between(pt1, pt2).to_degrees()
    }

    pub fn arc_length_between(&self, pt1: &Point, pt2: &Point) -> f64 {
        self.radians_between(pt1, pt2) * self.radius
    }

    /// Samples `steps + 1` points around the circle starting at angle 0.
    ///
    /// The first and last points coincide. With `clockwise == false` the
    /// order is reversed.
    pub fn points_on_circumference(
        &self,
        steps: usize,
        clockwise: bool,
    ) -> Result<Vec<Point>, StudioError> {
        if steps == 0 {
            return Err(StudioError::InvalidArguments(
                "circumference sampling needs at least one step".to_string(),
            ));
        }

        let radians_per_step = 2.0 * PI / steps as f64;
        let mut points: Vec<Point> = (0..=steps)
            .map(|step| {
                let angle = step as f64 * radians_per_step;
                Point::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                )
            })
            .collect();

        if !clockwise {
            points.reverse();
        }
        Ok(points)
    }
}
