//! Axis-aligned rectangles defined by two opposite corners.

use rand::RngExt;
use serde::{Deserialize, Serialize};

use super::point::Point;
use crate::error::StudioError;

/// Inset kept between a random point and the rectangle edges, when the
/// rectangle is large enough to afford it.
const RANDOM_POINT_MARGIN: f64 = 3.0;

/// An axis-aligned rectangle defined by two opposite corners.
///
/// The corners may be supplied in any order: [`top_left`](Self::top_left)
/// and [`bottom_right`](Self::bottom_right) are always derived as the
/// componentwise min and max. Unlike a raw bounding box, a rectangle
/// can never be degenerate: zero width or height is rejected at
/// construction.
#[derive(Clone, Copy, PartialEq)]
pub struct Rectangle {
    pt1: Point,
    pt2: Point,
}

impl Rectangle {
    /// Creates a rectangle from two opposite corners.
    ///
    /// Fails with [`StudioError::InvalidArguments`] if either coordinate is
    /// not finite or if the rectangle would have zero width or height.
    pub fn new(pt1: Point, pt2: Point) -> Result<Self, StudioError> {
        if !pt1.is_finite() || !pt2.is_finite() {
            return Err(StudioError::InvalidArguments(format!(
                "rectangle corners must be finite, got {:?} and {:?}",
                pt1, pt2
            )));
        }
        if pt1.x == pt2.x {
            return Err(StudioError::InvalidArguments(
                "rectangle width cannot be 0".to_string(),
            ));
        }
        if pt1.y == pt2.y {
            return Err(StudioError::InvalidArguments(
                "rectangle height cannot be 0".to_string(),
            ));
        }
        Ok(Self { pt1, pt2 })
    }

    /// The first corner, as supplied at construction.
    #[inline]
    pub fn pt1(&self) -> Point {
        self.pt1
    }

    /// The second corner, as supplied at construction.
    #[inline]
    pub fn pt2(&self) -> Point {
        self.pt2
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        Point::new(self.pt1.x.min(self.pt2.x), self.pt1.y.min(self.pt2.y))
    }

    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.pt1.x.max(self.pt2.x), self.pt1.y.max(self.pt2.y))
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.top_left().x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.top_left().y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.bottom_right().x
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.bottom_right().y
    }

    /// Returns the width of the rectangle. Always positive.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right() - self.left()
    }

    /// Returns the height of the rectangle. Always positive.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom() - self.top()
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        let top_left = self.top_left();
        Point::new(
            top_left.x + self.width() / 2.0,
            top_left.y + self.height() / 2.0,
        )
    }

    /// Returns true if `other` lies entirely inside this rectangle (edges inclusive).
    pub fn contains(&self, other: &Rectangle) -> bool {
        self.left() <= other.left()
            && self.right() >= other.right()
            && self.top() <= other.top()
            && self.bottom() >= other.bottom()
    }

    /// Returns true if `point` lies inside this rectangle (edges inclusive).
    pub fn contains_point(&self, point: &Point) -> bool {
        (self.left()..=self.right()).contains(&point.x)
            && (self.top()..=self.bottom()).contains(&point.y)
    }

    /// Returns a uniformly random point inside the rectangle.
    pub fn random_point(&self) -> Point {
        self.random_point_with(&mut rand::rng())
    }

    /// Returns a random point inside the rectangle using the given RNG.
    ///
    /// Points keep a small margin from the edges when the rectangle is
    /// wide (or tall) enough; otherwise the full extent is used.
    pub fn random_point_with<R: RngExt + ?Sized>(&self, rng: &mut R) -> Point {
        let (left, right) = inset(self.left(), self.right());
        let (top, bottom) = inset(self.top(), self.bottom());
        Point::new(rng.random_range(left..=right), rng.random_range(top..=bottom))
    }
}

fn inset(min: f64, max: f64) -> (f64, f64) {
    if max - min > RANDOM_POINT_MARGIN * 2.0 {
        (min + RANDOM_POINT_MARGIN, max - RANDOM_POINT_MARGIN)
    } else {
        (min, max)
    }
}

impl std::fmt::Debug for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rectangle({:?}, {:?})",
            self.top_left().xy(),
            self.bottom_right().xy()
        )
    }
}

// Serialized in normalized LTRB form; deserialization re-validates.
impl Serialize for Rectangle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Rectangle", 4)?;
        state.serialize_field("left", &self.left())?;
        state.serialize_field("top", &self.top())?;
        state.serialize_field("right", &self.right())?;
        state.serialize_field("bottom", &self.bottom())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Rectangle {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RectangleData {
            left: f64,
            top: f64,
            right: f64,
            bottom: f64,
        }
        let data = RectangleData::deserialize(deserializer)?;
        Rectangle::from_ltrb(data.left, data.top, data.right, data.bottom)
            .map_err(serde::de::Error::custom)
    }
}

/// Conversion utilities for different box formats.
impl Rectangle {
    /// Creates a rectangle from its left, top, right and bottom edges.
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, StudioError> {
        Self::new(Point::new(left, top), Point::new(right, bottom))
    }

    /// Creates a rectangle from its top, left, bottom and right edges.
    pub fn from_tlbr(top: f64, left: f64, bottom: f64, right: f64) -> Result<Self, StudioError> {
        Self::from_ltrb(left, top, right, bottom)
    }

    /// Creates a rectangle from its left/top edges and size.
    pub fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Result<Self, StudioError> {
        Self::from_ltrb(left, top, left + width, top + height)
    }

    /// Converts from XYWH format (x, y, width, height) where (x, y) is the top-left corner.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Result<Self, StudioError> {
        Self::from_ltwh(x, y, width, height)
    }

    /// Converts from a COCO bbox `[x, y, width, height]`.
    #[inline]
    pub fn from_coco_bbox(x: f64, y: f64, width: f64, height: f64) -> Result<Self, StudioError> {
        Self::from_ltwh(x, y, width, height)
    }

    /// Converts from a YOLO bbox: normalized center and size, relative to
    /// the image dimensions.
    pub fn from_yolo_bbox(
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self, StudioError> {
        let image_width = f64::from(image_width);
        let image_height = f64::from(image_height);
        Self::from_ltwh(
            cx * image_width - width * image_width / 2.0,
            cy * image_height - height * image_height / 2.0,
            width * image_width,
            height * image_height,
        )
    }

    /// Converts to XYWH format (x, y, width, height).
    #[inline]
    pub fn to_xywh(&self) -> (f64, f64, f64, f64) {
        (self.left(), self.top(), self.width(), self.height())
    }

    /// Converts to a COCO bbox `(x, y, width, height)`.
    #[inline]
    pub fn to_coco_bbox(&self) -> (f64, f64, f64, f64) {
        self.to_xywh()
    }

    #[inline]
    pub fn to_ltrb(&self) -> (f64, f64, f64, f64) {
        (self.left(), self.top(), self.right(), self.bottom())
    }

    /// Returns the `(top_left, bottom_right)` corner pair.
    #[inline]
    pub fn to_tlbr(&self) -> ((f64, f64), (f64, f64)) {
        (self.top_left().xy(), self.bottom_right().xy())
    }

    /// Converts to a YOLO bbox `(cx, cy, width, height)` normalized by the
    /// image dimensions.
    pub fn to_yolo_bbox(&self, image_width: u32, image_height: u32) -> (f64, f64, f64, f64) {
        let image_width = f64::from(image_width);
        let image_height = f64::from(image_height);
        let center = self.center();
        (
            center.x / image_width,
            center.y / image_height,
            self.width() / image_width,
            self.height() / image_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_rectangle_normalizes_corners() {
        let rect = Rectangle::new(Point::new(100.0, 20.0), Point::new(10.0, 80.0)).unwrap();
        assert_eq!(rect.top_left(), Point::new(10.0, 20.0));
        assert_eq!(rect.bottom_right(), Point::new(100.0, 80.0));
        assert_eq!(rect.width(), 90.0);
        assert_eq!(rect.height(), 60.0);
        assert_eq!(rect.area(), 5400.0);
    }

    #[test]
    fn test_rectangle_rejects_degenerate() {
        let zero_width = Rectangle::new(Point::new(5.0, 0.0), Point::new(5.0, 10.0));
        assert!(matches!(zero_width, Err(StudioError::InvalidArguments(_))));

        let zero_height = Rectangle::from_xywh(0.0, 0.0, 10.0, 0.0);
        assert!(matches!(zero_height, Err(StudioError::InvalidArguments(_))));

        let nan = Rectangle::from_ltrb(f64::NAN, 0.0, 1.0, 1.0);
        assert!(nan.is_err());
    }

    #[test]
    fn test_rectangle_from_xywh() {
        let rect = Rectangle::from_xywh(10.0, 20.0, 90.0, 60.0).unwrap();
        assert_eq!(rect.to_ltrb(), (10.0, 20.0, 100.0, 80.0));
        assert_eq!(rect.center(), Point::new(55.0, 50.0));
    }

    #[test]
    fn test_rectangle_tlbr_order() {
        let rect = Rectangle::from_tlbr(20.0, 10.0, 80.0, 100.0).unwrap();
        assert_eq!(rect.to_tlbr(), ((10.0, 20.0), (100.0, 80.0)));
    }

    #[test]
    fn test_rectangle_yolo_roundtrip() {
        let rect = Rectangle::from_ltrb(64.0, 48.0, 320.0, 240.0).unwrap();
        let (cx, cy, w, h) = rect.to_yolo_bbox(640, 480);
        assert_eq!((cx, cy, w, h), (0.3, 0.3, 0.4, 0.4));

        let restored = Rectangle::from_yolo_bbox(cx, cy, w, h, 640, 480).unwrap();
        let (l, t, r, b) = restored.to_ltrb();
        assert!((l - 64.0).abs() < 1e-9);
        assert!((t - 48.0).abs() < 1e-9);
        assert!((r - 320.0).abs() < 1e-9);
        assert!((b - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_rectangle_contains() {
        let outer = Rectangle::from_ltrb(0.0, 0.0, 100.0, 100.0).unwrap();
        let inner = Rectangle::from_ltrb(10.0, 10.0, 100.0, 50.0).unwrap();
        let overlapping = Rectangle::from_ltrb(50.0, 50.0, 150.0, 150.0).unwrap();

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&overlapping));
        assert!(outer.contains_point(&Point::new(100.0, 0.0)));
        assert!(!outer.contains_point(&Point::new(100.5, 0.0)));
    }

    #[test]
    fn test_rectangle_random_point_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        let large = Rectangle::from_ltrb(0.0, 0.0, 50.0, 40.0).unwrap();
        let small = Rectangle::from_ltrb(0.0, 0.0, 2.0, 2.0).unwrap();

        for _ in 0..100 {
            let p = large.random_point_with(&mut rng);
            assert!((3.0..=47.0).contains(&p.x));
            assert!((3.0..=37.0).contains(&p.y));
            assert!(small.contains_point(&small.random_point_with(&mut rng)));
        }
    }

    #[test]
    fn test_rectangle_serde_roundtrip() {
        let rect = Rectangle::from_ltrb(30.0, 40.0, 10.0, 20.0).unwrap();
        let json = serde_json::to_string(&rect).unwrap();
        assert_eq!(json, r#"{"left":10.0,"top":20.0,"right":30.0,"bottom":40.0}"#);

        let restored: Rectangle = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.to_ltrb(), rect.to_ltrb());

        let degenerate = r#"{"left":1.0,"top":1.0,"right":1.0,"bottom":5.0}"#;
        assert!(serde_json::from_str::<Rectangle>(degenerate).is_err());
    }
}
