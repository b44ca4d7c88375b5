//! Geometry, colors and raster images.
//!
//! Shapes ([`Point`], [`Line`], [`Rectangle`], [`Circle`], [`Text`],
//! [`BoundingBox`]) are plain values. An [`Image`] owns pixels and paints
//! shapes onto itself through the [`Drawable`] trait with an explicit style.

mod circle;
mod color;
mod color_space;
pub mod config;
mod direction;
pub mod draw;
mod grid;
mod image;
mod line;
mod point;
mod rectangle;
mod text;

pub use circle::Circle;
pub use color::Color;
pub use color_space::ColorSpace;
pub use config::DrawDefaults;
pub use direction::{CardinalDirection, OrdinalDirection};
pub use draw::{Canvas, Drawable, Style, FILLED};
pub use grid::ImageGrid;
pub use self::image::{Image, Trim, MAX_BUFFER_BYTES};
pub use line::Line;
pub use point::Point;
pub use rectangle::Rectangle;
pub use text::{font_db, BoundingBox, BoxStyle, Text, TextStyle};
