//! Painting geometry onto images.
//!
//! Shapes stay plain value types; the [`Drawable`] trait adds the ability to
//! rasterize one onto a [`Canvas`] with an explicit style. A canvas is a
//! transparent RGBA layer the size of the target image: shapes paint into
//! it with tiny-skia and the layer is then composited onto the image in the
//! image's own channel order.

use serde::{Deserialize, Serialize};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};

use super::circle::Circle;
use super::color::Color;
use super::color_space::ColorSpace;
use super::line::Line;
use super::point::Point;
use super::rectangle::Rectangle;
use crate::error::StudioError;

/// Thickness value requesting a filled shape instead of an outline.
pub const FILLED: i32 = -1;

/// Stroke style for shapes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub color: Color,

    /// Stroke width in pixels; negative values fill the shape.
    pub thickness: i32,

    #[serde(default)]
    pub anti_alias: bool,
}

impl Style {
    pub fn new(color: Color, thickness: i32) -> Self {
        Self {
            color,
            thickness,
            anti_alias: false,
        }
    }

    /// A filled style in the given color.
    pub fn filled(color: Color) -> Self {
        Self::new(color, FILLED)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.thickness < 0
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(self.color.r, self.color.g, self.color.b, u8::MAX);
        paint.anti_alias = self.anti_alias;
        paint
    }

    fn stroke(&self, line_cap: LineCap) -> Stroke {
        Stroke {
            width: self.thickness.max(1) as f32,
            line_cap,
            line_join: LineJoin::Miter,
            ..Default::default()
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Color::RED, 1)
    }
}

/// Something that can paint itself onto a [`Canvas`].
pub trait Drawable {
    type Style;

    fn draw_on(&self, canvas: &mut Canvas, style: &Self::Style) -> Result<(), StudioError>;
}

/// A transparent RGBA layer matching the size of an image.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, StudioError> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            StudioError::Render(format!("cannot allocate a {}x{} canvas", width, height))
        })?;
        Ok(Self { pixmap })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Strokes `path`, or fills it when the style asks for it.
    pub fn paint_path(&mut self, path: &Path, style: &Style, line_cap: LineCap) {
        let paint = style.paint();
        if style.is_filled() {
            self.pixmap
                .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
        } else {
            self.pixmap
                .stroke_path(path, &paint, &style.stroke(line_cap), Transform::identity(), None);
        }
    }

    /// Fills the integer pixel span `[left, right] x [top, bottom]`.
    pub fn fill_pixels(&mut self, left: i64, top: i64, right: i64, bottom: i64, style: &Style) {
        if let Some(rect) = Rect::from_ltrb(
            left as f32,
            top as f32,
            (right + 1) as f32,
            (bottom + 1) as f32,
        ) {
            self.pixmap
                .fill_rect(rect, &style.paint(), Transform::identity(), None);
        }
    }

    /// Blends the layer (source-over) into an interleaved buffer.
    pub(crate) fn composite_into(&self, data: &mut [u8], color_space: ColorSpace) {
        let channels = usize::from(color_space.channels());

        for (src, dst) in self.pixmap.pixels().iter().zip(data.chunks_exact_mut(channels)) {
            let alpha = src.alpha();
            if alpha == 0 {
                continue;
            }
            let (r, g, b) = (src.red(), src.green(), src.blue());
            let rest = u16::from(u8::MAX - alpha);
            let over = |s: u8, d: u8| (u16::from(s) + (u16::from(d) * rest + 127) / 255).min(255) as u8;

            match color_space {
                ColorSpace::Bgr => {
                    dst[0] = over(b, dst[0]);
                    dst[1] = over(g, dst[1]);
                    dst[2] = over(r, dst[2]);
                }
                ColorSpace::Rgb => {
                    dst[0] = over(r, dst[0]);
                    dst[1] = over(g, dst[1]);
                    dst[2] = over(b, dst[2]);
                }
                ColorSpace::Rgba => {
                    dst[0] = over(r, dst[0]);
                    dst[1] = over(g, dst[1]);
                    dst[2] = over(b, dst[2]);
                    dst[3] = over(alpha, dst[3]);
                }
                ColorSpace::Gray => {
                    dst[0] = over(Color::new(r, g, b).luma(), dst[0]);
                }
            }
        }
    }
}

/// Center of the pixel at integer coordinates `point`.
fn pixel_center(point: &Point) -> (f32, f32) {
    let (x, y) = point.xy_ints();
    (x as f32 + 0.5, y as f32 + 0.5)
}

impl Drawable for Rectangle {
    type Style = Style;

    /// Outlines (or fills) the pixels from the top-left to the bottom-right
    /// corner inclusive.
    fn draw_on(&self, canvas: &mut Canvas, style: &Style) -> Result<(), StudioError> {
        let (left, top) = self.top_left().xy_ints();
        let (right, bottom) = self.bottom_right().xy_ints();

        if style.is_filled() {
            canvas.fill_pixels(left, top, right, bottom, style);
            return Ok(());
        }

        let (l, t) = pixel_center(&self.top_left());
        let (r, b) = pixel_center(&self.bottom_right());
        let mut pb = PathBuilder::new();
        pb.move_to(l, t);
        pb.line_to(r, t);
        pb.line_to(r, b);
        pb.line_to(l, b);
        pb.close();
        if let Some(path) = pb.finish() {
            canvas.paint_path(&path, style, LineCap::Square);
        }
        Ok(())
    }
}

impl Drawable for Circle {
    type Style = Style;

    fn draw_on(&self, canvas: &mut Canvas, style: &Style) -> Result<(), StudioError> {
        let (cx, cy) = pixel_center(&self.center);
        // No path for a non-positive radius; nothing to paint.
        if let Some(path) = PathBuilder::from_circle(cx, cy, self.radius as f32) {
            canvas.paint_path(&path, style, LineCap::Butt);
        }
        Ok(())
    }
}

impl Drawable for Line {
    type Style = Style;

    /// Strokes the segment with square caps so both end pixels are covered.
    fn draw_on(&self, canvas: &mut Canvas, style: &Style) -> Result<(), StudioError> {
        let (x1, y1) = pixel_center(&self.pt1);
        let (x2, y2) = pixel_center(&self.pt2);
        let mut pb = PathBuilder::new();
        pb.move_to(x1, y1);
        pb.line_to(x2, y2);
        if let Some(path) = pb.finish() {
            // A line has no interior, so a fill request strokes at 1px.
            let style = if style.is_filled() {
                Style { thickness: 1, ..*style }
            } else {
                *style
            };
            canvas.paint_path(&path, &style, LineCap::Square);
        }
        Ok(())
    }
}
