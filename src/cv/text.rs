//! Text labels and labelled bounding boxes.
//!
//! Glyphs are rasterized by resvg: the label becomes a one-element SVG
//! document the size of the canvas, rendered straight into the canvas
//! layer. Fonts come from a process-wide database of system fonts that is
//! loaded on first use.

use std::sync::{Arc, OnceLock};

use resvg::tiny_skia::Transform;
use resvg::usvg::{self, fontdb};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::color::Color;
use super::draw::{Canvas, Drawable, Style};
use super::point::Point;
use super::rectangle::Rectangle;
use crate::error::StudioError;

/// Pixel height of a glyph line at font scale 1.0.
pub const BASE_FONT_SIZE: f64 = 22.0;

static FONT_DB: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

/// Families tried first when a generic family has no installed face.
const FALLBACK_FAMILIES: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
];

fn resolves(db: &fontdb::Database, family: fontdb::Family<'_>) -> bool {
    let families = [family];
    let query = fontdb::Query {
        families: &families,
        ..fontdb::Query::default()
    };
    db.query(&query).is_some()
}

fn fallback_family(db: &fontdb::Database) -> Option<String> {
    let loaded: Vec<&str> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str()))
        .collect();
    FALLBACK_FAMILIES
        .iter()
        .find(|preferred| loaded.contains(*preferred))
        .copied()
        .or_else(|| loaded.first().copied())
        .map(str::to_string)
}

/// Points generic families that name a missing face at one that loaded.
///
/// fontdb maps `sans-serif` to "Arial" and `serif` to "Times New Roman",
/// which many Linux systems do not ship.
fn map_generic_families(db: &mut fontdb::Database) {
    let Some(family) = fallback_family(db) else {
        return;
    };
    if !resolves(db, fontdb::Family::SansSerif) {
        db.set_sans_serif_family(family.clone());
    }
    if !resolves(db, fontdb::Family::Serif) {
        db.set_serif_family(family.clone());
    }
    if !resolves(db, fontdb::Family::Monospace) {
        db.set_monospace_family(family.clone());
    }
    if !resolves(db, fontdb::Family::Cursive) {
        db.set_cursive_family(family.clone());
    }
    if !resolves(db, fontdb::Family::Fantasy) {
        db.set_fantasy_family(family.clone());
    }
    debug!(%family, "generic font families resolved");
}

fn load_font_db() -> Arc<fontdb::Database> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    if db.is_empty() {
        warn!("no system fonts found; text will not be rendered");
    } else {
        map_generic_families(&mut db);
        debug!(faces = db.len(), "loaded system fonts");
    }
    Arc::new(db)
}

/// The shared font database.
pub fn font_db() -> Arc<fontdb::Database> {
    FONT_DB.get_or_init(load_font_db).clone()
}

/// How a [`Text`] is painted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: Color,
    pub font_scale: f64,

    /// Outline width; values above 1 thicken the glyphs.
    pub thickness: u32,
    pub font_family: String,

    #[serde(default)]
    pub anti_alias: bool,
}

impl TextStyle {
    pub fn new(color: Color, font_scale: f64) -> Self {
        Self {
            color,
            font_scale,
            ..Default::default()
        }
    }

    #[inline]
    pub fn font_size(&self) -> f64 {
        BASE_FONT_SIZE * self.font_scale
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::RED,
            font_scale: 1.0,
            thickness: 1,
            font_family: "sans-serif".to_string(),
            anti_alias: false,
        }
    }
}

/// A string anchored at its baseline-left `position`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
    pub position: Point,
}

impl Text {
    pub fn new(value: impl Into<String>, position: Point) -> Self {
        Self {
            value: value.into(),
            position,
        }
    }

    /// The SVG document that renders this text on a `width` x `height` canvas.
    pub fn to_svg(&self, style: &TextStyle, width: u32, height: u32) -> String {
        let fill = style.color.to_hex();
        let stroke = if style.thickness > 1 {
            format!(
                r#" stroke="{}" stroke-width="{}""#,
                fill,
                style.thickness - 1
            )
        } else {
            String::new()
        };
        let rendering = if style.anti_alias {
            "optimizeLegibility"
        } else {
            "optimizeSpeed"
        };

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><text x="{x}" y="{y}" font-family="{family}" font-size="{size}" fill="{fill}"{stroke} text-rendering="{rendering}">{value}</text></svg>"#,
            w = width,
            h = height,
            x = self.position.x,
            y = self.position.y,
            family = escape_xml(&style.font_family),
            size = style.font_size(),
            fill = fill,
            stroke = stroke,
            rendering = rendering,
            value = escape_xml(&self.value),
        )
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl Drawable for Text {
    type Style = TextStyle;

    fn draw_on(&self, canvas: &mut Canvas, style: &TextStyle) -> Result<(), StudioError> {
        if self.value.trim().is_empty() {
            return Ok(());
        }

        let svg = self.to_svg(style, canvas.width(), canvas.height());
        let options = usvg::Options {
            fontdb: font_db(),
            font_family: style.font_family.clone(),
            font_size: style.font_size() as f32,
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| StudioError::Render(format!("text '{}': {}", self.value, e)))?;

        resvg::render(&tree, Transform::identity(), &mut canvas.pixmap_mut().as_mut());
        Ok(())
    }
}

/// A detection result: a rectangle with its class and confidence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub rect: Rectangle,
    pub class_name: String,
    pub class_id: i64,
    pub confidence: f64,
}

impl BoundingBox {
    pub fn new(rect: Rectangle, class_name: impl Into<String>, class_id: i64, confidence: f64) -> Self {
        Self {
            rect,
            class_name: class_name.into(),
            class_id,
            confidence,
        }
    }

    /// `"<class name> <confidence>"` with two decimals.
    pub fn label(&self) -> String {
        format!("{} {:.2}", self.class_name, self.confidence)
    }
}

/// Styles for the two parts of a [`BoundingBox`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    pub stroke: Style,
    pub text: TextStyle,
}

impl Drawable for BoundingBox {
    type Style = BoxStyle;

    /// Paints the rectangle, then the label just above its top-left corner.
    fn draw_on(&self, canvas: &mut Canvas, style: &BoxStyle) -> Result<(), StudioError> {
        self.rect.draw_on(canvas, &style.stroke)?;

        let gap = f64::from(style.stroke.thickness.max(1)) + 2.0;
        let anchor = self.rect.top_left().translate(0.0, -gap);
        Text::new(self.label(), anchor).draw_on(canvas, &style.text)
    }
}
