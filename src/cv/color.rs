//! Three-channel colors with RGB/BGR views and hex conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StudioError;

/// An 8-bit RGB color.
///
/// Channel order only matters at the edges: [`rgb`](Self::rgb) and
/// [`bgr`](Self::bgr) expose the two orders consumers expect. Serialized
/// as a `#rrggbb` string; deserialization also accepts color names.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const PURPLE: Color = Color::new(255, 0, 255);
    pub const CYAN: Color = Color::new(0, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from channels given in BGR order.
    #[inline]
    pub const fn from_bgr(b: u8, g: u8, r: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    #[inline]
    pub fn bgr(&self) -> (u8, u8, u8) {
        (self.b, self.g, self.r)
    }

    /// Perceived brightness using the ITU-R BT.601 weights.
    pub fn luma(&self) -> u8 {
        let luma = 0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b);
        luma.round().clamp(0.0, 255.0) as u8
    }

    /// Moves every channel toward white by `amount` (clamped to 0.0..=1.0).
    pub fn lighten(&self, amount: f64) -> Self {
        let amount = unit(amount);
        let up = |c: u8| (f64::from(c) + (255.0 - f64::from(c)) * amount).round() as u8;
        Self::new(up(self.r), up(self.g), up(self.b))
    }

    /// Moves every channel toward black by `amount` (clamped to 0.0..=1.0).
    pub fn darken(&self, amount: f64) -> Self {
        let amount = unit(amount);
        let down = |c: u8| (f64::from(c) * (1.0 - amount)).round() as u8;
        Self::new(down(self.r), down(self.g), down(self.b))
    }

    /// Formats the color as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode([self.r, self.g, self.b]))
    }

    /// Parses `#rrggbb`, `rrggbb` or the `#rgb` shorthand.
    pub fn from_hex(value: &str) -> Result<Self, StudioError> {
        let digits = value.trim().trim_start_matches('#');
        let expanded;
        let digits = if digits.len() == 3 {
            expanded = digits.chars().flat_map(|c| [c, c]).collect::<String>();
            expanded.as_str()
        } else {
            digits
        };

        let mut rgb = [0u8; 3];
        hex::decode_to_slice(digits, &mut rgb)
            .map_err(|e| StudioError::InvalidColor(format!("'{}': {}", value, e)))?;
        Ok(Self::new(rgb[0], rgb[1], rgb[2]))
    }

    /// Looks up a color by (case-insensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, color)| *color)
    }
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("red", Color::RED),
    ("green", Color::GREEN),
    ("blue", Color::BLUE),
    ("white", Color::WHITE),
    ("black", Color::BLACK),
    ("yellow", Color::YELLOW),
    ("purple", Color::PURPLE),
    ("magenta", Color::PURPLE),
    ("cyan", Color::CYAN),
    ("orange", Color::new(255, 165, 0)),
    ("gray", Color::new(128, 128, 128)),
    ("grey", Color::new(128, 128, 128)),
];

fn unit(amount: f64) -> f64 {
    if amount.is_nan() {
        0.0
    } else {
        amount.clamp(0.0, 1.0)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = StudioError;

    /// Accepts a color name or a hex string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_name(s) {
            Some(color) => Ok(color),
            None => Self::from_hex(s),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = StudioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_channel_orders() {
        let c = Color::new(10, 20, 30);
        assert_eq!(c.rgb(), (10, 20, 30));
        assert_eq!(c.bgr(), (30, 20, 10));
        assert_eq!(Color::from_bgr(30, 20, 10), c);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::RED.to_hex(), "#ff0000");
        assert_eq!(Color::from_hex("#00ff7f").unwrap(), Color::new(0, 255, 127));
        assert_eq!(Color::from_hex("0A0B0C").unwrap(), Color::new(10, 11, 12));
        assert_eq!(Color::from_hex("#fa0").unwrap(), Color::new(255, 170, 0));
    }

    #[test]
    fn test_color_hex_rejects_garbage() {
        assert!(matches!(Color::from_hex("#12345"), Err(StudioError::InvalidColor(_))));
        assert!(matches!(Color::from_hex("#gggggg"), Err(StudioError::InvalidColor(_))));
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_color_lighten_darken() {
        let c = Color::new(100, 0, 255);
        assert_eq!(c.lighten(0.0), c);
        assert_eq!(c.lighten(1.0), Color::WHITE);
        assert_eq!(c.lighten(0.5), Color::new(178, 128, 255));
        assert_eq!(c.darken(1.0), Color::BLACK);
        assert_eq!(c.darken(0.5), Color::new(50, 0, 128));
        assert_eq!(c.darken(7.0), Color::BLACK);
    }

    #[test]
    fn test_color_from_name_and_str() {
        assert_eq!(Color::from_name("Red"), Some(Color::RED));
        assert_eq!(Color::from_name("chartreuse"), None);
        assert_eq!("cyan".parse::<Color>().unwrap(), Color::CYAN);
        assert_eq!("#0000ff".parse::<Color>().unwrap(), Color::BLUE);
    }

    #[test]
    fn test_color_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::GREEN).unwrap();
        assert_eq!(json, "\"#00ff00\"");
        let named: Color = serde_json::from_str("\"yellow\"").unwrap();
        assert_eq!(named, Color::YELLOW);
    }

    #[test]
    fn test_color_luma() {
        assert_eq!(Color::WHITE.luma(), 255);
        assert_eq!(Color::BLACK.luma(), 0);
        assert_eq!(Color::RED.luma(), 76);
    }
}
