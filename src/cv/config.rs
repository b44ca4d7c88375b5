//! Default drawing parameters loaded from YAML or JSON.
//!
//! ```yaml
//! color: "#00ff00"   # or a name such as "orange"
//! thickness: 2
//! font_scale: 0.8
//! font_family: DejaVu Sans
//! anti_alias: true
//! ```
//!
//! Every field is optional; missing ones keep their defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::draw::Style;
use super::text::{BoxStyle, TextStyle};
use crate::error::StudioError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawDefaults {
    pub color: Color,
    pub thickness: i32,
    pub font_scale: f64,
    pub font_family: String,
    pub anti_alias: bool,
}

impl Default for DrawDefaults {
    fn default() -> Self {
        Self {
            color: Color::RED,
            thickness: 1,
            font_scale: 1.0,
            font_family: "sans-serif".to_string(),
            anti_alias: false,
        }
    }
}

impl DrawDefaults {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a config file; `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn from_path(path: &Path) -> Result<Self, StudioError> {
        let file = File::open(path).map_err(StudioError::Io)?;
        let reader = BufReader::new(file);

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_reader(reader).map_err(|source| StudioError::ConfigJsonParse {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_yaml::from_reader(reader).map_err(|source| StudioError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    pub fn style(&self) -> Style {
        Style {
            color: self.color,
            thickness: self.thickness,
            anti_alias: self.anti_alias,
        }
    }

    /// Text outline width follows the shape thickness, floored at 1.
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            color: self.color,
            font_scale: self.font_scale,
            thickness: self.thickness.max(1) as u32,
            font_family: self.font_family.clone(),
            anti_alias: self.anti_alias,
        }
    }

    pub fn box_style(&self) -> BoxStyle {
        BoxStyle {
            stroke: self.style(),
            text: self.text_style(),
        }
    }
}
