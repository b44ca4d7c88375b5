//! Compass directions between two points.

use serde::{Deserialize, Serialize};

/// The four cardinal directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardinalDirection {
    Up,
    Down,
    Left,
    Right,
}

/// The four diagonal directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrdinalDirection {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}
