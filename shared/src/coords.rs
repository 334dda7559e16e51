use serde::{Deserialize, Serialize};

/// Axial hex-grid coordinate.
///
/// The wire form is the two-element array `[x, y]`. The canonical string key
/// (`"x=3 y=-2"`) is what labels, logs and persisted selections use; value
/// equality and hashing coincide with it, so maps and sets key on the
/// coordinate directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
}

impl HexCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Canonical string key, `"x={x} y={y}"`.
    pub fn key(&self) -> String {
        format!("x={} y={}", self.x, self.y)
    }

    /// Parses a canonical key back into the coordinate it encodes.
    pub fn from_key(key: &str) -> Option<Self> {
        let (x_part, y_part) = key.split_once(' ')?;
        let x = x_part.strip_prefix("x=")?.parse().ok()?;
        let y = y_part.strip_prefix("y=")?.parse().ok()?;
        Some(Self { x, y })
    }
}

impl From<[i32; 2]> for HexCoord {
    fn from(value: [i32; 2]) -> Self {
        Self {
            x: value[0],
            y: value[1],
        }
    }
}

impl From<HexCoord> for [i32; 2] {
    fn from(value: HexCoord) -> Self {
        [value.x, value.y]
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x={} y={}", self.x, self.y)
    }
}
