use serde::{Deserialize, Serialize};

use crate::coords::HexCoord;

/// Star classes the renderer has icons for.
///
/// The wire keeps the raw variant string (see [`CelestialFeatures`]) so that
/// classes this build does not know degrade to a default rendering instead of
/// failing the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarVariant {
    WhiteMainline,
    YellowMainline,
    BlueMainline,
    WhiteDwarf,
    RedGiant,
}

impl StarVariant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "white-mainline" => Some(Self::WhiteMainline),
            "yellow-mainline" => Some(Self::YellowMainline),
            "blue-mainline" => Some(Self::BlueMainline),
            "white-dwarf" => Some(Self::WhiteDwarf),
            "red-giant" => Some(Self::RedGiant),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::WhiteMainline => "white-mainline",
            Self::YellowMainline => "yellow-mainline",
            Self::BlueMainline => "blue-mainline",
            Self::WhiteDwarf => "white-dwarf",
            Self::RedGiant => "red-giant",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CelestialFeatures {
    #[serde(default)]
    pub variant: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Celestial {
    #[serde(default)]
    pub url: String,
    /// Orbital slot; 0 is the star itself.
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub features: CelestialFeatures,
    #[serde(default)]
    pub habitated_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub url: String,
    pub position: HexCoord,
    pub name: String,
    #[serde(default)]
    pub celestial_set: Vec<Celestial>,
}

impl Sector {
    /// First inhabited celestial, if any.
    pub fn habitated_celestial(&self) -> Option<&Celestial> {
        self.celestial_set
            .iter()
            .find(|celestial| celestial.habitated_by.is_some())
    }

    /// Variant string of the sector's star (the first celestial).
    pub fn primary_variant(&self) -> Option<&str> {
        self.celestial_set
            .first()
            .map(|celestial| celestial.features.variant.as_str())
    }
}

/// Human-readable celestial name: the sector name, with the orbital slot
/// appended for everything but the star itself.
pub fn celestial_name(sector_name: &str, position: u32) -> String {
    if position > 0 {
        format!("{sector_name} {position}")
    } else {
        sector_name.to_string()
    }
}

/// Deterministic icon displacement inside a hex field, seeded by the sector
/// identifier. Per-axis salted CRC32 hashes give the two uniform draws, so a
/// given sector lands in the same spot on every load.
pub fn star_displacement(sector_url: &str, field_size: f64) -> (f64, f64) {
    let dx = (unit_from_hash(sector_url, b"#dx") - 0.5) * field_size;
    let dy = (unit_from_hash(sector_url, b"#dy") - 0.25) * 0.5 * field_size;
    (dx, dy)
}

fn unit_from_hash(seed: &str, salt: &[u8]) -> f64 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(seed.as_bytes());
    hasher.update(salt);
    f64::from(hasher.finalize()) / (f64::from(u32::MAX) + 1.0)
}
