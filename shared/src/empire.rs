use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::colors;
use crate::coords::HexCoord;

/// Empire as the API serves it: hue instead of a color, territory as a flat
/// coordinate list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpireRecord {
    pub url: String,
    pub name: String,
    pub color_hue: f64,
    pub origin: HexCoord,
    #[serde(default)]
    pub territory: Vec<HexCoord>,
}

/// Empire with its display color computed and its territory in membership-test
/// form.
#[derive(Debug, Clone, PartialEq)]
pub struct Empire {
    pub url: String,
    pub name: String,
    pub color: (u8, u8, u8),
    pub origin: HexCoord,
    pub territory: HashSet<HexCoord>,
}

impl From<EmpireRecord> for Empire {
    fn from(record: EmpireRecord) -> Self {
        Self {
            color: colors::empire_color(record.color_hue),
            territory: record.territory.into_iter().collect(),
            url: record.url,
            name: record.name,
            origin: record.origin,
        }
    }
}

impl Empire {
    /// Territory membership, O(set lookup).
    pub fn owns(&self, coord: HexCoord) -> bool {
        self.territory.contains(&coord)
    }

    pub fn color_hex(&self) -> String {
        colors::to_hex(self.color)
    }
}
