use serde::{Deserialize, Serialize};

use crate::coords::HexCoord;

/// Blueprint attributes the game exposes to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintData {
    pub name: String,
    #[serde(default)]
    pub cost: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub url: String,
    pub base_id: String,
    pub data: BlueprintData,
}

/// Ship design reference, two-phase: a bare blueprint identifier until the
/// blueprint store resolves, the full blueprint afterwards. The wire form is
/// the identifier string; a resolved design serializes as the object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShipDesign {
    Resolved(Blueprint),
    Pending(String),
}

impl ShipDesign {
    /// The blueprint identifier, resolved or not.
    pub fn blueprint_url(&self) -> &str {
        match self {
            Self::Resolved(blueprint) => &blueprint.url,
            Self::Pending(id) => id,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn blueprint(&self) -> Option<&Blueprint> {
        match self {
            Self::Resolved(blueprint) => Some(blueprint),
            Self::Pending(_) => None,
        }
    }

    /// Swaps the pending identifier for its resolved blueprint. Idempotent:
    /// an already-resolved design is left untouched.
    pub fn resolve_with(&mut self, lookup: impl FnOnce(&str) -> Blueprint) {
        if let Self::Pending(id) = self {
            *self = Self::Resolved(lookup(id));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "blueprint")]
    pub design: ShipDesign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movable {
    #[serde(default)]
    pub url: String,
    pub position: HexCoord,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub trajectory: Vec<HexCoord>,
    #[serde(default)]
    pub destination: Option<HexCoord>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub ship_set: Vec<Ship>,
}

impl Movable {
    /// True once every ship references a resolved blueprint.
    pub fn ships_resolved(&self) -> bool {
        self.ship_set.iter().all(|ship| ship.design.is_resolved())
    }
}
