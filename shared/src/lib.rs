pub mod colors;
pub mod coords;
pub mod empire;
pub mod hex;
pub mod movable;
pub mod sector;
pub mod world;

pub use colors::empire_color;
pub use coords::HexCoord;
pub use empire::{Empire, EmpireRecord};
pub use hex::{DEFAULT_FIELD_SIZE, HEX_SCALE, HexLayout};
pub use movable::{Blueprint, BlueprintData, Movable, Ship, ShipDesign};
pub use sector::{
    Celestial, CelestialFeatures, Sector, StarVariant, celestial_name, star_displacement,
};
pub use world::{TickClock, WorldStatus, WorldVersion, format_remaining};
