pub mod api;
pub mod blueprints;
pub mod cell;
pub mod config;
pub mod events;
pub mod icons;
pub mod index;
pub mod loader;
pub mod naming;
pub mod trajectory;

pub use api::ApiClient;
pub use blueprints::{BlueprintResolver, HttpBlueprintStore};
pub use cell::HexCell;
pub use events::MapEvents;
pub use icons::{IconStyle, StarIcon};
pub use index::EntityIndex;
pub use loader::{LoadSequence, WorldLoader, WorldSnapshot};
pub use trajectory::{TrajectoryView, project};
