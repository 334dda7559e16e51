use std::collections::HashMap;

use chrono::Utc;
use futures::try_join;
use tracing::{info, warn};

use orrery_shared::{
    Empire, HexCoord, HexLayout, Sector, TickClock, WorldStatus, star_displacement,
};

use crate::api::ApiClient;
use crate::blueprints::BlueprintResolver;
use crate::cell::HexCell;
use crate::icons::{self, IconStyle};
use crate::index::EntityIndex;
use crate::naming;

/// Relative ordering of blueprint resolution and map-cell loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadSequence {
    /// Resolve and substitute blueprints before any map cell is fetched.
    BlueprintsFirst,
    /// Fetch map cells while blueprints resolve; readiness still waits for
    /// both.
    #[default]
    Interleaved,
}

/// Everything a renderer needs for one consistent pass: the player's empire,
/// the coordinate-keyed index, and the materialized cells.
#[derive(Debug)]
pub struct WorldSnapshot {
    pub current_empire: Empire,
    pub index: EntityIndex,
    pub cells: HashMap<HexCoord, HexCell>,
    pub layout: HexLayout,
}

/// Runs the fixed load protocol against the REST API and produces a
/// [`WorldSnapshot`].
///
/// The dependency order is load-bearing: the user names the empire, the
/// empire's URL scopes blueprint requirements, the empire's origin names the
/// unveiled cells, and sectors override cells that must already exist. Any
/// fetch failure aborts the load with an error; the caller sees a stalled
/// load, never a half-ready map.
pub struct WorldLoader {
    pub api: ApiClient,
    pub layout: HexLayout,
    pub sequence: LoadSequence,
    pub icon_style: IconStyle,
}

impl WorldLoader {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            layout: HexLayout::default(),
            sequence: LoadSequence::default(),
            icon_style: IconStyle::default(),
        }
    }

    pub async fn load<R: BlueprintResolver>(
        &self,
        blueprints: &mut R,
    ) -> Result<WorldSnapshot, String> {
        // The current user, then the empire its payload points at.
        let users = self.api.fetch_users().await?;
        let user = users.first().ok_or_else(|| "user list is empty".to_string())?;
        let empire_url = user
            .empire
            .as_deref()
            .ok_or_else(|| "current user has no empire".to_string())?;
        let mut current_empire = Empire::from(self.api.fetch_empire(empire_url).await?);

        // Movables and discovered empires, in parallel.
        let (movable_list, empire_records) =
            try_join!(self.api.fetch_movables(), self.api.fetch_empires())?;

        // Index movables; ships of the player's own movables register their
        // blueprint needs with the resolver.
        let mut index = EntityIndex::new();
        for movable in movable_list {
            if movable.owner.as_deref() == Some(current_empire.url.as_str()) {
                for ship in &movable.ship_set {
                    blueprints.require(ship.design.blueprint_url());
                }
            }
            index.index_movable(movable);
        }

        // Empires: compute colors and territory sets; the player's own entry
        // carries the authoritative color.
        for record in empire_records {
            let empire = Empire::from(record);
            if empire.url == current_empire.url {
                current_empire.color = empire.color;
            }
            index.add_empire(empire);
        }

        // Blueprint barrier and the map-cell chain.
        let (cells, sectors) = match self.sequence {
            LoadSequence::BlueprintsFirst => {
                blueprints.resolve().await?;
                substitute_blueprints(&mut index, &current_empire.url, blueprints);
                self.load_cells(&current_empire).await?
            }
            LoadSequence::Interleaved => {
                let (resolution, cells) =
                    futures::join!(blueprints.resolve(), self.load_cells(&current_empire));
                resolution?;
                substitute_blueprints(&mut index, &current_empire.url, blueprints);
                cells?
            }
        };

        for sector in sectors {
            index.index_sector(sector);
        }

        info!(
            empire = %current_empire.name,
            cells = cells.len(),
            empires = index.empires().len(),
            "world snapshot ready"
        );
        Ok(WorldSnapshot {
            current_empire,
            index,
            cells,
            layout: self.layout,
        })
    }

    /// Unveiled cells with directional names, then the sector overrides.
    async fn load_cells(
        &self,
        current_empire: &Empire,
    ) -> Result<(HashMap<HexCoord, HexCell>, Vec<Sector>), String> {
        let unveiled = self.api.fetch_unveiled().await?;
        let mut cells = HashMap::with_capacity(unveiled.len());
        for record in unveiled {
            let coord = record.position;
            let name = naming::directional_name(current_empire.origin, coord);
            cells.insert(coord, HexCell::unveiled(coord, name));
        }

        let sectors = self.api.fetch_sectors().await?;
        for sector in &sectors {
            let Some(cell) = cells.get_mut(&sector.position) else {
                warn!(
                    "sector {} at undiscovered cell {}; skipped",
                    sector.url,
                    sector.position.key()
                );
                continue;
            };
            cell.name = sector.name.clone();
            cell.sector_url = Some(sector.url.clone());
            cell.habitated_by = sector
                .habitated_celestial()
                .and_then(|celestial| celestial.habitated_by.clone());
            cell.star = sector
                .primary_variant()
                .and_then(|variant| icons::star_icon(self.icon_style, variant));
            cell.star_offset = Some(star_displacement(&sector.url, self.layout.field_size));
        }

        Ok((cells, sectors))
    }

    /// Tick status, fetched independently of the map load.
    pub async fn load_status(&self) -> Result<(WorldStatus, TickClock), String> {
        let worlds = self.api.fetch_worlds().await?;
        let status = worlds
            .into_iter()
            .next()
            .ok_or_else(|| "world list is empty".to_string())?;
        let clock = TickClock::start(&status, Utc::now());
        Ok((status, clock))
    }
}

/// Swaps pending blueprint identifiers for resolved blueprints on every ship
/// of the player's movables. Foreign movables keep their identifiers: their
/// blueprints were never required, so each movable stays uniformly pending or
/// uniformly resolved.
fn substitute_blueprints<R: BlueprintResolver>(
    index: &mut EntityIndex,
    owner_url: &str,
    blueprints: &R,
) {
    for movable in index.movables_mut() {
        if movable.owner.as_deref() != Some(owner_url) {
            continue;
        }
        for ship in &mut movable.ship_set {
            ship.design.resolve_with(|id| blueprints.get(id).clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::{MethodRouter, get};
    use serde_json::{Value, json};

    use orrery_shared::{HexCoord, ShipDesign, empire_color, star_displacement};

    use crate::api::ApiClient;
    use crate::blueprints::HttpBlueprintStore;
    use crate::icons::StarIcon;

    use super::{LoadSequence, WorldLoader};

    fn json_route(value: Value) -> MethodRouter {
        get(move || {
            let value = value.clone();
            async move { Json(value) }
        })
    }

    /// Binds first so the fixture can embed absolute URLs, then serves.
    async fn spawn_world_api(build: impl FnOnce(&str) -> Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        let base = format!("http://{addr}");
        let router = build(&base);
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve test api");
        });
        base
    }

    /// The reference world: empire at the origin, three unveiled cells, one
    /// sector named Sol, one friendly and one foreign fleet.
    fn fixture_router(base: &str) -> Router {
        let empire_url = format!("{base}/empires/1");
        let rival_url = format!("{base}/empires/2");
        let empire = json!({
            "url": empire_url,
            "name": "Taurus Reach",
            "color_hue": 120.0,
            "origin": [0, 0],
            "territory": [[0, 0], [1, 0]]
        });
        let rival = json!({
            "url": rival_url,
            "name": "Void Compact",
            "color_hue": 300.0,
            "origin": [5, 5],
            "territory": [[0, 0]]
        });

        Router::new()
            .route("/users", json_route(json!([{ "username": "player", "empire": empire_url }])))
            .route("/empires/1", json_route(empire.clone()))
            .route("/empires", json_route(json!([empire, rival])))
            .route(
                "/movables",
                json_route(json!([
                    {
                        "url": format!("{base}/movables/1"),
                        "position": [0, 0],
                        "owner": empire_url,
                        "name": "Pathfinder",
                        "trajectory": [[1, 0], [1, 1]],
                        "ship_set": [
                            {"blueprint": format!("{base}/blueprints/1")},
                            {"blueprint": format!("{base}/blueprints/1")}
                        ]
                    },
                    {
                        "url": format!("{base}/movables/2"),
                        "position": [1, 0],
                        "owner": rival_url,
                        "name": "Raider",
                        "trajectory": [],
                        "ship_set": [{"blueprint": format!("{base}/blueprints/77")}]
                    }
                ])),
            )
            .route(
                "/unveiled",
                json_route(json!([
                    {"position": [0, 0]},
                    {"position": [1, 0]},
                    {"position": [0, -1]}
                ])),
            )
            .route(
                "/sectors",
                json_route(json!([{
                    "url": format!("{base}/sectors/1"),
                    "position": [1, 0],
                    "name": "Sol",
                    "celestial_set": [{
                        "url": format!("{base}/celestials/1"),
                        "position": 0,
                        "features": {"variant": "yellow-mainline"},
                        "habitated_by": empire_url
                    }]
                }])),
            )
            .route(
                "/blueprints",
                json_route(json!([{
                    "url": format!("{base}/blueprints/1"),
                    "base_id": "ships/colony",
                    "data": {"name": "Colony Ship", "cost": 250, "size": 2, "speed": 0.5}
                }])),
            )
            .route(
                "/worlds",
                json_route(json!([{
                    "url": format!("{base}/worlds/1"),
                    "now": 42,
                    "remaining_seconds": 90.0,
                    "version": {"sha": "0123456789abcdef", "date": "2026-02-26"}
                }])),
            )
    }

    async fn load_fixture(sequence: LoadSequence) -> super::WorldSnapshot {
        let base = spawn_world_api(fixture_router).await;
        let api = ApiClient::new(base);
        let mut loader = WorldLoader::new(api.clone());
        loader.sequence = sequence;
        let mut blueprints = HttpBlueprintStore::new(api);
        loader
            .load(&mut blueprints)
            .await
            .expect("fixture world should load")
    }

    #[tokio::test]
    async fn end_to_end_names_and_sector_overrides() {
        let snapshot = load_fixture(LoadSequence::Interleaved).await;

        assert_eq!(snapshot.cells.len(), 3);
        assert_eq!(snapshot.cells[&HexCoord::new(0, 0)].name, "0/0");
        assert_eq!(snapshot.cells[&HexCoord::new(0, -1)].name, "0/N1");

        let sol = &snapshot.cells[&HexCoord::new(1, 0)];
        assert_eq!(sol.name, "Sol");
        assert!(sol.is_sector());
        assert_eq!(
            sol.habitated_by.as_deref(),
            Some(snapshot.current_empire.url.as_str())
        );
        assert_eq!(
            sol.star,
            Some(StarIcon::Asset(
                "/icons/stars/yellow-mainline.svg".to_string()
            ))
        );
        let sector_url = sol.sector_url.as_deref().expect("sector url");
        assert_eq!(sol.star_offset, Some(star_displacement(sector_url, 200.0)));

        let sector = snapshot
            .index
            .sector_at(HexCoord::new(1, 0))
            .expect("sector should be indexed");
        assert_eq!(sector.name, "Sol");
    }

    #[tokio::test]
    async fn player_ships_resolve_and_foreign_ships_stay_pending() {
        let snapshot = load_fixture(LoadSequence::Interleaved).await;

        let fleet = &snapshot.index.movables_at(HexCoord::new(0, 0))[0];
        assert!(fleet.ships_resolved());
        for ship in &fleet.ship_set {
            assert_eq!(
                ship.design.blueprint().expect("resolved").data.name,
                "Colony Ship"
            );
        }

        let raider = &snapshot.index.movables_at(HexCoord::new(1, 0))[0];
        assert!(!raider.ships_resolved());
        assert!(matches!(raider.ship_set[0].design, ShipDesign::Pending(_)));
    }

    #[tokio::test]
    async fn both_sequences_produce_the_same_world() {
        let first = load_fixture(LoadSequence::BlueprintsFirst).await;
        let interleaved = load_fixture(LoadSequence::Interleaved).await;

        let names = |snapshot: &super::WorldSnapshot| {
            let mut names: Vec<_> = snapshot
                .cells
                .values()
                .map(|cell| cell.name.clone())
                .collect();
            names.sort();
            names
        };
        assert_eq!(names(&first), names(&interleaved));
        assert_eq!(first.current_empire.color, interleaved.current_empire.color);
        assert!(
            first.index.movables_at(HexCoord::new(0, 0))[0].ships_resolved()
        );
        assert!(
            interleaved.index.movables_at(HexCoord::new(0, 0))[0].ships_resolved()
        );
    }

    #[tokio::test]
    async fn current_empire_adopts_the_computed_color() {
        let snapshot = load_fixture(LoadSequence::Interleaved).await;
        assert_eq!(snapshot.current_empire.color, empire_color(120.0));

        let owners = snapshot.index.owners_of(HexCoord::new(0, 0));
        assert_eq!(owners.len(), 2, "origin is claimed by both empires");
    }

    #[tokio::test]
    async fn fetch_failure_stalls_the_load() {
        let base = spawn_world_api(fixture_router).await;

        // A loader pointed at a wrong base path fails its very first fetch.
        let api = ApiClient::new(format!("{base}/missing"));
        let loader = WorldLoader::new(api.clone());
        let mut blueprints = HttpBlueprintStore::new(api);

        let err = loader
            .load(&mut blueprints)
            .await
            .expect_err("dead endpoint must stall the load");
        assert!(err.contains("/users"), "missing context in: {err}");
    }

    #[tokio::test]
    async fn late_fetch_failure_also_stalls_the_load() {
        let base = spawn_world_api(|base| {
            let empire_url = format!("{base}/empires/1");
            let empire = json!({
                "url": empire_url,
                "name": "Taurus Reach",
                "color_hue": 120.0,
                "origin": [0, 0],
                "territory": []
            });
            Router::new()
                .route("/users", json_route(json!([{ "empire": empire_url }])))
                .route("/empires/1", json_route(empire.clone()))
                .route("/empires", json_route(json!([empire])))
                .route("/movables", json_route(json!([])))
                .route("/unveiled", json_route(json!([])))
                .route(
                    "/sectors",
                    get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "tick in progress") }),
                )
                .route("/blueprints", json_route(json!([])))
        })
        .await;

        let api = ApiClient::new(base);
        let loader = WorldLoader::new(api.clone());
        let mut blueprints = HttpBlueprintStore::new(api);

        let err = loader
            .load(&mut blueprints)
            .await
            .expect_err("sector failure must stall the load");
        assert!(err.contains("/sectors"), "missing context in: {err}");
    }

    #[tokio::test]
    async fn unknown_star_variant_degrades_to_no_icon() {
        let base = spawn_world_api(|base| {
            let empire_url = format!("{base}/empires/1");
            let empire = json!({
                "url": empire_url,
                "name": "Taurus Reach",
                "color_hue": 120.0,
                "origin": [0, 0],
                "territory": []
            });
            Router::new()
                .route("/users", json_route(json!([{ "empire": empire_url }])))
                .route("/empires/1", json_route(empire.clone()))
                .route("/empires", json_route(json!([empire])))
                .route("/movables", json_route(json!([])))
                .route("/unveiled", json_route(json!([{"position": [2, 2]}])))
                .route(
                    "/sectors",
                    json_route(json!([{
                        "url": format!("{base}/sectors/9"),
                        "position": [2, 2],
                        "name": "Umbra",
                        "celestial_set": [{
                            "position": 0,
                            "features": {"variant": "purple-pulsar"}
                        }]
                    }])),
                )
                .route("/blueprints", json_route(json!([])))
        })
        .await;

        let api = ApiClient::new(base);
        let loader = WorldLoader::new(api.clone());
        let mut blueprints = HttpBlueprintStore::new(api);
        let snapshot = loader
            .load(&mut blueprints)
            .await
            .expect("unknown variants must not fail the load");

        let umbra = &snapshot.cells[&HexCoord::new(2, 2)];
        assert_eq!(umbra.name, "Umbra");
        assert_eq!(umbra.star, None);
    }

    #[tokio::test]
    async fn status_load_is_independent_of_the_map() {
        let base = spawn_world_api(fixture_router).await;
        let loader = WorldLoader::new(ApiClient::new(base));

        let (status, clock) = loader.load_status().await.expect("status should load");
        assert_eq!(status.now, 42);
        assert_eq!(status.short_sha(), Some("0123456"));
        assert!(clock.remaining_at(chrono::Utc::now()) <= 90);
    }
}
