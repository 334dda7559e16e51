use chrono::Utc;
use tracing_subscriber::EnvFilter;

use orrery_client::api::ApiClient;
use orrery_client::blueprints::HttpBlueprintStore;
use orrery_client::config;
use orrery_client::loader::WorldLoader;
use orrery_shared::{HexLayout, format_remaining};

/// Loads a world snapshot once and logs what a renderer would receive. Useful
/// for poking at an API without a browser attached.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let api_url = config::api_url();
    tracing::info!("loading world from {api_url}");

    let api = ApiClient::new(api_url);
    let mut loader = WorldLoader::new(api.clone());
    loader.layout = HexLayout::new(config::field_size());
    let mut blueprints = HttpBlueprintStore::new(api);

    let snapshot = match loader.load(&mut blueprints).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(error = %e, "world load stalled");
            return;
        }
    };

    tracing::info!(
        empire = %snapshot.current_empire.name,
        color = %snapshot.current_empire.color_hex(),
        cells = snapshot.cells.len(),
        sectors = snapshot.index.sectors().count(),
        movables = snapshot.index.movables().count(),
        empires = snapshot.index.empires().len(),
        "world ready"
    );

    match loader.load_status().await {
        Ok((status, clock)) => {
            let remaining = clock.remaining_at(Utc::now());
            tracing::info!(
                tick = status.now,
                version = status.short_sha().unwrap_or("unknown"),
                "next tick in {}",
                format_remaining(remaining)
            );
        }
        Err(e) => {
            tracing::warn!("failed to fetch world status: {e}");
        }
    }
}
