use std::collections::{HashMap, HashSet};

use tracing::info;

use orrery_shared::Blueprint;

use crate::api::ApiClient;

/// Consumed contract of the blueprint cache: register every blueprint the
/// load needs, resolve once, then read.
pub trait BlueprintResolver {
    /// Registers a blueprint as needed. Idempotent; repeated registration of
    /// the same id causes no extra resolution work.
    fn require(&mut self, id: &str);

    /// Batch-resolves every required blueprint. This is the barrier the
    /// loader awaits; calling it again after completion is a no-op.
    async fn resolve(&mut self) -> Result<(), String>;

    /// Whether [`BlueprintResolver::resolve`] has completed.
    fn is_resolved(&self) -> bool;

    /// A required blueprint, after resolution.
    ///
    /// # Panics
    ///
    /// Panics when called before `resolve` completed, or for an id that was
    /// never required. Both are caller bugs, not runtime conditions.
    fn get(&self, id: &str) -> &Blueprint;
}

/// Blueprint cache backed by the game's REST API. One `GET /blueprints`
/// round-trip serves every requirement of the load.
pub struct HttpBlueprintStore {
    api: ApiClient,
    required: HashSet<String>,
    resolved: Option<HashMap<String, Blueprint>>,
}

impl HttpBlueprintStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            required: HashSet::new(),
            resolved: None,
        }
    }

    pub fn requirements(&self) -> &HashSet<String> {
        &self.required
    }
}

impl BlueprintResolver for HttpBlueprintStore {
    fn require(&mut self, id: &str) {
        self.required.insert(id.to_string());
    }

    async fn resolve(&mut self) -> Result<(), String> {
        if self.resolved.is_some() {
            return Ok(());
        }

        let catalog = self.api.fetch_blueprints().await?;
        let mut resolved = HashMap::new();
        for blueprint in catalog {
            if self.required.contains(&blueprint.url) {
                resolved.insert(blueprint.url.clone(), blueprint);
            }
        }

        let missing = self
            .required
            .iter()
            .filter(|id| !resolved.contains_key(*id))
            .cloned()
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(format!("blueprints missing from the catalog: {missing:?}"));
        }

        info!("resolved {} blueprints", resolved.len());
        self.resolved = Some(resolved);
        Ok(())
    }

    fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    fn get(&self, id: &str) -> &Blueprint {
        let resolved = self
            .resolved
            .as_ref()
            .expect("blueprint store read before resolve() completed");
        resolved
            .get(id)
            .unwrap_or_else(|| panic!("blueprint {id} was never required"))
    }
}
