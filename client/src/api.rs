use serde::Deserialize;
use serde::de::DeserializeOwned;

use orrery_shared::{Blueprint, EmpireRecord, HexCoord, Movable, Sector, WorldStatus};

use crate::config;

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub username: Option<String>,
    /// URL of the user's empire; absent for spectators.
    #[serde(default)]
    pub empire: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnveiledRecord {
    pub position: HexCoord,
}

/// Read-only client for the game's REST API.
///
/// Every accessor is a single GET returning decoded JSON; transport and
/// decode failures share one error channel and carry the request URL plus a
/// body preview where there is one.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let request_timeout = config::http_timeout();
        let connect_timeout = config::connect_timeout();
        let http = reqwest::Client::builder()
            .user_agent(config::USER_AGENT)
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|e| {
                panic!("failed to build timeout-configured HTTP client: {e}");
            });
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_users(&self) -> Result<Vec<UserRecord>, String> {
        self.get_json(&format!("{}/users", self.base_url)).await
    }

    /// The empire URL comes embedded in a user payload, so this takes the
    /// absolute URL rather than a path.
    pub async fn fetch_empire(&self, empire_url: &str) -> Result<EmpireRecord, String> {
        self.get_json(empire_url).await
    }

    pub async fn fetch_empires(&self) -> Result<Vec<EmpireRecord>, String> {
        self.get_json(&format!("{}/empires", self.base_url)).await
    }

    pub async fn fetch_movables(&self) -> Result<Vec<Movable>, String> {
        self.get_json(&format!("{}/movables?depth=1", self.base_url))
            .await
    }

    pub async fn fetch_unveiled(&self) -> Result<Vec<UnveiledRecord>, String> {
        self.get_json(&format!("{}/unveiled", self.base_url)).await
    }

    pub async fn fetch_sectors(&self) -> Result<Vec<Sector>, String> {
        self.get_json(&format!("{}/sectors?depth=1", self.base_url))
            .await
    }

    pub async fn fetch_worlds(&self) -> Result<Vec<WorldStatus>, String> {
        self.get_json(&format!("{}/worlds", self.base_url)).await
    }

    pub async fn fetch_blueprints(&self) -> Result<Vec<Blueprint>, String> {
        self.get_json(&format!("{}/blueprints", self.base_url))
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| format!("request to {url} failed: {e}"))?;
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| format!("failed to read response from {url}: {e}"))?;

        if !status.is_success() {
            let preview = String::from_utf8_lossy(&bytes)
                .chars()
                .take(200)
                .collect::<String>();
            return Err(format!(
                "{url} returned status {status}; body preview: {preview}"
            ));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| format!("failed to decode response from {url}: {e}"))
    }
}
