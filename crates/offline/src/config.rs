use serde::{Deserialize, Serialize};

pub const CACHE_NAME: &str = "odx-pericias-v1";
pub const SYNC_TAG: &str = "sync-pericias";
pub const SYNC_ENDPOINT: &str = "/api/sync";

/// Static assets stored at install time. Every entry other than the
/// generated index must exist under the app's `public/` directory.
pub const PRECACHE_ASSETS: &[&str] = &["/", "/index.html", "/manifest.json", "/icon.svg"];

/// Service-worker settings shared by the policy and the emitted script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwConfig {
    /// The one cache kept on activation.
    pub cache_name: String,
    pub precache: Vec<String>,
    pub sync_tag: String,
    pub sync_endpoint: String,
}

impl Default for SwConfig {
    fn default() -> Self {
        Self {
            cache_name: CACHE_NAME.to_string(),
            precache: PRECACHE_ASSETS.iter().map(|s| s.to_string()).collect(),
            sync_tag: SYNC_TAG.to_string(),
            sync_endpoint: SYNC_ENDPOINT.to_string(),
        }
    }
}

impl SwConfig {
    /// Cache names kept by `activate`.
    pub fn whitelist(&self) -> [&str; 1] {
        [self.cache_name.as_str()]
    }

    /// Body of the placeholder POST sent on background sync.
    pub fn sync_payload(&self) -> String {
        serde_json::json!({ "sync": true, "tag": self.sync_tag }).to_string()
    }
}
