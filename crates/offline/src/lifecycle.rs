use crate::config::SwConfig;
use crate::error::SwError;
use crate::types::{Request, Response};

/// Named caches, as exposed by the browser's `caches` global.
#[allow(async_fn_in_trait)]
pub trait CacheStorage {
    /// Names of every cache that exists.
    async fn keys(&self) -> Vec<String>;
    /// First stored response for `request` across all caches.
    async fn match_request(&self, request: &Request) -> Option<Response>;
    async fn put(&self, cache: &str, request: Request, response: Response);
    /// Store every entry in one step.
    async fn put_all(&self, cache: &str, entries: Vec<(Request, Response)>);
    async fn delete(&self, cache: &str) -> bool;
}

/// Outbound requests.
#[allow(async_fn_in_trait)]
pub trait Network {
    async fn fetch(&self, request: &Request) -> Result<Response, String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parsed,
    Installing,
    Installed,
    Activating,
    Activated,
    Redundant,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Parsed => "parsed",
            Phase::Installing => "installing",
            Phase::Installed => "installed",
            Phase::Activating => "activating",
            Phase::Activated => "activated",
            Phase::Redundant => "redundant",
        }
    }
}

/// Result of a background-sync event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The tag is not ours.
    Ignored,
    Sent,
    /// Logged only; retrying is the browser scheduler's job.
    Failed(String),
}

pub struct ServiceWorker<C, N> {
    config: SwConfig,
    caches: C,
    network: N,
    phase: Phase,
}

impl<C: CacheStorage, N: Network> ServiceWorker<C, N> {
    pub fn new(config: SwConfig, caches: C, network: N) -> Self {
        Self {
            config,
            caches,
            network,
            phase: Phase::Parsed,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SwConfig {
        &self.config
    }

    pub fn caches(&self) -> &C {
        &self.caches
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), SwError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SwError::InvalidPhase {
                expected: expected.as_str(),
                actual: self.phase.as_str(),
            })
        }
    }

    /// Fetch every precache asset, then store them all. One failed asset
    /// abandons the install with nothing stored and the worker redundant.
    pub async fn install(&mut self) -> Result<(), SwError> {
        self.expect_phase(Phase::Parsed)?;
        self.phase = Phase::Installing;

        let mut entries = Vec::with_capacity(self.config.precache.len());
        for url in &self.config.precache {
            let request = Request::get(url.clone());
            let reason = match self.network.fetch(&request).await {
                Ok(response) if response.ok() => {
                    entries.push((request, response));
                    continue;
                }
                Ok(response) => format!("status {}", response.status),
                Err(e) => e,
            };
            tracing::warn!(url = %url, reason = %reason, "Precache failed");
            self.phase = Phase::Redundant;
            return Err(SwError::Precache {
                url: url.clone(),
                reason,
            });
        }

        let count = entries.len();
        self.caches.put_all(&self.config.cache_name, entries).await;
        self.phase = Phase::Installed;
        tracing::info!(cache = %self.config.cache_name, assets = count, "Service worker installed");
        Ok(())
    }

    /// Delete every cache outside the whitelist; returns the deleted names.
    pub async fn activate(&mut self) -> Result<Vec<String>, SwError> {
        self.expect_phase(Phase::Installed)?;
        self.phase = Phase::Activating;

        let whitelist = self.config.whitelist();
        let mut deleted = Vec::new();
        for name in self.caches.keys().await {
            if whitelist.contains(&name.as_str()) {
                continue;
            }
            if self.caches.delete(&name).await {
                tracing::info!(cache = %name, "Deleted stale cache");
                deleted.push(name);
            }
        }

        self.phase = Phase::Activated;
        Ok(deleted)
    }

    /// Cache-first: a stored match wins; otherwise go to the network and keep
    /// a copy of cacheable GET responses.
    pub async fn handle_fetch(&self, request: &Request) -> Result<Response, SwError> {
        if let Some(cached) = self.caches.match_request(request).await {
            tracing::debug!(url = %request.url, "Cache hit");
            return Ok(cached);
        }

        let response = self
            .network
            .fetch(request)
            .await
            .map_err(|reason| SwError::Network {
                url: request.url.clone(),
                reason,
            })?;

        if request.is_get() && response.is_cacheable() {
            self.caches
                .put(&self.config.cache_name, request.clone(), response.clone())
                .await;
        }
        Ok(response)
    }

    /// Best-effort POST of the placeholder payload for our sync tag.
    pub async fn handle_sync(&self, tag: &str) -> SyncOutcome {
        if tag != self.config.sync_tag {
            return SyncOutcome::Ignored;
        }
        let request = Request::post(self.config.sync_endpoint.clone(), self.config.sync_payload());
        match self.network.fetch(&request).await {
            Ok(response) if response.ok() => {
                tracing::info!(tag, "Background sync sent");
                SyncOutcome::Sent
            }
            Ok(response) => {
                let reason = format!("status {}", response.status);
                tracing::warn!(tag, reason = %reason, "Background sync failed");
                SyncOutcome::Failed(reason)
            }
            Err(reason) => {
                tracing::warn!(tag, reason = %reason, "Background sync failed");
                SyncOutcome::Failed(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryCacheStorage, StaticNetwork};
    use crate::types::ResponseKind;
    use pretty_assertions::assert_eq;

    fn network_with_assets(config: &SwConfig) -> StaticNetwork {
        let network = StaticNetwork::new();
        for url in &config.precache {
            network.route(url, Response::basic(200, format!("asset {url}")));
        }
        network
    }

    async fn activated() -> ServiceWorker<MemoryCacheStorage, StaticNetwork> {
        let config = SwConfig::default();
        let network = network_with_assets(&config);
        let mut sw = ServiceWorker::new(config, MemoryCacheStorage::new(), network);
        sw.install().await.unwrap();
        sw.activate().await.unwrap();
        sw
    }

    #[tokio::test]
    async fn install_populates_exactly_the_asset_list() {
        let config = SwConfig::default();
        let network = network_with_assets(&config);
        let mut sw = ServiceWorker::new(config.clone(), MemoryCacheStorage::new(), network);
        sw.install().await.unwrap();
        assert_eq!(sw.phase(), Phase::Installed);
        assert_eq!(sw.caches().urls(&config.cache_name), config.precache);
        assert_eq!(sw.caches().cache_names(), vec![config.cache_name.clone()]);
    }

    #[tokio::test]
    async fn install_fails_atomically() {
        let config = SwConfig::default();
        let network = network_with_assets(&config);
        network.route("/manifest.json", Response::basic(404, ""));
        let mut sw = ServiceWorker::new(config, MemoryCacheStorage::new(), network);
        let err = sw.install().await.unwrap_err();
        assert!(matches!(err, SwError::Precache { ref url, .. } if url == "/manifest.json"));
        assert_eq!(sw.phase(), Phase::Redundant);
        assert!(sw.caches().cache_names().is_empty());
    }

    #[tokio::test]
    async fn activate_with_only_current_cache_deletes_nothing() {
        let sw = activated().await;
        assert_eq!(sw.phase(), Phase::Activated);
        assert_eq!(sw.caches().cache_names(), vec!["odx-pericias-v1".to_string()]);
    }

    #[tokio::test]
    async fn activate_prunes_old_versions() {
        let config = SwConfig::default();
        let caches = MemoryCacheStorage::new();
        caches.put("odx-pericias-v0", Request::get("/old"), Response::basic(200, "")).await;
        caches.put("outro", Request::get("/x"), Response::basic(200, "")).await;
        let mut sw = ServiceWorker::new(config.clone(), caches, network_with_assets(&config));
        sw.install().await.unwrap();
        let mut deleted = sw.activate().await.unwrap();
        deleted.sort();
        assert_eq!(deleted, vec!["odx-pericias-v0".to_string(), "outro".to_string()]);
        assert_eq!(sw.caches().cache_names(), vec![config.cache_name]);
    }

    #[tokio::test]
    async fn activate_before_install_is_rejected() {
        let mut sw = ServiceWorker::new(
            SwConfig::default(),
            MemoryCacheStorage::new(),
            StaticNetwork::new(),
        );
        assert!(matches!(
            sw.activate().await,
            Err(SwError::InvalidPhase { expected: "installed", .. })
        ));
    }

    #[tokio::test]
    async fn miss_goes_to_network_and_stores_basic_200() {
        let sw = activated().await;
        sw.network().route("/casos", Response::basic(200, "pagina"));
        let request = Request::get("/casos");

        let response = sw.handle_fetch(&request).await.unwrap();
        assert_eq!(response.body, b"pagina".to_vec());
        assert_eq!(sw.network().calls_to("/casos"), 1);
        assert!(sw.caches().urls("odx-pericias-v1").contains(&"/casos".to_string()));

        let again = sw.handle_fetch(&request).await.unwrap();
        assert_eq!(again, response);
        assert_eq!(sw.network().calls_to("/casos"), 1);
    }

    #[tokio::test]
    async fn non_basic_or_non_200_is_not_stored() {
        let sw = activated().await;
        sw.network().route(
            "https://cdn.test/x.js",
            Response {
                status: 200,
                kind: ResponseKind::Cors,
                body: vec![],
            },
        );
        sw.network().route("/ausente", Response::basic(404, ""));
        sw.handle_fetch(&Request::get("https://cdn.test/x.js")).await.unwrap();
        sw.handle_fetch(&Request::get("/ausente")).await.unwrap();
        let urls = sw.caches().urls("odx-pericias-v1");
        assert!(!urls.contains(&"https://cdn.test/x.js".to_string()));
        assert!(!urls.contains(&"/ausente".to_string()));
    }

    #[tokio::test]
    async fn post_is_never_stored() {
        let sw = activated().await;
        sw.network().route("/api/cases", Response::basic(200, "{}"));
        sw.handle_fetch(&Request::post("/api/cases", "{}")).await.unwrap();
        assert!(!sw.caches().urls("odx-pericias-v1").contains(&"/api/cases".to_string()));
    }

    #[tokio::test]
    async fn network_failure_surfaces() {
        let sw = activated().await;
        let err = sw.handle_fetch(&Request::get("/offline")).await.unwrap_err();
        assert!(matches!(err, SwError::Network { .. }));
    }

    #[tokio::test]
    async fn sync_posts_once_and_never_retries() {
        let sw = activated().await;
        assert_eq!(sw.handle_sync("outra-tag").await, SyncOutcome::Ignored);
        assert_eq!(sw.network().calls_to("/api/sync"), 0);

        let outcome = sw.handle_sync("sync-pericias").await;
        assert!(matches!(outcome, SyncOutcome::Failed(_)));
        assert_eq!(sw.network().calls_to("/api/sync"), 1);

        sw.network().route("/api/sync", Response::basic(200, ""));
        assert_eq!(sw.handle_sync("sync-pericias").await, SyncOutcome::Sent);
        assert_eq!(sw.network().calls_to("/api/sync"), 2);
        let body = sw.network().last_body("/api/sync").unwrap();
        assert!(body.contains("sync-pericias"));
    }
}
