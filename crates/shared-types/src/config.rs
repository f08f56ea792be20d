use serde::{Deserialize, Serialize};

/// Local-storage key holding the bearer token. The only key any module
/// reads or writes for the session.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Base URL used when the config file does not name one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Remote API location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Optional client features. Every flag defaults to `false` so that a
/// missing or incomplete config file disables them.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Register the offline-caching service worker.
    #[serde(default)]
    pub service_worker: bool,
    /// Show the "Assinar" action on reports.
    #[serde(default)]
    pub report_signing: bool,
    /// Allow attaching an audio file when generating a report.
    #[serde(default)]
    pub audio_reports: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parse config text, falling back to defaults when it is unparseable.
    pub fn from_toml_or_default(contents: &str) -> Self {
        toml::from_str(contents).unwrap_or_default()
    }

    /// Apply a base-URL override (e.g. from `ODX_API_BASE_URL`). Blank
    /// overrides are ignored; a trailing slash is dropped.
    pub fn with_base_url_override(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api.base_url = url.to_string();
        }
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
        self
    }
}
