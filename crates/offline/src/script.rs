//! Browser `sw.js` generation.

use crate::config::SwConfig;

const TEMPLATE: &str = include_str!("sw.template.js");

/// URL the app serves the rendered script from.
pub const SCRIPT_PATH: &str = "/sw.js";

fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Render the service-worker script for `config`.
pub fn render(config: &SwConfig) -> String {
    let precache = serde_json::Value::from(config.precache.clone()).to_string();
    TEMPLATE
        .replace("__CACHE_NAME__", &js_string(&config.cache_name))
        .replace("__PRECACHE__", &precache)
        .replace("__SYNC_TAG__", &js_string(&config.sync_tag))
        .replace("__SYNC_ENDPOINT__", &js_string(&config.sync_endpoint))
        .replace("__SYNC_PAYLOAD__", &js_string(&config.sync_payload()))
}

/// Page-side snippet that registers the worker at `script_path`.
/// Registration failures are reported to the console only.
pub fn registration_script(script_path: &str) -> String {
    format!(
        r#"if ("serviceWorker" in navigator) {{
  navigator.serviceWorker.register({path}).then(
    (reg) => console.info("Service worker registered:", reg.scope),
    (err) => console.warn("Service worker registration failed:", err)
  );
}}"#,
        path = js_string(script_path)
    )
}
