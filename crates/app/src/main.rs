use dioxus::prelude::*;
use shared_types::{AppConfig, FeatureFlags};

mod auth;
mod capability_gate;
mod components;
mod format_helpers;
mod routes;
mod storage;
mod tasks;

use auth::AuthState;
use routes::Route;

const CONFIG_TOML: &str = include_str!("../../../config.toml");
const THEME: Asset = asset!("/assets/theme.css");

/// Parsed once at startup; compile-time `ODX_API_BASE_URL` wins over the file.
fn load_config() -> AppConfig {
    AppConfig::from_toml_or_default(CONFIG_TOML).with_base_url_override(option_env!("ODX_API_BASE_URL"))
}

fn main() {
    let config = load_config();
    let level = config
        .logging
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    let _ = dioxus::logger::init(level);
    tracing::info!(base_url = %config.api.base_url, "Starting ODX Perícias");

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);
    let flags: FeatureFlags = config.features.clone();
    use_context_provider(|| flags.clone());
    use_context_provider(|| AuthState::new(&config.api.base_url));

    use_effect(move || {
        if flags.service_worker {
            document::eval(&offline::registration_script(offline::SCRIPT_PATH));
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: THEME }
        document::Link { rel: "manifest", href: "/manifest.json" }
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "auth-guard-loading",
                        p { "Carregando..." }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
