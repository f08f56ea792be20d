//! Offline-caching service worker.
//!
//! [`ServiceWorker`] holds the caching policy over two seams,
//! [`CacheStorage`] and [`Network`], so it runs the same against the
//! in-memory implementations in [`memory`] as against a browser.
//! [`script::render`] emits the browser `sw.js` from the same [`SwConfig`].

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod memory;
pub mod script;
pub mod types;

pub use config::SwConfig;
pub use script::{registration_script, SCRIPT_PATH};
pub use error::SwError;
pub use lifecycle::{CacheStorage, Network, Phase, ServiceWorker, SyncOutcome};
pub use types::{Request, Response, ResponseKind};
