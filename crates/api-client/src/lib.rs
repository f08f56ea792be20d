//! Client for the ODX Perícias REST API.
//!
//! [`ApiClient`] is the one configured HTTP client; [`Session`] is the one
//! authority over the bearer token and the signed-in user. Endpoint
//! functions live in [`api`], one module per resource.

pub mod api;
pub mod http;
pub mod session;
pub mod token;

pub use http::ApiClient;
pub use session::{Session, SessionState};
pub use token::{MemoryTokenStore, TokenStore};
