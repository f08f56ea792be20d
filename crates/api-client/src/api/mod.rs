//! Endpoint functions, one module per REST resource.

pub mod auth;
pub mod cases;
pub mod dashboard;
pub mod evidence;
pub mod laudos;
pub mod reports;
pub mod users;
pub mod victims;
