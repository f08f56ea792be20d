//! Domain records, policy and form models shared by the ODX Perícias crates.

pub mod case;
pub mod common;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod evidence;
pub mod laudo;
pub mod listing;
pub mod report;
pub mod role;
pub mod user;
pub mod victim;
pub mod wizard;

pub use case::*;
pub use common::*;
pub use config::*;
pub use dashboard::*;
pub use error::*;
pub use evidence::*;
pub use laudo::*;
pub use listing::*;
pub use report::*;
pub use role::*;
pub use user::*;
pub use victim::*;
pub use wizard::*;
