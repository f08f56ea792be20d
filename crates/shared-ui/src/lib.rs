//! Component kit for the ODX Perícias client. Each component lives in its
//! own directory with a co-located `style.css`.

pub mod components;

pub use components::*;
