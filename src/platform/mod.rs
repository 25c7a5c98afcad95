//! Platform abstraction layer
//!
//! - `keys`: keyboard names to input edges (platform independent)
//! - `web`: wasm-bindgen surface driven by the page's render loop

pub mod keys;
#[cfg(target_arch = "wasm32")]
pub mod web;
