//! Platform abstraction layer
//!
//! Handles browser specifics for:
//! - Input events (tap, click, key press → jump)
//! - Frame timing
//! - Choosing a score store (remote table or LocalStorage)

#[cfg(target_arch = "wasm32")]
pub mod web;
