//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key → action)
//! - Page layout measurement and DOM rendering (wasm32 only)

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use input::action_for_key;
