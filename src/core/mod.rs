//! Core utilities shared by every other module.
//!
//! Logging macros live here so they are in scope crate-wide
//! (`#[macro_use]` on this module in lib.rs).

#[macro_use]
pub mod utils;
pub mod vec2;

pub use vec2::Vec2;
