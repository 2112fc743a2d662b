//! Motion Physics - 2D collision detection, response and constraints in WASM
//!
//! Architecture:
//! - core/        - Vec2 math and logging macros
//! - domain/      - Bodies, materials, constraints, collision results
//! - spatial/     - AABBs and the broad-phase hash grid
//! - systems/     - Narrow phase, impulse response, constraint solver, debug render
//! - simulation/  - CollisionWorld orchestration and the JS facade

// Logging macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    log_info!("Motion physics {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::Vec2;
pub use domain::{
    Body, BodyId, BodyStore, CollisionEvent, CollisionKind, CollisionResult, Constraint, ConstraintConfig,
    ConstraintId, ConstraintKind, ConstraintState, ConstraintStatus, Material, Shape,
};
pub use simulation::{CollisionConfig, CollisionConfigPatch, CollisionWorld, PhysicsStats, PhysicsWorld, StepReport};
pub use spatial::{Aabb, SpatialHashGrid};
pub use systems::{detect, resolve_collision, ConstraintSolver, DrawSurface, ResponseConfig};
