//! CollisionWorld - detection, response and constraints for one body set
//!
//! The world never owns bodies. Every call borrows the caller's slice, so an
//! external integrator stays the single source of truth for body state.
//!
//! Per step:
//! - rebuild the spatial hash and collect candidate pairs
//! - narrow phase on each pair (distance cutoff first)
//! - impulse response in pair order
//! - constraint pass

pub mod config;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/detect.rs"]
mod detect;
#[path = "step/step.rs"]
mod step;
mod facade;

pub use config::{CollisionConfig, CollisionConfigPatch, ResponseConfigPatch};
pub use facade::PhysicsWorld;
pub use perf_stats::PhysicsStats;
pub use step::StepReport;

use crate::domain::{Body, BodyId, CollisionEvent, Constraint, ConstraintConfig, ConstraintId, ConstraintState};
use crate::spatial::SpatialHashGrid;
use crate::systems::{render_constraints, BreakCallback, ConstraintSolver, DrawSurface, ResponseConfig};

pub struct CollisionWorld {
    config: CollisionConfig,
    grid: SpatialHashGrid,
    constraints: ConstraintSolver,
    stats: PhysicsStats,
}

impl CollisionWorld {
    pub fn new() -> Self {
        init::create_world(CollisionConfig::default())
    }

    pub fn with_config(config: CollisionConfig) -> Self {
        init::create_world(config)
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Merge a partial config; values are not validated
    pub fn update_config(&mut self, patch: CollisionConfigPatch) {
        settings::update_config(self, patch);
    }

    pub fn update_config_json(&mut self, json: &str) -> Result<(), String> {
        settings::update_config_json(self, json)
    }

    pub fn config_json(&self) -> String {
        settings::config_json(self)
    }

    pub fn reset_config(&mut self) {
        settings::reset_config(self);
    }

    /// Last detection numbers plus the current constraint table
    pub fn stats(&self) -> PhysicsStats {
        settings::get_stats(self)
    }

    // === COLLISIONS ===

    /// Detect every overlapping pair without touching the bodies.
    ///
    /// Events carry `impulse == 0`.
    pub fn detect_all_collisions(&mut self, bodies: &[Body]) -> Vec<CollisionEvent> {
        detect::detect_all_collisions(self, bodies)
    }

    /// Detect and resolve with the configured response
    pub fn update(&mut self, bodies: &mut [Body]) -> Vec<CollisionEvent> {
        let response = self.config.effective_response();
        detect::update(self, bodies, &response)
    }

    /// Detect and resolve with a one-off response config
    pub fn update_with(&mut self, bodies: &mut [Body], response: &ResponseConfig) -> Vec<CollisionEvent> {
        detect::update(self, bodies, response)
    }

    /// `update` followed by `update_constraints`
    pub fn step(&mut self, bodies: &mut [Body], dt: Option<f32>) -> StepReport {
        step::step(self, bodies, dt)
    }

    // === CONSTRAINTS ===

    pub fn create_constraint(&mut self, config: ConstraintConfig, bodies: &[Body]) -> Option<ConstraintId> {
        self.constraints.create_constraint(config, bodies)
    }

    /// Parse a constraint description and create it.
    ///
    /// `Ok(None)` when a referenced body is missing.
    pub fn create_constraint_json(&mut self, json: &str, bodies: &[Body]) -> Result<Option<ConstraintId>, String> {
        let config: ConstraintConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Ok(self.constraints.create_constraint(config, bodies))
    }

    pub fn remove_constraint(&mut self, id: ConstraintId) -> bool {
        self.constraints.remove_constraint(id)
    }

    /// Drop constraints attached to a body that is going away
    pub fn remove_body_constraints(&mut self, body: BodyId) -> usize {
        self.constraints.remove_constraints_for_body(body)
    }

    pub fn clear_constraints(&mut self) {
        self.constraints.clear();
    }

    pub fn get_constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get_constraint(id)
    }

    pub fn get_constraint_state(&self, id: ConstraintId) -> Option<ConstraintState> {
        self.constraints.get_constraint_state(id)
    }

    pub fn constraints(&self) -> &[Constraint] {
        self.constraints.constraints()
    }

    pub fn set_break_callback(&mut self, callback: Option<BreakCallback>) {
        self.constraints.set_break_callback(callback);
    }

    /// One constraint pass; `dt` defaults to the configured time step.
    ///
    /// Returns the ids that broke during this pass.
    pub fn update_constraints(&mut self, bodies: &mut [Body], dt: Option<f32>) -> Vec<ConstraintId> {
        let dt = dt.unwrap_or(self.config.time_step);
        detect::update_constraints(self, bodies, dt)
    }

    // === DEBUG RENDER ===

    pub fn render<S: DrawSurface + ?Sized>(&self, bodies: &[Body], surface: &mut S) {
        render_constraints(self.constraints.constraints(), bodies, surface);
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
