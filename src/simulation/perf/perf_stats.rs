use wasm_bindgen::prelude::*;

use crate::systems::ConstraintStats;

/// Snapshot of the last detection pass and the constraint table
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhysicsStats {
    pub(super) body_count: u32,
    pub(super) occupied_cells: u32,
    pub(super) candidate_pairs: u32,
    pub(super) collisions: u32,
    pub(super) broad_ms: f64,
    pub(super) narrow_ms: f64,
    pub(super) response_ms: f64,
    pub(super) constraints_ms: f64,

    pub(super) constraint_count: u32,
    pub(super) active_constraints: u32,
    pub(super) broken_constraints: u32,
    pub(super) total_energy: f32,
}

impl PhysicsStats {
    pub(crate) fn reset_detection(&mut self) {
        self.body_count = 0;
        self.occupied_cells = 0;
        self.candidate_pairs = 0;
        self.collisions = 0;
        self.broad_ms = 0.0;
        self.narrow_ms = 0.0;
        self.response_ms = 0.0;
    }

    pub(crate) fn set_constraints(&mut self, stats: ConstraintStats) {
        self.constraint_count = stats.total;
        self.active_constraints = stats.active;
        self.broken_constraints = stats.broken;
        self.total_energy = stats.total_energy;
    }
}

#[wasm_bindgen]
impl PhysicsStats {
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn occupied_cells(&self) -> u32 { self.occupied_cells }
    #[wasm_bindgen(getter)]
    pub fn candidate_pairs(&self) -> u32 { self.candidate_pairs }
    #[wasm_bindgen(getter)]
    pub fn collisions(&self) -> u32 { self.collisions }
    #[wasm_bindgen(getter)]
    pub fn broad_ms(&self) -> f64 { self.broad_ms }
    #[wasm_bindgen(getter)]
    pub fn narrow_ms(&self) -> f64 { self.narrow_ms }
    #[wasm_bindgen(getter)]
    pub fn response_ms(&self) -> f64 { self.response_ms }
    #[wasm_bindgen(getter)]
    pub fn constraints_ms(&self) -> f64 { self.constraints_ms }
    #[wasm_bindgen(getter)]
    pub fn constraint_count(&self) -> u32 { self.constraint_count }
    #[wasm_bindgen(getter)]
    pub fn active_constraints(&self) -> u32 { self.active_constraints }
    #[wasm_bindgen(getter)]
    pub fn broken_constraints(&self) -> u32 { self.broken_constraints }
    #[wasm_bindgen(getter)]
    pub fn total_energy(&self) -> f32 { self.total_energy }
    /// Broad + narrow + response + constraint time of the last step
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 {
        self.broad_ms + self.narrow_ms + self.response_ms + self.constraints_ms
    }
}
