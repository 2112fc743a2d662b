use super::config::{CollisionConfig, CollisionConfigPatch};
use super::perf_stats::PhysicsStats;
use super::CollisionWorld;

/// Merge the patch and push derived values into the grid and solver
pub(super) fn update_config(world: &mut CollisionWorld, patch: CollisionConfigPatch) {
    world.config.merge(patch);
    world.grid.set_cell_size(world.config.cell_size);
    world.constraints.set_defaults(world.config.constraint_defaults);
}

pub(super) fn update_config_json(world: &mut CollisionWorld, json: &str) -> Result<(), String> {
    let patch = CollisionConfigPatch::from_json(json)?;
    update_config(world, patch);
    Ok(())
}

pub(super) fn config_json(world: &CollisionWorld) -> String {
    serde_json::to_string(&world.config).unwrap_or_else(|_| "{}".to_string())
}

pub(super) fn reset_config(world: &mut CollisionWorld) {
    world.config = CollisionConfig::default();
    world.grid.set_cell_size(world.config.cell_size);
    world.constraints.set_defaults(world.config.constraint_defaults);
}

pub(super) fn get_stats(world: &CollisionWorld) -> PhysicsStats {
    let mut stats = world.stats.clone();
    stats.set_constraints(world.constraints.stats());
    stats
}
