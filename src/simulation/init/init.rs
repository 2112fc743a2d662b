use crate::spatial::SpatialHashGrid;
use crate::systems::ConstraintSolver;

use super::config::CollisionConfig;
use super::perf_stats::PhysicsStats;
use super::CollisionWorld;

pub(super) fn create_world(config: CollisionConfig) -> CollisionWorld {
    log_info!(
        "collision world: cell size {}, precision {}, max distance {}",
        config.cell_size,
        config.precision,
        config.max_detection_distance
    );
    CollisionWorld {
        grid: SpatialHashGrid::new(config.cell_size),
        constraints: ConstraintSolver::with_defaults(config.constraint_defaults),
        stats: PhysicsStats::default(),
        config,
    }
}
