//! Spatial partitioning: bounding boxes and the broad-phase hash grid.

pub mod aabb;
pub mod hash_grid;

pub use aabb::Aabb;
pub use hash_grid::{CandidatePair, SpatialHashGrid};
