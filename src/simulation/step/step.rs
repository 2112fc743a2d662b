use serde::Serialize;

use crate::domain::{Body, CollisionEvent, ConstraintId};

use super::detect;
use super::CollisionWorld;

/// Everything one combined step produced
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub collisions: Vec<CollisionEvent>,
    pub broken_constraints: Vec<ConstraintId>,
}

/// Collision update followed by one constraint pass
pub(super) fn step(world: &mut CollisionWorld, bodies: &mut [Body], dt: Option<f32>) -> StepReport {
    let response = world.config.effective_response();
    let collisions = detect::update(world, bodies, &response);
    let dt = dt.unwrap_or(world.config.time_step);
    let broken_constraints = detect::update_constraints(world, bodies, dt);
    StepReport {
        collisions,
        broken_constraints,
    }
}
