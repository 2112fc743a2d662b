use crate::domain::{Body, CollisionEvent, CollisionResult, ConstraintId};
use crate::spatial::CandidatePair;
use crate::systems::constraints::pair_mut;
use crate::systems::{detect, resolve_collision, ResponseConfig};

use super::perf_timer::PerfTimer;
use super::CollisionWorld;

/// A candidate pair that passed narrow phase
struct Detected {
    pair: CandidatePair,
    result: CollisionResult,
}

impl Detected {
    fn event(&self, bodies: &[Body], impulse: f32) -> CollisionEvent {
        CollisionEvent {
            body_a: bodies[self.pair.a].id,
            body_b: bodies[self.pair.b].id,
            point: self.result.point,
            normal: self.result.normal,
            penetration: self.result.penetration,
            impulse,
            kind: self.result.kind,
        }
    }
}

/// Broad phase, distance cutoff, narrow phase
fn detect_pairs(world: &mut CollisionWorld, bodies: &[Body]) -> Vec<Detected> {
    let mut timer = PerfTimer::start();
    world.stats.reset_detection();
    world.stats.body_count = bodies.len() as u32;

    world.grid.rebuild(bodies);
    let pairs = world.grid.candidate_pairs();
    world.stats.occupied_cells = world.grid.cell_count() as u32;
    world.stats.candidate_pairs = pairs.len() as u32;
    world.stats.broad_ms = timer.lap_ms();

    let max_distance = world.config.max_detection_distance;
    let precision = world.config.precision;

    let mut hits = Vec::new();
    for pair in pairs {
        let a = &bodies[pair.a];
        let b = &bodies[pair.b];
        if a.position.distance(b.position) > max_distance {
            continue;
        }
        let result = detect(a, b, precision);
        if result.has_collision {
            hits.push(Detected { pair, result });
        }
    }

    world.stats.collisions = hits.len() as u32;
    world.stats.narrow_ms = timer.lap_ms();
    hits
}

pub(super) fn detect_all_collisions(world: &mut CollisionWorld, bodies: &[Body]) -> Vec<CollisionEvent> {
    detect_pairs(world, bodies)
        .iter()
        .map(|hit| hit.event(bodies, 0.0))
        .collect()
}

pub(super) fn update(world: &mut CollisionWorld, bodies: &mut [Body], response: &ResponseConfig) -> Vec<CollisionEvent> {
    let hits = detect_pairs(world, bodies);
    if hits.is_empty() {
        return Vec::new();
    }

    let timer = PerfTimer::start();
    let precision = world.config.precision;
    let mut events = Vec::with_capacity(hits.len());
    for hit in &hits {
        let (a, b) = pair_mut(bodies, hit.pair.a, hit.pair.b);
        let outcome = resolve_collision(a, b, &hit.result, response, precision);
        events.push(hit.event(bodies, outcome.impulse));
    }
    world.stats.response_ms = timer.elapsed_ms();
    events
}

pub(super) fn update_constraints(world: &mut CollisionWorld, bodies: &mut [Body], dt: f32) -> Vec<ConstraintId> {
    let timer = PerfTimer::start();
    let broken = world.constraints.update(bodies, dt, world.config.precision);
    world.stats.constraints_ms = timer.elapsed_ms();
    world.stats.set_constraints(world.constraints.stats());
    broken
}
