//! ConstraintSolver - springs, ropes, pins, welds and distance joints
//!
//! Constraints refer to bodies by id. Each `update` resolves the ids against
//! the body slice the caller hands in, so the solver never holds on to body
//! references between steps.
//!
//! Lifecycle:
//! - `create_constraint` measures the initial anchor distance (default rest length).
//! - `update` measures, checks the break threshold, then corrects.
//! - A broken constraint stays in the table, inert, until `remove_constraint`.

mod render;
mod solve;

pub use render::{render_constraints, DrawSurface};

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{
    Body, BodyId, Constraint, ConstraintConfig, ConstraintDefaults, ConstraintId, ConstraintState,
};

use solve::{step_constraint, Ends};

/// Called once per constraint when it breaks
pub type BreakCallback = Box<dyn FnMut(&Constraint)>;

/// Aggregate numbers for the UI
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintStats {
    pub total: u32,
    pub active: u32,
    pub broken: u32,
    /// Sum of active constraint energies
    pub total_energy: f32,
}

pub struct ConstraintSolver {
    constraints: Vec<Constraint>,
    next_id: ConstraintId,
    defaults: ConstraintDefaults,
    on_break: Option<BreakCallback>,
}

impl ConstraintSolver {
    pub fn new() -> Self {
        Self::with_defaults(ConstraintDefaults::default())
    }

    pub fn with_defaults(defaults: ConstraintDefaults) -> Self {
        Self {
            constraints: Vec::new(),
            next_id: 1,
            defaults,
            on_break: None,
        }
    }

    pub fn defaults(&self) -> &ConstraintDefaults {
        &self.defaults
    }

    pub fn set_defaults(&mut self, defaults: ConstraintDefaults) {
        self.defaults = defaults;
    }

    pub fn set_break_callback(&mut self, callback: Option<BreakCallback>) {
        self.on_break = callback;
    }

    /// Create a constraint between bodies found in `bodies`.
    ///
    /// Returns `None` (and logs) if body A, or a given body B, is unknown.
    pub fn create_constraint(&mut self, config: ConstraintConfig, bodies: &[Body]) -> Option<ConstraintId> {
        let Some(a) = bodies.iter().find(|b| b.id == config.body_a) else {
            log_warn!("create_constraint: unknown body A {}", config.body_a);
            return None;
        };
        let b = match config.body_b {
            Some(id) => match bodies.iter().find(|b| b.id == id) {
                Some(body) => Some(body),
                None => {
                    log_warn!("create_constraint: unknown body B {}", id);
                    return None;
                }
            },
            None => None,
        };

        let anchor_a = config.anchor_a.unwrap_or_default();
        let anchor_b = config.anchor_b.unwrap_or_default();
        let world_a = a.local_to_world(anchor_a);
        let (world_b, world_point) = match b {
            Some(body) => (body.local_to_world(anchor_b), world_a),
            None => {
                let point = config.world_point.unwrap_or(world_a);
                (point, point)
            }
        };

        let initial_length = world_a.distance(world_b);
        let rest_length = config.length.unwrap_or(initial_length);
        let reference_angle = b.map_or(0.0, |body| body.angle) - a.angle;

        let kind_defaults = self.defaults.for_kind(config.kind);

        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);

        self.constraints.push(Constraint {
            id,
            kind: config.kind,
            body_a: config.body_a,
            body_b: config.body_b,
            anchor_a,
            anchor_b,
            world_point,
            rest_length,
            reference_angle,
            stiffness: config.stiffness.unwrap_or(kind_defaults.stiffness),
            damping: config.damping.unwrap_or(kind_defaults.damping),
            breakable: config.breakable,
            break_force: config.break_force.unwrap_or(self.defaults.break_force),
            render: config.render.unwrap_or_default(),
            state: ConstraintState::new(initial_length),
        });
        Some(id)
    }

    /// Remove a constraint by ID (broken or not)
    pub fn remove_constraint(&mut self, id: ConstraintId) -> bool {
        match self.constraints.iter().position(|c| c.id == id) {
            Some(idx) => {
                self.constraints.remove(idx);
                true
            }
            None => {
                log_warn!("remove_constraint: unknown constraint {}", id);
                false
            }
        }
    }

    /// Drop every constraint attached to a body; returns how many
    pub fn remove_constraints_for_body(&mut self, body: BodyId) -> usize {
        let before = self.constraints.len();
        self.constraints.retain(|c| !c.involves(body));
        before - self.constraints.len()
    }

    pub fn clear(&mut self) {
        self.constraints.clear();
        self.next_id = 1;
    }

    pub fn get_constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        let found = self.constraints.iter().find(|c| c.id == id);
        if found.is_none() {
            log_warn!("get_constraint: unknown constraint {}", id);
        }
        found
    }

    pub fn get_constraint_state(&self, id: ConstraintId) -> Option<ConstraintState> {
        self.get_constraint(id).map(|c| c.state)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn stats(&self) -> ConstraintStats {
        let mut stats = ConstraintStats::default();
        for c in &self.constraints {
            stats.total += 1;
            if c.is_broken() {
                stats.broken += 1;
            } else {
                stats.active += 1;
                stats.total_energy += c.state.energy;
            }
        }
        stats
    }

    /// Advance every non-broken constraint by one step.
    ///
    /// Constraints whose bodies are missing from `bodies` are skipped.
    /// Returns the ids of constraints that broke during this call.
    pub fn update(&mut self, bodies: &mut [Body], dt: f32, epsilon: f32) -> Vec<ConstraintId> {
        let mut broken = Vec::new();
        if self.constraints.is_empty() {
            return broken;
        }

        let index: HashMap<BodyId, usize> = bodies.iter().enumerate().map(|(i, b)| (b.id, i)).collect();

        for c in self.constraints.iter_mut() {
            if c.is_broken() {
                continue;
            }
            let Some(&ia) = index.get(&c.body_a) else {
                continue;
            };

            let just_broke = match c.body_b {
                None => step_constraint(c, Ends { a: &mut bodies[ia], b: None }, dt, epsilon),
                Some(id_b) => {
                    let Some(&ib) = index.get(&id_b) else {
                        continue;
                    };
                    if ia == ib {
                        continue;
                    }
                    let (a, b) = pair_mut(bodies, ia, ib);
                    step_constraint(c, Ends { a, b: Some(b) }, dt, epsilon)
                }
            };

            if just_broke {
                log_info!(
                    "constraint {} ({:?}) broke at force {:.3}",
                    c.id,
                    c.kind,
                    c.state.current_force
                );
                broken.push(c.id);
            }
        }

        if let Some(callback) = self.on_break.as_mut() {
            for id in &broken {
                if let Some(c) = self.constraints.iter().find(|c| c.id == *id) {
                    callback(c);
                }
            }
        }

        broken
    }
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Two distinct mutable bodies from one slice
pub(crate) fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i != j);
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec2;
    use crate::domain::{ConstraintKind, ConstraintStatus, Material};
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;
    const EPS: f32 = 1e-4;

    fn body(id: BodyId, x: f32, y: f32) -> Body {
        Body::circle(id, x, y, 5.0, Material::STONE).with_mass(1.0)
    }

    #[test]
    fn default_rest_length_is_initial_distance() {
        let bodies = vec![body(1, 0.0, 0.0), body(2, 30.0, 40.0)];
        let mut solver = ConstraintSolver::new();
        let id = solver
            .create_constraint(ConstraintConfig::new(ConstraintKind::Spring, 1, Some(2)), &bodies)
            .unwrap();
        let c = solver.get_constraint(id).unwrap();
        assert!((c.rest_length - 50.0).abs() < 1e-6);
        assert_eq!(c.stiffness, solver.defaults().spring.stiffness);
    }

    #[test]
    fn unknown_bodies_are_rejected() {
        let bodies = vec![body(1, 0.0, 0.0)];
        let mut solver = ConstraintSolver::new();
        assert!(solver
            .create_constraint(ConstraintConfig::new(ConstraintKind::Distance, 9, None), &bodies)
            .is_none());
        assert!(solver
            .create_constraint(ConstraintConfig::new(ConstraintKind::Distance, 1, Some(9)), &bodies)
            .is_none());
        assert_eq!(solver.constraint_count(), 0);
        assert!(!solver.remove_constraint(42));
    }

    #[test]
    fn distance_splits_correction_by_inverse_mass() {
        let mut bodies = vec![body(1, 0.0, 0.0), body(2, 100.0, 0.0)];
        let mut solver = ConstraintSolver::new();
        solver.create_constraint(
            ConstraintConfig::new(ConstraintKind::Distance, 1, Some(2)).with_length(80.0),
            &bodies,
        );
        solver.update(&mut bodies, DT, EPS);
        assert!((bodies[0].position.x - 10.0).abs() < 1e-4);
        assert!((bodies[1].position.x - 90.0).abs() < 1e-4);
    }

    #[test]
    fn rope_is_slack_when_short() {
        let mut bodies = vec![body(1, 0.0, 0.0), body(2, 30.0, 0.0)];
        let mut solver = ConstraintSolver::new();
        solver.create_constraint(
            ConstraintConfig::new(ConstraintKind::Rope, 1, Some(2)).with_length(50.0),
            &bodies,
        );
        solver.update(&mut bodies, DT, EPS);
        assert_eq!(bodies[1].position, Vec2::new(30.0, 0.0));

        bodies[1].position.x = 70.0;
        solver.update(&mut bodies, DT, EPS);
        assert!((bodies[0].position.distance(bodies[1].position) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn spring_pulls_toward_static_anchor() {
        let mut bodies = vec![body(1, 0.0, 0.0).fixed(), body(2, 100.0, 0.0)];
        let mut solver = ConstraintSolver::new();
        solver.create_constraint(
            ConstraintConfig::new(ConstraintKind::Spring, 1, Some(2))
                .with_length(50.0)
                .with_stiffness(0.5)
                .with_damping(0.0),
            &bodies,
        );
        solver.update(&mut bodies, DT, EPS);
        let v = bodies[1].velocity;
        assert!(v.x < 0.0);
        assert!(v.y.abs() < 1e-6);
        assert!((v.length() - 0.5 * 50.0 * DT).abs() < 1e-5);
        assert_eq!(bodies[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn pin_drags_toward_world_point() {
        let mut bodies = vec![body(1, 10.0, 0.0).with_velocity(6.0, 0.0)];
        let mut solver = ConstraintSolver::new();
        solver.create_constraint(
            ConstraintConfig::new(ConstraintKind::Pin, 1, None)
                .with_world_point(Vec2::new(0.0, 0.0))
                .with_stiffness(6.0)
                .with_damping(30.0),
            &bodies,
        );
        solver.update(&mut bodies, 0.1, EPS);
        // 10 - 10 * 6 * 0.1 = 4; velocity * (1 - 30 * 0.1) = -2x
        assert!((bodies[0].position.x - 4.0).abs() < 1e-4);
        assert!((bodies[0].velocity.x + 12.0).abs() < 1e-4);
    }

    #[test]
    fn pin_defaults_to_anchor_position() {
        let bodies = vec![body(1, 10.0, 20.0)];
        let mut solver = ConstraintSolver::new();
        let id = solver
            .create_constraint(ConstraintConfig::new(ConstraintKind::Pin, 1, None), &bodies)
            .unwrap();
        let c = solver.get_constraint(id).unwrap();
        assert_eq!(c.world_point, Vec2::new(10.0, 20.0));
        assert_eq!(c.rest_length, 0.0);
    }

    #[test]
    fn weld_restores_relative_angle() {
        let mut bodies = vec![body(1, 0.0, 0.0), body(2, 20.0, 0.0)];
        let mut solver = ConstraintSolver::new();
        solver.create_constraint(ConstraintConfig::new(ConstraintKind::Weld, 1, Some(2)), &bodies);
        bodies[1].angle = 0.5;
        solver.update(&mut bodies, DT, EPS);
        assert!(bodies[1].angular_velocity < 0.0);
        assert!(bodies[0].angular_velocity > 0.0);
    }

    #[test]
    fn breakage_is_terminal() {
        let mut bodies = vec![body(1, 0.0, 0.0), body(2, 10.0, 0.0)];
        let mut solver = ConstraintSolver::new();
        let id = solver
            .create_constraint(
                ConstraintConfig::new(ConstraintKind::Spring, 1, Some(2))
                    .with_stiffness(1.0)
                    .breakable(5.0),
                &bodies,
            )
            .unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        solver.set_break_callback(Some(Box::new(move |c: &Constraint| sink.borrow_mut().push(c.id))));

        bodies[1].position.x = 20.0;
        assert_eq!(solver.update(&mut bodies, DT, EPS), vec![id]);
        assert!(matches!(
            solver.get_constraint_state(id).map(|s| s.status),
            Some(ConstraintStatus::Broken { .. })
        ));

        // Back within range: still broken, no more forces
        bodies[1].position.x = 10.0;
        let v_before = bodies[1].velocity;
        assert!(solver.update(&mut bodies, DT, EPS).is_empty());
        assert!(solver.get_constraint(id).unwrap().is_broken());
        assert_eq!(bodies[1].velocity, v_before);
        assert_eq!(*seen.borrow(), vec![id]);

        let stats = solver.stats();
        assert_eq!((stats.total, stats.active, stats.broken), (1, 0, 1));

        assert!(solver.remove_constraint(id));
        assert_eq!(solver.constraint_count(), 0);
    }

    #[test]
    fn energy_and_force_bookkeeping() {
        let mut bodies = vec![body(1, 0.0, 0.0).fixed(), body(2, 30.0, 0.0).fixed()];
        let mut solver = ConstraintSolver::new();
        let id = solver
            .create_constraint(
                ConstraintConfig::new(ConstraintKind::Spring, 1, Some(2))
                    .with_length(20.0)
                    .with_stiffness(2.0),
                &bodies,
            )
            .unwrap();
        solver.update(&mut bodies, DT, EPS);
        let state = solver.get_constraint_state(id).unwrap();
        assert!((state.current_length - 30.0).abs() < 1e-5);
        assert!((state.current_force - 20.0).abs() < 1e-4);
        assert!((state.energy - 100.0).abs() < 1e-3);
        assert!((solver.stats().total_energy - 100.0).abs() < 1e-3);
    }

    #[test]
    fn removing_a_body_skips_and_cleans_constraints() {
        let mut bodies = vec![body(1, 0.0, 0.0), body(2, 100.0, 0.0)];
        let mut solver = ConstraintSolver::new();
        solver.create_constraint(
            ConstraintConfig::new(ConstraintKind::Distance, 1, Some(2)).with_length(10.0),
            &bodies,
        );
        bodies.pop();
        solver.update(&mut bodies, DT, EPS);
        assert_eq!(bodies[0].position, Vec2::ZERO);
        assert_eq!(solver.remove_constraints_for_body(2), 1);
    }

    #[test]
    fn anchors_follow_body_rotation() {
        let mut a = body(1, 0.0, 0.0);
        a.angle = std::f32::consts::FRAC_PI_2;
        let bodies = vec![a, body(2, 0.0, 50.0)];
        let mut solver = ConstraintSolver::new();
        let id = solver
            .create_constraint(
                ConstraintConfig::new(ConstraintKind::Distance, 1, Some(2))
                    .with_anchors(Vec2::new(10.0, 0.0), Vec2::ZERO),
                &bodies,
            )
            .unwrap();
        // Anchor (10, 0) rotated 90° sits at (0, 10)
        assert!((solver.get_constraint(id).unwrap().rest_length - 40.0).abs() < 1e-4);
    }

    #[test]
    fn coincident_anchors_still_separate() {
        let mut bodies = vec![body(1, 0.0, 0.0), body(2, 0.0, 0.0), body(3, 50.0, 50.0), body(4, 50.0, 50.0)];
        let mut solver = ConstraintSolver::new();
        solver.create_constraint(
            ConstraintConfig::new(ConstraintKind::Distance, 1, Some(2)).with_length(10.0),
            &bodies,
        );
        solver.create_constraint(
            ConstraintConfig::new(ConstraintKind::Spring, 3, Some(4)).with_length(10.0),
            &bodies,
        );

        solver.update(&mut bodies, DT, EPS);

        assert!((bodies[0].position.distance(bodies[1].position) - 10.0).abs() < 1e-4);
        assert_eq!(bodies[0].position.x, bodies[1].position.x);
        assert!(bodies[2].velocity.length() > 0.0);
        assert!((bodies[2].velocity + bodies[3].velocity).length() < 1e-6);
        assert!(bodies[2].velocity.dot(bodies[3].velocity) < 0.0);
    }

    #[test]
    fn coincident_world_point_pushes_single_body_out() {
        let mut bodies = vec![body(1, 20.0, 20.0)];
        let mut solver = ConstraintSolver::new();
        solver.create_constraint(
            ConstraintConfig::new(ConstraintKind::Distance, 1, None).with_length(10.0),
            &bodies,
        );

        solver.update(&mut bodies, DT, EPS);

        assert!((bodies[0].position.distance(Vec2::new(20.0, 20.0)) - 10.0).abs() < 1e-4);
    }
}
