//! Per-kind constraint corrections
//!
//! Distance/Rope/Revolute/Prismatic/Weld correct positions directly.
//! Spring changes velocities. Pin drags a single body toward its target.

use crate::core::Vec2;
use crate::domain::{Body, Constraint, ConstraintKind, ConstraintStatus};
use crate::systems::narrow_phase::DEGENERATE_NORMAL;

/// The bodies a constraint acts on this step
///
/// `b` is `None` when the far end is the constraint's fixed world point.
pub(super) struct Ends<'a> {
    pub a: &'a mut Body,
    pub b: Option<&'a mut Body>,
}

impl Ends<'_> {
    fn inverse_masses(&self) -> (f32, f32) {
        let inv_b = self.b.as_ref().map_or(0.0, |b| b.inverse_mass());
        (self.a.inverse_mass(), inv_b)
    }

    /// World-space anchors (A, far end)
    fn anchors(&self, c: &Constraint) -> (Vec2, Vec2) {
        let world_a = self.a.local_to_world(c.anchor_a);
        let world_b = match &self.b {
            Some(b) => b.local_to_world(c.anchor_b),
            None => c.world_point,
        };
        (world_a, world_b)
    }
}

/// Measure, check breakage, then correct.
///
/// Returns true if the constraint broke on this call.
pub(super) fn step_constraint(c: &mut Constraint, mut ends: Ends<'_>, dt: f32, epsilon: f32) -> bool {
    let (world_a, world_b) = ends.anchors(c);
    let current = world_a.distance(world_b);
    let stretch = current - c.rest_length;

    c.state.current_length = current;
    c.state.current_force = stretch.abs() * c.stiffness;
    c.state.energy = 0.5 * c.stiffness * stretch * stretch;

    if c.breakable && c.state.current_force > c.break_force {
        c.state.status = ConstraintStatus::Broken { force: c.state.current_force };
        return true;
    }

    match c.kind {
        ConstraintKind::Distance | ConstraintKind::Revolute | ConstraintKind::Prismatic => {
            correct_distance(&mut ends, world_a, world_b, current, c.rest_length, epsilon);
        }
        ConstraintKind::Rope => {
            // Slack ropes push nothing
            if current > c.rest_length {
                correct_distance(&mut ends, world_a, world_b, current, c.rest_length, epsilon);
            }
        }
        ConstraintKind::Spring => {
            apply_spring(&mut ends, c, world_a, world_b, current, dt, epsilon);
        }
        ConstraintKind::Pin => {
            apply_pin(&mut ends, c, world_a, world_b, dt);
        }
        ConstraintKind::Weld => {
            correct_distance(&mut ends, world_a, world_b, current, c.rest_length, epsilon);
            correct_angle(&mut ends, c);
        }
    }

    false
}

/// Unit axis from A's anchor to the far end; fixed fallback when they coincide
fn anchor_axis(world_a: Vec2, world_b: Vec2, current: f32, epsilon: f32) -> Vec2 {
    if current <= epsilon {
        DEGENERATE_NORMAL
    } else {
        (world_b - world_a) / current
    }
}

/// Close the length error in one relaxation step, split by inverse mass
fn correct_distance(ends: &mut Ends<'_>, world_a: Vec2, world_b: Vec2, current: f32, rest: f32, epsilon: f32) {
    let (inv_a, inv_b) = ends.inverse_masses();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return;
    }

    let dir = anchor_axis(world_a, world_b, current, epsilon);
    let offset = dir * (current - rest);

    if !ends.a.is_static {
        ends.a.position += offset * (inv_a / inv_sum);
    }
    if let Some(b) = ends.b.as_deref_mut() {
        if !b.is_static {
            b.position -= offset * (inv_b / inv_sum);
        }
    }
}

/// Hooke's law plus damping along the anchor axis, integrated over `dt`
fn apply_spring(
    ends: &mut Ends<'_>,
    c: &Constraint,
    world_a: Vec2,
    world_b: Vec2,
    current: f32,
    dt: f32,
    epsilon: f32,
) {
    let (inv_a, inv_b) = ends.inverse_masses();
    let dir = anchor_axis(world_a, world_b, current, epsilon);

    let vel_b = ends.b.as_ref().map_or(Vec2::ZERO, |b| b.velocity);
    let closing = (vel_b - ends.a.velocity).dot(dir);

    let force = (current - c.rest_length) * c.stiffness + closing * c.damping;
    let impulse = dir * (force * dt);

    if !ends.a.is_static {
        ends.a.velocity += impulse * inv_a;
    }
    if let Some(b) = ends.b.as_deref_mut() {
        if !b.is_static {
            b.velocity -= impulse * inv_b;
        }
    }
}

/// Drag body A's anchor toward the target and bleed its velocity
fn apply_pin(ends: &mut Ends<'_>, c: &Constraint, world_a: Vec2, target: Vec2, dt: f32) {
    let a = &mut *ends.a;
    if a.is_static {
        return;
    }
    a.position += (target - world_a) * (c.stiffness * dt);
    a.velocity = a.velocity * (1.0 - c.damping * dt);
}

/// Nudge angular velocities toward the captured relative angle
fn correct_angle(ends: &mut Ends<'_>, c: &Constraint) {
    let (inv_a, inv_b) = ends.inverse_masses();
    let angle_b = ends.b.as_ref().map_or(0.0, |b| b.angle);
    let error = (angle_b - ends.a.angle) - c.reference_angle;

    if !ends.a.is_static {
        ends.a.angular_velocity += error * c.stiffness * inv_a;
    }
    if let Some(b) = ends.b.as_deref_mut() {
        if !b.is_static {
            b.angular_velocity -= error * c.stiffness * inv_b;
        }
    }
}
