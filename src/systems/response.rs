//! Collision response - impulse, friction and positional separation
//!
//! Static bodies are never written to.

use serde::{Deserialize, Serialize};

use crate::domain::{Body, CollisionResult};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseConfig {
    /// Scales min(restitution A, restitution B)
    pub restitution_multiplier: f32,
    pub friction: f32,
    /// Push overlapping bodies apart after the impulse
    pub separate: bool,
    /// Fraction of the penetration removed per pass
    pub separation_strength: f32,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            restitution_multiplier: 1.0,
            friction: 0.1,
            separate: true,
            separation_strength: 0.8,
        }
    }
}

/// Impulse magnitudes applied by one response
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResponseOutcome {
    pub impulse: f32,
    pub friction_impulse: f32,
}

/// Resolve a detected contact between `a` and `b`
///
/// `result.normal` must point from A to B. `epsilon` is the smallest
/// tangential speed that receives friction.
pub fn resolve_collision(
    a: &mut Body,
    b: &mut Body,
    result: &CollisionResult,
    config: &ResponseConfig,
    epsilon: f32,
) -> ResponseOutcome {
    let mut outcome = ResponseOutcome::default();
    if !result.has_collision {
        return outcome;
    }

    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return outcome;
    }

    let normal = result.normal;
    let rel_vel = b.velocity - a.velocity;
    let vel_along_normal = rel_vel.dot(normal);

    // Already separating: no impulse
    if vel_along_normal < 0.0 {
        let restitution = a.restitution.min(b.restitution) * config.restitution_multiplier;
        let j = -(1.0 + restitution) * vel_along_normal / inv_sum;
        let impulse = normal * j;
        if !a.is_static {
            a.velocity -= impulse * inv_a;
        }
        if !b.is_static {
            b.velocity += impulse * inv_b;
        }
        outcome.impulse = j.abs();

        // Friction against what is left of the sliding motion
        let rel_vel = b.velocity - a.velocity;
        let tangent = rel_vel - normal * rel_vel.dot(normal);
        let tangent_speed = tangent.length();
        if tangent_speed > epsilon {
            let dir = tangent / tangent_speed;
            // Never reverse the sliding direction
            let jt = (tangent_speed * config.friction).min(tangent_speed) / inv_sum;
            let friction_impulse = dir * jt;
            if !a.is_static {
                a.velocity += friction_impulse * inv_a;
            }
            if !b.is_static {
                b.velocity -= friction_impulse * inv_b;
            }
            outcome.friction_impulse = jt;
        }
    }

    if config.separate && result.penetration > 0.0 {
        let correction = normal * (result.penetration * config.separation_strength / inv_sum);
        if !a.is_static {
            a.position -= correction * inv_a;
        }
        if !b.is_static {
            b.position += correction * inv_b;
        }
    }

    outcome
}
