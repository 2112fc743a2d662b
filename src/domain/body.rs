//! Body - a rigid shape as seen by the collision core
//!
//! Bodies are owned by the external integrator. This core borrows them for
//! one step, reads shape and state, and writes back position, velocity and
//! angular velocity.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;
use crate::spatial::Aabb;

use super::material::Material;

pub type BodyId = u32;

/// Collision shape, in body-local coordinates centered on the body position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
    Polygon { vertices: Vec<Vec2> },
}

impl Shape {
    /// Area used by factories that derive mass from density
    pub fn area(&self) -> f32 {
        match self {
            Shape::Circle { radius } => std::f32::consts::PI * radius * radius,
            Shape::Rectangle { width, height } => width * height,
            Shape::Polygon { vertices } => {
                // Shoelace formula
                let n = vertices.len();
                if n < 3 {
                    return 0.0;
                }
                let mut sum = 0.0;
                for i in 0..n {
                    let a = vertices[i];
                    let b = vertices[(i + 1) % n];
                    sum += a.cross(b);
                }
                (sum * 0.5).abs()
            }
        }
    }
}

/// Rigid body state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub id: BodyId,
    pub shape: Shape,

    // === Physics State ===
    /// World position (center of mass)
    pub position: Vec2,
    pub velocity: Vec2,
    /// Rotation angle (radians)
    pub angle: f32,
    pub angular_velocity: f32,
    /// Must be > 0 for dynamic bodies
    pub mass: f32,

    // === Material ===
    pub restitution: f32,
    pub friction: f32,

    pub is_static: bool,
    pub is_sleeping: bool,
}

impl Body {
    fn with_shape(id: BodyId, x: f32, y: f32, shape: Shape, material: Material) -> Self {
        let mass = (shape.area() * material.density).max(f32::EPSILON);
        Self {
            id,
            shape,
            position: Vec2::new(x, y),
            velocity: Vec2::zero(),
            angle: 0.0,
            angular_velocity: 0.0,
            mass,
            restitution: material.restitution,
            friction: material.friction,
            is_static: false,
            is_sleeping: false,
        }
    }

    /// Create a circular body; mass is derived from area and material density
    pub fn circle(id: BodyId, x: f32, y: f32, radius: f32, material: Material) -> Self {
        Self::with_shape(id, x, y, Shape::Circle { radius }, material)
    }

    /// Create an axis-aligned rectangle centered on (x, y)
    pub fn rectangle(id: BodyId, x: f32, y: f32, width: f32, height: f32, material: Material) -> Self {
        Self::with_shape(id, x, y, Shape::Rectangle { width, height }, material)
    }

    /// Create a polygon from vertices relative to (x, y)
    pub fn polygon(id: BodyId, x: f32, y: f32, vertices: Vec<Vec2>, material: Material) -> Self {
        Self::with_shape(id, x, y, Shape::Polygon { vertices }, material)
    }

    /// Override the derived mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Vec2::new(vx, vy);
        self
    }

    /// Mark as static (immovable, infinite mass)
    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self.velocity = Vec2::zero();
        self.angular_velocity = 0.0;
        self
    }

    /// 0 for static bodies and for bodies without a positive mass
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Dynamic and awake
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.is_static && !self.is_sleeping
    }

    /// World-space bounding box (rotation ignored)
    pub fn aabb(&self) -> Aabb {
        Aabb::of_body(self)
    }

    /// Transform a local point to world coordinates using position and angle
    #[inline]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.position + local.rotate(self.angle)
    }
}
