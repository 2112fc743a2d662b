use serde::Serialize;

use crate::core::Vec2;

use super::body::BodyId;

/// Which detector produced a result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CollisionKind {
    None,
    CircleCircle,
    CircleRectangle,
    RectangleRectangle,
    /// Polygon replaced by its bounding box
    CirclePolygon,
    /// Polygon replaced by its bounding box
    RectanglePolygon,
    /// Both polygons replaced by their bounding boxes
    PolygonPolygon,
}

/// Result of a narrow-phase test for a single pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionResult {
    pub has_collision: bool,
    /// Contact point in world space
    pub point: Vec2,
    /// Unit normal pointing from A toward B
    pub normal: Vec2,
    /// Overlap depth along the normal (>= 0)
    pub penetration: f32,
    pub kind: CollisionKind,
}

impl CollisionResult {
    #[inline]
    pub fn none() -> Self {
        Self {
            has_collision: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
            kind: CollisionKind::None,
        }
    }

    #[inline]
    pub fn hit(point: Vec2, normal: Vec2, penetration: f32, kind: CollisionKind) -> Self {
        Self {
            has_collision: true,
            point,
            normal,
            penetration,
            kind,
        }
    }

    /// Swap the A/B roles (inverts the normal)
    #[inline]
    pub fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

/// Emitted to effects/audio/UI after detection (and response, if any)
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionEvent {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub point: Vec2,
    pub normal: Vec2,
    pub penetration: f32,
    /// Normal impulse magnitude applied by the response (0 for pure detection)
    pub impulse: f32,
    pub kind: CollisionKind,
}
