use crate::core::Vec2;
use crate::domain::{Body, Shape};

/// Axis-aligned bounding box in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            min: Vec2::new(center.x - half_width, center.y - half_height),
            max: Vec2::new(center.x + half_width, center.y + half_height),
        }
    }

    /// Bounds of a body's shape at its current position.
    ///
    /// Rotation is ignored: rectangles use width x height, polygons use the
    /// min/max of their vertices translated (not rotated) to world space.
    pub fn of_body(body: &Body) -> Self {
        let p = body.position;
        match &body.shape {
            Shape::Circle { radius } => Self::from_center(p, *radius, *radius),
            Shape::Rectangle { width, height } => Self::from_center(p, width * 0.5, height * 0.5),
            Shape::Polygon { vertices } => {
                if vertices.is_empty() {
                    return Self::new(p, p);
                }
                let mut min = Vec2::new(f32::MAX, f32::MAX);
                let mut max = Vec2::new(f32::MIN, f32::MIN);
                for v in vertices {
                    min.x = min.x.min(v.x);
                    min.y = min.y.min(v.y);
                    max.x = max.x.max(v.x);
                    max.y = max.y.max(v.y);
                }
                Self::new(min + p, max + p)
            }
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        (self.max.x - self.min.x) * 0.5
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        (self.max.y - self.min.y) * 0.5
    }

    /// Strict overlap; boxes that only touch do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Closest point inside the box to `p`
    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.min.x, self.max.x), p.y.clamp(self.min.y, self.max.y))
    }
}
