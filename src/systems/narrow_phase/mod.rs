//! Narrow phase - per shape pair collision tests
//!
//! Dispatch is an exhaustive match on both shapes. Every test starts with a
//! bounding-box rejection.
//!
//! Polygons are approximated by their world-space bounding box and handed to
//! the rectangle tests. This is not separating-axis polygon collision.
//! Rectangles ignore rotation.
//!
//! Normals always point from body A toward body B.

mod detectors;

pub use detectors::{box_box, circle_box, circle_circle, Contact, DEGENERATE_NORMAL};

use crate::domain::{Body, CollisionKind, CollisionResult, Shape};

/// Test a pair of bodies
pub fn detect(a: &Body, b: &Body, epsilon: f32) -> CollisionResult {
    let bb_a = a.aabb();
    let bb_b = b.aabb();
    if !bb_a.overlaps(&bb_b) {
        return CollisionResult::none();
    }

    // `reversed`: the detector saw B as the circle, so its normal points B -> A
    let (contact, kind, reversed) = match (&a.shape, &b.shape) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => (
            circle_circle(a.position, *ra, b.position, *rb, epsilon),
            CollisionKind::CircleCircle,
            false,
        ),
        (Shape::Circle { radius }, Shape::Rectangle { .. }) => (
            circle_box(a.position, *radius, &bb_b, epsilon),
            CollisionKind::CircleRectangle,
            false,
        ),
        (Shape::Rectangle { .. }, Shape::Circle { radius }) => (
            circle_box(b.position, *radius, &bb_a, epsilon),
            CollisionKind::CircleRectangle,
            true,
        ),
        (Shape::Rectangle { .. }, Shape::Rectangle { .. }) => {
            (box_box(&bb_a, &bb_b), CollisionKind::RectangleRectangle, false)
        }
        (Shape::Circle { radius }, Shape::Polygon { .. }) => (
            circle_box(a.position, *radius, &bb_b, epsilon),
            CollisionKind::CirclePolygon,
            false,
        ),
        (Shape::Polygon { .. }, Shape::Circle { radius }) => (
            circle_box(b.position, *radius, &bb_a, epsilon),
            CollisionKind::CirclePolygon,
            true,
        ),
        (Shape::Rectangle { .. }, Shape::Polygon { .. })
        | (Shape::Polygon { .. }, Shape::Rectangle { .. }) => {
            (box_box(&bb_a, &bb_b), CollisionKind::RectanglePolygon, false)
        }
        (Shape::Polygon { .. }, Shape::Polygon { .. }) => {
            (box_box(&bb_a, &bb_b), CollisionKind::PolygonPolygon, false)
        }
    };

    match contact {
        Some(c) => {
            let result = CollisionResult::hit(c.point, c.normal, c.penetration, kind);
            if reversed {
                result.flipped()
            } else {
                result
            }
        }
        None => CollisionResult::none(),
    }
}
