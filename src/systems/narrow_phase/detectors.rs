use crate::core::Vec2;
use crate::spatial::Aabb;

/// Contact produced by a primitive test; the normal points from A to B
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub point: Vec2,
    pub normal: Vec2,
    pub penetration: f32,
}

/// Fallback normal for coincident centers
pub const DEGENERATE_NORMAL: Vec2 = Vec2 { x: 0.0, y: -1.0 };

/// Exact circle vs circle
pub fn circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32, epsilon: f32) -> Option<Contact> {
    let delta = center_b - center_a;
    let radius_sum = radius_a + radius_b;
    let dist_sq = delta.length_squared();
    if dist_sq >= radius_sum * radius_sum {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > epsilon { delta / dist } else { DEGENERATE_NORMAL };
    Some(Contact {
        point: center_a + normal * radius_a,
        normal,
        penetration: radius_sum - dist,
    })
}

/// Exact circle (as A) vs axis-aligned box (as B)
///
/// The circle center is clamped into the box to find the closest point.
/// The contact point is that closest point. A center inside the box gives
/// distance 0, so penetration is the full radius and the normal falls back
/// to `DEGENERATE_NORMAL`.
pub fn circle_box(center: Vec2, radius: f32, rect: &Aabb, epsilon: f32) -> Option<Contact> {
    let closest = rect.clamp_point(center);
    let offset = center - closest;
    let dist = offset.length();
    if dist >= radius {
        return None;
    }

    // Points from the box surface out toward the circle center
    let box_to_circle = if dist > epsilon { offset / dist } else { DEGENERATE_NORMAL };
    Some(Contact {
        point: closest,
        normal: -box_to_circle,
        penetration: radius - dist,
    })
}

/// Axis-aligned box vs box (rotation ignored)
///
/// Separates along the axis of least overlap. The contact point is the
/// center of the overlap region.
pub fn box_box(a: &Aabb, b: &Aabb) -> Option<Contact> {
    let delta = b.center() - a.center();
    let overlap_x = a.half_width() + b.half_width() - delta.x.abs();
    let overlap_y = a.half_height() + b.half_height() - delta.y.abs();
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    let (normal, penetration) = if overlap_x < overlap_y {
        (Vec2::new(sign(delta.x), 0.0), overlap_x)
    } else {
        (Vec2::new(0.0, sign(delta.y)), overlap_y)
    };

    let overlap_min = Vec2::new(a.min.x.max(b.min.x), a.min.y.max(b.min.y));
    let overlap_max = Vec2::new(a.max.x.min(b.max.x), a.max.y.min(b.max.y));

    Some(Contact {
        point: (overlap_min + overlap_max) * 0.5,
        normal,
        penetration,
    })
}

#[inline]
fn sign(v: f32) -> f32 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_circle_penetration_matches_overlap() {
        for step in 0..40 {
            let d = step as f32 * 1.0 + 0.5;
            let hit = circle_circle(Vec2::ZERO, 20.0, Vec2::new(d, 0.0), 20.0, 1e-4);
            if d < 40.0 {
                let c = hit.expect("overlapping circles collide");
                assert!((c.penetration - (40.0 - d)).abs() < 1e-5);
                assert_eq!(c.normal, Vec2::new(1.0, 0.0));
                assert_eq!(c.point, Vec2::new(20.0, 0.0));
            } else {
                assert!(hit.is_none());
            }
        }
    }

    #[test]
    fn circle_circle_coincident_uses_fallback_normal() {
        let c = circle_circle(Vec2::new(5.0, 5.0), 3.0, Vec2::new(5.0, 5.0), 2.0, 1e-4).unwrap();
        assert_eq!(c.normal, DEGENERATE_NORMAL);
        assert!((c.penetration - 5.0).abs() < 1e-6);
    }

    #[test]
    fn circle_box_side_contact() {
        let rect = Aabb::from_center(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let c = circle_box(Vec2::new(-14.0, 0.0), 5.0, &rect, 1e-4).unwrap();
        assert_eq!(c.point, Vec2::new(-10.0, 0.0));
        assert!((c.penetration - 1.0).abs() < 1e-6);
        // Circle on the left, box on the right: A -> B is +x
        assert_eq!(c.normal, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn circle_box_center_inside() {
        let rect = Aabb::from_center(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let c = circle_box(Vec2::new(2.0, 3.0), 4.0, &rect, 1e-4).unwrap();
        assert_eq!(c.point, Vec2::new(2.0, 3.0));
        assert!((c.penetration - 4.0).abs() < 1e-6);
        assert_eq!(c.normal, -DEGENERATE_NORMAL);
    }

    #[test]
    fn circle_box_miss_at_corner() {
        let rect = Aabb::from_center(Vec2::new(0.0, 0.0), 10.0, 10.0);
        // Bounding boxes overlap but the corner is ~5.66 away
        assert!(circle_box(Vec2::new(14.0, 14.0), 5.0, &rect, 1e-4).is_none());
    }

    #[test]
    fn box_box_picks_smaller_overlap() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let b = Aabb::from_center(Vec2::new(5.0, 18.0), 10.0, 10.0);
        let c = box_box(&a, &b).unwrap();
        // overlap x = 15, overlap y = 2
        assert_eq!(c.normal, Vec2::new(0.0, 1.0));
        assert!((c.penetration - 2.0).abs() < 1e-6);
        assert_eq!(c.point, Vec2::new(2.5, 9.0));
    }

    #[test]
    fn box_box_normal_follows_delta_sign() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let b = Aabb::from_center(Vec2::new(-17.0, 1.0), 10.0, 10.0);
        let c = box_box(&a, &b).unwrap();
        assert_eq!(c.normal, Vec2::new(-1.0, 0.0));
        assert!((c.penetration - 3.0).abs() < 1e-6);
    }
}
