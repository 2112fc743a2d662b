use motion_physics::{Body, CollisionWorld, ConstraintConfig, ConstraintKind, Material};

#[test]
fn perf_smoke_step() {
    let mut world = CollisionWorld::new();
    let mut bodies = Vec::new();
    let mut id = 1;
    for x in 0..40 {
        for y in 0..25 {
            bodies.push(Body::circle(id, x as f32 * 18.0, y as f32 * 18.0, 10.0, Material::WOOD));
            id += 1;
        }
    }
    for i in 1..200 {
        world.create_constraint(ConstraintConfig::new(ConstraintKind::Spring, i, Some(i + 1)), &bodies);
    }

    let report = world.step(&mut bodies, None);
    assert!(!report.collisions.is_empty());

    let stats = world.stats();
    assert_eq!(stats.body_count(), 1000);
    assert_eq!(stats.constraint_count(), 199);
    assert!(stats.step_ms() >= 0.0);
}
