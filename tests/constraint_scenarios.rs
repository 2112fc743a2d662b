use motion_physics::{Body, CollisionWorld, ConstraintConfig, ConstraintKind, ConstraintStatus, Material, Vec2};

const DT: f32 = 1.0 / 60.0;

fn puck(id: u32, x: f32, y: f32) -> Body {
    Body::circle(id, x, y, 5.0, Material::STONE).with_mass(1.0)
}

#[test]
fn rest_length_defaults_to_initial_distance() {
    let mut world = CollisionWorld::new();
    let mut bodies = vec![puck(1, 0.0, 0.0), puck(2, 30.0, 40.0)];
    let before = bodies.clone();

    for kind in [ConstraintKind::Distance, ConstraintKind::Rope, ConstraintKind::Weld] {
        let id = world
            .create_constraint(ConstraintConfig::new(kind, 1, Some(2)), &bodies)
            .unwrap();
        assert!((world.get_constraint(id).unwrap().rest_length - 50.0).abs() < 1e-4);
    }

    world.update_constraints(&mut bodies, Some(DT));
    for (after, before) in bodies.iter().zip(&before) {
        assert!(after.position.distance(before.position) < 1e-4);
    }
}

#[test]
fn stretched_spring_pulls_both_bodies_inward() {
    let mut world = CollisionWorld::new();
    let mut bodies = vec![puck(1, 0.0, 0.0), puck(2, 150.0, 0.0)];
    world.create_constraint(
        ConstraintConfig::new(ConstraintKind::Spring, 1, Some(2))
            .with_length(100.0)
            .with_stiffness(0.5)
            .with_damping(0.0),
        &bodies,
    );

    world.update_constraints(&mut bodies, Some(DT));

    let expected = 0.5 * 50.0 * DT;
    assert!((bodies[0].velocity.x - expected).abs() < 1e-5);
    assert!((bodies[1].velocity.x + expected).abs() < 1e-5);
    assert_eq!(bodies[0].velocity.y, 0.0);
}

#[test]
fn broken_constraints_stay_broken_and_inert() {
    let mut world = CollisionWorld::new();
    let mut bodies = vec![puck(1, 0.0, 0.0), puck(2, 100.0, 0.0)];
    let id = world
        .create_constraint(
            ConstraintConfig::new(ConstraintKind::Distance, 1, Some(2)).breakable(10.0),
            &bodies,
        )
        .unwrap();

    bodies[1].position.x = 150.0;
    assert_eq!(world.update_constraints(&mut bodies, Some(DT)), vec![id]);

    let state = world.get_constraint_state(id).unwrap();
    assert_eq!(state.status, ConstraintStatus::Broken { force: 50.0 });

    // Pull the bodies back together; the broken joint must not react
    bodies[1].position.x = 20.0;
    let snapshot = bodies.clone();
    for _ in 0..3 {
        assert!(world.update_constraints(&mut bodies, Some(DT)).is_empty());
        assert_eq!(world.get_constraint_state(id).unwrap(), state);
    }
    assert_eq!(bodies, snapshot);
    assert_eq!(world.stats().broken_constraints(), 1);
    assert_eq!(world.stats().active_constraints(), 0);
}

#[test]
fn unbreakable_constraints_ignore_large_forces() {
    let mut world = CollisionWorld::new();
    let mut bodies = vec![puck(1, 0.0, 0.0), puck(2, 10.0, 0.0)];
    let id = world
        .create_constraint(ConstraintConfig::new(ConstraintKind::Distance, 1, Some(2)), &bodies)
        .unwrap();
    bodies[1].position.x = 5000.0;
    assert!(world.update_constraints(&mut bodies, Some(DT)).is_empty());
    assert!(!world.get_constraint(id).unwrap().is_broken());
}

#[test]
fn pin_without_second_body_holds_its_world_point() {
    let mut world = CollisionWorld::new();
    let mut bodies = vec![puck(1, 0.0, 0.0)];
    world.create_constraint(
        ConstraintConfig::new(ConstraintKind::Pin, 1, None).with_world_point(Vec2::new(0.0, -100.0)),
        &bodies,
    );

    let mut last = f32::MAX;
    for _ in 0..10 {
        world.update_constraints(&mut bodies, Some(DT));
        let gap = bodies[0].position.distance(Vec2::new(0.0, -100.0));
        assert!(gap < last);
        last = gap;
    }
}

#[test]
fn unknown_bodies_are_rejected() {
    let mut world = CollisionWorld::new();
    let bodies = vec![puck(1, 0.0, 0.0)];
    assert!(world
        .create_constraint(ConstraintConfig::new(ConstraintKind::Spring, 1, Some(42)), &bodies)
        .is_none());
    assert!(world
        .create_constraint(ConstraintConfig::new(ConstraintKind::Pin, 7, None), &bodies)
        .is_none());
    assert!(world.constraints().is_empty());
}

#[test]
fn spring_from_static_anchor_pulls_body_back() {
    let mut world = CollisionWorld::new();
    let mut bodies = vec![
        Body::circle(1, 0.0, 0.0, 5.0, Material::STONE).fixed(),
        puck(2, 100.0, 0.0),
    ];
    world.create_constraint(
        ConstraintConfig::new(ConstraintKind::Spring, 1, Some(2))
            .with_length(50.0)
            .with_stiffness(0.5)
            .with_damping(0.0),
        &bodies,
    );

    world.update_constraints(&mut bodies, Some(DT));

    assert_eq!(bodies[0].velocity, Vec2::ZERO);
    let v = bodies[1].velocity;
    assert!(v.x < 0.0);
    assert!((v.length() - 0.5 * (100.0 - 50.0) * DT).abs() < 1e-5);
}
