//! Falling Stack Demo - boxes dropping onto a ground slab, headless.
//!
//! Run: cargo run --manifest-path demos/falling_stack/Cargo.toml

use anyhow::Result;
use glam::Vec3;

use carom::{
    Body, Collider, CollisionEvents, Obb, PhysicsConfig, PhysicsWorld, Transform,
};

/// Boxes in the stack.
const STACK_HEIGHT: usize = 5;
/// Simulated seconds.
const DURATION: f32 = 5.0;

fn main() -> Result<()> {
    let mut world = hecs::World::new();
    let mut physics = PhysicsWorld::new(PhysicsConfig::default());

    // Ground slab.
    let ground = world.spawn((
        Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
        Body::fixed(),
        Collider::new(Obb::new(Vec3::new(40.0, 1.0, 40.0))?),
    ));
    physics.register(ground);

    // A loose stack of unit cubes, each slightly offset so the pile topples.
    let mut stack = Vec::new();
    for i in 0..STACK_HEIGHT {
        let entity = world.spawn((
            Transform::from_position(Vec3::new(
                0.15 * i as f32,
                1.5 * i as f32 + 2.0,
                0.0,
            )),
            Body::dynamic(1.0, 0.2)?,
            Collider::new(Obb::new(Vec3::ONE)?),
            CollisionEvents::default(),
        ));
        physics.register(entity);
        stack.push(entity);
    }

    // A kinematic sweeper sliding through the pile.
    let sweeper = world.spawn((
        Transform::from_position(Vec3::new(-8.0, 0.5, 0.0)),
        {
            let mut body = Body::kinematic();
            body.velocity = Vec3::new(2.0, 0.0, 0.0);
            body
        },
        Collider::new(Obb::new(Vec3::new(1.0, 1.0, 3.0))?),
    ));
    physics.register(sweeper);

    // Give the top box a sideways shove for the first half second.
    if let Some(&top) = stack.last() {
        world
            .get::<&mut Body>(top)?
            .apply_impulse(Vec3::new(3.0, 0.0, 0.0), 0.5);
    }

    let dt = 1.0 / 60.0;
    let steps = (DURATION / dt) as usize;
    let mut contacts = 0usize;
    for step in 0..steps {
        physics.tick(&mut world, dt);
        contacts += physics.events().len() / 2;

        if step % 60 == 0 {
            let time = step as f32 * dt;
            println!("t = {time:4.1}s  contacts so far: {contacts}");
            for (i, &entity) in stack.iter().enumerate() {
                let position = world.get::<&Transform>(entity)?.position;
                println!("  box {i}: ({:6.2}, {:6.2}, {:6.2})", position.x, position.y, position.z);
            }
        }
    }

    println!("done: {contacts} contacts over {DURATION}s");
    Ok(())
}
