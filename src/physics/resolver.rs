//! Body integration and collision response.
//!
//! Free functions over the ECS world, invoked by [`PhysicsWorld::tick`] in
//! order: force accumulation, acceleration update, semi-implicit Euler
//! velocity integration, sub-stepped position integration, and per-pair
//! response.
//!
//! [`PhysicsWorld::tick`]: crate::physics::PhysicsWorld::tick

use glam::Vec3;
use hecs::{Entity, World};

use crate::ecs::components::physics::{Body, BodyKind, SleepInfo, SleepState};
use crate::ecs::components::transform::Transform;

use super::contact::Contact;

/// Linear speed below which a body becomes eligible to sleep.
const SLEEP_LINEAR_THRESHOLD: f32 = 0.1;
/// Seconds a body must stay below the threshold before sleeping.
const SLEEP_TIME: f32 = 1.0;

fn is_sleeping(sleep: Option<&SleepInfo>) -> bool {
    sleep.map_or(false, |s| s.state == SleepState::Sleeping)
}

/// Fold gravity, applied forces and active timed impulses into each dynamic
/// body's accumulator, and advance impulse timers by one tick. Expired
/// impulses are purged.
pub fn accumulate_forces(world: &mut World, gravity: Vec3, dt: f32) {
    for (_, (body, sleep)) in world.query_mut::<(&mut Body, Option<&SleepInfo>)>() {
        if is_sleeping(sleep) {
            continue;
        }
        let mass = match body.kind {
            BodyKind::Dynamic { mass, .. } => mass,
            _ => continue,
        };

        body.force += gravity * mass * body.gravity_scale;
        let mut impulse_sum = Vec3::ZERO;
        for impulse in &mut body.impulses {
            impulse_sum += impulse.force;
            impulse.remaining -= dt;
        }
        body.force += impulse_sum;
        body.impulses.retain(|impulse| impulse.remaining > 0.0);
    }
}

/// Recompute dynamic accelerations from the accumulated net force. Kinematic
/// bodies keep whatever acceleration was set on them externally.
pub fn update_accelerations(world: &mut World) {
    for (_, body) in world.query_mut::<&mut Body>() {
        let (mass, immovable) = match body.kind {
            BodyKind::Dynamic {
                mass, immovable, ..
            } => (mass, immovable),
            _ => continue,
        };
        // Infinite mass: no force can accelerate it.
        body.acceleration = if immovable {
            Vec3::ZERO
        } else {
            body.force / mass
        };
    }
}

/// Semi-implicit Euler: `velocity += acceleration * dt`.
pub fn integrate_velocities(world: &mut World, dt: f32) {
    for (_, (body, sleep)) in world.query_mut::<(&mut Body, Option<&SleepInfo>)>() {
        if matches!(body.kind, BodyKind::Static) || is_sleeping(sleep) {
            continue;
        }
        body.velocity += body.acceleration * dt;
    }
}

/// `position += velocity * dt` for every non-static, awake body.
pub fn integrate_positions(world: &mut World, dt: f32) {
    for (_, (body, transform, sleep)) in
        world.query_mut::<(&Body, &mut Transform, Option<&SleepInfo>)>()
    {
        if matches!(body.kind, BodyKind::Static) || is_sleeping(sleep) {
            continue;
        }
        transform.translate(body.velocity * dt);
    }
}

/// Reset force accumulators after a tick.
pub fn clear_forces(world: &mut World) {
    for (_, body) in world.query_mut::<&mut Body>() {
        body.force = Vec3::ZERO;
    }
}

/// Advance sleep timers; dynamic bodies below the speed threshold long
/// enough stop integrating until something wakes them.
pub fn update_sleep_states(world: &mut World, dt: f32) {
    for (_, (body, sleep)) in world.query_mut::<(&mut Body, &mut SleepInfo)>() {
        if !matches!(body.kind, BodyKind::Dynamic { .. }) {
            continue;
        }
        if body.velocity.length() < SLEEP_LINEAR_THRESHOLD {
            sleep.timer += dt;
            if sleep.timer >= SLEEP_TIME && sleep.state == SleepState::Awake {
                sleep.state = SleepState::Sleeping;
                body.velocity = Vec3::ZERO;
            }
        } else {
            sleep.timer = 0.0;
            sleep.state = SleepState::Awake;
        }
    }
}

/// Wake an entity's body if it is sleeping.
pub fn wake(world: &mut World, entity: Entity) {
    if let Ok(mut sleep) = world.get::<&mut SleepInfo>(entity) {
        if sleep.state == SleepState::Sleeping {
            sleep.state = SleepState::Awake;
            sleep.timer = 0.0;
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum PartyKind {
    Static,
    Kinematic,
    Dynamic,
}

/// Snapshot of one side of a colliding pair, read up front so the response
/// math never holds component borrows.
#[derive(Clone, Copy)]
struct Party {
    kind: PartyKind,
    inv_mass: f32,
    restitution: Option<f32>,
    velocity: Vec3,
    movable: bool,
}

fn party(world: &World, entity: Entity) -> Party {
    match world.get::<&Body>(entity) {
        Ok(body) => Party {
            kind: match body.kind {
                BodyKind::Static => PartyKind::Static,
                BodyKind::Kinematic => PartyKind::Kinematic,
                BodyKind::Dynamic { .. } => PartyKind::Dynamic,
            },
            inv_mass: body.inv_mass(),
            restitution: body.restitution(),
            velocity: body.velocity,
            movable: body.movable(),
        },
        // A collider without a body is scenery.
        Err(_) => Party {
            kind: PartyKind::Static,
            inv_mass: 0.0,
            restitution: None,
            velocity: Vec3::ZERO,
            movable: false,
        },
    }
}

fn add_velocity(world: &mut World, entity: Entity, delta: Vec3) {
    if let Ok(mut body) = world.get::<&mut Body>(entity) {
        body.velocity += delta;
    }
}

/// Project velocity onto the plane orthogonal to `normal`, removing the
/// into-surface component only.
fn slide(world: &mut World, entity: Entity, normal: Vec3) {
    if let Ok(mut body) = world.get::<&mut Body>(entity) {
        let vn = body.velocity.dot(normal);
        if vn < 0.0 {
            body.velocity -= normal * vn;
        }
    }
}

/// Resolve one colliding pair. `contact.normal` points from `b` toward `a`.
///
/// Positional correction pushes the bodies apart along the normal by the
/// penetration depth: split by inverse mass between two movable dynamic
/// bodies, absorbed entirely by the only movable party otherwise, and split
/// evenly between two kinematic bodies. Velocity response is dispatched on
/// the pair's kinds.
pub fn resolve(world: &mut World, a: Entity, b: Entity, contact: &Contact) {
    let pa = party(world, a);
    let pb = party(world, b);

    let inv_sum = pa.inv_mass + pb.inv_mass;
    let (push_a, push_b) = match (pa.movable, pb.movable) {
        (true, true) => {
            if inv_sum > 0.0 {
                (pa.inv_mass / inv_sum, pb.inv_mass / inv_sum)
            } else {
                // Two kinematic bodies: neither has mass, both yield.
                (0.5, 0.5)
            }
        }
        (true, false) => (1.0, 0.0),
        (false, true) => (0.0, 1.0),
        (false, false) => (0.0, 0.0),
    };

    if push_a > 0.0 {
        if let Ok(mut transform) = world.get::<&mut Transform>(a) {
            transform.translate(contact.normal * (contact.depth * push_a));
        }
    }
    if push_b > 0.0 {
        if let Ok(mut transform) = world.get::<&mut Transform>(b) {
            transform.translate(-contact.normal * (contact.depth * push_b));
        }
    }

    match (pa.kind, pb.kind) {
        (PartyKind::Dynamic, PartyKind::Dynamic) => {
            if inv_sum > 0.0 {
                let vn = (pa.velocity - pb.velocity).dot(contact.normal);
                // Impulses only apply to approaching bodies; separating pairs
                // must not be pulled back together.
                if vn < 0.0 {
                    let e = pa
                        .restitution
                        .unwrap_or(0.0)
                        .min(pb.restitution.unwrap_or(0.0));
                    let j = -(1.0 + e) * vn / inv_sum;
                    add_velocity(world, a, contact.normal * (j * pa.inv_mass));
                    add_velocity(world, b, -contact.normal * (j * pb.inv_mass));
                }
            }
        }
        (PartyKind::Dynamic, _) => {
            // The other side cannot yield: impulse against infinite mass.
            if pa.inv_mass > 0.0 {
                let vn = (pa.velocity - pb.velocity).dot(contact.normal);
                if vn < 0.0 {
                    let e = pa.restitution.unwrap_or(0.0);
                    add_velocity(world, a, contact.normal * (-(1.0 + e) * vn));
                }
            }
        }
        (_, PartyKind::Dynamic) => {
            if pb.inv_mass > 0.0 {
                let vn = (pa.velocity - pb.velocity).dot(contact.normal);
                if vn < 0.0 {
                    let e = pb.restitution.unwrap_or(0.0);
                    add_velocity(world, b, contact.normal * ((1.0 + e) * vn));
                }
            }
        }
        (PartyKind::Kinematic, PartyKind::Kinematic) => {
            slide(world, a, contact.normal);
            slide(world, b, -contact.normal);
        }
        (PartyKind::Kinematic, PartyKind::Static) => slide(world, a, contact.normal),
        (PartyKind::Static, PartyKind::Kinematic) => slide(world, b, -contact.normal),
        (PartyKind::Static, PartyKind::Static) => {}
    }
}
