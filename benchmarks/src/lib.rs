//! Shared world-building helpers for the physics benches.

use carom::{Body, BroadProxy, Collider, Obb, PhysicsConfig, PhysicsWorld, Transform, WorldObb};
use glam::{Mat4, Quat, Vec3};

/// Deterministic pseudo-random stream so benches are reproducible.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn unit(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / ((1u64 << 24) as f32)
    }

    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }
}

/// Broad-phase proxies scattered through a cube of the given half-size.
pub fn scattered_proxies(n: usize, half_size: f32) -> Vec<BroadProxy> {
    let mut rng = Lcg::new(0x5eed);
    (0..n)
        .map(|_| {
            let center = Vec3::new(
                rng.range(-half_size, half_size),
                rng.range(-half_size, half_size),
                rng.range(-half_size, half_size),
            );
            let extents = Vec3::new(
                rng.range(0.5, 2.0),
                rng.range(0.5, 2.0),
                rng.range(0.5, 2.0),
            );
            let rotation = Quat::from_rotation_y(rng.range(0.0, std::f32::consts::TAU));
            let obb = Obb::new(extents).expect("bench extents are valid");
            let world = WorldObb::new(&obb, Mat4::from_rotation_translation(rotation, center));
            BroadProxy::new(world.vertices)
        })
        .collect()
}

/// A pair of world boxes with the given center separation on X.
pub fn box_pair(separation: f32, yaw: f32) -> (WorldObb, WorldObb) {
    let obb = Obb::new(Vec3::ONE).expect("bench extents are valid");
    let a = WorldObb::new(&obb, Mat4::from_quat(Quat::from_rotation_y(yaw)));
    let b = WorldObb::new(
        &obb,
        Mat4::from_translation(Vec3::new(separation, 0.0, 0.0)),
    );
    (a, b)
}

/// An n-body pile of dynamic unit cubes over a static ground slab, all
/// registered with a fresh physics world.
pub fn setup_pile(n: usize) -> (hecs::World, PhysicsWorld) {
    let mut world = hecs::World::new();
    let mut physics = PhysicsWorld::new(PhysicsConfig::default());
    let mut rng = Lcg::new(0xcafe);

    let ground = world.spawn((
        Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
        Body::fixed(),
        Collider::new(Obb::new(Vec3::new(200.0, 1.0, 200.0)).expect("bench extents are valid")),
    ));
    physics.register(ground);

    let side = (n as f32).cbrt().ceil() as usize;
    let mut spawned = 0;
    'grid: for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                if spawned >= n {
                    break 'grid;
                }
                let jitter = Vec3::new(
                    rng.range(-0.1, 0.1),
                    0.0,
                    rng.range(-0.1, 0.1),
                );
                let position = Vec3::new(
                    x as f32 * 1.2 - side as f32 * 0.6,
                    y as f32 * 1.2 + 1.0,
                    z as f32 * 1.2 - side as f32 * 0.6,
                ) + jitter;
                let entity = world.spawn((
                    Transform::from_position(position),
                    Body::dynamic(1.0, 0.2).expect("bench body parameters are valid"),
                    Collider::new(Obb::new(Vec3::ONE).expect("bench extents are valid")),
                ));
                physics.register(entity);
                spawned += 1;
            }
        }
    }

    (world, physics)
}
