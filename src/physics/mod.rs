//! Collision engine core: broad phase, narrow phase, registry, resolution.
//!
//! # Architecture
//!
//! One tick runs:
//!
//! 1. Force accumulation (gravity, applied forces, timed impulses)
//! 2. Acceleration update
//! 3. Velocity integration (semi-implicit Euler)
//! 4. Position integration in equal sub-steps, re-detecting and resolving
//!    collisions after each sub-step
//! 5. Force accumulator clear and sleep bookkeeping
//!
//! Detection itself is broad phase (bucketed candidate pairs, pre-filtered by
//! world-axis interval overlap) followed by the exact SAT narrow phase, with
//! surviving pairs resolved in a stable order.

pub mod broadphase;
pub mod contact;
pub mod narrowphase;
pub mod obb;
pub mod registry;
pub mod resolver;

use glam::Vec3;
use hecs::{Entity, World};
use thiserror::Error;

use crate::ecs::components::physics::{Body, Collider, CollisionEvents};
use crate::ecs::systems::transform::global_transform;

use self::broadphase::{BroadPhase, BroadProxy, UniformGrid};
use self::contact::CollisionEvent;
use self::narrowphase::{NarrowPhase, SeparatingAxis};
use self::obb::WorldObb;
use self::registry::ColliderRegistry;

/// Construction-time validation failures.
#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("dynamic body mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    #[error("restitution must lie in 0..=1, got {0}")]
    InvalidRestitution(f32),
    #[error("box extents must be non-negative and finite, got {0}")]
    InvalidExtents(Vec3),
}

/// Configuration for the physics simulation.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector. Default: (0, -9.81, 0).
    pub gravity: Vec3,
    /// Equal position-integration sub-steps per tick. Default: 5.
    pub substeps: u32,
    /// Broad-phase grid buckets per axis. Default: 4.
    pub cells_per_axis: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            substeps: 5,
            cells_per_axis: 4,
        }
    }
}

/// The main physics world managing simulation state.
///
/// Owned by the simulation loop and handed the ECS world every tick. All
/// state lives here; there are no process-wide statics.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    broadphase: Box<dyn BroadPhase>,
    narrowphase: Box<dyn NarrowPhase>,
    registry: ColliderRegistry,
    events: Vec<(Entity, CollisionEvent)>,
}

impl PhysicsWorld {
    /// Create a physics world with the default strategies (uniform grid +
    /// separating-axis test).
    pub fn new(config: PhysicsConfig) -> Self {
        let grid = UniformGrid::new(config.cells_per_axis);
        Self::with_strategies(config, Box::new(grid), Box::new(SeparatingAxis))
    }

    /// Create a physics world with explicit broad/narrow-phase strategies.
    pub fn with_strategies(
        config: PhysicsConfig,
        broadphase: Box<dyn BroadPhase>,
        narrowphase: Box<dyn NarrowPhase>,
    ) -> Self {
        Self {
            config,
            broadphase,
            narrowphase,
            registry: ColliderRegistry::new(),
            events: Vec::new(),
        }
    }

    /// Register an entity's collider when it enters the simulated world.
    /// Adding twice is a no-op.
    pub fn register(&mut self, entity: Entity) -> bool {
        let added = self.registry.add(entity);
        if added {
            tracing::debug!(?entity, "collider registered");
        }
        added
    }

    /// Deregister an entity's collider when it exits the simulated world.
    /// Removing an absent entity is a no-op.
    pub fn deregister(&mut self, entity: Entity) -> bool {
        self.registry.remove(entity)
    }

    pub fn registry(&self) -> &ColliderRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Collision events delivered during the most recent tick, in delivery
    /// order.
    pub fn events(&self) -> &[(Entity, CollisionEvent)] {
        &self.events
    }

    /// Advance all registered bodies by one simulation step of `dt` seconds.
    pub fn tick(&mut self, world: &mut World, dt: f32) {
        self.events.clear();
        for (_, events) in world.query_mut::<&mut CollisionEvents>() {
            events.0.clear();
        }

        resolver::accumulate_forces(world, self.config.gravity, dt);
        resolver::update_accelerations(world);
        resolver::integrate_velocities(world, dt);

        let substeps = self.config.substeps.max(1);
        let sub_dt = dt / substeps as f32;
        for _ in 0..substeps {
            resolver::integrate_positions(world, sub_dt);
            self.detect_and_resolve(world);
        }

        resolver::clear_forces(world);
        resolver::update_sleep_states(world, dt);
    }

    fn detect_and_resolve(&mut self, world: &mut World) {
        // Snapshot world-space boxes for every registered collider still
        // alive; entities despawned without deregistering are skipped.
        let mut entries: Vec<(Entity, bool)> = Vec::with_capacity(self.registry.len());
        let mut boxes: Vec<WorldObb> = Vec::with_capacity(self.registry.len());
        let mut proxies: Vec<BroadProxy> = Vec::with_capacity(self.registry.len());
        for &entity in self.registry.all() {
            let collider = match world.get::<&Collider>(entity) {
                Ok(collider) => *collider,
                Err(_) => continue,
            };
            let matrix = global_transform(world, entity);
            let world_box = WorldObb::new(&collider.shape, matrix);
            entries.push((entity, collider.is_sensor));
            proxies.push(BroadProxy::new(world_box.vertices));
            boxes.push(world_box);
        }

        let mut pairs = self.broadphase.candidate_pairs(&proxies);
        tracing::trace!(
            colliders = proxies.len(),
            candidates = pairs.len(),
            broadphase = self.broadphase.name(),
            "collision candidates"
        );

        // Stable resolution order: by entity id, not bucket or registration
        // order.
        pairs.sort_by_key(|&(i, j)| {
            let (ea, _) = entries[i];
            let (eb, _) = entries[j];
            if ea < eb {
                (ea, eb)
            } else {
                (eb, ea)
            }
        });

        for (i, j) in pairs {
            let (entity_a, sensor_a) = entries[i];
            let (entity_b, sensor_b) = entries[j];

            // A pair neither member of which can move has nothing to resolve.
            if !body_movable(world, entity_a) && !body_movable(world, entity_b) {
                continue;
            }

            let contact = match self.narrowphase.test(&boxes[i], &boxes[j]) {
                Some(contact) => contact,
                None => continue,
            };

            resolver::wake(world, entity_a);
            resolver::wake(world, entity_b);

            if !sensor_a && !sensor_b {
                resolver::resolve(world, entity_a, entity_b, &contact);
            }

            // Notify after the physics-internal response; the normal handed
            // to each entity points toward it.
            let event_a = CollisionEvent {
                other: entity_b,
                normal: contact.normal,
                depth: contact.depth,
            };
            let event_b = CollisionEvent {
                other: entity_a,
                normal: -contact.normal,
                depth: contact.depth,
            };
            notify(world, entity_a, event_a);
            notify(world, entity_b, event_b);
            self.events.push((entity_a, event_a));
            self.events.push((entity_b, event_b));
        }
    }
}

fn body_movable(world: &World, entity: Entity) -> bool {
    world
        .get::<&Body>(entity)
        .map(|body| body.movable())
        .unwrap_or(false)
}

fn notify(world: &mut World, entity: Entity, event: CollisionEvent) {
    if let Ok(mut events) = world.get::<&mut CollisionEvents>(entity) {
        events.0.push(event);
    }
}
