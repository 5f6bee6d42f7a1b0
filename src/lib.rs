//! Carom - a real-time rigid-body collision engine.
//!
//! Oriented-box colliders attached to `hecs` entities, a separating-axis
//! narrow phase, pluggable broad-phase partitioning, and an impulse-based
//! integrator, composed by an explicit [`PhysicsWorld`] owned by the
//! simulation loop.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **ecs** - transform and physics components, parent-chain composition
//! 2. **physics::obb** - oriented boxes and interval projections
//! 3. **physics::narrowphase** - exact SAT pair test
//! 4. **physics::broadphase** - candidate-pair production strategies
//! 5. **physics::registry** - the active collider set
//! 6. **physics::resolver** - integration and collision response
//! 7. **physics** - `PhysicsWorld` orchestrator and configuration

pub mod ecs;
pub mod physics;

// Re-export commonly used types
pub use ecs::components::physics::{
    Body, BodyKind, Collider, CollisionEvents, SleepInfo, SleepState, TimedImpulse,
};
pub use ecs::components::transform::{Children, Parent, Transform};
pub use ecs::systems::transform::global_transform;

pub use physics::broadphase::{BroadPhase, BroadProxy, OctantSplit, UniformGrid};
pub use physics::contact::{CollisionEvent, Contact};
pub use physics::narrowphase::{sat_test, NarrowPhase, SeparatingAxis};
pub use physics::obb::{Obb, Projection, WorldObb};
pub use physics::registry::ColliderRegistry;
pub use physics::{PhysicsConfig, PhysicsError, PhysicsWorld};
