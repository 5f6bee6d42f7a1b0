//! Contact data produced by the narrow phase and delivered to entities.

use glam::Vec3;

/// Result of a narrow-phase test: the minimum-translation axis and how far
/// along it the two boxes interpenetrate. Transient; produced and consumed
/// within a single tick.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Unit-length world-space contact normal, pointing from box B toward
    /// box A.
    pub normal: Vec3,
    /// Non-negative penetration depth along `normal`.
    pub depth: f32,
}

/// Collision notification delivered to an entity during resolution.
#[derive(Debug, Clone, Copy)]
pub struct CollisionEvent {
    /// The other entity in the colliding pair.
    pub other: hecs::Entity,
    /// Contact normal pointing toward the receiving entity.
    pub normal: Vec3,
    /// Penetration depth along `normal`.
    pub depth: f32,
}
