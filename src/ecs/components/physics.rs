//! Physics components for ECS entities.

use glam::Vec3;

use crate::physics::contact::CollisionEvent;
use crate::physics::obb::Obb;
use crate::physics::PhysicsError;

/// What a body is, for collision response purposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    /// Scenery. Never moves, never responds.
    Static,
    /// Velocity-driven; zero effective mass in collision response.
    Kinematic,
    /// Mass-bearing; exchanges momentum via impulses.
    Dynamic {
        mass: f32,
        /// Bounce energy retention, 0..=1.
        restitution: f32,
        /// Infinite-mass override: participates in collisions but never
        /// yields.
        immovable: bool,
    },
}

/// A force applied over a bounded stretch of simulation time.
#[derive(Debug, Clone, Copy)]
pub struct TimedImpulse {
    pub force: Vec3,
    /// Seconds of simulation time left; purged once it reaches zero.
    pub remaining: f32,
}

/// Simulated body component.
///
/// Velocity and acceleration are shared by kinematic and dynamic bodies. For
/// kinematic bodies `acceleration` is externally set (commonly gravity) and
/// left untouched by the integrator; for dynamic bodies it is recomputed from
/// the net force every tick.
#[derive(Debug, Clone)]
pub struct Body {
    pub kind: BodyKind,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Multiplier on the configured gravity. Default 1.0.
    pub gravity_scale: f32,
    pub(crate) force: Vec3,
    pub(crate) impulses: Vec<TimedImpulse>,
}

impl Body {
    fn with_kind(kind: BodyKind) -> Self {
        Self {
            kind,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            gravity_scale: 1.0,
            force: Vec3::ZERO,
            impulses: Vec::new(),
        }
    }

    /// Create a static body.
    pub fn fixed() -> Self {
        Self::with_kind(BodyKind::Static)
    }

    /// Create a kinematic body.
    pub fn kinematic() -> Self {
        Self::with_kind(BodyKind::Kinematic)
    }

    /// Create a dynamic body. Mass must be positive and finite, restitution
    /// within 0..=1.
    pub fn dynamic(mass: f32, restitution: f32) -> Result<Self, PhysicsError> {
        if mass <= 0.0 || !mass.is_finite() {
            return Err(PhysicsError::InvalidMass(mass));
        }
        if !(0.0..=1.0).contains(&restitution) {
            return Err(PhysicsError::InvalidRestitution(restitution));
        }
        Ok(Self::with_kind(BodyKind::Dynamic {
            mass,
            restitution,
            immovable: false,
        }))
    }

    /// Create a dynamic body that collision response treats as infinitely
    /// massive.
    pub fn dynamic_immovable(mass: f32, restitution: f32) -> Result<Self, PhysicsError> {
        let mut body = Self::dynamic(mass, restitution)?;
        if let BodyKind::Dynamic { immovable, .. } = &mut body.kind {
            *immovable = true;
        }
        Ok(body)
    }

    /// Accumulate a persistent force for the next tick. A no-op for static
    /// and kinematic bodies.
    pub fn apply_force(&mut self, force: Vec3) {
        if matches!(self.kind, BodyKind::Dynamic { .. }) {
            self.force += force;
        }
    }

    /// Apply a force for `duration` seconds of simulation time. A no-op for
    /// static and kinematic bodies.
    pub fn apply_impulse(&mut self, force: Vec3, duration: f32) {
        if matches!(self.kind, BodyKind::Dynamic { .. }) {
            self.impulses.push(TimedImpulse {
                force,
                remaining: duration,
            });
        }
    }

    /// Inverse mass as seen by collision response: zero for anything that
    /// cannot yield (static, kinematic, immovable dynamic).
    pub fn inv_mass(&self) -> f32 {
        match self.kind {
            BodyKind::Dynamic {
                mass,
                immovable: false,
                ..
            } => 1.0 / mass,
            _ => 0.0,
        }
    }

    /// Restitution coefficient, present on dynamic bodies.
    pub fn restitution(&self) -> Option<f32> {
        match self.kind {
            BodyKind::Dynamic { restitution, .. } => Some(restitution),
            _ => None,
        }
    }

    /// Whether collision response may move this body at all.
    pub fn movable(&self) -> bool {
        match self.kind {
            BodyKind::Static => false,
            BodyKind::Kinematic => true,
            BodyKind::Dynamic { immovable, .. } => !immovable,
        }
    }
}

/// Collision component: exactly one oriented box per entity.
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    pub shape: Obb,
    /// Sensors report contacts but receive no physical response.
    pub is_sensor: bool,
}

impl Collider {
    pub fn new(shape: Obb) -> Self {
        Self {
            shape,
            is_sensor: false,
        }
    }

    pub fn sensor(shape: Obb) -> Self {
        Self {
            shape,
            is_sensor: true,
        }
    }
}

/// Per-entity mailbox for collision notifications. Attach to entities that
/// want to observe their contacts; cleared at the start of every tick.
#[derive(Debug, Default)]
pub struct CollisionEvents(pub Vec<CollisionEvent>);

/// Sleep state of a dynamic body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepState {
    Awake,
    Sleeping,
}

/// Opt-in sleep bookkeeping. Dynamic bodies carrying this component stop
/// integrating once they stay slow long enough, until a collision wakes them.
#[derive(Debug, Clone, Copy)]
pub struct SleepInfo {
    pub state: SleepState,
    pub timer: f32,
}

impl Default for SleepInfo {
    fn default() -> Self {
        Self {
            state: SleepState::Awake,
            timer: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_rejects_bad_mass() {
        assert!(Body::dynamic(0.0, 0.5).is_err());
        assert!(Body::dynamic(-1.0, 0.5).is_err());
        assert!(Body::dynamic(f32::NAN, 0.5).is_err());
        assert!(Body::dynamic(f32::INFINITY, 0.5).is_err());
        assert!(Body::dynamic(2.0, 0.5).is_ok());
    }

    #[test]
    fn test_dynamic_rejects_bad_restitution() {
        assert!(Body::dynamic(1.0, -0.1).is_err());
        assert!(Body::dynamic(1.0, 1.1).is_err());
        assert!(Body::dynamic(1.0, 0.0).is_ok());
        assert!(Body::dynamic(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_inv_mass_by_kind() {
        assert_eq!(Body::fixed().inv_mass(), 0.0);
        assert_eq!(Body::kinematic().inv_mass(), 0.0);
        assert_eq!(Body::dynamic(4.0, 0.5).unwrap().inv_mass(), 0.25);
        assert_eq!(Body::dynamic_immovable(4.0, 0.5).unwrap().inv_mass(), 0.0);
    }

    #[test]
    fn test_forces_ignored_on_non_dynamic() {
        let mut body = Body::kinematic();
        body.apply_force(Vec3::new(10.0, 0.0, 0.0));
        body.apply_impulse(Vec3::new(10.0, 0.0, 0.0), 1.0);
        assert_eq!(body.force, Vec3::ZERO);
        assert!(body.impulses.is_empty());
    }

    #[test]
    fn test_movable_by_kind() {
        assert!(!Body::fixed().movable());
        assert!(Body::kinematic().movable());
        assert!(Body::dynamic(1.0, 0.5).unwrap().movable());
        assert!(!Body::dynamic_immovable(1.0, 0.5).unwrap().movable());
    }
}
