//! Transform components for ECS entities.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Local-space transform. Stores position, rotation, and scale separately.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform from a position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform from a position and yaw/pitch/roll angles in
    /// radians.
    pub fn from_position_euler(position: Vec3, yaw: f32, pitch: f32, roll: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_euler(EulerRot::YXZ, yaw, pitch, roll),
            scale: Vec3::ONE,
        }
    }

    /// Move the transform by a world-space delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Convert to a 4x4 matrix (translation * rotation * scale).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Reference to a parent entity.
pub struct Parent(pub hecs::Entity);

/// List of child entities.
pub struct Children(pub Vec<hecs::Entity>);
