//! Global transform composition along the parent chain.

use glam::Mat4;
use hecs::{Entity, World};

use crate::ecs::components::transform::{Parent, Transform};

/// Compose an entity's world matrix from its local transform and parent
/// chain (translation ∘ rotation ∘ scale at each level).
///
/// Recomputed on every call; nothing is cached across frames, so the result
/// always reflects current component state. A root entity's global transform
/// equals its own local transform. An entity without a `Transform`
/// contributes identity.
pub fn global_transform(world: &World, entity: Entity) -> Mat4 {
    let local = world
        .get::<&Transform>(entity)
        .map(|t| t.to_matrix())
        .unwrap_or(Mat4::IDENTITY);

    match world.get::<&Parent>(entity) {
        Ok(parent) => global_transform(world, parent.0) * local,
        Err(_) => local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn test_root_equals_local() {
        let mut world = World::new();
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let entity = world.spawn((t,));

        assert_eq!(global_transform(&world, entity), t.to_matrix());
    }

    #[test]
    fn test_child_composes_with_parent() {
        let mut world = World::new();
        let parent_t = Transform::from_position_euler(
            Vec3::new(1.0, 0.0, 0.0),
            std::f32::consts::FRAC_PI_2,
            0.0,
            0.0,
        );
        let child_t = Transform::from_position(Vec3::new(0.0, 2.0, 0.0));

        let parent = world.spawn((parent_t,));
        let child = world.spawn((child_t, Parent(parent)));

        // The invariant: child.global == parent.global * child.local, exactly.
        let expected = global_transform(&world, parent) * child_t.to_matrix();
        assert_eq!(global_transform(&world, child), expected);
    }

    #[test]
    fn test_three_level_hierarchy() {
        let mut world = World::new();
        let grandparent = world.spawn((Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),));
        let parent = world.spawn((
            Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
            Parent(grandparent),
        ));
        let child = world.spawn((
            Transform::from_position(Vec3::new(0.0, 0.0, 1.0)),
            Parent(parent),
        ));

        let global = global_transform(&world, child);
        let position = global.transform_point3(Vec3::ZERO);
        let eps = 1e-5;
        assert!((position - Vec3::new(1.0, 1.0, 1.0)).length() < eps);
    }

    #[test]
    fn test_scaled_parent_scales_child_position() {
        let mut world = World::new();
        let parent = world.spawn((Transform {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(2.0),
        },));
        let child = world.spawn((
            Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
            Parent(parent),
        ));

        let position = global_transform(&world, child).transform_point3(Vec3::ZERO);
        let eps = 1e-5;
        assert!((position - Vec3::new(2.0, 0.0, 0.0)).length() < eps);
    }

    #[test]
    fn test_missing_transform_contributes_identity() {
        let mut world = World::new();
        let bare = world.spawn(());
        assert_eq!(global_transform(&world, bare), Mat4::IDENTITY);
    }
}
