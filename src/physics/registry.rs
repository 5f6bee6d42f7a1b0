//! The set of currently collidable entities.

use std::collections::HashMap;

use hecs::Entity;

/// Registry of active colliders.
///
/// Membership is a set: adding an entity twice is a no-op, as is removing one
/// that is not present (entity lifecycles may fire exit hooks more than once).
/// Membership changes only at enter/exit boundaries, never mid-tick.
#[derive(Debug, Default)]
pub struct ColliderRegistry {
    entities: Vec<Entity>,
    index: HashMap<Entity, usize>,
}

impl ColliderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity. Returns `false` if it was already registered.
    pub fn add(&mut self, entity: Entity) -> bool {
        if self.index.contains_key(&entity) {
            return false;
        }
        self.index.insert(entity, self.entities.len());
        self.entities.push(entity);
        true
    }

    /// Remove an entity. Removing an absent entity is a no-op returning
    /// `false`.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let slot = match self.index.remove(&entity) {
            Some(slot) => slot,
            None => return false,
        };
        self.entities.swap_remove(slot);
        if let Some(&moved) = self.entities.get(slot) {
            self.index.insert(moved, slot);
        }
        true
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    /// All registered entities. Order is unspecified; downstream pair
    /// ordering never depends on it.
    pub fn all(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(n: u32) -> (hecs::World, Vec<Entity>) {
        let mut world = hecs::World::new();
        let spawned = (0..n).map(|_| world.spawn(())).collect();
        (world, spawned)
    }

    #[test]
    fn test_add_is_set_like() {
        let (_world, e) = entities(2);
        let mut registry = ColliderRegistry::new();

        assert!(registry.add(e[0]));
        assert!(registry.add(e[1]));
        assert!(!registry.add(e[0]));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (_world, e) = entities(2);
        let mut registry = ColliderRegistry::new();
        registry.add(e[0]);

        assert!(!registry.remove(e[1]));
        assert_eq!(registry.len(), 1);

        // Double-exit: the second remove must be tolerated.
        assert!(registry.remove(e[0]));
        assert!(!registry.remove(e[0]));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_keeps_remaining_members() {
        let (_world, e) = entities(4);
        let mut registry = ColliderRegistry::new();
        for &entity in &e {
            registry.add(entity);
        }

        registry.remove(e[1]);
        assert!(!registry.contains(e[1]));
        for &entity in [e[0], e[2], e[3]].iter() {
            assert!(registry.contains(entity));
        }
        assert_eq!(registry.len(), 3);

        // Indices must stay consistent after the swap-remove.
        registry.remove(e[3]);
        assert!(registry.contains(e[0]));
        assert!(registry.contains(e[2]));
        assert_eq!(registry.len(), 2);
    }
}
