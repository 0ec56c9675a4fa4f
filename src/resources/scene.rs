//! Scene graph bookkeeping resources.
//!
//! - [`SceneRoots`] – ordered list of root-level entities; list order is the
//!   update and render order of the frame walk
//! - [`PendingRemovals`] – entities detached during a frame walk, despawned
//!   once the walk completes
//!
//! Both are mutated through [`crate::systems::scenegraph`]; gameplay code should
//! not edit them directly.

use bevy_ecs::prelude::*;

/// Root-level entities in insertion order.
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneRoots {
    entities: Vec<Entity>,
}

impl SceneRoots {
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Append `entity` unless it is already a root.
    pub(crate) fn push(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    pub(crate) fn remove(&mut self, entity: Entity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| *e != entity);
        before != self.entities.len()
    }
}

/// Entities marked for removal but not despawned yet.
#[derive(Resource, Debug, Clone, Default)]
pub struct PendingRemovals {
    entities: Vec<Entity>,
}

impl PendingRemovals {
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub(crate) fn mark(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.entities.push(entity);
        true
    }

    /// Drop the mark on `entity`, if any.
    pub(crate) fn unmark(&mut self, entity: Entity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| *e != entity);
        before != self.entities.len()
    }

    pub(crate) fn drain(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roots_keep_insertion_order_and_reject_duplicates() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut roots = SceneRoots::default();
        assert!(roots.push(a));
        assert!(roots.push(b));
        assert!(!roots.push(a));
        assert_eq!(roots.iter().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_removing_absent_root_is_noop() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut roots = SceneRoots::default();
        roots.push(a);
        assert!(!roots.remove(b));
        assert_eq!(roots.len(), 1);
    }

    #[test]
    fn test_pending_marks_once_and_drains() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let mut pending = PendingRemovals::default();
        assert!(pending.mark(a));
        assert!(!pending.mark(a));
        assert_eq!(pending.drain(), vec![a]);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_unmark_drops_only_that_entity() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut pending = PendingRemovals::default();
        pending.mark(a);
        pending.mark(b);
        assert!(pending.unmark(a));
        assert!(!pending.unmark(a));
        assert!(!pending.contains(a));
        assert_eq!(pending.drain(), vec![b]);
    }
}
