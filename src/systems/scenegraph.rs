//! Scene graph operations.
//!
//! Entities live in the ECS world; the tree on top of them is made of:
//! - the ordered root list, [`SceneRoots`]
//! - bevy's [`ChildOf`] / [`Children`] relationship for nested entities
//!
//! [`attach`] sets the child list entry and the parent back-reference in one
//! step and refuses to build a cycle. Removal never despawns on the spot: it
//! marks the entity in [`PendingRemovals`], and [`apply_pending_removals`]
//! despawns marked entities (with their subtrees) once the frame walk is over.
//! Removing an entity that is not where the caller says it is does nothing.

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;
use thiserror::Error;

use crate::components::mapposition::MapPosition;
use crate::resources::scene::{PendingRemovals, SceneRoots};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(Entity),
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: Entity, child: Entity },
}

fn ensure_exists(world: &World, entity: Entity) -> Result<(), SceneError> {
    if world.get_entity(entity).is_ok() {
        Ok(())
    } else {
        Err(SceneError::NoSuchEntity(entity))
    }
}

/// Append `entity` to the root list, detaching it from any parent.
pub fn add_root(world: &mut World, entity: Entity) -> Result<(), SceneError> {
    ensure_exists(world, entity)?;
    unmark_removal(world, entity);
    if world.get::<ChildOf>(entity).is_some() {
        world.entity_mut(entity).remove::<ChildOf>();
        world.flush();
    }
    if world.get_resource_or_init::<SceneRoots>().push(entity) {
        debug!("scene: root {:?} added", entity);
    }
    Ok(())
}

/// Make `child` the last child of `parent`.
///
/// A child that was a root leaves the root list; a child with another parent
/// moves over.
pub fn attach(world: &mut World, parent: Entity, child: Entity) -> Result<(), SceneError> {
    ensure_exists(world, parent)?;
    ensure_exists(world, child)?;
    if parent == child || is_ancestor(world, child, parent) {
        return Err(SceneError::Cycle { parent, child });
    }
    unmark_removal(world, child);
    if let Some(mut roots) = world.get_resource_mut::<SceneRoots>() {
        roots.remove(child);
    }
    world.entity_mut(child).insert(ChildOf(parent));
    world.flush();
    debug!("scene: {:?} attached under {:?}", child, parent);
    Ok(())
}

/// Spawn `bundle` and append it to the root list.
pub fn spawn_root<B: Bundle>(world: &mut World, bundle: B) -> Entity {
    let entity = world.spawn(bundle).id();
    world.get_resource_or_init::<SceneRoots>().push(entity);
    entity
}

/// Spawn `bundle` as the last child of `parent`.
pub fn spawn_child<B: Bundle>(world: &mut World, parent: Entity, bundle: B) -> Result<Entity, SceneError> {
    ensure_exists(world, parent)?;
    let entity = world.spawn((bundle, ChildOf(parent))).id();
    world.flush();
    Ok(entity)
}

/// Mark a root for removal. No-op unless `entity` is in the root list.
pub fn remove_root(world: &mut World, entity: Entity) -> bool {
    let is_root = world
        .get_resource::<SceneRoots>()
        .is_some_and(|roots| roots.contains(entity));
    is_root && mark_for_removal(world, entity)
}

/// Mark `child` for removal. No-op unless `child` is a child of `parent`.
pub fn remove_child(world: &mut World, parent: Entity, child: Entity) -> bool {
    parent_of(world, child) == Some(parent) && mark_for_removal(world, child)
}

/// Remove `entity` from whichever list owns it: its parent's children or the
/// root list.
pub fn detach(world: &mut World, entity: Entity) -> bool {
    match parent_of(world, entity) {
        Some(parent) => remove_child(world, parent, entity),
        None => remove_root(world, entity),
    }
}

fn mark_for_removal(world: &mut World, entity: Entity) -> bool {
    let marked = world.get_resource_or_init::<PendingRemovals>().mark(entity);
    if marked {
        debug!("scene: {:?} marked for removal", entity);
    }
    marked
}

/// A re-added entity is attached again and must survive the end of the walk.
fn unmark_removal(world: &mut World, entity: Entity) {
    if let Some(mut pending) = world.get_resource_mut::<PendingRemovals>() {
        if pending.unmark(entity) {
            debug!("scene: {:?} re-added, removal cancelled", entity);
        }
    }
}

/// Despawn every entity marked for removal, with its subtree.
pub fn apply_pending_removals(world: &mut World) {
    let Some(mut pending) = world.get_resource_mut::<PendingRemovals>() else {
        return;
    };
    let marked = pending.drain();
    if marked.is_empty() {
        return;
    }
    for entity in marked {
        if let Some(mut roots) = world.get_resource_mut::<SceneRoots>() {
            roots.remove(entity);
        }
        if world.get_entity(entity).is_ok() {
            world.despawn(entity);
            debug!("scene: {:?} despawned", entity);
        }
    }
    world.flush();
}

/// Whether `entity` is gone or sits under an entity marked for removal.
pub fn is_detached(world: &World, entity: Entity) -> bool {
    if world.get_entity(entity).is_err() {
        return true;
    }
    let Some(pending) = world.get_resource::<PendingRemovals>() else {
        return false;
    };
    if pending.is_empty() {
        return false;
    }
    let mut current = Some(entity);
    while let Some(e) = current {
        if pending.contains(e) {
            return true;
        }
        current = parent_of(world, e);
    }
    false
}

pub fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<ChildOf>(entity).map(|child_of| child_of.parent())
}

/// Children of `entity` in insertion order.
pub fn children_of(world: &World, entity: Entity) -> Vec<Entity> {
    world
        .get::<Children>(entity)
        .map(|children| children.to_vec())
        .unwrap_or_default()
}

/// Root entities in order.
pub fn roots(world: &World) -> Vec<Entity> {
    world
        .get_resource::<SceneRoots>()
        .map(|roots| roots.iter().collect())
        .unwrap_or_default()
}

/// Entities sharing `entity`'s parent (or the root list), excluding `entity`.
pub fn siblings_of(world: &World, entity: Entity) -> Vec<Entity> {
    let mut list = match parent_of(world, entity) {
        Some(parent) => children_of(world, parent),
        None => roots(world),
    };
    list.retain(|e| *e != entity);
    list
}

/// Whether `ancestor` appears on `entity`'s parent chain.
pub fn is_ancestor(world: &World, ancestor: Entity, entity: Entity) -> bool {
    let mut current = parent_of(world, entity);
    while let Some(e) = current {
        if e == ancestor {
            return true;
        }
        current = parent_of(world, e);
    }
    false
}

/// Local position plus the global position of the parent, if any.
///
/// Entities without a [`MapPosition`] count as sitting at the origin.
pub fn global_position(world: &World, entity: Entity) -> Vec2 {
    let local = world
        .get::<MapPosition>(entity)
        .map(|p| p.pos)
        .unwrap_or(Vec2::ZERO);
    match parent_of(world, entity) {
        Some(parent) => local + global_position(world, parent),
        None => local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_world() -> World {
        let mut world = World::new();
        world.init_resource::<SceneRoots>();
        world.init_resource::<PendingRemovals>();
        world
    }

    #[test]
    fn test_global_position_of_root_is_local() {
        let mut world = scene_world();
        let root = spawn_root(&mut world, MapPosition::new(3.0, 4.0));
        assert_eq!(global_position(&world, root), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_global_position_sums_parent_chain() {
        let mut world = scene_world();
        let a = spawn_root(&mut world, MapPosition::new(10.0, 10.0));
        let b = spawn_child(&mut world, a, MapPosition::new(5.0, -2.0)).unwrap();
        let c = spawn_child(&mut world, b, MapPosition::new(1.0, 1.0)).unwrap();
        assert_eq!(global_position(&world, c), Vec2::new(16.0, 9.0));
        assert_eq!(
            global_position(&world, c),
            world.get::<MapPosition>(c).unwrap().pos + global_position(&world, b)
        );
    }

    #[test]
    fn test_attach_moves_root_under_parent() {
        let mut world = scene_world();
        let parent = spawn_root(&mut world, MapPosition::default());
        let child = spawn_root(&mut world, MapPosition::default());
        attach(&mut world, parent, child).unwrap();
        assert_eq!(roots(&world), vec![parent]);
        assert_eq!(children_of(&world, parent), vec![child]);
        assert_eq!(parent_of(&world, child), Some(parent));
    }

    #[test]
    fn test_attach_rejects_cycles() {
        let mut world = scene_world();
        let a = spawn_root(&mut world, MapPosition::default());
        let b = spawn_child(&mut world, a, MapPosition::default()).unwrap();
        assert_eq!(
            attach(&mut world, b, a),
            Err(SceneError::Cycle { parent: b, child: a })
        );
        assert_eq!(
            attach(&mut world, a, a),
            Err(SceneError::Cycle { parent: a, child: a })
        );
    }

    #[test]
    fn test_add_root_detaches_from_parent() {
        let mut world = scene_world();
        let a = spawn_root(&mut world, MapPosition::default());
        let b = spawn_child(&mut world, a, MapPosition::default()).unwrap();
        add_root(&mut world, b).unwrap();
        assert_eq!(roots(&world), vec![a, b]);
        assert!(children_of(&world, a).is_empty());
    }

    #[test]
    fn test_remove_child_ignores_wrong_parent() {
        let mut world = scene_world();
        let a = spawn_root(&mut world, MapPosition::default());
        let b = spawn_root(&mut world, MapPosition::default());
        let c = spawn_child(&mut world, a, MapPosition::default()).unwrap();
        assert!(!remove_child(&mut world, b, c));
        assert!(!remove_root(&mut world, c));
        assert!(!is_detached(&world, c));
    }

    #[test]
    fn test_removal_is_deferred_until_applied() {
        let mut world = scene_world();
        let a = spawn_root(&mut world, MapPosition::default());
        let b = spawn_child(&mut world, a, MapPosition::default()).unwrap();
        assert!(remove_root(&mut world, a));
        assert!(world.get_entity(a).is_ok());
        assert!(is_detached(&world, b));

        apply_pending_removals(&mut world);
        assert!(world.get_entity(a).is_err());
        assert!(world.get_entity(b).is_err());
        assert!(roots(&world).is_empty());
    }

    #[test]
    fn test_siblings_exclude_self() {
        let mut world = scene_world();
        let a = spawn_root(&mut world, MapPosition::default());
        let b = spawn_root(&mut world, MapPosition::default());
        let c = spawn_root(&mut world, MapPosition::default());
        assert_eq!(siblings_of(&world, b), vec![a, c]);
    }

    #[test]
    fn test_operations_on_despawned_entities_fail() {
        let mut world = scene_world();
        let a = world.spawn_empty().id();
        world.despawn(a);
        assert_eq!(add_root(&mut world, a), Err(SceneError::NoSuchEntity(a)));
    }

    #[test]
    fn test_removed_root_added_back_survives() {
        let mut world = scene_world();
        let a = spawn_root(&mut world, MapPosition::default());
        let b = spawn_root(&mut world, MapPosition::default());
        assert!(remove_root(&mut world, a));
        add_root(&mut world, a).unwrap();
        assert!(!is_detached(&world, a));

        apply_pending_removals(&mut world);
        assert!(world.get_entity(a).is_ok());
        assert_eq!(roots(&world), vec![a, b]);
    }

    #[test]
    fn test_removed_entity_attached_elsewhere_survives() {
        let mut world = scene_world();
        let p = spawn_root(&mut world, MapPosition::default());
        let q = spawn_root(&mut world, MapPosition::default());
        let a = spawn_child(&mut world, p, MapPosition::default()).unwrap();
        let r = spawn_root(&mut world, MapPosition::default());
        assert!(remove_child(&mut world, p, a));
        assert!(remove_root(&mut world, r));
        attach(&mut world, q, a).unwrap();
        attach(&mut world, q, r).unwrap();

        apply_pending_removals(&mut world);
        assert!(world.get_entity(a).is_ok());
        assert!(world.get_entity(r).is_ok());
        assert_eq!(children_of(&world, q), vec![a, r]);
        assert_eq!(roots(&world), vec![p, q]);
    }
}
