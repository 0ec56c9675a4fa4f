//! Per-frame entity walk.
//!
//! [`run_frame`] clears the canvas, then walks every root subtree depth-first.
//! For each node:
//!
//! ```text
//! save -> before_render -> translate(pos) -> rotate(dir) -> render
//!      -> [children, in order] -> after_render -> restore
//! ```
//!
//! The tree is snapshotted into [`WalkStep`]s before any hook runs. Entities
//! spawned by hooks are attached right away but only get visited next frame.
//! Removed entities are only marked; marked subtrees are skipped and despawned
//! once the walk is over.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::canvas::Canvas2D;
use crate::components::behavior::{Behavior, EntityHooks};
use crate::components::direction::Direction;
use crate::components::mapposition::MapPosition;
use crate::resources::canvassize::CanvasSize;
use crate::resources::enginestate::{EngineState, EngineStates};
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::systems::scenegraph;

/// What a hook sees of the engine while it runs.
pub struct FrameContext<'a> {
    pub world: &'a mut World,
    pub canvas: &'a mut dyn Canvas2D,
    /// Entity whose hook is running.
    pub entity: Entity,
    /// Elapsed world time at the start of the frame.
    pub time: f32,
}

impl FrameContext<'_> {
    pub fn position(&self) -> Vec2 {
        self.world
            .get::<MapPosition>(self.entity)
            .map(|p| p.pos)
            .unwrap_or(Vec2::ZERO)
    }

    pub fn set_position(&mut self, pos: Vec2) {
        if let Some(mut p) = self.world.get_mut::<MapPosition>(self.entity) {
            p.pos = pos;
        }
    }

    pub fn direction(&self) -> f32 {
        self.world
            .get::<Direction>(self.entity)
            .map(|d| d.radians)
            .unwrap_or(0.0)
    }

    pub fn set_direction(&mut self, radians: f32) {
        if let Some(mut d) = self.world.get_mut::<Direction>(self.entity) {
            d.radians = radians;
        }
    }

    pub fn global_position(&self) -> Vec2 {
        scenegraph::global_position(self.world, self.entity)
    }

    pub fn component<T: Component>(&self) -> Option<&T> {
        self.world.get::<T>(self.entity)
    }

    pub fn component_mut<T: Component<Mutability = bevy_ecs::component::Mutable>>(
        &mut self,
    ) -> Option<Mut<'_, T>> {
        self.world.get_mut::<T>(self.entity)
    }

    /// Current input snapshot. Empty when no input provider is installed.
    pub fn input(&self) -> InputState {
        self.world
            .get_resource::<InputState>()
            .cloned()
            .unwrap_or_default()
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.world
            .get_resource::<CanvasSize>()
            .copied()
            .unwrap_or_default()
    }

    /// Remove this entity from its parent's children or the root list.
    pub fn remove_self(&mut self) -> bool {
        scenegraph::detach(self.world, self.entity)
    }
}

/// One step of the pre-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep {
    Enter(Entity),
    Exit(Entity),
}

/// Snapshot the whole tree as enter/exit steps, roots in order.
pub fn walk_snapshot(world: &World) -> Vec<WalkStep> {
    let mut steps = Vec::new();
    for root in scenegraph::roots(world) {
        push_subtree(world, root, &mut steps);
    }
    steps
}

fn push_subtree(world: &World, entity: Entity, steps: &mut Vec<WalkStep>) {
    steps.push(WalkStep::Enter(entity));
    for child in scenegraph::children_of(world, entity) {
        push_subtree(world, child, steps);
    }
    steps.push(WalkStep::Exit(entity));
}

#[derive(Clone, Copy)]
enum Phase {
    Before,
    Render,
    After,
}

fn invoke(world: &mut World, canvas: &mut dyn Canvas2D, entity: Entity, time: f32, phase: Phase) {
    let Some(mut hooks) = world
        .get_mut::<Behavior>(entity)
        .and_then(|mut behavior| behavior.take())
    else {
        return;
    };
    {
        let mut ctx = FrameContext {
            world: &mut *world,
            canvas: &mut *canvas,
            entity,
            time,
        };
        let hooks: &mut dyn EntityHooks = hooks.as_mut();
        match phase {
            Phase::Before => hooks.before_render(&mut ctx),
            Phase::Render => hooks.render(&mut ctx),
            Phase::After => hooks.after_render(&mut ctx),
        }
    }
    if let Some(mut behavior) = world.get_mut::<Behavior>(entity) {
        behavior.restore(hooks);
    }
}

fn apply_transform(world: &World, canvas: &mut dyn Canvas2D, entity: Entity) {
    let pos = world
        .get::<MapPosition>(entity)
        .map(|p| p.pos)
        .unwrap_or(Vec2::ZERO);
    let radians = world
        .get::<Direction>(entity)
        .map(|d| d.radians)
        .unwrap_or(0.0);
    canvas.translate(pos.x, pos.y);
    canvas.rotate(radians);
}

/// Run one frame. Returns `false` once the engine is stopped.
pub fn run_frame(world: &mut World, canvas: &mut dyn Canvas2D) -> bool {
    let state = world
        .get_resource::<EngineState>()
        .map(|s| s.get())
        .unwrap_or_default();
    if state == EngineStates::Stopped {
        return false;
    }
    let simulate = state == EngineStates::Running;
    let size = world
        .get_resource::<CanvasSize>()
        .copied()
        .unwrap_or_default();
    let time = world
        .get_resource::<WorldTime>()
        .map(|t| t.elapsed)
        .unwrap_or(0.0);

    canvas.clear_rect(0.0, 0.0, size.w, size.h);

    let steps = walk_snapshot(world);
    // Root of the subtree currently being skipped.
    let mut skipping: Option<Entity> = None;
    for step in steps {
        match step {
            WalkStep::Enter(entity) => {
                if skipping.is_some() {
                    continue;
                }
                if scenegraph::is_detached(world, entity) {
                    trace!("frame: skipping removed {:?}", entity);
                    skipping = Some(entity);
                    continue;
                }
                canvas.save();
                if simulate {
                    invoke(world, canvas, entity, time, Phase::Before);
                }
                apply_transform(world, canvas, entity);
                if !scenegraph::is_detached(world, entity) {
                    invoke(world, canvas, entity, time, Phase::Render);
                }
            }
            WalkStep::Exit(entity) => {
                if let Some(skipped) = skipping {
                    if skipped == entity {
                        skipping = None;
                    }
                    continue;
                }
                if simulate && !scenegraph::is_detached(world, entity) {
                    invoke(world, canvas, entity, time, Phase::After);
                }
                canvas.restore();
            }
        }
    }

    scenegraph::apply_pending_removals(world);
    if let Some(mut wt) = world.get_resource_mut::<WorldTime>() {
        wt.frame_count += 1;
    }
    true
}
