//! Per-entity lifecycle hooks.
//!
//! An entity opts into frame callbacks by carrying a [`Behavior`] component
//! wrapping an [`EntityHooks`] implementation. The frame walk
//! ([`crate::systems::frame::run_frame`]) calls, for every node in pre-order:
//!
//! 1. `before_render` – simulation: movement, AI, input, spawning
//! 2. `render` – drawing in the entity's local coordinates
//! 3. the whole pipeline for each child, in child order
//! 4. `after_render` – despawn decisions, once all children are done
//!
//! Every hook receives a [`FrameContext`] giving access to the world, the
//! canvas and the entity being visited. All hooks default to doing nothing.
//!
//! While a hook runs, its own boxed hooks are taken out of the component, so
//! the entity's `Behavior` reads as empty from inside its own callbacks.

use bevy_ecs::prelude::Component;

use crate::systems::frame::FrameContext;

/// Capability set an entity behavior may implement.
pub trait EntityHooks: Send + Sync + 'static {
    fn before_render(&mut self, _ctx: &mut FrameContext<'_>) {}

    fn render(&mut self, _ctx: &mut FrameContext<'_>) {}

    fn after_render(&mut self, _ctx: &mut FrameContext<'_>) {}
}

/// Component holding an entity's hooks.
#[derive(Component, Default)]
pub struct Behavior {
    hooks: Option<Box<dyn EntityHooks>>,
}

impl Behavior {
    pub fn new(hooks: impl EntityHooks) -> Self {
        Self {
            hooks: Some(Box::new(hooks)),
        }
    }

    /// Whether hooks are currently installed (false while they run).
    pub fn is_installed(&self) -> bool {
        self.hooks.is_some()
    }

    pub(crate) fn take(&mut self) -> Option<Box<dyn EntityHooks>> {
        self.hooks.take()
    }

    pub(crate) fn restore(&mut self, hooks: Box<dyn EntityHooks>) {
        if self.hooks.is_none() {
            self.hooks = Some(hooks);
        }
    }
}

impl std::fmt::Debug for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Behavior")
            .field("installed", &self.is_installed())
            .finish()
    }
}
