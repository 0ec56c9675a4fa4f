//! Engine run state.
//!
//! [`crate::systems::frame::run_frame`] consults this resource every frame:
//! - `Running` runs every hook
//! - `Paused` keeps drawing but skips `before_render`/`after_render`, so the
//!   simulation is frozen
//! - `Stopped` makes `run_frame` return `false` and the host loop ends

use bevy_ecs::prelude::Resource;
use log::info;

/// Discrete run states of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineStates {
    #[default]
    Running,
    Paused,
    Stopped,
}

/// Authoritative run state.
#[derive(Resource, Debug, Clone, Default)]
pub struct EngineState {
    current: EngineStates,
}

impl EngineState {
    pub fn new(initial: EngineStates) -> Self {
        Self { current: initial }
    }

    pub fn get(&self) -> EngineStates {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.current == EngineStates::Running
    }

    /// Pause a running engine. No effect once stopped.
    pub fn pause(&mut self) {
        if self.current == EngineStates::Running {
            info!("engine paused");
            self.current = EngineStates::Paused;
        }
    }

    /// Resume a paused engine. No effect once stopped.
    pub fn resume(&mut self) {
        if self.current == EngineStates::Paused {
            info!("engine resumed");
            self.current = EngineStates::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.current {
            EngineStates::Running => self.pause(),
            EngineStates::Paused => self.resume(),
            EngineStates::Stopped => {}
        }
    }

    /// Stopping is final.
    pub fn stop(&mut self) {
        if self.current != EngineStates::Stopped {
            info!("engine stopped");
            self.current = EngineStates::Stopped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_pause_flips_between_running_and_paused() {
        let mut state = EngineState::default();
        state.toggle_pause();
        assert_eq!(state.get(), EngineStates::Paused);
        state.toggle_pause();
        assert_eq!(state.get(), EngineStates::Running);
    }

    #[test]
    fn test_stopped_ignores_pause_and_resume() {
        let mut state = EngineState::new(EngineStates::Paused);
        state.stop();
        state.resume();
        state.toggle_pause();
        assert_eq!(state.get(), EngineStates::Stopped);
        assert!(!state.is_running());
    }
}
