use bevy_ecs::prelude::*;

/// Handle to the player entity, read by bullets (scoring) and enemies (chasing).
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHandle(pub Entity);
