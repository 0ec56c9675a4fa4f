use bevy_ecs::prelude::Resource;

/// Random source for gameplay (enemy speed and spawn position).
///
/// Seed it for reproducible runs.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub fastrand::Rng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    /// Uniform sample in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.0.f32()
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}
