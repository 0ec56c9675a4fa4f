//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// The frame counter is advanced by [`run_frame`](crate::systems::frame::run_frame).
///
/// `dt` is expected to be the unscaled frame delta in seconds.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt.max(0.0) * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_accumulates_scaled_delta() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(0.5));
        update_world_time(&mut world, 0.2);
        update_world_time(&mut world, 0.2);
        let wt = world.resource::<WorldTime>();
        assert!((wt.elapsed - 0.2).abs() < 1e-6);
        assert!((wt.delta - 0.1).abs() < 1e-6);
        assert_eq!(wt.frame_count, 0);
    }

    #[test]
    fn test_negative_delta_never_rewinds_the_clock() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        update_world_time(&mut world, 1.0);
        update_world_time(&mut world, -0.5);
        assert!((world.resource::<WorldTime>().elapsed - 1.0).abs() < 1e-6);
    }
}
