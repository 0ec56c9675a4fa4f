//! Gameplay hooks.
//!
//! Each type here implements [`EntityHooks`](crate::components::behavior::EntityHooks)
//! and is installed on an entity through a
//! [`Behavior`](crate::components::behavior::Behavior) component. The data
//! they work on lives in plain components ([`Player`](crate::components::player::Player),
//! [`Bullet`](crate::components::bullet::Bullet), [`Enemy`](crate::components::enemy::Enemy)).

pub mod bullet;
pub mod debug;
pub mod enemy;
pub mod player;

pub use bullet::BulletHooks;
pub use debug::DebugOverlayHooks;
pub use enemy::EnemyHooks;
pub use player::PlayerHooks;
