//! ECS components for entities.
//!
//! Every scene entity carries a local transform ([`mapposition`],
//! [`direction`]), a label and a declared size. Gameplay entities add their
//! data component and a [`behavior`] holding the per-frame hooks.
//!
//! Submodules overview:
//! - [`behavior`] – boxed lifecycle hooks run by the frame walk
//! - [`bullet`] – projectile velocity and canvas-exit policy
//! - [`dimension`] – declared width and height
//! - [`direction`] – local rotation in radians
//! - [`enemy`] – chase speed and hit radius
//! - [`entityname`] – non-unique label
//! - [`mapposition`] – local position relative to the parent
//! - [`player`] – score and weapon cooldown

pub mod behavior;
pub mod bullet;
pub mod dimension;
pub mod direction;
pub mod enemy;
pub mod entityname;
pub mod mapposition;
pub mod player;
