//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! They do not own state; everything lives in components or is passed in by
//! the engine.

pub mod cleanup;
pub mod hostile_fire;
pub mod movement;
pub mod noise;
pub mod npc;
pub mod player;
pub mod projectile;
pub mod scheduled;
pub mod snapshot;
pub mod teleporter;
