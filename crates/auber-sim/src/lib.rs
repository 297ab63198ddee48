//! Simulation engine for Auber.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the shell.

pub mod debuff;
pub mod engine;
pub mod raycast;
pub mod systems;
pub mod timers;
pub mod world_setup;

pub use auber_core as core;
pub use engine::{SimConfig, SimulationEngine};
