//! Auber runnable shell.
//!
//! Wires the simulation crates into a headless driver and a fixed-rate game
//! loop thread, with a scripted pilot standing in for keyboard input.

pub mod config;
pub mod game_loop;
pub mod logging;
pub mod pilot;
pub mod runner;
pub mod state;

pub use auber_core as core;
