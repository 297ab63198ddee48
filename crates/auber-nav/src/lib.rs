//! NPC behaviour for Auber.
//!
//! The navigation seam consumed by the simulation (distance and flee
//! destinations) and the pure flee-steering state machine.

pub mod fsm;
pub mod navigator;

pub use auber_core as core;
pub use navigator::{euclidean_distance, FleePointNavigator, Navigator};

#[cfg(test)]
mod tests;
