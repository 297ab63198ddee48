//! Core types and definitions for the Auber simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, tuning and the
//! persisted player record. It has no dependency on the ECS or any
//! runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod record;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
