//! Commands and polled input sent from the shell to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Input is
//! latched and read by the player system every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::DebuffKind;
use crate::types::EntityId;

/// Discrete actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Send the player back to the medbay and clear their status.
    Respawn,
    /// The next ray that hits an infiltrator stuns it.
    ArmStunShot,
    /// Fire a projectile from `shooter` toward `target`. A missing action is
    /// drawn at random.
    FireProjectile {
        shooter: EntityId,
        target: Vec2,
        action: Option<DebuffKind>,
    },
    /// Show or hide the player from hostile infiltrators.
    SetVisible { visible: bool },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}

/// Polled input state for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Teleporter trigger held.
    pub fire: bool,
    /// Aim point in world space.
    pub aim: Vec2,
    /// Interact key held. A teleporter pad is used on the press, not while
    /// the key stays down.
    #[serde(default)]
    pub interact: bool,
}
