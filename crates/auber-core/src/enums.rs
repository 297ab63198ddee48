//! Enumeration types used throughout the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Overall simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
}

/// Temporary status effect a hostile projectile inflicts on the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebuffKind {
    /// Movement input is inverted.
    Confuse,
    /// Velocity is halved every tick.
    Slow,
    /// Vision radius shrinks. Expires earlier than the others.
    Blind,
}

impl DebuffKind {
    pub const ALL: [DebuffKind; 3] = [DebuffKind::Confuse, DebuffKind::Slow, DebuffKind::Blind];

    /// Uniformly random kind, drawn from the simulation RNG.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Slot of this kind in per-kind arrays.
    pub fn index(self) -> usize {
        match self {
            DebuffKind::Confuse => 0,
            DebuffKind::Slow => 1,
            DebuffKind::Blind => 2,
        }
    }
}

/// NPC sub-type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    #[default]
    Civilian,
    Infiltrator,
}

/// Closed set of simulated entity variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Npc(NpcKind),
    Projectile,
}

/// Movement behaviour of an NPC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpcPhase {
    /// Standing still (wandering is owned by the external navigation layer).
    #[default]
    Idle,
    /// Heading for a flee point after hearing a ray impact.
    Fleeing,
}

/// Teleporter weapon state, derived each tick for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponState {
    /// No charge, no ray.
    #[default]
    Idle,
    /// Charge is non-zero and no ray is visible.
    Charging,
    /// The ray fired this tick.
    Discharged,
    /// A fired ray is still visible.
    RayActive,
}
