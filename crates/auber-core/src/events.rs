//! Events emitted by the simulation for audio and UI feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::DebuffKind;
use crate::types::EntityId;

/// Gameplay events collected during a tick and handed out with the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// The teleporter ray fired.
    RayFired {
        from: Vec2,
        to: Vec2,
        hit: Option<EntityId>,
    },
    /// The visible ray timed out.
    RayExpired,
    /// An NPC heard an impact and started fleeing.
    NpcStartled { npc: EntityId, destination: Vec2 },
    /// An infiltrator was hit by the ray and revealed.
    InfiltratorExposed { npc: EntityId },
    /// An exposed infiltrator was hit again and taken away.
    InfiltratorCaptured { npc: EntityId },
    /// A stun shot froze an infiltrator.
    InfiltratorStunned { npc: EntityId },
    /// A stunned infiltrator can move again.
    StunExpired { npc: EntityId },
    /// A hostile projectile was fired.
    ProjectileFired {
        projectile: EntityId,
        shooter: Option<EntityId>,
        action: DebuffKind,
    },
    /// A projectile struck the player.
    PlayerHit { action: DebuffKind, health: f32 },
    /// A status effect was applied.
    DebuffApplied { kind: DebuffKind },
    /// A status effect wore off.
    DebuffExpired { kind: DebuffKind },
    /// The player was sent back to the medbay.
    PlayerRespawned,
    /// The player used a teleporter pad.
    PlayerTeleported { from: Vec2, to: Vec2 },
}
