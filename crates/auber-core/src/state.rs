//! Game state snapshot: the complete visible state handed to the renderer each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{EntityId, SimTime};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    /// NPCs in spawn order.
    pub npcs: Vec<NpcView>,
    /// Projectiles in spawn order.
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

/// Player state needed to draw the officer, the ray and the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: EntityId,
    pub position: Vec2,
    pub center: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub health: f32,
    pub charge: f32,
    pub weapon: WeaponState,
    /// Endpoint of the visible ray, if any.
    pub ray_endpoint: Option<Vec2>,
    pub confused: bool,
    pub slowed: bool,
    pub blinded: bool,
    /// Radius of the visible area; shrinks while blinded.
    pub vision_radius: f32,
    pub stun_shot_armed: bool,
    pub visible: bool,
}

/// An NPC on the station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcView {
    pub id: EntityId,
    pub kind: NpcKind,
    pub position: Vec2,
    pub phase: NpcPhase,
    pub exposed: bool,
    pub stunned: bool,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub position: Vec2,
    pub action: DebuffKind,
}

/// Running score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub infiltrators_captured: u32,
    pub infiltrators_total: u32,
    pub hits_taken: u32,
}
