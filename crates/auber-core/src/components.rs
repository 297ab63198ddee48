//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems; the few methods
//! here are capability checks and flag accessors.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_HEALTH, NPC_MAX_SPEED, NPC_SPEED};
use crate::enums::{DebuffKind, NpcKind, NpcPhase};
use crate::types::Rect;

/// World-space position of the entity's bottom-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Per-tick displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Facing in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation(pub f32);

/// Bounding box extents, taken from the sprite size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub size: Vec2,
}

impl Hitbox {
    pub fn bounds(&self, position: Vec2) -> Rect {
        Rect::new(position, self.size)
    }

    pub fn center(&self, position: Vec2) -> Vec2 {
        position + self.size * 0.5
    }
}

/// Acceleration and top speed. A stun zeroes both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub speed: f32,
    pub max_speed: f32,
}

impl Movement {
    /// Designed NPC baseline, restored when a stun wears off.
    pub fn npc_baseline() -> Self {
        Self {
            speed: NPC_SPEED,
            max_speed: NPC_MAX_SPEED,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.max_speed == 0.0
    }
}

/// The player-controlled security officer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Health in [0, MAX_HEALTH].
    pub health: f32,
    /// Teleporter charge in [0, 1].
    pub charge: f32,
    /// Endpoint of the visible ray, `None` when no ray is active.
    pub ray_endpoint: Option<Vec2>,
    /// Incremented per shot so a stale ray-expiry leaves a newer ray alone.
    pub ray_shot: u32,
    /// The next ray that hits an infiltrator stuns it.
    pub stun_shot: bool,
    /// Hidden players are not targeted by hostile fire.
    pub visible: bool,
    /// Interact input of the previous tick, for press detection.
    pub interact_held: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            health: MAX_HEALTH,
            charge: 0.0,
            ray_endpoint: None,
            ray_shot: 0,
            stun_shot: false,
            visible: true,
            interact_held: false,
        }
    }
}

/// Status flags with one expiry generation per kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Debuffs {
    pub confused: bool,
    pub slowed: bool,
    pub blinded: bool,
    /// Bumped on every application and on reset; an expiry only clears the
    /// flag when its captured generation is still current.
    pub generations: [u32; 3],
}

impl Debuffs {
    pub fn is_active(&self, kind: DebuffKind) -> bool {
        match kind {
            DebuffKind::Confuse => self.confused,
            DebuffKind::Slow => self.slowed,
            DebuffKind::Blind => self.blinded,
        }
    }

    pub fn set(&mut self, kind: DebuffKind, active: bool) {
        match kind {
            DebuffKind::Confuse => self.confused = active,
            DebuffKind::Slow => self.slowed = active,
            DebuffKind::Blind => self.blinded = active,
        }
    }

    pub fn generation(&self, kind: DebuffKind) -> u32 {
        self.generations[kind.index()]
    }

    /// Start a new generation for `kind` and return it.
    pub fn bump(&mut self, kind: DebuffKind) -> u32 {
        let slot = &mut self.generations[kind.index()];
        *slot = slot.wrapping_add(1);
        *slot
    }
}

/// Non-player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub kind: NpcKind,
    pub phase: NpcPhase,
    /// Flee point requested from navigation, while fleeing.
    pub destination: Option<Vec2>,
    /// Infiltrator has been discovered. Never reset.
    pub exposed: bool,
    /// Ticks until this NPC may fire again.
    pub fire_cooldown: u32,
}

impl Npc {
    pub fn new(kind: NpcKind) -> Self {
        Self {
            kind,
            phase: NpcPhase::Idle,
            destination: None,
            exposed: false,
            fire_cooldown: 0,
        }
    }

    pub fn is_infiltrator(&self) -> bool {
        self.kind == NpcKind::Infiltrator
    }

    pub fn is_exposed(&self) -> bool {
        self.is_infiltrator() && self.exposed
    }

    /// Whether a nearby ray impact makes this NPC run. Exposed infiltrators
    /// are already caught and stand their ground.
    pub fn has_flee_behavior(&self) -> bool {
        !self.is_exposed()
    }
}

/// Hostile-fired projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub action: DebuffKind,
    /// Shooter, ignored by the projectile's overlap test.
    pub origin: Option<crate::types::EntityId>,
}
