//! Simulation constants and tuning defaults.
//!
//! Distances are in world units (pixels of the station map) and speeds in
//! world units per tick. Durations are in milliseconds and converted to ticks by
//! [`crate::types::ticks_for_ms`].

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick.
pub const TICK_MS: f64 = 1000.0 / TICK_RATE as f64;

/// Longest duration a tuning file may set (ms).
pub const MAX_DURATION_MS: u64 = 3_600_000;

// --- Station map ---

/// Width and height of one collision tile (world units).
pub const TILE_SIZE: f32 = 32.0;

// --- Player ---

/// Maximum health. Health is normalised to [0, MAX_HEALTH].
pub const MAX_HEALTH: f32 = 1.0;

/// Per-tick acceleration applied for each held direction.
pub const PLAYER_SPEED: f32 = 0.4;

/// Velocity clamp per axis.
pub const PLAYER_MAX_SPEED: f32 = 2.0;

/// Fraction of velocity kept after each tick of movement.
pub const FRICTION: f32 = 0.9;

/// Sprite extents used for the player's bounding box.
pub const PLAYER_SIZE: [f32; 2] = [16.0, 16.0];

/// Health regained per tick while standing in the medbay.
pub const AUBER_HEAL_RATE: f32 = 0.002;

/// Vision radius reported to the renderer when not blinded.
pub const VISION_RADIUS: f32 = 320.0;

/// Vision radius reported to the renderer while blinded.
pub const BLINDED_VISION_RADIUS: f32 = 48.0;

// --- Teleporter ray ---

/// Charge gained (input held) or lost (released) per tick.
pub const AUBER_CHARGE_RATE: f32 = 0.05;

/// Charge at or above which releasing the trigger fires the ray.
pub const FIRE_THRESHOLD: f32 = 0.95;

/// How long a fired ray stays visible (ms).
pub const AUBER_RAY_TIME_MS: u64 = 250;

/// Initial interpolation fraction of a ray probe.
pub const RAY_ALPHA_START: f32 = 0.1;

/// Interpolation fraction added per probe step.
pub const RAY_ALPHA_STEP: f32 = 0.1;

/// Probes stop once alpha reaches this multiple of the aim distance.
pub const RAY_ALPHA_LIMIT: f32 = 20.0;

// --- Noise ---

/// Distance from a ray impact within which NPCs hear it.
pub const NPC_EAR_STRENGTH: f32 = 80.0;

// --- Debuffs ---

/// Base debuff duration (ms).
pub const AUBER_DEBUFF_TIME_MS: u64 = 5000;

/// Blind expires this much earlier than the other debuffs (ms).
pub const BLIND_DURATION_OFFSET_MS: u64 = 3000;

/// Health removed by one hostile projectile, as a fraction of MAX_HEALTH.
pub const INFILTRATOR_PROJECTILE_DAMAGE: f32 = 0.1;

// --- NPCs ---

/// Designed per-tick acceleration of an NPC.
pub const NPC_SPEED: f32 = 0.4;

/// Designed top speed of an NPC.
pub const NPC_MAX_SPEED: f32 = 2.0;

/// Sprite extents used for NPC bounding boxes.
pub const NPC_SIZE: [f32; 2] = [16.0, 16.0];

/// An NPC within this distance of its flee destination has arrived.
pub const NPC_ARRIVAL_RADIUS: f32 = 4.0;

/// How long a stun shot freezes an infiltrator (ms).
pub const STUN_DURATION_MS: u64 = 5000;

// --- Hostile fire ---

/// Range within which an exposed infiltrator shoots at the player.
pub const HOSTILE_FIRE_RANGE: f32 = 160.0;

/// Ticks between shots from the same infiltrator.
pub const HOSTILE_FIRE_COOLDOWN_TICKS: u32 = 120;

/// Projectile speed (world units per tick).
pub const PROJECTILE_SPEED: f32 = 3.0;

/// Sprite extents used for projectile bounding boxes.
pub const PROJECTILE_SIZE: [f32; 2] = [4.0, 4.0];
