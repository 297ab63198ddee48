//! Data-driven tuning.
//!
//! Every field defaults to the matching constant in [`crate::constants`], so a
//! JSON override only needs to name the values it changes.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::DebuffKind;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub charge_rate: f32,
    pub fire_threshold: f32,
    pub ray_time_ms: u64,
    pub hearing_radius: f32,
    pub debuff_time_ms: u64,
    pub blind_offset_ms: u64,
    pub projectile_damage: f32,
    pub heal_rate: f32,
    pub stun_duration_ms: u64,
    pub hostile_fire_range: f32,
    pub hostile_fire_cooldown_ticks: u32,
    pub projectile_speed: f32,
    /// Let every debuff expiry clear its flag, even when a later application
    /// is still running, so an early expiry can cut a refreshed debuff short.
    pub legacy_debuff_expiry: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            charge_rate: AUBER_CHARGE_RATE,
            fire_threshold: FIRE_THRESHOLD,
            ray_time_ms: AUBER_RAY_TIME_MS,
            hearing_radius: NPC_EAR_STRENGTH,
            debuff_time_ms: AUBER_DEBUFF_TIME_MS,
            blind_offset_ms: BLIND_DURATION_OFFSET_MS,
            projectile_damage: INFILTRATOR_PROJECTILE_DAMAGE,
            heal_rate: AUBER_HEAL_RATE,
            stun_duration_ms: STUN_DURATION_MS,
            hostile_fire_range: HOSTILE_FIRE_RANGE,
            hostile_fire_cooldown_ticks: HOSTILE_FIRE_COOLDOWN_TICKS,
            projectile_speed: PROJECTILE_SPEED,
            legacy_debuff_expiry: false,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = |field: &'static str, value: f32| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                })
            }
        };
        unit("charge_rate", self.charge_rate)?;
        unit("fire_threshold", self.fire_threshold)?;
        // A zero threshold fires on every idle tick.
        if self.fire_threshold <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "fire_threshold",
                value: self.fire_threshold as f64,
            });
        }
        unit("projectile_damage", self.projectile_damage)?;
        unit("heal_rate", self.heal_rate)?;
        if self.hearing_radius < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "hearing_radius",
                value: self.hearing_radius as f64,
            });
        }
        for (field, ms) in [
            ("ray_time_ms", self.ray_time_ms),
            ("debuff_time_ms", self.debuff_time_ms),
            ("stun_duration_ms", self.stun_duration_ms),
        ] {
            if ms > MAX_DURATION_MS {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: ms as f64,
                });
            }
        }
        if self.blind_offset_ms > self.debuff_time_ms {
            return Err(ConfigError::OutOfRange {
                field: "blind_offset_ms",
                value: self.blind_offset_ms as f64,
            });
        }
        Ok(())
    }

    /// Expiry delay for a debuff of `kind`.
    pub fn debuff_duration_ms(&self, kind: DebuffKind) -> u64 {
        match kind {
            DebuffKind::Blind => self.debuff_time_ms.saturating_sub(self.blind_offset_ms),
            _ => self.debuff_time_ms,
        }
    }
}
