//! Flat save record for the player.
//!
//! The save/load component stores each entity as one line of comma-separated
//! primitives in fixed order. The player appends its own fields to the base
//! entity fields:
//!
//! ```text
//! x,y,rotation,health,confused,slowed,blinded
//! ```
//!
//! Flags are written as `1`/`0`; on read anything other than `1` is false.

use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;

/// Fields shared by every persisted entity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntityRecord {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

/// Player record: base fields followed by health and debuff flags.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerRecord {
    pub base: EntityRecord,
    pub health: f32,
    pub confused: bool,
    pub slowed: bool,
    pub blinded: bool,
}

impl PlayerRecord {
    pub const FIELD_COUNT: usize = 7;

    /// Reject NaN and infinite numbers, which no live player can hold.
    pub fn validate(&self) -> Result<(), RecordError> {
        for (field, value) in [
            ("x", self.base.x),
            ("y", self.base.y),
            ("rotation", self.base.rotation),
            ("health", self.health),
        ] {
            if !value.is_finite() {
                return Err(RecordError::InvalidNumber {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for EntityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.rotation)
    }
}

impl fmt::Display for PlayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.base,
            self.health,
            flag(self.confused),
            flag(self.slowed),
            flag(self.blinded)
        )
    }
}

impl FromStr for PlayerRecord {
    type Err = RecordError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = data.trim().split(',').collect();
        if fields.len() != Self::FIELD_COUNT {
            return Err(RecordError::FieldCount {
                expected: Self::FIELD_COUNT,
                found: fields.len(),
            });
        }

        Ok(Self {
            base: EntityRecord {
                x: number("x", fields[0])?,
                y: number("y", fields[1])?,
                rotation: number("rotation", fields[2])?,
            },
            health: number("health", fields[3])?,
            confused: fields[4].trim() == "1",
            slowed: fields[5].trim() == "1",
            blinded: fields[6].trim() == "1",
        })
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

/// Parse a finite number. `f32::from_str` accepts "NaN" and "inf".
fn number(field: &'static str, raw: &str) -> Result<f32, RecordError> {
    let invalid = || RecordError::InvalidNumber {
        field,
        value: raw.to_string(),
    };
    let value = raw.trim().parse::<f32>().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}
