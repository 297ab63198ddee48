//! Station map for Auber.
//!
//! The static collision layer queried by ray casting and movement, and the
//! ASCII layout format used to build a station.

pub use auber_core as core;

pub mod error;
pub mod grid;
pub mod layout;

pub use error::MapError;
pub use grid::{CollisionMap, TileGrid};
pub use layout::{StationLayout, TeleporterPad, DEFAULT_STATION};
