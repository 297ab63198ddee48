//! Loading of tuning overrides, station layouts and save lines from disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use auber_core::config::Tuning;
use auber_map::{StationLayout, DEFAULT_STATION};

/// Read a JSON tuning override. Without a path the built-in defaults apply.
pub fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    let tuning = Tuning::from_json(&text)
        .with_context(|| format!("invalid tuning in {}", path.display()))?;
    info!("loaded tuning from {}", path.display());
    Ok(tuning)
}

/// Read an ASCII station layout. Without a path the built-in station is used.
pub fn load_layout(path: Option<&Path>) -> Result<StationLayout> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read layout file {}", path.display()))?;
            StationLayout::parse(&text)
                .with_context(|| format!("invalid layout in {}", path.display()))
        }
        None => StationLayout::parse(DEFAULT_STATION).context("built-in station is invalid"),
    }
}

/// Read the first line of a player save file.
pub fn load_save_line(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read save file {}", path.display()))?;
    Ok(text.lines().next().unwrap_or_default().to_string())
}
