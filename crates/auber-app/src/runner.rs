//! Drives the engine for a fixed number of ticks and writes snapshots as
//! JSON lines.

use std::io::Write;

use anyhow::{Context, Result};
use log::info;

use auber_core::state::{GameStateSnapshot, ScoreView};
use auber_sim::SimulationEngine;

use crate::pilot::Pilot;

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub ticks: u64,
    /// Write every n-th snapshot. Snapshots carrying events are always written.
    /// Zero writes only snapshots with events.
    pub print_every: u64,
}

/// Whether a snapshot goes to the output.
pub fn should_print(snapshot: &GameStateSnapshot, print_every: u64) -> bool {
    !snapshot.events.is_empty() || (print_every > 0 && snapshot.time.tick % print_every == 0)
}

/// Write one snapshot as a JSON line.
pub fn write_snapshot<W: Write>(out: &mut W, snapshot: &GameStateSnapshot) -> Result<()> {
    serde_json::to_writer(&mut *out, snapshot).context("failed to encode snapshot")?;
    writeln!(out).context("failed to write snapshot")?;
    Ok(())
}

/// Run the engine as fast as possible on the calling thread.
pub fn run_headless<W: Write>(
    engine: &mut SimulationEngine,
    pilot: Option<&Pilot>,
    options: RunOptions,
    out: &mut W,
) -> Result<ScoreView> {
    let mut written = 0u64;
    for _ in 0..options.ticks {
        let snapshot = engine.tick();
        if let Some(pilot) = pilot {
            engine.set_input(pilot.input(&snapshot));
        }
        if should_print(&snapshot, options.print_every) {
            write_snapshot(out, &snapshot)?;
            written += 1;
        }
    }
    out.flush().context("failed to flush output")?;

    let score = engine.score().clone();
    info!(
        "headless run finished at tick {}: {}/{} infiltrators captured, {} hits taken, {} snapshots written",
        engine.time().tick,
        score.infiltrators_captured,
        score.infiltrators_total,
        score.hits_taken,
        written
    );
    Ok(score)
}
