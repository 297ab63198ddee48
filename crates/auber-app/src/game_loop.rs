//! Game loop thread. Runs the simulation engine at the fixed tick rate and
//! emits snapshots.
//!
//! The engine is created inside this thread so the loop owns it outright.
//! Commands arrive via an `mpsc` channel. Snapshots are sent on a channel and
//! stored in shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};

use auber_core::constants::TICK_RATE;
use auber_core::state::GameStateSnapshot;
use auber_map::StationLayout;
use auber_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    layout: StationLayout,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    snapshot_tx: mpsc::Sender<GameStateSnapshot>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("auber-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(config, &layout);
            run_game_loop(engine, cmd_rx, &latest_snapshot, &snapshot_tx);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    snapshot_tx: &mpsc::Sender<GameStateSnapshot>,
) {
    let mut next_tick_time = Instant::now();
    info!("game loop running at {} Hz", TICK_RATE);

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Sim(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Input(input)) => engine.set_input(input),
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("command channel closed, stopping game loop");
                    return;
                }
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        // 4. Emit; nobody listening is not an error
        let _ = snapshot_tx.send(snapshot);

        // 5. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
