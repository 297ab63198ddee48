//! Application state shared between the shell and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Context, Result};
use log::info;

use auber_core::commands::{PlayerInput, SimCommand};
use auber_core::state::GameStateSnapshot;
use auber_map::StationLayout;
use auber_sim::SimConfig;

use crate::game_loop;

/// Messages sent from the shell to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A discrete command to forward to the simulation engine.
    Sim(SimCommand),
    /// Replace the latched input read by every following tick.
    Input(PlayerInput),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// The sender sits behind a `Mutex` because `mpsc::Sender` is not `Sync`;
/// the latest snapshot is an `Arc` shared with the loop thread.
pub struct AppState {
    /// `None` until [`AppState::start_simulation`] is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub running: Mutex<bool>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread. Every snapshot it produces is also sent on
    /// the returned receiver.
    pub fn start_simulation(
        &self,
        config: SimConfig,
        layout: StationLayout,
    ) -> Result<mpsc::Receiver<GameStateSnapshot>> {
        let mut running = self.running.lock().map_err(|e| anyhow!("{e}"))?;
        if *running {
            bail!("simulation already running");
        }

        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        let (cmd_tx, handle) = game_loop::spawn_game_loop(
            config,
            layout,
            self.latest_snapshot.clone(),
            snapshot_tx,
        )
        .context("failed to spawn game loop thread")?;

        *self.command_tx.lock().map_err(|e| anyhow!("{e}"))? = Some(cmd_tx);
        *self.loop_handle.lock().map_err(|e| anyhow!("{e}"))? = Some(handle);
        *running = true;
        Ok(snapshot_rx)
    }

    /// Forward a message to the game loop.
    pub fn send(&self, command: GameLoopCommand) -> Result<()> {
        let tx_lock = self.command_tx.lock().map_err(|e| anyhow!("{e}"))?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(command)
                .map_err(|e| anyhow!("failed to send command: {e}")),
            None => bail!("simulation not started"),
        }
    }

    /// Latest snapshot, if the loop has ticked at least once.
    pub fn snapshot(&self) -> Result<Option<GameStateSnapshot>> {
        let lock = self.latest_snapshot.lock().map_err(|e| anyhow!("{e}"))?;
        Ok(lock.clone())
    }

    /// Ask the loop to shut down and wait for the thread to exit.
    pub fn stop_simulation(&self) -> Result<()> {
        let mut running = self.running.lock().map_err(|e| anyhow!("{e}"))?;
        if !*running {
            return Ok(());
        }

        if let Some(tx) = self.command_tx.lock().map_err(|e| anyhow!("{e}"))?.take() {
            // A loop that already exited has dropped its receiver.
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
        let handle = self.loop_handle.lock().map_err(|e| anyhow!("{e}"))?.take();
        if let Some(handle) = handle {
            handle
                .join()
                .map_err(|_| anyhow!("game loop thread panicked"))?;
        }
        *running = false;
        info!("game loop stopped");
        Ok(())
    }
}
