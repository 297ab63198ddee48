use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use auber_app::config;
use auber_app::logging;
use auber_app::pilot::Pilot;
use auber_app::runner::{self, RunOptions};
use auber_app::state::{AppState, GameLoopCommand};
use auber_sim::{SimConfig, SimulationEngine};

/// Command-line options for the Auber station simulation.
#[derive(Parser, Debug)]
#[command(name = "auber", version, about = "Run the Auber station simulation headless")]
struct Args {
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// RNG seed. Same seed and layout give the same run.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// JSON file overriding any subset of the tuning values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// ASCII station layout. Defaults to the built-in station.
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Write every n-th snapshot; snapshots with events are always written.
    #[arg(long, default_value_t = 60)]
    print_every: u64,

    /// Pace the run at the real tick rate on the game loop thread.
    #[arg(long)]
    realtime: bool,

    /// Leave the player idle instead of using the scripted pilot.
    #[arg(long)]
    no_pilot: bool,

    /// Restore the player from a save line before the first tick.
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the player's save line here when the run ends.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let tuning = config::load_tuning(args.config.as_deref())?;
    let layout = config::load_layout(args.layout.as_deref())?;
    let pilot = (!args.no_pilot).then(|| Pilot::new(layout.medbay.center(), tuning.fire_threshold));
    let sim_config = SimConfig {
        seed: args.seed,
        tuning,
    };
    let options = RunOptions {
        ticks: args.ticks,
        print_every: args.print_every,
    };

    if args.realtime {
        if args.load.is_some() || args.save.is_some() {
            warn!("--load and --save are ignored in realtime mode");
        }
        return run_realtime(sim_config, layout, pilot, options);
    }

    let mut engine = SimulationEngine::new(sim_config, &layout);
    if let Some(path) = &args.load {
        let line = config::load_save_line(path)?;
        engine
            .load_player(&line)
            .with_context(|| format!("invalid save in {}", path.display()))?;
        info!("player loaded from {}", path.display());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    runner::run_headless(&mut engine, pilot.as_ref(), options, &mut out)?;

    if let Some(path) = &args.save {
        std::fs::write(path, engine.save_player() + "\n")
            .with_context(|| format!("failed to write save file {}", path.display()))?;
        info!("player saved to {}", path.display());
    }
    Ok(())
}

/// Run on the game loop thread, feeding pilot input back as snapshots arrive.
fn run_realtime(
    sim_config: SimConfig,
    layout: auber_map::StationLayout,
    pilot: Option<Pilot>,
    options: RunOptions,
) -> Result<()> {
    let state = AppState::new();
    let snapshots = state.start_simulation(sim_config, layout)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut received = 0u64;
    while received < options.ticks {
        let snapshot = snapshots
            .recv_timeout(Duration::from_secs(1))
            .context("game loop stopped producing snapshots")?;
        received += 1;
        if let Some(pilot) = &pilot {
            state.send(GameLoopCommand::Input(pilot.input(&snapshot)))?;
        }
        if runner::should_print(&snapshot, options.print_every) {
            runner::write_snapshot(&mut out, &snapshot)?;
        }
    }
    out.flush().context("failed to flush output")?;

    if let Some(last) = state.snapshot()? {
        info!(
            "realtime run finished at tick {}: {}/{} infiltrators captured, {} hits taken",
            last.time.tick,
            last.score.infiltrators_captured,
            last.score.infiltrators_total,
            last.score.hits_taken
        );
    }
    state.stop_simulation()
}
