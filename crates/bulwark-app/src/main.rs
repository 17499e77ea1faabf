//! Bulwark defender — CLI.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, Level};

use bulwark_core::config::DefenseConfig;
use bulwark_core::enums::EnginePhase;
use bulwark_core::specs::SpecKey;
use bulwark_sim::scenario;
use bulwark_sim::DefenseEngine;

#[derive(Parser)]
#[command(name = "bulwark")]
#[command(about = "Missile-defence defender simulation")]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation round against the scripted demo attacker.
    Run {
        /// JSON configuration file (strategy flags, horizon, seed).
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Override the configured RNG seed.
        #[arg(long)]
        seed: Option<u64>,
        /// Number of hostile missiles in the demo raid.
        #[arg(long, default_value_t = 12)]
        raid: usize,
        /// Stop after this many ticks even if inventory remains.
        #[arg(long, default_value_t = 600)]
        max_ticks: u64,
        /// Pace ticks at the configured cadence instead of running flat
        /// out.
        #[arg(long)]
        real_time: bool,
        /// Print the final snapshot as JSON.
        #[arg(long)]
        snapshot: bool,
    },
    /// Print the standard missile specification table.
    Specs,
}

/// Initialize tracing with env filter. Safe to call once at startup.
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            seed,
            raid,
            max_ticks,
            real_time,
            snapshot,
        } => {
            let mut config = match config {
                Some(path) => match DefenseConfig::load(&path) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("error: {e}");
                        std::process::exit(1);
                    }
                },
                None => DefenseConfig::default(),
            };
            if let Some(seed) = seed {
                config.seed = seed;
            }
            run_demo(config, raid, max_ticks, real_time, snapshot);
        }
        Commands::Specs => {
            let key = SpecKey::standard();
            for label in [
                "Atlas",
                "Harpoon",
                "Hellfire",
                "Javelin",
                "Minuteman",
                "Patriot",
                "Peacekeeper",
                "SeaSparrow",
                "Titan",
                "Tomahawk",
                "Trident",
            ] {
                if let Some(spec) = key.get(label) {
                    println!(
                        "{:<12} speed category {}  radius category {}",
                        spec.label, spec.speed_category, spec.radius_category
                    );
                }
            }
        }
    }
}

fn run_demo(config: DefenseConfig, raid: usize, max_ticks: u64, real_time: bool, snapshot: bool) {
    let tick_interval = config.tick_interval_secs;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let attacker = scenario::demo_attacker(&mut rng, raid);

    let mut engine = match DefenseEngine::new(config, vec![Box::new(attacker)]) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = engine.initialize() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
    engine.start();

    let mut last = None;
    for _ in 0..max_ticks {
        if engine.phase() != EnginePhase::Running {
            break;
        }
        let now = engine.current_clock();
        last = Some(engine.tick_at(now));
        if real_time {
            std::thread::sleep(Duration::from_secs_f64(tick_interval));
        }
    }

    let score = engine.score();
    info!(
        ticks = engine.time().tick,
        tracks = score.tracks_initiated,
        fired = score.interceptors_fired,
        ignored = score.threats_ignored,
        remaining = engine.ledger().total_remaining(),
        "simulation round over"
    );
    if snapshot {
        if let Some(last) = last {
            match serde_json::to_string_pretty(&last) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("error: {e}"),
            }
        }
    }
}
