//! Flightlink simulator
//!
//! Runs a ground station and a flight controller against each other over an
//! in-process link, logging every packet, command outcome and control cycle.

mod config;
mod error;
mod link;
mod sensor;
mod sim;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::SimConfig;
use error::Result;
use sim::Simulation;

#[derive(Parser, Debug)]
#[command(name = "flightlink-sim")]
#[command(about = "Simulate the flightlink command link and flight controller")]
struct Args {
    /// TOML config file (uses the built-in config if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of control cycles
    #[arg(long)]
    cycles: Option<u32>,

    /// Override the sensor RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the probability of a bit flip per packet
    #[arg(long)]
    corrupt_rate: Option<f64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "Loading config");
            SimConfig::load(path)?
        }
        None => SimConfig::embedded()?,
    };

    if let Some(cycles) = args.cycles {
        config.run.cycles = cycles;
    }
    if let Some(seed) = args.seed {
        config.sensor.seed = seed;
    }
    if let Some(rate) = args.corrupt_rate {
        config.link.corrupt_rate = rate;
    }
    config.validate()?;

    let summary = Simulation::new(config)?.run()?;
    info!(
        mode = summary.mode.name(),
        rudder = summary.rudder_deg,
        corrupted = summary.corrupted,
        critical_cycles = summary.critical_cycles,
        "Simulation finished"
    );

    Ok(())
}
