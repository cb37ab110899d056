//! vr-sim: run a batch of spins and print the odds
//!
//! Usage:
//!   vr-sim                              - Classic 3×3 machine, 100k spins
//!   vr-sim --config machine.yaml        - Custom machine (JSON or YAML)
//!   vr-sim --spins 10000000 --seed 42   - Reproducible long run
//!   vr-sim --json                       - Machine-readable report

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vr_core::MachineConfig;
use vr_sim::{BatchSimulator, SimulationConfig, load_machine_config};

#[derive(Parser)]
#[command(name = "vr-sim", about = "Virtual reel batch simulator")]
struct Cli {
    /// Machine config file (JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of spins
    #[arg(short, long, default_value_t = 100_000)]
    spins: u64,

    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (0 = one per core)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Credits per spin (0 = one per pay line)
    #[arg(short, long, default_value_t = 0)]
    bet: u64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let machine = match &cli.config {
        Some(path) => load_machine_config(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => MachineConfig::classic(),
    };

    let mut config = SimulationConfig::new(machine)
        .with_spins(cli.spins)
        .with_threads(cli.threads)
        .with_bet_per_spin(cli.bet);
    config.seed = cli.seed;

    let report = BatchSimulator::new(config)
        .run()
        .context("Simulation failed")?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
