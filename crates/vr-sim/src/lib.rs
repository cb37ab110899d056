//! # vr-sim — Batch Spin Simulator
//!
//! Runs millions of bet/spin/payout cycles against a virtual reel machine
//! and reports measured odds next to the exact ones.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vr_sim::{BatchSimulator, SimulationConfig};
//!
//! let config = SimulationConfig::default().with_spins(1_000_000).with_seed(42);
//! let report = BatchSimulator::new(config).run()?;
//! println!("{}", report);
//! ```
//!
//! Spins are split into fixed-size chunks, each driven by its own ChaCha8
//! stream of the same seed, so a seeded run gives the same report for any
//! thread count.

pub mod config;
pub mod report;
pub mod runner;

pub use config::*;
pub use report::*;
pub use runner::*;

use thiserror::Error;
use vr_core::MachineError;

/// Simulator error
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Machine error: {0}")]
    Machine(#[from] MachineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid simulation: {0}")]
    InvalidSimulation(String),
}

pub type SimResult<T> = Result<T, SimError>;
