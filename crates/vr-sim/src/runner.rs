//! Batch runner: chunked, seeded, parallel spin loops

use std::time::Instant;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use vr_core::{ActualReel, Machine, SessionStats};

use crate::config::SimulationConfig;
use crate::report::{ReelReport, SimulationReport};
use crate::{SimError, SimResult};

/// Tally of one chunk of spins
#[derive(Debug, Clone, Default)]
struct ChunkTally {
    stats: SessionStats,
    /// Spins with a jackpot on the centerline, per reel
    jackpot_centerlines: Vec<u64>,
    /// Progressive balance left unpaid at chunk end
    residual_balance: u64,
}

impl ChunkTally {
    fn merge(mut self, other: ChunkTally) -> ChunkTally {
        self.stats.merge(&other.stats);
        if self.jackpot_centerlines.len() < other.jackpot_centerlines.len() {
            self.jackpot_centerlines.resize(other.jackpot_centerlines.len(), 0);
        }
        for (total, hits) in self.jackpot_centerlines.iter_mut().zip(&other.jackpot_centerlines) {
            *total += hits;
        }
        self.residual_balance = self.residual_balance.saturating_add(other.residual_balance);
        self
    }
}

/// Runs a [`SimulationConfig`] to a [`SimulationReport`]
pub struct BatchSimulator {
    config: SimulationConfig,
}

impl BatchSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run every spin and collect the report
    pub fn run(&self) -> SimResult<SimulationReport> {
        let config = &self.config;
        if config.spins == 0 {
            return Err(SimError::InvalidSimulation("spin count must be positive".into()));
        }
        config.machine.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let bet = config.effective_bet();
        let start = Instant::now();

        // Stream 0 lays out the reels; chunks draw from streams 1..
        let mut layout_rng = ChaCha8Rng::seed_from_u64(seed);
        let reels = (0..config.machine.number_of_reels)
            .map(|_| {
                ActualReel::random(
                    config.machine.reel_stops_actual,
                    config.machine.number_of_icons_per_reel,
                    &mut layout_rng,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let probe = Machine::with_reels(config.machine.clone(), reels.clone(), layout_rng)?;
        let exact_rates: Vec<f64> = probe
            .actual_reels()
            .iter()
            .zip(probe.virtual_reels())
            .map(|(actual, virt)| virt.jackpot_probability(actual))
            .collect();

        let chunk_size = config.chunk_size.max(1);
        let chunks = config.spins.div_ceil(chunk_size);

        log::info!(
            "Simulating {} spins in {} chunks (seed {}, bet {})",
            config.spins,
            chunks,
            seed,
            bet
        );

        let run_chunks = || {
            (0..chunks)
                .into_par_iter()
                .map(|chunk| {
                    let spins = chunk_size.min(config.spins - chunk * chunk_size);
                    self.run_chunk(&reels, seed, chunk, spins, bet)
                })
                .try_reduce(ChunkTally::default, |a, b| Ok(a.merge(b)))
        };

        let tally = if config.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build()?;
            pool.install(run_chunks)?
        } else {
            run_chunks()?
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        log::info!("Simulation finished in {} ms", duration_ms);

        let reel_reports = exact_rates
            .iter()
            .enumerate()
            .map(|(reel, &exact)| {
                let hits = tally.jackpot_centerlines.get(reel).copied().unwrap_or(0);
                ReelReport {
                    reel,
                    exact_jackpot_rate: exact,
                    measured_jackpot_rate: hits as f64 / config.spins as f64,
                }
            })
            .collect();

        Ok(SimulationReport::new(
            seed,
            bet,
            tally.stats,
            reel_reports,
            tally.residual_balance,
            duration_ms,
        ))
    }

    fn run_chunk(
        &self,
        reels: &[ActualReel],
        seed: u64,
        chunk: u64,
        spins: u64,
        bet: u64,
    ) -> SimResult<ChunkTally> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(chunk + 1);

        let mut machine = Machine::with_reels(self.config.machine.clone(), reels.to_vec(), rng)?;
        let mut jackpot_centerlines = vec![0u64; reels.len()];

        for _ in 0..spins {
            machine.place_bet(bet)?;
            let outcome = machine.spin_detailed();
            machine.payout(outcome.win_count(), bet)?;

            for (reel, (&stop, hits)) in outcome
                .centerlines
                .iter()
                .zip(jackpot_centerlines.iter_mut())
                .enumerate()
            {
                if reels[reel].icon_at(stop).is_jackpot() {
                    *hits += 1;
                }
            }
        }

        log::trace!("Chunk {} done: {} spins", chunk, spins);

        Ok(ChunkTally {
            stats: machine.stats().clone(),
            jackpot_centerlines,
            residual_balance: machine.balance(),
        })
    }
}
