//! Reel machine: spin, evaluation and progressive payout

use std::fmt;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{MachineConfig, SpinMode};
use crate::error::{MachineError, MachineResult};
use crate::payline::{PayLine, winning_lines};
use crate::reel::{ActualReel, VirtualReel};
use crate::stats::SessionStats;
use crate::window::Window;

/// Result of a single spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinOutcome {
    /// Actual-reel stop on the centerline, per reel
    pub centerlines: Vec<usize>,
    /// Indices of pay lines that won
    pub winning_lines: Vec<usize>,
    /// No line won but some line was one jackpot short
    pub near_miss: bool,
}

impl SpinOutcome {
    /// Number of winning pay lines
    pub fn win_count(&self) -> u32 {
        self.winning_lines.len() as u32
    }

    /// Check if this is a win
    pub fn is_win(&self) -> bool {
        !self.winning_lines.is_empty()
    }
}

/// Reel machine
///
/// Owns the actual and virtual reels, the pay lines, the visible window and
/// the progressive jackpot balance. Randomness comes from the injected `R`.
pub struct Machine<R> {
    config: MachineConfig,
    actual_reels: Vec<ActualReel>,
    virtual_reels: Vec<VirtualReel>,
    pay_lines: Vec<PayLine>,
    /// Actual-reel stop under the middle row, per reel
    centerlines: Vec<usize>,
    window: Window,
    /// Progressive jackpot
    balance: u64,
    stats: SessionStats,
    rng: R,
}

impl<R: Rng> Machine<R> {
    /// Create a machine with freshly shuffled reels
    pub fn new(config: MachineConfig, mut rng: R) -> MachineResult<Self> {
        config.validate()?;

        let actual_reels = (0..config.number_of_reels)
            .map(|_| {
                ActualReel::random(
                    config.reel_stops_actual,
                    config.number_of_icons_per_reel,
                    &mut rng,
                )
            })
            .collect::<MachineResult<Vec<_>>>()?;

        Self::with_reels(config, actual_reels, rng)
    }

    /// Create a machine from fixed reel strips
    pub fn with_reels(
        config: MachineConfig,
        actual_reels: Vec<ActualReel>,
        rng: R,
    ) -> MachineResult<Self> {
        config.validate()?;

        if actual_reels.len() != config.number_of_reels {
            return Err(MachineError::config(format!(
                "expected {} reels, got {}",
                config.number_of_reels,
                actual_reels.len()
            )));
        }
        for (index, reel) in actual_reels.iter().enumerate() {
            if reel.len() != config.reel_stops_actual {
                return Err(MachineError::config(format!(
                    "reel {} has {} stops, expected {}",
                    index,
                    reel.len(),
                    config.reel_stops_actual
                )));
            }
            if reel.jackpot_count() != config.number_of_icons_per_reel {
                return Err(MachineError::config(format!(
                    "reel {} has {} jackpot icons, expected {}",
                    index,
                    reel.jackpot_count(),
                    config.number_of_icons_per_reel
                )));
            }
        }

        let virtual_reels = actual_reels
            .iter()
            .map(|reel| VirtualReel::build(reel, config.reel_stops_virtual))
            .collect::<MachineResult<Vec<_>>>()?;

        let centerlines = vec![config.reel_stops_actual / 2; config.number_of_reels];
        let window = Window::from_centerlines(&actual_reels, &centerlines, config.number_of_rows);
        let pay_lines = config.build_pay_lines();

        log::debug!(
            "Machine ready: {} reels × {} rows, {}/{} jackpots, {} virtual stops, {} pay lines",
            config.number_of_reels,
            config.number_of_rows,
            config.number_of_icons_per_reel,
            config.reel_stops_actual,
            config.reel_stops_virtual,
            pay_lines.len()
        );

        Ok(Self {
            config,
            actual_reels,
            virtual_reels,
            pay_lines,
            centerlines,
            window,
            balance: 0,
            stats: SessionStats::default(),
            rng,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Spin all reels and return the number of winning pay lines
    pub fn spin(&mut self) -> u32 {
        self.spin_detailed().win_count()
    }

    /// Spin all reels and return the full outcome
    pub fn spin_detailed(&mut self) -> SpinOutcome {
        match self.config.spin_mode {
            SpinMode::Random => {
                for (centerline, virtual_reel) in
                    self.centerlines.iter_mut().zip(&self.virtual_reels)
                {
                    *centerline = virtual_reel.draw(&mut self.rng);
                }
            }
            SpinMode::Step => {
                let stops = self.config.reel_stops_actual;
                for centerline in &mut self.centerlines {
                    *centerline = (*centerline + 1) % stops;
                }
            }
        }

        self.refresh_window();

        let winning_lines = winning_lines(&self.pay_lines, &self.window);
        let near_miss = winning_lines.is_empty()
            && self.pay_lines.iter().any(|line| line.is_near_miss(&self.window));

        self.stats.record_spin(winning_lines.len(), near_miss);
        log::trace!(
            "Spin {}: centerlines {:?}, {} winning lines{}",
            self.stats.total_spins,
            self.centerlines,
            winning_lines.len(),
            if near_miss { " (near miss)" } else { "" }
        );

        SpinOutcome {
            centerlines: self.centerlines.clone(),
            winning_lines,
            near_miss,
        }
    }

    fn refresh_window(&mut self) {
        self.window = Window::from_centerlines(
            &self.actual_reels,
            &self.centerlines,
            self.config.number_of_rows,
        );
    }
}

impl<R> Machine<R> {
    // ═══════════════════════════════════════════════════════════════════════════
    // BETTING & PAYOUT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Add a bet to the progressive balance
    pub fn place_bet(&mut self, amount: u64) -> MachineResult<()> {
        let balance = self.balance.checked_add(amount).ok_or_else(|| {
            MachineError::invalid(format!(
                "bet of {} would overflow the balance of {}",
                amount, self.balance
            ))
        })?;
        self.balance = balance;
        self.stats.record_bet(amount);
        Ok(())
    }

    /// Pay out `floor(balance / bet_amount) × win_count` credits
    ///
    /// The amount is capped at the balance, which therefore never goes
    /// negative. Nothing is mutated when validation fails.
    pub fn payout(&mut self, win_count: u32, bet_amount: u64) -> MachineResult<u64> {
        if bet_amount == 0 {
            return Err(MachineError::invalid("bet amount must be greater than zero"));
        }

        let portion_per_bet = self.balance / bet_amount;
        let won = portion_per_bet
            .saturating_mul(u64::from(win_count))
            .min(self.balance);

        self.balance -= won;
        self.stats.record_payout(won);
        Ok(won)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // VIEW
    // ═══════════════════════════════════════════════════════════════════════════

    /// Current progressive jackpot balance
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Icons currently in view
    pub fn visible_window(&self) -> &Window {
        &self.window
    }

    /// Centerline stop per reel
    pub fn centerlines(&self) -> &[usize] {
        &self.centerlines
    }

    pub fn pay_lines(&self) -> &[PayLine] {
        &self.pay_lines
    }

    pub fn actual_reels(&self) -> &[ActualReel] {
        &self.actual_reels
    }

    pub fn virtual_reels(&self) -> &[VirtualReel] {
        &self.virtual_reels
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Get session stats
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Reset session stats
    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }
}

impl<R> fmt::Display for Machine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.window)?;
        writeln!(f, "Progressive Jackpot: {} credits", self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::Icon;
    use rand_chacha::ChaCha8Rng;

    fn classic(seed: u64) -> Machine<ChaCha8Rng> {
        Machine::new(MachineConfig::classic(), ChaCha8Rng::seed_from_u64(seed)).unwrap()
    }

    fn step_machine(patterns: [&str; 3]) -> Machine<ChaCha8Rng> {
        let config = MachineConfig::classic()
            .with_reel_stops(1, 4, 8)
            .with_spin_mode(SpinMode::Step);
        let reels = patterns
            .iter()
            .map(|p| ActualReel::from_pattern(p).unwrap())
            .collect();
        Machine::with_reels(config, reels, ChaCha8Rng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn test_machine_creation() {
        let machine = classic(1);
        assert_eq!(machine.balance(), 0);
        assert_eq!(machine.actual_reels().len(), 3);
        assert_eq!(machine.centerlines(), &[11, 11, 11]);
        assert_eq!(machine.visible_window().row_count(), 3);
        assert_eq!(machine.visible_window().reel_count(), 3);
        for reel in machine.virtual_reels() {
            assert_eq!(reel.len(), 64);
        }
    }

    #[test]
    fn test_spin_lands_on_virtual_entries() {
        let mut machine = classic(42);
        for _ in 0..50 {
            let outcome = machine.spin_detailed();
            assert!(outcome.win_count() <= 3);
            for (reel, &center) in outcome.centerlines.iter().enumerate() {
                assert!(machine.virtual_reels()[reel].entries().contains(&center));
            }
        }
        assert_eq!(machine.stats().total_spins, 50);
    }

    #[test]
    fn test_seeded_machines_agree() {
        let mut a = classic(99);
        let mut b = classic(99);
        for _ in 0..20 {
            assert_eq!(a.spin_detailed(), b.spin_detailed());
        }
        assert_eq!(a.visible_window(), b.visible_window());
    }

    #[test]
    fn test_step_mode_windows() {
        let mut machine = step_machine(["JBBB", "JBBB", "JBBB"]);
        // Start: centerline 2, rows show stops 1..=3
        assert!(machine.visible_window().rows().iter().flatten().all(|i| *i == Icon::Blank));

        let outcome = machine.spin_detailed();
        assert_eq!(outcome.centerlines, vec![3, 3, 3]);
        assert_eq!(outcome.winning_lines, vec![2]);

        assert_eq!(machine.spin_detailed().winning_lines, vec![1]);
        assert_eq!(machine.spin_detailed().winning_lines, vec![0]);
        assert_eq!(machine.spin(), 0);
    }

    #[test]
    fn test_step_mode_near_miss() {
        let mut machine = step_machine(["JBBB", "JBBB", "BJBB"]);
        let outcome = machine.spin_detailed();
        assert!(!outcome.is_win());
        assert!(outcome.near_miss);
        assert_eq!(machine.stats().near_misses, 1);
    }

    #[test]
    fn test_lone_jackpot_is_not_near_miss() {
        let mut machine = step_machine(["JBBB", "BJBB", "BJBB"]);
        let outcome = machine.spin_detailed();
        // Bottom row shows J B B: two jackpots short
        assert!(!outcome.is_win());
        assert!(!outcome.near_miss);
        assert_eq!(machine.stats().near_misses, 0);
    }

    #[test]
    fn test_bet_then_payout() {
        let mut machine = classic(3);
        machine.place_bet(3).unwrap();
        assert_eq!(machine.balance(), 3);
        assert_eq!(machine.payout(1, 3).unwrap(), 1);
        assert_eq!(machine.balance(), 2);
    }

    #[test]
    fn test_payout_zero_bet_rejected() {
        let mut machine = classic(3);
        machine.place_bet(10).unwrap();
        let err = machine.payout(1, 0).unwrap_err();
        assert!(matches!(err, MachineError::InvalidArgument(_)));
        assert_eq!(machine.balance(), 10);
    }

    #[test]
    fn test_payout_accepts_any_win_count() {
        let mut machine = classic(3);
        machine.place_bet(10).unwrap();
        // floor(10 / 3) * 4 = 12, capped at 10
        assert_eq!(machine.payout(4, 3).unwrap(), 10);
        assert_eq!(machine.balance(), 0);
        assert_eq!(machine.payout(7, 3).unwrap(), 0);
    }

    #[test]
    fn test_payout_capped_at_balance() {
        let mut machine = classic(3);
        machine.place_bet(3).unwrap();
        // floor(3 / 1) * 3 = 9, capped at 3
        assert_eq!(machine.payout(3, 1).unwrap(), 3);
        assert_eq!(machine.balance(), 0);
    }

    #[test]
    fn test_bet_overflow_rejected() {
        let mut machine = classic(3);
        machine.place_bet(u64::MAX).unwrap();
        assert!(machine.place_bet(1).is_err());
        assert_eq!(machine.balance(), u64::MAX);
    }

    #[test]
    fn test_wrong_reel_shape_rejected() {
        let config = MachineConfig::classic().with_reel_stops(1, 4, 8);
        let reels = vec![ActualReel::from_pattern("JBBB").unwrap()];
        let result = Machine::with_reels(config, reels, ChaCha8Rng::seed_from_u64(0));
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let mut machine = classic(5);
        machine.place_bet(7).unwrap();
        let text = machine.to_string();
        assert!(text.ends_with("Progressive Jackpot: 7 credits\n"));
        assert_eq!(text.lines().count(), 4);
    }
}
