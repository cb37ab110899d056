//! Player session, the credit wallet a presentation layer drives
//!
//! Holds the player's credits next to the machine. Each play stakes one
//! credit per pay line, feeds it into the progressive balance, spins, and
//! credits whatever the payout returns.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{MachineError, MachineResult};
use crate::machine::{Machine, SpinOutcome};

/// Result of one paid play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    pub spin: SpinOutcome,
    /// Credits staked on this play
    pub bet: u64,
    /// Credits returned by the payout
    pub credits_won: u64,
    /// Player credits after the play
    pub credits: u64,
    /// Progressive balance after the play
    pub progressive_balance: u64,
}

/// Player session bound to one machine
pub struct PlayerSession<R> {
    machine: Machine<R>,
    credits: u64,
}

impl<R: Rng> PlayerSession<R> {
    /// Start a session with no credits
    pub fn new(machine: Machine<R>) -> Self {
        Self { machine, credits: 0 }
    }

    /// Stake, spin and collect winnings
    pub fn play(&mut self) -> MachineResult<PlayOutcome> {
        let bet = self.bet_per_spin();
        if self.credits < bet {
            return Err(MachineError::InsufficientCredits {
                needed: bet,
                available: self.credits,
            });
        }

        self.machine.place_bet(bet)?;
        self.credits -= bet;

        let spin = self.machine.spin_detailed();
        let credits_won = self.machine.payout(spin.win_count(), bet)?;
        self.credits += credits_won;

        log::debug!(
            "Play: bet {}, {} lines won, {} credits won, {} credits left",
            bet,
            spin.win_count(),
            credits_won,
            self.credits
        );

        Ok(PlayOutcome {
            spin,
            bet,
            credits_won,
            credits: self.credits,
            progressive_balance: self.machine.balance(),
        })
    }
}

impl<R> PlayerSession<R> {
    /// Add credits to the wallet
    pub fn insert_credits(&mut self, amount: u64) -> MachineResult<()> {
        self.credits = self.credits.checked_add(amount).ok_or_else(|| {
            MachineError::invalid(format!("inserting {} credits would overflow", amount))
        })?;
        Ok(())
    }

    /// One credit per pay line
    pub fn bet_per_spin(&self) -> u64 {
        self.machine.pay_lines().len() as u64
    }

    /// Check if the wallet covers another play
    pub fn can_play(&self) -> bool {
        self.credits >= self.bet_per_spin()
    }

    /// Withdraw every credit
    pub fn cash_out(&mut self) -> u64 {
        std::mem::take(&mut self.credits)
    }

    pub fn credits(&self) -> u64 {
        self.credits
    }

    pub fn machine(&self) -> &Machine<R> {
        &self.machine
    }

    /// End the session and hand back the machine
    pub fn into_machine(self) -> Machine<R> {
        self.machine
    }
}
