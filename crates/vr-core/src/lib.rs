//! # vr-core — Virtual Reel Slot Machine
//!
//! Models physical reels, the hidden weighted "virtual reel" used to pick
//! stops, pay lines and a progressive jackpot balance.
//!
//! ## Features
//!
//! - **Virtual Reels**: Jackpot stops weighted once, their blank neighbours
//!   twice (near misses), the rest filled from plain blanks
//! - **Exact Odds**: Jackpot centerline probability is `icons / virtual stops`
//! - **Progressive Jackpot**: Bets feed the pool, wins split it per bet
//! - **Injected RNG**: Any `rand::Rng`; seed it for reproducible spins
//!
//! ## Architecture
//!
//! ```text
//! Machine<R: Rng>
//!     │
//!     ├── ActualReel × N   (shuffled icons)
//!     ├── VirtualReel × N  (weighted index maps)
//!     ├── PayLine × M      (window coordinates)
//!     └── balance          (progressive jackpot)
//!           │
//!           v
//!     spin() → Window → win count → payout()
//! ```

pub mod config;
pub mod error;
pub mod icon;
pub mod machine;
pub mod payline;
pub mod reel;
pub mod session;
pub mod stats;
pub mod window;

pub use config::*;
pub use error::*;
pub use icon::*;
pub use machine::*;
pub use payline::*;
pub use reel::*;
pub use session::*;
pub use stats::*;
pub use window::*;
