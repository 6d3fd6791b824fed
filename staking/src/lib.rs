//! # Pyre Staking
//!
//! An **auto-compounding staking ledger** with O(1) reward bookkeeping.
//!
//! Stakers lock the reward token for a configured duration. Reward inflow
//! (injected by the settlement router's distributor) is never paid out as a
//! separate claimable balance. It raises a global scaled
//! `acc_reward_per_share` accumulator, and each account folds its accrued
//! share back into principal lazily on its next interaction. Every
//! stake/unstake/reward event costs O(1) regardless of how many accounts
//! hold positions.
//!
//! ## Accounting model
//!
//! ```text
//! on add_rewards(amount):
//!     acc_reward_per_share += amount * SCALE / total_principal
//!
//! on any account touch (stake / unstake / update_user):
//!     pending    = principal * (acc_reward_per_share - reward_debt) / SCALE
//!     principal += pending
//!     reward_debt = acc_reward_per_share
//! ```
//!
//! `SCALE` is 1e12; all arithmetic is integer with floor division, so the
//! invariants in the test suite hold exactly.

pub mod error;
pub mod ledger;
pub mod state;

// Re-exports for convenience.
pub use {
    error::LedgerError,
    ledger::{StakingConfig, StakingLedger, SCALE},
    state::StakerAccount,
};
