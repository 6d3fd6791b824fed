//! Error types for the staking ledger.

use {
    pyre_interface::{token::TokenError, types::AccountId},
    thiserror::Error,
};

/// Errors produced by the staking ledger.
///
/// Every error aborts the enclosing operation and leaves the ledger
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A zero-value stake was attempted.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// Unstake attempted before the lock expired.
    #[error("stake is locked until {unlock_timestamp} (now {now})")]
    Locked { unlock_timestamp: i64, now: i64 },

    /// The account holds no active stake.
    #[error("account {0} has no active stake")]
    NothingStaked(AccountId),

    /// Reward injection attempted by a caller other than the distributor,
    /// or a pause toggle by a caller other than the owner.
    #[error("caller {0} is not authorized")]
    Unauthorized(AccountId),

    /// Reward injection with an empty staker set. Rewards with nobody
    /// staked have no recipient and are rejected rather than silently lost.
    #[error("no stakers to receive rewards")]
    NoStakers,

    /// A mutating call while the ledger is halted.
    #[error("staking is paused")]
    Paused,

    /// Construction-time configuration is invalid.
    #[error("invalid ledger configuration: {reason}")]
    InvalidConfig { reason: String },

    /// The token ledger refused a custody transfer.
    #[error("token ledger error: {0}")]
    Token(#[from] TokenError),

    /// Arithmetic overflow in reward bookkeeping.
    #[error("arithmetic overflow")]
    Overflow,
}

/// Convenience result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
