//! # Pyre Fee Router
//!
//! The accounting and cross-chain settlement core of the Pyre protocol.
//!
//! Fees collected from token-launch operations enter the router, which
//! splits off a fixed-ratio protocol share and forwards the remainder to
//! the treasury immediately. The accumulated share is periodically shipped
//! across a message transport to a paired router on the reward chain,
//! where it is swapped into the reward token, half burned, and half
//! deposited into the auto-compounding staking ledger.
//!
//! ```text
//! fees in ──► FeeSlicer ──► treasury (remainder, immediate)
//!                │
//!                └─ protocol share accumulates in the router balance
//!                           │  settle_native / settle_token (dust-gated)
//!                           ▼
//!                      Transport ──► paired router on reward chain
//!                                         │  on_message (trusted remotes only)
//!                                         ▼
//!                                    SwapAdapter ──► reward token
//!                                         │
//!                              ┌──────────┴──────────┐
//!                              ▼                     ▼
//!                         burn (half)      StakingLedger.add_rewards
//! ```
//!
//! All external effects go through the collaborator traits in
//! [`pyre_interface`]; every mutating operation is a single atomic unit
//! that either completes or leaves no partial state behind.

pub mod config;
pub mod distributor;
pub mod error;
pub mod events;
pub mod payload;
pub mod router;
pub mod settlement;
pub mod slicer;
pub mod swap;

// Re-exports for convenience.
pub use {
    config::{RouterConfig, SwapConfig},
    distributor::Distribution,
    error::RouterError,
    events::RouterEvent,
    payload::SettlementPayload,
    router::FeeRouter,
    slicer::{CollectOutcome, FeeSplit},
};
