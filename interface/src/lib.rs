//! # Pyre Interface
//!
//! Shared identifier types and collaborator interfaces for the Pyre
//! settlement and staking core.
//!
//! The router and staking crates never talk to a chain, a bridge, or a DEX
//! directly. They talk to the narrow traits defined here:
//!
//! - [`TokenLedger`] — approve/transfer/balance semantics over fungible
//!   assets, including the chain's native asset under [`AssetId::NATIVE`].
//! - [`Transport`] — the cross-chain message channel (outbound side).
//! - [`SwapVenue`] — pool-existence queries and exact-input swaps.
//! - [`FeeSource`] — an upstream fee-holding contract the router can drain.
//!
//! Production deployments implement these against the real chain bindings;
//! the `dev-context-only-utils` feature provides deterministic in-memory
//! implementations for tests.

pub mod source;
pub mod token;
pub mod transport;
pub mod types;
pub mod venue;

#[cfg(any(test, feature = "dev-context-only-utils"))]
pub mod testing;

// Re-exports for convenience.
pub use {
    source::{CollectedFees, FeeSource},
    token::{TokenError, TokenLedger},
    transport::{Transport, TransportError},
    types::{AccountId, AssetId, ChannelId},
    venue::{SwapVenue, VenueError},
};

/// Basis-points denominator (10_000 bps = 100%).
pub const BPS_DENOMINATOR: u64 = 10_000;
