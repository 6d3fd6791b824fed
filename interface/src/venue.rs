//! Swap-venue collaborator interface.
//!
//! A venue is keyed by `(asset_a, asset_b, fee_tier)` pools and executes
//! exact-input swaps along a path of one or two hops.

use {
    crate::{
        token::{TokenError, TokenLedger},
        types::{AccountId, AssetId},
    },
    thiserror::Error,
};

/// Errors surfaced by the swap venue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VenueError {
    /// No pool exists for the pair at the given fee tier.
    #[error("no pool for pair ({0}, {1}) at fee tier {2}")]
    MissingPool(AssetId, AssetId, u32),

    /// The realized output fell below the caller's floor.
    #[error("swap output {actual} below minimum {min_out}")]
    InsufficientOutput { actual: u64, min_out: u64 },

    /// Moving the input or output leg failed.
    #[error("token ledger failure during swap: {0}")]
    Token(#[from] TokenError),
}

/// Exact-input swap venue.
///
/// Every swap is atomic: on error, no balance has moved.
pub trait SwapVenue {
    /// Whether a pool exists for `(asset_a, asset_b)` at `fee_tier`.
    /// Symmetric in the pair.
    fn pool_exists(&self, asset_a: AssetId, asset_b: AssetId, fee_tier: u32) -> bool;

    /// Swap `amount_in` of `path[0]` into `path[last]` along `path`
    /// (two entries for a single hop, three for a two-hop route), debiting
    /// `payer` and crediting `recipient` with the realized output.
    ///
    /// Fails with [`VenueError::InsufficientOutput`] when the realized
    /// output is below `min_out`.
    fn swap_exact_in(
        &mut self,
        tokens: &mut dyn TokenLedger,
        path: &[AssetId],
        fee_tier: u32,
        payer: AccountId,
        recipient: AccountId,
        amount_in: u64,
        min_out: u64,
    ) -> Result<u64, VenueError>;
}
