//! Upstream fee-source collaborator interface.
//!
//! A fee source is a contract that accumulates fees on behalf of the
//! protocol (a launch pool, an auction house, ...) and can be drained into
//! the router on demand.

use {
    crate::{
        token::{TokenError, TokenLedger},
        types::{AccountId, AssetId},
    },
};

/// What a single `collect` call actually transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectedFees {
    pub asset: AssetId,
    pub amount: u64,
}

/// A contract holding accumulated fees the router can pull.
pub trait FeeSource {
    /// Stable identity of this source, for audit records.
    fn source_id(&self) -> AccountId;

    /// Push the source's accumulated fees to `recipient`.
    ///
    /// Returns what was transferred; a source holding nothing reports a
    /// zero amount rather than failing.
    fn collect(
        &mut self,
        tokens: &mut dyn TokenLedger,
        recipient: AccountId,
    ) -> Result<CollectedFees, TokenError>;
}
