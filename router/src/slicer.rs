//! Fee slicing: split an incoming value into the protocol share and the
//! treasury remainder.

use {
    crate::{
        error::{Result, RouterError},
        events::RouterEvent,
        router::FeeRouter,
    },
    log::{debug, warn},
    pyre_interface::{
        source::FeeSource,
        token::TokenLedger,
        types::{AccountId, AssetId},
        BPS_DENOMINATOR,
    },
};

/// Breakdown of one sliced fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub asset: AssetId,
    /// Retained in the router balance for later settlement.
    pub protocol_share: u64,
    /// Forwarded to the treasury immediately.
    pub remainder: u64,
}

/// Result of one attempt in a batched collection run.
#[derive(Debug)]
pub struct CollectOutcome {
    pub source: AccountId,
    pub outcome: Result<FeeSplit>,
}

impl FeeRouter {
    /// Push entry point: slice fees that were just credited to the router
    /// balance (the "receive funds now" path).
    pub fn receive_fees(
        &mut self,
        tokens: &mut dyn TokenLedger,
        asset: AssetId,
        amount: u64,
    ) -> Result<FeeSplit> {
        self.slice_and_forward(tokens, asset, amount)
    }

    /// Pull entry point: drain an upstream fee source into the router,
    /// then slice whatever arrived. The source's failure surfaces to the
    /// caller.
    pub fn collect_and_slice(
        &mut self,
        tokens: &mut dyn TokenLedger,
        source: &mut dyn FeeSource,
    ) -> Result<FeeSplit> {
        let collected = source.collect(tokens, self.config.router_account)?;
        self.slice_and_forward(tokens, collected.asset, collected.amount)
    }

    /// Keeper path: drain many sources, tolerating per-source failure.
    ///
    /// One failing source never aborts the batch; each attempt's outcome
    /// is reported individually.
    pub fn collect_from_all(
        &mut self,
        tokens: &mut dyn TokenLedger,
        sources: &mut [&mut dyn FeeSource],
    ) -> Vec<CollectOutcome> {
        let mut outcomes = Vec::with_capacity(sources.len());
        for source in sources.iter_mut() {
            let id = source.source_id();
            let outcome = self.collect_and_slice(tokens, &mut **source);
            if let Err(e) = &outcome {
                warn!("fee collection from {id} failed: {e}");
            }
            outcomes.push(CollectOutcome {
                source: id,
                outcome,
            });
        }
        outcomes
    }

    /// Core slicing operation.
    ///
    /// `protocol_share = amount * fee_ratio_bps / 10_000` (integer floor);
    /// the remainder leaves for the treasury in the same unit of work. A
    /// failed treasury transfer aborts the whole operation.
    fn slice_and_forward(
        &mut self,
        tokens: &mut dyn TokenLedger,
        asset: AssetId,
        amount: u64,
    ) -> Result<FeeSplit> {
        if amount == 0 {
            return Err(RouterError::ZeroAmount);
        }

        // u128 intermediate: amount * bps cannot overflow, and the floored
        // share is always <= amount.
        let protocol_share =
            ((amount as u128) * (self.config.fee_ratio_bps as u128) / (BPS_DENOMINATOR as u128))
                as u64;
        let remainder = amount - protocol_share;

        if remainder > 0 {
            tokens.transfer(asset, self.config.router_account, self.treasury(), remainder)?;
        }

        debug!(
            "sliced {amount} of {asset}: {protocol_share} retained, {remainder} to treasury"
        );
        self.record(RouterEvent::FeesSliced {
            asset,
            protocol_share,
            remainder,
        });
        Ok(FeeSplit {
            asset,
            protocol_share,
            remainder,
        })
    }
}
