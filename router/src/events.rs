//! Observability records emitted by the router.
//!
//! Events accumulate in the router's in-memory audit log; deployments
//! drain them into whatever sink the host environment provides.

use pyre_interface::types::{AccountId, AssetId, ChannelId};

/// A record of one observable router action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    /// A fee was sliced: the remainder left for the treasury, the protocol
    /// share stayed in the router balance.
    FeesSliced {
        asset: AssetId,
        protocol_share: u64,
        remainder: u64,
    },

    /// An outbound settlement batch was dispatched.
    SettlementDispatched {
        asset: AssetId,
        amount: u64,
        sequence: u64,
    },

    /// An inbound settlement was processed end to end.
    SettlementReceived {
        source_channel: ChannelId,
        asset: AssetId,
        amount_in: u64,
        reward_out: u64,
    },

    /// Half of a distribution was destroyed.
    RewardsBurned { amount: u64 },

    /// Half of a distribution entered the staking ledger.
    RewardsStaked { amount: u64 },

    /// Combined record for one distribution.
    RewardsDistributed {
        total: u64,
        burned: u64,
        staked: u64,
    },

    /// The owner changed the treasury address.
    TreasuryUpdated { old: AccountId, new: AccountId },

    /// The owner registered (or cleared) a trusted remote.
    TrustedRemoteUpdated {
        channel: ChannelId,
        remote: AccountId,
    },
}
