//! Router configuration.

use {
    crate::error::{Result, RouterError},
    pyre_interface::{
        types::{AccountId, AssetId, ChannelId},
        BPS_DENOMINATOR,
    },
    serde::{Deserialize, Serialize},
};

/// Swap-side identifiers, present only on deployments that convert and
/// distribute (the reward chain). Pure fee-collection endpoints leave the
/// whole block unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapConfig {
    /// The protocol's reward token.
    pub reward_token: AssetId,

    /// Wrapped native asset, the intermediate hop when no direct pool
    /// exists.
    pub wrapped_native: AssetId,

    /// Venue fee tier used for every pool probe and swap.
    pub fee_tier: u32,
}

/// Immutable router configuration, captured at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// The router's own balance-holding account.
    pub router_account: AccountId,

    /// Identity of the transport endpoint. Inbound messages must originate
    /// from this account, and token settlements grant it their one-time
    /// spending allowance.
    pub endpoint: AccountId,

    /// Channel of the paired router on the other chain.
    pub remote_channel: ChannelId,

    /// Protocol share of every sliced fee, in basis points
    /// (150 = 1.5%).
    pub fee_ratio_bps: u64,

    /// Minimum accumulated balance before a settlement is attempted.
    /// Below this, settle calls are no-ops.
    pub dust_floor: u64,

    /// Swap capability; `None` on pure fee-collection endpoints.
    pub swap: Option<SwapConfig>,
}

impl RouterConfig {
    /// Validate internal consistency. Called by the router constructor.
    pub fn validate(&self) -> Result<()> {
        if self.router_account.is_zero() || self.endpoint.is_zero() {
            return Err(RouterError::InvalidConfig {
                reason: "router_account and endpoint must be nonzero".to_string(),
            });
        }
        if self.fee_ratio_bps > BPS_DENOMINATOR {
            return Err(RouterError::InvalidConfig {
                reason: format!(
                    "fee_ratio_bps ({}) exceeds {}",
                    self.fee_ratio_bps, BPS_DENOMINATOR
                ),
            });
        }
        if let Some(swap) = &self.swap {
            if swap.reward_token.is_native() {
                return Err(RouterError::InvalidConfig {
                    reason: "reward_token must not be the native marker".to_string(),
                });
            }
            if swap.wrapped_native.is_native() {
                return Err(RouterError::InvalidConfig {
                    reason: "wrapped_native must not be the native marker".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Whether this deployment can convert and distribute.
    pub fn is_swap_capable(&self) -> bool {
        self.swap.is_some()
    }
}
