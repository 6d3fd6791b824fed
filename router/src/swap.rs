//! Swap adapter: convert a received asset into the reward token.

use {
    crate::{
        error::{Result, RouterError},
        router::FeeRouter,
    },
    log::debug,
    pyre_interface::{token::TokenLedger, types::AssetId, venue::SwapVenue},
};

impl FeeRouter {
    /// Convert `amount_in` of `asset` into the reward token, enforcing
    /// `min_out` as the aggregate slippage floor.
    ///
    /// Tries the direct pool first, then a two-hop route through the
    /// wrapped-native asset. [`RouterError::NoRoute`] when neither exists,
    /// terminal for that asset until liquidity appears. Identity
    /// short-circuit when the asset already is the reward token.
    pub fn convert_to_reward_token(
        &self,
        tokens: &mut dyn TokenLedger,
        venue: &mut dyn SwapVenue,
        asset: AssetId,
        amount_in: u64,
        min_out: u64,
    ) -> Result<u64> {
        let Some(swap) = self.config.swap.as_ref() else {
            return Err(RouterError::InvalidConfig {
                reason: "this deployment has no swap capability".to_string(),
            });
        };

        if asset == swap.reward_token {
            return Ok(amount_in);
        }

        let me = self.config.router_account;
        if venue.pool_exists(asset, swap.reward_token, swap.fee_tier) {
            let out = venue.swap_exact_in(
                tokens,
                &[asset, swap.reward_token],
                swap.fee_tier,
                me,
                me,
                amount_in,
                min_out,
            )?;
            debug!("direct swap: {amount_in} of {asset} -> {out} reward");
            return Ok(out);
        }

        if venue.pool_exists(asset, swap.wrapped_native, swap.fee_tier)
            && venue.pool_exists(swap.wrapped_native, swap.reward_token, swap.fee_tier)
        {
            let out = venue.swap_exact_in(
                tokens,
                &[asset, swap.wrapped_native, swap.reward_token],
                swap.fee_tier,
                me,
                me,
                amount_in,
                min_out,
            )?;
            debug!("two-hop swap: {amount_in} of {asset} -> {out} reward");
            return Ok(out);
        }

        Err(RouterError::NoRoute { asset })
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::config::{RouterConfig, SwapConfig},
        assert_matches::assert_matches,
        pyre_interface::{
            testing::{venue_reserve, FixedRateVenue, InMemoryTokenLedger},
            types::{AccountId, ChannelId},
        },
    };

    const FEE_TIER: u32 = 3_000;

    struct Setup {
        tokens: InMemoryTokenLedger,
        venue: FixedRateVenue,
        router: FeeRouter,
        reward_token: AssetId,
        wrapped_native: AssetId,
    }

    fn setup(swap_capable: bool) -> Setup {
        let reward_token = AssetId::new_unique();
        let wrapped_native = AssetId::new_unique();
        let router = FeeRouter::new(
            RouterConfig {
                router_account: AccountId::new_unique(),
                endpoint: AccountId::new_unique(),
                remote_channel: ChannelId(202),
                fee_ratio_bps: 150,
                dust_floor: 1_000,
                swap: swap_capable.then_some(SwapConfig {
                    reward_token,
                    wrapped_native,
                    fee_tier: FEE_TIER,
                }),
            },
            AccountId::new_unique(),
            AccountId::new_unique(),
        )
        .unwrap();
        Setup {
            tokens: InMemoryTokenLedger::new(),
            venue: FixedRateVenue::new(),
            router,
            reward_token,
            wrapped_native,
        }
    }

    #[test]
    fn test_identity_short_circuit() {
        let mut s = setup(true);
        let reward = s.reward_token;
        let out = s
            .router
            .convert_to_reward_token(&mut s.tokens, &mut s.venue, reward, 500, 500)
            .unwrap();
        assert_eq!(out, 500);
    }

    #[test]
    fn test_direct_route_preferred() {
        let mut s = setup(true);
        let asset = AssetId::new_unique();
        let me = s.router.config().router_account;
        s.tokens.mint(asset, me, 100);
        s.tokens.mint(s.reward_token, venue_reserve(), 10_000);

        // Direct pool at 3:1 and a much better two-hop route; the adapter
        // must still take the direct pool.
        s.venue.add_pool(asset, s.reward_token, FEE_TIER, 3, 1);
        s.venue.add_pool(asset, s.wrapped_native, FEE_TIER, 10, 1);
        s.venue
            .add_pool(s.wrapped_native, s.reward_token, FEE_TIER, 10, 1);

        let out = s
            .router
            .convert_to_reward_token(&mut s.tokens, &mut s.venue, asset, 100, 0)
            .unwrap();
        assert_eq!(out, 300);
    }

    #[test]
    fn test_two_hop_fallback() {
        let mut s = setup(true);
        let asset = AssetId::new_unique();
        let me = s.router.config().router_account;
        s.tokens.mint(asset, me, 100);
        s.tokens.mint(s.reward_token, venue_reserve(), 10_000);

        s.venue.add_pool(asset, s.wrapped_native, FEE_TIER, 2, 1);
        s.venue
            .add_pool(s.wrapped_native, s.reward_token, FEE_TIER, 3, 1);

        let out = s
            .router
            .convert_to_reward_token(&mut s.tokens, &mut s.venue, asset, 100, 0)
            .unwrap();
        assert_eq!(out, 600);
        assert_eq!(s.tokens.balance_of(s.reward_token, me), 600);
    }

    #[test]
    fn test_no_route_at_all() {
        let mut s = setup(true);
        let asset = AssetId::new_unique();
        let err = s
            .router
            .convert_to_reward_token(&mut s.tokens, &mut s.venue, asset, 100, 0)
            .unwrap_err();
        assert_matches!(err, RouterError::NoRoute { asset: a } if a == asset);
    }

    #[test]
    fn test_one_leg_missing_is_no_route() {
        let mut s = setup(true);
        let asset = AssetId::new_unique();
        // Only the first leg exists.
        s.venue.add_pool(asset, s.wrapped_native, FEE_TIER, 1, 1);

        let err = s
            .router
            .convert_to_reward_token(&mut s.tokens, &mut s.venue, asset, 100, 0)
            .unwrap_err();
        assert_matches!(err, RouterError::NoRoute { .. });
    }

    #[test]
    fn test_min_out_enforced() {
        let mut s = setup(true);
        let asset = AssetId::new_unique();
        let me = s.router.config().router_account;
        s.tokens.mint(asset, me, 100);
        s.tokens.mint(s.reward_token, venue_reserve(), 10_000);
        s.venue.add_pool(asset, s.reward_token, FEE_TIER, 1, 1);

        let err = s
            .router
            .convert_to_reward_token(&mut s.tokens, &mut s.venue, asset, 100, 101)
            .unwrap_err();
        assert_matches!(
            err,
            RouterError::InsufficientOutput {
                actual: 100,
                min_out: 101
            }
        );
        // Nothing moved.
        assert_eq!(s.tokens.balance_of(asset, me), 100);
    }

    #[test]
    fn test_collection_only_deployment_cannot_swap() {
        let mut s = setup(false);
        let asset = AssetId::new_unique();
        let err = s
            .router
            .convert_to_reward_token(&mut s.tokens, &mut s.venue, asset, 100, 0)
            .unwrap_err();
        assert_matches!(err, RouterError::InvalidConfig { .. });
    }
}
