//! Burn-and-stake distribution of converted reward tokens.

use {
    crate::{
        error::{Result, RouterError},
        events::RouterEvent,
        router::FeeRouter,
    },
    log::info,
    pyre_interface::token::TokenLedger,
    pyre_staking::{LedgerError, StakingLedger},
};

/// Breakdown of one distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distribution {
    /// Destroyed, removed from circulation.
    pub burned: u64,
    /// Injected into the staking ledger as reward inflow.
    pub staked: u64,
}

impl FeeRouter {
    /// Split `amount` of the reward token in half, destroy one half, and
    /// deposit the other into the staking ledger.
    ///
    /// The burn half absorbs the odd unit, so `burned - staked` is 0 or 1.
    /// A zero amount is a no-op. The ledger's willingness to accept the
    /// injection is checked before anything is destroyed, so a rejected
    /// injection leaves every balance untouched.
    pub fn burn_and_stake(
        &mut self,
        tokens: &mut dyn TokenLedger,
        ledger: &mut StakingLedger,
        amount: u64,
    ) -> Result<Distribution> {
        if amount == 0 {
            return Ok(Distribution {
                burned: 0,
                staked: 0,
            });
        }
        let Some(swap) = self.config.swap.as_ref() else {
            return Err(RouterError::InvalidConfig {
                reason: "this deployment has no distribution capability".to_string(),
            });
        };

        let staked = amount / 2;
        let burned = amount - staked;

        if staked > 0 && ledger.total_principal() == 0 {
            return Err(RouterError::Ledger(LedgerError::NoStakers));
        }

        tokens.burn(swap.reward_token, self.config.router_account, burned)?;
        if staked > 0 {
            tokens.transfer(
                swap.reward_token,
                self.config.router_account,
                ledger.vault(),
                staked,
            )?;
            ledger.add_rewards(self.config.router_account, staked)?;
        }

        info!("distributed {amount} reward: {burned} burned, {staked} staked");
        self.record(RouterEvent::RewardsBurned { amount: burned });
        self.record(RouterEvent::RewardsStaked { amount: staked });
        self.record(RouterEvent::RewardsDistributed {
            total: amount,
            burned,
            staked,
        });
        Ok(Distribution { burned, staked })
    }
}
