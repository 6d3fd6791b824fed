//! The auto-compounding staking ledger.

use {
    crate::{
        error::{LedgerError, Result},
        state::StakerAccount,
    },
    log::{debug, info},
    pyre_interface::{
        token::TokenLedger,
        types::{AccountId, AssetId},
    },
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
};

/// Fixed-point scale factor for the reward-per-share accumulator.
///
/// Chosen large enough that one base unit of reward over the maximum
/// plausible total principal still moves the accumulator.
pub const SCALE: u128 = 1_000_000_000_000;

/// Construction-time configuration of a staking ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingConfig {
    /// The asset stakers lock (the protocol's reward token).
    pub stake_token: AssetId,

    /// Custody account holding all staked principal and pending rewards.
    pub vault: AccountId,

    /// Lock window applied on every stake or top-up, in seconds.
    pub lock_duration_secs: i64,
}

/// Singleton staking ledger for one reward-token deployment.
///
/// Principal custody lives in the configured vault account of the token
/// ledger; this struct carries the proportional-accrual bookkeeping. Every
/// mutating operation takes `&mut self`, so an operation can never observe
/// another's partial effects.
#[derive(Debug)]
pub struct StakingLedger {
    config: StakingConfig,
    owner: AccountId,
    /// Sole account authorized to inject rewards.
    distributor: AccountId,
    total_principal: u64,
    acc_reward_per_share: u128,
    accounts: HashMap<AccountId, StakerAccount>,
    paused: bool,
}

impl StakingLedger {
    pub fn new(config: StakingConfig, owner: AccountId, distributor: AccountId) -> Result<Self> {
        if owner.is_zero() || distributor.is_zero() || config.vault.is_zero() {
            return Err(LedgerError::InvalidConfig {
                reason: "owner, distributor, and vault must be nonzero".to_string(),
            });
        }
        if config.lock_duration_secs < 0 {
            return Err(LedgerError::InvalidConfig {
                reason: format!(
                    "lock_duration_secs ({}) must be non-negative",
                    config.lock_duration_secs
                ),
            });
        }
        Ok(Self {
            config,
            owner,
            distributor,
            total_principal: 0,
            acc_reward_per_share: 0,
            accounts: HashMap::new(),
            paused: false,
        })
    }

    // ── Staker operations ───────────────────────────────────────────────────

    /// Stake `amount`, moving it from `staker` into the vault.
    ///
    /// Compounds any pending reward first, then adds `amount` to the
    /// position and resets the lock to `now + lock_duration`.
    pub fn stake(
        &mut self,
        tokens: &mut dyn TokenLedger,
        staker: AccountId,
        amount: u64,
        now: i64,
    ) -> Result<()> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        self.compound(staker)?;

        tokens.transfer(self.config.stake_token, staker, self.config.vault, amount)?;

        let unlock_timestamp = now
            .checked_add(self.config.lock_duration_secs)
            .ok_or(LedgerError::Overflow)?;
        let acc = self.acc_reward_per_share;
        let entry = self.accounts.entry(staker).or_insert(StakerAccount {
            principal: 0,
            reward_debt: acc,
            unlock_timestamp: 0,
        });
        entry.principal = entry
            .principal
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        entry.unlock_timestamp = unlock_timestamp;
        self.total_principal = self
            .total_principal
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        debug!(
            "stake: {staker} +{amount}, principal {}, unlocks at {unlock_timestamp}",
            entry.principal
        );
        Ok(())
    }

    /// Withdraw the account's entire compounded principal back to `staker`.
    ///
    /// Fails with [`LedgerError::Locked`] before the lock expires. Allowed
    /// while paused, since stakers can always exit.
    pub fn unstake(
        &mut self,
        tokens: &mut dyn TokenLedger,
        staker: AccountId,
        now: i64,
    ) -> Result<u64> {
        let unlock_timestamp = self
            .accounts
            .get(&staker)
            .ok_or(LedgerError::NothingStaked(staker))?
            .unlock_timestamp;
        if now < unlock_timestamp {
            return Err(LedgerError::Locked {
                unlock_timestamp,
                now,
            });
        }

        self.compound(staker)?;

        let Some(account) = self.accounts.remove(&staker) else {
            return Err(LedgerError::NothingStaked(staker));
        };
        if let Err(e) = tokens.transfer(
            self.config.stake_token,
            self.config.vault,
            staker,
            account.principal,
        ) {
            // Keep the position intact if the payout could not be made.
            self.accounts.insert(staker, account);
            return Err(e.into());
        }
        self.total_principal = self
            .total_principal
            .checked_sub(account.principal)
            .ok_or(LedgerError::Overflow)?;

        debug!("unstake: {staker} -{}", account.principal);
        Ok(account.principal)
    }

    /// Fold an account's pending reward into its principal.
    ///
    /// Public so keepers and observers can materialize accrual without
    /// staking or unstaking. Idempotent between reward injections.
    pub fn update_user(&mut self, account: AccountId) -> Result<()> {
        self.compound(account)
    }

    /// Pending (not yet compounded) reward of `account`.
    ///
    /// Pure read; saturates at `u64::MAX`.
    pub fn earned(&self, account: AccountId) -> u64 {
        let Some(acct) = self.accounts.get(&account) else {
            return 0;
        };
        let delta = self.acc_reward_per_share.saturating_sub(acct.reward_debt);
        let pending = (acct.principal as u128).saturating_mul(delta) / SCALE;
        pending.try_into().unwrap_or(u64::MAX)
    }

    // ── Distributor operation ───────────────────────────────────────────────

    /// Record `amount` of new reward inflow against the whole staker set.
    ///
    /// Caller-restricted to the configured distributor, which must have
    /// already moved the tokens into the vault. Deliberately callable while
    /// paused so in-flight settlements are not stranded. A zero amount is a
    /// no-op (an odd one-unit distribution legitimately stakes nothing).
    pub fn add_rewards(&mut self, caller: AccountId, amount: u64) -> Result<()> {
        if caller != self.distributor {
            return Err(LedgerError::Unauthorized(caller));
        }
        if amount == 0 {
            return Ok(());
        }
        if self.total_principal == 0 {
            return Err(LedgerError::NoStakers);
        }

        let delta = (amount as u128)
            .checked_mul(SCALE)
            .ok_or(LedgerError::Overflow)?
            / (self.total_principal as u128);
        self.acc_reward_per_share = self
            .acc_reward_per_share
            .checked_add(delta)
            .ok_or(LedgerError::Overflow)?;

        debug!(
            "add_rewards: +{amount} over {} principal, accumulator now {}",
            self.total_principal, self.acc_reward_per_share
        );
        Ok(())
    }

    // ── Owner operation ─────────────────────────────────────────────────────

    /// Halt or resume staking. Owner only.
    pub fn set_paused(&mut self, caller: AccountId, paused: bool) -> Result<()> {
        if caller != self.owner {
            return Err(LedgerError::Unauthorized(caller));
        }
        self.paused = paused;
        info!("staking {}", if paused { "paused" } else { "resumed" });
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn total_principal(&self) -> u64 {
        self.total_principal
    }

    pub fn acc_reward_per_share(&self) -> u128 {
        self.acc_reward_per_share
    }

    pub fn account(&self, id: AccountId) -> Option<&StakerAccount> {
        self.accounts.get(&id)
    }

    pub fn stakers(&self) -> impl Iterator<Item = (&AccountId, &StakerAccount)> {
        self.accounts.iter()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn vault(&self) -> AccountId {
        self.config.vault
    }

    pub fn stake_token(&self) -> AssetId {
        self.config.stake_token
    }

    pub fn config(&self) -> &StakingConfig {
        &self.config
    }

    // ── Internal ────────────────────────────────────────────────────────────

    /// Lazy compounding pass for one account.
    ///
    /// `pending = principal * (acc - debt) / SCALE` is folded into both the
    /// account's principal and the global total, then the debt snapshot is
    /// advanced. No-op for unknown accounts.
    fn compound(&mut self, account: AccountId) -> Result<()> {
        let acc = self.acc_reward_per_share;
        let Some(entry) = self.accounts.get_mut(&account) else {
            return Ok(());
        };

        let delta = acc
            .checked_sub(entry.reward_debt)
            .ok_or(LedgerError::Overflow)?;
        let pending = (entry.principal as u128)
            .checked_mul(delta)
            .ok_or(LedgerError::Overflow)?
            / SCALE;
        let pending: u64 = pending.try_into().map_err(|_| LedgerError::Overflow)?;

        if pending > 0 {
            entry.principal = entry
                .principal
                .checked_add(pending)
                .ok_or(LedgerError::Overflow)?;
            self.total_principal = self
                .total_principal
                .checked_add(pending)
                .ok_or(LedgerError::Overflow)?;
            debug!("compound: {account} +{pending}");
        }
        entry.reward_debt = acc;
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
