//! The router singleton: state, construction, and the owner surface.

use {
    crate::{
        config::RouterConfig,
        error::{Result, RouterError},
        events::RouterEvent,
    },
    log::info,
    pyre_interface::types::{AccountId, ChannelId},
    std::collections::HashMap,
};

/// Fee-slicing and cross-chain settlement router.
///
/// One instance exists per chain. A collection-side deployment slices fees
/// and dispatches settlements; a reward-side deployment (constructed with
/// swap capability) additionally receives settlements, converts them, and
/// feeds the staking ledger.
///
/// Every mutating operation takes `&mut self` together with `&mut`
/// collaborator handles; the exclusive borrows are the single-writer
/// barrier, so no operation can observe another's partial effects.
#[derive(Debug)]
pub struct FeeRouter {
    pub(crate) config: RouterConfig,
    owner: AccountId,
    treasury: AccountId,
    /// Registered (channel → expected sender) pairs. Absent or zero means
    /// untrusted; such messages are always rejected.
    trusted_remotes: HashMap<ChannelId, AccountId>,
    /// Per-destination audit counter, bumped once per successful outbound
    /// settlement batch. Never decremented.
    outbound_sequence: HashMap<ChannelId, u64>,
    events: Vec<RouterEvent>,
}

impl FeeRouter {
    /// Construct a router. `treasury` must be a real account; the config
    /// is validated and then immutable for the router's lifetime.
    pub fn new(config: RouterConfig, owner: AccountId, treasury: AccountId) -> Result<Self> {
        config.validate()?;
        if owner.is_zero() {
            return Err(RouterError::ZeroAddress);
        }
        if treasury.is_zero() {
            return Err(RouterError::ZeroAddress);
        }
        Ok(Self {
            config,
            owner,
            treasury,
            trusted_remotes: HashMap::new(),
            outbound_sequence: HashMap::new(),
            events: Vec::new(),
        })
    }

    // ── Owner surface ───────────────────────────────────────────────────────

    /// Point the remainder stream at a new treasury. Owner only.
    pub fn set_treasury(&mut self, caller: AccountId, treasury: AccountId) -> Result<()> {
        self.require_owner(caller)?;
        if treasury.is_zero() {
            return Err(RouterError::ZeroAddress);
        }
        let old = self.treasury;
        self.treasury = treasury;
        info!("treasury updated: {old} -> {treasury}");
        self.events.push(RouterEvent::TreasuryUpdated {
            old,
            new: treasury,
        });
        Ok(())
    }

    /// Register the expected sender for a source channel. Owner only.
    ///
    /// Setting the zero account clears the registration, returning the
    /// channel to untrusted.
    pub fn set_trusted_remote(
        &mut self,
        caller: AccountId,
        channel: ChannelId,
        remote: AccountId,
    ) -> Result<()> {
        self.require_owner(caller)?;
        if remote.is_zero() {
            self.trusted_remotes.remove(&channel);
        } else {
            self.trusted_remotes.insert(channel, remote);
        }
        info!("trusted remote for channel {channel} set to {remote}");
        self.events
            .push(RouterEvent::TrustedRemoteUpdated { channel, remote });
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn treasury(&self) -> AccountId {
        self.treasury
    }

    /// Registered sender for `channel`, if any.
    pub fn trusted_remote(&self, channel: ChannelId) -> Option<AccountId> {
        self.trusted_remotes.get(&channel).copied()
    }

    /// Current outbound sequence for `channel` (0 if nothing was ever
    /// dispatched).
    pub fn outbound_sequence(&self, channel: ChannelId) -> u64 {
        self.outbound_sequence.get(&channel).copied().unwrap_or(0)
    }

    /// The accumulated audit log.
    pub fn events(&self) -> &[RouterEvent] {
        &self.events
    }

    /// Drain the audit log, handing ownership of the records to the caller.
    pub fn drain_events(&mut self) -> Vec<RouterEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Internal ────────────────────────────────────────────────────────────

    pub(crate) fn require_owner(&self, caller: AccountId) -> Result<()> {
        if caller != self.owner {
            return Err(RouterError::Unauthorized { caller });
        }
        Ok(())
    }

    pub(crate) fn expected_remote(&self, channel: ChannelId) -> Option<AccountId> {
        self.trusted_remotes.get(&channel).copied()
    }

    /// Bump and return the next sequence number for `channel`. Called only
    /// after the transport accepted the batch.
    pub(crate) fn next_sequence(&mut self, channel: ChannelId) -> u64 {
        let seq = self.outbound_sequence.entry(channel).or_insert(0);
        *seq = seq.saturating_add(1);
        *seq
    }

    pub(crate) fn record(&mut self, event: RouterEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::config::RouterConfig,
        assert_matches::assert_matches,
        pyre_interface::types::{AccountId, ChannelId},
    };

    fn config() -> RouterConfig {
        RouterConfig {
            router_account: AccountId::new_unique(),
            endpoint: AccountId::new_unique(),
            remote_channel: ChannelId(202),
            fee_ratio_bps: 150,
            dust_floor: 1_000,
            swap: None,
        }
    }

    #[test]
    fn test_new_rejects_zero_owner_and_treasury() {
        let err =
            FeeRouter::new(config(), AccountId::ZERO, AccountId::new_unique()).unwrap_err();
        assert_matches!(err, RouterError::ZeroAddress);

        let err =
            FeeRouter::new(config(), AccountId::new_unique(), AccountId::ZERO).unwrap_err();
        assert_matches!(err, RouterError::ZeroAddress);
    }

    #[test]
    fn test_set_treasury() {
        let owner = AccountId::new_unique();
        let mut router = FeeRouter::new(config(), owner, AccountId::new_unique()).unwrap();

        let new_treasury = AccountId::new_unique();
        router.set_treasury(owner, new_treasury).unwrap();
        assert_eq!(router.treasury(), new_treasury);

        let err = router.set_treasury(owner, AccountId::ZERO).unwrap_err();
        assert_matches!(err, RouterError::ZeroAddress);

        let stranger = AccountId::new_unique();
        let err = router
            .set_treasury(stranger, AccountId::new_unique())
            .unwrap_err();
        assert_matches!(err, RouterError::Unauthorized { caller } if caller == stranger);
    }

    #[test]
    fn test_trusted_remote_registry() {
        let owner = AccountId::new_unique();
        let mut router = FeeRouter::new(config(), owner, AccountId::new_unique()).unwrap();
        let channel = ChannelId(7);
        let remote = AccountId::new_unique();

        assert_eq!(router.trusted_remote(channel), None);
        router.set_trusted_remote(owner, channel, remote).unwrap();
        assert_eq!(router.trusted_remote(channel), Some(remote));

        // Zero clears the registration.
        router
            .set_trusted_remote(owner, channel, AccountId::ZERO)
            .unwrap();
        assert_eq!(router.trusted_remote(channel), None);
    }

    #[test]
    fn test_sequence_starts_at_zero_and_increments() {
        let owner = AccountId::new_unique();
        let mut router = FeeRouter::new(config(), owner, AccountId::new_unique()).unwrap();
        let channel = ChannelId(9);

        assert_eq!(router.outbound_sequence(channel), 0);
        assert_eq!(router.next_sequence(channel), 1);
        assert_eq!(router.next_sequence(channel), 2);
        assert_eq!(router.outbound_sequence(channel), 2);
        // Independent per destination.
        assert_eq!(router.outbound_sequence(ChannelId(10)), 0);
    }

    #[test]
    fn test_events_accumulate_and_drain() {
        let owner = AccountId::new_unique();
        let mut router = FeeRouter::new(config(), owner, AccountId::new_unique()).unwrap();
        router
            .set_trusted_remote(owner, ChannelId(1), AccountId::new_unique())
            .unwrap();

        assert_eq!(router.events().len(), 1);
        let drained = router.drain_events();
        assert_eq!(drained.len(), 1);
        assert!(router.events().is_empty());
    }
}
