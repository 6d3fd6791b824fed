//! Cross-chain settlement: outbound dispatch and the inbound handler.

use {
    crate::{
        error::{Result, RouterError},
        events::RouterEvent,
        payload::SettlementPayload,
        router::FeeRouter,
    },
    log::{debug, info},
    pyre_interface::{
        token::TokenLedger,
        transport::Transport,
        types::{AccountId, AssetId, ChannelId},
        venue::SwapVenue,
    },
    pyre_staking::StakingLedger,
};

impl FeeRouter {
    /// Ship the router's accumulated native balance to the paired router.
    ///
    /// Owner only. A balance below the dust floor is a defined no-op
    /// (`Ok(None)`) so keepers do not treat quiet periods as failures.
    /// Returns the sequence number stamped on the batch.
    pub fn settle_native(
        &mut self,
        tokens: &mut dyn TokenLedger,
        transport: &mut dyn Transport,
        caller: AccountId,
        min_remote_gas: u64,
        min_out: u64,
    ) -> Result<Option<u64>> {
        self.require_owner(caller)?;

        let amount = tokens.balance_of(AssetId::NATIVE, self.config.router_account);
        if amount < self.config.dust_floor {
            debug!(
                "settle_native: balance {amount} below dust floor {}, skipping",
                self.config.dust_floor
            );
            return Ok(None);
        }

        let payload = SettlementPayload {
            asset: AssetId::NATIVE,
            min_out,
        };
        self.dispatch(tokens, transport, payload, amount, amount, min_remote_gas)
    }

    /// Ship the router's accumulated balance of `asset` to the paired
    /// router.
    ///
    /// Same shape as [`Self::settle_native`], but the value travels as a
    /// one-time spending allowance of exactly the settled balance, granted
    /// to the transport endpoint rather than carried natively.
    pub fn settle_token(
        &mut self,
        tokens: &mut dyn TokenLedger,
        transport: &mut dyn Transport,
        caller: AccountId,
        asset: AssetId,
        min_remote_gas: u64,
        min_out: u64,
    ) -> Result<Option<u64>> {
        self.require_owner(caller)?;
        if asset.is_native() {
            return Err(RouterError::InvalidConfig {
                reason: "settle_token on the native marker; use settle_native".to_string(),
            });
        }

        let amount = tokens.balance_of(asset, self.config.router_account);
        if amount < self.config.dust_floor {
            debug!(
                "settle_token: {asset} balance {amount} below dust floor {}, skipping",
                self.config.dust_floor
            );
            return Ok(None);
        }

        tokens.approve(
            asset,
            self.config.router_account,
            self.config.endpoint,
            amount,
        )?;
        let payload = SettlementPayload { asset, min_out };
        match self.dispatch(tokens, transport, payload, 0, amount, min_remote_gas) {
            Ok(seq) => Ok(seq),
            Err(e) => {
                // Revoke the allowance so an aborted dispatch leaves no
                // spendable residue behind.
                tokens.approve(
                    asset,
                    self.config.router_account,
                    self.config.endpoint,
                    0,
                )?;
                Err(e)
            }
        }
    }

    /// Inbound settlement handler, invoked by the transport endpoint.
    ///
    /// Rejects any caller other than the configured endpoint and any
    /// (channel, sender) pair not registered by the owner: no funds are
    /// ever swapped or distributed for an unregistered pair. A zero
    /// balance of the named asset (nothing actually arrived) is a defined
    /// no-op.
    pub fn on_message(
        &mut self,
        tokens: &mut dyn TokenLedger,
        venue: &mut dyn SwapVenue,
        ledger: &mut StakingLedger,
        source_channel: ChannelId,
        payload: &[u8],
        claimed_sender: AccountId,
        caller: AccountId,
    ) -> Result<()> {
        if caller != self.config.endpoint {
            return Err(RouterError::NotAuthorizedSender { caller });
        }
        match self.expected_remote(source_channel) {
            Some(expected) if !expected.is_zero() && expected == claimed_sender => {}
            _ => {
                return Err(RouterError::UntrustedRemote {
                    channel: source_channel,
                    sender: claimed_sender,
                })
            }
        }

        let message = SettlementPayload::decode(payload)
            .map_err(|e| RouterError::MalformedPayload(e.to_string()))?;

        let amount_in = tokens.balance_of(message.asset, self.config.router_account);
        if amount_in == 0 {
            debug!(
                "on_message: no {} balance arrived from channel {source_channel}, skipping",
                message.asset
            );
            return Ok(());
        }

        // Rewards with nobody staked have no recipient; reject before the
        // swap so the arrived balance stays intact for a later retry.
        if ledger.total_principal() == 0 {
            return Err(RouterError::Ledger(pyre_staking::LedgerError::NoStakers));
        }

        let reward_out =
            self.convert_to_reward_token(tokens, venue, message.asset, amount_in, message.min_out)?;
        self.burn_and_stake(tokens, ledger, reward_out)?;

        info!(
            "settlement from channel {source_channel}: {amount_in} of {} -> {reward_out} reward",
            message.asset
        );
        self.record(RouterEvent::SettlementReceived {
            source_channel,
            asset: message.asset,
            amount_in,
            reward_out,
        });
        Ok(())
    }

    /// Common outbound tail: send, then commit the sequence and the audit
    /// record. The sequence is only bumped once the transport accepted the
    /// batch, so an aborted send leaves the counter untouched.
    fn dispatch(
        &mut self,
        tokens: &mut dyn TokenLedger,
        transport: &mut dyn Transport,
        payload: SettlementPayload,
        native_value: u64,
        amount: u64,
        min_remote_gas: u64,
    ) -> Result<Option<u64>> {
        let encoded = payload
            .encode()
            .map_err(|e| RouterError::MalformedPayload(e.to_string()))?;
        transport.send(
            tokens,
            self.config.router_account,
            self.config.remote_channel,
            &encoded,
            native_value,
            min_remote_gas,
        )?;

        let sequence = self.next_sequence(self.config.remote_channel);
        info!(
            "settlement #{sequence} dispatched to channel {}: {amount} of {}",
            self.config.remote_channel, payload.asset
        );
        self.record(RouterEvent::SettlementDispatched {
            asset: payload.asset,
            amount,
            sequence,
        });
        Ok(Some(sequence))
    }
}
