//! Deterministic in-memory collaborator implementations.
//!
//! Used by unit and integration tests across the workspace. Gated behind
//! the `dev-context-only-utils` feature; never link these into a
//! production build.

use {
    crate::{
        source::{CollectedFees, FeeSource},
        token::{TokenError, TokenLedger},
        transport::{Transport, TransportError},
        types::{AccountId, AssetId, ChannelId},
        venue::{SwapVenue, VenueError},
    },
    std::collections::HashMap,
};

// ── Token ledger ────────────────────────────────────────────────────────────

/// In-memory token ledger tracking balances, allowances, and burn totals.
#[derive(Debug, Default)]
pub struct InMemoryTokenLedger {
    balances: HashMap<(AssetId, AccountId), u64>,
    allowances: HashMap<(AssetId, AccountId, AccountId), u64>,
    burned: HashMap<AssetId, u64>,
}

impl InMemoryTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `asset` to `account` out of thin air.
    pub fn mint(&mut self, asset: AssetId, account: AccountId, amount: u64) {
        let balance = self.balances.entry((asset, account)).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Total `asset` ever destroyed through [`TokenLedger::burn`].
    pub fn total_burned(&self, asset: AssetId) -> u64 {
        self.burned.get(&asset).copied().unwrap_or(0)
    }

    fn debit(
        &mut self,
        asset: AssetId,
        account: AccountId,
        amount: u64,
    ) -> Result<(), TokenError> {
        let balance = self.balances.entry((asset, account)).or_insert(0);
        if *balance < amount {
            return Err(TokenError::InsufficientBalance {
                asset,
                account,
                balance: *balance,
                needed: amount,
            });
        }
        *balance -= amount;
        Ok(())
    }

    fn credit(&mut self, asset: AssetId, account: AccountId, amount: u64) -> Result<(), TokenError> {
        let balance = self.balances.entry((asset, account)).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(TokenError::BalanceOverflow { account })?;
        Ok(())
    }
}

impl TokenLedger for InMemoryTokenLedger {
    fn balance_of(&self, asset: AssetId, account: AccountId) -> u64 {
        self.balances.get(&(asset, account)).copied().unwrap_or(0)
    }

    fn transfer(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: u64,
    ) -> Result<(), TokenError> {
        // Validate the credit side before touching the debit side so a
        // failed transfer moves nothing.
        let to_balance = self.balance_of(asset, to);
        if to_balance.checked_add(amount).is_none() {
            return Err(TokenError::BalanceOverflow { account: to });
        }
        self.debit(asset, from, amount)?;
        self.credit(asset, to, amount)
    }

    fn approve(
        &mut self,
        asset: AssetId,
        owner: AccountId,
        spender: AccountId,
        amount: u64,
    ) -> Result<(), TokenError> {
        self.allowances.insert((asset, owner, spender), amount);
        Ok(())
    }

    fn allowance(&self, asset: AssetId, owner: AccountId, spender: AccountId) -> u64 {
        self.allowances
            .get(&(asset, owner, spender))
            .copied()
            .unwrap_or(0)
    }

    fn transfer_from(
        &mut self,
        asset: AssetId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: u64,
    ) -> Result<(), TokenError> {
        let allowance = self.allowance(asset, from, spender);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                asset,
                owner: from,
                spender,
                allowance,
                needed: amount,
            });
        }
        self.transfer(asset, from, to, amount)?;
        self.allowances
            .insert((asset, from, spender), allowance - amount);
        Ok(())
    }

    fn burn(&mut self, asset: AssetId, from: AccountId, amount: u64) -> Result<(), TokenError> {
        self.debit(asset, from, amount)?;
        let burned = self.burned.entry(asset).or_insert(0);
        *burned = burned.saturating_add(amount);
        Ok(())
    }
}

// ── Transport ───────────────────────────────────────────────────────────────

/// A message captured by [`RecordingTransport::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub sender: AccountId,
    pub destination: ChannelId,
    pub payload: Vec<u8>,
    pub native_value: u64,
    pub gas_limit: u64,
}

/// Transport double that escrows carried value and records every send.
///
/// Delivery to the far side is the test's job: pop a [`SentMessage`],
/// credit the remote router, and invoke its message handler.
#[derive(Debug)]
pub struct RecordingTransport {
    /// Escrow account holding value in flight.
    pub escrow: AccountId,
    /// Every message sent, in order.
    pub sent: Vec<SentMessage>,
    /// When true, the next send fails with `Unreachable`.
    pub fail_next: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            escrow: AccountId::new_unique(),
            sent: Vec::new(),
            fail_next: false,
        }
    }

    /// Pop the oldest undelivered message.
    pub fn pop_sent(&mut self) -> Option<SentMessage> {
        if self.sent.is_empty() {
            None
        } else {
            Some(self.sent.remove(0))
        }
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for RecordingTransport {
    fn send(
        &mut self,
        tokens: &mut dyn TokenLedger,
        sender: AccountId,
        destination: ChannelId,
        payload: &[u8],
        native_value: u64,
        gas_limit: u64,
    ) -> Result<(), TransportError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(TransportError::Unreachable(destination));
        }
        if native_value > 0 {
            tokens.transfer(AssetId::NATIVE, sender, self.escrow, native_value)?;
        }
        self.sent.push(SentMessage {
            sender,
            destination,
            payload: payload.to_vec(),
            native_value,
            gas_limit,
        });
        Ok(())
    }
}

// ── Swap venue ──────────────────────────────────────────────────────────────

/// Swap venue double with fixed-rate pools.
///
/// Each pool converts at `out = in * numerator / denominator`. Output is
/// paid from a single shared [`venue_reserve`] account that tests fund up
/// front; rate behavior, not liquidity depth, is what the core's tests
/// exercise.
#[derive(Debug, Default)]
pub struct FixedRateVenue {
    // Directed rates; `add_pool` registers both directions.
    rates: HashMap<(AssetId, AssetId, u32), (u64, u64)>,
}

impl FixedRateVenue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pool converting `a → b` at `numerator / denominator`
    /// (and `b → a` at the inverse).
    pub fn add_pool(
        &mut self,
        a: AssetId,
        b: AssetId,
        fee_tier: u32,
        numerator: u64,
        denominator: u64,
    ) {
        assert!(numerator > 0 && denominator > 0, "rate must be nonzero");
        self.rates.insert((a, b, fee_tier), (numerator, denominator));
        self.rates.insert((b, a, fee_tier), (denominator, numerator));
    }

    fn quote_hop(&self, from: AssetId, to: AssetId, fee_tier: u32, amount_in: u64) -> Option<u64> {
        let (num, den) = self.rates.get(&(from, to, fee_tier))?;
        let out = (amount_in as u128)
            .checked_mul(*num as u128)?
            .checked_div(*den as u128)?;
        u64::try_from(out).ok()
    }
}

impl SwapVenue for FixedRateVenue {
    fn pool_exists(&self, asset_a: AssetId, asset_b: AssetId, fee_tier: u32) -> bool {
        self.rates.contains_key(&(asset_a, asset_b, fee_tier))
    }

    fn swap_exact_in(
        &mut self,
        tokens: &mut dyn TokenLedger,
        path: &[AssetId],
        fee_tier: u32,
        payer: AccountId,
        recipient: AccountId,
        amount_in: u64,
        min_out: u64,
    ) -> Result<u64, VenueError> {
        assert!(
            path.len() == 2 || path.len() == 3,
            "path must be one or two hops"
        );

        // Quote the full route before moving anything.
        let mut amount = amount_in;
        for pair in path.windows(2) {
            amount = self
                .quote_hop(pair[0], pair[1], fee_tier, amount)
                .ok_or(VenueError::MissingPool(pair[0], pair[1], fee_tier))?;
        }
        if amount < min_out {
            return Err(VenueError::InsufficientOutput {
                actual: amount,
                min_out,
            });
        }

        let input = path[0];
        let output = path[path.len() - 1];
        let reserve = venue_reserve();

        // Validate both legs before moving either, so a failed swap is a
        // strict no-op on balances.
        let payer_balance = tokens.balance_of(input, payer);
        if payer_balance < amount_in {
            return Err(VenueError::Token(TokenError::InsufficientBalance {
                asset: input,
                account: payer,
                balance: payer_balance,
                needed: amount_in,
            }));
        }
        let reserve_balance = tokens.balance_of(output, reserve);
        if reserve_balance < amount {
            return Err(VenueError::Token(TokenError::InsufficientBalance {
                asset: output,
                account: reserve,
                balance: reserve_balance,
                needed: amount,
            }));
        }

        tokens.burn(input, payer, amount_in)?;
        tokens.transfer(output, reserve, recipient, amount)?;
        Ok(amount)
    }
}

/// Shared reserve account the [`FixedRateVenue`] pays swap output from.
///
/// Tests must fund it (via [`InMemoryTokenLedger::mint`]) with enough of
/// each output asset before swapping.
pub fn venue_reserve() -> AccountId {
    let mut bytes = [0u8; 32];
    bytes[..13].copy_from_slice(b"venue-reserve");
    AccountId::new(bytes)
}

// ── Fee sources ─────────────────────────────────────────────────────────────

/// Fee source that pushes its entire balance of one asset on collect.
#[derive(Debug)]
pub struct VaultFeeSource {
    id: AccountId,
    asset: AssetId,
}

impl VaultFeeSource {
    pub fn new(id: AccountId, asset: AssetId) -> Self {
        Self { id, asset }
    }
}

impl FeeSource for VaultFeeSource {
    fn source_id(&self) -> AccountId {
        self.id
    }

    fn collect(
        &mut self,
        tokens: &mut dyn TokenLedger,
        recipient: AccountId,
    ) -> Result<CollectedFees, TokenError> {
        let amount = tokens.balance_of(self.asset, self.id);
        if amount > 0 {
            tokens.transfer(self.asset, self.id, recipient, amount)?;
        }
        Ok(CollectedFees {
            asset: self.asset,
            amount,
        })
    }
}

/// Fee source whose collect always fails, for batch-tolerance tests.
#[derive(Debug)]
pub struct FailingFeeSource {
    id: AccountId,
}

impl FailingFeeSource {
    pub fn new(id: AccountId) -> Self {
        Self { id }
    }
}

impl FeeSource for FailingFeeSource {
    fn source_id(&self) -> AccountId {
        self.id
    }

    fn collect(
        &mut self,
        _tokens: &mut dyn TokenLedger,
        _recipient: AccountId,
    ) -> Result<CollectedFees, TokenError> {
        Err(TokenError::InsufficientBalance {
            asset: AssetId::NATIVE,
            account: self.id,
            balance: 0,
            needed: 1,
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_moves_balance() {
        let mut tokens = InMemoryTokenLedger::new();
        let asset = AssetId::new_unique();
        let (a, b) = (AccountId::new_unique(), AccountId::new_unique());
        tokens.mint(asset, a, 100);

        tokens.transfer(asset, a, b, 60).unwrap();
        assert_eq!(tokens.balance_of(asset, a), 40);
        assert_eq!(tokens.balance_of(asset, b), 60);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut tokens = InMemoryTokenLedger::new();
        let asset = AssetId::new_unique();
        let (a, b) = (AccountId::new_unique(), AccountId::new_unique());
        tokens.mint(asset, a, 10);

        let err = tokens.transfer(asset, a, b, 11).unwrap_err();
        assert!(matches!(err, TokenError::InsufficientBalance { .. }));
        assert_eq!(tokens.balance_of(asset, a), 10);
        assert_eq!(tokens.balance_of(asset, b), 0);
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let mut tokens = InMemoryTokenLedger::new();
        let asset = AssetId::new_unique();
        let (owner, spender, dest) = (
            AccountId::new_unique(),
            AccountId::new_unique(),
            AccountId::new_unique(),
        );
        tokens.mint(asset, owner, 100);
        tokens.approve(asset, owner, spender, 70).unwrap();

        tokens.transfer_from(asset, spender, owner, dest, 50).unwrap();
        assert_eq!(tokens.allowance(asset, owner, spender), 20);
        assert_eq!(tokens.balance_of(asset, dest), 50);

        let err = tokens
            .transfer_from(asset, spender, owner, dest, 30)
            .unwrap_err();
        assert!(matches!(err, TokenError::InsufficientAllowance { .. }));
    }

    #[test]
    fn test_burn_tracks_total() {
        let mut tokens = InMemoryTokenLedger::new();
        let asset = AssetId::new_unique();
        let a = AccountId::new_unique();
        tokens.mint(asset, a, 100);

        tokens.burn(asset, a, 30).unwrap();
        assert_eq!(tokens.balance_of(asset, a), 70);
        assert_eq!(tokens.total_burned(asset), 30);
    }

    #[test]
    fn test_transport_escrows_value() {
        let mut tokens = InMemoryTokenLedger::new();
        let mut transport = RecordingTransport::new();
        let sender = AccountId::new_unique();
        tokens.mint(AssetId::NATIVE, sender, 1_000);

        transport
            .send(&mut tokens, sender, ChannelId(7), b"payload", 400, 200_000)
            .unwrap();
        assert_eq!(tokens.balance_of(AssetId::NATIVE, sender), 600);
        assert_eq!(tokens.balance_of(AssetId::NATIVE, transport.escrow), 400);
        assert_eq!(transport.sent.len(), 1);
        assert_eq!(transport.sent[0].destination, ChannelId(7));
    }

    #[test]
    fn test_transport_fail_next_moves_nothing() {
        let mut tokens = InMemoryTokenLedger::new();
        let mut transport = RecordingTransport::new();
        let sender = AccountId::new_unique();
        tokens.mint(AssetId::NATIVE, sender, 1_000);
        transport.fail_next = true;

        let err = transport
            .send(&mut tokens, sender, ChannelId(7), b"payload", 400, 200_000)
            .unwrap_err();
        assert!(matches!(err, TransportError::Unreachable(_)));
        assert_eq!(tokens.balance_of(AssetId::NATIVE, sender), 1_000);
        assert!(transport.sent.is_empty());
    }

    #[test]
    fn test_venue_single_hop() {
        let mut tokens = InMemoryTokenLedger::new();
        let mut venue = FixedRateVenue::new();
        let (a, b) = (AssetId::new_unique(), AssetId::new_unique());
        let trader = AccountId::new_unique();
        tokens.mint(a, trader, 100);
        tokens.mint(b, venue_reserve(), 1_000);
        venue.add_pool(a, b, 3_000, 2, 1); // 1 a → 2 b

        let out = venue
            .swap_exact_in(&mut tokens, &[a, b], 3_000, trader, trader, 100, 150)
            .unwrap();
        assert_eq!(out, 200);
        assert_eq!(tokens.balance_of(a, trader), 0);
        assert_eq!(tokens.balance_of(b, trader), 200);
    }

    #[test]
    fn test_venue_min_out_violation_moves_nothing() {
        let mut tokens = InMemoryTokenLedger::new();
        let mut venue = FixedRateVenue::new();
        let (a, b) = (AssetId::new_unique(), AssetId::new_unique());
        let trader = AccountId::new_unique();
        tokens.mint(a, trader, 100);
        tokens.mint(b, venue_reserve(), 1_000);
        venue.add_pool(a, b, 3_000, 1, 1);

        let err = venue
            .swap_exact_in(&mut tokens, &[a, b], 3_000, trader, trader, 100, 101)
            .unwrap_err();
        assert!(matches!(err, VenueError::InsufficientOutput { .. }));
        assert_eq!(tokens.balance_of(a, trader), 100);
        assert_eq!(tokens.balance_of(b, trader), 0);
    }

    #[test]
    fn test_vault_fee_source_drains() {
        let mut tokens = InMemoryTokenLedger::new();
        let asset = AssetId::new_unique();
        let (src, dst) = (AccountId::new_unique(), AccountId::new_unique());
        tokens.mint(asset, src, 500);
        let mut source = VaultFeeSource::new(src, asset);

        let collected = source.collect(&mut tokens, dst).unwrap();
        assert_eq!(collected.amount, 500);
        assert_eq!(tokens.balance_of(asset, dst), 500);

        // Second collect finds nothing.
        let collected = source.collect(&mut tokens, dst).unwrap();
        assert_eq!(collected.amount, 0);
    }
}
