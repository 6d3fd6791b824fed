//! Pyre Test Harness
//!
//! Provides a lightweight two-chain environment for integration-testing
//! the settlement pipeline:
//!
//! - A **collection router** (chain A) that slices fees and dispatches
//!   settlements
//! - A **distribution router** (chain B) with swap capability and the
//!   staking ledger
//! - One in-memory token ledger playing both chains' balances, a recording
//!   transport whose deliveries the harness replays by hand, and a
//!   fixed-rate swap venue
//!
//! Time is simulated: tests advance `now` explicitly and pass it into
//! ledger operations, so lock-window behavior is deterministic.

use {
    pyre_fee_router::{FeeRouter, RouterConfig, RouterError, SettlementPayload, SwapConfig},
    pyre_interface::{
        testing::{
            venue_reserve, FixedRateVenue, InMemoryTokenLedger, RecordingTransport, SentMessage,
        },
        token::TokenLedger,
        types::{AccountId, AssetId, ChannelId},
    },
    pyre_staking::{StakingConfig, StakingLedger},
};

// ─── Constants ───────────────────────────────────────────────────────────────

/// One whole token in base units.
pub const UNIT: u64 = 1_000_000_000;

/// Seconds per day.
pub const DAY: i64 = 86_400;

/// Staking lock window used across the suite.
pub const LOCK_DURATION: i64 = 7 * DAY;

/// Protocol share of every sliced fee (1.5%).
pub const FEE_RATIO_BPS: u64 = 150;

/// Minimum balance before settlement dispatches.
pub const DUST_FLOOR: u64 = 1_000;

/// Venue fee tier used for every pool in the suite.
pub const FEE_TIER: u32 = 3_000;

/// Default execution-gas hint for receive handlers.
pub const REMOTE_GAS: u64 = 200_000;

/// Channel of the collection chain (A).
pub const COLLECTION_CHANNEL: ChannelId = ChannelId(101);

/// Channel of the reward chain (B).
pub const REWARD_CHANNEL: ChannelId = ChannelId(202);

/// Initialise test logging once per process.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ─── Harness ─────────────────────────────────────────────────────────────────

/// Two-chain Pyre environment.
pub struct PyreHarness {
    pub tokens: InMemoryTokenLedger,
    pub transport: RecordingTransport,
    pub venue: FixedRateVenue,
    /// Chain A: pure fee-collection endpoint.
    pub collector: FeeRouter,
    /// Chain B: swap-capable distribution endpoint.
    pub distributor: FeeRouter,
    pub ledger: StakingLedger,
    pub owner: AccountId,
    pub endpoint: AccountId,
    pub treasury: AccountId,
    pub reward_token: AssetId,
    pub wrapped_native: AssetId,
    /// Current simulated unix timestamp.
    pub now: i64,
}

impl Default for PyreHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl PyreHarness {
    /// Build the default two-chain setup: trusted remotes registered both
    /// ways, a 1:1 native→reward pool, and a funded venue reserve.
    pub fn new() -> Self {
        init_logging();

        let owner = AccountId::new_unique();
        let endpoint = AccountId::new_unique();
        let treasury = AccountId::new_unique();
        let reward_token = AssetId::new_unique();
        let wrapped_native = AssetId::new_unique();

        let collector = FeeRouter::new(
            RouterConfig {
                router_account: AccountId::new_unique(),
                endpoint,
                remote_channel: REWARD_CHANNEL,
                fee_ratio_bps: FEE_RATIO_BPS,
                dust_floor: DUST_FLOOR,
                swap: None,
            },
            owner,
            treasury,
        )
        .expect("collector config");

        let distributor = FeeRouter::new(
            RouterConfig {
                router_account: AccountId::new_unique(),
                endpoint,
                remote_channel: COLLECTION_CHANNEL,
                fee_ratio_bps: FEE_RATIO_BPS,
                dust_floor: DUST_FLOOR,
                swap: Some(SwapConfig {
                    reward_token,
                    wrapped_native,
                    fee_tier: FEE_TIER,
                }),
            },
            owner,
            treasury,
        )
        .expect("distributor config");

        let ledger = StakingLedger::new(
            StakingConfig {
                stake_token: reward_token,
                vault: AccountId::new_unique(),
                lock_duration_secs: LOCK_DURATION,
            },
            owner,
            distributor.config().router_account,
        )
        .expect("ledger config");

        let mut harness = Self {
            tokens: InMemoryTokenLedger::new(),
            transport: RecordingTransport::new(),
            venue: FixedRateVenue::new(),
            collector,
            distributor,
            ledger,
            owner,
            endpoint,
            treasury,
            reward_token,
            wrapped_native,
            now: 1_700_000_000, // ~Nov 2023
        };

        // Each router trusts its peer's channel/account pair.
        harness
            .distributor
            .set_trusted_remote(
                owner,
                COLLECTION_CHANNEL,
                harness.collector.config().router_account,
            )
            .expect("trust collector");
        harness
            .collector
            .set_trusted_remote(
                owner,
                REWARD_CHANNEL,
                harness.distributor.config().router_account,
            )
            .expect("trust distributor");

        // Default liquidity: 1 native → 1 reward, deep reserve.
        harness
            .venue
            .add_pool(AssetId::NATIVE, reward_token, FEE_TIER, 1, 1);
        harness
            .tokens
            .mint(reward_token, venue_reserve(), 1_000_000 * UNIT);

        harness
    }

    // ─── Time ────────────────────────────────────────────────────────────────

    pub fn advance_seconds(&mut self, seconds: i64) {
        self.now += seconds;
    }

    pub fn advance_days(&mut self, days: i64) {
        self.advance_seconds(days * DAY);
    }

    // ─── Chain A helpers ─────────────────────────────────────────────────────

    /// Land `amount` of fee value on the collector and slice it, as the
    /// push entry point would.
    pub fn collect_fees(&mut self, asset: AssetId, amount: u64) {
        self.tokens
            .mint(asset, self.collector.config().router_account, amount);
        self.collector
            .receive_fees(&mut self.tokens, asset, amount)
            .expect("slice fees");
    }

    /// Dispatch the collector's native balance toward chain B.
    pub fn settle_native(&mut self, min_out: u64) -> Result<Option<u64>, RouterError> {
        self.collector.settle_native(
            &mut self.tokens,
            &mut self.transport,
            self.owner,
            REMOTE_GAS,
            min_out,
        )
    }

    /// Dispatch the collector's balance of `asset` toward chain B.
    pub fn settle_token(
        &mut self,
        asset: AssetId,
        min_out: u64,
    ) -> Result<Option<u64>, RouterError> {
        self.collector.settle_token(
            &mut self.tokens,
            &mut self.transport,
            self.owner,
            asset,
            REMOTE_GAS,
            min_out,
        )
    }

    // ─── Transport delivery ──────────────────────────────────────────────────

    /// Deliver the oldest in-flight message to the distributor, moving the
    /// carried value the way the real transport would: escrowed native is
    /// credited to the receiving router, token batches are pulled through
    /// the one-time allowance.
    pub fn deliver_next(&mut self) -> Result<(), RouterError> {
        let sent = self
            .transport
            .pop_sent()
            .expect("no settlement in flight");
        self.move_settled_value(&sent);

        self.distributor.on_message(
            &mut self.tokens,
            &mut self.venue,
            &mut self.ledger,
            COLLECTION_CHANNEL,
            &sent.payload,
            sent.sender,
            self.endpoint,
        )
    }

    /// Deliver the oldest in-flight message but lie about the sender, to
    /// exercise the trusted-remote rejection.
    pub fn deliver_next_as(&mut self, claimed_sender: AccountId) -> Result<(), RouterError> {
        let sent = self
            .transport
            .pop_sent()
            .expect("no settlement in flight");
        self.move_settled_value(&sent);

        self.distributor.on_message(
            &mut self.tokens,
            &mut self.venue,
            &mut self.ledger,
            COLLECTION_CHANNEL,
            &sent.payload,
            claimed_sender,
            self.endpoint,
        )
    }

    fn move_settled_value(&mut self, sent: &SentMessage) {
        let receiver = self.distributor.config().router_account;
        if sent.native_value > 0 {
            self.tokens
                .transfer(
                    AssetId::NATIVE,
                    self.transport.escrow,
                    receiver,
                    sent.native_value,
                )
                .expect("release escrow");
        } else {
            let payload =
                SettlementPayload::decode(&sent.payload).expect("decode in-flight payload");
            let amount = self
                .tokens
                .allowance(payload.asset, sent.sender, self.endpoint);
            if amount > 0 {
                self.tokens
                    .transfer_from(
                        payload.asset,
                        self.endpoint,
                        sent.sender,
                        receiver,
                        amount,
                    )
                    .expect("pull token batch");
            }
        }
    }

    // ─── Chain B helpers ─────────────────────────────────────────────────────

    /// Fund `staker` with reward tokens and stake them at the current time.
    pub fn stake(&mut self, staker: AccountId, amount: u64) {
        self.tokens.mint(self.reward_token, staker, amount);
        self.ledger
            .stake(&mut self.tokens, staker, amount, self.now)
            .expect("stake");
    }

    /// Unstake at the current simulated time.
    pub fn unstake(&mut self, staker: AccountId) -> Result<u64, pyre_staking::LedgerError> {
        self.ledger.unstake(&mut self.tokens, staker, self.now)
    }

    /// Collector's retained protocol-share balance in `asset`.
    pub fn collector_balance(&self, asset: AssetId) -> u64 {
        self.tokens
            .balance_of(asset, self.collector.config().router_account)
    }

    /// Treasury balance in `asset`.
    pub fn treasury_balance(&self, asset: AssetId) -> u64 {
        self.tokens.balance_of(asset, self.treasury)
    }
}
