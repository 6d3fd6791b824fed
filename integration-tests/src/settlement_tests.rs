//! Integration tests for cross-chain settlement.
//!
//! Exercises dust gating, sequence stamping, allowance-carried token
//! batches, and the receive-side trust checks over the simulated
//! transport.

use {
    crate::harness::{PyreHarness, COLLECTION_CHANNEL, DUST_FLOOR, REWARD_CHANNEL},
    assert_matches::assert_matches,
    pyre_fee_router::RouterError,
    pyre_interface::{
        types::{AccountId, AssetId},
        TokenLedger,
    },
};

// ═══════════════════════════════════════════════════════════════════════════
//  1. Dust floor
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_settle_below_dust_floor_is_idempotent_noop() {
    let mut h = PyreHarness::new();
    h.tokens.mint(
        AssetId::NATIVE,
        h.collector.config().router_account,
        DUST_FLOOR - 1,
    );

    // Repeated calls change nothing: no sequence, no balance movement.
    for _ in 0..3 {
        assert_eq!(h.settle_native(0).unwrap(), None);
        assert_eq!(h.collector.outbound_sequence(REWARD_CHANNEL), 0);
        assert_eq!(h.collector_balance(AssetId::NATIVE), DUST_FLOOR - 1);
    }
    assert!(h.transport.sent.is_empty());
}

#[test]
fn test_settle_at_exact_dust_floor_dispatches() {
    let mut h = PyreHarness::new();
    h.tokens.mint(
        AssetId::NATIVE,
        h.collector.config().router_account,
        DUST_FLOOR,
    );

    assert_eq!(h.settle_native(0).unwrap(), Some(1));
    assert_eq!(h.collector_balance(AssetId::NATIVE), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
//  2. Sequence stamping
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_sequence_increments_once_per_batch() {
    let mut h = PyreHarness::new();
    let me = h.collector.config().router_account;

    h.tokens.mint(AssetId::NATIVE, me, 5_000);
    assert_eq!(h.settle_native(0).unwrap(), Some(1));

    h.tokens.mint(AssetId::NATIVE, me, 5_000);
    assert_eq!(h.settle_native(0).unwrap(), Some(2));

    assert_eq!(h.collector.outbound_sequence(REWARD_CHANNEL), 2);
    // The collection channel's counter is untouched.
    assert_eq!(h.collector.outbound_sequence(COLLECTION_CHANNEL), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
//  3. Native end-to-end delivery
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_native_settlement_reaches_staking_ledger() {
    let mut h = PyreHarness::new();
    let staker = AccountId::new_unique();
    h.stake(staker, 1_000);

    h.collect_fees(AssetId::NATIVE, 1_000_000);
    let retained = h.collector_balance(AssetId::NATIVE);
    assert_eq!(retained, 15_000); // 1.5%

    h.settle_native(0).unwrap();
    h.deliver_next().unwrap();

    // 1:1 pool → 15_000 reward; half burned, half injected.
    assert_eq!(h.tokens.total_burned(h.reward_token), 7_500);
    assert_eq!(h.ledger.earned(staker), 7_500);
}

#[test]
fn test_settlement_with_nobody_staked_is_rejected_and_retryable() {
    let mut h = PyreHarness::new();
    h.collect_fees(AssetId::NATIVE, 1_000_000);
    h.settle_native(0).unwrap();

    // Delivery fails while the ledger is empty...
    let err = h.deliver_next().unwrap_err();
    assert_matches!(err, RouterError::Ledger(_));

    // ...but the arrived balance is intact, so a later retry succeeds.
    let receiver = h.distributor.config().router_account;
    assert_eq!(h.tokens.balance_of(AssetId::NATIVE, receiver), 15_000);
}

// ═══════════════════════════════════════════════════════════════════════════
//  4. Token settlement via allowance
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_token_settlement_travels_through_allowance() {
    let mut h = PyreHarness::new();
    let staker = AccountId::new_unique();
    h.stake(staker, 1_000);

    let asset = AssetId::new_unique();
    // Liquidity for the received asset on chain B.
    h.venue.add_pool(asset, h.reward_token, crate::harness::FEE_TIER, 1, 1);

    h.collect_fees(asset, 2_000_000);
    let retained = h.collector_balance(asset);
    assert_eq!(retained, 30_000);

    h.settle_token(asset, 0).unwrap();
    // The allowance of exactly the batch was granted to the endpoint.
    let sender = h.collector.config().router_account;
    assert_eq!(h.tokens.allowance(asset, sender, h.endpoint), retained);

    h.deliver_next().unwrap();
    // Spent in full on delivery.
    assert_eq!(h.tokens.allowance(asset, sender, h.endpoint), 0);
    assert_eq!(h.tokens.total_burned(h.reward_token), 15_000);
    assert_eq!(h.ledger.earned(staker), 15_000);
}

// ═══════════════════════════════════════════════════════════════════════════
//  5. Trust checks on delivery
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_delivery_from_impostor_sender_rejected() {
    let mut h = PyreHarness::new();
    let staker = AccountId::new_unique();
    h.stake(staker, 1_000);

    h.collect_fees(AssetId::NATIVE, 1_000_000);
    h.settle_native(0).unwrap();

    let err = h.deliver_next_as(AccountId::new_unique()).unwrap_err();
    assert_matches!(err, RouterError::UntrustedRemote { .. });

    // Nothing was swapped or distributed.
    assert_eq!(h.tokens.total_burned(h.reward_token), 0);
    assert_eq!(h.ledger.earned(staker), 0);
}

#[test]
fn test_delivery_after_remote_cleared_rejected() {
    let mut h = PyreHarness::new();
    let staker = AccountId::new_unique();
    h.stake(staker, 1_000);

    h.collect_fees(AssetId::NATIVE, 1_000_000);
    h.settle_native(0).unwrap();

    // The owner clears the registration while the batch is in flight.
    let owner = h.owner;
    h.distributor
        .set_trusted_remote(owner, COLLECTION_CHANNEL, AccountId::ZERO)
        .unwrap();

    let err = h.deliver_next().unwrap_err();
    assert_matches!(err, RouterError::UntrustedRemote { .. });
    assert_eq!(h.ledger.earned(staker), 0);
}
