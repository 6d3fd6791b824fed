//! Pyre Integration Tests
//!
//! End-to-end test suite for the Pyre settlement and staking core.
//!
//! # Subsystems Tested
//!
//! 1. **Fee slicing** — basis-point splits, treasury forwarding, pull
//!    collection, batch tolerance
//! 2. **Cross-chain settlement** — dust gating, sequence stamping,
//!    allowance-carried token batches, trusted-remote enforcement
//! 3. **Swap & distribution** — direct and two-hop conversion, slippage
//!    floors, burn/stake halving
//! 4. **Staking ledger** — time locks, auto-compounding accrual,
//!    pause behavior, conservation invariants
//! 5. **Full pipeline** — fees in on the collection chain through to
//!    compounded stake on the reward chain

pub mod harness;


#[cfg(test)]
mod settlement_tests;
