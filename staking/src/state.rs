//! Per-account staking state.

/// A single account's compounding stake position.
///
/// Created on first stake, removed again on full unstake. `reward_debt` is
/// the accumulator snapshot from the account's last update; the gap between
/// it and the current accumulator is the account's not-yet-compounded
/// reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakerAccount {
    /// Current compounding stake, in reward-token base units.
    pub principal: u64,

    /// `acc_reward_per_share` at the account's last update (scaled).
    pub reward_debt: u128,

    /// Unix timestamp before which unstake fails. Reset to
    /// `now + lock_duration` on every stake or top-up.
    pub unlock_timestamp: i64,
}
