//! Token-ledger collaborator interface.
//!
//! Models the approve/transfer/balance semantics the settlement core relies
//! on. The native asset is addressed through [`AssetId::NATIVE`] like any
//! tracked token; implementations map that marker onto direct value
//! transfers.

use {
    crate::types::{AccountId, AssetId},
    thiserror::Error,
};

/// Errors surfaced by a token ledger.
///
/// The core treats every one of these as fatal to the enclosing operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The sender's balance does not cover the transfer.
    #[error(
        "insufficient balance: account {account} holds {balance} of asset {asset}, needs {needed}"
    )]
    InsufficientBalance {
        asset: AssetId,
        account: AccountId,
        balance: u64,
        needed: u64,
    },

    /// The spender's allowance does not cover the `transfer_from`.
    #[error(
        "insufficient allowance: spender {spender} may move {allowance} of asset {asset} \
         from {owner}, needs {needed}"
    )]
    InsufficientAllowance {
        asset: AssetId,
        owner: AccountId,
        spender: AccountId,
        allowance: u64,
        needed: u64,
    },

    /// Crediting the recipient would overflow its balance.
    #[error("balance overflow crediting account {account}")]
    BalanceOverflow { account: AccountId },
}

/// Fungible-asset ledger: balances, transfers, allowances, and an
/// unrecoverable burn sink.
///
/// Every mutating call is atomic: on error, no balance has moved.
pub trait TokenLedger {
    /// Current balance of `account` in `asset`.
    fn balance_of(&self, asset: AssetId, account: AccountId) -> u64;

    /// Move `amount` of `asset` from `from` to `to`.
    fn transfer(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: u64,
    ) -> Result<(), TokenError>;

    /// Set `spender`'s allowance over `owner`'s `asset` balance to exactly
    /// `amount` (overwriting any previous allowance).
    fn approve(
        &mut self,
        asset: AssetId,
        owner: AccountId,
        spender: AccountId,
        amount: u64,
    ) -> Result<(), TokenError>;

    /// Current allowance of `spender` over `owner`'s `asset` balance.
    fn allowance(&self, asset: AssetId, owner: AccountId, spender: AccountId) -> u64;

    /// Move `amount` of `asset` from `from` to `to`, spending `spender`'s
    /// allowance.
    fn transfer_from(
        &mut self,
        asset: AssetId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: u64,
    ) -> Result<(), TokenError>;

    /// Destroy `amount` of `asset` held by `from`. Burned value is removed
    /// from circulation and cannot be recovered.
    fn burn(&mut self, asset: AssetId, from: AccountId, amount: u64) -> Result<(), TokenError>;
}
