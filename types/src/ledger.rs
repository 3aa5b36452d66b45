//! The external account/asset ledger, as seen by the engine.

use crate::{AccountAddress, Asset, AssetId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance in {account}: need {needed}, have {available}")]
    InsufficientBalance {
        account: AccountAddress,
        needed: u64,
        available: u64,
    },

    #[error("unknown asset: {0}")]
    UnknownAsset(String),

    #[error("account {account} is not registered for {asset}")]
    NotRegistered { account: AccountAddress, asset: String },

    #[error("ledger backend error: {0}")]
    Backend(String),
}

/// Balance queries, transfers and supply lookups on the external ledger.
///
/// `transfer` is only ever called with the treasury as the source; holding the
/// treasury address is the capability to move its funds.
pub trait Ledger {
    /// Balance of `account` in `asset`. Unregistered accounts hold zero.
    fn balance(&self, account: &AccountAddress, asset: &Asset) -> Result<u64, LedgerError>;

    /// Total outstanding supply of a fungible asset.
    fn total_supply(&self, asset: &AssetId) -> Result<u128, LedgerError>;

    /// Move `amount` of `asset` from `from` to `to`.
    fn transfer(
        &self,
        from: &AccountAddress,
        asset: &Asset,
        to: &AccountAddress,
        amount: u64,
    ) -> Result<(), LedgerError>;

    /// Whether `account` holds a balance slot for `asset`.
    fn is_registered(&self, account: &AccountAddress, asset: &Asset) -> Result<bool, LedgerError>;

    /// Open a balance slot for `asset` on `account`. Idempotent.
    fn register(&self, account: &AccountAddress, asset: &Asset) -> Result<(), LedgerError>;
}
