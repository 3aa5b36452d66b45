//! Treasury: the organization's holdings on the external ledger.
//!
//! Holding a [`Treasury`] is the capability to move funds out of its account;
//! only the execution engine does so, and only for approved transfers.

use crate::error::{GovernanceError, Result};
use quorum_types::{AccountAddress, Asset, Ledger};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasury {
    account: AccountAddress,
}

impl Treasury {
    pub fn new(account: AccountAddress) -> Self {
        Self { account }
    }

    /// The ledger account holding the treasury's funds.
    pub fn account(&self) -> &AccountAddress {
        &self.account
    }

    pub fn balance<L: Ledger + ?Sized>(&self, ledger: &L, asset: &Asset) -> Result<u64> {
        Ok(ledger.balance(&self.account, asset)?)
    }

    /// Fail unless the treasury can cover `amount` of `asset`.
    pub fn ensure_funds<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        asset: &Asset,
        amount: u64,
    ) -> Result<()> {
        let available = self.balance(ledger, asset)?;
        if available < amount {
            return Err(GovernanceError::InsufficientTreasuryBalance {
                asset: asset.to_string(),
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    /// Open a treasury balance slot for `asset` if there is none yet.
    ///
    /// Returns whether a registration happened.
    pub fn ensure_registered<L: Ledger + ?Sized>(&self, ledger: &L, asset: &Asset) -> Result<bool> {
        if ledger.is_registered(&self.account, asset)? {
            return Ok(false);
        }
        ledger.register(&self.account, asset)?;
        tracing::info!(treasury = %self.account, %asset, "registered treasury balance");
        Ok(true)
    }

    /// Move `amount` of `asset` from the treasury to `recipient`.
    pub fn pay<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        asset: &Asset,
        recipient: &AccountAddress,
        amount: u64,
    ) -> Result<()> {
        self.ensure_funds(ledger, asset, amount)?;
        ledger.transfer(&self.account, asset, recipient, amount)?;
        tracing::info!(treasury = %self.account, %asset, %recipient, amount, "treasury payout");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_nullables::NullLedger;
    use quorum_types::{AssetId, CurrencyName};

    fn treasury() -> Treasury {
        Treasury::new(AccountAddress::new("treasury"))
    }

    #[test]
    fn pay_moves_funds() {
        let ledger = NullLedger::new();
        let asset = Asset::Token(AssetId::new("usdc"));
        ledger.mint(treasury().account(), asset.clone(), 100);

        let bob = AccountAddress::new("bob");
        treasury().pay(&ledger, &asset, &bob, 60).unwrap();
        assert_eq!(treasury().balance(&ledger, &asset).unwrap(), 40);
        assert_eq!(ledger.balance(&bob, &asset).unwrap(), 60);
    }

    #[test]
    fn pay_checks_funds_first() {
        let ledger = NullLedger::new();
        let asset = Asset::Token(AssetId::new("usdc"));
        ledger.mint(treasury().account(), asset.clone(), 5);

        let err = treasury()
            .pay(&ledger, &asset, &AccountAddress::new("bob"), 6)
            .unwrap_err();
        assert!(matches!(
            err,
            GovernanceError::InsufficientTreasuryBalance {
                needed: 6,
                available: 5,
                ..
            }
        ));
    }

    #[test]
    fn registration_happens_once() {
        let ledger = NullLedger::new();
        let coin = Asset::Currency(CurrencyName::new(b"coin".to_vec()));
        assert!(treasury().ensure_registered(&ledger, &coin).unwrap());
        assert!(!treasury().ensure_registered(&ledger, &coin).unwrap());
    }
}
