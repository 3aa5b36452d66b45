//! Nullable ledger: in-memory balances and supplies for testing.

use quorum_types::{AccountAddress, Asset, AssetId, Ledger, LedgerError};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
struct LedgerState {
    balances: HashMap<(AccountAddress, Asset), u64>,
    registered: HashSet<(AccountAddress, Asset)>,
    supplies: HashMap<AssetId, u128>,
}

/// An in-memory ledger.
///
/// - Fungible assets ([`Asset::Token`]) never need registration.
/// - Currencies must be registered on the source account before it can send;
///   recipients are registered automatically on deposit.
/// - Supply is tracked per token asset and moves with `mint`/`burn`.
pub struct NullLedger {
    state: Mutex<LedgerState>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
        }
    }

    /// Credit `amount` to `account`, growing the supply of token assets.
    pub fn mint(&self, account: &AccountAddress, asset: impl Into<Asset>, amount: u64) {
        let asset = asset.into();
        let mut state = self.state.lock().unwrap();
        if let Asset::Token(id) = &asset {
            *state.supplies.entry(id.clone()).or_insert(0) += u128::from(amount);
        }
        state.registered.insert((account.clone(), asset.clone()));
        *state.balances.entry((account.clone(), asset)).or_insert(0) += amount;
    }

    /// Debit `amount` from `account`, shrinking the supply of token assets.
    pub fn burn(
        &self,
        account: &AccountAddress,
        asset: impl Into<Asset>,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let asset = asset.into();
        let mut state = self.state.lock().unwrap();
        let key = (account.clone(), asset.clone());
        let available = state.balances.get(&key).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: account.clone(),
                needed: amount,
                available,
            });
        }
        state.balances.insert(key, available - amount);
        if let Asset::Token(id) = &asset {
            if let Some(supply) = state.supplies.get_mut(id) {
                *supply -= u128::from(amount);
            }
        }
        Ok(())
    }

    /// Set the balance of `account` outright, adjusting token supply by the
    /// difference.
    pub fn set_balance(&self, account: &AccountAddress, asset: impl Into<Asset>, amount: u64) {
        let asset = asset.into();
        let mut state = self.state.lock().unwrap();
        let key = (account.clone(), asset.clone());
        let previous = state.balances.insert(key.clone(), amount).unwrap_or(0);
        state.registered.insert(key);
        if let Asset::Token(id) = &asset {
            let supply = state.supplies.entry(id.clone()).or_insert(0);
            *supply = *supply + u128::from(amount) - u128::from(previous).min(*supply);
        }
    }

    /// Override the recorded supply of a token asset.
    pub fn set_total_supply(&self, asset: &AssetId, supply: u128) {
        self.state
            .lock()
            .unwrap()
            .supplies
            .insert(asset.clone(), supply);
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for NullLedger {
    fn balance(&self, account: &AccountAddress, asset: &Asset) -> Result<u64, LedgerError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .balances
            .get(&(account.clone(), asset.clone()))
            .copied()
            .unwrap_or(0))
    }

    fn total_supply(&self, asset: &AssetId) -> Result<u128, LedgerError> {
        self.state
            .lock()
            .unwrap()
            .supplies
            .get(asset)
            .copied()
            .ok_or_else(|| LedgerError::UnknownAsset(asset.to_string()))
    }

    fn transfer(
        &self,
        from: &AccountAddress,
        asset: &Asset,
        to: &AccountAddress,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.lock().unwrap();
        let from_key = (from.clone(), asset.clone());
        if matches!(asset, Asset::Currency(_)) && !state.registered.contains(&from_key) {
            return Err(LedgerError::NotRegistered {
                account: from.clone(),
                asset: asset.to_string(),
            });
        }
        let available = state.balances.get(&from_key).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from.clone(),
                needed: amount,
                available,
            });
        }
        state.balances.insert(from_key, available - amount);
        let to_key = (to.clone(), asset.clone());
        state.registered.insert(to_key.clone());
        *state.balances.entry(to_key).or_insert(0) += amount;
        Ok(())
    }

    fn is_registered(&self, account: &AccountAddress, asset: &Asset) -> Result<bool, LedgerError> {
        let state = self.state.lock().unwrap();
        Ok(match asset {
            Asset::Token(_) => true,
            Asset::Currency(_) => state.registered.contains(&(account.clone(), asset.clone())),
        })
    }

    fn register(&self, account: &AccountAddress, asset: &Asset) -> Result<(), LedgerError> {
        self.state
            .lock()
            .unwrap()
            .registered
            .insert((account.clone(), asset.clone()));
        Ok(())
    }
}
