use std::collections::BTreeMap;

use duoswap_core::Address;
use serde::{Deserialize, Serialize};

/// Committed balances and supplies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    /// (asset, holder) -> amount; zero balances are not stored
    pub balances: BTreeMap<(Address, Address), u64>,
    /// asset -> outstanding supply
    pub supply: BTreeMap<Address, u64>,
}

/// Committed balances plus a pending overlay of staged writes
#[derive(Debug, Clone, Default)]
pub struct BalanceBook {
    committed: Balances,
    pending_balances: BTreeMap<(Address, Address), u64>,
    pending_supply: BTreeMap<Address, u64>,
}

impl BalanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_committed(committed: Balances) -> Self {
        BalanceBook {
            committed,
            pending_balances: BTreeMap::new(),
            pending_supply: BTreeMap::new(),
        }
    }

    pub fn committed(&self) -> &Balances {
        &self.committed
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_balances.is_empty() || !self.pending_supply.is_empty()
    }

    pub fn balance(&self, asset: &Address, holder: &Address) -> u64 {
        let key = (*asset, *holder);
        // Check pending writes first
        if let Some(amount) = self.pending_balances.get(&key) {
            return *amount;
        }
        self.committed.balances.get(&key).copied().unwrap_or(0)
    }

    pub fn supply(&self, asset: &Address) -> u64 {
        if let Some(amount) = self.pending_supply.get(asset) {
            return *amount;
        }
        self.committed.supply.get(asset).copied().unwrap_or(0)
    }

    pub fn stage_balance(&mut self, asset: &Address, holder: &Address, amount: u64) {
        self.pending_balances.insert((*asset, *holder), amount);
    }

    pub fn stage_supply(&mut self, asset: &Address, amount: u64) {
        self.pending_supply.insert(*asset, amount);
    }

    /// Fold staged writes into the committed set
    pub fn commit(&mut self) {
        for (key, amount) in std::mem::take(&mut self.pending_balances) {
            if amount == 0 {
                self.committed.balances.remove(&key);
            } else {
                self.committed.balances.insert(key, amount);
            }
        }
        for (asset, amount) in std::mem::take(&mut self.pending_supply) {
            if amount == 0 {
                self.committed.supply.remove(&asset);
            } else {
                self.committed.supply.insert(asset, amount);
            }
        }
    }

    pub fn rollback(&mut self) {
        self.pending_balances.clear();
        self.pending_supply.clear();
    }
}
