use std::collections::BTreeMap;

use duoswap_core::{Address, AmmEvent};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AmmError;

/// Claim-token accounting for a single pool.
///
/// `mint` and `burn` are gated on the caller matching the owning pool,
/// which is bound at construction and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLedger {
    name: String,
    symbol: String,
    owner: Address,
    total_supply: u64,
    balances: BTreeMap<Address, u64>,
}

impl ShareLedger {
    pub fn new(name: &str, symbol: &str, owner: Address) -> Result<Self, AmmError> {
        if owner.is_zero() {
            return Err(AmmError::InvalidAddress);
        }
        Ok(ShareLedger {
            name: name.to_string(),
            symbol: symbol.to_string(),
            owner,
            total_supply: 0,
            balances: BTreeMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The pool allowed to mint and burn
    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn balance_of(&self, holder: &Address) -> u64 {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    /// Holders with a non-zero balance
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &u64)> {
        self.balances.iter()
    }

    fn authorize(&self, caller: &Address) -> Result<(), AmmError> {
        if *caller != self.owner {
            return Err(AmmError::Unauthorized);
        }
        Ok(())
    }

    /// Issue `amount` shares to `holder`
    pub fn mint(
        &mut self,
        caller: &Address,
        holder: &Address,
        amount: u64,
        events: &mut Vec<AmmEvent>,
    ) -> Result<(), AmmError> {
        self.authorize(caller)?;
        if holder.is_zero() {
            return Err(AmmError::InvalidAddress);
        }
        if amount == 0 {
            return Err(AmmError::InsufficientInput);
        }

        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(AmmError::Overflow)?;
        let balance = self
            .balance_of(holder)
            .checked_add(amount)
            .ok_or(AmmError::Overflow)?;
        self.total_supply = supply;
        self.balances.insert(*holder, balance);

        events.push(AmmEvent::LpTokenMinted {
            pool: self.owner,
            to: *holder,
            amount,
        });
        debug!("Minted {} {} to {}", amount, self.symbol, holder.short());
        Ok(())
    }

    /// Redeem `amount` shares held by `holder`
    pub fn burn(
        &mut self,
        caller: &Address,
        holder: &Address,
        amount: u64,
        events: &mut Vec<AmmEvent>,
    ) -> Result<(), AmmError> {
        self.authorize(caller)?;
        if holder.is_zero() {
            return Err(AmmError::InvalidAddress);
        }
        if amount == 0 {
            return Err(AmmError::InsufficientInput);
        }

        let have = self.balance_of(holder);
        if have < amount {
            return Err(AmmError::InsufficientBalance { have, need: amount });
        }
        self.set_balance(holder, have - amount);
        self.total_supply -= amount;

        events.push(AmmEvent::LpTokenBurned {
            pool: self.owner,
            from: *holder,
            amount,
        });
        debug!("Burned {} {} from {}", amount, self.symbol, holder.short());
        Ok(())
    }

    /// Move shares between holders
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: u64) -> Result<(), AmmError> {
        if from.is_zero() || to.is_zero() {
            return Err(AmmError::InvalidAddress);
        }
        if amount == 0 {
            return Err(AmmError::InsufficientInput);
        }
        let have = self.balance_of(from);
        if have < amount {
            return Err(AmmError::InsufficientBalance { have, need: amount });
        }
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(AmmError::Overflow)?;
        self.set_balance(from, have - amount);
        self.balances.insert(*to, to_balance);
        Ok(())
    }

    fn set_balance(&mut self, holder: &Address, amount: u64) {
        if amount == 0 {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, amount);
        }
    }
}
