use duoswap_core::Address;
use tracing::debug;

use crate::error::LedgerError;

/// Asset ledger the pools settle against.
///
/// Writes are staged until `commit`; `rollback` discards everything staged
/// since the last commit. Reads always observe staged writes.
pub trait AssetLedger {
    /// Balance of `holder` in `asset`
    fn balance_of(&self, asset: &Address, holder: &Address) -> u64;

    /// Outstanding supply of `asset`
    fn total_supply(&self, asset: &Address) -> u64;

    /// Stage a balance write
    fn set_balance(&mut self, asset: &Address, holder: &Address, amount: u64);

    /// Stage a supply write
    fn set_total_supply(&mut self, asset: &Address, amount: u64);

    /// Commit staged writes
    fn commit(&mut self) -> Result<(), LedgerError>;

    /// Discard staged writes
    fn rollback(&mut self);

    /// Move `amount` of `asset` between holders
    fn transfer(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        let have = self.balance_of(asset, from);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }
        if from == to || amount == 0 {
            return Ok(());
        }
        let to_balance = self
            .balance_of(asset, to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.set_balance(asset, from, have - amount);
        self.set_balance(asset, to, to_balance);

        debug!(
            "Ledger transfer {} of {} from {} to {}",
            amount,
            asset.short(),
            from.short(),
            to.short()
        );
        Ok(())
    }

    /// Issue new units of `asset` to `to`
    fn mint(&mut self, asset: &Address, to: &Address, amount: u64) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::InvalidAddress);
        }
        let supply = self
            .total_supply(asset)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = self
            .balance_of(asset, to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.set_total_supply(asset, supply);
        self.set_balance(asset, to, balance);
        Ok(())
    }

    /// Destroy units of `asset` held by `from`
    fn burn(&mut self, asset: &Address, from: &Address, amount: u64) -> Result<(), LedgerError> {
        let have = self.balance_of(asset, from);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }
        let supply = self.total_supply(asset).saturating_sub(amount);
        self.set_balance(asset, from, have - amount);
        self.set_total_supply(asset, supply);
        Ok(())
    }
}
