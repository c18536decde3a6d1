use duoswap_core::Address;

use crate::book::BalanceBook;
use crate::error::LedgerError;
use crate::ledger::AssetLedger;

/// In-memory asset ledger
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    book: BalanceBook,
}

impl MemoryLedger {
    pub fn new() -> Self {
        MemoryLedger {
            book: BalanceBook::new(),
        }
    }
}

impl AssetLedger for MemoryLedger {
    fn balance_of(&self, asset: &Address, holder: &Address) -> u64 {
        self.book.balance(asset, holder)
    }

    fn total_supply(&self, asset: &Address) -> u64 {
        self.book.supply(asset)
    }

    fn set_balance(&mut self, asset: &Address, holder: &Address, amount: u64) {
        self.book.stage_balance(asset, holder, amount);
    }

    fn set_total_supply(&mut self, asset: &Address, amount: u64) {
        self.book.stage_supply(asset, amount);
    }

    fn commit(&mut self) -> Result<(), LedgerError> {
        self.book.commit();
        Ok(())
    }

    fn rollback(&mut self) {
        self.book.rollback();
    }
}
