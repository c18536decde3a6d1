use std::fs;
use std::path::{Path, PathBuf};

use duoswap_core::{serialize, Address};
use tracing::debug;

use crate::book::{BalanceBook, Balances};
use crate::error::LedgerError;
use crate::ledger::AssetLedger;

/// File-backed asset ledger using a single snapshot file.
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
    book: BalanceBook,
    fresh: bool,
}

impl FileLedger {
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, LedgerError> {
        let path = path.into();
        let (committed, fresh) = if path.exists() {
            let bytes = fs::read(&path).map_err(|e| LedgerError::Storage(e.to_string()))?;
            if bytes.is_empty() {
                (Balances::default(), true)
            } else {
                let balances: Balances = serialize::from_bytes(&bytes)
                    .map_err(|e| LedgerError::Serialization(e.to_string()))?;
                (balances, false)
            }
        } else {
            (Balances::default(), true)
        };

        debug!(
            "Opened ledger at {:?} ({} balances)",
            path,
            committed.balances.len()
        );

        Ok(FileLedger {
            path,
            book: BalanceBook::from_committed(committed),
            fresh,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when no snapshot existed at open time
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    fn flush_to_disk(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| LedgerError::Storage(e.to_string()))?;
        }

        let bytes = serialize::to_bytes(self.book.committed())
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, &bytes).map_err(|e| LedgerError::Storage(e.to_string()))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| LedgerError::Storage(e.to_string()))?;
        Ok(())
    }
}

impl AssetLedger for FileLedger {
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
        if !self.book.has_pending() {
            return Ok(());
        }
        self.book.commit();
        self.flush_to_disk()?;
        self.fresh = false;
        Ok(())
    }

    fn rollback(&mut self) {
        self.book.rollback();
    }
}
