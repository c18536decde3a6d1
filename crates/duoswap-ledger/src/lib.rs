//! Duoswap Ledger - Transferable asset accounting
//!
//! This crate provides the asset ledger the pool engine settles against:
//! balances and supply per asset, with staged writes that are either
//! committed or rolled back as a unit.

pub mod book;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod persistent;

pub use book::BalanceBook;
pub use error::LedgerError;
pub use ledger::AssetLedger;
pub use memory::MemoryLedger;
pub use persistent::FileLedger;
