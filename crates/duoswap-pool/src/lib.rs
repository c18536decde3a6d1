//! Duoswap Pool - Constant-product liquidity pools
//!
//! This crate provides the share ledger, the pool engine, the pool
//! registry, and an exchange that executes operations against an asset
//! ledger.

pub mod error;
pub mod exchange;
pub mod executor;
pub mod math;
pub mod pool;
pub mod registry;
pub mod shares;

pub use error::AmmError;
pub use exchange::Exchange;
pub use executor::{op_name, ExecutionResult};
pub use math::{quote_swap, SwapQuote};
pub use pool::{Pool, PoolPhase, SwapOutcome};
pub use registry::{PoolRegistry, RegistryConfig, DEFAULT_SHARE_NAME, DEFAULT_SHARE_SYMBOL};
pub use shares::ShareLedger;
