//! Duoswap Core - Identifiers, events, operations, and serialization
//!
//! This crate provides the foundational types shared by the Duoswap
//! ledger, pool engine, and node.

pub mod address;
pub mod error;
pub mod serialize;
pub mod types;

pub use address::{hash_blake3, Address};
pub use error::CoreError;
pub use types::*;
