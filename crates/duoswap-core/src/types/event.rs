use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Events surfaced to observers. Append-only; never replayed as commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AmmEvent {
    LpTokenMinted {
        pool: Address,
        to: Address,
        amount: u64,
    },
    LpTokenBurned {
        pool: Address,
        from: Address,
        amount: u64,
    },
    AddLiquidity {
        pool: Address,
        provider: Address,
        amount_a: u64,
        amount_b: u64,
    },
    RemoveLiquidity {
        pool: Address,
        provider: Address,
        amount_a: u64,
        amount_b: u64,
    },
    Swap {
        pool: Address,
        trader: Address,
        in_a: u64,
        in_b: u64,
        out_a: u64,
        out_b: u64,
    },
    LiquidityPoolCreated {
        pool: Address,
        asset_a: Address,
        asset_b: Address,
    },
}
