use serde::{Deserialize, Serialize};

use crate::address::Address;

/// An operation submitted to the exchange by a sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Op {
    /// Issue units of a mock asset (faucet)
    MintAsset {
        asset: Address,
        to: Address,
        amount: u64,
    },

    /// Move units of an asset from the sender
    Transfer {
        asset: Address,
        to: Address,
        amount: u64,
    },

    CreatePool {
        asset_x: Address,
        asset_y: Address,
    },

    AddLiquidity {
        pool: Address,
        amount_a: u64,
        amount_b: u64,
    },

    RemoveLiquidity {
        pool: Address,
        shares: u64,
    },

    /// Push-based swap: input must already sit in the pool's custody
    Swap {
        pool: Address,
        min_out_a: u64,
        min_out_b: u64,
    },

    /// Pull-based swap: the pool collects `amount_in` from the sender
    SwapExactInput {
        pool: Address,
        asset_in: Address,
        amount_in: u64,
        min_out: u64,
    },

    TransferShares {
        pool: Address,
        to: Address,
        amount: u64,
    },
}
