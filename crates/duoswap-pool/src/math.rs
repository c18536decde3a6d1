//! Integer pricing and share arithmetic. All divisions floor, so rounding
//! always favors the pool over the caller.

use duoswap_core::{BPS_DENOM, TOTAL_FEE_BPS, TREASURY_FEE_BPS};

use crate::error::AmmError;

/// Breakdown of a swap against fixed reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    /// Gross input received by the pool
    pub amount_in: u64,
    /// Portion of the input routed to the treasury
    pub treasury_fee: u64,
    /// Input after the total fee, used for pricing
    pub effective_in: u64,
    /// Output paid to the trader
    pub amount_out: u64,
}

/// Price `amount_in` against `(reserve_in, reserve_out)` with the
/// constant-product closed form on the fee-adjusted input.
pub fn quote_swap(amount_in: u64, reserve_in: u64, reserve_out: u64) -> Result<SwapQuote, AmmError> {
    if amount_in == 0 {
        return Err(AmmError::InsufficientInput);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }

    let effective_in =
        (amount_in as u128) * ((BPS_DENOM - TOTAL_FEE_BPS) as u128) / (BPS_DENOM as u128);
    let treasury_fee = (amount_in as u128) * (TREASURY_FEE_BPS as u128) / (BPS_DENOM as u128);

    let numerator = (reserve_out as u128) * effective_in;
    let denominator = (reserve_in as u128) + effective_in;
    let amount_out = numerator / denominator;

    Ok(SwapQuote {
        amount_in,
        treasury_fee: treasury_fee as u64,
        effective_in: effective_in as u64,
        amount_out: amount_out as u64,
    })
}

/// Shares for the first deposit into an empty pool: geometric mean
pub fn initial_shares(amount_a: u64, amount_b: u64) -> u64 {
    integer_sqrt((amount_a as u128) * (amount_b as u128))
}

/// Shares for a deposit into a seeded pool, proportional to the smaller
/// relative contribution
pub fn proportional_shares(
    amount_a: u64,
    amount_b: u64,
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u64,
) -> Result<u64, AmmError> {
    if reserve_a == 0 || reserve_b == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    let from_a = (amount_a as u128) * (total_shares as u128) / (reserve_a as u128);
    let from_b = (amount_b as u128) * (total_shares as u128) / (reserve_b as u128);
    u64::try_from(from_a.min(from_b)).map_err(|_| AmmError::Overflow)
}

/// Reserve amount redeemed by `shares` out of `total_shares`
pub fn redeemed_amount(reserve: u64, shares: u64, total_shares: u64) -> u64 {
    if total_shares == 0 {
        return 0;
    }
    ((reserve as u128) * (shares as u128) / (total_shares as u128)) as u64
}

fn integer_sqrt(n: u128) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x0 = n;
    let mut x1 = (x0 + 1) >> 1;
    while x1 < x0 {
        x0 = x1;
        x1 = (x1 + n / x1) >> 1;
    }
    x0 as u64
}
