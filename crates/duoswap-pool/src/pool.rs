use duoswap_core::{compute_pool_address, Address, AmmEvent, PairKey};
use duoswap_ledger::AssetLedger;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AmmError;
use crate::math::{initial_shares, proportional_shares, quote_swap, redeemed_amount};
use crate::shares::ShareLedger;

/// Operational phase of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPhase {
    /// Zero reserves and zero shares
    Empty,
    /// Non-zero reserves backed by outstanding shares
    Seeded,
}

/// Result of a completed swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    pub asset_in: Address,
    pub asset_out: Address,
    pub amount_in: u64,
    pub amount_out: u64,
    pub treasury_fee: u64,
}

/// A two-asset constant-product pool.
///
/// The pool's address holds custody of both reserves in the asset ledger;
/// `reserve_a` and `reserve_b` mirror that custody after every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    address: Address,
    asset_a: Address,
    asset_b: Address,
    reserve_a: u64,
    reserve_b: u64,
    treasury: Address,
    shares: ShareLedger,
}

impl Pool {
    pub fn new(
        asset_x: Address,
        asset_y: Address,
        treasury: Address,
        share_name: &str,
        share_symbol: &str,
    ) -> Result<Self, AmmError> {
        if asset_x.is_zero() || asset_y.is_zero() {
            return Err(AmmError::InvalidTokenAddress);
        }
        if asset_x == asset_y {
            return Err(AmmError::TokensMustBeDifferent);
        }
        if treasury.is_zero() {
            return Err(AmmError::InvalidAddress);
        }

        let pair = PairKey::new(asset_x, asset_y);
        let address = compute_pool_address(pair.asset_a, pair.asset_b);
        let shares = ShareLedger::new(share_name, share_symbol, address)?;

        Ok(Pool {
            address,
            asset_a: pair.asset_a,
            asset_b: pair.asset_b,
            reserve_a: 0,
            reserve_b: 0,
            treasury,
            shares,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn asset_a(&self) -> Address {
        self.asset_a
    }

    pub fn asset_b(&self) -> Address {
        self.asset_b
    }

    pub fn pair(&self) -> PairKey {
        PairKey {
            asset_a: self.asset_a,
            asset_b: self.asset_b,
        }
    }

    pub fn reserves(&self) -> (u64, u64) {
        (self.reserve_a, self.reserve_b)
    }

    pub fn treasury(&self) -> Address {
        self.treasury
    }

    pub fn shares(&self) -> &ShareLedger {
        &self.shares
    }

    pub fn total_shares(&self) -> u64 {
        self.shares.total_supply()
    }

    pub fn share_balance(&self, holder: &Address) -> u64 {
        self.shares.balance_of(holder)
    }

    pub fn phase(&self) -> PoolPhase {
        if self.shares.total_supply() == 0 {
            PoolPhase::Empty
        } else {
            PoolPhase::Seeded
        }
    }

    /// Output the pool would pay for `amount_in` of `asset_in` right now
    pub fn quote(&self, asset_in: &Address, amount_in: u64) -> Result<u64, AmmError> {
        if !self.pair().contains(asset_in) {
            return Err(AmmError::AssetNotInPool(asset_in.to_hex()));
        }
        let (reserve_in, reserve_out) = if *asset_in == self.asset_a {
            (self.reserve_a, self.reserve_b)
        } else {
            (self.reserve_b, self.reserve_a)
        };
        Ok(quote_swap(amount_in, reserve_in, reserve_out)?.amount_out)
    }

    /// Deposit both assets and mint shares to `caller`
    pub fn add_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        amount_a: u64,
        amount_b: u64,
        events: &mut Vec<AmmEvent>,
    ) -> Result<u64, AmmError> {
        self.atomically(ledger, events, |pool, ledger, events| {
            pool.apply_add_liquidity(ledger, caller, amount_a, amount_b, events)
        })
    }

    /// Burn `share_amount` of `caller`'s shares and pay out both reserves pro rata
    pub fn remove_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        share_amount: u64,
        events: &mut Vec<AmmEvent>,
    ) -> Result<(u64, u64), AmmError> {
        self.atomically(ledger, events, |pool, ledger, events| {
            pool.apply_remove_liquidity(ledger, caller, share_amount, events)
        })
    }

    /// Push-based swap.
    ///
    /// The input must already have been transferred to the pool's address.
    /// Exactly one of `min_out_a` / `min_out_b` must be non-zero; it names
    /// the output asset and its slippage floor.
    pub fn swap<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        min_out_a: u64,
        min_out_b: u64,
        events: &mut Vec<AmmEvent>,
    ) -> Result<SwapOutcome, AmmError> {
        self.atomically(ledger, events, |pool, ledger, events| {
            pool.apply_swap(ledger, caller, min_out_a, min_out_b, events)
        })
    }

    /// Pull-based swap: collects `amount_in` of `asset_in` from `caller`,
    /// then settles through the same path as [`Pool::swap`].
    pub fn swap_exact_input<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        asset_in: &Address,
        amount_in: u64,
        min_out: u64,
        events: &mut Vec<AmmEvent>,
    ) -> Result<SwapOutcome, AmmError> {
        let (min_out_a, min_out_b) = if *asset_in == self.asset_a {
            (0, min_out.max(1))
        } else if *asset_in == self.asset_b {
            (min_out.max(1), 0)
        } else {
            return Err(AmmError::AssetNotInPool(asset_in.to_hex()));
        };
        if amount_in == 0 {
            return Err(AmmError::InsufficientInput);
        }

        self.atomically(ledger, events, |pool, ledger, events| {
            ledger.transfer(asset_in, caller, &pool.address, amount_in)?;
            pool.apply_swap(ledger, caller, min_out_a, min_out_b, events)
        })
    }

    /// Move shares from `caller` to `to`
    pub fn transfer_shares(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), AmmError> {
        self.shares.transfer(caller, to, amount)
    }

    /// Run `f` against a staged copy of the pool. The ledger commits and the
    /// copy replaces `self` only if `f` succeeds; otherwise the ledger rolls
    /// back and nothing changes.
    fn atomically<L, T, F>(
        &mut self,
        ledger: &mut L,
        events: &mut Vec<AmmEvent>,
        f: F,
    ) -> Result<T, AmmError>
    where
        L: AssetLedger,
        F: FnOnce(&mut Pool, &mut L, &mut Vec<AmmEvent>) -> Result<T, AmmError>,
    {
        let mut staged = self.clone();
        let mut staged_events = Vec::new();

        let result = f(&mut staged, ledger, &mut staged_events)
            .and_then(|value| ledger.commit().map(|_| value).map_err(AmmError::from));

        match result {
            Ok(value) => {
                *self = staged;
                events.append(&mut staged_events);
                Ok(value)
            }
            Err(e) => {
                ledger.rollback();
                Err(e)
            }
        }
    }

    /// Callers must be a real identity other than the pool itself; the
    /// pool's custody account moving funds to itself is a ledger no-op.
    fn check_caller(&self, caller: &Address) -> Result<(), AmmError> {
        if caller.is_zero() || *caller == self.address {
            return Err(AmmError::InvalidAddress);
        }
        Ok(())
    }

    fn apply_add_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        amount_a: u64,
        amount_b: u64,
        events: &mut Vec<AmmEvent>,
    ) -> Result<u64, AmmError> {
        self.check_caller(caller)?;
        if amount_a == 0 || amount_b == 0 {
            return Err(AmmError::InsufficientInput);
        }

        let minted = match self.phase() {
            PoolPhase::Empty => initial_shares(amount_a, amount_b),
            PoolPhase::Seeded => proportional_shares(
                amount_a,
                amount_b,
                self.reserve_a,
                self.reserve_b,
                self.shares.total_supply(),
            )?,
        };
        if minted == 0 {
            return Err(AmmError::InsufficientInput);
        }

        ledger.transfer(&self.asset_a, caller, &self.address, amount_a)?;
        ledger.transfer(&self.asset_b, caller, &self.address, amount_b)?;

        if self.phase() == PoolPhase::Empty {
            self.reserve_a = amount_a;
            self.reserve_b = amount_b;
        } else {
            self.reserve_a = self.reserve_a.checked_add(amount_a).ok_or(AmmError::Overflow)?;
            self.reserve_b = self.reserve_b.checked_add(amount_b).ok_or(AmmError::Overflow)?;
        }

        let pool_address = self.address;
        self.shares.mint(&pool_address, caller, minted, events)?;

        events.push(AmmEvent::AddLiquidity {
            pool: self.address,
            provider: *caller,
            amount_a,
            amount_b,
        });

        debug!(
            "Added liquidity to pool {}: {} / {} minted {} shares",
            self.address.short(),
            amount_a,
            amount_b,
            minted
        );

        Ok(minted)
    }

    fn apply_remove_liquidity<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        share_amount: u64,
        events: &mut Vec<AmmEvent>,
    ) -> Result<(u64, u64), AmmError> {
        self.check_caller(caller)?;
        let have = self.shares.balance_of(caller);
        if have < share_amount {
            return Err(AmmError::InsufficientBalance {
                have,
                need: share_amount,
            });
        }
        if share_amount == 0 {
            return Err(AmmError::InsufficientInput);
        }

        let total = self.shares.total_supply();
        let out_a = redeemed_amount(self.reserve_a, share_amount, total);
        let out_b = redeemed_amount(self.reserve_b, share_amount, total);
        if out_a == 0 && out_b == 0 {
            return Err(AmmError::InsufficientLiquidity);
        }

        let pool_address = self.address;
        self.shares.burn(&pool_address, caller, share_amount, events)?;

        self.reserve_a -= out_a;
        self.reserve_b -= out_b;

        ledger.transfer(&self.asset_a, &self.address, caller, out_a)?;
        ledger.transfer(&self.asset_b, &self.address, caller, out_b)?;

        events.push(AmmEvent::RemoveLiquidity {
            pool: self.address,
            provider: *caller,
            amount_a: out_a,
            amount_b: out_b,
        });

        debug!(
            "Removed liquidity from pool {}: {} / {} burned {} shares",
            self.address.short(),
            out_a,
            out_b,
            share_amount
        );

        Ok((out_a, out_b))
    }

    fn apply_swap<L: AssetLedger>(
        &mut self,
        ledger: &mut L,
        caller: &Address,
        min_out_a: u64,
        min_out_b: u64,
        events: &mut Vec<AmmEvent>,
    ) -> Result<SwapOutcome, AmmError> {
        self.check_caller(caller)?;

        // The single non-zero minimum selects the output side
        let a_to_b = match (min_out_a, min_out_b) {
            (0, 0) => return Err(AmmError::InsufficientOutputAmount),
            (0, _) => true,
            (_, 0) => false,
            _ => return Err(AmmError::InsufficientOutputAmount),
        };
        let (asset_in, asset_out, reserve_in, reserve_out, min_out) = if a_to_b {
            (self.asset_a, self.asset_b, self.reserve_a, self.reserve_b, min_out_b)
        } else {
            (self.asset_b, self.asset_a, self.reserve_b, self.reserve_a, min_out_a)
        };

        if reserve_in == 0 || reserve_out == 0 || min_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }

        let custody = ledger.balance_of(&asset_in, &self.address);
        let amount_in = custody.saturating_sub(reserve_in);
        if amount_in == 0 {
            return Err(AmmError::InsufficientInput);
        }

        let quote = quote_swap(amount_in, reserve_in, reserve_out)?;
        if quote.amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }
        if quote.amount_out < min_out {
            return Err(AmmError::InsufficientOutputAmount);
        }

        ledger.transfer(&asset_in, &self.address, &self.treasury, quote.treasury_fee)?;
        ledger.transfer(&asset_out, &self.address, caller, quote.amount_out)?;

        let new_reserve_in = reserve_in
            .checked_add(amount_in - quote.treasury_fee)
            .ok_or(AmmError::Overflow)?;
        let new_reserve_out = reserve_out - quote.amount_out;
        let (in_a, in_b, out_a, out_b) = if a_to_b {
            self.reserve_a = new_reserve_in;
            self.reserve_b = new_reserve_out;
            (amount_in, 0, 0, quote.amount_out)
        } else {
            self.reserve_b = new_reserve_in;
            self.reserve_a = new_reserve_out;
            (0, amount_in, quote.amount_out, 0)
        };

        events.push(AmmEvent::Swap {
            pool: self.address,
            trader: *caller,
            in_a,
            in_b,
            out_a,
            out_b,
        });

        debug!(
            "Swap in pool {}: in {} out {} treasury fee {}",
            self.address.short(),
            amount_in,
            quote.amount_out,
            quote.treasury_fee
        );

        Ok(SwapOutcome {
            asset_in,
            asset_out,
            amount_in,
            amount_out: quote.amount_out,
            treasury_fee: quote.treasury_fee,
        })
    }
}
