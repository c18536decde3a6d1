use duoswap_core::{Address, AmmEvent};
use duoswap_ledger::AssetLedger;
use tracing::debug;

use crate::error::AmmError;
use crate::pool::{Pool, SwapOutcome};
use crate::registry::PoolRegistry;

/// The asset ledger, the pool registry, and the observer event log
/// hosted together. Every mutating call runs to completion or leaves
/// all three unchanged.
pub struct Exchange<L: AssetLedger> {
    ledger: L,
    registry: PoolRegistry,
    events: Vec<AmmEvent>,
}

impl<L: AssetLedger> Exchange<L> {
    pub fn new(ledger: L, registry: PoolRegistry) -> Self {
        Exchange {
            ledger,
            registry,
            events: Vec::new(),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// Every event emitted so far, oldest first
    pub fn events(&self) -> &[AmmEvent] {
        &self.events
    }

    pub fn into_parts(self) -> (L, PoolRegistry) {
        (self.ledger, self.registry)
    }

    pub fn balance_of(&self, asset: &Address, holder: &Address) -> u64 {
        self.ledger.balance_of(asset, holder)
    }

    pub fn pool(&self, address: &Address) -> Result<&Pool, AmmError> {
        self.registry
            .pool(address)
            .ok_or_else(|| AmmError::PoolNotFound(address.to_hex()))
    }

    /// Issue units of a mock asset
    pub fn mint_asset(&mut self, asset: &Address, to: &Address, amount: u64) -> Result<(), AmmError> {
        if asset.is_zero() {
            return Err(AmmError::InvalidTokenAddress);
        }
        self.settle(|ledger| ledger.mint(asset, to, amount))
    }

    pub fn transfer(
        &mut self,
        sender: &Address,
        asset: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), AmmError> {
        if amount == 0 {
            return Err(AmmError::InsufficientInput);
        }
        self.settle(|ledger| ledger.transfer(asset, sender, to, amount))
    }

    pub fn create_pool(&mut self, asset_x: Address, asset_y: Address) -> Result<Address, AmmError> {
        self.registry.create_pool(asset_x, asset_y, &mut self.events)
    }

    pub fn lookup_pool(&self, asset_x: &Address, asset_y: &Address) -> Option<Address> {
        self.registry.lookup_pool(asset_x, asset_y)
    }

    pub fn add_liquidity(
        &mut self,
        sender: &Address,
        pool: &Address,
        amount_a: u64,
        amount_b: u64,
    ) -> Result<u64, AmmError> {
        let target = self
            .registry
            .pool_mut(pool)
            .ok_or_else(|| AmmError::PoolNotFound(pool.to_hex()))?;
        target.add_liquidity(&mut self.ledger, sender, amount_a, amount_b, &mut self.events)
    }

    pub fn remove_liquidity(
        &mut self,
        sender: &Address,
        pool: &Address,
        shares: u64,
    ) -> Result<(u64, u64), AmmError> {
        let target = self
            .registry
            .pool_mut(pool)
            .ok_or_else(|| AmmError::PoolNotFound(pool.to_hex()))?;
        target.remove_liquidity(&mut self.ledger, sender, shares, &mut self.events)
    }

    pub fn swap(
        &mut self,
        sender: &Address,
        pool: &Address,
        min_out_a: u64,
        min_out_b: u64,
    ) -> Result<SwapOutcome, AmmError> {
        let target = self
            .registry
            .pool_mut(pool)
            .ok_or_else(|| AmmError::PoolNotFound(pool.to_hex()))?;
        target.swap(&mut self.ledger, sender, min_out_a, min_out_b, &mut self.events)
    }

    pub fn swap_exact_input(
        &mut self,
        sender: &Address,
        pool: &Address,
        asset_in: &Address,
        amount_in: u64,
        min_out: u64,
    ) -> Result<SwapOutcome, AmmError> {
        let target = self
            .registry
            .pool_mut(pool)
            .ok_or_else(|| AmmError::PoolNotFound(pool.to_hex()))?;
        target.swap_exact_input(
            &mut self.ledger,
            sender,
            asset_in,
            amount_in,
            min_out,
            &mut self.events,
        )
    }

    pub fn transfer_shares(
        &mut self,
        sender: &Address,
        pool: &Address,
        to: &Address,
        amount: u64,
    ) -> Result<(), AmmError> {
        let target = self
            .registry
            .pool_mut(pool)
            .ok_or_else(|| AmmError::PoolNotFound(pool.to_hex()))?;
        target.transfer_shares(sender, to, amount)?;
        debug!("Transferred {} shares of pool {} to {}", amount, pool.short(), to.short());
        Ok(())
    }

    /// Apply a ledger-only change and commit it, or roll it back on failure
    fn settle<F>(&mut self, f: F) -> Result<(), AmmError>
    where
        F: FnOnce(&mut L) -> Result<(), duoswap_ledger::LedgerError>,
    {
        let result = f(&mut self.ledger).and_then(|_| self.ledger.commit());
        if let Err(e) = result {
            self.ledger.rollback();
            return Err(e.into());
        }
        Ok(())
    }
}
