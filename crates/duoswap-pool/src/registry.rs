use std::collections::BTreeMap;

use duoswap_core::{Address, AmmEvent, PairKey};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AmmError;
use crate::pool::Pool;

/// Default share token display name
pub const DEFAULT_SHARE_NAME: &str = "Duoswap LP Token";
/// Default share token display symbol
pub const DEFAULT_SHARE_SYMBOL: &str = "DLP";

/// Parameters applied to every pool the registry creates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Protocol fee recipient for all pools
    pub treasury: Address,
    pub share_name: String,
    pub share_symbol: String,
}

impl RegistryConfig {
    pub fn new(treasury: Address) -> Self {
        RegistryConfig {
            treasury,
            share_name: DEFAULT_SHARE_NAME.to_string(),
            share_symbol: DEFAULT_SHARE_SYMBOL.to_string(),
        }
    }
}

/// Creates pools and indexes them by canonical asset pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolRegistry {
    config: RegistryConfig,
    /// Canonical pair -> pool address
    by_pair: BTreeMap<PairKey, Address>,
    /// Pool address -> pool
    pools: BTreeMap<Address, Pool>,
    /// Pool addresses in creation order; append-only
    created: Vec<Address>,
}

impl PoolRegistry {
    pub fn new(config: RegistryConfig) -> Result<Self, AmmError> {
        if config.treasury.is_zero() {
            return Err(AmmError::InvalidAddress);
        }
        Ok(PoolRegistry {
            config,
            by_pair: BTreeMap::new(),
            pools: BTreeMap::new(),
            created: Vec::new(),
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Create the pool for `(asset_x, asset_y)` in either order
    pub fn create_pool(
        &mut self,
        asset_x: Address,
        asset_y: Address,
        events: &mut Vec<AmmEvent>,
    ) -> Result<Address, AmmError> {
        if asset_x.is_zero() || asset_y.is_zero() {
            return Err(AmmError::InvalidTokenAddress);
        }
        if asset_x == asset_y {
            return Err(AmmError::TokensMustBeDifferent);
        }

        let key = PairKey::new(asset_x, asset_y);
        if let Some(existing) = self.by_pair.get(&key) {
            return Err(AmmError::PoolAlreadyExists(existing.to_hex()));
        }

        let pool = Pool::new(
            key.asset_a,
            key.asset_b,
            self.config.treasury,
            &self.config.share_name,
            &self.config.share_symbol,
        )?;
        let address = pool.address();

        self.by_pair.insert(key, address);
        self.pools.insert(address, pool);
        self.created.push(address);

        events.push(AmmEvent::LiquidityPoolCreated {
            pool: address,
            asset_a: key.asset_a,
            asset_b: key.asset_b,
        });

        info!(
            "Created pool {} for {} / {}",
            address,
            key.asset_a.short(),
            key.asset_b.short()
        );

        Ok(address)
    }

    /// Pool registered for the unordered pair, if any
    pub fn lookup_pool(&self, asset_x: &Address, asset_y: &Address) -> Option<Address> {
        self.by_pair.get(&PairKey::new(*asset_x, *asset_y)).copied()
    }

    pub fn pool_count(&self) -> usize {
        self.created.len()
    }

    pub fn pool_at(&self, index: usize) -> Option<Address> {
        self.created.get(index).copied()
    }

    pub fn pool(&self, address: &Address) -> Option<&Pool> {
        self.pools.get(address)
    }

    pub fn pool_mut(&mut self, address: &Address) -> Option<&mut Pool> {
        self.pools.get_mut(address)
    }

    /// Pools in creation order
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.created.iter().filter_map(|address| self.pools.get(address))
    }
}
