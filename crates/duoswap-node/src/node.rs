use anyhow::Result;
use duoswap_ledger::{AssetLedger, FileLedger};
use duoswap_pool::{ExecutionResult, Exchange, PoolRegistry};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{NodeConfig, ScriptStep};
use crate::snapshot::{load_registry, save_registry};

/// Pool summary for status output
#[derive(Debug, Serialize)]
pub struct PoolStatus {
    pub address: String,
    pub asset_a: String,
    pub asset_b: String,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub total_shares: u64,
    pub treasury: String,
    pub share_symbol: String,
}

/// The exchange host: a file-backed ledger plus a persisted registry
pub struct Node {
    config: NodeConfig,
    exchange: Exchange<FileLedger>,
}

impl Node {
    /// Open the exchange from the data directory, seeding genesis balances
    /// into a fresh ledger
    pub fn open(config: NodeConfig) -> Result<Self> {
        let mut ledger = FileLedger::open(config.ledger_path())?;
        if ledger.is_fresh() {
            info!(
                "Fresh ledger; minting {} genesis balances",
                config.genesis.balances.len()
            );
            for entry in &config.genesis.balances {
                ledger.mint(&entry.asset, &entry.holder, entry.amount)?;
            }
            ledger.commit()?;
        }

        let registry = match load_registry(&config.registry_path())? {
            Some(registry) => {
                if registry.config().treasury != config.treasury {
                    warn!(
                        "Configured treasury {} differs from snapshot treasury {}; keeping snapshot",
                        config.treasury,
                        registry.config().treasury
                    );
                }
                registry
            }
            None => PoolRegistry::new(config.to_registry_config())?,
        };

        check_custody(&ledger, &registry)?;

        info!(
            "Exchange opened with {} pools, ledger at {:?}",
            registry.pool_count(),
            ledger.path()
        );

        Ok(Node {
            config,
            exchange: Exchange::new(ledger, registry),
        })
    }

    /// Execute script steps in order, persisting the registry after each
    /// successful step
    pub fn run_script(&mut self, steps: &[ScriptStep]) -> Result<Vec<ExecutionResult>> {
        let mut results = Vec::with_capacity(steps.len());
        for step in steps {
            let result = self.exchange.execute(&step.sender, &step.op);
            if result.success {
                save_registry(self.exchange.registry(), &self.config.registry_path())?;
            }
            results.push(result);
        }

        let failed = results.iter().filter(|r| !r.success).count();
        info!(
            "Script finished: {} steps, {} failed",
            results.len(),
            failed
        );
        Ok(results)
    }

    pub fn status(&self) -> Vec<PoolStatus> {
        self.exchange
            .registry()
            .pools()
            .map(|pool| {
                let (reserve_a, reserve_b) = pool.reserves();
                PoolStatus {
                    address: pool.address().to_hex(),
                    asset_a: pool.asset_a().to_hex(),
                    asset_b: pool.asset_b().to_hex(),
                    reserve_a,
                    reserve_b,
                    total_shares: pool.total_shares(),
                    treasury: pool.treasury().to_hex(),
                    share_symbol: pool.shares().symbol().to_string(),
                }
            })
            .collect()
    }
}

/// Every pool's recorded reserves must be backed by its custody balance.
///
/// The ledger file is committed before the registry snapshot is written, so
/// a failed snapshot write can leave a registry that claims more than the
/// pool holds. Custody above the reserves is a pending push-based input and
/// is allowed.
fn check_custody<L: AssetLedger>(ledger: &L, registry: &PoolRegistry) -> Result<()> {
    for pool in registry.pools() {
        let (reserve_a, reserve_b) = pool.reserves();
        let custody_a = ledger.balance_of(&pool.asset_a(), &pool.address());
        let custody_b = ledger.balance_of(&pool.asset_b(), &pool.address());
        if custody_a < reserve_a || custody_b < reserve_b {
            return Err(anyhow::anyhow!(
                "Pool {} reserves ({}, {}) exceed custody ({}, {}); registry snapshot is out of sync with the ledger",
                pool.address(),
                reserve_a,
                reserve_b,
                custody_a,
                custody_b
            ));
        }
    }
    Ok(())
}
