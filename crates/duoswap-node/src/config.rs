use std::path::{Path, PathBuf};

use anyhow::Result;
use duoswap_core::{canonical_pair, compute_pool_address, serialize, Address, Op};
use duoswap_pool::{RegistryConfig, DEFAULT_SHARE_NAME, DEFAULT_SHARE_SYMBOL};
use serde::{Deserialize, Serialize};

/// Node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Directory holding the ledger and registry snapshots
    pub data_dir: PathBuf,

    /// Protocol fee recipient for every pool
    pub treasury: Address,

    /// Share token display name
    pub share_name: String,

    /// Share token display symbol
    pub share_symbol: String,

    /// Balances minted into a fresh ledger
    pub genesis: GenesisConfigFile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenesisConfigFile {
    pub balances: Vec<BalanceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub asset: Address,
    pub holder: Address,
    pub amount: u64,
}

/// One scripted operation and who submits it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptStep {
    pub sender: Address,
    pub op: Op,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            data_dir: PathBuf::from("./duoswap-data"),
            treasury: Address::from_label("treasury"),
            share_name: DEFAULT_SHARE_NAME.to_string(),
            share_symbol: DEFAULT_SHARE_SYMBOL.to_string(),
            genesis: GenesisConfigFile::default(),
        }
    }
}

impl NodeConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NodeConfig = serialize::from_json(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serialize::to_json_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            treasury: self.treasury,
            share_name: self.share_name.clone(),
            share_symbol: self.share_symbol.clone(),
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join("ledger.bin")
    }

    pub fn registry_path(&self) -> PathBuf {
        self.data_dir.join("registry.bin")
    }
}

/// Load an operation script
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let content = std::fs::read_to_string(path)?;
    let steps: Vec<ScriptStep> = serialize::from_json(&content)?;
    Ok(steps)
}

/// Save an operation script
pub fn save_script(steps: &[ScriptStep], path: &Path) -> Result<()> {
    let content = serialize::to_json_pretty(&steps)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Generate a sample configuration for testing
pub fn generate_sample_config() -> NodeConfig {
    let token0 = Address::from_label("token0");
    let token1 = Address::from_label("token1");
    let provider = Address::from_label("provider");
    let trader = Address::from_label("trader");

    let balances = [provider, trader]
        .iter()
        .flat_map(|holder| {
            [token0, token1].into_iter().map(move |asset| BalanceEntry {
                asset,
                holder: *holder,
                amount: 1_000_000_000,
            })
        })
        .collect();

    NodeConfig {
        genesis: GenesisConfigFile { balances },
        ..NodeConfig::default()
    }
}

/// Generate a sample script: seed a pool, swap both ways, withdraw
pub fn generate_sample_script() -> Vec<ScriptStep> {
    let (token_a, token_b) =
        canonical_pair(Address::from_label("token0"), Address::from_label("token1"));
    let provider = Address::from_label("provider");
    let trader = Address::from_label("trader");
    let pool = compute_pool_address(token_a, token_b);

    vec![
        ScriptStep {
            sender: provider,
            op: Op::CreatePool {
                asset_x: token_b,
                asset_y: token_a,
            },
        },
        ScriptStep {
            sender: provider,
            op: Op::AddLiquidity {
                pool,
                amount_a: 100_000_000,
                amount_b: 100_000_000,
            },
        },
        ScriptStep {
            sender: trader,
            op: Op::Transfer {
                asset: token_a,
                to: pool,
                amount: 10_000_000,
            },
        },
        ScriptStep {
            sender: trader,
            op: Op::Swap {
                pool,
                min_out_a: 0,
                min_out_b: 8_000_000,
            },
        },
        ScriptStep {
            sender: trader,
            op: Op::SwapExactInput {
                pool,
                asset_in: token_b,
                amount_in: 5_000_000,
                min_out: 1,
            },
        },
        ScriptStep {
            sender: provider,
            op: Op::RemoveLiquidity {
                pool,
                shares: 50_000_000,
            },
        },
    ]
}
