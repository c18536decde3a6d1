use duoswap_core::{Address, AmmEvent, Op};
use duoswap_ledger::AssetLedger;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::AmmError;
use crate::exchange::Exchange;

/// Result of executing one operation
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub sender: Address,
    /// Operation kind, e.g. "swap"
    pub op: &'static str,
    pub success: bool,
    pub error: Option<String>,
    /// Events emitted by this operation; empty on failure
    pub events: Vec<AmmEvent>,
}

/// Operation kind used in results and logs
pub fn op_name(op: &Op) -> &'static str {
    match op {
        Op::MintAsset { .. } => "mint_asset",
        Op::Transfer { .. } => "transfer",
        Op::CreatePool { .. } => "create_pool",
        Op::AddLiquidity { .. } => "add_liquidity",
        Op::RemoveLiquidity { .. } => "remove_liquidity",
        Op::Swap { .. } => "swap",
        Op::SwapExactInput { .. } => "swap_exact_input",
        Op::TransferShares { .. } => "transfer_shares",
    }
}

impl<L: AssetLedger> Exchange<L> {
    /// Execute a single operation on behalf of `sender`
    pub fn execute(&mut self, sender: &Address, op: &Op) -> ExecutionResult {
        let start = self.events().len();
        let name = op_name(op);

        match self.execute_op(sender, op) {
            Ok(()) => {
                debug!("Operation {} from {} succeeded", name, sender.short());
                ExecutionResult {
                    sender: *sender,
                    op: name,
                    success: true,
                    error: None,
                    events: self.events()[start..].to_vec(),
                }
            }
            Err(e) => {
                error!("Operation {} from {} failed: {}", name, sender.short(), e);
                ExecutionResult {
                    sender: *sender,
                    op: name,
                    success: false,
                    error: Some(e.to_string()),
                    events: vec![],
                }
            }
        }
    }

    /// Execute operations in order
    pub fn execute_all(&mut self, steps: &[(Address, Op)]) -> Vec<ExecutionResult> {
        steps
            .iter()
            .map(|(sender, op)| self.execute(sender, op))
            .collect()
    }

    fn execute_op(&mut self, sender: &Address, op: &Op) -> Result<(), AmmError> {
        match op {
            Op::MintAsset { asset, to, amount } => {
                self.mint_asset(asset, to, *amount)?;
            }

            Op::Transfer { asset, to, amount } => {
                self.transfer(sender, asset, to, *amount)?;
            }

            Op::CreatePool { asset_x, asset_y } => {
                self.create_pool(*asset_x, *asset_y)?;
            }

            Op::AddLiquidity {
                pool,
                amount_a,
                amount_b,
            } => {
                self.add_liquidity(sender, pool, *amount_a, *amount_b)?;
            }

            Op::RemoveLiquidity { pool, shares } => {
                self.remove_liquidity(sender, pool, *shares)?;
            }

            Op::Swap {
                pool,
                min_out_a,
                min_out_b,
            } => {
                self.swap(sender, pool, *min_out_a, *min_out_b)?;
            }

            Op::SwapExactInput {
                pool,
                asset_in,
                amount_in,
                min_out,
            } => {
                self.swap_exact_input(sender, pool, asset_in, *amount_in, *min_out)?;
            }

            Op::TransferShares { pool, to, amount } => {
                self.transfer_shares(sender, pool, to, *amount)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{PoolRegistry, RegistryConfig};
    use duoswap_ledger::MemoryLedger;

    fn setup() -> (Exchange<MemoryLedger>, Address, Address, Address) {
        let registry =
            PoolRegistry::new(RegistryConfig::new(Address::from_label("treasury"))).unwrap();
        let exchange = Exchange::new(MemoryLedger::new(), registry);
        (
            exchange,
            Address::from_label("token0"),
            Address::from_label("token1"),
            Address::from_label("trader"),
        )
    }

    #[test]
    fn test_execute_scripted_flow() {
        let (mut exchange, x, y, trader) = setup();
        let pool = duoswap_core::compute_pool_address(x, y);

        let steps = vec![
            (trader, Op::MintAsset { asset: x, to: trader, amount: 10_000 }),
            (trader, Op::MintAsset { asset: y, to: trader, amount: 10_000 }),
            (trader, Op::CreatePool { asset_x: y, asset_y: x }),
            (trader, Op::AddLiquidity { pool, amount_a: 5_000, amount_b: 5_000 }),
            (trader, Op::Transfer { asset: x, to: pool, amount: 100 }),
        ];
        let results = exchange.execute_all(&steps);
        assert!(results.iter().all(|r| r.success));
        assert!(matches!(
            results[2].events.as_slice(),
            [AmmEvent::LiquidityPoolCreated { .. }]
        ));

        let (min_out_a, min_out_b) = if exchange.pool(&pool).unwrap().asset_a() == x {
            (0, 1)
        } else {
            (1, 0)
        };
        let result = exchange.execute(&trader, &Op::Swap { pool, min_out_a, min_out_b });
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.op, "swap");
        assert!(matches!(result.events.as_slice(), [AmmEvent::Swap { .. }]));
    }

    #[test]
    fn test_failed_op_reports_error_without_events() {
        let (mut exchange, x, _, trader) = setup();

        let result = exchange.execute(&trader, &Op::CreatePool { asset_x: x, asset_y: x });
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Tokens must be different"));
        assert!(result.events.is_empty());
        assert!(exchange.events().is_empty());
    }

    #[test]
    fn test_unknown_pool() {
        let (mut exchange, _, _, trader) = setup();
        let result = exchange.execute(
            &trader,
            &Op::RemoveLiquidity { pool: Address::from_label("nowhere"), shares: 1 },
        );
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Pool not found"));
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let (mut exchange, x, _, trader) = setup();
        exchange.mint_asset(&x, &trader, 50).unwrap();

        let result = exchange.execute(
            &trader,
            &Op::Transfer { asset: x, to: Address::from_label("bob"), amount: 51 },
        );
        assert!(!result.success);
        assert_eq!(exchange.balance_of(&x, &trader), 50);
    }
}
