use serde::{Deserialize, Serialize};

use crate::address::{hash_blake3, Address};

/// Basis points denominator
pub const BPS_DENOM: u64 = 10_000;
/// Swap fee retained in the reserves for liquidity providers (1%)
pub const LP_FEE_BPS: u64 = 100;
/// Swap fee routed to the treasury (1%)
pub const TREASURY_FEE_BPS: u64 = 100;
/// Total swap fee (2%)
pub const TOTAL_FEE_BPS: u64 = LP_FEE_BPS + TREASURY_FEE_BPS;

/// An unordered asset pair normalized to ascending byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    pub asset_a: Address,
    pub asset_b: Address,
}

impl PairKey {
    pub fn new(asset_x: Address, asset_y: Address) -> Self {
        let (asset_a, asset_b) = canonical_pair(asset_x, asset_y);
        PairKey { asset_a, asset_b }
    }

    pub fn contains(&self, asset: &Address) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }
}

/// Sort an asset pair
pub fn canonical_pair(asset_x: Address, asset_y: Address) -> (Address, Address) {
    if asset_x <= asset_y {
        (asset_x, asset_y)
    } else {
        (asset_y, asset_x)
    }
}

/// Compute deterministic pool address from an asset pair
pub fn compute_pool_address(asset_x: Address, asset_y: Address) -> Address {
    let (a, b) = canonical_pair(asset_x, asset_y);
    let mut data = Vec::with_capacity(76);
    data.extend_from_slice(b"duoswap-pool");
    data.extend_from_slice(a.as_bytes());
    data.extend_from_slice(b.as_bytes());
    hash_blake3(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_address_deterministic() {
        let a = Address::from_label("a");
        let b = Address::from_label("b");
        assert_eq!(compute_pool_address(a, b), compute_pool_address(b, a));
    }

    #[test]
    fn test_pair_key_symmetric() {
        let a = Address::from_label("a");
        let b = Address::from_label("b");
        let key = PairKey::new(b, a);
        assert_eq!(key, PairKey::new(a, b));
        assert!(key.asset_a < key.asset_b);
        assert!(key.contains(&a) && key.contains(&b));
    }

    #[test]
    fn test_fee_split() {
        assert_eq!(TOTAL_FEE_BPS, 200);
        assert_eq!(LP_FEE_BPS, TREASURY_FEE_BPS);
    }
}
