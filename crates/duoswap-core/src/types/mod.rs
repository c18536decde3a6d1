pub mod event;
pub mod op;
pub mod pair;

pub use event::AmmEvent;
pub use op::Op;
pub use pair::{
    canonical_pair, compute_pool_address, PairKey, BPS_DENOM, LP_FEE_BPS, TOTAL_FEE_BPS,
    TREASURY_FEE_BPS,
};
