use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmmError {
    #[error("Invalid address: identity must be non-zero")]
    InvalidAddress,

    #[error("Invalid token address: asset must be non-zero")]
    InvalidTokenAddress,

    #[error("Unauthorized: only the owning pool may mint or burn shares")]
    Unauthorized,

    #[error("Tokens must be different")]
    TokensMustBeDifferent,

    #[error("Pool already exists: {0}")]
    PoolAlreadyExists(String),

    #[error("Pool not found: {0}")]
    PoolNotFound(String),

    #[error("Asset not in pool: {0}")]
    AssetNotInPool(String),

    #[error("Insufficient input amount")]
    InsufficientInput,

    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u64, need: u64 },

    #[error("Insufficient output amount")]
    InsufficientOutputAmount,

    #[error("Insufficient liquidity")]
    InsufficientLiquidity,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Ledger error: {0}")]
    Ledger(#[from] duoswap_ledger::LedgerError),

    #[error("Core error: {0}")]
    Core(#[from] duoswap_core::CoreError),
}
