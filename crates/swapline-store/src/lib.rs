//! swapline-store: State store interface for the swap engine
//!
//! The replicated ledger is an external collaborator. This crate defines the
//! [`Keeper`] surface the engine needs from it and a deterministic in-memory
//! implementation used by tests and dry runs.

pub mod cache;
pub mod keys;
pub mod memory;
pub mod mimir;

use amm::Pool;
use swapline_core::{Amount, Asset, BlockHeight, Network, Version};
use thiserror::Error;

pub use cache::CacheKeeper;
pub use keys::{parse_swap_queue_index, swap_queue_key, SWAP_QUEUE_PREFIX};
pub use memory::MemoryKeeper;
pub use mimir::{resolve_int64, resolve_mimir};

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to read {key}: {message}")]
    ReadFailed { key: String, message: String },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Insufficient supply of {asset}: need {required}, have {available}")]
    InsufficientSupply {
        asset: String,
        required: Amount,
        available: Amount,
    },

    #[error("Balance overflow for {0}")]
    Overflow(String),
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::ReadFailed { .. } => "read_failed",
            Self::InvalidKey(_) => "invalid_key",
            Self::InsufficientSupply { .. } => "insufficient_supply",
            Self::Overflow(_) => "overflow",
        }
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Access to replicated state.
///
/// Every iteration the engine performs through this trait must come back in a
/// deterministic order; implementations are expected to back collections
/// with ordered maps.
pub trait Keeper {
    /// Active protocol version
    fn version(&self) -> Version;

    fn block_height(&self) -> BlockHeight;

    fn network(&self) -> Network;

    // Pools

    fn pool_exists(&self, asset: &Asset) -> bool;

    /// Pool keyed by its layer-1 asset
    fn get_pool(&self, asset: &Asset) -> Result<Option<Pool>>;

    fn set_pool(&mut self, pool: Pool) -> Result<()>;

    // Swap queue

    /// Raw queue entries ordered by key
    fn swap_queue_entries(&self) -> Result<Vec<(String, Vec<u8>)>>;

    fn set_swap_queue_entry(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    fn remove_swap_queue_entry(&mut self, key: &str) -> Result<()>;

    // Parameter store

    /// Runtime override for a tunable, `None` when unset
    fn get_mimir(&self, key: &str) -> Result<Option<i64>>;

    fn set_mimir(&mut self, key: &str, value: i64);

    // Synthetic supply

    fn get_total_supply(&self, asset: &Asset) -> Amount;

    fn mint_supply(&mut self, asset: &Asset, amount: Amount) -> Result<()>;

    fn burn_supply(&mut self, asset: &Asset, amount: Amount) -> Result<()>;

    // Fee accounting

    /// Record a liquidity fee (base units) collected by the pool of `asset`
    fn add_to_liquidity_fees(&mut self, asset: &Asset, amount: Amount) -> Result<()>;

    fn get_liquidity_fees(&self, asset: &Asset) -> Amount;

    /// Credit the protocol reserve with `amount` of `asset`
    fn add_to_reserve(&mut self, asset: &Asset, amount: Amount) -> Result<()>;

    fn get_reserve(&self, asset: &Asset) -> Amount;
}
