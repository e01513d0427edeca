//! Store key layout

use swapline_core::TxId;

use crate::{Result, StoreError};

/// Prefix of every swap queue key
pub const SWAP_QUEUE_PREFIX: &str = "swapitem";

/// Queue key for the `index`-th swap carried by `tx_id`: `swapitem-<txid>-<index>`
pub fn swap_queue_key(tx_id: &TxId, index: usize) -> String {
    format!("{}-{}-{}", SWAP_QUEUE_PREFIX, tx_id, index)
}

/// Queue index encoded in the last `-` separated field of a queue key
pub fn parse_swap_queue_index(key: &str) -> Result<usize> {
    let field = key
        .rsplit('-')
        .next()
        .ok_or_else(|| StoreError::InvalidKey(key.to_string()))?;
    field
        .parse::<usize>()
        .map_err(|_| StoreError::InvalidKey(key.to_string()))
}
