//! Swap queue
//!
//! Swaps observed during a block are parked in the store and executed at the
//! end of the block: fetched, scored against the current pools, put into a
//! deterministic order and executed up to a per-block bound. Whatever is left
//! stays queued for the next block.

use std::rc::Rc;

use swapline_core::{select_versioned, Address, ConstantName, Tx, Version};
use swapline_store::{parse_swap_queue_index, resolve_int64, swap_queue_key, Keeper, SWAP_QUEUE_PREFIX};

use crate::errors::{RefundCode, SwapError};
use crate::handler::{run_swap, synth_virtual_depth_mult, validate};
use crate::managers::{ManagerError, Managers};
use crate::memo::msg_swap_from_tx;
use crate::msg::{MsgSwap, SwapItem};
use crate::refund::refund_tx;
use crate::score::score_msgs;
use crate::sort::sort_swap_items;

/// Versioned end-of-block swap queue
pub trait SwapQueue {
    fn version(&self) -> Version;

    /// Every decodable item currently queued
    fn fetch_queue(&self, keeper: &dyn Keeper) -> Result<Vec<SwapItem>, SwapError>;

    /// Execute this block's share of the queue
    fn end_block(&self, keeper: &mut dyn Keeper, mgr: &mut Managers) -> Result<(), SwapError>;
}

/// Park `msg` in the queue under `swapitem-<txid>-<index>`
pub fn add_swap_queue_item(
    keeper: &mut dyn Keeper,
    msg: &MsgSwap,
    index: usize,
) -> Result<(), SwapError> {
    let key = swap_queue_key(&msg.tx.id, index);
    let value = serde_json::to_vec(msg).map_err(|e| SwapError::Encode {
        key: key.clone(),
        message: e.to_string(),
    })?;
    keeper.set_swap_queue_entry(&key, value)?;
    tracing::debug!(key = %key, target = %msg.target_asset, "queued swap");
    Ok(())
}

/// Next unused queue index for swaps carried by `tx`
fn next_queue_index(keeper: &dyn Keeper, tx: &Tx) -> Result<usize, SwapError> {
    let prefix = format!("{}-{}-", SWAP_QUEUE_PREFIX, tx.id);
    let next = keeper
        .swap_queue_entries()?
        .iter()
        .filter(|(key, _)| key.starts_with(&prefix))
        .filter_map(|(key, _)| parse_swap_queue_index(key).ok())
        .map(|index| index + 1)
        .max()
        .unwrap_or(0);
    Ok(next)
}

/// Parse an inbound transaction's memo and queue the swap it asks for.
///
/// Returns `Ok(false)` when the transaction was refunded instead.
pub fn queue_swap_from_tx(
    keeper: &mut dyn Keeper,
    mgr: &mut Managers,
    tx: &Tx,
    signer: Address,
) -> Result<bool, SwapError> {
    let msg = match msg_swap_from_tx(tx, signer) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!(tx_id = %tx.id, error = %e, "invalid swap memo");
            refund_tx(keeper, mgr, tx, RefundCode::InvalidMemo, &e.to_string())?;
            return Ok(false);
        }
    };
    if let Err(e) = validate(keeper, mgr, &msg) {
        tracing::warn!(tx_id = %tx.id, error = %e, "swap rejected");
        refund_tx(keeper, mgr, tx, RefundCode::SwapFail, &e.to_string())?;
        return Ok(false);
    }
    let index = next_queue_index(keeper, tx)?;
    add_swap_queue_item(keeper, &msg, index)?;
    Ok(true)
}

/// How many swaps to execute this block.
///
/// Half the queue, all of it when the queue is no longer than `min`, never
/// more than `max`. `min <= max` is not enforced.
pub fn get_todo_num(queue_len: i64, min_swaps_per_block: i64, max_swaps_per_block: i64) -> i64 {
    let mut todo = queue_len / 2;
    if min_swaps_per_block >= queue_len {
        todo = queue_len;
    }
    if max_swaps_per_block < todo {
        todo = max_swaps_per_block;
    }
    todo
}

/// Swap queue in force from 1.95.0
#[derive(Debug, Default, Clone, Copy)]
pub struct SwapQueueV95;

impl SwapQueue for SwapQueueV95 {
    fn version(&self) -> Version {
        Version::new(1, 95, 0)
    }

    fn fetch_queue(&self, keeper: &dyn Keeper) -> Result<Vec<SwapItem>, SwapError> {
        let mut items = Vec::new();
        for (key, value) in keeper.swap_queue_entries()? {
            let msg: MsgSwap = match serde_json::from_slice(&value) {
                Ok(msg) => msg,
                Err(e) => {
                    let err = SwapError::Decode {
                        key,
                        message: e.to_string(),
                    };
                    tracing::error!(error = %err, "fail to fetch swap msg from queue");
                    continue;
                }
            };
            let index = match parse_swap_queue_index(&key) {
                Ok(index) => index,
                Err(e) => {
                    tracing::error!(key = %key, error = %e, "fail to parse swap queue msg index");
                    continue;
                }
            };
            items.push(SwapItem::new(index, msg));
        }
        Ok(items)
    }

    fn end_block(&self, keeper: &mut dyn Keeper, mgr: &mut Managers) -> Result<(), SwapError> {
        let constants = mgr.constants();
        let min_swaps = resolve_int64(keeper, constants, ConstantName::MinSwapsPerBlock);
        let max_swaps = resolve_int64(keeper, constants, ConstantName::MaxSwapsPerBlock);
        let synth_mult = synth_virtual_depth_mult(keeper, constants);

        let swaps = self.fetch_queue(keeper)?;
        let swapper = mgr.swapper();
        let swaps = score_msgs(keeper, swapper.as_ref(), swaps, synth_mult);
        let swaps = sort_swap_items(swaps);

        let queue_len = i64::try_from(swaps.len()).unwrap_or(i64::MAX);
        let todo = get_todo_num(queue_len, min_swaps, max_swaps);
        let todo = usize::try_from(todo).unwrap_or(0);

        let mut failed = 0usize;
        for pick in swaps.iter().take(todo) {
            if let Err(e) = run_swap(keeper, mgr, &pick.msg) {
                failed += 1;
                tracing::error!(msg = %pick.msg.tx, error = %e, "fail to swap");
                if let Err(refund_err) =
                    refund_tx(keeper, mgr, &pick.msg.tx, RefundCode::SwapFail, &e.to_string())
                {
                    tracing::error!(tx_id = %pick.msg.tx.id, error = %refund_err, "fail to refund swap");
                }
            }
            let key = swap_queue_key(&pick.msg.tx.id, pick.index);
            if let Err(e) = keeper.remove_swap_queue_entry(&key) {
                tracing::error!(key = %key, error = %e, "fail to remove swap queue item");
            }
        }

        tracing::info!(
            queued = swaps.len(),
            executed = todo.min(swaps.len()),
            failed,
            "swap queue processed"
        );
        Ok(())
    }
}

type SwapQueueFactory = fn() -> Rc<dyn SwapQueue>;

fn swap_queue_v95() -> Rc<dyn SwapQueue> {
    Rc::new(SwapQueueV95)
}

fn swap_queue_table() -> [(Version, SwapQueueFactory); 1] {
    [(Version::new(1, 95, 0), swap_queue_v95 as SwapQueueFactory)]
}

/// Swap queue for the highest registered version not above `version`
pub fn get_swap_queue(version: &Version) -> Result<Rc<dyn SwapQueue>, ManagerError> {
    let table = swap_queue_table();
    select_versioned(&table, version)
        .map(|factory| factory())
        .ok_or_else(|| ManagerError::UnsupportedVersion(version.to_string()))
}
