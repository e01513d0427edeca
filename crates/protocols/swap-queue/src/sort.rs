//! Deterministic ordering of scored swaps
//!
//! Every node must execute the queue in the same order, whatever order the
//! items were fetched in. Items are ranked independently by liquidity fee and
//! by slip (both descending); the two positions are added into a score and the
//! lowest score runs first. Equal scores fall back to the transaction id.

use std::collections::BTreeMap;

use swapline_core::TxId;

use crate::msg::SwapItem;

/// Sort-internal rank of one queued swap
#[derive(Debug, Clone, PartialEq, Eq)]
struct SwapRank {
    tx_id: TxId,
    index: usize,
    score: usize,
}

/// Order scored swaps for execution.
///
/// The result only depends on the set of `(tx_id, index, fee, slip)` tuples.
pub fn sort_swap_items(mut items: Vec<SwapItem>) -> Vec<SwapItem> {
    // canonical order first, so the stable sorts below never see fetch order
    items.sort_by(|a, b| {
        a.msg
            .tx
            .id
            .as_str()
            .cmp(b.msg.tx.id.as_str())
            .then(a.index.cmp(&b.index))
    });

    let mut by_fee: Vec<usize> = (0..items.len()).collect();
    by_fee.sort_by(|&a, &b| items[b].fee.cmp(&items[a].fee));

    let mut by_slip: Vec<usize> = (0..items.len()).collect();
    by_slip.sort_by(|&a, &b| items[b].slip.cmp(&items[a].slip));

    let mut ranks: Vec<SwapRank> = items
        .iter()
        .map(|item| SwapRank {
            tx_id: item.msg.tx.id.clone(),
            index: item.index,
            score: 0,
        })
        .collect();
    for (position, &slot) in by_fee.iter().enumerate() {
        ranks[slot].score += position;
    }
    for (position, &slot) in by_slip.iter().enumerate() {
        ranks[slot].score += position;
    }

    ranks.sort_by(|a, b| a.tx_id.as_str().cmp(b.tx_id.as_str()));
    ranks.sort_by_key(|r| r.score);

    // a tx may queue several swaps, so items are matched on (tx_id, index)
    let mut by_key: BTreeMap<(TxId, usize), SwapItem> = items
        .into_iter()
        .map(|item| ((item.msg.tx.id.clone(), item.index), item))
        .collect();

    let sorted: Vec<SwapItem> = ranks
        .into_iter()
        .filter_map(|rank| by_key.remove(&(rank.tx_id, rank.index)))
        .collect();

    tracing::trace!(items = sorted.len(), "sorted swap queue");
    sorted
}
