//! DEX aggregator allow-list lookup

use swapline_core::{select_versioned, Chain, Version};

use crate::constants::{aggregator_table, AggregatorContract, AGGREGATORS_V95};
use crate::OutboundError;

/// Allow-list in force at `version`.
///
/// Versions older than the first list fall back to it.
pub fn aggregator_contracts(version: &Version) -> &'static [AggregatorContract] {
    let table = aggregator_table();
    select_versioned(&table, version)
        .copied()
        .unwrap_or(AGGREGATORS_V95)
}

/// Find the allow-listed aggregator on `chain` whose address ends with `id`.
///
/// Matching is case-insensitive so memos can carry a short address suffix.
pub fn fetch_aggregator(
    version: &Version,
    chain: &Chain,
    id: &str,
) -> Result<AggregatorContract, OutboundError> {
    let needle = id.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err(OutboundError::AggregatorNotFound(id.to_string()));
    }
    aggregator_contracts(version)
        .iter()
        .find(|c| c.chain == chain.as_str() && c.address.to_ascii_lowercase().ends_with(&needle))
        .copied()
        .ok_or_else(|| OutboundError::AggregatorNotFound(id.to_string()))
}
