//! Outbound protocol constants

use swapline_core::Version;

/// Memo prefix of a swap payout
pub const OUTBOUND_MEMO_PREFIX: &str = "OUT";

/// Memo prefix of a refund
pub const REFUND_MEMO_PREFIX: &str = "REFUND";

/// DEX aggregator contract deployed on an external chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorContract {
    pub chain: &'static str,
    pub address: &'static str,
}

const fn contract(chain: &'static str, address: &'static str) -> AggregatorContract {
    AggregatorContract { chain, address }
}

/// Allow-list in force from 1.95.0. A later version that changes the list
/// registers a new entry in [`aggregator_table`].
pub const AGGREGATORS_V95: &[AggregatorContract] = &[contract(
    "ETH",
    "0x69800327b38A4CeF30367Dec3f64c2f2386f3848",
)];

/// Allow-lists keyed by the version that introduced them, ascending
pub fn aggregator_table() -> [(Version, &'static [AggregatorContract]); 1] {
    [(Version::new(1, 95, 0), AGGREGATORS_V95)]
}
