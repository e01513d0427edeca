//! Outbound Delivery
//!
//! Turns swap output into payout instructions for external chains. Covers
//! destination checks, the per-version DEX aggregator allow-lists used for
//! swap-outs through an external contract, outbound fee deduction, and the
//! `OUT:` / `REFUND:` memos carried by payouts.

pub mod aggregator;
pub mod constants;
pub mod memo;
pub mod tx_out;
pub mod validate;

use amm::MathError;
use swapline_core::{Amount, Asset};
use swapline_store::StoreError;
use thiserror::Error;

pub use aggregator::{aggregator_contracts, fetch_aggregator};
pub use constants::AggregatorContract;
pub use memo::OutboundMemo;
pub use tx_out::{deduct_outbound_fee, outbound_fee_in_asset, TxOutItem, TxOutStore};
pub use validate::{validate_aggregator, validate_destination};

/// Outbound errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutboundError {
    #[error("swap out dex integration disabled")]
    DexDisabled,

    #[error("{0} aggregator not found")]
    AggregatorNotFound(String),

    #[error("target asset ({0}) is not gas asset, can't use dex feature")]
    NotGasAsset(Asset),

    #[error("aggregator target asset address is empty")]
    EmptyAggregatorTarget,

    #[error("destination address is empty")]
    EmptyDestination,

    #[error("{address} is not a valid {chain} address")]
    InvalidDestination { address: String, chain: String },

    #[error("output amount {amount} is not enough to pay transaction fee {fee}")]
    NotEnoughFee { amount: Amount, fee: Amount },

    #[error("pool {0} doesn't exist")]
    PoolNotFound(Asset),

    #[error("invalid outbound memo: {0}")]
    InvalidMemo(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("math error: {0}")]
    Math(#[from] MathError),
}

impl OutboundError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DexDisabled => "dex_disabled",
            Self::AggregatorNotFound(_) => "aggregator_not_found",
            Self::NotGasAsset(_) => "not_gas_asset",
            Self::EmptyAggregatorTarget => "empty_aggregator_target",
            Self::EmptyDestination => "empty_destination",
            Self::InvalidDestination { .. } => "invalid_destination",
            Self::NotEnoughFee { .. } => "not_enough_fee",
            Self::PoolNotFound(_) => "pool_not_found",
            Self::InvalidMemo(_) => "invalid_memo",
            Self::Store(_) => "store_error",
            Self::Math(_) => "math_error",
        }
    }
}
