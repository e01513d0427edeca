//! Protocol constants and configuration for Swapline
//!
//! Compiled defaults live in [`ConstantValues`]. Any of them can be overridden
//! at runtime through the parameter store ("mimir") under the key returned by
//! [`ConstantName::as_str`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Error, Result};
use crate::types::{constants::ONE, Chain, Network};
use crate::version::{Version, MIN_SUPPORTED_VERSION};

/// Tunable protocol parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConstantName {
    MinSwapsPerBlock,
    MaxSwapsPerBlock,
    VirtualMultSynthsBasisPoints,
    MaxSynthPerAssetDepth,
    OutboundTransactionFee,
    LiquidityAuction,
    HaltTrading,
    SwapOutDexAggregationDisabled,
}

impl ConstantName {
    pub const ALL: [ConstantName; 8] = [
        Self::MinSwapsPerBlock,
        Self::MaxSwapsPerBlock,
        Self::VirtualMultSynthsBasisPoints,
        Self::MaxSynthPerAssetDepth,
        Self::OutboundTransactionFee,
        Self::LiquidityAuction,
        Self::HaltTrading,
        Self::SwapOutDexAggregationDisabled,
    ];

    /// Parameter store key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MinSwapsPerBlock => "MinSwapsPerBlock",
            Self::MaxSwapsPerBlock => "MaxSwapsPerBlock",
            Self::VirtualMultSynthsBasisPoints => "VirtualMultSynthsBasisPoints",
            Self::MaxSynthPerAssetDepth => "MaxSynthPerAssetDepth",
            Self::OutboundTransactionFee => "OutboundTransactionFee",
            Self::LiquidityAuction => "LiquidityAuction",
            Self::HaltTrading => "HaltTrading",
            Self::SwapOutDexAggregationDisabled => "SwapOutDexAggregationDisabled",
        }
    }
}

impl fmt::Display for ConstantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameter store key halting trading on a single chain, e.g. `HaltBTCTrading`
pub fn halt_chain_trading_key(chain: &Chain) -> String {
    format!("Halt{}Trading", chain)
}

/// Compiled protocol defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantValues {
    /// Queue length at or below which every queued swap executes
    #[serde(default = "default_min_swaps_per_block")]
    pub min_swaps_per_block: i64,

    /// Upper bound on swaps executed per block
    #[serde(default = "default_max_swaps_per_block")]
    pub max_swaps_per_block: i64,

    /// Depth multiplier applied to pools on synthetic legs (10_000 = 1x)
    #[serde(default = "default_virtual_mult_synths_basis_points")]
    pub virtual_mult_synths_basis_points: i64,

    /// Maximum synthetic supply per pool, in basis points of pool depth
    #[serde(default = "default_max_synth_per_asset_depth")]
    pub max_synth_per_asset_depth: i64,

    /// Flat outbound fee in base units
    #[serde(default = "default_outbound_transaction_fee")]
    pub outbound_transaction_fee: i64,

    #[serde(default)]
    pub liquidity_auction: i64,

    #[serde(default)]
    pub halt_trading: i64,

    #[serde(default)]
    pub swap_out_dex_aggregation_disabled: i64,
}

fn default_min_swaps_per_block() -> i64 {
    10
}

fn default_max_swaps_per_block() -> i64 {
    100
}

fn default_virtual_mult_synths_basis_points() -> i64 {
    10_000
}

fn default_max_synth_per_asset_depth() -> i64 {
    3_300
}

fn default_outbound_transaction_fee() -> i64 {
    (2 * ONE / 100) as i64
}

impl Default for ConstantValues {
    fn default() -> Self {
        Self {
            min_swaps_per_block: default_min_swaps_per_block(),
            max_swaps_per_block: default_max_swaps_per_block(),
            virtual_mult_synths_basis_points: default_virtual_mult_synths_basis_points(),
            max_synth_per_asset_depth: default_max_synth_per_asset_depth(),
            outbound_transaction_fee: default_outbound_transaction_fee(),
            liquidity_auction: 0,
            halt_trading: 0,
            swap_out_dex_aggregation_disabled: 0,
        }
    }
}

impl ConstantValues {
    /// Constants in force at `version` on `network`.
    ///
    /// The swap constants are the same on every network.
    pub fn for_version(version: &Version, _network: Network) -> Result<Self> {
        if *version < MIN_SUPPORTED_VERSION {
            return Err(Error::UnsupportedVersion {
                version: version.to_string(),
            });
        }

        Ok(Self::default())
    }

    pub fn get_int64_value(&self, name: ConstantName) -> i64 {
        match name {
            ConstantName::MinSwapsPerBlock => self.min_swaps_per_block,
            ConstantName::MaxSwapsPerBlock => self.max_swaps_per_block,
            ConstantName::VirtualMultSynthsBasisPoints => self.virtual_mult_synths_basis_points,
            ConstantName::MaxSynthPerAssetDepth => self.max_synth_per_asset_depth,
            ConstantName::OutboundTransactionFee => self.outbound_transaction_fee,
            ConstantName::LiquidityAuction => self.liquidity_auction,
            ConstantName::HaltTrading => self.halt_trading,
            ConstantName::SwapOutDexAggregationDisabled => self.swap_out_dex_aggregation_disabled,
        }
    }

    /// Load overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }
}
