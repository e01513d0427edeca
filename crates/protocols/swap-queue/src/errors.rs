//! Swap errors

use amm::{AmmError, MathError};
use outbound::OutboundError;
use swapline_core::{Amount, Asset, Chain};
use swapline_store::StoreError;
use thiserror::Error;

/// Errors raised while validating or executing a swap
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("invalid swap message: {0}")]
    InvalidMessage(String),

    #[error("trading is halted, can't process swap")]
    TradingHalted,

    #[error("trading is halted on {0}, can't process swap")]
    ChainTradingHalted(Chain),

    #[error("liquidity auction is in progress, can't process swap")]
    LiquidityAuction,

    #[error("synth quota for {asset} reached: coverage {coverage} exceeds {max} basis points")]
    SynthCapReached {
        asset: Asset,
        coverage: Amount,
        max: Amount,
    },

    #[error("cannot swap from {0} --> {0}, assets match")]
    SameAsset(Asset),

    #[error("{0} pool doesn't exist")]
    PoolNotFound(Asset),

    #[error("{0} pool is not available")]
    PoolUnavailable(Asset),

    #[error("emit asset is zero")]
    ZeroEmission,

    #[error("emit asset {emit} less than price limit {limit}")]
    PriceLimit { emit: Amount, limit: Amount },

    #[error("insufficient synth supply of {asset}: need {required}, have {available}")]
    InsufficientSynthSupply {
        asset: Asset,
        required: Amount,
        available: Amount,
    },

    #[error("failed to decode swap queue item {key}: {message}")]
    Decode { key: String, message: String },

    #[error("failed to encode swap queue item {key}: {message}")]
    Encode { key: String, message: String },

    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),

    #[error(transparent)]
    Outbound(#[from] OutboundError),

    #[error(transparent)]
    Amm(#[from] AmmError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<MathError> for SwapError {
    fn from(e: MathError) -> Self {
        Self::Amm(AmmError::Math(e))
    }
}

impl SwapError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMessage(_) => "invalid_message",
            Self::TradingHalted | Self::ChainTradingHalted(_) => "trading_halted",
            Self::LiquidityAuction => "liquidity_auction",
            Self::SynthCapReached { .. } => "synth_cap_reached",
            Self::SameAsset(_) => "same_asset",
            Self::PoolNotFound(_) => "pool_not_found",
            Self::PoolUnavailable(_) => "pool_unavailable",
            Self::ZeroEmission => "zero_emission",
            Self::PriceLimit { .. } => "price_limit",
            Self::InsufficientSynthSupply { .. } => "insufficient_synth_supply",
            Self::Decode { .. } => "decode_error",
            Self::Encode { .. } => "encode_error",
            Self::UnsupportedVersion(_) => "unsupported_version",
            Self::Outbound(e) => e.error_code(),
            Self::Amm(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
        }
    }
}

/// Reason codes attached to refunds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundCode {
    InvalidMemo,
    SwapFail,
}

impl RefundCode {
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidMemo => 105,
            Self::SwapFail => 108,
        }
    }
}
