//! AMM State Types
//!
//! Pool balances and the errors raised by swap math.

use serde::{Deserialize, Serialize};
use std::fmt;
use swapline_core::{Amount, Asset};
use thiserror::Error;

use crate::calculator::mul_div;

/// Pool lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolStatus {
    #[default]
    Available,
    /// Bootstrapping, swaps only allowed from synthetics
    Staged,
    Suspended,
}

impl PoolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Staged => "Staged",
            Self::Suspended => "Suspended",
        }
    }
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Liquidity pool pairing the base asset with one layer-1 asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub asset: Asset,
    /// Base asset depth
    pub balance_base: Amount,
    /// Layer-1 asset depth
    pub balance_asset: Amount,
    #[serde(default)]
    pub status: PoolStatus,
}

impl Pool {
    pub fn new(asset: Asset, balance_base: Amount, balance_asset: Amount) -> Self {
        Self {
            asset,
            balance_base,
            balance_asset,
            status: PoolStatus::Available,
        }
    }

    pub fn with_status(mut self, status: PoolStatus) -> Self {
        self.status = status;
        self
    }

    /// A pool with either side at zero cannot price anything
    pub fn is_empty(&self) -> bool {
        self.balance_base == 0 || self.balance_asset == 0
    }

    pub fn is_available(&self) -> bool {
        self.status == PoolStatus::Available
    }

    /// Value of `amount` (asset units) in base units at the current ratio.
    ///
    /// Returns zero on an empty pool.
    pub fn asset_value_in_base(&self, amount: Amount) -> Result<Amount, MathError> {
        if self.balance_asset == 0 {
            return Ok(0);
        }
        mul_div(amount, self.balance_base, self.balance_asset)
    }

    /// Value of `amount` (base units) in asset units at the current ratio.
    ///
    /// Returns zero on an empty pool.
    pub fn base_value_in_asset(&self, amount: Amount) -> Result<Amount, MathError> {
        if self.balance_base == 0 {
            return Ok(0);
        }
        mul_div(amount, self.balance_asset, self.balance_base)
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pool {} [{}] | base: {} | asset: {}",
            self.asset, self.status, self.balance_base, self.balance_asset
        )
    }
}

/// Arithmetic failures in swap math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("arithmetic overflow")]
    Overflow,

    #[error("division by zero")]
    DivideByZero,
}

/// AMM protocol errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    #[error("pool {0} doesn't exist")]
    PoolNotFound(Asset),

    #[error("pool {0} is empty")]
    EmptyPool(Asset),

    #[error("pool {asset} is not available, status: {status}")]
    PoolUnavailable { asset: Asset, status: PoolStatus },

    #[error("insufficient liquidity in pool {asset}: need {required}, have {available}")]
    InsufficientLiquidity {
        asset: Asset,
        required: Amount,
        available: Amount,
    },

    #[error("cannot swap {from} to {to} in pool {pool}")]
    InvalidLeg { from: Asset, to: Asset, pool: Asset },

    #[error("no swapper for version {0}")]
    UnsupportedVersion(String),

    #[error("math error: {0}")]
    Math(#[from] MathError),
}

impl AmmError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PoolNotFound(_) => "pool_not_found",
            Self::EmptyPool(_) => "empty_pool",
            Self::PoolUnavailable { .. } => "pool_unavailable",
            Self::InsufficientLiquidity { .. } => "insufficient_liquidity",
            Self::InvalidLeg { .. } => "invalid_leg",
            Self::UnsupportedVersion(_) => "unsupported_version",
            Self::Math(_) => "math_error",
        }
    }
}
