//! Versioned swappers
//!
//! A swapper prices one leg of a swap against a single pool. Implementations
//! are registered against the protocol version that introduced them and the
//! active one is picked once per block.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use swapline_core::{select_versioned, Amount, Asset, Version};

use crate::calculator::{
    calc_asset_emission, calc_liquidity_fee, calc_swap_slip, virtual_depth,
};
use crate::state::{AmmError, MathError, Pool};

/// Result of pricing one leg against one pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapLeg {
    /// Amount emitted to the next leg or to the user
    pub emit: Amount,
    /// Liquidity fee in output-side units
    pub liquidity_fee: Amount,
    /// Liquidity fee valued in base units
    pub liquidity_fee_in_base: Amount,
    /// Slip in basis points
    pub slip: Amount,
    /// Pool balances after the leg is applied
    pub pool: Pool,
}

pub trait Swapper {
    fn version(&self) -> Version;

    fn calc_asset_emission(&self, x_depth: Amount, x: Amount, y_depth: Amount) -> Result<Amount, MathError>;

    fn calc_liquidity_fee(&self, x_depth: Amount, x: Amount, y_depth: Amount) -> Result<Amount, MathError>;

    fn calc_swap_slip(&self, x_depth: Amount, x: Amount) -> Result<Amount, MathError>;

    fn virtual_depth(&self, depth: Amount, mult_bp: Amount) -> Result<Amount, MathError>;

    /// Price and apply one leg.
    ///
    /// Exactly one of `source`/`target` must be the base asset and the other
    /// must be the pool's asset or its synthetic. Legs involving a synthetic
    /// are priced against the pool depths scaled by `synth_mult_bp`.
    fn swap_leg(
        &self,
        pool: &Pool,
        source: &Asset,
        target: &Asset,
        amount: Amount,
        synth_mult_bp: Amount,
    ) -> Result<SwapLeg, AmmError>;
}

/// Swapper in force from 1.95.0
#[derive(Debug, Default, Clone, Copy)]
pub struct SwapperV95;

impl Swapper for SwapperV95 {
    fn version(&self) -> Version {
        Version::new(1, 95, 0)
    }

    fn calc_asset_emission(&self, x_depth: Amount, x: Amount, y_depth: Amount) -> Result<Amount, MathError> {
        calc_asset_emission(x_depth, x, y_depth)
    }

    fn calc_liquidity_fee(&self, x_depth: Amount, x: Amount, y_depth: Amount) -> Result<Amount, MathError> {
        calc_liquidity_fee(x_depth, x, y_depth)
    }

    fn calc_swap_slip(&self, x_depth: Amount, x: Amount) -> Result<Amount, MathError> {
        calc_swap_slip(x_depth, x)
    }

    fn virtual_depth(&self, depth: Amount, mult_bp: Amount) -> Result<Amount, MathError> {
        virtual_depth(depth, mult_bp)
    }

    fn swap_leg(
        &self,
        pool: &Pool,
        source: &Asset,
        target: &Asset,
        amount: Amount,
        synth_mult_bp: Amount,
    ) -> Result<SwapLeg, AmmError> {
        let selling_base = source.is_base();
        let (pool_side, synth) = if selling_base {
            (target, target.is_synthetic())
        } else {
            (source, source.is_synthetic())
        };
        if selling_base == target.is_base() || pool_side.layer1() != pool.asset {
            return Err(AmmError::InvalidLeg {
                from: source.clone(),
                to: target.clone(),
                pool: pool.asset.clone(),
            });
        }
        if pool.is_empty() {
            return Err(AmmError::EmptyPool(pool.asset.clone()));
        }

        let (mut x_depth, mut y_depth) = if selling_base {
            (pool.balance_base, pool.balance_asset)
        } else {
            (pool.balance_asset, pool.balance_base)
        };
        if synth {
            x_depth = self.virtual_depth(x_depth, synth_mult_bp)?;
            y_depth = self.virtual_depth(y_depth, synth_mult_bp)?;
        }

        let emit = self.calc_asset_emission(x_depth, amount, y_depth)?;
        let liquidity_fee = self.calc_liquidity_fee(x_depth, amount, y_depth)?;
        let slip = self.calc_swap_slip(x_depth, amount)?;
        let liquidity_fee_in_base = if selling_base {
            pool.asset_value_in_base(liquidity_fee)?
        } else {
            liquidity_fee
        };

        let mut after = pool.clone();
        if selling_base {
            after.balance_base = after
                .balance_base
                .checked_add(amount)
                .ok_or(MathError::Overflow)?;
            // minted synths leave the asset side untouched
            if !synth {
                after.balance_asset = take(pool, pool.balance_asset, emit)?;
            }
        } else {
            if !synth {
                after.balance_asset = after
                    .balance_asset
                    .checked_add(amount)
                    .ok_or(MathError::Overflow)?;
            }
            after.balance_base = take(pool, pool.balance_base, emit)?;
        }

        tracing::trace!(
            pool = %pool.asset,
            source = %source,
            target = %target,
            amount,
            emit,
            slip,
            "priced swap leg"
        );

        Ok(SwapLeg {
            emit,
            liquidity_fee,
            liquidity_fee_in_base,
            slip,
            pool: after,
        })
    }
}

fn take(pool: &Pool, available: Amount, required: Amount) -> Result<Amount, AmmError> {
    available
        .checked_sub(required)
        .ok_or_else(|| AmmError::InsufficientLiquidity {
            asset: pool.asset.clone(),
            required,
            available,
        })
}

type SwapperFactory = fn() -> Rc<dyn Swapper>;

fn swapper_v95() -> Rc<dyn Swapper> {
    Rc::new(SwapperV95)
}

fn swapper_table() -> [(Version, SwapperFactory); 1] {
    [(Version::new(1, 95, 0), swapper_v95 as SwapperFactory)]
}

/// Swapper for the highest registered version not above `version`
pub fn get_swapper(version: &Version) -> Result<Rc<dyn Swapper>, AmmError> {
    let table = swapper_table();
    select_versioned(&table, version)
        .map(|factory| factory())
        .ok_or_else(|| AmmError::UnsupportedVersion(version.to_string()))
}
