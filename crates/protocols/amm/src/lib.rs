//! Continuous Liquidity Pool AMM
//!
//! Pool state, swap math, and the versioned swappers that price a single leg
//! of a swap against a base/asset pool.

pub mod calculator;
pub mod state;
pub mod swapper;

// Re-exports
pub use calculator::{
    calc_asset_emission, calc_liquidity_fee, calc_swap_slip, calc_synth_coverage, mul_div,
    virtual_depth,
};
pub use state::{AmmError, MathError, Pool, PoolStatus};
pub use swapper::{get_swapper, SwapLeg, Swapper, SwapperV95};
