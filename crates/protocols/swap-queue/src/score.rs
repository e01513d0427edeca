//! Queue scoring
//!
//! Estimates the liquidity fee and slip of every queued swap against the
//! current pools. Scoring is read-only and never fails: a leg whose pool is
//! missing, empty or unreadable simply contributes nothing.

use std::collections::BTreeMap;

use amm::{MathError, Pool, Swapper};
use swapline_core::{constants::MAX_BASIS_POINTS, Amount, Asset, Coin};
use swapline_store::Keeper;

use crate::msg::SwapItem;

/// Pools read during one scoring pass. Failed reads are cached as `None`.
struct PoolCache<'a> {
    keeper: &'a dyn Keeper,
    pools: BTreeMap<Asset, Option<Pool>>,
}

impl<'a> PoolCache<'a> {
    fn new(keeper: &'a dyn Keeper) -> Self {
        Self {
            keeper,
            pools: BTreeMap::new(),
        }
    }

    fn get(&mut self, asset: &Asset) -> Option<&Pool> {
        let keeper = self.keeper;
        self.pools
            .entry(asset.clone())
            .or_insert_with(|| match keeper.get_pool(asset) {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!(pool = %asset, error = %e, "fail to get pool");
                    None
                }
            })
            .as_ref()
    }
}

fn usable(pool: Option<&Pool>) -> Option<&Pool> {
    pool.filter(|p| !p.is_empty())
}

/// Fee and slip of selling `coin` into `pool`
fn leg_fee_and_slip(
    swapper: &dyn Swapper,
    pool: &Pool,
    coin: &Coin,
    mult: Amount,
) -> Result<(Amount, Amount), MathError> {
    let (x_depth, y_depth) = if coin.asset.is_base() {
        (pool.balance_base, pool.balance_asset)
    } else {
        (pool.balance_asset, pool.balance_base)
    };
    let x_depth = swapper.virtual_depth(x_depth, mult)?;
    let y_depth = swapper.virtual_depth(y_depth, mult)?;

    let mut fee = swapper.calc_liquidity_fee(x_depth, coin.amount, y_depth)?;
    if coin.asset.is_base() {
        fee = pool.asset_value_in_base(fee)?;
    }
    let slip = swapper.calc_swap_slip(x_depth, coin.amount)?;
    Ok((fee, slip))
}

fn add_leg(item: &mut SwapItem, swapper: &dyn Swapper, pool: &Pool, coin: &Coin, mult: Amount) {
    match leg_fee_and_slip(swapper, pool, coin, mult) {
        Ok((fee, slip)) => {
            item.fee = item.fee.saturating_add(fee);
            item.slip = item.slip.saturating_add(slip);
        }
        Err(e) => {
            tracing::error!(
                tx_id = %item.msg.tx.id,
                pool = %pool.asset,
                error = %e,
                "fail to score swap leg"
            );
        }
    }
}

fn leg_mult(asset: &Asset, synth_mult: Amount) -> Amount {
    if asset.is_synthetic() {
        synth_mult
    } else {
        MAX_BASIS_POINTS
    }
}

/// Fill in `fee` and `slip` for every item
pub fn score_msgs(
    keeper: &dyn Keeper,
    swapper: &dyn Swapper,
    mut items: Vec<SwapItem>,
    synth_mult: Amount,
) -> Vec<SwapItem> {
    let mut cache = PoolCache::new(keeper);

    for item in items.iter_mut() {
        let source = match item.msg.source_coin() {
            Some(coin) => coin.clone(),
            None => continue,
        };
        let target = item.msg.target_asset.clone();

        let first = if source.asset.is_base() {
            &target
        } else {
            &source.asset
        };
        if first.is_base() {
            continue;
        }
        let pool = match usable(cache.get(first)) {
            Some(pool) => pool.clone(),
            None => continue,
        };
        // synths may be redeemed on unavailable pools
        if !pool.is_available() && !source.asset.is_synthetic() {
            continue;
        }
        add_leg(item, swapper, &pool, &source, leg_mult(first, synth_mult));

        if source.asset.is_base() || target.is_base() {
            continue;
        }

        let base_in = match pool.asset_value_in_base(source.amount) {
            Ok(amount) => Coin::new(Asset::base(), amount),
            Err(e) => {
                tracing::error!(tx_id = %item.msg.tx.id, error = %e, "fail to convert to base");
                continue;
            }
        };
        let pool = match usable(cache.get(&target)) {
            Some(pool) if pool.is_available() => pool.clone(),
            _ => continue,
        };
        add_leg(item, swapper, &pool, &base_in, leg_mult(&target, synth_mult));
    }

    items
}
