//! Swap quotes
//!
//! Prices a swap exactly as the handler would, without writing anything.

use serde::{Deserialize, Serialize};
use swapline_core::{Amount, Asset, Coin};
use swapline_store::Keeper;

use crate::errors::SwapError;
use crate::handler::{outbound_fee_in_base, plan_swap, synth_virtual_depth_mult};
use crate::managers::Managers;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    /// Amount the destination receives once the outbound fee is paid
    pub expected_amount_out: Amount,
    pub emit: Amount,
    pub outbound_fee: Amount,
    pub liquidity_fee_in_base: Amount,
    /// Summed across legs, basis points
    pub slip: Amount,
    /// Pools the swap routes through, in order
    pub route: Vec<Asset>,
}

pub fn quote_swap(
    keeper: &dyn Keeper,
    mgr: &Managers,
    source: &Coin,
    target: &Asset,
) -> Result<SwapQuote, SwapError> {
    let swapper = mgr.swapper();
    let synth_mult = synth_virtual_depth_mult(keeper, mgr.constants());
    let plan = plan_swap(keeper, swapper.as_ref(), source, target, synth_mult)?;

    let emit = plan.emit();
    let fee_in_base = outbound_fee_in_base(keeper, mgr.constants());
    let outbound_fee =
        outbound::outbound_fee_in_asset(target, plan.staged_pool(target), fee_in_base)?;
    if emit <= outbound_fee {
        return Err(outbound::OutboundError::NotEnoughFee {
            amount: emit,
            fee: outbound_fee,
        }
        .into());
    }

    Ok(SwapQuote {
        expected_amount_out: emit - outbound_fee,
        emit,
        outbound_fee,
        liquidity_fee_in_base: plan.liquidity_fee_in_base(),
        slip: plan.slip(),
        route: plan
            .legs
            .iter()
            .map(|leg| leg.result.pool.asset.clone())
            .collect(),
    })
}
