//! Outbound item store
//!
//! Collects the payouts produced while a block executes. Every item pays the
//! flat outbound fee, converted into the outbound asset at the pool price and
//! credited to the reserve.

use amm::Pool;
use serde::{Deserialize, Serialize};
use swapline_core::{Address, Amount, Asset, Chain, Coin, TxId};
use swapline_store::Keeper;

use crate::constants::AggregatorContract;
use crate::memo::OutboundMemo;
use crate::OutboundError;

/// A payout waiting to be signed and broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutItem {
    pub chain: Chain,
    pub to_address: Address,
    pub coin: Coin,
    pub memo: String,
    pub in_hash: TxId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregator_target_asset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregator_target_limit: Option<Amount>,
}

impl TxOutItem {
    pub fn new(to_address: Address, coin: Coin, memo: OutboundMemo) -> Self {
        Self {
            chain: coin.asset.delivery_chain(),
            to_address,
            in_hash: memo.in_hash().clone(),
            memo: memo.to_string(),
            coin,
            aggregator: None,
            aggregator_target_asset: None,
            aggregator_target_limit: None,
        }
    }

    /// Route the payout through an allow-listed aggregator contract
    pub fn with_aggregator(
        mut self,
        contract: &AggregatorContract,
        target_address: impl Into<String>,
        target_limit: Option<Amount>,
    ) -> Self {
        self.aggregator = Some(contract.address.to_string());
        self.aggregator_target_asset = Some(target_address.into());
        self.aggregator_target_limit = target_limit;
        self
    }
}

/// Outbound fee for paying out `asset`, given the flat fee in base units.
///
/// Non-base assets (synthetics included) are priced through their pool.
pub fn outbound_fee_in_asset(
    asset: &Asset,
    pool: Option<&Pool>,
    fee_in_base: Amount,
) -> Result<Amount, OutboundError> {
    if asset.is_base() {
        return Ok(fee_in_base);
    }
    let pool = pool.ok_or_else(|| OutboundError::PoolNotFound(asset.layer1()))?;
    if pool.is_empty() {
        return Err(OutboundError::PoolNotFound(asset.layer1()));
    }
    Ok(pool.base_value_in_asset(fee_in_base)?)
}

/// Take the outbound fee out of `item` and credit it to the reserve
pub fn deduct_outbound_fee(
    keeper: &mut dyn Keeper,
    fee_in_base: Amount,
    mut item: TxOutItem,
) -> Result<TxOutItem, OutboundError> {
    let pool = if item.coin.asset.is_base() {
        None
    } else {
        keeper.get_pool(&item.coin.asset)?
    };
    let fee = outbound_fee_in_asset(&item.coin.asset, pool.as_ref(), fee_in_base)?;
    if item.coin.amount <= fee {
        return Err(OutboundError::NotEnoughFee {
            amount: item.coin.amount,
            fee,
        });
    }

    item.coin.amount -= fee;
    keeper.add_to_reserve(&item.coin.asset, fee)?;
    Ok(item)
}

/// Payouts scheduled in the current block, in insertion order
#[derive(Debug, Clone, Default)]
pub struct TxOutStore {
    items: Vec<TxOutItem>,
}

impl TxOutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deduct the outbound fee and schedule `item`.
    ///
    /// Nothing is scheduled or credited when the coin does not exceed the fee.
    pub fn try_add_tx_out_item(
        &mut self,
        keeper: &mut dyn Keeper,
        fee_in_base: Amount,
        item: TxOutItem,
    ) -> Result<TxOutItem, OutboundError> {
        let item = deduct_outbound_fee(keeper, fee_in_base, item)?;
        self.add_tx_out_item(item.clone());
        Ok(item)
    }

    /// Schedule an item whose fee was already taken
    pub fn add_tx_out_item(&mut self, item: TxOutItem) {
        tracing::debug!(
            in_hash = %item.in_hash,
            to = %item.to_address,
            coin = %item.coin,
            "scheduled outbound"
        );
        self.items.push(item);
    }

    pub fn get_outbound_items(&self) -> &[TxOutItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear_outbound_items(&mut self) {
        self.items.clear();
    }

    /// Hand over everything scheduled so far
    pub fn drain(&mut self) -> Vec<TxOutItem> {
        std::mem::take(&mut self.items)
    }
}
