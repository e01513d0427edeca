//! Block events
//!
//! Events are collected in emission order and drained once per block.

use serde::{Deserialize, Serialize};
use swapline_core::{Amount, Asset, Coin, Tx, TxId};

/// One leg of an executed swap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapEvent {
    pub pool: Asset,
    /// Minimum emission requested by the swapper, zero when unset
    pub swap_target: Amount,
    pub swap_slip: Amount,
    pub liquidity_fee: Amount,
    pub liquidity_fee_in_base: Amount,
    pub in_tx: TxId,
    pub in_coin: Coin,
    pub emit_asset: Coin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundEvent {
    pub code: u32,
    pub reason: String,
    pub in_tx: Tx,
}

/// Outbound fee taken from a payout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEvent {
    pub tx_id: TxId,
    pub coin: Coin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Swap(SwapEvent),
    Refund(RefundEvent),
    Fee(FeeEvent),
}

#[derive(Debug, Clone, Default)]
pub struct EventManager {
    events: Vec<Event>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
