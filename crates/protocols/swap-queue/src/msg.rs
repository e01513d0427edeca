//! Swap messages and scored queue items

use outbound::validate_destination;
use serde::{Deserialize, Serialize};
use swapline_core::{constants::MAX_BASIS_POINTS, Address, Amount, Asset, Coin, Tx};

use crate::errors::SwapError;

/// How a swap is meant to be matched. Both kinds currently execute the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    #[default]
    Market,
    Limit,
}

/// A swap request derived from an observed inbound transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSwap {
    pub tx: Tx,
    pub target_asset: Asset,
    pub destination: Address,
    /// Minimum acceptable emission; zero disables the check
    #[serde(default)]
    pub trade_target: Amount,
    #[serde(default)]
    pub affiliate_address: Address,
    #[serde(default)]
    pub affiliate_basis_points: Amount,
    pub signer: Address,
    #[serde(default)]
    pub aggregator: String,
    #[serde(default)]
    pub aggregator_target_address: String,
    #[serde(default)]
    pub aggregator_target_limit: Option<Amount>,
    #[serde(default)]
    pub order_type: OrderType,
}

impl MsgSwap {
    pub fn new(
        tx: Tx,
        target_asset: Asset,
        destination: Address,
        trade_target: Amount,
        signer: Address,
    ) -> Self {
        Self {
            tx,
            target_asset,
            destination,
            trade_target,
            signer,
            ..Self::default()
        }
    }

    pub fn with_affiliate(mut self, address: Address, basis_points: Amount) -> Self {
        self.affiliate_address = address;
        self.affiliate_basis_points = basis_points;
        self
    }

    pub fn with_aggregator(
        mut self,
        aggregator: impl Into<String>,
        target_address: impl Into<String>,
        target_limit: Option<Amount>,
    ) -> Self {
        self.aggregator = aggregator.into();
        self.aggregator_target_address = target_address.into();
        self.aggregator_target_limit = target_limit;
        self
    }

    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// The coin being sold. Only the first inbound coin is swapped.
    pub fn source_coin(&self) -> Option<&Coin> {
        self.tx.coins.first()
    }

    pub fn has_aggregator(&self) -> bool {
        !self.aggregator.is_empty()
    }

    /// Stateless checks, run before anything touches the store
    pub fn validate_basic(&self) -> Result<(), SwapError> {
        if self.tx.id.is_empty() {
            return Err(SwapError::InvalidMessage("tx id cannot be empty".to_string()));
        }
        if self.target_asset.is_empty() {
            return Err(SwapError::InvalidMessage(
                "swap target cannot be empty".to_string(),
            ));
        }
        match self.tx.coins.as_slice() {
            [] => {
                return Err(SwapError::InvalidMessage("coins cannot be empty".to_string()));
            }
            [coin] if coin.is_empty() => {
                return Err(SwapError::InvalidMessage(format!("invalid coin: {}", coin)));
            }
            [_] => {}
            _ => {
                return Err(SwapError::InvalidMessage(
                    "not expecting multiple coins in a swap".to_string(),
                ));
            }
        }
        if self.signer.is_empty() {
            return Err(SwapError::InvalidMessage("signer cannot be empty".to_string()));
        }
        if self.affiliate_basis_points > MAX_BASIS_POINTS {
            return Err(SwapError::InvalidMessage(format!(
                "affiliate fee basis points can't be more than {}",
                MAX_BASIS_POINTS
            )));
        }
        validate_destination(&self.destination, &self.target_asset)?;
        Ok(())
    }
}

/// A queued swap with its scheduling score inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapItem {
    /// Position of the swap within its inbound transaction
    pub index: usize,
    pub msg: MsgSwap,
    /// Liquidity fee across all legs, base units
    pub fee: Amount,
    /// Slip across all legs, basis points
    pub slip: Amount,
}

impl SwapItem {
    pub fn new(index: usize, msg: MsgSwap) -> Self {
        Self {
            index,
            msg,
            fee: 0,
            slip: 0,
        }
    }
}
