//! Swap memo parsing
//!
//! `SWAP:ASSET:DEST:LIMIT:AFFILIATE:AFFILIATE_BPS:AGGREGATOR:AGG_TARGET:AGG_LIMIT`
//!
//! `S` and `=` are accepted as short forms of `SWAP`. Every field after the
//! asset is optional and may be left empty.

use std::str::FromStr;

use swapline_core::{Address, Amount, Asset, Tx};

use crate::errors::SwapError;
use crate::msg::{MsgSwap, OrderType};

/// Parsed swap instruction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapMemo {
    pub asset: Asset,
    pub destination: Address,
    pub slip_limit: Amount,
    pub affiliate_address: Address,
    pub affiliate_basis_points: Amount,
    pub dex_aggregator: String,
    pub dex_target_address: String,
    pub dex_target_limit: Option<Amount>,
    pub order_type: OrderType,
}

fn invalid(memo: &str, reason: impl std::fmt::Display) -> SwapError {
    SwapError::InvalidMessage(format!("invalid swap memo '{}': {}", memo, reason))
}

fn parse_amount(memo: &str, field: &str, name: &str) -> Result<Option<Amount>, SwapError> {
    if field.is_empty() {
        return Ok(None);
    }
    field
        .parse::<Amount>()
        .map(Some)
        .map_err(|_| invalid(memo, format_args!("{} '{}' is not a number", name, field)))
}

impl FromStr for SwapMemo {
    type Err = SwapError;

    fn from_str(memo: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = memo.trim().split(':').map(str::trim).collect();
        let field = |i: usize| parts.get(i).copied().unwrap_or_default();

        match field(0).to_ascii_uppercase().as_str() {
            "SWAP" | "S" | "=" => {}
            other => return Err(invalid(memo, format_args!("unknown memo type '{}'", other))),
        }

        let asset = Asset::new(field(1)).map_err(|e| invalid(memo, e))?;

        Ok(Self {
            asset,
            destination: Address::new(field(2)),
            slip_limit: parse_amount(memo, field(3), "limit")?.unwrap_or(0),
            affiliate_address: Address::new(field(4)),
            affiliate_basis_points: parse_amount(memo, field(5), "affiliate basis points")?
                .unwrap_or(0),
            dex_aggregator: field(6).to_string(),
            dex_target_address: field(7).to_string(),
            dex_target_limit: parse_amount(memo, field(8), "aggregator limit")?,
            order_type: OrderType::Market,
        })
    }
}

impl SwapMemo {
    /// Build the swap message for an inbound transaction carrying this memo.
    ///
    /// An empty destination means "send it back to the sender".
    pub fn to_msg_swap(&self, tx: &Tx, signer: Address) -> MsgSwap {
        let destination = if self.destination.is_empty() {
            tx.from_address.clone()
        } else {
            self.destination.clone()
        };
        MsgSwap::new(
            tx.clone(),
            self.asset.clone(),
            destination,
            self.slip_limit,
            signer,
        )
        .with_affiliate(
            self.affiliate_address.clone(),
            self.affiliate_basis_points,
        )
        .with_aggregator(
            self.dex_aggregator.clone(),
            self.dex_target_address.clone(),
            self.dex_target_limit,
        )
        .with_order_type(self.order_type)
    }
}

/// Parse the memo of `tx` into a swap message
pub fn msg_swap_from_tx(tx: &Tx, signer: Address) -> Result<MsgSwap, SwapError> {
    let memo: SwapMemo = tx.memo.parse()?;
    Ok(memo.to_msg_swap(tx, signer))
}
