//! Refunds for swaps that could not be executed

use outbound::{OutboundError, OutboundMemo, TxOutItem};
use swapline_core::{Coin, Tx};
use swapline_store::Keeper;

use crate::errors::{RefundCode, SwapError};
use crate::events::{Event, RefundEvent};
use crate::handler::outbound_fee_in_base;
use crate::managers::Managers;

/// Send every inbound coin of `tx` back to its sender, minus the outbound fee.
///
/// Coins that cannot cover the fee, or that have no pool to price it, are kept
/// by the reserve. A single refund event is emitted either way.
pub fn refund_tx(
    keeper: &mut dyn Keeper,
    mgr: &mut Managers,
    tx: &Tx,
    code: RefundCode,
    reason: &str,
) -> Result<(), SwapError> {
    let fee_in_base = outbound_fee_in_base(keeper, mgr.constants());

    for coin in tx.coins.iter().filter(|c| !c.is_empty()) {
        let item = TxOutItem::new(
            tx.from_address.clone(),
            coin.clone(),
            OutboundMemo::Refund(tx.id.clone()),
        );
        match mgr
            .tx_out_store_mut()
            .try_add_tx_out_item(keeper, fee_in_base, item)
        {
            Ok(_) => {}
            Err(OutboundError::NotEnoughFee { .. }) | Err(OutboundError::PoolNotFound(_)) => {
                keep_in_reserve(keeper, coin)?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    mgr.events_mut().emit(Event::Refund(RefundEvent {
        code: code.code(),
        reason: reason.to_string(),
        in_tx: tx.clone(),
    }));

    tracing::info!(
        tx_id = %tx.id,
        code = code.code(),
        reason,
        "refunded inbound transaction"
    );
    Ok(())
}

fn keep_in_reserve(keeper: &mut dyn Keeper, coin: &Coin) -> Result<(), SwapError> {
    tracing::debug!(coin = %coin, "refund does not cover outbound fee, kept by reserve");
    keeper.add_to_reserve(&coin.asset, coin.amount)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::fixtures::*;
    use amm::Pool;
    use swapline_core::{constants::ONE, Asset};
    use swapline_store::MemoryKeeper;

    fn setup() -> (MemoryKeeper, Managers) {
        let keeper = MemoryKeeper::default()
            .with_pool(Pool::new(asset("BNB.BNB"), 100 * ONE, 100 * ONE));
        let mgr = Managers::from_keeper(&keeper).unwrap();
        (keeper, mgr)
    }

    #[test]
    fn test_refund_pays_back_sender() {
        let (mut keeper, mut mgr) = setup();
        let tx = inbound_tx(tx_id(1), Coin::new(asset("BNB.BNB"), ONE));

        refund_tx(&mut keeper, &mut mgr, &tx, RefundCode::SwapFail, "boom").unwrap();

        let items = mgr.tx_out_store().get_outbound_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].to_address, tx.from_address);
        assert_eq!(items[0].coin.amount, ONE - 2_000_000);
        assert_eq!(items[0].memo, format!("REFUND:{}", tx_id(1)));

        match &mgr.events().events()[0] {
            Event::Refund(e) => {
                assert_eq!(e.code, 108);
                assert_eq!(e.reason, "boom");
                assert_eq!(e.in_tx, tx);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_dust_refund_goes_to_reserve() {
        let (mut keeper, mut mgr) = setup();
        let tx = inbound_tx(tx_id(2), Coin::new(Asset::base(), 1_000));

        refund_tx(&mut keeper, &mut mgr, &tx, RefundCode::InvalidMemo, "bad memo").unwrap();

        assert!(mgr.tx_out_store().is_empty());
        assert_eq!(keeper.get_reserve(&Asset::base()), 1_000);
        assert_eq!(mgr.events().events().len(), 1);
    }

    #[test]
    fn test_refund_without_pool_goes_to_reserve() {
        let (mut keeper, mut mgr) = setup();
        let btc = asset("BTC.BTC");
        let tx = inbound_tx(tx_id(3), Coin::new(btc.clone(), ONE));

        refund_tx(&mut keeper, &mut mgr, &tx, RefundCode::SwapFail, "no pool").unwrap();

        assert!(mgr.tx_out_store().is_empty());
        assert_eq!(keeper.get_reserve(&btc), ONE);
    }
}
