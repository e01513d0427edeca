//! Swap handler
//!
//! Validates a swap message against the current state and executes it. A swap
//! sells the inbound coin for the target asset through one pool, or through two
//! pools with the base asset in between when neither side is the base asset.
//!
//! Execution is atomic: every leg is priced against staged pool copies, the
//! writes are buffered in a [`CacheKeeper`] and only reach the store, together
//! with the events and the outbound item, once all of them have succeeded.

use std::collections::BTreeMap;

use amm::{calc_synth_coverage, Pool, SwapLeg, Swapper};
use outbound::{
    deduct_outbound_fee, outbound_fee_in_asset, validate_aggregator, AggregatorContract,
    OutboundError, OutboundMemo, TxOutItem,
};
use swapline_core::{
    constants::MAX_BASIS_POINTS, halt_chain_trading_key, Amount, Asset, Coin, ConstantName,
    ConstantValues,
};
use swapline_store::{resolve_int64, resolve_mimir, CacheKeeper, Keeper};

use crate::errors::SwapError;
use crate::events::{Event, FeeEvent, SwapEvent};
use crate::managers::Managers;
use crate::msg::MsgSwap;

/// Result of a successfully executed swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    /// Amount emitted by the final leg, before the outbound fee
    pub emit: Amount,
    pub liquidity_fee_in_base: Amount,
    pub slip: Amount,
    pub outbound: TxOutItem,
}

/// One priced leg of a swap
#[derive(Debug, Clone)]
pub(crate) struct PlannedLeg {
    pub from: Asset,
    pub to: Asset,
    pub amount_in: Amount,
    pub result: SwapLeg,
}

/// Legs of a swap priced against staged pool copies
#[derive(Debug, Clone, Default)]
pub(crate) struct SwapPlan {
    pub legs: Vec<PlannedLeg>,
    pub staged: BTreeMap<Asset, Pool>,
}

impl SwapPlan {
    pub fn emit(&self) -> Amount {
        self.legs.last().map(|l| l.result.emit).unwrap_or(0)
    }

    pub fn liquidity_fee_in_base(&self) -> Amount {
        self.legs.iter().map(|l| l.result.liquidity_fee_in_base).sum()
    }

    pub fn slip(&self) -> Amount {
        self.legs.iter().map(|l| l.result.slip).sum()
    }

    pub fn staged_pool(&self, asset: &Asset) -> Option<&Pool> {
        self.staged.get(&asset.layer1())
    }
}

/// Depth multiplier for synthetic legs; parameter store values below 1 are ignored
pub fn synth_virtual_depth_mult(keeper: &dyn Keeper, constants: &ConstantValues) -> Amount {
    let name = ConstantName::VirtualMultSynthsBasisPoints;
    let value = match resolve_mimir(keeper, name.as_str()) {
        Some(v) if v >= 1 => v,
        _ => constants.get_int64_value(name),
    };
    Amount::try_from(value).unwrap_or(MAX_BASIS_POINTS)
}

/// Flat outbound fee in base units
pub fn outbound_fee_in_base(keeper: &dyn Keeper, constants: &ConstantValues) -> Amount {
    let fee = resolve_int64(keeper, constants, ConstantName::OutboundTransactionFee);
    Amount::try_from(fee).unwrap_or(0)
}

/// Price `source` into `target` without touching the store
pub(crate) fn plan_swap(
    keeper: &dyn Keeper,
    swapper: &dyn Swapper,
    source: &Coin,
    target: &Asset,
    synth_mult: Amount,
) -> Result<SwapPlan, SwapError> {
    if source.asset == *target {
        return Err(SwapError::SameAsset(target.clone()));
    }

    let hops = if source.asset.is_base() || target.is_base() {
        vec![(source.asset.clone(), target.clone())]
    } else {
        vec![
            (source.asset.clone(), Asset::base()),
            (Asset::base(), target.clone()),
        ]
    };

    let mut plan = SwapPlan::default();
    let mut amount = source.amount;
    for (from, to) in hops {
        let pool_asset = if from.is_base() { to.layer1() } else { from.layer1() };
        let pool = match plan.staged.get(&pool_asset) {
            Some(pool) => pool.clone(),
            None => keeper
                .get_pool(&pool_asset)?
                .ok_or_else(|| SwapError::PoolNotFound(pool_asset.clone()))?,
        };
        // synths may be redeemed on pools that are not available
        if !pool.is_available() && !from.is_synthetic() {
            return Err(SwapError::PoolUnavailable(pool_asset));
        }

        let result = swapper.swap_leg(&pool, &from, &to, amount, synth_mult)?;
        if result.emit == 0 {
            return Err(SwapError::ZeroEmission);
        }
        plan.staged.insert(pool_asset, result.pool.clone());
        let amount_in = amount;
        amount = result.emit;
        plan.legs.push(PlannedLeg {
            from,
            to,
            amount_in,
            result,
        });
    }
    Ok(plan)
}

fn check_trading_halted(
    keeper: &dyn Keeper,
    constants: &ConstantValues,
    msg: &MsgSwap,
) -> Result<(), SwapError> {
    if resolve_int64(keeper, constants, ConstantName::HaltTrading) > 0 {
        return Err(SwapError::TradingHalted);
    }
    for chain in [msg.tx.chain.clone(), msg.target_asset.delivery_chain()] {
        if resolve_mimir(keeper, &halt_chain_trading_key(&chain)).unwrap_or(0) > 0 {
            return Err(SwapError::ChainTradingHalted(chain));
        }
    }
    Ok(())
}

fn check_synth_cap(
    keeper: &dyn Keeper,
    constants: &ConstantValues,
    target: &Asset,
) -> Result<(), SwapError> {
    let pool = match keeper.get_pool(target)? {
        Some(pool) if !pool.is_empty() => pool,
        // execution reports the missing pool
        _ => return Ok(()),
    };
    let max = resolve_int64(keeper, constants, ConstantName::MaxSynthPerAssetDepth);
    let max = Amount::try_from(max).unwrap_or(0);
    let coverage = calc_synth_coverage(keeper.get_total_supply(target), pool.balance_asset)?;
    if coverage > max {
        return Err(SwapError::SynthCapReached {
            asset: target.clone(),
            coverage,
            max,
        });
    }
    Ok(())
}

/// Stateful validation. Returns the allow-listed aggregator when the swap
/// routes through one.
pub fn validate(
    keeper: &dyn Keeper,
    mgr: &Managers,
    msg: &MsgSwap,
) -> Result<Option<AggregatorContract>, SwapError> {
    msg.validate_basic()?;

    let constants = mgr.constants();
    check_trading_halted(keeper, constants, msg)?;

    let auction = resolve_int64(keeper, constants, ConstantName::LiquidityAuction);
    if auction > 0 && keeper.block_height() <= auction {
        return Err(SwapError::LiquidityAuction);
    }

    let contract = if msg.has_aggregator() {
        let disabled =
            resolve_int64(keeper, constants, ConstantName::SwapOutDexAggregationDisabled) > 0;
        Some(validate_aggregator(
            mgr.version(),
            disabled,
            &msg.aggregator,
            &msg.aggregator_target_address,
            &msg.target_asset,
        )?)
    } else {
        None
    };

    if msg.target_asset.is_synthetic() {
        check_synth_cap(keeper, constants, &msg.target_asset)?;
    }

    Ok(contract)
}

fn handle(
    keeper: &mut dyn Keeper,
    mgr: &mut Managers,
    msg: &MsgSwap,
    contract: Option<&AggregatorContract>,
) -> Result<SwapOutcome, SwapError> {
    let source = msg
        .source_coin()
        .ok_or_else(|| SwapError::InvalidMessage("coins cannot be empty".to_string()))?;
    let target = &msg.target_asset;

    let swapper = mgr.swapper();
    let synth_mult = synth_virtual_depth_mult(keeper, mgr.constants());
    let plan = plan_swap(keeper, swapper.as_ref(), source, target, synth_mult)?;

    let emit = plan.emit();
    if emit < msg.trade_target {
        return Err(SwapError::PriceLimit {
            emit,
            limit: msg.trade_target,
        });
    }

    let fee_in_base = outbound_fee_in_base(keeper, mgr.constants());
    let outbound_fee = outbound_fee_in_asset(target, plan.staged_pool(target), fee_in_base)?;
    if emit <= outbound_fee {
        return Err(OutboundError::NotEnoughFee {
            amount: emit,
            fee: outbound_fee,
        }
        .into());
    }

    for leg in plan.legs.iter().filter(|l| l.from.is_synthetic()) {
        let available = keeper.get_total_supply(&leg.from);
        if available < leg.amount_in {
            return Err(SwapError::InsufficientSynthSupply {
                asset: leg.from.clone(),
                required: leg.amount_in,
                available,
            });
        }
    }

    // every check passed; stage the writes and apply them together
    let mut cache = CacheKeeper::new(keeper);
    for pool in plan.staged.values() {
        cache.set_pool(pool.clone())?;
    }
    let last = plan.legs.len().saturating_sub(1);
    let mut events = Vec::with_capacity(plan.legs.len() + 1);
    for (i, leg) in plan.legs.iter().enumerate() {
        cache.add_to_liquidity_fees(&leg.result.pool.asset, leg.result.liquidity_fee_in_base)?;
        if leg.from.is_synthetic() {
            cache.burn_supply(&leg.from, leg.amount_in)?;
        }
        if leg.to.is_synthetic() {
            cache.mint_supply(&leg.to, leg.result.emit)?;
        }
        events.push(Event::Swap(SwapEvent {
            pool: leg.result.pool.asset.clone(),
            swap_target: if i == last { msg.trade_target } else { 0 },
            swap_slip: leg.result.slip,
            liquidity_fee: leg.result.liquidity_fee,
            liquidity_fee_in_base: leg.result.liquidity_fee_in_base,
            in_tx: msg.tx.id.clone(),
            in_coin: Coin::new(leg.from.clone(), leg.amount_in),
            emit_asset: Coin::new(leg.to.clone(), leg.result.emit),
        }));
    }

    let mut item = TxOutItem::new(
        msg.destination.clone(),
        Coin::new(target.clone(), emit),
        OutboundMemo::Out(msg.tx.id.clone()),
    );
    if let Some(contract) = contract {
        item = item.with_aggregator(
            contract,
            msg.aggregator_target_address.clone(),
            msg.aggregator_target_limit,
        );
    }
    let outbound = deduct_outbound_fee(&mut cache, fee_in_base, item)?;
    events.push(Event::Fee(FeeEvent {
        tx_id: msg.tx.id.clone(),
        coin: Coin::new(target.clone(), emit - outbound.coin.amount),
    }));
    cache.commit()?;

    mgr.tx_out_store_mut().add_tx_out_item(outbound.clone());
    for event in events {
        mgr.events_mut().emit(event);
    }

    tracing::debug!(
        tx_id = %msg.tx.id,
        source = %source,
        target = %target,
        emit,
        legs = plan.legs.len(),
        "swap executed"
    );

    Ok(SwapOutcome {
        emit,
        liquidity_fee_in_base: plan.liquidity_fee_in_base(),
        slip: plan.slip(),
        outbound,
    })
}

/// Validate and execute a swap
pub fn run_swap(
    keeper: &mut dyn Keeper,
    mgr: &mut Managers,
    msg: &MsgSwap,
) -> Result<SwapOutcome, SwapError> {
    let contract = validate(keeper, mgr, msg)?;
    handle(keeper, mgr, msg, contract.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::fixtures::*;
    use amm::PoolStatus;
    use swapline_core::{constants::ONE, Address};
    use swapline_store::MemoryKeeper;

    fn bnb() -> Asset {
        asset("BNB.BNB")
    }

    fn tcan() -> Asset {
        asset("BNB.TCAN-014")
    }

    fn tcan_pool() -> Pool {
        Pool::new(tcan(), 234_950_000_000, 334_850_000)
    }

    fn setup(pools: Vec<Pool>) -> (MemoryKeeper, Managers) {
        let mut keeper = MemoryKeeper::default();
        for pool in pools {
            keeper.set_pool(pool).unwrap();
        }
        let mgr = Managers::from_keeper(&keeper).unwrap();
        (keeper, mgr)
    }

    fn snapshot(keeper: &MemoryKeeper) -> Vec<Pool> {
        keeper.pools().cloned().collect()
    }

    #[test]
    fn test_validate() {
        let (keeper, mgr) = setup(vec![]);
        let msg = swap(tx_id(1), Coin::new(Asset::base(), 1), "BNB.BNB", BNB_ADDR);
        assert_eq!(validate(&keeper, &mgr, &msg).unwrap(), None);

        let bad = msg.clone().with_aggregator("zzzzzz", ETH_ADDR, None);
        assert!(validate(&keeper, &mgr, &bad).is_err());

        assert!(validate(&keeper, &mgr, &MsgSwap::default()).is_err());
    }

    #[test]
    fn test_synth_mint_quota() {
        let (mut keeper, mgr) = setup(vec![Pool::new(bnb(), 100 * ONE, 100 * ONE)]);
        let msg = swap(tx_id(1), Coin::new(Asset::base(), 100 * ONE), "BNB/BNB", MAYA_ADDR);
        assert!(validate(&keeper, &mgr, &msg).is_ok());

        keeper.mint_supply(&bnb().synthetic(), 200 * ONE).unwrap();
        let err = validate(&keeper, &mgr, &msg).unwrap_err();
        assert_eq!(err.error_code(), "synth_cap_reached");
    }

    #[test]
    fn test_zero_emission() {
        let (mut keeper, mut mgr) = setup(vec![Pool::new(bnb(), 10_000 * ONE, 100 * ONE)]);
        let msg = swap(tx_id(1), Coin::new(Asset::base(), 1), "BNB.BNB", BNB_ADDR);
        assert_eq!(
            run_swap(&mut keeper, &mut mgr, &msg).unwrap_err(),
            SwapError::ZeroEmission
        );
    }

    #[test]
    fn test_price_limit_refuses_without_touching_pools() {
        let (mut keeper, mut mgr) = setup(vec![Pool::new(bnb(), 10_000 * ONE, 100 * ONE)]);
        let before = snapshot(&keeper);
        let mut msg = swap(tx_id(1), Coin::new(Asset::base(), 200 * ONE), "BNB.BNB", BNB_ADDR);
        msg.trade_target = 200 * ONE;

        let err = run_swap(&mut keeper, &mut mgr, &msg).unwrap_err();
        assert_eq!(
            err.to_string(),
            "emit asset 192233756 less than price limit 20000000000"
        );
        assert_eq!(snapshot(&keeper), before);
        assert!(mgr.tx_out_store().is_empty());
        assert!(mgr.events().events().is_empty());
    }

    #[test]
    fn test_single_swap() {
        let (mut keeper, mut mgr) = setup(vec![Pool::new(bnb(), 10_000 * ONE, 100 * ONE)]);
        let msg = swap(tx_id(1), Coin::new(Asset::base(), 200 * ONE), "BNB.BNB", BNB_ADDR);

        let outcome = run_swap(&mut keeper, &mut mgr, &msg).unwrap();
        assert_eq!(outcome.emit, 192_233_756);
        assert_eq!(outcome.liquidity_fee_in_base, 384_467_500);
        assert_eq!(outcome.slip, 196);

        let pool = keeper.get_pool(&bnb()).unwrap().unwrap();
        assert_eq!(pool.balance_base, 10_200 * ONE);
        assert_eq!(pool.balance_asset, 100 * ONE - 192_233_756);
        assert_eq!(keeper.get_liquidity_fees(&bnb()), 384_467_500);

        let items = mgr.tx_out_store().get_outbound_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].to_address.as_str(), BNB_ADDR);
        assert_eq!(items[0].memo, format!("OUT:{}", tx_id(1)));
        assert_eq!(items[0].coin.amount + keeper.get_reserve(&bnb()), 192_233_756);
    }

    #[test]
    fn test_failed_reserve_credit_rolls_back_whole_swap() {
        let (mut keeper, mut mgr) = setup(vec![Pool::new(bnb(), 100 * ONE, 100 * ONE)]);
        keeper.add_to_reserve(&bnb(), Amount::MAX).unwrap();
        let before = snapshot(&keeper);
        let msg = swap(tx_id(1), Coin::new(Asset::base(), 10 * ONE), "BNB.BNB", BNB_ADDR);

        let err = run_swap(&mut keeper, &mut mgr, &msg).unwrap_err();
        assert!(err.to_string().contains("Balance overflow for BNB.BNB"));

        assert_eq!(snapshot(&keeper), before);
        assert_eq!(keeper.get_liquidity_fees(&bnb()), 0);
        assert_eq!(keeper.get_reserve(&bnb()), Amount::MAX);
        assert!(mgr.tx_out_store().is_empty());
        assert!(mgr.events().events().is_empty());
    }

    #[test]
    fn test_double_swap() {
        let (mut keeper, mut mgr) = setup(vec![Pool::new(bnb(), 100 * ONE, 100 * ONE), tcan_pool()]);
        let msg = swap(tx_id(7), Coin::new(tcan(), 20_000_000_000), "BNB.BNB", BNB_ADDR);

        let outcome = run_swap(&mut keeper, &mut mgr, &msg).unwrap();
        assert_eq!(outcome.emit, 1_996_597_065);
        assert_eq!(outcome.slip, 9_835 + 2_756);
        assert_eq!(outcome.outbound.coin, Coin::new(bnb(), 1_995_437_586));
        assert_eq!(keeper.get_reserve(&bnb()), 1_159_479);
        assert_eq!(mgr.tx_out_store().len(), 1);

        let tcan_after = keeper.get_pool(&tcan()).unwrap().unwrap();
        assert_eq!(tcan_after.balance_asset, 334_850_000 + 20_000_000_000);
        assert_eq!(tcan_after.balance_base, 234_950_000_000 - 3_805_167_702);
        let bnb_after = keeper.get_pool(&bnb()).unwrap().unwrap();
        assert_eq!(bnb_after.balance_base, 100 * ONE + 3_805_167_702);
        assert_eq!(bnb_after.balance_asset, 100 * ONE - 1_996_597_065);

        // two swap legs then the outbound fee
        let events = mgr.events().events();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], Event::Swap(e) if e.pool == tcan()));
        assert!(matches!(&events[1], Event::Swap(e) if e.pool == bnb()));
        assert!(matches!(&events[2], Event::Fee(e) if e.coin.amount == 1_159_479));
    }

    #[test]
    fn test_double_swap_with_price_limit() {
        let (mut keeper, mut mgr) =
            setup(vec![Pool::new(bnb(), 10_000 * ONE, 100 * ONE), tcan_pool()]);
        let mut tx = inbound_tx(tx_id(2), Coin::new(tcan(), 20_000_000));
        tx.memo = format!("swap:BNB.BNB:{}:121893238", BNB_ADDR);
        let msg = crate::memo::msg_swap_from_tx(&tx, Address::new(MAYA_ADDR)).unwrap();

        let outcome = run_swap(&mut keeper, &mut mgr, &msg).unwrap();
        assert_eq!(outcome.emit, 121_893_239);
        assert_eq!(mgr.tx_out_store().len(), 1);

        // the same request again now lands below its limit
        let err = run_swap(&mut keeper, &mut mgr, &msg).unwrap_err();
        assert_eq!(err.error_code(), "price_limit");
        assert_eq!(mgr.tx_out_store().len(), 1);
    }

    #[test]
    fn test_double_swap_not_enough_fee() {
        let (mut keeper, mut mgr) = setup(vec![Pool::new(bnb(), 100 * ONE, 100 * ONE), tcan_pool()]);
        let before = snapshot(&keeper);
        let msg = swap(tx_id(3), Coin::new(tcan(), 1_000), "BNB.BNB", BNB_ADDR);

        let err = run_swap(&mut keeper, &mut mgr, &msg).unwrap_err();
        assert_eq!(err.error_code(), "not_enough_fee");
        assert_eq!(snapshot(&keeper), before);
        assert!(mgr.tx_out_store().is_empty());
    }

    #[test]
    fn test_halts_and_liquidity_auction() {
        let (mut keeper, mut mgr) =
            setup(vec![Pool::new(bnb(), 10_000 * ONE, 100 * ONE), tcan_pool()]);
        let msg = swap(tx_id(4), Coin::new(tcan(), 20_000_000), "BNB.BNB", BNB_ADDR);

        keeper.set_mimir("LiquidityAuction", 19);
        let err = run_swap(&mut keeper, &mut mgr, &msg).unwrap_err();
        assert_eq!(err.to_string(), "liquidity auction is in progress, can't process swap");
        keeper.block_height = 20;
        assert!(validate(&keeper, &mgr, &msg).is_ok());
        keeper.set_mimir("LiquidityAuction", 0);

        keeper.set_mimir("HaltTrading", 1);
        assert_eq!(
            run_swap(&mut keeper, &mut mgr, &msg).unwrap_err(),
            SwapError::TradingHalted
        );
        keeper.set_mimir("HaltTrading", 0);

        keeper.set_mimir("HaltBNBTrading", 1);
        assert_eq!(
            validate(&keeper, &mgr, &msg).unwrap_err(),
            SwapError::ChainTradingHalted(chain("BNB"))
        );
        keeper.set_mimir("HaltBNBTrading", 0);
        assert!(run_swap(&mut keeper, &mut mgr, &msg).is_ok());
    }

    #[test]
    fn test_swap_out_dex_integration() {
        let eth = asset("ETH.ETH");
        let (mut keeper, mut mgr) = setup(vec![Pool::new(eth.clone(), 100 * ONE, 100 * ONE)]);
        let base_swap = swap(tx_id(5), Coin::new(Asset::base(), 2_000 * ONE), "ETH.ETH", ETH_ADDR)
            .with_aggregator("2f2386f3848", ETH_ADDR, None);

        keeper.set_mimir("SwapOutDexAggregationDisabled", 1);
        let err = run_swap(&mut keeper, &mut mgr, &base_swap).unwrap_err();
        assert_eq!(err.to_string(), "swap out dex integration disabled");
        keeper.set_mimir("SwapOutDexAggregationDisabled", 0);

        let mut msg = base_swap.clone();
        msg.aggregator_target_address = String::new();
        let err = run_swap(&mut keeper, &mut mgr, &msg).unwrap_err();
        assert_eq!(err.to_string(), "aggregator target asset address is empty");

        let mut msg = base_swap.clone();
        msg.target_asset = asset("ETH.AAVE-0X7FC66500C84A76AD7E9C93437BFC5AC33E2DDAE9");
        let err = run_swap(&mut keeper, &mut mgr, &msg).unwrap_err();
        assert_eq!(
            err.to_string(),
            "target asset (ETH.AAVE-0X7FC66500C84A76AD7E9C93437BFC5AC33E2DDAE9) is not gas asset, can't use dex feature"
        );

        let mut msg = base_swap.clone();
        msg.aggregator = "whatever".to_string();
        let err = run_swap(&mut keeper, &mut mgr, &msg).unwrap_err();
        assert_eq!(err.to_string(), "whatever aggregator not found");

        // the aggregator target is opaque and not validated
        let mut msg = base_swap.clone();
        msg.aggregator_target_address = "whatever".to_string();
        assert!(run_swap(&mut keeper, &mut mgr, &msg).is_ok());

        mgr.tx_out_store_mut().clear_outbound_items();
        run_swap(&mut keeper, &mut mgr, &base_swap).unwrap();
        let items = mgr.tx_out_store().get_outbound_items();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].aggregator.as_deref(),
            Some("0x69800327b38A4CeF30367Dec3f64c2f2386f3848")
        );
        assert_eq!(items[0].aggregator_target_asset.as_deref(), Some(ETH_ADDR));
        assert_eq!(items[0].aggregator_target_limit, None);
    }

    #[test]
    fn test_mint_synth() {
        let (mut keeper, mut mgr) = setup(vec![Pool::new(bnb(), 100 * ONE, 100 * ONE)]);
        let msg = swap(tx_id(6), Coin::new(Asset::base(), 100 * ONE), "BNB/BNB", MAYA_ADDR);

        let outcome = run_swap(&mut keeper, &mut mgr, &msg).unwrap();
        assert_eq!(outcome.emit, 25 * ONE);
        assert_eq!(keeper.get_total_supply(&bnb().synthetic()), 25 * ONE);

        let pool = keeper.get_pool(&bnb()).unwrap().unwrap();
        assert_eq!(pool.balance_asset, 100 * ONE);
        assert_eq!(pool.balance_base, 200 * ONE);
        assert_eq!(outcome.outbound.chain, swapline_core::Chain::base());
    }

    #[test]
    fn test_redeem_synth_on_staged_pool() {
        let staged = Pool::new(bnb(), 100 * ONE, 100 * ONE).with_status(PoolStatus::Staged);
        let (mut keeper, mut mgr) = setup(vec![staged]);
        let synth = bnb().synthetic();

        let msg = swap(tx_id(8), Coin::new(synth.clone(), ONE), "MAYA.CACAO", MAYA_ADDR);
        let err = run_swap(&mut keeper, &mut mgr, &msg).unwrap_err();
        assert_eq!(err.error_code(), "insufficient_synth_supply");

        keeper.mint_supply(&synth, 10 * ONE).unwrap();
        let outcome = run_swap(&mut keeper, &mut mgr, &msg).unwrap();
        assert!(outcome.emit > 0);
        assert_eq!(keeper.get_total_supply(&synth), 9 * ONE);

        // layer-1 sources cannot use a pool that is not available
        let msg = swap(tx_id(9), Coin::new(bnb(), ONE), "MAYA.CACAO", MAYA_ADDR);
        assert_eq!(
            run_swap(&mut keeper, &mut mgr, &msg).unwrap_err(),
            SwapError::PoolUnavailable(bnb())
        );
    }

    #[test]
    fn test_same_asset_and_missing_pool() {
        let (mut keeper, mut mgr) = setup(vec![]);
        let msg = swap(tx_id(10), Coin::new(bnb(), ONE), "BNB.BNB", BNB_ADDR);
        assert_eq!(
            run_swap(&mut keeper, &mut mgr, &msg).unwrap_err(),
            SwapError::SameAsset(bnb())
        );

        let msg = swap(tx_id(11), Coin::new(Asset::base(), ONE), "BNB.BNB", BNB_ADDR);
        assert_eq!(
            run_swap(&mut keeper, &mut mgr, &msg).unwrap_err(),
            SwapError::PoolNotFound(bnb())
        );
    }
}
