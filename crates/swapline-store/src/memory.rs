//! Deterministic in-memory keeper

use std::collections::{BTreeMap, BTreeSet};

use amm::Pool;
use swapline_core::{Amount, Asset, BlockHeight, Network, Version, MIN_SUPPORTED_VERSION};

use crate::{Keeper, Result, StoreError};

/// In-memory [`Keeper`] backed by ordered maps
#[derive(Debug, Clone)]
pub struct MemoryKeeper {
    pub version: Version,
    pub block_height: BlockHeight,
    pub network: Network,
    pools: BTreeMap<Asset, Pool>,
    swap_queue: BTreeMap<String, Vec<u8>>,
    mimir: BTreeMap<String, i64>,
    supply: BTreeMap<Asset, Amount>,
    liquidity_fees: BTreeMap<Asset, Amount>,
    reserve: BTreeMap<Asset, Amount>,
    /// Pools whose reads fail, for exercising error paths
    failing_pools: BTreeSet<Asset>,
}

impl Default for MemoryKeeper {
    fn default() -> Self {
        Self {
            version: MIN_SUPPORTED_VERSION,
            block_height: 1,
            network: Network::Mainnet,
            pools: BTreeMap::new(),
            swap_queue: BTreeMap::new(),
            mimir: BTreeMap::new(),
            supply: BTreeMap::new(),
            liquidity_fees: BTreeMap::new(),
            reserve: BTreeMap::new(),
            failing_pools: BTreeSet::new(),
        }
    }
}

impl MemoryKeeper {
    pub fn new(version: Version, block_height: BlockHeight) -> Self {
        Self {
            version,
            block_height,
            ..Self::default()
        }
    }

    pub fn with_pool(mut self, pool: Pool) -> Self {
        self.pools.insert(pool.asset.clone(), pool);
        self
    }

    /// Make every read of the pool for `asset` fail
    pub fn fail_pool_reads(&mut self, asset: Asset) {
        self.failing_pools.insert(asset);
    }

    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    pub fn swap_queue_len(&self) -> usize {
        self.swap_queue.len()
    }
}

fn credit(map: &mut BTreeMap<Asset, Amount>, asset: &Asset, amount: Amount) -> Result<()> {
    let entry = map.entry(asset.clone()).or_insert(0);
    *entry = entry
        .checked_add(amount)
        .ok_or_else(|| StoreError::Overflow(asset.to_string()))?;
    Ok(())
}

impl Keeper for MemoryKeeper {
    fn version(&self) -> Version {
        self.version.clone()
    }

    fn block_height(&self) -> BlockHeight {
        self.block_height
    }

    fn network(&self) -> Network {
        self.network
    }

    fn pool_exists(&self, asset: &Asset) -> bool {
        self.pools.contains_key(&asset.layer1())
    }

    fn get_pool(&self, asset: &Asset) -> Result<Option<Pool>> {
        let asset = asset.layer1();
        if self.failing_pools.contains(&asset) {
            return Err(StoreError::ReadFailed {
                key: format!("pool/{}", asset),
                message: "injected failure".to_string(),
            });
        }
        Ok(self.pools.get(&asset).cloned())
    }

    fn set_pool(&mut self, pool: Pool) -> Result<()> {
        self.pools.insert(pool.asset.layer1(), pool);
        Ok(())
    }

    fn swap_queue_entries(&self) -> Result<Vec<(String, Vec<u8>)>> {
        Ok(self
            .swap_queue
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn set_swap_queue_entry(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.swap_queue.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_swap_queue_entry(&mut self, key: &str) -> Result<()> {
        self.swap_queue
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn get_mimir(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.mimir.get(key).copied())
    }

    fn set_mimir(&mut self, key: &str, value: i64) {
        self.mimir.insert(key.to_string(), value);
    }

    fn get_total_supply(&self, asset: &Asset) -> Amount {
        self.supply.get(asset).copied().unwrap_or(0)
    }

    fn mint_supply(&mut self, asset: &Asset, amount: Amount) -> Result<()> {
        credit(&mut self.supply, asset, amount)
    }

    fn burn_supply(&mut self, asset: &Asset, amount: Amount) -> Result<()> {
        let available = self.get_total_supply(asset);
        let remaining = available
            .checked_sub(amount)
            .ok_or_else(|| StoreError::InsufficientSupply {
                asset: asset.to_string(),
                required: amount,
                available,
            })?;
        self.supply.insert(asset.clone(), remaining);
        Ok(())
    }

    fn add_to_liquidity_fees(&mut self, asset: &Asset, amount: Amount) -> Result<()> {
        credit(&mut self.liquidity_fees, asset, amount)
    }

    fn get_liquidity_fees(&self, asset: &Asset) -> Amount {
        self.liquidity_fees.get(asset).copied().unwrap_or(0)
    }

    fn add_to_reserve(&mut self, asset: &Asset, amount: Amount) -> Result<()> {
        credit(&mut self.reserve, asset, amount)
    }

    fn get_reserve(&self, asset: &Asset) -> Amount {
        self.reserve.get(asset).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn btc() -> Asset {
        Asset::new("BTC.BTC").unwrap()
    }

    #[test]
    fn test_pools_resolve_synthetics_to_layer1() {
        let keeper = MemoryKeeper::default().with_pool(Pool::new(btc(), 10, 20));
        assert!(keeper.pool_exists(&btc().synthetic()));
        let pool = keeper.get_pool(&btc().synthetic()).unwrap().unwrap();
        assert_eq!(pool.asset, btc());
    }

    #[test]
    fn test_failing_pool_reads() {
        let mut keeper = MemoryKeeper::default().with_pool(Pool::new(btc(), 10, 20));
        keeper.fail_pool_reads(btc());
        let err = keeper.get_pool(&btc()).unwrap_err();
        assert_eq!(err.error_code(), "read_failed");
    }

    #[test]
    fn test_swap_queue_is_ordered_by_key() {
        let mut keeper = MemoryKeeper::default();
        keeper.set_swap_queue_entry("swapitem-B-0", b"b".to_vec()).unwrap();
        keeper.set_swap_queue_entry("swapitem-A-1", b"a1".to_vec()).unwrap();
        keeper.set_swap_queue_entry("swapitem-A-0", b"a0".to_vec()).unwrap();

        let keys: Vec<String> = keeper
            .swap_queue_entries()
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["swapitem-A-0", "swapitem-A-1", "swapitem-B-0"]);

        keeper.remove_swap_queue_entry("swapitem-A-0").unwrap();
        assert_eq!(keeper.swap_queue_len(), 2);
        assert!(keeper.remove_swap_queue_entry("swapitem-A-0").is_err());
    }

    #[test]
    fn test_supply_mint_and_burn() {
        let mut keeper = MemoryKeeper::default();
        let synth = btc().synthetic();
        keeper.mint_supply(&synth, 100).unwrap();
        keeper.burn_supply(&synth, 40).unwrap();
        assert_eq!(keeper.get_total_supply(&synth), 60);

        let err = keeper.burn_supply(&synth, 61).unwrap_err();
        assert_eq!(err.error_code(), "insufficient_supply");
    }

    #[test]
    fn test_fee_and_reserve_accounting() {
        let mut keeper = MemoryKeeper::default();
        keeper.add_to_liquidity_fees(&btc(), 5).unwrap();
        keeper.add_to_liquidity_fees(&btc(), 7).unwrap();
        assert_eq!(keeper.get_liquidity_fees(&btc()), 12);

        keeper.add_to_reserve(&Asset::base(), 3).unwrap();
        assert_eq!(keeper.get_reserve(&Asset::base()), 3);
        assert_eq!(keeper.get_reserve(&btc()), 0);
    }
}
