//! Buffered writes over another keeper
//!
//! A [`CacheKeeper`] reads through to the wrapped keeper and holds every write
//! in its own overlay. Dropping it discards the writes; [`CacheKeeper::commit`]
//! replays them onto the wrapped keeper. Balances are tracked as final values
//! computed against the wrapped keeper, so the replay only moves them to
//! values that were already checked.

use std::collections::BTreeMap;

use amm::Pool;
use swapline_core::{Amount, Asset, BlockHeight, Network, Version};

use crate::{Keeper, Result, StoreError};

pub struct CacheKeeper<'a> {
    inner: &'a mut dyn Keeper,
    pools: BTreeMap<Asset, Pool>,
    swap_queue: BTreeMap<String, Option<Vec<u8>>>,
    mimir: BTreeMap<String, i64>,
    supply: BTreeMap<Asset, Amount>,
    liquidity_fees: BTreeMap<Asset, Amount>,
    reserve: BTreeMap<Asset, Amount>,
}

fn credited(current: Amount, asset: &Asset, amount: Amount) -> Result<Amount> {
    current
        .checked_add(amount)
        .ok_or_else(|| StoreError::Overflow(asset.to_string()))
}

impl<'a> CacheKeeper<'a> {
    pub fn new(inner: &'a mut dyn Keeper) -> Self {
        Self {
            inner,
            pools: BTreeMap::new(),
            swap_queue: BTreeMap::new(),
            mimir: BTreeMap::new(),
            supply: BTreeMap::new(),
            liquidity_fees: BTreeMap::new(),
            reserve: BTreeMap::new(),
        }
    }

    /// Whether any write is buffered
    pub fn is_dirty(&self) -> bool {
        !(self.pools.is_empty()
            && self.swap_queue.is_empty()
            && self.mimir.is_empty()
            && self.supply.is_empty()
            && self.liquidity_fees.is_empty()
            && self.reserve.is_empty())
    }

    /// Apply the buffered writes to the wrapped keeper
    pub fn commit(self) -> Result<()> {
        let Self {
            inner,
            pools,
            swap_queue,
            mimir,
            supply,
            liquidity_fees,
            reserve,
        } = self;

        for (asset, target) in supply {
            let current = inner.get_total_supply(&asset);
            if target > current {
                inner.mint_supply(&asset, target - current)?;
            } else if target < current {
                inner.burn_supply(&asset, current - target)?;
            }
        }
        for (asset, target) in liquidity_fees {
            let current = inner.get_liquidity_fees(&asset);
            inner.add_to_liquidity_fees(&asset, target.saturating_sub(current))?;
        }
        for (asset, target) in reserve {
            let current = inner.get_reserve(&asset);
            inner.add_to_reserve(&asset, target.saturating_sub(current))?;
        }
        for (key, value) in swap_queue {
            match value {
                Some(value) => inner.set_swap_queue_entry(&key, value)?,
                None => inner.remove_swap_queue_entry(&key)?,
            }
        }
        for (key, value) in mimir {
            inner.set_mimir(&key, value);
        }
        for pool in pools.into_values() {
            inner.set_pool(pool)?;
        }
        Ok(())
    }
}

impl Keeper for CacheKeeper<'_> {
    fn version(&self) -> Version {
        self.inner.version()
    }

    fn block_height(&self) -> BlockHeight {
        self.inner.block_height()
    }

    fn network(&self) -> Network {
        self.inner.network()
    }

    fn pool_exists(&self, asset: &Asset) -> bool {
        self.pools.contains_key(&asset.layer1()) || self.inner.pool_exists(asset)
    }

    fn get_pool(&self, asset: &Asset) -> Result<Option<Pool>> {
        match self.pools.get(&asset.layer1()) {
            Some(pool) => Ok(Some(pool.clone())),
            None => self.inner.get_pool(asset),
        }
    }

    fn set_pool(&mut self, pool: Pool) -> Result<()> {
        self.pools.insert(pool.asset.layer1(), pool);
        Ok(())
    }

    fn swap_queue_entries(&self) -> Result<Vec<(String, Vec<u8>)>> {
        let mut entries: BTreeMap<String, Vec<u8>> =
            self.inner.swap_queue_entries()?.into_iter().collect();
        for (key, value) in &self.swap_queue {
            match value {
                Some(value) => {
                    entries.insert(key.clone(), value.clone());
                }
                None => {
                    entries.remove(key);
                }
            }
        }
        Ok(entries.into_iter().collect())
    }

    fn set_swap_queue_entry(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.swap_queue.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn remove_swap_queue_entry(&mut self, key: &str) -> Result<()> {
        let exists = match self.swap_queue.get(key) {
            Some(value) => value.is_some(),
            None => self
                .inner
                .swap_queue_entries()?
                .iter()
                .any(|(k, _)| k == key),
        };
        if !exists {
            return Err(StoreError::NotFound(key.to_string()));
        }
        self.swap_queue.insert(key.to_string(), None);
        Ok(())
    }

    fn get_mimir(&self, key: &str) -> Result<Option<i64>> {
        match self.mimir.get(key) {
            Some(value) => Ok(Some(*value)),
            None => self.inner.get_mimir(key),
        }
    }

    fn set_mimir(&mut self, key: &str, value: i64) {
        self.mimir.insert(key.to_string(), value);
    }

    fn get_total_supply(&self, asset: &Asset) -> Amount {
        self.supply
            .get(asset)
            .copied()
            .unwrap_or_else(|| self.inner.get_total_supply(asset))
    }

    fn mint_supply(&mut self, asset: &Asset, amount: Amount) -> Result<()> {
        let total = credited(self.get_total_supply(asset), asset, amount)?;
        self.supply.insert(asset.clone(), total);
        Ok(())
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
        let total = credited(self.get_liquidity_fees(asset), asset, amount)?;
        self.liquidity_fees.insert(asset.clone(), total);
        Ok(())
    }

    fn get_liquidity_fees(&self, asset: &Asset) -> Amount {
        self.liquidity_fees
            .get(asset)
            .copied()
            .unwrap_or_else(|| self.inner.get_liquidity_fees(asset))
    }

    fn add_to_reserve(&mut self, asset: &Asset, amount: Amount) -> Result<()> {
        let total = credited(self.get_reserve(asset), asset, amount)?;
        self.reserve.insert(asset.clone(), total);
        Ok(())
    }

    fn get_reserve(&self, asset: &Asset) -> Amount {
        self.reserve
            .get(asset)
            .copied()
            .unwrap_or_else(|| self.inner.get_reserve(asset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryKeeper;

    fn btc() -> Asset {
        Asset::new("BTC.BTC").unwrap()
    }

    fn keeper() -> MemoryKeeper {
        MemoryKeeper::default().with_pool(Pool::new(btc(), 100, 200))
    }

    #[test]
    fn test_writes_are_visible_through_the_cache_only() {
        let mut inner = keeper();
        {
            let mut cache = CacheKeeper::new(&mut inner);
            cache.set_pool(Pool::new(btc(), 150, 150)).unwrap();
            cache.add_to_reserve(&btc(), 7).unwrap();
            cache.mint_supply(&btc().synthetic(), 30).unwrap();
            assert!(cache.is_dirty());
            assert_eq!(cache.get_pool(&btc()).unwrap().unwrap().balance_base, 150);
            assert_eq!(cache.get_reserve(&btc()), 7);
            assert_eq!(cache.get_total_supply(&btc().synthetic()), 30);
        }
        // dropped without commit
        assert_eq!(inner.get_pool(&btc()).unwrap().unwrap().balance_base, 100);
        assert_eq!(inner.get_reserve(&btc()), 0);
        assert_eq!(inner.get_total_supply(&btc().synthetic()), 0);
    }

    #[test]
    fn test_commit_applies_every_write() {
        let mut inner = keeper();
        inner.mint_supply(&btc().synthetic(), 50).unwrap();
        inner.add_to_liquidity_fees(&btc(), 5).unwrap();
        inner.set_swap_queue_entry("swapitem-AA-0", vec![1]).unwrap();

        let mut cache = CacheKeeper::new(&mut inner);
        cache.set_pool(Pool::new(btc(), 150, 150)).unwrap();
        cache.burn_supply(&btc().synthetic(), 20).unwrap();
        cache.add_to_liquidity_fees(&btc(), 3).unwrap();
        cache.add_to_reserve(&btc(), 9).unwrap();
        cache.remove_swap_queue_entry("swapitem-AA-0").unwrap();
        cache.set_mimir("HaltTrading", 1);
        cache.commit().unwrap();

        assert_eq!(inner.get_pool(&btc()).unwrap().unwrap().balance_asset, 150);
        assert_eq!(inner.get_total_supply(&btc().synthetic()), 30);
        assert_eq!(inner.get_liquidity_fees(&btc()), 8);
        assert_eq!(inner.get_reserve(&btc()), 9);
        assert_eq!(inner.swap_queue_len(), 0);
        assert_eq!(inner.get_mimir("HaltTrading").unwrap(), Some(1));
    }

    #[test]
    fn test_failed_write_leaves_wrapped_keeper_untouched() {
        let mut inner = keeper();
        inner.add_to_reserve(&btc(), Amount::MAX).unwrap();

        let mut cache = CacheKeeper::new(&mut inner);
        cache.set_pool(Pool::new(btc(), 1, 1)).unwrap();
        let err = cache.add_to_reserve(&btc(), 1).unwrap_err();
        assert_eq!(err.error_code(), "overflow");
        drop(cache);

        assert_eq!(inner.get_pool(&btc()).unwrap().unwrap().balance_base, 100);
        assert_eq!(inner.get_reserve(&btc()), Amount::MAX);
    }

    #[test]
    fn test_removing_unknown_queue_entry_fails() {
        let mut inner = keeper();
        let mut cache = CacheKeeper::new(&mut inner);
        let err = cache.remove_swap_queue_entry("swapitem-BB-0").unwrap_err();
        assert_eq!(err, StoreError::NotFound("swapitem-BB-0".to_string()));
        assert!(!cache.is_dirty());
    }
}
