//! Pair-keyed pool registry.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, AssetId, PairKey, PoolId};
use crate::error::AmmError;
use crate::pools::Pool;
use crate::traits::LiquidityPool;

/// Serialized form of a [`PoolRegistry`].
///
/// Pools are listed in canonical pair order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Format version, see [`RegistrySnapshot::VERSION`].
    pub version: u32,
    /// Wrapped-native asset the pairs were canonicalized with.
    pub wrapped_native: AssetId,
    /// The id the next registered pool will receive.
    pub next_id: u64,
    /// Every registered pool.
    pub pools: Vec<Pool>,
}

impl RegistrySnapshot {
    /// Current snapshot format version.
    pub const VERSION: u32 = 2;
}

/// Registry of every pool, keyed by canonical pair.
///
/// At most one pool exists per [`PairKey`], and pool ids are handed out
/// sequentially from 1 and never reused once committed. A creation that
/// is rolled back releases its id for the next registration.
///
/// # Example
///
/// ```rust
/// use hydra_factory::domain::{AccountId, Amount, AssetId, Liquidity, PairKey};
/// use hydra_factory::pools::Pool;
/// use hydra_factory::registry::PoolRegistry;
///
/// let pair = PairKey::new(AssetId::from_u128(1), AssetId::from_u128(2)).expect("distinct");
/// let sink = AccountId::from_bytes([0xfa; 32]);
///
/// let mut registry = PoolRegistry::new();
/// let mut pool = Pool::new(registry.next_id(), pair, sink);
/// let depositor = AccountId::from_bytes([1; 32]);
/// let seed = Liquidity::new(10_000);
/// pool.bootstrap(depositor, Amount::new(200_000), Amount::new(200_000), seed)
///     .expect("seeded");
///
/// let id = registry.register(pool).expect("vacant");
/// assert_eq!(registry.lookup(&pair), Some(id));
/// assert!(registry.register(Pool::new(registry.next_id(), pair, sink)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRegistry {
    by_pair: BTreeMap<PairKey, Pool>,
    by_id: BTreeMap<PoolId, PairKey>,
    next_id: u64,
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            by_pair: BTreeMap::new(),
            by_id: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// The id [`register`](Self::register) expects next.
    #[must_use]
    pub const fn next_id(&self) -> PoolId {
        PoolId::new(self.next_id)
    }

    /// Pool id registered for `key`, if any.
    #[must_use]
    pub fn lookup(&self, key: &PairKey) -> Option<PoolId> {
        self.by_pair.get(key).map(Pool::id)
    }

    /// Pool registered for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &PairKey) -> Option<&Pool> {
        self.by_pair.get(key)
    }

    /// Pool with handle `id`, if any.
    #[must_use]
    pub fn pool(&self, id: PoolId) -> Option<&Pool> {
        self.by_id.get(&id).and_then(|key| self.by_pair.get(key))
    }

    pub(crate) fn pool_mut(&mut self, id: PoolId) -> Option<&mut Pool> {
        let key = self.by_id.get(&id)?;
        self.by_pair.get_mut(key)
    }

    /// Number of registered pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    /// Returns `true` when no pool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }

    /// Iterates over pools in canonical pair order.
    pub fn iter(&self) -> impl Iterator<Item = &Pool> + '_ {
        self.by_pair.values()
    }

    /// Returns `true` if `account` is the custody account of a registered
    /// pool.
    #[must_use]
    pub fn is_pool_account(&self, account: AccountId) -> bool {
        PoolId::from_account(account).is_some_and(|id| self.by_id.contains_key(&id))
    }

    /// Inserts a seeded pool under its pair.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the pool does not carry
    ///   [`next_id`](Self::next_id).
    /// - [`AmmError::PoolExists`] if the pair already has a pool.
    /// - [`AmmError::InvalidLiquidity`] if the pool has not been seeded.
    pub fn register(&mut self, pool: Pool) -> Result<PoolId, AmmError> {
        let id = pool.id();
        if id != self.next_id() {
            return Err(AmmError::InvalidConfiguration(
                "pool id does not match the next registry id",
            ));
        }
        let Some(next) = self.next_id.checked_add(1) else {
            return Err(AmmError::Overflow("pool id space exhausted"));
        };

        let key = *pool.pair();
        match self.by_pair.entry(key) {
            Entry::Occupied(_) => return Err(AmmError::PoolExists),
            Entry::Vacant(slot) => {
                pool.check_invariants()?;
                slot.insert(pool);
            }
        }
        self.by_id.insert(id, key);
        self.next_id = next;
        Ok(id)
    }

    /// Removes the most recently registered pool, releasing its id.
    ///
    /// Only used to undo a creation whose later steps failed; any other
    /// id is left alone and `None` is returned.
    pub(crate) fn unregister_last(&mut self, id: PoolId) -> Option<Pool> {
        if id.get().checked_add(1) != Some(self.next_id) {
            return None;
        }
        let key = self.by_id.remove(&id)?;
        let pool = self.by_pair.remove(&key)?;
        self.next_id = id.get();
        Some(pool)
    }

    /// Puts back an earlier copy of a registered pool.
    pub(crate) fn restore(&mut self, pool: Pool) {
        if let Some(slot) = self.by_pair.get_mut(pool.pair()) {
            *slot = pool;
        }
    }

    /// Captures the registry for persistence, tagged with the
    /// wrapped-native asset its native pairs resolve to.
    #[must_use]
    pub fn snapshot(&self, wrapped_native: AssetId) -> RegistrySnapshot {
        RegistrySnapshot {
            version: RegistrySnapshot::VERSION,
            wrapped_native,
            next_id: self.next_id,
            pools: self.iter().cloned().collect(),
        }
    }

    /// Rebuilds a registry from a stored snapshot.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Serialization`] for an unknown version, a duplicate
    ///   pair or id, or an id outside `1..next_id`.
    /// - [`AmmError::InvalidLiquidity`] if a pool's ledger is inconsistent.
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Result<Self, AmmError> {
        if snapshot.version != RegistrySnapshot::VERSION {
            return Err(AmmError::Serialization(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        if snapshot.next_id == 0 {
            return Err(AmmError::Serialization("next pool id is zero".to_owned()));
        }

        let mut registry = Self {
            by_pair: BTreeMap::new(),
            by_id: BTreeMap::new(),
            next_id: snapshot.next_id,
        };
        for pool in snapshot.pools {
            let id = pool.id();
            if id.get() == 0 || id.get() >= snapshot.next_id {
                return Err(AmmError::Serialization(format!(
                    "{id} outside the allocated id range"
                )));
            }
            pool.check_invariants()?;
            let key = *pool.pair();
            if registry.by_id.insert(id, key).is_some() {
                return Err(AmmError::Serialization(format!("duplicate {id}")));
            }
            if registry.by_pair.insert(key, pool).is_some() {
                return Err(AmmError::Serialization(format!("duplicate pair {key}")));
            }
        }
        Ok(registry)
    }
}
