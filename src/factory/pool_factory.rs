//! The pool factory.

use tracing::{debug, info, instrument, warn};

use super::journal::Journal;
use super::request::{
    AddLiquidityRequest, CreatePoolRequest, DepositRequest, PoolCreation, RemoveLiquidityRequest,
};
use crate::config::FactoryConfig;
use crate::domain::{
    AccountId, Amount, AssetRef, Liquidity, LiquidityGrant, PairKey, PoolCreated, PoolEvent,
    PoolId,
};
use crate::error::AmmError;
use crate::math::{bootstrap_units, units_for_deposit};
use crate::pair::{AssetResolver, PairCanonicalizer};
use crate::pools::Pool;
use crate::registry::PoolRegistry;
use crate::traits::{Custody, EventSink, LiquidityPool, RegistryStore};

/// Creates, registers, and funds paired-asset pools.
///
/// The factory owns the [`PoolRegistry`] and drives its three
/// collaborators: a [`Custody`] ledger that holds the actual assets, a
/// [`RegistryStore`] that persists the registry after every change, and
/// an [`EventSink`] that receives a [`PoolEvent`] per committed change.
///
/// # Atomicity
///
/// Every mutating operation runs its validation first, then applies its
/// effects while recording them in a journal. If any effect fails, the
/// journal is unwound: custody movements are reversed, the registry
/// entry is removed or the prior pool state restored, and the original
/// error is returned. Events are only emitted after a successful commit.
///
/// # Thread Safety
///
/// Mutations take `&mut self`. Share a factory between threads by
/// wrapping it in a `Mutex`.
///
/// # Example
///
/// ```rust
/// use hydra_factory::config::FactoryConfig;
/// use hydra_factory::custody::InMemoryCustody;
/// use hydra_factory::domain::{AccountId, Amount, AssetId, AssetRef};
/// use hydra_factory::factory::{CreatePoolRequest, PoolFactory};
/// use hydra_factory::registry::MemoryStore;
///
/// let weth = AssetId::from_u128(0xbb);
/// let usdc = AssetId::from_u128(0x01);
/// let alice = AccountId::from_bytes([0xa1; 32]);
///
/// let mut custody = InMemoryCustody::new(weth);
/// custody.mint(usdc, alice, Amount::new(1_000_000)).expect("mint");
/// custody.approve(usdc, alice, Amount::new(1_000_000));
///
/// let config = FactoryConfig::new(weth, AccountId::from_bytes([0xfa; 32])).expect("config");
/// let mut factory = PoolFactory::open(config, custody, MemoryStore::new(), ())
///     .expect("open");
///
/// let request = CreatePoolRequest::new(
///     alice,
///     AssetRef::Native, Amount::new(4_000_000),
///     AssetRef::Asset(usdc), Amount::new(1_000_000),
/// )
/// .with_native_value(Amount::new(4_000_000));
/// let created = factory.create_pool(request).expect("created");
///
/// // canonical order: usdc (0x01) before weth (0xbb)
/// assert_eq!((created.event.token_a, created.event.token_b), (usdc, weth));
/// let found = factory.get_pool(AssetRef::Asset(weth), AssetRef::Asset(usdc));
/// assert_eq!(found, Ok(Some(created.pool)));
/// ```
#[derive(Debug)]
pub struct PoolFactory<C, S, E = ()> {
    config: FactoryConfig,
    canonicalizer: PairCanonicalizer,
    registry: PoolRegistry,
    custody: C,
    store: S,
    events: E,
}

impl<C: Custody, S: RegistryStore, E: EventSink> PoolFactory<C, S, E> {
    /// Builds a factory, restoring the registry from `store` if it holds
    /// a snapshot.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if `config` is invalid or the
    ///   stored pools were created with a different wrapped-native asset
    ///   or burn sink.
    /// - Any error from [`RegistryStore::load`] or
    ///   [`PoolRegistry::from_snapshot`].
    #[instrument(skip_all)]
    pub fn open(config: FactoryConfig, custody: C, store: S, events: E) -> Result<Self, AmmError> {
        config.validate()?;
        let registry = match store.load()? {
            Some(snapshot) => {
                if snapshot.wrapped_native != config.wrapped_native() {
                    return Err(AmmError::InvalidConfiguration(
                        "stored pools use a different wrapped-native asset",
                    ));
                }
                PoolRegistry::from_snapshot(snapshot)?
            }
            None => PoolRegistry::new(),
        };
        if registry.iter().any(|pool| pool.sink() != config.burn_sink()) {
            return Err(AmmError::InvalidConfiguration(
                "stored pools use a different burn sink",
            ));
        }
        info!(pools = registry.len(), next = %registry.next_id(), "factory opened");

        Ok(Self {
            config,
            canonicalizer: PairCanonicalizer::new(AssetResolver::new(config.wrapped_native())),
            registry,
            custody,
            store,
            events,
        })
    }

    /// Creates and seeds the pool for `(asset_a, asset_b)`.
    ///
    /// # Flow
    ///
    /// 1. Both amounts must exceed [`FactoryConfig::min_deposit`].
    /// 2. The pair is canonicalized and must not have a pool yet.
    /// 3. The attached native value must match the native leg.
    /// 4. Bootstrap units `⌊√(a·b)⌋` must exceed the seed burn.
    /// 5. Token legs are pulled, then the native leg is wrapped, into the
    ///    pool's custody account.
    /// 6. The pool is seeded, registered, and the registry persisted.
    /// 7. [`PoolCreated`] is emitted and returned.
    ///
    /// # Errors
    ///
    /// In the order they are checked:
    ///
    /// - [`AmmError::DepositTooSmall`] with `side` 1 or 2.
    /// - [`AmmError::InvalidPair`] for a degenerate pair.
    /// - [`AmmError::PoolExists`] if the pair already has a pool.
    /// - [`AmmError::NativeValueMismatch`] for a wrong attached value.
    /// - [`AmmError::InvalidQuantity`] if the seed burn is not covered.
    /// - Custody and store errors, after everything is rolled back.
    #[instrument(skip(self, request), fields(caller = %request.caller))]
    pub fn create_pool(&mut self, request: CreatePoolRequest) -> Result<PoolCreation, AmmError> {
        let floor = self.config.min_deposit();
        if request.amount_a <= floor {
            return Err(AmmError::DepositTooSmall { side: 1 });
        }
        if request.amount_b <= floor {
            return Err(AmmError::DepositTooSmall { side: 2 });
        }
        let key = self
            .canonicalizer
            .canonicalize(request.asset_a, request.asset_b)?;
        if self.registry.lookup(&key).is_some() {
            return Err(AmmError::PoolExists);
        }
        check_native_value(&request)?;

        let (amount_a, amount_b) =
            self.orient(&key, request.asset_a, request.amount_a, request.amount_b)?;
        let minted = bootstrap_units(amount_a, amount_b)?;
        if minted <= self.config.seed_burn() {
            return Err(AmmError::InvalidQuantity(
                "bootstrap units do not exceed the seed burn",
            ));
        }

        let pool = Pool::new(self.registry.next_id(), key, self.config.burn_sink());
        debug!(pool = %pool.id(), pair = %key, units = %minted, "staged pool");

        let mut journal = Journal::default();
        match self.commit_creation(&mut journal, &request, pool, amount_a, amount_b) {
            Ok(creation) => {
                self.events.emit(PoolEvent::Created(creation.event));
                info!(
                    pool = %creation.pool,
                    pair = %key,
                    units = %creation.grant.units_to_depositor(),
                    burned = %creation.grant.units_burned(),
                    "pool created"
                );
                Ok(creation)
            }
            Err(err) => {
                warn!(pair = %key, error = %err, "rolling back pool creation");
                journal.unwind(&mut self.custody, &mut self.registry);
                Err(err)
            }
        }
    }

    fn commit_creation(
        &mut self,
        journal: &mut Journal,
        request: &DepositRequest,
        mut pool: Pool,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<PoolCreation, AmmError> {
        self.pull_legs(journal, request, pool.account())?;
        let grant = pool.bootstrap(request.caller, amount_a, amount_b, self.config.seed_burn())?;
        let key = *pool.pair();
        let id = self.registry.register(pool)?;
        journal.registered(id);
        self.persist()?;

        Ok(PoolCreation {
            pool: id,
            grant,
            event: PoolCreated {
                token_a: key.first(),
                token_b: key.second(),
                pool: id,
            },
        })
    }

    /// Deposits into the existing pool for `(asset_a, asset_b)`.
    ///
    /// Either leg may be zero. Units follow the slip-penalized
    /// steady-state formula, so a deposit off the pool's ratio earns less
    /// than its nominal share.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPair`] for a degenerate pair.
    /// - [`AmmError::PoolNotFound`] if the pair has no pool.
    /// - [`AmmError::InvalidQuantity`] if both legs are zero or the
    ///   deposit would mint zero units.
    /// - [`AmmError::NativeValueMismatch`] for a wrong attached value.
    /// - Custody and store errors, after everything is rolled back.
    #[instrument(skip(self, request), fields(caller = %request.caller))]
    pub fn add_liquidity(
        &mut self,
        request: AddLiquidityRequest,
    ) -> Result<LiquidityGrant, AmmError> {
        let key = self
            .canonicalizer
            .canonicalize(request.asset_a, request.asset_b)?;
        let id = self.registry.lookup(&key).ok_or(AmmError::PoolNotFound)?;
        if request.amount_a.is_zero() && request.amount_b.is_zero() {
            return Err(AmmError::InvalidQuantity("both deposit legs are zero"));
        }
        check_native_value(&request)?;

        let (amount_a, amount_b) =
            self.orient(&key, request.asset_a, request.amount_a, request.amount_b)?;
        let pool = self.registry.pool(id).ok_or(AmmError::PoolNotFound)?;
        let (reserve_a, reserve_b) = pool.reserves();
        let preview =
            units_for_deposit(amount_a, reserve_a, amount_b, reserve_b, pool.total_units())?;
        if preview.is_zero() {
            return Err(AmmError::InvalidQuantity("deposit too small to mint units"));
        }

        let mut journal = Journal::default();
        journal.prior(pool.clone());
        match self.commit_deposit(&mut journal, &request, id, amount_a, amount_b) {
            Ok(grant) => {
                self.events.emit(PoolEvent::LiquidityAdded {
                    pool: id,
                    provider: request.caller,
                    amount_a,
                    amount_b,
                    units: grant.units_to_depositor(),
                });
                info!(pool = %id, units = %grant.units_to_depositor(), "liquidity added");
                Ok(grant)
            }
            Err(err) => {
                warn!(pool = %id, error = %err, "rolling back deposit");
                journal.unwind(&mut self.custody, &mut self.registry);
                Err(err)
            }
        }
    }

    fn commit_deposit(
        &mut self,
        journal: &mut Journal,
        request: &DepositRequest,
        id: PoolId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquidityGrant, AmmError> {
        self.pull_legs(journal, request, id.account())?;
        let pool = self.registry.pool_mut(id).ok_or(AmmError::PoolNotFound)?;
        let grant = pool.deposit(request.caller, amount_a, amount_b)?;
        self.persist()?;
        Ok(grant)
    }

    /// Burns `units` of the caller's holding in the pool for
    /// `(asset_a, asset_b)` and pays out the pro-rata reserves.
    ///
    /// Returns the payout in the caller's argument order. The payout is
    /// always in the pool's own assets: a native side is paid in the
    /// wrapped-native asset.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPair`] for a degenerate pair.
    /// - [`AmmError::PoolNotFound`] if the pair has no pool.
    /// - [`AmmError::LockedUnits`] if the caller is the burn sink.
    /// - [`AmmError::InsufficientUnits`] if the caller holds fewer units.
    /// - [`AmmError::InvalidQuantity`] if `units` is zero.
    /// - Custody and store errors, after everything is rolled back.
    #[instrument(skip(self, request), fields(caller = %request.caller, units = %request.units))]
    pub fn remove_liquidity(
        &mut self,
        request: RemoveLiquidityRequest,
    ) -> Result<(Amount, Amount), AmmError> {
        let key = self
            .canonicalizer
            .canonicalize(request.asset_a, request.asset_b)?;
        let id = self.registry.lookup(&key).ok_or(AmmError::PoolNotFound)?;
        let pool = self.registry.pool_mut(id).ok_or(AmmError::PoolNotFound)?;
        let prior = pool.clone();
        let (out_a, out_b) = pool.withdraw(request.caller, request.units)?;

        let mut journal = Journal::default();
        journal.prior(prior);
        match self.commit_withdrawal(&mut journal, request.caller, &key, id, out_a, out_b) {
            Ok(()) => {
                self.events.emit(PoolEvent::LiquidityRemoved {
                    pool: id,
                    provider: request.caller,
                    units: request.units,
                    amount_a: out_a,
                    amount_b: out_b,
                });
                info!(pool = %id, amount_a = %out_a, amount_b = %out_b, "liquidity removed");
                self.orient(&key, request.asset_a, out_a, out_b)
            }
            Err(err) => {
                warn!(pool = %id, error = %err, "rolling back withdrawal");
                journal.unwind(&mut self.custody, &mut self.registry);
                Err(err)
            }
        }
    }

    fn commit_withdrawal(
        &mut self,
        journal: &mut Journal,
        caller: AccountId,
        key: &PairKey,
        id: PoolId,
        out_a: Amount,
        out_b: Amount,
    ) -> Result<(), AmmError> {
        let account = id.account();
        for (asset, amount) in [(key.first(), out_a), (key.second(), out_b)] {
            if amount.is_zero() {
                continue;
            }
            self.custody.transfer_out(asset, account, caller, amount)?;
            journal.transferred(asset, account, caller, amount);
        }
        self.persist()
    }

    /// Pool registered for the pair, if any. Argument order and the
    /// native/wrapped spelling do not matter.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPair`] for a degenerate pair.
    pub fn get_pool(
        &self,
        asset_a: AssetRef,
        asset_b: AssetRef,
    ) -> Result<Option<PoolId>, AmmError> {
        let key = self.canonicalizer.canonicalize(asset_a, asset_b)?;
        Ok(self.registry.lookup(&key))
    }

    /// Pool with handle `id`.
    #[must_use]
    pub fn pool(&self, id: PoolId) -> Option<&Pool> {
        self.registry.pool(id)
    }

    /// All pools in canonical pair order.
    pub fn pools(&self) -> impl Iterator<Item = &Pool> + '_ {
        self.registry.iter()
    }

    /// Number of registered pools.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if `account` is a registered pool's custody account.
    #[must_use]
    pub fn is_pool(&self, account: AccountId) -> bool {
        self.registry.is_pool_account(account)
    }

    /// Units `holder` owns in pool `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolNotFound`] for an unknown id.
    pub fn units_of(&self, id: PoolId, holder: AccountId) -> Result<Liquidity, AmmError> {
        self.registry
            .pool(id)
            .map(|pool| pool.units_of(holder))
            .ok_or(AmmError::PoolNotFound)
    }

    /// Factory parameters.
    #[must_use]
    pub const fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// The pool registry.
    #[must_use]
    pub const fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// The custody ledger.
    #[must_use]
    pub const fn custody(&self) -> &C {
        &self.custody
    }

    /// Mutable access to the custody ledger (funding and approvals).
    pub fn custody_mut(&mut self) -> &mut C {
        &mut self.custody
    }

    /// The registry store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The event sink.
    #[must_use]
    pub const fn events(&self) -> &E {
        &self.events
    }

    fn orient(
        &self,
        key: &PairKey,
        asset_a: AssetRef,
        x: Amount,
        y: Amount,
    ) -> Result<(Amount, Amount), AmmError> {
        key.orient(self.canonicalizer.resolver().resolve(asset_a), x, y)
    }

    /// Moves the request's legs into `account`: token legs first, then
    /// the native leg.
    fn pull_legs(
        &mut self,
        journal: &mut Journal,
        request: &DepositRequest,
        account: AccountId,
    ) -> Result<(), AmmError> {
        let caller = request.caller;
        for (asset, amount) in request.legs() {
            let AssetRef::Asset(id) = asset else {
                continue;
            };
            if amount.is_zero() {
                continue;
            }
            self.custody.transfer_in(id, caller, account, amount)?;
            journal.pulled(id, caller, account, amount);
            debug!(asset = %id, amount = %amount, "pulled deposit leg");
        }
        for (asset, amount) in request.legs() {
            if !asset.is_native() || amount.is_zero() {
                continue;
            }
            self.custody.wrap_native(account, amount)?;
            journal.wrapped(account, caller, amount);
            debug!(amount = %amount, "wrapped native leg");
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<(), AmmError> {
        let snapshot = self.registry.snapshot(self.config.wrapped_native());
        self.store.save(&snapshot)?;
        debug!(pools = snapshot.pools.len(), next = snapshot.next_id, "registry persisted");
        Ok(())
    }
}

/// The attached native value must equal the native leg, or be absent or
/// zero when there is none.
fn check_native_value(request: &DepositRequest) -> Result<(), AmmError> {
    let expected = request.expected_native();
    let supplied = request.native_value.unwrap_or_default();
    if supplied != expected {
        return Err(AmmError::NativeValueMismatch { expected, supplied });
    }
    Ok(())
}
