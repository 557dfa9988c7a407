//! Paired-asset pool with a liquidity-unit ledger.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──► Empty ──bootstrap()──► Active ──deposit()/withdraw()──► Active
//! ```
//!
//! `Empty` only exists inside the factory's creation sequence; every
//! registered pool is `Active`. The bootstrap locks a seed quantity of
//! units in the burn sink, and since the sink can never withdraw, the
//! supply never returns to zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount, Liquidity, LiquidityGrant, PairKey, PoolId};
use crate::error::AmmError;
use crate::math::{CheckedArithmetic, mul_div_floor, units_for_deposit};
use crate::traits::LiquidityPool;

/// Observable state of a pool's unit supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolState {
    /// No units outstanding; only valid before the bootstrap deposit.
    Empty,
    /// At least the seed burn is outstanding.
    Active,
}

/// A pool bound to one canonical [`PairKey`].
///
/// # State
///
/// - `reserve_a` / `reserve_b`: custody balances attributed to the pool
///   (raw asset units, canonical order)
/// - `unit_supply`: outstanding units, equal to the sum of `holders`
/// - `holders`: unit balance per account; zero balances are dropped
/// - `sink`: account whose units can never be redeemed
///
/// # Example
///
/// ```rust
/// use hydra_factory::domain::{AccountId, Amount, AssetId, Liquidity, PairKey, PoolId};
/// use hydra_factory::pools::{Pool, PoolState};
/// use hydra_factory::traits::LiquidityPool;
///
/// let pair = PairKey::new(AssetId::from_u128(1), AssetId::from_u128(2)).expect("distinct");
/// let sink = AccountId::from_bytes([0xfa; 32]);
/// let alice = AccountId::from_bytes([0xa1; 32]);
///
/// let mut pool = Pool::new(PoolId::new(1), pair, sink);
/// let grant = pool
///     .bootstrap(alice, Amount::new(1_000_000), Amount::new(4_000_000), Liquidity::new(10_000))
///     .expect("seeded");
///
/// assert_eq!(pool.state(), PoolState::Active);
/// assert_eq!(grant.units_to_depositor(), Liquidity::new(1_990_000));
/// assert_eq!(pool.units_of(sink), Liquidity::new(10_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    id: PoolId,
    pair: PairKey,
    sink: AccountId,
    reserve_a: Amount,
    reserve_b: Amount,
    unit_supply: Liquidity,
    holders: BTreeMap<AccountId, Liquidity>,
}

impl Pool {
    /// Creates an empty pool.
    #[must_use]
    pub const fn new(id: PoolId, pair: PairKey, sink: AccountId) -> Self {
        Self {
            id,
            pair,
            sink,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            unit_supply: Liquidity::ZERO,
            holders: BTreeMap::new(),
        }
    }

    /// The pool handle.
    #[must_use]
    pub const fn id(&self) -> PoolId {
        self.id
    }

    /// Custody account holding this pool's reserves.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.id.account()
    }

    /// The account whose units are permanently locked.
    #[must_use]
    pub const fn sink(&self) -> AccountId {
        self.sink
    }

    /// Reserve of [`PairKey::first`].
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Reserve of [`PairKey::second`].
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PoolState {
        if self.unit_supply.is_zero() {
            PoolState::Empty
        } else {
            PoolState::Active
        }
    }

    /// Iterates over `(holder, units)` in account order.
    pub fn holders(&self) -> impl Iterator<Item = (AccountId, Liquidity)> + '_ {
        self.holders.iter().map(|(k, v)| (*k, *v))
    }

    /// Seeds an empty pool with its first deposit.
    ///
    /// Mints `⌊√(a·b)⌋` units, credits `seed_burn` of them to the sink
    /// and the remainder to `depositor`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidLiquidity`] if the pool is already active.
    /// - [`AmmError::InvalidQuantity`] if the minted units do not exceed
    ///   `seed_burn`.
    pub fn bootstrap(
        &mut self,
        depositor: AccountId,
        amount_a: Amount,
        amount_b: Amount,
        seed_burn: Liquidity,
    ) -> Result<LiquidityGrant, AmmError> {
        if self.state() != PoolState::Empty {
            return Err(AmmError::InvalidLiquidity("pool is already seeded"));
        }

        let minted = units_for_deposit(
            amount_a,
            Amount::ZERO,
            amount_b,
            Amount::ZERO,
            Liquidity::ZERO,
        )?;
        let grant = LiquidityGrant::split(minted, seed_burn)?;

        let mut holders = BTreeMap::new();
        holders.insert(self.sink, grant.units_burned());
        let held = holders.entry(depositor).or_insert(Liquidity::ZERO);
        *held = held.safe_add(&grant.units_to_depositor())?;

        self.reserve_a = amount_a;
        self.reserve_b = amount_b;
        self.unit_supply = minted;
        self.holders = holders;
        Ok(grant)
    }

    /// Checks the ledger invariants of a registered pool.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidLiquidity`] if the pool is empty, if
    /// the holder balances do not sum to the supply, or if a zero
    /// balance is stored.
    pub fn check_invariants(&self) -> Result<(), AmmError> {
        if self.state() == PoolState::Empty {
            return Err(AmmError::InvalidLiquidity("registered pool has no units"));
        }
        let mut sum = Liquidity::ZERO;
        for units in self.holders.values() {
            if units.is_zero() {
                return Err(AmmError::InvalidLiquidity("zero holder balance stored"));
            }
            sum = sum.safe_add(units)?;
        }
        if sum != self.unit_supply {
            return Err(AmmError::InvalidLiquidity(
                "holder balances do not sum to unit supply",
            ));
        }
        Ok(())
    }
}

impl LiquidityPool for Pool {
    fn pair(&self) -> &PairKey {
        &self.pair
    }

    fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    fn total_units(&self) -> Liquidity {
        self.unit_supply
    }

    fn units_of(&self, holder: AccountId) -> Liquidity {
        self.holders.get(&holder).copied().unwrap_or_default()
    }

    /// Mints units by the slip-penalized steady-state formula.
    fn deposit(
        &mut self,
        depositor: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquidityGrant, AmmError> {
        if self.state() != PoolState::Active {
            return Err(AmmError::InvalidLiquidity("pool has not been seeded"));
        }

        let minted = units_for_deposit(
            amount_a,
            self.reserve_a,
            amount_b,
            self.reserve_b,
            self.unit_supply,
        )?;
        if minted.is_zero() {
            return Err(AmmError::InvalidQuantity("deposit too small to mint units"));
        }

        let reserve_a = self.reserve_a.safe_add(&amount_a)?;
        let reserve_b = self.reserve_b.safe_add(&amount_b)?;
        let supply = self.unit_supply.safe_add(&minted)?;
        let held = self.units_of(depositor).safe_add(&minted)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.unit_supply = supply;
        self.holders.insert(depositor, held);
        Ok(LiquidityGrant::unburned(minted))
    }

    /// Pays out `⌊reserve × units / supply⌋` of each asset.
    fn withdraw(
        &mut self,
        holder: AccountId,
        units: Liquidity,
    ) -> Result<(Amount, Amount), AmmError> {
        if holder == self.sink {
            return Err(AmmError::LockedUnits);
        }
        if units.is_zero() {
            return Err(AmmError::InvalidQuantity("cannot withdraw zero units"));
        }
        let held = self.units_of(holder);
        if held < units {
            return Err(AmmError::InsufficientUnits);
        }

        let supply = self.unit_supply.get();
        let out_a = Amount::new(mul_div_floor(self.reserve_a.get(), units.get(), supply)?);
        let out_b = Amount::new(mul_div_floor(self.reserve_b.get(), units.get(), supply)?);

        let reserve_a = self.reserve_a.safe_sub(&out_a)?;
        let reserve_b = self.reserve_b.safe_sub(&out_b)?;
        let new_supply = self.unit_supply.safe_sub(&units)?;
        let remaining = held.safe_sub(&units)?;

        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.unit_supply = new_supply;
        if remaining.is_zero() {
            self.holders.remove(&holder);
        } else {
            self.holders.insert(holder, remaining);
        }
        Ok((out_a, out_b))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::AssetId;

    const SEED: Liquidity = Liquidity::new(10_000);

    fn sink() -> AccountId {
        AccountId::from_bytes([0xfa; 32])
    }

    fn alice() -> AccountId {
        AccountId::from_bytes([0xa1; 32])
    }

    fn bob() -> AccountId {
        AccountId::from_bytes([0xb0; 32])
    }

    fn empty_pool() -> Pool {
        let Ok(pair) = PairKey::new(AssetId::from_u128(1), AssetId::from_u128(2)) else {
            panic!("valid pair");
        };
        Pool::new(PoolId::new(1), pair, sink())
    }

    fn seeded_pool(a: u128, b: u128) -> Pool {
        let mut pool = empty_pool();
        let Ok(_) = pool.bootstrap(alice(), Amount::new(a), Amount::new(b), SEED) else {
            panic!("bootstrap");
        };
        pool
    }

    // -- bootstrap ------------------------------------------------------------

    #[test]
    fn new_pool_is_empty() {
        let pool = empty_pool();
        assert_eq!(pool.state(), PoolState::Empty);
        assert_eq!(pool.reserves(), (Amount::ZERO, Amount::ZERO));
        assert!(pool.total_units().is_zero());
    }

    #[test]
    fn bootstrap_splits_seed_and_depositor() {
        let mut pool = empty_pool();
        let Ok(grant) = pool.bootstrap(alice(), Amount::new(100_001), Amount::new(100_001), SEED)
        else {
            panic!("expected Ok");
        };
        assert_eq!(grant.units_burned(), SEED);
        assert_eq!(grant.units_to_depositor(), Liquidity::new(90_001));
        assert_eq!(pool.units_of(alice()), Liquidity::new(90_001));
        assert_eq!(pool.units_of(sink()), SEED);
        assert_eq!(pool.total_units(), Liquidity::new(100_001));
        assert_eq!(pool.reserves(), (Amount::new(100_001), Amount::new(100_001)));
        assert!(pool.check_invariants().is_ok());
    }

    #[test]
    fn bootstrap_twice_rejected() {
        let mut pool = seeded_pool(200_000, 200_000);
        let result = pool.bootstrap(bob(), Amount::new(200_000), Amount::new(200_000), SEED);
        assert!(matches!(result, Err(AmmError::InvalidLiquidity(_))));
        assert_eq!(pool.units_of(bob()), Liquidity::ZERO);
    }

    #[test]
    fn bootstrap_below_seed_leaves_pool_empty() {
        let mut pool = empty_pool();
        let result = pool.bootstrap(alice(), Amount::new(100), Amount::new(100), SEED);
        assert!(matches!(result, Err(AmmError::InvalidQuantity(_))));
        assert_eq!(pool, empty_pool());
    }

    #[test]
    fn bootstrap_by_sink_locks_everything() {
        let mut pool = empty_pool();
        let Ok(_) = pool.bootstrap(sink(), Amount::new(200_000), Amount::new(200_000), SEED) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.units_of(sink()), Liquidity::new(200_000));
        assert!(pool.check_invariants().is_ok());
    }

    // -- deposit --------------------------------------------------------------

    #[test]
    fn deposit_on_empty_pool_rejected() {
        let mut pool = empty_pool();
        let result = pool.deposit(alice(), Amount::new(1), Amount::new(1));
        assert!(matches!(result, Err(AmmError::InvalidLiquidity(_))));
    }

    #[test]
    fn proportional_deposit_mints_share() {
        let mut pool = seeded_pool(1_000_000, 4_000_000);
        // supply = 2_000_000; 10% of each reserve → 200_000 units
        let Ok(grant) = pool.deposit(bob(), Amount::new(100_000), Amount::new(400_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(grant.units_to_depositor(), Liquidity::new(200_000));
        assert!(grant.units_burned().is_zero());
        assert_eq!(pool.total_units(), Liquidity::new(2_200_000));
        assert_eq!(pool.reserves(), (Amount::new(1_100_000), Amount::new(4_400_000)));
        assert!(pool.check_invariants().is_ok());
    }

    #[test]
    fn dust_deposit_rejected_without_mutation() {
        let mut pool = seeded_pool(1_000_000_000, 1_000_000_000);
        let before = pool.clone();
        let result = pool.deposit(bob(), Amount::new(1), Amount::ZERO);
        assert!(matches!(result, Err(AmmError::InvalidQuantity(_))));
        assert_eq!(pool, before);
    }

    // -- withdraw -------------------------------------------------------------

    #[test]
    fn withdraw_pays_pro_rata() {
        let mut pool = seeded_pool(1_000_000, 4_000_000);
        // alice holds 1_990_000 of 2_000_000
        let Ok((a, b)) = pool.withdraw(alice(), Liquidity::new(1_000_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(a, Amount::new(500_000));
        assert_eq!(b, Amount::new(2_000_000));
        assert_eq!(pool.units_of(alice()), Liquidity::new(990_000));
        assert!(pool.check_invariants().is_ok());
    }

    #[test]
    fn full_exit_keeps_seed_outstanding() {
        let mut pool = seeded_pool(1_000_000, 4_000_000);
        let held = pool.units_of(alice());
        let Ok(_) = pool.withdraw(alice(), held) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.state(), PoolState::Active);
        assert_eq!(pool.total_units(), SEED);
        assert!(!pool.reserve_a().is_zero());
        assert!(!pool.reserve_b().is_zero());
        assert_eq!(pool.holders().count(), 1);
    }

    #[test]
    fn sink_cannot_withdraw() {
        let mut pool = seeded_pool(1_000_000, 4_000_000);
        assert_eq!(pool.withdraw(sink(), Liquidity::new(1)), Err(AmmError::LockedUnits));
    }

    #[test]
    fn overdraw_rejected() {
        let mut pool = seeded_pool(1_000_000, 4_000_000);
        assert_eq!(
            pool.withdraw(bob(), Liquidity::new(1)),
            Err(AmmError::InsufficientUnits)
        );
        assert!(matches!(
            pool.withdraw(alice(), Liquidity::ZERO),
            Err(AmmError::InvalidQuantity(_))
        ));
    }

    // -- invariants -----------------------------------------------------------

    #[test]
    fn invariants_catch_tampered_supply() {
        let mut pool = seeded_pool(1_000_000, 4_000_000);
        pool.unit_supply = Liquidity::new(1);
        assert!(pool.check_invariants().is_err());
        assert!(empty_pool().check_invariants().is_err());
    }

    #[test]
    fn serde_round_trip_keeps_ledger() {
        let pool = seeded_pool(1_000_000, 4_000_000);
        let Ok(json) = serde_json::to_string(&pool) else {
            panic!("serialize");
        };
        let Ok(back) = serde_json::from_str::<Pool>(&json) else {
            panic!("deserialize");
        };
        assert_eq!(back, pool);
    }
}
