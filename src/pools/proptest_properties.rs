//! Property-based tests using `proptest` for ledger invariants.
//!
//! 1. **Pair symmetry**: argument order never changes the canonical key.
//! 2. **Bootstrap symmetry**: `√(a·b)` is order-free and a true floor.
//! 3. **Steady-state symmetry**: swapping sides (with their reserves)
//!    mints the same units.
//! 4. **Steady-state monotonicity**: more of either asset never mints
//!    fewer units.
//! 5. **Unit conservation**: supply equals the sum of holder balances
//!    after any mix of deposits and withdrawals.
//! 6. **No free value**: a deposit immediately withdrawn returns no more
//!    than was put in.

use proptest::prelude::*;

use crate::domain::{AccountId, Amount, AssetId, AssetRef, Liquidity, PairKey, PoolId};
use crate::math::{bootstrap_units, units_for_deposit};
use crate::pair::{AssetResolver, PairCanonicalizer};
use crate::pools::Pool;
use crate::traits::LiquidityPool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const WRAPPED: AssetId = AssetId::from_u128(0xbb);
const SEED: Liquidity = Liquidity::new(10_000);

fn sink() -> AccountId {
    AccountId::from_bytes([0xfa; 32])
}

fn account(tag: u8) -> AccountId {
    AccountId::from_bytes([tag; 32])
}

fn seeded_pool(a: u128, b: u128) -> Option<Pool> {
    let pair = PairKey::new(AssetId::from_u128(1), AssetId::from_u128(2)).ok()?;
    let mut pool = Pool::new(PoolId::new(1), pair, sink());
    pool.bootstrap(account(1), Amount::new(a), Amount::new(b), SEED)
        .ok()?;
    Some(pool)
}

/// Asset references drawn from a small id space so collisions with each
/// other and with the wrapped id are frequent.
fn asset_ref_strategy() -> impl Strategy<Value = AssetRef> {
    prop_oneof![
        Just(AssetRef::Native),
        Just(AssetRef::Asset(WRAPPED)),
        (0u128..8).prop_map(|v| AssetRef::Asset(AssetId::from_u128(v))),
        any::<u128>().prop_map(|v| AssetRef::Asset(AssetId::from_u128(v))),
    ]
}

/// Reserves large enough to clear the deposit floor.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    100_001u128..=1_000_000_000_000_000_000u128
}

/// Deposits, zero included.
fn deposit_strategy() -> impl Strategy<Value = u128> {
    0u128..=1_000_000_000_000_000_000u128
}

// ---------------------------------------------------------------------------
// Property 1–2: Canonical pairs and bootstrap
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_canonicalize_is_order_free(
        x in asset_ref_strategy(),
        y in asset_ref_strategy(),
    ) {
        let canon = PairCanonicalizer::new(AssetResolver::new(WRAPPED));
        let forward = canon.canonicalize(x, y);
        let backward = canon.canonicalize(y, x);
        prop_assert_eq!(&forward, &backward);
        if let Ok(key) = forward {
            prop_assert!(key.first() < key.second());
        }
    }

    #[test]
    fn prop_bootstrap_is_symmetric_floor_sqrt(
        a in 1u128..=u64::MAX as u128,
        b in 1u128..=u64::MAX as u128,
    ) {
        let Ok(units) = bootstrap_units(Amount::new(a), Amount::new(b)) else {
            return Err(TestCaseError::fail("bootstrap overflowed"));
        };
        prop_assert_eq!(bootstrap_units(Amount::new(b), Amount::new(a)), Ok(units));

        // u64 inputs keep every square inside u128
        let product = a * b;
        let u = units.get();
        prop_assert!(u * u <= product);
        prop_assert!((u + 1).checked_mul(u + 1).is_none_or(|sq| sq > product));
    }
}

// ---------------------------------------------------------------------------
// Property 3–4: Steady-state formula
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_steady_state_symmetric(
        a in deposit_strategy(),
        b in deposit_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        supply in reserve_strategy(),
    ) {
        let p = Liquidity::new(supply);
        let units = |x: u128, rx: u128, y: u128, ry: u128| {
            units_for_deposit(Amount::new(x), Amount::new(rx), Amount::new(y), Amount::new(ry), p)
        };
        let forward = units(a, ra, b, rb);
        let swapped = units(b, rb, a, ra);
        prop_assert_eq!(forward, swapped);
    }

    #[test]
    fn prop_steady_state_monotone(
        a in deposit_strategy(),
        extra in 0u128..=1_000_000_000_000u128,
        b in deposit_strategy(),
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        supply in reserve_strategy(),
    ) {
        let p = Liquidity::new(supply);
        let units = |x: u128, y: u128| {
            units_for_deposit(Amount::new(x), Amount::new(ra), Amount::new(y), Amount::new(rb), p)
        };
        let Ok(base) = units(a, b) else {
            return Err(TestCaseError::fail("base deposit failed"));
        };
        let Ok(more_a) = units(a + extra, b) else {
            return Err(TestCaseError::fail("larger deposit failed"));
        };
        let Ok(more_b) = units(a, b + extra) else {
            return Err(TestCaseError::fail("larger deposit failed"));
        };
        prop_assert!(more_a >= base, "a: {} < {}", more_a, base);
        prop_assert!(more_b >= base, "b: {} < {}", more_b, base);
    }
}

// ---------------------------------------------------------------------------
// Property 5–6: Ledger behaviour
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Step {
    Deposit { who: u8, a: u128, b: u128 },
    Withdraw { who: u8, permille: u128 },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (1u8..4, 0u128..=10_000_000_000u128, 0u128..=10_000_000_000u128)
            .prop_map(|(who, a, b)| Step::Deposit { who, a, b }),
        (1u8..4, 1u128..=1_000u128).prop_map(|(who, permille)| Step::Withdraw { who, permille }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_unit_supply_matches_holders(
        a in 100_001u128..=10_000_000_000u128,
        b in 100_001u128..=10_000_000_000u128,
        steps in proptest::collection::vec(step_strategy(), 1..24),
    ) {
        let Some(mut pool) = seeded_pool(a, b) else {
            return Ok(());
        };
        for step in steps {
            let before = pool.clone();
            let outcome = match step {
                Step::Deposit { who, a, b } => pool
                    .deposit(account(who), Amount::new(a), Amount::new(b))
                    .map(|_| ()),
                Step::Withdraw { who, permille } => {
                    let held = pool.units_of(account(who)).get();
                    let units = Liquidity::new(held * permille / 1_000);
                    pool.withdraw(account(who), units).map(|_| ())
                }
            };
            if outcome.is_err() {
                prop_assert_eq!(&pool, &before, "failed step mutated the pool");
            }
            prop_assert!(pool.check_invariants().is_ok());
            prop_assert!(pool.total_units() >= SEED);
            prop_assert_eq!(pool.units_of(sink()), SEED);
        }
    }

    #[test]
    fn prop_deposit_then_withdraw_returns_at_most_deposit(
        ra in 100_001u128..=1_000_000_000_000u128,
        rb in 100_001u128..=1_000_000_000_000u128,
        da in 1u128..=1_000_000_000_000u128,
        db in 1u128..=1_000_000_000_000u128,
    ) {
        let Some(mut pool) = seeded_pool(ra, rb) else {
            return Ok(());
        };
        let bob = account(9);
        let Ok(grant) = pool.deposit(bob, Amount::new(da), Amount::new(db)) else {
            return Ok(());
        };
        let Ok((out_a, out_b)) = pool.withdraw(bob, grant.units_to_depositor()) else {
            return Err(TestCaseError::fail("withdrawing fresh units failed"));
        };

        // Both legs valued at the pre-deposit reserve ratio.
        let value_in = da * rb + db * ra;
        let value_out = out_a.get() * rb + out_b.get() * ra;
        prop_assert!(value_out <= value_in, "out {} > in {}", value_out, value_in);
    }
}
