//! Liquidity units awarded for a deposit.
//!
//! # Bootstrap (no outstanding units, empty reserves)
//!
//! ```text
//! units = ⌊√(a · b)⌋
//! ```
//!
//! The geometric mean depends only on the two deposits and is symmetric,
//! so the canonical order of the pair never changes the outcome.
//!
//! # Steady state (`P` units outstanding over reserves `A`, `B`)
//!
//! ```text
//! share = P · (a·B + b·A) / (2·A·B)              average proportional share
//! slip  = 1 − |a·B − b·A| / ((a + A)(b + B))      asymmetry penalty
//! units = ⌊share · slip⌋
//!       = ⌊P · (a·B + b·A) · ((a+A)(b+B) − |a·B − b·A|) / (2·A·B·(a+A)(b+B))⌋
//! ```
//!
//! A deposit in the pool's ratio (`a·B == b·A`) has `slip == 1` and earns
//! exactly its proportional share. Anything lopsided earns less than a
//! balanced deposit of the same value. The expression is symmetric in the
//! two sides and non-decreasing in each deposit. It is evaluated as a
//! single 512-bit quotient so the only rounding is the final floor.

use primitive_types::{U256, U512};

use crate::domain::{Amount, Liquidity};
use crate::error::AmmError;

/// Computes the units minted for depositing `deposit_a` / `deposit_b`
/// into a pool holding `reserve_a` / `reserve_b` with `existing` units
/// outstanding.
///
/// # Errors
///
/// - [`AmmError::InvalidLiquidity`] if `existing` is zero but a reserve
///   is not.
/// - [`AmmError::ZeroReserve`] if `existing` is non-zero but a reserve is
///   zero.
/// - [`AmmError::Overflow`] if an intermediate product exceeds 512 bits
///   or the result exceeds `u128`.
///
/// # Examples
///
/// ```
/// use hydra_factory::domain::{Amount, Liquidity};
/// use hydra_factory::math::units_for_deposit;
///
/// // Bootstrap: √(1_000_000 · 4_000_000) = 2_000_000
/// let units = units_for_deposit(
///     Amount::new(1_000_000), Amount::ZERO,
///     Amount::new(4_000_000), Amount::ZERO,
///     Liquidity::ZERO,
/// );
/// assert_eq!(units, Ok(Liquidity::new(2_000_000)));
/// ```
pub fn units_for_deposit(
    deposit_a: Amount,
    reserve_a: Amount,
    deposit_b: Amount,
    reserve_b: Amount,
    existing: Liquidity,
) -> Result<Liquidity, AmmError> {
    if deposit_a.is_zero() && deposit_b.is_zero() {
        return Ok(Liquidity::ZERO);
    }

    if existing.is_zero() {
        if !reserve_a.is_zero() || !reserve_b.is_zero() {
            return Err(AmmError::InvalidLiquidity(
                "reserves present without outstanding units",
            ));
        }
        return bootstrap_units(deposit_a, deposit_b);
    }

    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(AmmError::ZeroReserve);
    }

    steady_state_units(deposit_a, reserve_a, deposit_b, reserve_b, existing)
}

/// `⌊√(a · b)⌋`, the units for the first deposit into an empty pool.
///
/// # Errors
///
/// Never fails for `u128` inputs; the `Result` keeps the signature
/// uniform with the steady-state path.
pub fn bootstrap_units(deposit_a: Amount, deposit_b: Amount) -> Result<Liquidity, AmmError> {
    let product = U256::from(deposit_a.get())
        .checked_mul(U256::from(deposit_b.get()))
        .ok_or(AmmError::Overflow("bootstrap product overflow"))?;
    let root = product.integer_sqrt();
    if root.bits() > 128 {
        return Err(AmmError::Overflow("bootstrap units exceed u128"));
    }
    Ok(Liquidity::new(root.as_u128()))
}

fn steady_state_units(
    deposit_a: Amount,
    reserve_a: Amount,
    deposit_b: Amount,
    reserve_b: Amount,
    existing: Liquidity,
) -> Result<Liquidity, AmmError> {
    let a = U512::from(deposit_a.get());
    let b = U512::from(deposit_b.get());
    let ra = U512::from(reserve_a.get());
    let rb = U512::from(reserve_b.get());
    let p = U512::from(existing.get());

    // Inputs are < 2^128, so the cross terms and sums below fit in 260 bits.
    let cross_a = a * rb;
    let cross_b = b * ra;
    let weighted = cross_a + cross_b;
    let skew = if cross_a > cross_b {
        cross_a - cross_b
    } else {
        cross_b - cross_a
    };
    let grown = (a + ra) * (b + rb);
    // grown ≥ a·B + b·A ≥ skew
    let kept = grown - skew;

    let numerator = p
        .checked_mul(weighted)
        .and_then(|v| v.checked_mul(kept))
        .ok_or(AmmError::Overflow("liquidity numerator overflow"))?;
    let denominator = (ra * rb)
        .checked_mul(grown)
        .and_then(|v| v.checked_mul(U512::from(2u8)))
        .ok_or(AmmError::Overflow("liquidity denominator overflow"))?;

    let units = numerator / denominator;
    if units.bits() > 128 {
        return Err(AmmError::Overflow("minted units exceed u128"));
    }
    Ok(Liquidity::new(units.as_u128()))
}
