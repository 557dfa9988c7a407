//! Liquidity management trait for paired-asset pools.
//!
//! # Unit Accounting Invariant
//!
//! The total units reported by [`LiquidityPool::total_units`] **only**
//! change through [`LiquidityPool::deposit`] and
//! [`LiquidityPool::withdraw`] (plus the one-time bootstrap at creation).
//! For a pool with holders `h₁ … hₙ`:
//!
//! ```text
//! total_units = Σ units_of(hᵢ)
//! ```
//!
//! # Atomicity
//!
//! Each call either applies every reserve and ledger change or none of
//! them. Implementations compute all new values before assigning any.

use crate::domain::{AccountId, Amount, Liquidity, LiquidityGrant, PairKey};
use crate::error::AmmError;

/// A pool holding two reserves and a ledger of liquidity units.
///
/// Amounts are always in canonical [`PairKey`] order: `_a` is
/// [`PairKey::first`], `_b` is [`PairKey::second`].
pub trait LiquidityPool {
    /// The canonical pair this pool trades.
    fn pair(&self) -> &PairKey;

    /// Current reserves `(reserve_a, reserve_b)`.
    fn reserves(&self) -> (Amount, Amount);

    /// Outstanding units, burned seed included.
    fn total_units(&self) -> Liquidity;

    /// Units held by `holder`.
    fn units_of(&self, holder: AccountId) -> Liquidity;

    /// Adds both amounts to the reserves and mints units to `depositor`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidLiquidity`] if the pool has not been seeded.
    /// - [`AmmError::InvalidQuantity`] if the deposit mints zero units.
    /// - [`AmmError::Overflow`] if any reserve or balance would overflow.
    fn deposit(
        &mut self,
        depositor: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquidityGrant, AmmError>;

    /// Burns `units` held by `holder` and releases the pro-rata share of
    /// each reserve, returned as `(amount_a, amount_b)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::LockedUnits`] if `holder` is the burn sink.
    /// - [`AmmError::InsufficientUnits`] if `holder` owns fewer units.
    /// - [`AmmError::InvalidQuantity`] if `units` is zero.
    fn withdraw(
        &mut self,
        holder: AccountId,
        units: Liquidity,
    ) -> Result<(Amount, Amount), AmmError>;
}
