//! Checked arithmetic trait for ledger quantities.
//!
//! The [`CheckedArithmetic`] trait turns the `Option`-returning checked
//! operations on [`Amount`] and [`Liquidity`] into
//! [`Result<Self, AmmError>`](crate::error::AmmError), so ledger updates
//! can propagate failures with `?`.
//!
//! # Examples
//!
//! ```
//! use hydra_factory::domain::Amount;
//! use hydra_factory::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(100).safe_add(&Amount::new(200));
//! assert_eq!(reserve, Ok(Amount::new(300)));
//! ```

use primitive_types::U256;

use crate::domain::{Amount, Liquidity};
use crate::error::AmmError;

/// Fallible arithmetic for ledger quantities.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds `u128`.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Liquidity {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("liquidity addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("liquidity subtraction underflow"))
    }
}

/// `floor(x · y / z)` with a 256-bit intermediate product.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `z` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div_floor(x: u128, y: u128, z: u128) -> Result<u128, AmmError> {
    if z == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let product = U256::from(x)
        .checked_mul(U256::from(y))
        .ok_or(AmmError::Overflow("mul_div product overflow"))?;
    let quotient = product / U256::from(z);
    if quotient.bits() > 128 {
        return Err(AmmError::Overflow("mul_div quotient exceeds u128"));
    }
    Ok(quotient.as_u128())
}
