//! Integer arithmetic for liquidity accounting.
//!
//! - [`CheckedArithmetic`]: overflow-safe ledger updates that return
//!   [`AmmError`](crate::error::AmmError) instead of panicking.
//! - [`mul_div_floor`]: wide `x · y / z` for pro-rata payouts.
//! - [`units_for_deposit`]: the liquidity-unit formula (bootstrap and
//!   slip-penalized steady state).
//!
//! Every division floors. Nothing in this module touches floating point.

mod checked;
mod liquidity_units;

pub use checked::{CheckedArithmetic, mul_div_floor};
pub use liquidity_units::{bootstrap_units, units_for_deposit};
