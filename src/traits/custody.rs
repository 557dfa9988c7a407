//! Token custody collaborator.
//!
//! The factory never holds balances itself. It asks a [`Custody`]
//! implementation to move assets between callers and pool custody
//! accounts, and relies on each call being all-or-nothing: a call that
//! returns `Err` must leave every balance untouched.
//!
//! # Rollback Contract
//!
//! Every movement has an exact inverse the factory runs when a later step
//! of an operation fails:
//!
//! | Movement | Undone by |
//! |----------|-----------|
//! | `transfer_in(asset, from, to, n)` | `refund_in(asset, from, to, n)` (balance and allowance) |
//! | `transfer_out(asset, from, to, n)` | `transfer_out(asset, to, from, n)` |
//! | `wrap_native(to, n)` | `unwrap_native(to, payer, n)` |
//!
//! Payouts stay in the pool's own assets, so `unwrap_native` only ever
//! runs to refund an attached native value.

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::AmmError;

/// Deposit/transfer/balance primitives over an external asset ledger.
pub trait Custody {
    /// Pulls `amount` of `asset` from `from` into `to` on behalf of the
    /// factory (spends `from`'s allowance to the factory).
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if the factory is not
    ///   approved for `amount`.
    /// - [`AmmError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    fn transfer_in(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Reverses a successful `transfer_in(asset, from, to, amount)`:
    /// moves `amount` back from `to` to `from` and gives back the
    /// allowance the pull spent.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientBalance`] if `to` holds less than
    ///   `amount`.
    /// - [`AmmError::Overflow`] if the restored allowance or balance
    ///   cannot be recorded.
    fn refund_in(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Pays `amount` of `asset` out of an account the factory controls
    /// (a pool custody account) to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less
    /// than `amount`.
    fn transfer_out(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Wraps `amount` of native coin attached to the current call and
    /// credits the wrapped-native asset to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the credit cannot be recorded.
    fn wrap_native(&mut self, to: AccountId, amount: Amount) -> Result<(), AmmError>;

    /// Burns `amount` of wrapped-native from `from` and releases the
    /// native coin to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `from` holds less
    /// than `amount` of the wrapped asset.
    fn unwrap_native(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Current balance of `asset` held by `account`.
    #[must_use]
    fn balance_of(&self, asset: AssetId, account: AccountId) -> Amount;
}
