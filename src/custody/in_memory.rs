//! Ledger-backed [`Custody`] for tests and embedding.

use std::collections::BTreeMap;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::Custody;

/// In-memory asset ledger with per-owner allowances to the factory.
///
/// - `balances[(asset, account)]`: asset holdings, wrapped-native included
/// - `allowances[(asset, owner)]`: how much the factory may pull from
///   `owner`; [`Amount::MAX`] never decreases
/// - `native[account]`: native coin released by [`Custody::unwrap_native`]
///
/// Every operation validates before it writes, so an `Err` leaves the
/// ledger untouched.
///
/// # Example
///
/// ```rust
/// use hydra_factory::custody::InMemoryCustody;
/// use hydra_factory::domain::{AccountId, Amount, AssetId};
/// use hydra_factory::traits::Custody;
///
/// let token = AssetId::from_u128(7);
/// let alice = AccountId::from_bytes([0xa1; 32]);
/// let vault = AccountId::from_bytes([0x0b; 32]);
///
/// let mut custody = InMemoryCustody::new(AssetId::from_u128(0xbb));
/// custody.mint(token, alice, Amount::new(500)).expect("mint");
/// custody.approve(token, alice, Amount::new(200));
///
/// custody.transfer_in(token, alice, vault, Amount::new(200)).expect("approved");
/// assert_eq!(custody.balance_of(token, vault), Amount::new(200));
/// assert!(custody.transfer_in(token, alice, vault, Amount::new(1)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryCustody {
    wrapped_native: AssetId,
    balances: BTreeMap<(AssetId, AccountId), Amount>,
    allowances: BTreeMap<(AssetId, AccountId), Amount>,
    native: BTreeMap<AccountId, Amount>,
}

impl InMemoryCustody {
    /// Creates an empty ledger whose wrapped-native asset is
    /// `wrapped_native`.
    #[must_use]
    pub const fn new(wrapped_native: AssetId) -> Self {
        Self {
            wrapped_native,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            native: BTreeMap::new(),
        }
    }

    /// The asset minted by [`Custody::wrap_native`].
    #[must_use]
    pub const fn wrapped_native(&self) -> AssetId {
        self.wrapped_native
    }

    /// Credits `amount` of `asset` to `account` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the balance would exceed `u128`.
    pub fn mint(
        &mut self,
        asset: AssetId,
        account: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let balance = self.balance_of(asset, account).safe_add(&amount)?;
        self.set_balance(asset, account, balance);
        Ok(())
    }

    /// Sets how much of `asset` the factory may pull from `owner`.
    pub fn approve(&mut self, asset: AssetId, owner: AccountId, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(asset, owner));
        } else {
            self.allowances.insert((asset, owner), amount);
        }
    }

    /// Remaining allowance of `owner` for `asset`.
    #[must_use]
    pub fn allowance(&self, asset: AssetId, owner: AccountId) -> Amount {
        self.allowances
            .get(&(asset, owner))
            .copied()
            .unwrap_or_default()
    }

    /// Native coin released to `account`.
    #[must_use]
    pub fn native_balance_of(&self, account: AccountId) -> Amount {
        self.native.get(&account).copied().unwrap_or_default()
    }

    fn set_balance(&mut self, asset: AssetId, account: AccountId, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(asset, account));
        } else {
            self.balances.insert((asset, account), amount);
        }
    }

    /// Validates and applies a balance move. `from == to` is a no-op that
    /// still requires `from` to cover `amount`.
    fn move_balance(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let from_balance = self.balance_of(asset, from);
        if from_balance < amount {
            return Err(AmmError::InsufficientBalance);
        }
        if from == to {
            return Ok(());
        }
        let debited = from_balance.safe_sub(&amount)?;
        let credited = self.balance_of(asset, to).safe_add(&amount)?;
        self.set_balance(asset, from, debited);
        self.set_balance(asset, to, credited);
        Ok(())
    }
}

impl Custody for InMemoryCustody {
    fn transfer_in(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let allowance = self.allowance(asset, from);
        if allowance < amount {
            return Err(AmmError::InsufficientAllowance);
        }
        self.move_balance(asset, from, to, amount)?;
        if allowance != Amount::MAX {
            let remaining = allowance.safe_sub(&amount)?;
            self.approve(asset, from, remaining);
        }
        Ok(())
    }

    fn refund_in(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let allowance = self.allowance(asset, from);
        let restored = if allowance == Amount::MAX {
            allowance
        } else {
            allowance.safe_add(&amount)?
        };
        self.move_balance(asset, to, from, amount)?;
        self.approve(asset, from, restored);
        Ok(())
    }

    fn transfer_out(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.move_balance(asset, from, to, amount)
    }

    fn wrap_native(&mut self, to: AccountId, amount: Amount) -> Result<(), AmmError> {
        self.mint(self.wrapped_native, to, amount)
    }

    fn unwrap_native(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let wrapped = self.balance_of(self.wrapped_native, from);
        if wrapped < amount {
            return Err(AmmError::InsufficientBalance);
        }
        let burned = wrapped.safe_sub(&amount)?;
        let released = self.native_balance_of(to).safe_add(&amount)?;
        self.set_balance(self.wrapped_native, from, burned);
        if !released.is_zero() {
            self.native.insert(to, released);
        }
        Ok(())
    }

    fn balance_of(&self, asset: AssetId, account: AccountId) -> Amount {
        self.balances
            .get(&(asset, account))
            .copied()
            .unwrap_or_default()
    }
}
