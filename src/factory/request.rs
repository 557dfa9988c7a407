//! Inputs and outputs of factory operations.

use crate::domain::{AccountId, Amount, AssetRef, Liquidity, LiquidityGrant, PoolCreated, PoolId};

/// A two-legged deposit, in the caller's own argument order.
///
/// `native_value` is the native coin attached to the call. It must equal
/// the amount of the [`AssetRef::Native`] leg, or be absent/zero when no
/// leg is native.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositRequest {
    /// Depositor; receives the minted units.
    pub caller: AccountId,
    /// First asset as supplied.
    pub asset_a: AssetRef,
    /// Amount of `asset_a`.
    pub amount_a: Amount,
    /// Second asset as supplied.
    pub asset_b: AssetRef,
    /// Amount of `asset_b`.
    pub amount_b: Amount,
    /// Native coin attached to the call.
    pub native_value: Option<Amount>,
}

impl DepositRequest {
    /// Creates a request with no native value attached.
    #[must_use]
    pub const fn new(
        caller: AccountId,
        asset_a: AssetRef,
        amount_a: Amount,
        asset_b: AssetRef,
        amount_b: Amount,
    ) -> Self {
        Self {
            caller,
            asset_a,
            amount_a,
            asset_b,
            amount_b,
            native_value: None,
        }
    }

    /// Attaches `value` of native coin.
    #[must_use]
    pub const fn with_native_value(self, value: Amount) -> Self {
        Self {
            native_value: Some(value),
            ..self
        }
    }

    /// The native amount this request must carry.
    pub(crate) const fn expected_native(&self) -> Amount {
        match (self.asset_a, self.asset_b) {
            (AssetRef::Native, _) => self.amount_a,
            (_, AssetRef::Native) => self.amount_b,
            _ => Amount::ZERO,
        }
    }

    pub(crate) const fn legs(&self) -> [(AssetRef, Amount); 2] {
        [(self.asset_a, self.amount_a), (self.asset_b, self.amount_b)]
    }
}

/// Seeds a new pool.
pub type CreatePoolRequest = DepositRequest;

/// Deposits into an existing pool.
pub type AddLiquidityRequest = DepositRequest;

/// Redeems units from the pool of `(asset_a, asset_b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidityRequest {
    /// Holder of the units; receives the payout.
    pub caller: AccountId,
    /// First asset of the pair.
    pub asset_a: AssetRef,
    /// Second asset of the pair.
    pub asset_b: AssetRef,
    /// Units to burn.
    pub units: Liquidity,
}

impl RemoveLiquidityRequest {
    /// Creates a removal request.
    #[must_use]
    pub const fn new(
        caller: AccountId,
        asset_a: AssetRef,
        asset_b: AssetRef,
        units: Liquidity,
    ) -> Self {
        Self {
            caller,
            asset_a,
            asset_b,
            units,
        }
    }
}

/// Result of a successful [`create_pool`](super::PoolFactory::create_pool).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolCreation {
    /// Handle of the new pool.
    pub pool: PoolId,
    /// Units credited to the caller and to the burn sink.
    pub grant: LiquidityGrant,
    /// The notification also sent to the event sink.
    pub event: PoolCreated,
}
