//! Notifications emitted by the factory.

use serde::{Deserialize, Serialize};

use super::{AccountId, Amount, AssetId, Liquidity, PoolId};

/// Creation notification. Assets are always in canonical order and the
/// native coin always appears as its wrapped id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolCreated {
    /// Lower asset id of the pair.
    pub token_a: AssetId,
    /// Higher asset id of the pair.
    pub token_b: AssetId,
    /// Handle of the new pool.
    pub pool: PoolId,
}

/// Every state change the factory reports to its [`EventSink`].
///
/// Amounts are in canonical pair order.
///
/// [`EventSink`]: crate::traits::EventSink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PoolEvent {
    /// A pool was created and seeded.
    Created(PoolCreated),
    /// Liquidity was added to an existing pool.
    LiquidityAdded {
        /// Target pool.
        pool: PoolId,
        /// Depositor.
        provider: AccountId,
        /// Deposit of the first asset.
        amount_a: Amount,
        /// Deposit of the second asset.
        amount_b: Amount,
        /// Units minted to the depositor.
        units: Liquidity,
    },
    /// Units were redeemed for reserves.
    LiquidityRemoved {
        /// Source pool.
        pool: PoolId,
        /// Redeeming holder.
        provider: AccountId,
        /// Units burned.
        units: Liquidity,
        /// Payout of the first asset.
        amount_a: Amount,
        /// Payout of the second asset.
        amount_b: Amount,
    },
}

impl PoolEvent {
    /// The pool the event concerns.
    #[must_use]
    pub const fn pool(&self) -> PoolId {
        match self {
            Self::Created(created) => created.pool,
            Self::LiquidityAdded { pool, .. } | Self::LiquidityRemoved { pool, .. } => *pool,
        }
    }
}

impl From<PoolCreated> for PoolEvent {
    fn from(created: PoolCreated) -> Self {
        Self::Created(created)
    }
}
