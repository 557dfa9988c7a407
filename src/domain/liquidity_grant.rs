//! Outcome of a deposit into a pool.

use serde::{Deserialize, Serialize};

use super::Liquidity;
use crate::error::AmmError;

/// Units produced by one deposit: what the depositor receives and what is
/// permanently locked in the burn sink.
///
/// Only the bootstrap deposit burns units; later deposits carry
/// `units_burned == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityGrant {
    units_to_depositor: Liquidity,
    units_burned: Liquidity,
}

impl LiquidityGrant {
    /// Splits `total` units into a burned seed and the depositor's share.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`] unless `total` strictly
    /// exceeds `burned`; the depositor must always receive something.
    pub fn split(total: Liquidity, burned: Liquidity) -> Result<Self, AmmError> {
        if total <= burned {
            return Err(AmmError::InvalidQuantity(
                "minted units do not exceed the seed burn",
            ));
        }
        let units_to_depositor = total
            .checked_sub(&burned)
            .ok_or(AmmError::Underflow("grant split underflow"))?;
        Ok(Self {
            units_to_depositor,
            units_burned: burned,
        })
    }

    /// A grant with nothing burned.
    #[must_use]
    pub const fn unburned(units: Liquidity) -> Self {
        Self {
            units_to_depositor: units,
            units_burned: Liquidity::ZERO,
        }
    }

    /// Units credited to the depositor.
    #[must_use]
    pub const fn units_to_depositor(&self) -> Liquidity {
        self.units_to_depositor
    }

    /// Units credited to the burn sink.
    #[must_use]
    pub const fn units_burned(&self) -> Liquidity {
        self.units_burned
    }

    /// Total units minted by the deposit.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the sum does not fit.
    pub fn total(&self) -> Result<Liquidity, AmmError> {
        self.units_to_depositor
            .checked_add(&self.units_burned)
            .ok_or(AmmError::Overflow("grant total overflow"))
    }
}
