//! Ordered pair of distinct assets: the registry key.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::AssetId;
use crate::error::AmmError;

/// An ordered pair of distinct assets, canonically sorted by id.
///
/// The canonical ordering guarantees `first < second`, so `(A, B)` and
/// `(B, A)` map to the same key. The all-zero id is rejected: the native
/// coin must be resolved to its wrapped form before a key is built.
///
/// # Examples
///
/// ```
/// use hydra_factory::domain::{AssetId, PairKey};
///
/// let a = AssetId::from_u128(1);
/// let b = AssetId::from_u128(2);
///
/// let key = PairKey::new(b, a).expect("distinct assets");
/// assert_eq!(key.first(), a);
/// assert_eq!(key.second(), b);
/// assert_eq!(key, PairKey::new(a, b).expect("distinct assets"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PairKey {
    first: AssetId,
    second: AssetId,
}

impl PairKey {
    /// Creates a canonically-ordered `PairKey`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPair`] if either id is the zero sentinel.
    /// - [`AmmError::InvalidPair`] if both ids are equal.
    pub fn new(asset1: AssetId, asset2: AssetId) -> Result<Self, AmmError> {
        if asset1.is_zero() || asset2.is_zero() {
            return Err(AmmError::InvalidPair("zero asset id is reserved"));
        }
        if asset1 == asset2 {
            return Err(AmmError::InvalidPair("pair requires two distinct assets"));
        }

        let (first, second) = if asset1 < asset2 {
            (asset1, asset2)
        } else {
            (asset2, asset1)
        };

        Ok(Self { first, second })
    }

    /// Returns the lower asset id.
    #[must_use]
    pub const fn first(&self) -> AssetId {
        self.first
    }

    /// Returns the higher asset id.
    #[must_use]
    pub const fn second(&self) -> AssetId {
        self.second
    }

    /// Reorders a caller-side `(asset1 → x, asset2 → y)` assignment into
    /// canonical order.
    ///
    /// `asset1` must be one of the two sides; the value attached to it
    /// lands in the slot for its canonical position.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPair`] if `asset1` is not in the pair.
    pub fn orient<T>(&self, asset1: AssetId, x: T, y: T) -> Result<(T, T), AmmError> {
        if asset1 == self.first {
            Ok((x, y))
        } else if asset1 == self.second {
            Ok((y, x))
        } else {
            Err(AmmError::InvalidPair("asset is not part of this pair"))
        }
    }
}

impl<'de> Deserialize<'de> for PairKey {
    /// Rejects unordered or degenerate keys.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            first: AssetId,
            second: AssetId,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.first >= raw.second {
            return Err(serde::de::Error::custom("pair key is not in canonical order"));
        }
        Self::new(raw.first, raw.second).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first, self.second)
    }
}
