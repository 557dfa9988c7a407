//! Caller-facing asset reference.

use serde::{Deserialize, Serialize};

use super::AssetId;

/// What a caller names when pointing at one side of a pair: either the
/// chain's native coin or a concrete asset.
///
/// The native coin is never stored in a pair key; it is resolved to the
/// wrapped-native [`AssetId`] first (see
/// [`AssetResolver`](crate::pair::AssetResolver)).
///
/// # Examples
///
/// ```
/// use hydra_factory::domain::{AssetId, AssetRef};
///
/// assert_eq!(AssetRef::from(AssetId::ZERO), AssetRef::Native);
/// assert!(AssetRef::from(AssetId::from_u128(7)).as_asset().is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRef {
    /// The native coin (all-zero sentinel on the wire).
    Native,
    /// A concrete asset.
    Asset(AssetId),
}

impl AssetRef {
    /// Returns `true` if this is the native-coin sentinel.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// Returns the concrete asset id, or `None` for the native coin.
    #[must_use]
    pub const fn as_asset(&self) -> Option<AssetId> {
        match self {
            Self::Native => None,
            Self::Asset(id) => Some(*id),
        }
    }
}

impl From<AssetId> for AssetRef {
    /// Maps the all-zero id to [`AssetRef::Native`].
    fn from(id: AssetId) -> Self {
        if id.is_zero() {
            Self::Native
        } else {
            Self::Asset(id)
        }
    }
}
