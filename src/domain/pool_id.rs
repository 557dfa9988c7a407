//! Pool handle and its custody account.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::AccountId;

/// Marker byte opening every pool custody account.
const POOL_ACCOUNT_TAG: u8 = 0x9f;

/// Opaque handle to a registered pool.
///
/// Ids are assigned sequentially by the registry starting at `1` and are
/// never reused once committed; the id of a rolled-back creation is handed
/// out again. Each id maps deterministically to the [`AccountId`] that
/// holds the pool's reserves in custody.
///
/// # Examples
///
/// ```
/// use hydra_factory::domain::PoolId;
///
/// let id = PoolId::new(7);
/// assert_eq!(PoolId::from_account(id.account()), Some(id));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PoolId(u64);

impl PoolId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the custody account holding this pool's reserves.
    ///
    /// Layout: tag byte, 23 zero bytes, the id as 8 big-endian bytes.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        let id = self.0.to_be_bytes();
        let mut bytes = [0u8; 32];
        bytes[0] = POOL_ACCOUNT_TAG;
        let mut i = 0;
        while i < 8 {
            bytes[24 + i] = id[i];
            i += 1;
        }
        AccountId::from_bytes(bytes)
    }

    /// Recovers the pool id from a custody account, if it is one.
    #[must_use]
    pub fn from_account(account: AccountId) -> Option<Self> {
        let bytes = account.as_bytes();
        if bytes[0] != POOL_ACCOUNT_TAG || bytes[1..24].iter().any(|b| *b != 0) {
            return None;
        }
        let mut id = [0u8; 8];
        id.copy_from_slice(&bytes[24..]);
        Some(Self(u64::from_be_bytes(id)))
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}
