//! Fixed-width asset identifier.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AmmError;

/// A 32-byte identifier for a fungible asset.
///
/// Ordering is lexicographic over the bytes, which is the same as
/// comparing the identifiers as unsigned big-endian integers. The
/// all-zero id is reserved as the native-coin sentinel.
///
/// Ids display and serialize as `0x`-prefixed lowercase hex.
///
/// # Examples
///
/// ```
/// use hydra_factory::domain::AssetId;
///
/// let usdc = AssetId::from_bytes([1u8; 32]);
/// let parsed: AssetId = usdc.to_string().parse().expect("valid hex");
/// assert_eq!(parsed, usdc);
/// assert!(AssetId::ZERO < usdc);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// The all-zero id, used as the native-coin sentinel.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an `AssetId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an id whose numeric value is `value`.
    ///
    /// The integer is written big-endian into the low 16 bytes, so
    /// `from_u128(x) < from_u128(y)` exactly when `x < y`.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        let low = value.to_be_bytes();
        let mut bytes = [0u8; 32];
        let mut i = 0;
        while i < 16 {
            bytes[16 + i] = low[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the all-zero sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

/// Parses `0x`-prefixed (or bare) hex into exactly 32 bytes.
pub(crate) fn parse_hex32(s: &str) -> Result<[u8; 32], AmmError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let mut out = [0u8; 32];
    hex::decode_to_slice(digits, &mut out)
        .map_err(|_| AmmError::Serialization(format!("expected 32 bytes of hex, got {s:?}")))?;
    Ok(out)
}

impl FromStr for AssetId {
    type Err = AmmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex32(s).map(Self)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
