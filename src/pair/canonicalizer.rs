//! Resolution and ordering of caller-supplied pairs.

use super::AssetResolver;
use crate::domain::{AssetRef, PairKey};
use crate::error::AmmError;

/// Turns two caller references into the canonical [`PairKey`].
///
/// Rejects, with [`AmmError::InvalidPair`]:
///
/// - the native coin paired with itself or with its wrapped form,
/// - an asset paired with itself,
/// - the zero id passed as a concrete asset.
///
/// Argument order never matters: `canonicalize(x, y) == canonicalize(y, x)`.
///
/// # Examples
///
/// ```
/// use hydra_factory::domain::{AssetId, AssetRef};
/// use hydra_factory::pair::{AssetResolver, PairCanonicalizer};
///
/// let weth = AssetId::from_u128(0xbb);
/// let usdc = AssetId::from_u128(0x01);
/// let canon = PairCanonicalizer::new(AssetResolver::new(weth));
///
/// let key = canon.canonicalize(AssetRef::Native, AssetRef::Asset(usdc)).expect("valid");
/// assert_eq!((key.first(), key.second()), (usdc, weth));
/// assert!(canon.canonicalize(AssetRef::Native, AssetRef::Asset(weth)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairCanonicalizer {
    resolver: AssetResolver,
}

impl PairCanonicalizer {
    /// Creates a canonicalizer over `resolver`.
    #[must_use]
    pub const fn new(resolver: AssetResolver) -> Self {
        Self { resolver }
    }

    /// The resolver used for native substitution.
    #[must_use]
    pub const fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }

    /// Resolves both sides and orders them.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPair`] for any degenerate pair.
    pub fn canonicalize(&self, asset1: AssetRef, asset2: AssetRef) -> Result<PairKey, AmmError> {
        let wrapped = self.resolver.wrapped_native();
        let wraps_native = |this: AssetRef, other: AssetRef| {
            this.is_native() && (other.is_native() || other.as_asset() == Some(wrapped))
        };
        if wraps_native(asset1, asset2) || wraps_native(asset2, asset1) {
            return Err(AmmError::InvalidPair(
                "native asset cannot pair with itself or its wrapped form",
            ));
        }

        PairKey::new(self.resolver.resolve(asset1), self.resolver.resolve(asset2))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::AssetId;

    const WRAPPED: AssetId = AssetId::from_u128(0xbb);

    fn canon() -> PairCanonicalizer {
        PairCanonicalizer::new(AssetResolver::new(WRAPPED))
    }

    fn asset(v: u128) -> AssetRef {
        AssetRef::Asset(AssetId::from_u128(v))
    }

    #[test]
    fn orders_by_numeric_value() {
        let Ok(key) = canon().canonicalize(asset(0x200), asset(0x1ff)) else {
            panic!("expected Ok");
        };
        assert_eq!(key.first(), AssetId::from_u128(0x1ff));
        assert_eq!(key.second(), AssetId::from_u128(0x200));
    }

    #[test]
    fn argument_order_is_irrelevant() {
        assert_eq!(
            canon().canonicalize(asset(7), asset(3)),
            canon().canonicalize(asset(3), asset(7))
        );
    }

    #[test]
    fn native_is_stored_as_wrapped() {
        let Ok(key) = canon().canonicalize(AssetRef::Native, asset(0xcc)) else {
            panic!("expected Ok");
        };
        assert_eq!(key.first(), WRAPPED);
        assert_eq!(key.second(), AssetId::from_u128(0xcc));
    }

    #[test]
    fn rejects_same_asset() {
        assert!(matches!(
            canon().canonicalize(asset(1), asset(1)),
            Err(AmmError::InvalidPair(_))
        ));
    }

    #[test]
    fn rejects_both_native() {
        assert!(matches!(
            canon().canonicalize(AssetRef::Native, AssetRef::Native),
            Err(AmmError::InvalidPair(_))
        ));
    }

    #[test]
    fn rejects_native_with_wrapped_in_either_order() {
        let wrapped = AssetRef::Asset(WRAPPED);
        assert!(canon().canonicalize(AssetRef::Native, wrapped).is_err());
        assert!(canon().canonicalize(wrapped, AssetRef::Native).is_err());
    }

    #[test]
    fn wrapped_with_other_asset_is_valid() {
        assert!(canon().canonicalize(AssetRef::Asset(WRAPPED), asset(1)).is_ok());
    }

    #[test]
    fn rejects_explicit_zero_asset() {
        let zero = AssetRef::Asset(AssetId::ZERO);
        assert_eq!(
            canon().canonicalize(zero, asset(1)),
            Err(AmmError::InvalidPair("zero asset id is reserved"))
        );
    }
}
