//! Native-coin substitution.

use crate::domain::{AssetId, AssetRef};

/// Maps an [`AssetRef`] to the [`AssetId`] used in pair keys.
///
/// The native coin resolves to the configured wrapped-native id; every
/// other reference passes through unchanged. Total and side-effect free.
///
/// # Examples
///
/// ```
/// use hydra_factory::domain::{AssetId, AssetRef};
/// use hydra_factory::pair::AssetResolver;
///
/// let weth = AssetId::from_u128(0xbb);
/// let resolver = AssetResolver::new(weth);
/// assert_eq!(resolver.resolve(AssetRef::Native), weth);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetResolver {
    wrapped_native: AssetId,
}

impl AssetResolver {
    /// Creates a resolver that substitutes `wrapped_native` for the
    /// native coin.
    #[must_use]
    pub const fn new(wrapped_native: AssetId) -> Self {
        Self { wrapped_native }
    }

    /// The id the native coin resolves to.
    #[must_use]
    pub const fn wrapped_native(&self) -> AssetId {
        self.wrapped_native
    }

    /// Resolves a reference to a concrete id.
    #[must_use]
    pub const fn resolve(&self, asset: AssetRef) -> AssetId {
        match asset {
            AssetRef::Native => self.wrapped_native,
            AssetRef::Asset(id) => id,
        }
    }
}
