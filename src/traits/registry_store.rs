//! Durable storage for the pool registry.

use crate::error::AmmError;
use crate::registry::RegistrySnapshot;

/// Persists [`RegistrySnapshot`]s so pools, reserves, and unit balances
/// survive a process restart.
///
/// `save` replaces the stored image as a whole; a failed `save` must
/// leave the previous image intact.
pub trait RegistryStore {
    /// Returns the last saved snapshot, or `None` for a fresh store.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Storage`] if the backing medium cannot be read.
    /// - [`AmmError::Serialization`] if the stored image is corrupt.
    fn load(&self) -> Result<Option<RegistrySnapshot>, AmmError>;

    /// Replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Storage`] if the backing medium cannot be written.
    /// - [`AmmError::Serialization`] if the snapshot cannot be encoded.
    fn save(&mut self, snapshot: &RegistrySnapshot) -> Result<(), AmmError>;
}
