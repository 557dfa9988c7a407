//! [`RegistryStore`] backends.

#[cfg(feature = "json-store")]
use std::fs::{self, File};
#[cfg(feature = "json-store")]
use std::io::{ErrorKind, Write};
#[cfg(feature = "json-store")]
use std::path::{Path, PathBuf};

use super::RegistrySnapshot;
use crate::error::AmmError;
use crate::traits::RegistryStore;

/// Keeps the latest snapshot in memory. State is lost with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<RegistrySnapshot>,
    saves: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            snapshot: None,
            saves: 0,
        }
    }

    /// Number of successful saves.
    #[must_use]
    pub const fn saves(&self) -> usize {
        self.saves
    }

    /// The last saved snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&RegistrySnapshot> {
        self.snapshot.as_ref()
    }
}

impl RegistryStore for MemoryStore {
    fn load(&self) -> Result<Option<RegistrySnapshot>, AmmError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &RegistrySnapshot) -> Result<(), AmmError> {
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }
}

/// Stores the snapshot as pretty-printed JSON in a single file.
///
/// Saves go to a sibling `.tmp` file which is synced and then renamed
/// over the target, so readers see either the old or the new image.
#[cfg(feature = "json-store")]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[cfg(feature = "json-store")]
impl JsonFileStore {
    /// Creates a store backed by `path`. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[cfg(feature = "json-store")]
impl RegistryStore for JsonFileStore {
    fn load(&self) -> Result<Option<RegistrySnapshot>, AmmError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_slice(&bytes)?;
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &RegistrySnapshot) -> Result<(), AmmError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let tmp = self.temp_path();
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
