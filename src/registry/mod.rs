//! Pool registry and its persistence.
//!
//! The [`PoolRegistry`] maps each canonical pair to at most one pool and
//! hands out sequential [`PoolId`](crate::domain::PoolId)s. It is saved as
//! a versioned [`RegistrySnapshot`] through a
//! [`RegistryStore`](crate::traits::RegistryStore):
//!
//! | Store | Feature | Durability |
//! |-------|---------|------------|
//! | [`MemoryStore`] | always | process lifetime |
//! | [`JsonFileStore`] | `json-store` | file, atomic replace |

mod pool_registry;
mod store;

pub use pool_registry::{PoolRegistry, RegistrySnapshot};
#[cfg(feature = "json-store")]
pub use store::JsonFileStore;
pub use store::MemoryStore;
