//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_factory::prelude::*;
//! ```

pub use crate::config::FactoryConfig;
pub use crate::custody::InMemoryCustody;
pub use crate::domain::{
    AccountId, Amount, AssetId, AssetRef, Liquidity, LiquidityGrant, PairKey, PoolCreated,
    PoolEvent, PoolId,
};
pub use crate::error::{AmmError, Result};
pub use crate::factory::{
    AddLiquidityRequest, CreatePoolRequest, PoolCreation, PoolFactory, RemoveLiquidityRequest,
};
pub use crate::pools::Pool;
#[cfg(feature = "json-store")]
pub use crate::registry::JsonFileStore;
pub use crate::registry::{MemoryStore, PoolRegistry};
pub use crate::traits::{Custody, EventSink, LiquidityPool, RegistryStore};
