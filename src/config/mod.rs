//! Factory configuration.
//!
//! [`FactoryConfig`] carries the protocol constants (deposit floor, seed
//! burn) and the two identities the factory needs to know about: the
//! wrapped-native asset and the burn sink account.

mod factory_config;

pub use factory_config::{DEFAULT_MIN_DEPOSIT, DEFAULT_SEED_BURN, FactoryConfig};
