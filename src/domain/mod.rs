//! Domain value types used throughout the factory.
//!
//! Identifiers ([`AssetId`], [`AccountId`], [`PoolId`]), quantities
//! ([`Amount`], [`Liquidity`]), the canonical [`PairKey`], and the
//! records produced by factory operations. All types use newtypes with
//! validated constructors to enforce invariants.

mod account_id;
mod amount;
mod asset_id;
mod asset_ref;
mod liquidity;
mod liquidity_grant;
mod pair_key;
mod pool_event;
mod pool_id;

pub use account_id::AccountId;
pub use amount::Amount;
pub use asset_id::AssetId;
pub use asset_ref::AssetRef;
pub use liquidity::Liquidity;
pub use liquidity_grant::LiquidityGrant;
pub use pair_key::PairKey;
pub use pool_event::{PoolCreated, PoolEvent};
pub use pool_id::PoolId;
