//! # Hydra Factory
//!
//! Pool factory and liquidity-unit accounting for paired-asset AMM pools.
//!
//! The crate creates and registers one pool per unordered asset pair,
//! handles the native coin through its wrapped form, and decides how many
//! liquidity units every depositor receives:
//!
//! - **Canonical identity**: `(x, y)` and `(y, x)` name the same pool; the
//!   native coin and its wrapped asset are the same side.
//! - **Bootstrap**: the first deposit mints `⌊√(a·b)⌋` units, of which a
//!   fixed seed is locked forever in a burn sink.
//! - **Steady state**: later deposits earn their proportional share,
//!   reduced by a slip factor when the deposit is off the pool's ratio.
//! - **All-or-nothing**: a failed operation leaves custody balances, the
//!   registry, and the persisted snapshot exactly as they were.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `json-store` | yes | [`JsonFileStore`](registry::JsonFileStore) file persistence |
//!
//! # Quick Start
//!
//! ```rust
//! use hydra_factory::prelude::*;
//!
//! let weth = AssetId::from_u128(0xee);
//! let dai = AssetId::from_u128(0x6b);
//! let alice = AccountId::from_bytes([0xa1; 32]);
//! let sink = AccountId::from_bytes([0xde; 32]);
//!
//! // 1. Fund the caller and approve the factory
//! let mut custody = InMemoryCustody::new(weth);
//! custody.mint(dai, alice, Amount::new(5_000_000)).expect("mint");
//! custody.approve(dai, alice, Amount::new(5_000_000));
//!
//! // 2. Open a factory over custody, a store, and an event log
//! let config = FactoryConfig::new(weth, sink).expect("valid config");
//! let events = Vec::<PoolEvent>::new();
//! let mut factory = PoolFactory::open(config, custody, MemoryStore::new(), events)
//!     .expect("opened");
//!
//! // 3. Create the DAI/native pool, attaching the native leg as value
//! let request = CreatePoolRequest::new(
//!     alice,
//!     AssetRef::Asset(dai), Amount::new(1_000_000),
//!     AssetRef::Native, Amount::new(1_000_000),
//! )
//! .with_native_value(Amount::new(1_000_000));
//! let created = factory.create_pool(request).expect("created");
//!
//! // 4. 1_000_000 units minted, 10_000 locked in the sink
//! assert_eq!(created.grant.units_to_depositor(), Liquidity::new(990_000));
//! assert_eq!(factory.units_of(created.pool, sink), Ok(Liquidity::new(10_000)));
//! assert_eq!(factory.events().len(), 1);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer   │  CreatePoolRequest / AddLiquidityRequest / RemoveLiquidityRequest
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐      ┌──────────┐  ┌───────────────┐  ┌───────────┐
//! │ PoolFactory  │─────►│ Custody  │  │ RegistryStore │  │ EventSink │
//! └──────┬───────┘      └──────────┘  └───────────────┘  └───────────┘
//!        │ canonicalize, lookup, register
//!        ▼
//! ┌──────────────┐      ┌──────────────────┐
//! │ PoolRegistry │─────►│ Pool (unit ledger)│──► math::units_for_deposit
//! └──────────────┘      └──────────────────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Domain    │  AssetId, PairKey, PoolId, Amount, Liquidity, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`AssetId`](domain::AssetId), [`PairKey`](domain::PairKey), [`Amount`](domain::Amount), events |
//! | [`pair`] | Native resolution and pair canonicalization |
//! | [`math`] | Checked arithmetic and the liquidity-unit formulas |
//! | [`pools`] | [`Pool`](pools::Pool) reserves and unit ledger |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry), snapshots, and stores |
//! | [`custody`] | [`InMemoryCustody`](custody::InMemoryCustody) reference ledger |
//! | [`factory`] | [`PoolFactory`](factory::PoolFactory) and its request types |
//! | [`traits`] | Collaborator seams: [`Custody`](traits::Custody), [`EventSink`](traits::EventSink), [`RegistryStore`](traits::RegistryStore), [`LiquidityPool`](traits::LiquidityPool) |
//! | [`config`] | [`FactoryConfig`](config::FactoryConfig) |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod custody;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pair;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod traits;
