//! Pool creation and liquidity orchestration.
//!
//! [`PoolFactory`] is the single entry point for creating pools and moving
//! liquidity in and out of them. It validates requests, canonicalizes the
//! pair, drives [`Custody`](crate::traits::Custody), and persists the
//! registry after every committed change.
//!
//! # Creation Flow
//!
//! ```text
//! CreatePoolRequest
//!   │  floors ─► canonicalize ─► vacancy ─► native value ─► √(a·b) > seed
//!   ▼
//! pull token legs ─► wrap native leg ─► bootstrap ─► register ─► persist
//!   │                                                               │
//!   └──────────── any failure: unwind journal ◄─────────────────────┘
//!   ▼
//! PoolCreated ─► EventSink
//! ```

mod journal;
mod pool_factory;
mod request;

pub use pool_factory::PoolFactory;
pub use request::{
    AddLiquidityRequest, CreatePoolRequest, DepositRequest, PoolCreation, RemoveLiquidityRequest,
};
