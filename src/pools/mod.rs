//! Pool state and the unit ledger.
//!
//! A [`Pool`] owns its two reserves (in canonical pair order) and the
//! unit balance of every holder. It implements
//! [`LiquidityPool`](crate::traits::LiquidityPool) for steady-state
//! deposits and withdrawals; seeding goes through [`Pool::bootstrap`],
//! which only the factory calls.
//!
//! | State | Reachable from | Allowed operations |
//! |-------|----------------|--------------------|
//! | [`PoolState::Empty`] | [`Pool::new`] | `bootstrap` |
//! | [`PoolState::Active`] | `bootstrap` | `deposit`, `withdraw` |

mod pool;
#[cfg(test)]
mod proptest_properties;

pub use pool::{Pool, PoolState};
