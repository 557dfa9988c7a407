//! Core trait abstractions.
//!
//! [`LiquidityPool`] is what a pool exposes to the factory. The other
//! three are the seams to the factory's collaborators: [`Custody`] moves
//! assets, [`EventSink`] observes notifications, and [`RegistryStore`]
//! makes the registry durable.

mod custody;
mod event_sink;
mod liquidity_pool;
mod registry_store;

pub use custody::Custody;
pub use event_sink::EventSink;
pub use liquidity_pool::LiquidityPool;
pub use registry_store::RegistryStore;
