//! Reference [`Custody`](crate::traits::Custody) implementation.
//!
//! Production deployments plug in their own asset ledger; the
//! [`InMemoryCustody`] here backs the test suite and single-process
//! embeddings.

mod in_memory;

pub use in_memory::InMemoryCustody;
