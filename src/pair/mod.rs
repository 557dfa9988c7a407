//! Pair identity: native resolution and canonical ordering.
//!
//! ```text
//! AssetRef ──► AssetResolver ──► AssetId ─┐
//! AssetRef ──► AssetResolver ──► AssetId ─┴► PairCanonicalizer ──► PairKey
//! ```

mod canonicalizer;
mod resolver;

pub use canonicalizer::PairCanonicalizer;
pub use resolver::AssetResolver;
