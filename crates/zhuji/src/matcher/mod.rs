//! matcher module
pub mod compound_trie;

/// Re-exports
pub use compound_trie::{CompoundMap, CompoundMatch, CompoundMatcher};
