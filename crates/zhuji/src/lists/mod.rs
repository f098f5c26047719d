//! lists module
pub mod list_registry;

/// Re-exports
pub use list_registry::{FAVORITES, ListRegistry};
