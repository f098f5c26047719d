//! annotator module
pub mod character_annotator;

/// Re-exports
pub use character_annotator::CharacterAnnotator;
