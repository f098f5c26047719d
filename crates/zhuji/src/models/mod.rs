//! models module
pub mod model_definition;

/// Re-exports
pub use model_definition::{
  AnnotationCache, CJK_UNIFIED_IDEOGRAPHS, CharacterRecord, CompoundRef, MEANING_NOT_FOUND,
  ProcessReport, is_cjk,
};
