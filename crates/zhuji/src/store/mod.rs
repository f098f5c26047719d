//! store module
//!
//! Persistent character → record cache. Records are add-only: a character that
//! is already cached is never re-annotated or overwritten.
pub(crate) mod atomic_write;
pub mod json_file_store;
pub mod report;

pub use json_file_store::JsonFileStore;
pub use report::MergeReport;

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::errors::StoreError;
use crate::models::{AnnotationCache, CharacterRecord};

/// Persistence seam of the annotation cache.
pub trait AnnotationStore: Send + Sync {
  /// Reads the whole cache. An absent store is an empty cache.
  fn load(&self) -> Result<AnnotationCache, StoreError>;

  /// Adds the records whose character is not cached yet.
  ///
  /// All-or-nothing: on error the persisted cache is unchanged.
  fn merge_new(&self, records: BTreeMap<char, CharacterRecord>) -> Result<MergeReport, StoreError>;
}

/// Volatile store used when nothing has to survive the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
  cache: Mutex<AnnotationCache>,
}

impl InMemoryStore {
  /// Creates an empty store
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a store seeded with `cache`
  pub fn with_cache(cache: AnnotationCache) -> Self {
    Self {
      cache: Mutex::new(cache),
    }
  }
}

impl AnnotationStore for InMemoryStore {
  fn load(&self) -> Result<AnnotationCache, StoreError> {
    Ok(self.cache.lock().unwrap_or_else(PoisonError::into_inner).clone())
  }

  fn merge_new(&self, records: BTreeMap<char, CharacterRecord>) -> Result<MergeReport, StoreError> {
    let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
    let mut report = MergeReport::default();

    for (character, record) in records {
      report.record_total();
      if cache.insert_if_absent(character, record) {
        report.record_added(character);
      } else {
        report.record_skipped();
      }
    }

    Ok(report)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(meaning: &str) -> CharacterRecord {
    CharacterRecord {
      pinyin: "x".to_string(),
      meaning: meaning.to_string(),
      compounds: Vec::new(),
    }
  }

  #[test]
  fn in_memory_store_is_add_only() {
    let store = InMemoryStore::new();
    let first = store.merge_new([('你', record("you"))].into()).unwrap();
    assert!(first.is_all_added());

    let second = store.merge_new([('你', record("other")), ('好', record("good"))].into()).unwrap();
    assert_eq!(second.total, 2);
    assert_eq!(second.added, vec!['好']);
    assert_eq!(second.skipped_existing, 1);

    let cache = store.load().unwrap();
    assert_eq!(cache.get('你').unwrap().meaning, "you");
    assert_eq!(cache.len(), 2);
  }

  #[test]
  fn stores_are_usable_as_trait_objects() {
    let stores: Vec<Box<dyn AnnotationStore>> = vec![
      Box::new(InMemoryStore::with_cache([('的', record("of"))].into_iter().collect())),
      Box::new(InMemoryStore::new()),
    ];
    assert_eq!(stores[0].load().unwrap().len(), 1);
    assert!(stores[1].load().unwrap().is_empty());
  }
}
