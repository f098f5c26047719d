//! Data Model Definition
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ops::RangeInclusive;

/// CJK Unified Ideographs block. Only these characters are annotated.
pub const CJK_UNIFIED_IDEOGRAPHS: RangeInclusive<char> = '\u{4E00}'..='\u{9FFF}';

/// Meaning stored for a character that has no dictionary entry.
///
/// Consumers compare against this exact string, so it must never change.
pub const MEANING_NOT_FOUND: &str = "Meaning not found in CEDICT";

/// Returns whether `c` lies in the CJK Unified Ideographs block (U+4E00..=U+9FFF).
pub fn is_cjk(c: char) -> bool {
  CJK_UNIFIED_IDEOGRAPHS.contains(&c)
}

/// A compound headword attributed to one of its characters, with its joined gloss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundRef {
  /// Compound headword (two or more characters)
  pub word: String,

  /// Glosses joined with `"; "`
  pub meaning: String,
}

impl CompoundRef {
  /// Constructor for CompoundRef
  pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
    Self {
      word: word.into(),
      meaning: meaning.into(),
    }
  }
}

/// Annotation of a single character.
///
/// The character itself is the key under which the record is cached.
/// Records are created once and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
  /// Tone-marked romanization
  pub pinyin: String,

  /// Single character gloss, or [`MEANING_NOT_FOUND`]
  pub meaning: String,

  /// Compounds found in the processed text that contain this character
  #[serde(default)]
  pub compounds: Vec<CompoundRef>,
}

/// In-memory form of the annotation cache: character → record.
///
/// Insertion is add-only; an existing record is never replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationCache {
  records: BTreeMap<char, CharacterRecord>,
}

impl AnnotationCache {
  /// Creates an empty cache
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of cached characters
  pub fn len(&self) -> usize {
    self.records.len()
  }

  /// Whether the cache holds no characters
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Whether `character` is already annotated
  pub fn contains(&self, character: char) -> bool {
    self.records.contains_key(&character)
  }

  /// Returns the record for `character`
  pub fn get(&self, character: char) -> Option<&CharacterRecord> {
    self.records.get(&character)
  }

  /// Inserts `record` unless `character` is already present.
  ///
  /// Returns `true` when the record was inserted.
  pub fn insert_if_absent(&mut self, character: char, record: CharacterRecord) -> bool {
    match self.records.entry(character) {
      Entry::Vacant(slot) => {
        slot.insert(record);
        true
      }
      Entry::Occupied(_) => false,
    }
  }

  /// Iterates records in code point order
  pub fn iter(&self) -> impl Iterator<Item = (char, &CharacterRecord)> {
    self.records.iter().map(|(c, r)| (*c, r))
  }

  /// Consumes the cache and returns the underlying map
  pub fn into_records(self) -> BTreeMap<char, CharacterRecord> {
    self.records
  }
}

impl FromIterator<(char, CharacterRecord)> for AnnotationCache {
  /// The first record seen for a character wins, same as [`AnnotationCache::insert_if_absent`].
  fn from_iter<I: IntoIterator<Item = (char, CharacterRecord)>>(iter: I) -> Self {
    let mut cache = Self::new();
    for (c, record) in iter {
      cache.insert_if_absent(c, record);
    }
    cache
  }
}

/// Outcome of one processing pass, returned to the caller for presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessReport {
  /// Characters newly added to the cache, in code point order
  pub added: Vec<char>,

  /// Distinct CJK characters of the input that were already cached
  pub skipped_existing: usize,

  /// Whether the dictionary was unavailable (meanings fell back, no compounds)
  pub degraded: bool,
}

impl ProcessReport {
  /// Whether the pass wrote anything
  pub fn is_noop(&self) -> bool {
    self.added.is_empty()
  }
}
