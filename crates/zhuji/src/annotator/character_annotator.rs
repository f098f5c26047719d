//! Per-character record synthesis.
//!
//! Every distinct CJK character of the input that is not cached yet gets a
//! [`CharacterRecord`]. Record contents depend only on the character, the
//! dictionary and the compounds matched in the input.

use std::collections::{BTreeMap, BTreeSet};

use crate::dictionary::DictionaryIndex;
use crate::matcher::CompoundMap;
use crate::models::{AnnotationCache, CharacterRecord, CompoundRef, MEANING_NOT_FOUND, is_cjk};
use crate::romanizer::Romanizer;

/// Builds character records from a dictionary index and a romanizer.
pub struct CharacterAnnotator<'a> {
  index: &'a DictionaryIndex,
  romanizer: &'a dyn Romanizer,
}

impl<'a> CharacterAnnotator<'a> {
  /// Constructor for CharacterAnnotator
  pub fn new(index: &'a DictionaryIndex, romanizer: &'a dyn Romanizer) -> Self {
    Self { index, romanizer }
  }

  /// Distinct CJK characters of `text` that are absent from `existing`
  pub fn pending_characters(text: &str, existing: &AnnotationCache) -> BTreeSet<char> {
    text.chars().filter(|&c| is_cjk(c) && !existing.contains(c)).collect()
  }

  /// Annotates every new CJK character of `text`.
  ///
  /// `compounds` must come from matching the same `text`.
  pub fn annotate(
    &self,
    text: &str,
    compounds: &CompoundMap,
    existing: &AnnotationCache,
  ) -> BTreeMap<char, CharacterRecord> {
    Self::pending_characters(text, existing)
      .into_iter()
      .map(|c| {
        let words = compounds.get(&c).map(Vec::as_slice).unwrap_or(&[]);
        (c, self.annotate_char(c, words))
      })
      .collect()
  }

  /// Builds the record of one character given the compounds attributed to it
  ///
  /// References follow the order of `compounds` (position in the text, then length),
  /// not the order of lines in the dictionary file. For a dictionary listing 中国人
  /// before 中国, `国` in "中国人" gets 中国 first. Lines of one headword keep file order.
  pub fn annotate_char(&self, c: char, compounds: &[String]) -> CharacterRecord {
    let mut buf = [0u8; 4];
    let headword: &str = c.encode_utf8(&mut buf);

    let meaning = self.index.gloss_of(headword).unwrap_or_else(|| MEANING_NOT_FOUND.to_string());

    // A compound line without gloss contributes nothing
    let compounds = compounds
      .iter()
      .flat_map(|word| {
        self
          .index
          .compound_glosses(word)
          .iter()
          .map(move |gloss| CompoundRef::new(word.as_str(), gloss.as_str()))
      })
      .collect();

    CharacterRecord {
      pinyin: self.romanizer.romanize_char(c),
      meaning,
      compounds,
    }
  }
}
