//! Loaded dictionary: the headword index together with the compound matcher built from it.

use crate::dictionary::DictionaryIndex;
use crate::errors::error_definition::DictionaryError;
use crate::matcher::CompoundMatcher;

/// Read-only pair of [`DictionaryIndex`] and the [`CompoundMatcher`] built over it.
///
/// The matcher is constructed exactly once per index, so both always agree.
#[derive(Debug, Default)]
pub struct Lexicon {
  index: DictionaryIndex,
  matcher: CompoundMatcher,
}

impl Lexicon {
  /// Builds the matcher for `index`
  ///
  /// # Errors
  /// `DictionaryError::MatcherBuild` if the compound trie cannot be constructed.
  pub fn build(index: DictionaryIndex) -> Result<Self, DictionaryError> {
    let matcher = CompoundMatcher::from_index(&index)?;
    Ok(Self { index, matcher })
  }

  /// Lexicon with no entries, used when the dictionary file is unavailable
  pub fn empty() -> Self {
    Self {
      index: DictionaryIndex::empty(),
      matcher: CompoundMatcher::empty(),
    }
  }

  /// Headword index
  pub fn index(&self) -> &DictionaryIndex {
    &self.index
  }

  /// Compound matcher
  pub fn matcher(&self) -> &CompoundMatcher {
    &self.matcher
  }
}
