//! Multi-pattern compound matcher
//!
//! Builds a double-array trie over every multi-character headword once per dictionary load,
//! then scans the input text from each start position. A headword is reported whenever it
//! occurs anywhere as a contiguous substring, including overlapping and adjacent
//! occurrences; there is no segmentation.

use std::collections::HashMap;
use std::fmt;

use crawdad::Trie;

use crate::dictionary::DictionaryIndex;
use crate::errors::error_definition::DictionaryError;

/// Character → compound headwords containing it, in first-discovered order, without duplicates.
pub type CompoundMap = HashMap<char, Vec<String>>;

/// One occurrence of a headword in the scanned text (positions in characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundMatch {
  /// Matched headword
  pub word: String,
  /// Start position (inclusive)
  pub start: usize,
  /// End position (exclusive)
  pub end: usize,
}

/// Double-array trie over multi-character headwords.
pub struct CompoundMatcher {
  /// `None` when there are no headwords
  trie: Option<Trie>,
  /// value id → headword
  headwords: Vec<String>,
}

impl Default for CompoundMatcher {
  fn default() -> Self {
    Self::empty()
  }
}

impl fmt::Debug for CompoundMatcher {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CompoundMatcher")
      .field("pattern_count", &self.pattern_count())
      .finish_non_exhaustive()
  }
}

impl CompoundMatcher {
  /// Matcher without patterns; finds nothing
  pub fn empty() -> Self {
    Self {
      trie: None,
      headwords: Vec::new(),
    }
  }

  /// Builds a matcher from headwords. Headwords shorter than two characters are ignored.
  ///
  /// # Errors
  /// `DictionaryError::MatcherBuild` if the trie cannot be constructed.
  pub fn new<I, S>(headwords: I) -> Result<Self, DictionaryError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut headwords: Vec<String> = headwords
      .into_iter()
      .map(|w| w.as_ref().to_string())
      .filter(|w| w.chars().count() >= 2)
      .collect();
    headwords.sort_unstable();
    headwords.dedup();

    if headwords.is_empty() {
      return Ok(Self::empty());
    }

    let trie = Trie::from_keys(&headwords).map_err(|e| DictionaryError::MatcherBuild {
      reason: e.to_string(),
    })?;

    Ok(Self {
      trie: Some(trie),
      headwords,
    })
  }

  /// Builds a matcher over every multi-character headword of `index`
  ///
  /// # Errors
  /// `DictionaryError::MatcherBuild` if the trie cannot be constructed.
  pub fn from_index(index: &DictionaryIndex) -> Result<Self, DictionaryError> {
    Self::new(index.multi_char_headwords())
  }

  /// Number of distinct headwords in the trie
  pub fn pattern_count(&self) -> usize {
    self.headwords.len()
  }

  /// Every headword occurrence in `text`, ordered by start then length
  pub fn find_matches(&self, text: &str) -> Vec<CompoundMatch> {
    let Some(trie) = &self.trie else {
      return Vec::new();
    };

    let chars: Vec<char> = text.chars().collect();
    let mut matches = Vec::new();

    for start in 0..chars.len() {
      for (value, len) in trie.common_prefix_search(chars[start..].iter().copied()) {
        let Some(word) = self.headwords.get(value as usize) else {
          continue;
        };
        matches.push(CompoundMatch {
          word: word.clone(),
          start,
          end: start + len,
        });
      }
    }

    matches
  }

  /// Attributes every headword found in `text` to each of its characters.
  pub fn find_compounds(&self, text: &str) -> CompoundMap {
    let mut compounds = CompoundMap::new();

    for found in self.find_matches(text) {
      for c in found.word.chars() {
        let words = compounds.entry(c).or_default();
        if !words.contains(&found.word) {
          words.push(found.word.clone());
        }
      }
    }

    compounds
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Reference implementation: plain substring containment per headword
  fn naive_compounds(headwords: &[&str], text: &str) -> HashMap<char, Vec<String>> {
    let mut map: HashMap<char, Vec<String>> = HashMap::new();
    for word in headwords.iter().filter(|w| w.chars().count() >= 2) {
      if text.contains(word) {
        for c in word.chars() {
          let list = map.entry(c).or_default();
          if !list.iter().any(|w| w == word) {
            list.push((*word).to_string());
          }
        }
      }
    }
    map
  }

  fn sorted(mut map: CompoundMap) -> Vec<(char, Vec<String>)> {
    for list in map.values_mut() {
      list.sort();
    }
    let mut entries: Vec<_> = map.into_iter().collect();
    entries.sort();
    entries
  }

  #[test]
  fn attributes_compound_to_each_character() {
    let matcher = CompoundMatcher::new(["你好"]).unwrap();
    let map = matcher.find_compounds("你好的");

    assert_eq!(map.get(&'你').unwrap(), &vec!["你好".to_string()]);
    assert_eq!(map.get(&'好').unwrap(), &vec!["你好".to_string()]);
    assert!(!map.contains_key(&'的'));
  }

  #[test]
  fn single_character_headwords_are_ignored() {
    let matcher = CompoundMatcher::new(["的", "好"]).unwrap();
    assert_eq!(matcher.pattern_count(), 0);
    assert!(matcher.find_compounds("好的").is_empty());
  }

  #[test]
  fn overlapping_compounds_are_all_reported() {
    // 中国 and 国人 overlap on 国; 中国人 covers both
    let matcher = CompoundMatcher::new(["中国", "国人", "中国人"]).unwrap();
    let map = matcher.find_compounds("中国人");

    assert_eq!(map[&'中'], vec!["中国", "中国人"]);
    assert_eq!(map[&'国'], vec!["中国", "中国人", "国人"]);
    assert_eq!(map[&'人'], vec!["中国人", "国人"]);
  }

  #[test]
  fn repeated_occurrences_are_listed_once() {
    let matcher = CompoundMatcher::new(["谢谢"]).unwrap();
    let map = matcher.find_compounds("谢谢谢谢");

    assert_eq!(map[&'谢'], vec!["谢谢"]);
    assert_eq!(matcher.find_matches("谢谢谢谢").len(), 3);
  }

  #[test]
  fn absent_headwords_contribute_nothing() {
    let matcher = CompoundMatcher::new(["电脑", "手机"]).unwrap();
    assert!(matcher.find_compounds("你好").is_empty());
  }

  #[test]
  fn duplicate_headwords_count_once() {
    let matcher = CompoundMatcher::new(["你好", "你好"]).unwrap();
    assert_eq!(matcher.pattern_count(), 1);
  }

  #[test]
  fn match_positions_are_in_characters() {
    let matcher = CompoundMatcher::new(["你好"]).unwrap();
    let matches = matcher.find_matches("a你好");
    assert_eq!(
      matches,
      vec![CompoundMatch {
        word: "你好".to_string(),
        start: 1,
        end: 3
      }]
    );
  }

  #[test]
  fn agrees_with_substring_containment() {
    let headwords = [
      "中国", "国人", "中国人", "人民", "民主", "主义", "社会", "会主", "学生", "生活", "活动",
      "大学", "大学生", "好", "一个",
    ];
    let texts = [
      "中国人民",
      "社会主义民主",
      "大学生活动",
      "一个大学生的生活",
      "",
      "abc",
      "中中国国人人",
    ];

    let matcher = CompoundMatcher::new(headwords).unwrap();
    for text in texts {
      assert_eq!(
        sorted(matcher.find_compounds(text)),
        sorted(naive_compounds(&headwords, text)),
        "mismatch for {text:?}"
      );
    }
  }

  #[test]
  fn agrees_with_substring_containment_on_generated_texts() {
    let alphabet: Vec<char> = "中国人民大学生活动社会主义".chars().collect();
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move |bound: usize| {
      seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
      ((seed >> 33) as usize) % bound
    };
    let mut random_word = |len: usize| -> String { (0..len).map(|_| alphabet[next(alphabet.len())]).collect() };

    let headwords: Vec<String> = (0..60).map(|i| random_word(2 + i % 3)).collect();
    let headword_refs: Vec<&str> = headwords.iter().map(String::as_str).collect();
    let matcher = CompoundMatcher::new(&headwords).unwrap();

    for i in 0..300 {
      let text = random_word(i % 12);
      let found = matcher.find_compounds(&text);
      for words in found.values() {
        let unique: std::collections::HashSet<&String> = words.iter().collect();
        assert_eq!(unique.len(), words.len(), "duplicates for {text:?}");
      }
      assert_eq!(
        sorted(found),
        sorted(naive_compounds(&headword_refs, &text)),
        "mismatch for {text:?}"
      );
    }
  }

  #[test]
  fn empty_matcher_finds_nothing() {
    assert!(CompoundMatcher::empty().find_matches("你好").is_empty());
  }
}
