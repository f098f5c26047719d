//! In-memory dictionary index
//!
//! Built once from a CEDICT file and never mutated afterwards.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use crate::dictionary::cedict::{DictionaryEntry, parse_line};
use crate::errors::DictionaryError;

/// Headword index over a CEDICT file.
///
/// - Exact lookup keeps the **first** line seen for each headword.
/// - Compound lookup keeps **every** line of each multi-character headword,
///   since separate lines are independent entries.
#[derive(Debug, Clone, Default)]
pub struct DictionaryIndex {
  /// headword -> first entry in file order
  first_entries: HashMap<String, DictionaryEntry>,

  /// multi-character headword -> joined gloss of every line that has one
  compound_glosses: HashMap<String, Vec<String>>,

  /// multi-character headwords in first-seen order, without duplicates
  compound_headwords: Vec<String>,

  /// number of data lines indexed
  line_count: usize,
}

impl DictionaryIndex {
  /// Creates an index with no entries (used in degraded mode)
  pub fn empty() -> Self {
    Self::default()
  }

  /// Loads and indexes a CEDICT file.
  ///
  /// # Errors
  /// `DictionaryError::Unavailable` if the file cannot be opened or read.
  pub fn load(path: &Path) -> Result<Self, DictionaryError> {
    let unavailable = |e: io::Error| DictionaryError::Unavailable {
      path: path.to_path_buf(),
      source: Arc::new(e),
    };

    let file = File::open(path).map_err(unavailable)?;
    Self::from_reader(BufReader::new(file)).map_err(unavailable)
  }

  /// Indexes CEDICT lines from any buffered reader
  pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
    let mut index = Self::empty();
    for line in reader.lines() {
      if let Some(entry) = parse_line(&line?) {
        index.insert(entry);
      }
    }
    Ok(index)
  }

  /// Indexes already parsed entries, in order
  pub fn from_entries<I>(entries: I) -> Self
  where
    I: IntoIterator<Item = DictionaryEntry>,
  {
    let mut index = Self::empty();
    for entry in entries {
      index.insert(entry);
    }
    index
  }

  fn insert(&mut self, entry: DictionaryEntry) {
    self.line_count += 1;

    if entry.is_compound() {
      if !self.compound_glosses.contains_key(&entry.headword) {
        self.compound_headwords.push(entry.headword.clone());
      }
      let glosses = self.compound_glosses.entry(entry.headword.clone()).or_default();
      if let Some(gloss) = entry.gloss() {
        glosses.push(gloss);
      }
    }

    self.first_entries.entry(entry.headword.clone()).or_insert(entry);
  }

  /// First entry recorded for `headword`
  pub fn entry(&self, headword: &str) -> Option<&DictionaryEntry> {
    self.first_entries.get(headword)
  }

  /// Joined gloss of the first line for `headword`.
  ///
  /// `None` when the headword is unknown or its first line has no gloss.
  pub fn gloss_of(&self, headword: &str) -> Option<String> {
    self.entry(headword).and_then(DictionaryEntry::gloss)
  }

  /// Joined glosses of every line for a multi-character headword, in file order
  pub fn compound_glosses(&self, headword: &str) -> &[String] {
    self.compound_glosses.get(headword).map(Vec::as_slice).unwrap_or(&[])
  }

  /// All multi-character headwords, in first-seen order
  pub fn multi_char_headwords(&self) -> impl Iterator<Item = &str> {
    self.compound_headwords.iter().map(String::as_str)
  }

  /// Number of distinct headwords
  pub fn entry_count(&self) -> usize {
    self.first_entries.len()
  }

  /// Number of distinct multi-character headwords
  pub fn compound_count(&self) -> usize {
    self.compound_headwords.len()
  }

  /// Number of data lines that were indexed
  pub fn line_count(&self) -> usize {
    self.line_count
  }

  /// Whether nothing was indexed
  pub fn is_empty(&self) -> bool {
    self.line_count == 0
  }
}
