//! Response Model Definition

use serde::Serialize;

use zhuji::models::{CharacterRecord, CompoundRef, ProcessReport};

/// Annotation Response
#[derive(Debug, Serialize)]
pub struct AnnotateResponse {
  /// Characters newly added to the cache
  pub added: Vec<String>,
  /// Characters of the text that were already cached
  pub skipped_existing: usize,
  /// Whether the dictionary was unavailable during this pass
  pub degraded: bool,
  /// Cached details for each character of the text, in first-appearance order
  pub characters: Vec<CharacterDto>,
  /// Pinyin of the whole text
  pub full_pinyin: String,
  /// Elapsed time (milliseconds)
  pub elapsed_ms: u64,
}

impl AnnotateResponse {
  /// Assembles the response from a processing report and the details view
  #[must_use]
  pub fn new(report: ProcessReport, characters: Vec<CharacterDto>, full_pinyin: String, elapsed_ms: u64) -> Self {
    Self {
      added: report.added.iter().map(char::to_string).collect(),
      skipped_existing: report.skipped_existing,
      degraded: report.degraded,
      characters,
      full_pinyin,
      elapsed_ms,
    }
  }
}

/// Character Information (DTO)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterDto {
  /// The character itself
  pub character: String,
  /// Tone-marked pinyin
  pub pinyin: String,
  /// Meaning, or the not-found sentinel
  pub meaning: String,
  /// Compounds containing this character
  pub compounds: Vec<CompoundRef>,
}

impl CharacterDto {
  /// Convert from a cached record
  #[must_use]
  pub fn from_record(character: char, record: CharacterRecord) -> Self {
    Self {
      character: character.to_string(),
      pinyin: record.pinyin,
      meaning: record.meaning,
      compounds: record.compounds,
    }
  }
}

/// List names
#[derive(Debug, Serialize)]
pub struct ListsResponse {
  /// All list names, sorted
  pub lists: Vec<String>,
}

/// Contents of one list
#[derive(Debug, Serialize)]
pub struct ListResponse {
  /// List name
  pub name: String,
  /// Characters of the list, in code point order
  pub characters: Vec<String>,
}

/// Outcome of a list mutation
#[derive(Debug, Serialize)]
pub struct ListUpdateResponse {
  /// List name
  pub name: String,
  /// Whether the registry changed
  pub changed: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn character_dto_from_record() {
    let record = CharacterRecord {
      pinyin: "nǐ".to_string(),
      meaning: "you".to_string(),
      compounds: vec![CompoundRef::new("你好", "hello")],
    };
    let dto = CharacterDto::from_record('你', record);

    assert_eq!(dto.character, "你");
    assert_eq!(dto.pinyin, "nǐ");
    assert_eq!(dto.compounds[0].word, "你好");
  }

  #[test]
  fn annotate_response_serialization() {
    let report = ProcessReport {
      added: vec!['你'],
      skipped_existing: 1,
      degraded: false,
    };
    let response = AnnotateResponse::new(report, Vec::new(), "nǐ hǎo".to_string(), 42);

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"added\":[\"你\"]"));
    assert!(json.contains("\"skipped_existing\":1"));
    assert!(json.contains("\"elapsed_ms\":42"));
    assert!(json.contains("\"full_pinyin\":\"nǐ hǎo\""));
  }
}
