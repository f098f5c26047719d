//! CEDICT line parser
//!
//! One data line looks like:
//!
//! ```text
//! 你好 你好 [ni3 hao3] /hello/hi/
//! ```
//!
//! The first `/`-field holds whitespace separated tokens (traditional, simplified, reading).
//! The simplified form (token 1) is the headword. The remaining fields are glosses,
//! the last field (empty after the trailing `/`) is dropped.

/// Comment marker at the start of a line
const COMMENT_MARKER: char = '#';

/// Field separator between headword block and glosses
const FIELD_SEPARATOR: char = '/';

/// Separator used when joining several glosses into one meaning string
pub const GLOSS_SEPARATOR: &str = "; ";

/// One parsed dictionary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
  /// Simplified headword (one or more characters)
  pub headword: String,

  /// Bracketed reading such as `ni3 hao3`, when present
  pub reading: Option<String>,

  /// Glosses in file order, empty fields removed
  pub glosses: Vec<String>,
}

impl DictionaryEntry {
  /// Number of characters in the headword
  pub fn headword_len(&self) -> usize {
    self.headword.chars().count()
  }

  /// Whether the headword is a compound (two or more characters)
  pub fn is_compound(&self) -> bool {
    self.headword_len() >= 2
  }

  /// Glosses joined with `"; "`, `None` when the line carries no gloss
  pub fn gloss(&self) -> Option<String> {
    if self.glosses.is_empty() {
      None
    } else {
      Some(self.glosses.join(GLOSS_SEPARATOR))
    }
  }
}

/// Parses one line of a CEDICT file.
///
/// Returns `None` for comment lines, blank lines and lines whose first field
/// has fewer than two tokens.
pub fn parse_line(line: &str) -> Option<DictionaryEntry> {
  if line.starts_with(COMMENT_MARKER) {
    return None;
  }

  let mut fields = line.trim().split(FIELD_SEPARATOR);
  let head = fields.next()?;

  let mut tokens = head.split_whitespace();
  let _traditional = tokens.next()?;
  let headword = tokens.next()?.to_string();

  let reading = head
    .split_once('[')
    .and_then(|(_, rest)| rest.split_once(']'))
    .map(|(reading, _)| reading.trim().to_string())
    .filter(|reading| !reading.is_empty());

  // Everything between the first and the last separator
  let mut rest: Vec<&str> = fields.collect();
  rest.pop();
  let glosses = rest.into_iter().filter(|g| !g.is_empty()).map(str::to_string).collect();

  Some(DictionaryEntry {
    headword,
    reading,
    glosses,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_full_line() {
    let entry = parse_line("你好 你好 [ni3 hao3] /hello/hi/\n").unwrap();
    assert_eq!(entry.headword, "你好");
    assert_eq!(entry.reading.as_deref(), Some("ni3 hao3"));
    assert_eq!(entry.glosses, vec!["hello", "hi"]);
    assert_eq!(entry.gloss().as_deref(), Some("hello; hi"));
    assert!(entry.is_compound());
  }

  #[test]
  fn headword_is_simplified_token() {
    let entry = parse_line("們 们 [men5] /plural marker for pronouns/").unwrap();
    assert_eq!(entry.headword, "们");
    assert!(!entry.is_compound());
  }

  #[test]
  fn skips_comment_lines() {
    assert!(parse_line("# CC-CEDICT").is_none());
    assert!(parse_line("#! version=1").is_none());
  }

  #[test]
  fn skips_lines_with_a_single_token() {
    assert!(parse_line("的 /of/'s/").is_none());
    assert!(parse_line("").is_none());
    assert!(parse_line("   ").is_none());
  }

  #[test]
  fn empty_gloss_fields_are_dropped() {
    let entry = parse_line("的 的 [de5] /of//'s/").unwrap();
    assert_eq!(entry.glosses, vec!["of", "'s"]);
  }

  #[test]
  fn last_field_is_always_dropped() {
    // No trailing separator: the final gloss is treated as the trailing field
    let entry = parse_line("好 好 [hao3] /good/well").unwrap();
    assert_eq!(entry.glosses, vec!["good"]);
  }

  #[test]
  fn line_without_glosses_has_no_gloss() {
    let entry = parse_line("好 好 [hao3]").unwrap();
    assert!(entry.glosses.is_empty());
    assert_eq!(entry.gloss(), None);
  }

  #[test]
  fn missing_reading_is_none() {
    let entry = parse_line("好 好 /good/").unwrap();
    assert_eq!(entry.reading, None);
    assert_eq!(entry.glosses, vec!["good"]);
  }
}
