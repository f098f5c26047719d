//! romanizer module
//!
//! Pronunciation of characters as tone-marked pinyin.
pub mod pinyin_romanizer;

pub use pinyin_romanizer::PinyinRomanizer;

use crate::models::is_cjk;

/// Maps characters to their romanization.
///
/// Implementations must be pure: the same character always yields the same string.
pub trait Romanizer: Send + Sync {
  /// Romanization of a single character
  fn romanize_char(&self, c: char) -> String;

  /// Romanization of a whole text.
  ///
  /// Each CJK character becomes one token; each contiguous run of other
  /// characters is kept as one token (trimmed, dropped when blank).
  /// Tokens are joined by single spaces.
  fn romanize_text(&self, text: &str) -> String {
    let mut tokens: Vec<String> = Vec::new();
    let mut run = String::new();

    for c in text.chars() {
      if is_cjk(c) {
        flush_run(&mut run, &mut tokens);
        tokens.push(self.romanize_char(c));
      } else {
        run.push(c);
      }
    }
    flush_run(&mut run, &mut tokens);

    tokens.join(" ")
  }
}

fn flush_run(run: &mut String, tokens: &mut Vec<String>) {
  let trimmed = run.trim();
  if !trimmed.is_empty() {
    tokens.push(trimmed.to_string());
  }
  run.clear();
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Table-free romanizer for exercising the default method
  struct CodePoint;

  impl Romanizer for CodePoint {
    fn romanize_char(&self, c: char) -> String {
      format!("{:X}", c as u32)
    }
  }

  #[test]
  fn text_keeps_non_cjk_runs_together() {
    assert_eq!(CodePoint.romanize_text("你ab好"), "4F60 ab 597D");
  }

  #[test]
  fn blank_runs_are_dropped() {
    assert_eq!(CodePoint.romanize_text("  你 \n 好  "), "4F60 597D");
  }

  #[test]
  fn empty_text_is_empty() {
    assert_eq!(CodePoint.romanize_text(""), "");
  }
}
