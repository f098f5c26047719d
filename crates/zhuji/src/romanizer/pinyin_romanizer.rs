//! Romanizer backed by the fixed phonetic table of the `pinyin` crate.

use pinyin::ToPinyin;

use crate::romanizer::Romanizer;

/// Tone-marked pinyin (`nǐ`, `hǎo`) using the primary reading of each character.
///
/// Characters missing from the table romanize to themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinRomanizer;

impl PinyinRomanizer {
  /// Creates the romanizer
  pub fn new() -> Self {
    Self
  }
}

impl Romanizer for PinyinRomanizer {
  fn romanize_char(&self, c: char) -> String {
    match c.to_pinyin() {
      Some(pinyin) => pinyin.with_tone().to_string(),
      None => c.to_string(),
    }
  }
}
