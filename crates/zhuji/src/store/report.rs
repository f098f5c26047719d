//! マージ結果のレポート型定義
//!
//! キャッシュへのマージ時の追加・スキップを集計する型を定義します。

use serde::{Deserialize, Serialize};

/// `merge_new` の集計結果
///
/// 既存の文字は上書きされず、スキップとして数えられる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
  /// 入力バッチのレコード総数
  pub total: usize,
  /// 実際にキャッシュに追加された文字（追加順）
  pub added: Vec<char>,
  /// 既にキャッシュに存在したためスキップされた件数
  pub skipped_existing: usize,
}

impl MergeReport {
  /// 全て追加されたか（skipped == 0）
  pub fn is_all_added(&self) -> bool {
    self.skipped_existing == 0
  }

  /// 書き込みが発生しなかったか
  pub fn is_unchanged(&self) -> bool {
    self.added.is_empty()
  }

  /// 追加された件数
  pub fn added_count(&self) -> usize {
    self.added.len()
  }

  /// 追加成功を記録
  pub fn record_added(&mut self, character: char) {
    self.added.push(character);
  }

  /// スキップを記録
  pub fn record_skipped(&mut self) {
    self.skipped_existing += 1;
  }

  /// 合計件数を記録
  pub fn record_total(&mut self) {
    self.total += 1;
  }
}
