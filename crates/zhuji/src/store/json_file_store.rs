//! JSON ファイルによる注釈キャッシュの実装
//!
//! ファイル形式は文字 → レコードの JSON オブジェクト（キーはコードポイント順）。
//! 書き込みは一時ファイル経由の置き換えで行い、失敗時は元のファイルを残す。

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use super::atomic_write::{to_pretty_json, write_atomic};
use super::{AnnotationStore, MergeReport};
use crate::errors::StoreError;
use crate::models::{AnnotationCache, CharacterRecord};

/// JSON ファイルに永続化される注釈キャッシュ
#[derive(Debug)]
pub struct JsonFileStore {
  path: PathBuf,
  /// 同一プロセス内の load → merge → write を直列化する
  merge_lock: Mutex<()>,
}

impl JsonFileStore {
  /// キャッシュファイルのパスを指定して作成する（ファイルはまだ無くてもよい）
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      merge_lock: Mutex::new(()),
    }
  }

  /// キャッシュファイルのパス
  pub fn path(&self) -> &Path {
    &self.path
  }

  fn read_cache(&self) -> Result<AnnotationCache, StoreError> {
    let content = match std::fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = %self.path.display(), "キャッシュファイルが無いため空として扱います");
        return Ok(AnnotationCache::new());
      }
      Err(e) => {
        return Err(StoreError::Unreadable {
          path: self.path.clone(),
          source: Arc::new(e),
        });
      }
    };

    if content.trim().is_empty() {
      return Ok(AnnotationCache::new());
    }

    let raw: BTreeMap<String, CharacterRecord> =
      serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;

    let mut cache = AnnotationCache::new();
    for (key, record) in raw {
      let mut chars = key.chars();
      let character = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(self.corrupt(format!("キーが1文字ではありません: {key:?}"))),
      };
      cache.insert_if_absent(character, record);
    }

    Ok(cache)
  }

  fn write_cache(&self, cache: &AnnotationCache) -> Result<(), StoreError> {
    let on_disk: BTreeMap<String, &CharacterRecord> = cache.iter().map(|(c, r)| (c.to_string(), r)).collect();
    let bytes = to_pretty_json(&on_disk).map_err(|e| StoreError::Serialize { source: Arc::new(e) })?;

    write_atomic(&self.path, &bytes).map_err(|e| StoreError::WriteFailed {
      path: self.path.clone(),
      source: Arc::new(e),
    })
  }

  fn corrupt(&self, reason: String) -> StoreError {
    StoreError::CacheCorrupt {
      path: self.path.clone(),
      reason,
    }
  }
}

impl AnnotationStore for JsonFileStore {
  fn load(&self) -> Result<AnnotationCache, StoreError> {
    self.read_cache()
  }

  fn merge_new(&self, records: BTreeMap<char, CharacterRecord>) -> Result<MergeReport, StoreError> {
    let _guard = self.merge_lock.lock().unwrap_or_else(PoisonError::into_inner);

    // 壊れたキャッシュはここでエラーになり、ファイルは書き換えない
    let mut cache = self.read_cache()?;
    let mut report = MergeReport::default();

    for (character, record) in records {
      report.record_total();
      if cache.insert_if_absent(character, record) {
        report.record_added(character);
      } else {
        report.record_skipped();
      }
    }

    if report.is_unchanged() {
      debug!(path = %self.path.display(), total = report.total, "追加対象が無いため書き込みを省略します");
      return Ok(report);
    }

    self.write_cache(&cache)?;
    info!(
      path = %self.path.display(),
      added = report.added_count(),
      skipped_existing = report.skipped_existing,
      cached = cache.len(),
      "キャッシュを更新しました"
    );

    Ok(report)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::CompoundRef;
  use tempfile::TempDir;

  fn record(pinyin: &str, meaning: &str) -> CharacterRecord {
    CharacterRecord {
      pinyin: pinyin.to_string(),
      meaning: meaning.to_string(),
      compounds: Vec::new(),
    }
  }

  fn store_in(temp_dir: &TempDir) -> JsonFileStore {
    JsonFileStore::new(temp_dir.path().join("chars.json"))
  }

  #[test]
  fn missing_file_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let cache = store_in(&temp_dir).load().unwrap();
    assert!(cache.is_empty());
  }

  #[test]
  fn zero_length_file_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    std::fs::write(store.path(), "").unwrap();
    assert!(store.load().unwrap().is_empty());
  }

  #[test]
  fn merge_then_load_returns_records() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let mut you = record("nǐ", "you");
    you.compounds.push(CompoundRef::new("你好", "hello"));
    let batch: BTreeMap<char, CharacterRecord> = [('你', you.clone()), ('好', record("hǎo", "good"))].into();

    let report = store.merge_new(batch).unwrap();
    assert_eq!(
      report,
      MergeReport {
        total: 2,
        added: vec!['你', '好'],
        skipped_existing: 0
      }
    );

    let cache = store.load().unwrap();
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get('你'), Some(&you));
  }

  #[test]
  fn merge_never_overwrites_existing_record() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    store.merge_new([('你', record("nǐ", "you"))].into()).unwrap();

    let report = store
      .merge_new([('你', record("ni", "changed")), ('们', record("men", "plural"))].into())
      .unwrap();

    assert_eq!(report.added, vec!['们']);
    assert_eq!(report.skipped_existing, 1);
    let cache = store.load().unwrap();
    assert_eq!(cache.get('你').unwrap().meaning, "you");
    assert_eq!(cache.get('们').unwrap().meaning, "plural");
  }

  #[test]
  fn merge_without_new_records_does_not_touch_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);

    let report = store.merge_new(BTreeMap::new()).unwrap();
    assert!(report.is_unchanged());
    assert!(!store.path().exists());
  }

  #[test]
  fn file_is_pretty_printed_in_code_point_order() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    store.merge_new([('的', record("de", "of")), ('你', record("nǐ", "you"))].into()).unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    let you = content.find("\"你\"").unwrap();
    let of = content.find("\"的\"").unwrap();
    assert!(you < of);
    assert!(content.contains("\n  \"你\": {"));
    assert!(content.contains("nǐ"));
  }

  #[test]
  fn corrupt_file_is_reported_and_left_intact() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    std::fs::write(store.path(), "{ not json").unwrap();

    assert!(matches!(store.load(), Err(StoreError::CacheCorrupt { .. })));
    let merged = store.merge_new([('你', record("nǐ", "you"))].into());
    assert!(matches!(merged, Err(StoreError::CacheCorrupt { .. })));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ not json");
  }

  #[test]
  fn multi_character_key_is_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    std::fs::write(store.path(), r#"{"你好": {"pinyin": "nǐ hǎo", "meaning": "hello"}}"#).unwrap();

    match store.load() {
      Err(StoreError::CacheCorrupt { reason, .. }) => assert!(reason.contains("你好")),
      other => panic!("unexpected result: {other:?}"),
    }
  }

  #[test]
  fn record_without_compounds_loads() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    std::fs::write(store.path(), r#"{"的": {"pinyin": "de", "meaning": "of"}}"#).unwrap();

    let cache = store.load().unwrap();
    assert!(cache.get('的').unwrap().compounds.is_empty());
  }

  #[test]
  fn write_failure_keeps_prior_cache() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    store.merge_new([('你', record("nǐ", "you"))].into()).unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    // Parent path occupied by a regular file: the temporary file cannot be created
    let blocked = JsonFileStore::new(store.path().join("nested.json"));
    let result = blocked.merge_new([('好', record("hǎo", "good"))].into());

    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
  }
}
