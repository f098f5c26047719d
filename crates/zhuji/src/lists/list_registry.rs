//! 名前付き文字リスト（お気に入り等）のレジストリ
//!
//! ファイル形式はリスト名 → 文字配列の JSON オブジェクト。
//! `Favorites` リストは常に存在し、削除できない。

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::errors::ListError;
use crate::store::atomic_write::{to_pretty_json, write_atomic};

/// 削除できない既定のリスト名
pub const FAVORITES: &str = "Favorites";

type Lists = BTreeMap<String, BTreeSet<char>>;

/// JSON ファイルに永続化されるリストのレジストリ
#[derive(Debug)]
pub struct ListRegistry {
  path: PathBuf,
  /// 同一プロセス内の read → modify → write を直列化する
  write_lock: Mutex<()>,
}

impl ListRegistry {
  /// リストファイルのパスを指定して作成する（ファイルはまだ無くてもよい）
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      write_lock: Mutex::new(()),
    }
  }

  /// リストファイルのパス
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// 全リスト名（名前順）
  pub fn list_names(&self) -> Result<Vec<String>, ListError> {
    Ok(self.read_lists()?.into_keys().collect())
  }

  /// リストに含まれる文字（コードポイント順）
  ///
  /// リストが存在しない場合は `None`。
  pub fn characters_in(&self, name: &str) -> Result<Option<Vec<char>>, ListError> {
    Ok(self.read_lists()?.remove(normalize_name(name)).map(|set| set.into_iter().collect()))
  }

  /// 空のリストを作成する。既に存在する場合は何もしない。
  ///
  /// 作成した場合は `true` を返す。
  pub fn create_list(&self, name: &str) -> Result<bool, ListError> {
    let name = validate_name(name)?;
    self.modify(|lists| {
      if lists.contains_key(name) {
        return false;
      }
      lists.insert(name.to_string(), BTreeSet::new());
      true
    })
  }

  /// リストを削除する。`Favorites` と存在しないリストは何もしない。
  ///
  /// 削除した場合は `true` を返す。
  pub fn delete_list(&self, name: &str) -> Result<bool, ListError> {
    let name = normalize_name(name);
    if name == FAVORITES {
      warn!(list = name, "Favorites は削除できません");
      return Ok(false);
    }
    self.modify(|lists| lists.remove(name).is_some())
  }

  /// 文字をリストに追加する。リストが無ければ作成する。
  ///
  /// 新たに追加した場合は `true` を返す。
  pub fn add(&self, name: &str, character: char) -> Result<bool, ListError> {
    let name = validate_name(name)?;
    self.modify(|lists| lists.entry(name.to_string()).or_default().insert(character))
  }

  /// 文字をリストから取り除く。
  ///
  /// 取り除いた場合は `true` を返す。
  pub fn remove(&self, name: &str, character: char) -> Result<bool, ListError> {
    let name = normalize_name(name);
    self.modify(|lists| lists.get_mut(name).is_some_and(|set| set.remove(&character)))
  }

  /// 読み込み → 変更 → 書き込み（変更があった場合のみ）
  fn modify<F>(&self, change: F) -> Result<bool, ListError>
  where
    F: FnOnce(&mut Lists) -> bool,
  {
    let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

    let mut lists = self.read_lists()?;
    if !change(&mut lists) {
      return Ok(false);
    }

    self.write_lists(&lists)?;
    info!(path = %self.path.display(), lists = lists.len(), "リストを更新しました");
    Ok(true)
  }

  fn read_lists(&self) -> Result<Lists, ListError> {
    let content = match std::fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
      Err(e) => {
        return Err(ListError::Unreadable {
          path: self.path.clone(),
          source: Arc::new(e),
        });
      }
    };

    let mut lists: Lists = if content.trim().is_empty() {
      Lists::new()
    } else {
      serde_json::from_str(&content).map_err(|e| ListError::ListsCorrupt {
        path: self.path.clone(),
        reason: e.to_string(),
      })?
    };

    if !lists.contains_key(FAVORITES) {
      debug!(path = %self.path.display(), "Favorites が無いため補います");
      lists.insert(FAVORITES.to_string(), BTreeSet::new());
    }

    Ok(lists)
  }

  fn write_lists(&self, lists: &Lists) -> Result<(), ListError> {
    let write_failed = |source: io::Error| ListError::WriteFailed {
      path: self.path.clone(),
      source: Arc::new(source),
    };

    let bytes = to_pretty_json(lists).map_err(|e| write_failed(e.into()))?;
    write_atomic(&self.path, &bytes).map_err(write_failed)
  }
}

/// リスト名の前後の空白を除く（全操作で共通）
fn normalize_name(name: &str) -> &str {
  name.trim()
}

fn validate_name(name: &str) -> Result<&str, ListError> {
  let trimmed = normalize_name(name);
  if trimmed.is_empty() {
    return Err(ListError::EmptyName);
  }
  Ok(trimmed)
}
