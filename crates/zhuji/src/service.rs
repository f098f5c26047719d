// crates/zhuji/src/service.rs

//! ZhujiService: zhuji クレートの統合ファサード。
//!
//! - 辞書管理 (DictionaryManager) - 初回の処理時に遅延ロード
//! - ローマ字化 (Romanizer)
//! - 注釈キャッシュ (AnnotationStore)
//! - 名前付きリスト (ListRegistry)
//!
//! CLI や HTTP API などの外部からは、この構造体だけを意識すればよい。
//!
//! # 処理パイプライン
//!
//! 入力テキスト → 複合語マッチ → 文字ごとの注釈生成 → キャッシュへのマージ → 永続化。
//! 辞書が読めない場合は縮退モードで続行し、意味はフォールバック、複合語は空になる。

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::annotator::CharacterAnnotator;
use crate::config::ZhujiConfig;
use crate::dictionary::DictionaryManager;
use crate::errors::{InputError, ZhujiResult};
use crate::extract::TextExtractor;
use crate::lists::ListRegistry;
use crate::models::{AnnotationCache, CharacterRecord, ProcessReport, is_cjk};
use crate::romanizer::{PinyinRomanizer, Romanizer};
use crate::store::{AnnotationStore, JsonFileStore};

/// 1 回の処理パスの段階（ログ出力用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineStage {
  Idle,
  DictionaryLoading,
  Matching,
  Annotating,
  Merging,
  Persisted,
}

impl fmt::Display for PipelineStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      PipelineStage::Idle => "idle",
      PipelineStage::DictionaryLoading => "dictionary_loading",
      PipelineStage::Matching => "matching",
      PipelineStage::Annotating => "annotating",
      PipelineStage::Merging => "merging",
      PipelineStage::Persisted => "persisted",
    };
    f.write_str(name)
  }
}

/// zhuji クレートの統合ファサード。
pub struct ZhujiService {
  /// 辞書マネージャー（初回成功時にキャッシュ）
  dictionary_manager: DictionaryManager,

  /// ローマ字化
  romanizer: Arc<dyn Romanizer>,

  /// 注釈キャッシュ
  store: Arc<dyn AnnotationStore>,

  /// 名前付きリスト
  lists: ListRegistry,
}

impl ZhujiService {
  /// 初期化（設定検証 + 各コンポーネントの構築）
  ///
  /// 辞書はここでは読み込まない。最初に新しい文字を処理するときにロードされる。
  ///
  /// # エラー
  /// - 設定が不正（ストアのパス重複、ディレクトリー作成失敗等）
  pub fn init(config: &ZhujiConfig) -> ZhujiResult<Self> {
    // ConfigError は #[from] で ZhujiError に自動変換
    config.validate()?;

    info!(
      dictionary = %config.dictionary_path().display(),
      cache = %config.cache_path().display(),
      lists = %config.lists_path().display(),
      "ZhujiService を初期化します"
    );

    Ok(Self::from_parts(
      DictionaryManager::from_path(config.dictionary_path()),
      Arc::new(PinyinRomanizer::new()),
      Arc::new(JsonFileStore::new(config.cache_path())),
      ListRegistry::new(config.lists_path()),
    ))
  }

  /// 各コンポーネントを指定して構築する（テストや別ストア実装用）
  pub fn from_parts(
    dictionary_manager: DictionaryManager,
    romanizer: Arc<dyn Romanizer>,
    store: Arc<dyn AnnotationStore>,
    lists: ListRegistry,
  ) -> Self {
    Self {
      dictionary_manager,
      romanizer,
      store,
      lists,
    }
  }

  // ===== 処理パイプライン =====

  /// テキストを処理し、未登録の文字だけをキャッシュに追加する。
  ///
  /// 空のテキストや新しい CJK 文字を含まないテキストでは書き込みを行わない。
  ///
  /// # エラー
  /// - キャッシュファイルが壊れている（ファイルは変更されない）
  /// - キャッシュの書き込み失敗（元のファイルは変更されない）
  pub fn process_text(&self, text: &str) -> ZhujiResult<ProcessReport> {
    let started = Instant::now();
    debug!(stage = %PipelineStage::Idle, chars = text.chars().count(), "処理を開始します");

    let distinct: HashSet<char> = text.chars().filter(|&c| is_cjk(c)).collect();
    if distinct.is_empty() {
      debug!("CJK 文字が無いため処理をスキップします");
      return Ok(ProcessReport::default());
    }

    let cache = self.store.load()?;
    let pending = CharacterAnnotator::pending_characters(text, &cache);
    let skipped_existing = distinct.len() - pending.len();

    if pending.is_empty() {
      debug!(skipped_existing, "新しい文字が無いため処理をスキップします");
      return Ok(ProcessReport {
        added: Vec::new(),
        skipped_existing,
        degraded: false,
      });
    }

    debug!(stage = %PipelineStage::DictionaryLoading, pending = pending.len());
    let loaded = self.dictionary_manager.load_or_degraded();

    debug!(stage = %PipelineStage::Matching, degraded = loaded.degraded);
    let compounds = loaded.lexicon.matcher().find_compounds(text);

    debug!(stage = %PipelineStage::Annotating, compound_chars = compounds.len());
    let annotator = CharacterAnnotator::new(loaded.lexicon.index(), self.romanizer.as_ref());
    let records = annotator.annotate(text, &compounds, &cache);

    debug!(stage = %PipelineStage::Merging, records = records.len());
    let merge = self.store.merge_new(records)?;
    if merge.skipped_existing > 0 {
      warn!(
        skipped = merge.skipped_existing,
        "処理中に他の書き込みで追加された文字があります"
      );
    }

    info!(
      stage = %PipelineStage::Persisted,
      added = merge.added_count(),
      skipped_existing,
      degraded = loaded.degraded,
      elapsed_ms = started.elapsed().as_millis() as u64,
      "テキストを処理しました"
    );

    Ok(ProcessReport {
      added: merge.added,
      skipped_existing: skipped_existing + merge.skipped_existing,
      degraded: loaded.degraded,
    })
  }

  /// UTF-8 テキストファイルを読み込んで処理する。
  ///
  /// # エラー
  /// - ファイルが存在しない（`InputMissing`）
  /// - ファイルが読めない、UTF-8 でない（`Unreadable`）
  pub fn process_file(&self, path: &Path) -> ZhujiResult<ProcessReport> {
    let text = match std::fs::read_to_string(path) {
      Ok(text) => text,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        warn!(path = %path.display(), "入力ファイルが見つかりません");
        return Err(
          InputError::InputMissing {
            reason: format!("file not found: {}", path.display()),
          }
          .into(),
        );
      }
      Err(e) => {
        return Err(
          InputError::Unreadable {
            path: path.to_path_buf(),
            source: Arc::new(e),
          }
          .into(),
        );
      }
    };

    self.process_text(&text)
  }

  /// 画像からテキストを抽出（OCR）して処理する。
  ///
  /// 抽出の失敗や空の結果はログに記録され、`InputMissing` として返る。
  pub fn process_extracted(&self, extractor: &dyn TextExtractor, image: &Path) -> ZhujiResult<ProcessReport> {
    let text = match extractor.extract_text(image) {
      Ok(text) => text,
      Err(e) => {
        warn!(image = %image.display(), reason = %e.reason, "テキスト抽出に失敗しました");
        return Err(InputError::InputMissing { reason: e.to_string() }.into());
      }
    };

    if text.trim().is_empty() {
      warn!(image = %image.display(), "抽出されたテキストが空です");
      return Err(
        InputError::InputMissing {
          reason: format!("no text extracted from {}", image.display()),
        }
        .into(),
      );
    }

    self.process_text(&text)
  }

  // ===== 参照系 =====

  /// テキスト中の CJK 文字のうちキャッシュ済みのものを、最初の出現順で返す。
  pub fn details(&self, text: &str) -> ZhujiResult<Vec<(char, CharacterRecord)>> {
    let cache = self.store.load()?;
    let mut seen = HashSet::new();

    Ok(
      text
        .chars()
        .filter(|&c| is_cjk(c) && seen.insert(c))
        .filter_map(|c| cache.get(c).map(|record| (c, record.clone())))
        .collect(),
    )
  }

  /// 1 文字分のキャッシュ済みレコードを返す。
  pub fn character(&self, character: char) -> ZhujiResult<Option<CharacterRecord>> {
    Ok(self.store.load()?.get(character).cloned())
  }

  /// キャッシュ全体のスナップショットを返す。
  pub fn snapshot(&self) -> ZhujiResult<AnnotationCache> {
    Ok(self.store.load()?)
  }

  /// テキスト全体のピンイン（CJK 文字ごとにトークン化）
  pub fn full_pinyin(&self, text: &str) -> String {
    self.romanizer.romanize_text(text)
  }

  /// 単語帳の内容を返す。
  ///
  /// `list` を指定した場合はそのリストの文字（未注釈の文字は除く）、
  /// 指定しない場合はキャッシュ全体。存在しないリストは空になる。
  pub fn cards(&self, list: Option<&str>) -> ZhujiResult<Vec<(char, CharacterRecord)>> {
    let cache = self.store.load()?;

    let Some(name) = list else {
      return Ok(cache.into_records().into_iter().collect());
    };

    let characters = self.lists.characters_in(name)?.unwrap_or_default();
    Ok(
      characters
        .into_iter()
        .filter_map(|c| cache.get(c).map(|record| (c, record.clone())))
        .collect(),
    )
  }

  // ===== アクセサ =====

  /// 名前付きリストへの参照を返す。
  pub fn lists(&self) -> &ListRegistry {
    &self.lists
  }

  /// 内部の DictionaryManager への参照を返す。
  pub fn dictionary_manager(&self) -> &DictionaryManager {
    &self.dictionary_manager
  }
}

impl fmt::Debug for ZhujiService {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ZhujiService")
      .field("dictionary_manager", &self.dictionary_manager)
      .field("lists", &self.lists)
      .finish_non_exhaustive()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// テストモジュール
// ─────────────────────────────────────────────────────────────────────────────
