//! エラー定義

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// 設定（ZhujiConfig）関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ConfigError {
  /// OS のデータディレクトリーが特定できない
  #[error("データディレクトリーが見つかりません")]
  DataDirNotFound,

  /// store.cache_path と store.lists_path が同じファイルを指している
  #[error("cache_path と lists_path は別のファイルである必要があります: path={path:?}")]
  SharedStorePath {
    /// 重複しているパス
    path: PathBuf,
  },

  /// ストアのパスがディレクトリーを指している
  #[error("ストアのパスがファイルではありません: path={path:?}")]
  StorePathIsDirectory {
    /// 不正なパス
    path: PathBuf,
  },

  /// ストアの親ディレクトリー作成に失敗
  #[error("ストアディレクトリーの作成に失敗しました: path={path:?}, error={source}")]
  StoreDirCreationFailed {
    /// 作成しようとしたパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },
}

/// 辞書関連のエラー
///
/// `Unavailable` は呼び出し側で縮退モードとして扱われ、パイプラインを止めない。
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum DictionaryError {
  /// 辞書ファイルを開けない、または読み込み途中で失敗した
  #[error("辞書ファイルを読み込めません: path={path:?}, error={source}")]
  Unavailable {
    /// 辞書ファイルのパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// 複合語トライの構築に失敗
  #[error("複合語マッチャーを構築できません: reason={reason}")]
  MatcherBuild {
    /// 失敗の理由
    reason: String,
  },
}

/// 注釈キャッシュ（ストア）関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum StoreError {
  /// キャッシュファイルの読み込みに失敗
  #[error("キャッシュファイルを読み込めません: path={path:?}, error={source}")]
  Unreadable {
    /// キャッシュファイルのパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// キャッシュファイルの JSON が不正（既存データを守るため処理を止める）
  #[error("キャッシュファイルが壊れています: path={path:?}, reason={reason}")]
  CacheCorrupt {
    /// キャッシュファイルのパス
    path: PathBuf,
    /// 不正の理由
    reason: String,
  },

  /// キャッシュファイルの書き込みに失敗（元のファイルは変更されない）
  #[error("キャッシュファイルの書き込みに失敗しました: path={path:?}, error={source}")]
  WriteFailed {
    /// キャッシュファイルのパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// レコードの JSON シリアライズ失敗
  #[error("キャッシュのシリアライズに失敗しました: error={source}")]
  Serialize {
    /// 元となった JSON エラー
    #[source]
    source: Arc<serde_json::Error>,
  },
}

/// 名前付きリスト（お気に入り等）関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ListError {
  /// リストファイルの読み込みに失敗
  #[error("リストファイルを読み込めません: path={path:?}, error={source}")]
  Unreadable {
    /// リストファイルのパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// リストファイルの JSON が不正
  #[error("リストファイルが壊れています: path={path:?}, reason={reason}")]
  ListsCorrupt {
    /// リストファイルのパス
    path: PathBuf,
    /// 不正の理由
    reason: String,
  },

  /// リストファイルの書き込みに失敗
  #[error("リストファイルの書き込みに失敗しました: path={path:?}, error={source}")]
  WriteFailed {
    /// リストファイルのパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },

  /// リスト名が空
  #[error("リスト名が空です")]
  EmptyName,
}

/// 入力テキスト関連のエラー
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum InputError {
  /// 入力テキストが存在しない（ファイルが無い、OCR 抽出結果が空など）
  #[error("入力テキストがありません: {reason}")]
  InputMissing {
    /// 理由
    reason: String,
  },

  /// 入力ファイルの読み込みに失敗
  #[error("入力ファイルを読み込めません: path={path:?}, error={source}")]
  Unreadable {
    /// 入力ファイルのパス
    path: PathBuf,
    /// 元となった IO エラー
    #[source]
    source: Arc<io::Error>,
  },
}

/// 画像からのテキスト抽出（OCR）の失敗
///
/// パイプラインには渡らず、`InputError::InputMissing` として扱われる。
#[derive(Debug, Error, Clone)]
#[error("テキスト抽出に失敗しました: {reason}")]
pub struct ExtractionError {
  /// 失敗の理由
  pub reason: String,
}

impl ExtractionError {
  /// 理由を指定して作成する
  pub fn new(reason: impl Into<String>) -> Self {
    Self {
      reason: reason.into(),
    }
  }
}

/// 統合エラー
/// 本クレートの外部に公開するエラー用 API はこのエラーを返すこと
/// `ZhujiResult<T>` = `Result<T, ZhujiError>` として使用する
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ZhujiError {
  /// 設定エラー
  #[error(transparent)]
  Config(#[from] ConfigError),

  /// 辞書関連エラー
  #[error(transparent)]
  Dictionary(#[from] DictionaryError),

  /// キャッシュ関連エラー
  #[error(transparent)]
  Store(#[from] StoreError),

  /// リスト関連エラー
  #[error(transparent)]
  List(#[from] ListError),

  /// 入力関連エラー
  #[error(transparent)]
  Input(#[from] InputError),
}

/// zhuji クレートの標準 Result 型エイリアス
pub type ZhujiResult<T> = Result<T, ZhujiError>;
