//! zhuji 漢字注釈ライブラリー
//!
//! CEDICT 形式の辞書を用いて、テキスト中の漢字ごとにピンイン・意味・
//! テキスト中に現れた複合語を求め、永続キャッシュに追記する。

/// 注釈モジュール - 文字ごとの CharacterRecord を生成
pub mod annotator;

/// 設定モジュール - ZhujiConfig, LogLevel 等の設定構造体を定義
pub mod config;

/// 辞書モジュール - CEDICT ファイルの解析・索引・遅延ロード
pub mod dictionary;

/// エラーモジュール - ZhujiError, ZhujiResult 等のエラー型を定義
pub mod errors;

/// テキスト抽出モジュール - OCR 等の外部テキストソースとの境界
pub mod extract;

/// リストモジュール - お気に入り等の名前付き文字リスト
pub mod lists;

/// ロギングモジュール - tracing-subscriber の初期化
pub mod logging;

/// 複合語マッチモジュール - トライによる複合語の一括検出
pub mod matcher;

/// データモデルモジュール - CharacterRecord, AnnotationCache 等のデータ構造を定義
pub mod models;

/// ローマ字化モジュール - 声調記号付きピンイン
pub mod romanizer;

/// サービスモジュール - ZhujiService 等の上位レベル API を提供
pub mod service;

/// ストアモジュール - 注釈キャッシュの永続化
pub mod store;

/// 再エクスポート
pub use config::{LogLevel, ZhujiConfig};
pub use errors::{ZhujiError, ZhujiResult};
pub use models::{CharacterRecord, CompoundRef, ProcessReport};
pub use service::ZhujiService;
