//! APIエラー定義

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

// zhuji クレートのエラー型をインポート
use zhuji::errors::{InputError, ListError, ZhujiError};

/// エラーの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
  /// 入力値が無効
  InvalidInput,
  /// テキストが長すぎる
  TextTooLong,
  /// 対象が見つからない
  NotFound,
  /// キャッシュ・リストファイルの読み書きエラー
  Storage,
  /// 内部エラー
  Internal,
  /// 設定エラー
  Config,
}

impl ApiErrorKind {
  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    match self {
      Self::InvalidInput => "invalid_input",
      Self::TextTooLong => "text_too_long",
      Self::NotFound => "not_found",
      Self::Storage => "storage_error",
      Self::Internal => "internal_error",
      Self::Config => "config_error",
    }
  }

  /// HTTPステータスコードを取得
  #[must_use]
  pub fn status(&self) -> StatusCode {
    match self {
      Self::InvalidInput | Self::TextTooLong => StatusCode::BAD_REQUEST,
      Self::NotFound => StatusCode::NOT_FOUND,
      Self::Storage | Self::Internal | Self::Config => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// APIエラー
#[derive(Debug, Error)]
pub enum ApiError {
  /// 入力値が無効
  #[error("入力値が無効です: {0}")]
  InvalidInput(String),

  /// テキストが長すぎる
  #[error("テキストが長すぎます: {0} バイト（最大: {1} バイト）")]
  TextTooLong(usize, usize),

  /// 対象が見つからない
  #[error("見つかりません: {0}")]
  NotFound(String),

  /// ストレージエラー
  #[error("ストレージエラー: {0}")]
  Storage(String),

  /// 内部エラー
  #[error("内部エラー: {0}")]
  Internal(String),

  /// 設定エラー
  #[error("設定エラー: {0}")]
  Config(String),
}

impl ApiError {
  /// エラーの種類を取得
  #[must_use]
  pub fn kind(&self) -> ApiErrorKind {
    match self {
      Self::InvalidInput(_) => ApiErrorKind::InvalidInput,
      Self::TextTooLong(_, _) => ApiErrorKind::TextTooLong,
      Self::NotFound(_) => ApiErrorKind::NotFound,
      Self::Storage(_) => ApiErrorKind::Storage,
      Self::Internal(_) => ApiErrorKind::Internal,
      Self::Config(_) => ApiErrorKind::Config,
    }
  }

  /// エラーコードを取得
  #[must_use]
  pub fn code(&self) -> &'static str {
    self.kind().code()
  }

  /// HTTPステータスコードを取得
  #[must_use]
  pub fn status(&self) -> StatusCode {
    self.kind().status()
  }

  /// 無効な入力エラーを作成
  #[must_use]
  pub fn invalid_input(message: impl Into<String>) -> Self {
    Self::InvalidInput(message.into())
  }

  /// テキスト長超過エラーを作成
  #[must_use]
  pub fn text_too_long(actual: usize, max: usize) -> Self {
    Self::TextTooLong(actual, max)
  }

  /// 未検出エラーを作成
  #[must_use]
  pub fn not_found(message: impl Into<String>) -> Self {
    Self::NotFound(message.into())
  }

  /// ストレージエラーを作成
  #[must_use]
  pub fn storage(message: impl Into<String>) -> Self {
    Self::Storage(message.into())
  }

  /// 内部エラーを作成
  #[must_use]
  pub fn internal(message: impl Into<String>) -> Self {
    Self::Internal(message.into())
  }

  /// 設定エラーを作成
  #[must_use]
  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }
}

/// エラーレスポンスのJSON構造
#[derive(Serialize)]
struct ErrorResponse {
  error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
  code: &'static str,
  message: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = ErrorResponse {
      error: ErrorBody {
        code: self.code(),
        message: self.to_string(),
      },
    };

    (status, Json(body)).into_response()
  }
}

/// ZhujiError から ApiError への変換
///
/// ドメイン層のエラーを API 層のエラーにマッピングする。
impl From<ZhujiError> for ApiError {
  fn from(err: ZhujiError) -> Self {
    match err {
      ZhujiError::Input(InputError::InputMissing { reason }) => ApiError::invalid_input(reason),
      ZhujiError::Input(err) => ApiError::invalid_input(err.to_string()),
      ZhujiError::List(ListError::EmptyName) => ApiError::invalid_input("list name is empty"),
      ZhujiError::Store(_) | ZhujiError::List(_) => ApiError::storage(err.to_string()),
      ZhujiError::Dictionary(_) => ApiError::config(format!("dictionary error: {err}")),
      ZhujiError::Config(err) => ApiError::config(err.to_string()),
      // #[non_exhaustive] な enum のため、将来追加されるバリアントに対応
      _ => ApiError::internal(format!("unknown error: {err}")),
    }
  }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, ApiError>;
