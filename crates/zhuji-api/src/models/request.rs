//! リクエストモデル定義

use serde::Deserialize;

/// 注釈リクエスト
#[derive(Debug, Deserialize)]
pub struct AnnotateRequest {
  /// 処理対象のテキスト
  pub text: String,
}

/// リスト作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
  /// リスト名
  pub name: String,
}

/// リストへの文字追加リクエスト
#[derive(Debug, Deserialize)]
pub struct ListCharacterRequest {
  /// 追加する文字（1 文字）
  pub character: String,
}
