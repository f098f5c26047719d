//! HTTPハンドラー定義

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use tracing::{debug, error, info};

use crate::errors::ApiError;
use crate::models::{
  AnnotateRequest, AnnotateResponse, CharacterDto, CreateListRequest, ListCharacterRequest, ListResponse,
  ListUpdateResponse, ListsResponse,
};

use super::state::AppState;

/// ブロッキング処理を spawn_blocking で実行する
///
/// ファイル I/O と辞書ロードを伴うため、非同期ランタイムをブロックしないよう分離
async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
  F: FnOnce() -> Result<T, ApiError> + Send + 'static,
  T: Send + 'static,
{
  tokio::task::spawn_blocking(task).await.map_err(|e| {
    error!(error = %e, "spawn_blocking エラー");
    ApiError::internal("処理の実行に失敗しました")
  })?
}

/// POST /annotate エンドポイント
///
/// テキスト中の新しい漢字を注釈してキャッシュに追加し、各文字の詳細を返す。
///
/// # Request Body
/// ```json
/// { "text": "处理对象的文本" }
/// ```
///
/// # Response
/// - 200 OK: 処理成功
/// - 400 Bad Request: 入力エラー（空テキスト、テキスト長超過）
/// - 500 Internal Server Error: キャッシュの読み書きエラー等
pub async fn post_annotate(
  State(state): State<AppState>,
  Json(request): Json<AnnotateRequest>,
) -> Result<Json<AnnotateResponse>, ApiError> {
  debug!(text_len = request.text.len(), "注釈リクエストを受信");

  let service = state.service.clone();
  let response = run_blocking(move || service.annotate(request)).await?;

  info!(
    added = response.added.len(),
    skipped_existing = response.skipped_existing,
    degraded = response.degraded,
    elapsed_ms = response.elapsed_ms,
    "注釈完了"
  );

  Ok(Json(response))
}

/// GET /characters/{character} エンドポイント
///
/// キャッシュ済みの文字情報を返す。未注釈の文字は 404。
pub async fn get_character(
  State(state): State<AppState>,
  Path(character): Path<String>,
) -> Result<Json<CharacterDto>, ApiError> {
  let service = state.service.clone();
  let dto = run_blocking(move || service.character(&character)).await?;
  Ok(Json(dto))
}

/// GET /lists エンドポイント
pub async fn get_lists(State(state): State<AppState>) -> Result<Json<ListsResponse>, ApiError> {
  let service = state.service.clone();
  Ok(Json(run_blocking(move || service.lists()).await?))
}

/// POST /lists エンドポイント
///
/// 作成した場合は 201、既に存在した場合は 200。
pub async fn post_list(
  State(state): State<AppState>,
  Json(request): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<ListUpdateResponse>), ApiError> {
  let service = state.service.clone();
  let response = run_blocking(move || service.create_list(request)).await?;

  let status = if response.changed { StatusCode::CREATED } else { StatusCode::OK };
  Ok((status, Json(response)))
}

/// GET /lists/{name} エンドポイント
pub async fn get_list(
  State(state): State<AppState>,
  Path(name): Path<String>,
) -> Result<Json<ListResponse>, ApiError> {
  let service = state.service.clone();
  Ok(Json(run_blocking(move || service.list(&name)).await?))
}

/// DELETE /lists/{name} エンドポイント
///
/// `Favorites` は削除されず `changed: false` を返す。
pub async fn delete_list(
  State(state): State<AppState>,
  Path(name): Path<String>,
) -> Result<Json<ListUpdateResponse>, ApiError> {
  let service = state.service.clone();
  Ok(Json(run_blocking(move || service.delete_list(&name)).await?))
}

/// POST /lists/{name}/characters エンドポイント
pub async fn post_list_character(
  State(state): State<AppState>,
  Path(name): Path<String>,
  Json(request): Json<ListCharacterRequest>,
) -> Result<Json<ListUpdateResponse>, ApiError> {
  let service = state.service.clone();
  Ok(Json(run_blocking(move || service.add_to_list(&name, request)).await?))
}

/// DELETE /lists/{name}/characters/{character} エンドポイント
pub async fn delete_list_character(
  State(state): State<AppState>,
  Path((name, character)): Path<(String, String)>,
) -> Result<Json<ListUpdateResponse>, ApiError> {
  let service = state.service.clone();
  Ok(Json(run_blocking(move || service.remove_from_list(&name, &character)).await?))
}

/// ヘルスチェックエンドポイント
///
/// サーバーが稼働しているかを確認する。
pub async fn health_check() -> &'static str {
  "OK"
}
