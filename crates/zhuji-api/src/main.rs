//! zhuji-api サーバーエントリーポイント

use std::sync::Arc;

use zhuji::logging::init_tracing;
use zhuji_api::ApiError;
use zhuji_api::api::AppState;
use zhuji_api::api::run_server;
use zhuji_api::config::Config;
use zhuji_api::service::ZhujiApiServiceFull;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
  // 設定の読み込み（ログレベルを含むため、ロギングより先に行う）
  let config = Config::from_env()?;

  // ロギングの初期化（RUST_LOG が設定されていればそちらを優先）
  init_tracing(config.zhuji.log_level());
  tracing::info!(
    dictionary = %config.zhuji.dictionary_path().display(),
    cache = %config.zhuji.cache_path().display(),
    "設定を読み込みました"
  );

  // サービスの初期化（辞書は最初のリクエストで遅延ロード）
  let service = Arc::new(ZhujiApiServiceFull::new(&config)?);
  tracing::info!("注釈サービスを初期化しました");

  // アプリケーション状態の作成
  let state = AppState::new(config, service);

  // サーバー起動
  run_server(state).await
}
