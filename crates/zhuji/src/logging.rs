//! tracing の初期化
//!
//! バイナリーから一度だけ呼び出す。ライブラリー内部は `tracing` マクロのみを使う。

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogLevel;

/// `RUST_LOG` があればそれを、無ければ `level` をフィルターとして使う
pub fn env_filter(level: LogLevel) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// グローバルな subscriber を設定する
///
/// 既に設定済みの場合は何もせず `false` を返す。
pub fn init_tracing(level: LogLevel) -> bool {
  tracing_subscriber::registry()
    .with(env_filter(level))
    .with(fmt::layer())
    .try_init()
    .is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn second_initialisation_is_ignored() {
    init_tracing(LogLevel::Debug);
    assert!(!init_tracing(LogLevel::Debug));
  }
}
