//! API設定の定数定義

/// 入力テキストの最大長（バイト単位）
///
/// 10MB までのテキストを許可する。
/// 大きなテキストの処理によるリソース枯渇を防ぐための制限。
pub const MAX_TEXT_LENGTH: usize = 10_000_000;

/// デフォルトのバインドアドレス
///
/// 開発環境での利用を想定した localhost の標準ポート。
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5530";

/// バインドアドレスの環境変数名
pub const ENV_BIND_ADDR: &str = "ZHUJI_BIND_ADDR";

/// データディレクトリーの環境変数名（未設定時は OS のデータディレクトリー）
pub const ENV_DATA_DIR: &str = "ZHUJI_DATA_DIR";

/// 辞書ファイルパスの環境変数名（未設定時は `<data_dir>/cedict_ts.u8`）
pub const ENV_DICT_PATH: &str = "ZHUJI_DICT_PATH";

/// ログレベルの環境変数名
pub const ENV_LOG_LEVEL: &str = "ZHUJI_LOG_LEVEL";
