//! Config loading from environment variables

use std::path::PathBuf;

use zhuji::config::{LogLevel, ZhujiConfig, default_data_dir};

use super::constants::{DEFAULT_BIND_ADDR, ENV_BIND_ADDR, ENV_DATA_DIR, ENV_DICT_PATH, ENV_LOG_LEVEL};
use crate::errors::ApiError;

/// API Server Configuration
#[derive(Debug, Clone)]
pub struct Config {
  /// Bind address (e.g. "127.0.0.1:5530")
  pub bind_addr: String,
  /// Library configuration (dictionary, store and logging)
  pub zhuji: ZhujiConfig,
}

impl Config {
  /// Loads configuration from environment variables
  ///
  /// # Errors
  /// Returns an error if environment variable values are invalid
  pub fn from_env() -> crate::errors::Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Builds the configuration from an arbitrary variable source
  ///
  /// Empty values are treated as unset.
  ///
  /// # Errors
  /// - Unknown log level
  /// - No data directory given and none available on this platform
  pub fn from_lookup<F>(lookup: F) -> crate::errors::Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let bind_addr = var(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    let data_dir = match var(ENV_DATA_DIR) {
      Some(dir) => PathBuf::from(dir),
      None => default_data_dir().map_err(|e| ApiError::config(e.to_string()))?,
    };

    let mut zhuji = ZhujiConfig::in_dir(data_dir);

    if let Some(dict_path) = var(ENV_DICT_PATH) {
      zhuji.dictionary.path = PathBuf::from(dict_path);
    }

    if let Some(level) = var(ENV_LOG_LEVEL) {
      zhuji.logging.level = level.parse::<LogLevel>().map_err(ApiError::config)?;
    }

    Ok(Self { bind_addr, zhuji })
  }
}
