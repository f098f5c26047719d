// crates/zhuji/src/config.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::errors::ConfigError;

/// Application directory name under the OS data directory.
pub const APP_DIR_NAME: &str = "zhuji";

/// Default dictionary file name (CC-CEDICT distribution name).
pub const DEFAULT_DICTIONARY_FILE: &str = "cedict_ts.u8";

/// Default annotation cache file name.
pub const DEFAULT_CACHE_FILE: &str = "chars.json";

/// Default named-list registry file name.
pub const DEFAULT_LISTS_FILE: &str = "character_lists.json";

/// Top-level configuration for zhuji.
#[derive(Debug, Clone, Deserialize)]
pub struct ZhujiConfig {
  /// [dictionary] section
  pub dictionary: DictionaryConfig,
  /// [store] section
  pub store: StoreConfig,
  /// [logging] section
  #[serde(default)]
  pub logging: LoggingConfig,
}

/// [dictionary] section configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
  /// CEDICT-format dictionary file.
  ///
  /// The file may be absent; the pipeline then runs in degraded mode.
  pub path: PathBuf,
}

/// [store] section configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
  /// Annotation cache file (character → record JSON)
  pub cache_path: PathBuf,
  /// Named-list registry file (list name → characters JSON)
  pub lists_path: PathBuf,
}

/// [logging] section configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
  /// Log level: "trace" | "debug" | "info" | "warn" | "error"
  #[serde(default)]
  pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  /// trace
  Trace,

  /// debug
  Debug,

  /// info
  #[default]
  Info,

  /// warn
  Warn,

  /// error
  Error,
}

impl LogLevel {
  /// Directive string understood by `tracing_subscriber::EnvFilter`.
  pub fn as_str(&self) -> &'static str {
    match self {
      LogLevel::Trace => "trace",
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Warn => "warn",
      LogLevel::Error => "error",
    }
  }
}

impl std::fmt::Display for LogLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for LogLevel {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "trace" => Ok(LogLevel::Trace),
      "debug" => Ok(LogLevel::Debug),
      "info" => Ok(LogLevel::Info),
      "warn" => Ok(LogLevel::Warn),
      "error" => Ok(LogLevel::Error),
      other => Err(format!("unknown log level: {other}")),
    }
  }
}

// ===== Constructors =====

impl ZhujiConfig {
  /// Configuration with every file placed directly under `dir`.
  ///
  /// ```text
  /// <dir>/
  ///   ├── cedict_ts.u8
  ///   ├── chars.json
  ///   └── character_lists.json
  /// ```
  pub fn in_dir(dir: impl AsRef<Path>) -> Self {
    let dir = dir.as_ref();
    Self {
      dictionary: DictionaryConfig {
        path: dir.join(DEFAULT_DICTIONARY_FILE),
      },
      store: StoreConfig {
        cache_path: dir.join(DEFAULT_CACHE_FILE),
        lists_path: dir.join(DEFAULT_LISTS_FILE),
      },
      logging: LoggingConfig::default(),
    }
  }

  /// Configuration rooted at `<OS data dir>/zhuji`.
  ///
  /// # Errors
  /// `ConfigError::DataDirNotFound` if the platform has no data directory.
  pub fn with_default_data_dir() -> Result<Self, ConfigError> {
    Ok(Self::in_dir(default_data_dir()?))
  }
}

/// Returns `<OS data dir>/zhuji` (e.g. `~/.local/share/zhuji` on Linux).
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
  dirs::data_dir()
    .map(|dir| dir.join(APP_DIR_NAME))
    .ok_or(ConfigError::DataDirNotFound)
}

// ===== Accessor Methods =====

impl ZhujiConfig {
  /// Returns the dictionary file path.
  pub fn dictionary_path(&self) -> &Path {
    &self.dictionary.path
  }

  /// Returns the annotation cache file path.
  pub fn cache_path(&self) -> &Path {
    &self.store.cache_path
  }

  /// Returns the named-list registry file path.
  pub fn lists_path(&self) -> &Path {
    &self.store.lists_path
  }

  /// Returns the log level.
  pub fn log_level(&self) -> LogLevel {
    self.logging.level
  }

  /// Validates the configuration.
  ///
  /// # Validation Items
  /// - `store.cache_path` and `store.lists_path` are different files
  /// - neither store path is an existing directory
  /// - the parent directory of each store path exists or can be created
  ///
  /// The dictionary path is not checked: a missing dictionary is not an error.
  ///
  /// # Errors
  /// Returns the corresponding `ConfigError` if validation fails.
  pub fn validate(&self) -> Result<(), ConfigError> {
    // cache and lists must not share a file
    if self.store.cache_path == self.store.lists_path {
      return Err(ConfigError::SharedStorePath {
        path: self.store.cache_path.clone(),
      });
    }

    for path in [&self.store.cache_path, &self.store.lists_path] {
      if path.is_dir() {
        return Err(ConfigError::StorePathIsDirectory { path: path.clone() });
      }

      // parent exists or can be created
      if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        && !parent.is_dir()
        && let Err(e) = std::fs::create_dir_all(parent)
      {
        return Err(ConfigError::StoreDirCreationFailed {
          path: parent.to_path_buf(),
          source: Arc::new(e),
        });
      }
    }

    Ok(())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Module
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  // ─── Test Helpers ─────────────────────────────────────────────────────

  /// Creates a base valid configuration (uses a temporary directory for each test)
  fn create_valid_config(temp_dir: &TempDir) -> ZhujiConfig {
    ZhujiConfig {
      dictionary: DictionaryConfig {
        path: temp_dir.path().join("dict").join("cedict_ts.u8"),
      },
      store: StoreConfig {
        cache_path: temp_dir.path().join("data").join("chars.json"),
        lists_path: temp_dir.path().join("data").join("character_lists.json"),
      },
      logging: LoggingConfig {
        level: LogLevel::Info,
      },
    }
  }

  // ─── LogLevel Tests ────────────────────────────────────────────────────

  #[test]
  fn log_level_as_str() {
    assert_eq!(LogLevel::Trace.as_str(), "trace");
    assert_eq!(LogLevel::Warn.as_str(), "warn");
    assert_eq!(format!("{}", LogLevel::Error), "error");
  }

  #[test]
  fn log_level_from_str_is_case_insensitive() {
    assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
    assert_eq!(" info ".parse::<LogLevel>(), Ok(LogLevel::Info));
    assert!("verbose".parse::<LogLevel>().is_err());
  }

  #[test]
  fn log_level_defaults_to_info() {
    assert_eq!(LogLevel::default(), LogLevel::Info);
  }

  // ─── Constructor Tests ────────────────────────────────────────────────

  #[test]
  fn in_dir_uses_default_file_names() {
    let config = ZhujiConfig::in_dir("/tmp/zhuji-data");

    assert_eq!(config.dictionary_path(), Path::new("/tmp/zhuji-data/cedict_ts.u8"));
    assert_eq!(config.cache_path(), Path::new("/tmp/zhuji-data/chars.json"));
    assert_eq!(config.lists_path(), Path::new("/tmp/zhuji-data/character_lists.json"));
    assert_eq!(config.log_level(), LogLevel::Info);
  }

  #[test]
  fn deserializes_without_logging_section() {
    let config: ZhujiConfig = serde_json::from_str(
      r#"{
        "dictionary": { "path": "cedict_ts.u8" },
        "store": { "cache_path": "chars.json", "lists_path": "lists.json" }
      }"#,
    )
    .unwrap();

    assert_eq!(config.log_level(), LogLevel::Info);
    assert_eq!(config.lists_path(), Path::new("lists.json"));
  }

  #[test]
  fn deserializes_log_level_lowercase() {
    let config: ZhujiConfig = serde_json::from_str(
      r#"{
        "dictionary": { "path": "d" },
        "store": { "cache_path": "c", "lists_path": "l" },
        "logging": { "level": "debug" }
      }"#,
    )
    .unwrap();

    assert_eq!(config.log_level(), LogLevel::Debug);
  }

  // ─── validate() Normal Case Tests ────────────────────────────────────────────

  #[test]
  fn validate_accepts_valid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_valid_config(&temp_dir);

    let result = config.validate();
    assert!(result.is_ok(), "valid config should pass validation");
  }

  #[test]
  fn validate_creates_missing_store_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_valid_config(&temp_dir);
    let store_dir = temp_dir.path().join("data");
    assert!(!store_dir.exists());

    config.validate().unwrap();

    assert!(store_dir.is_dir());
  }

  #[test]
  fn validate_ignores_missing_dictionary() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_valid_config(&temp_dir);

    assert!(!config.dictionary_path().exists());
    assert!(config.validate().is_ok());
  }

  #[test]
  fn validate_accepts_relative_file_names() {
    let mut config = ZhujiConfig::in_dir("");
    config.store.cache_path = PathBuf::from("chars.json");
    config.store.lists_path = PathBuf::from("character_lists.json");

    assert!(config.validate().is_ok());
  }

  // ─── validate() Abnormal Cases ───────────────────────────────────────────

  #[test]
  fn validate_rejects_shared_store_path() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = create_valid_config(&temp_dir);
    config.store.lists_path = config.store.cache_path.clone();

    let err = config.validate().unwrap_err();
    match err {
      ConfigError::SharedStorePath { path } => {
        assert_eq!(path, config.store.cache_path);
      }
      _ => panic!("expected SharedStorePath error"),
    }
  }

  #[test]
  fn validate_rejects_store_path_is_directory() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = create_valid_config(&temp_dir);
    let dir = temp_dir.path().join("chars-dir");
    fs::create_dir(&dir).unwrap();
    config.store.cache_path = dir.clone();

    let err = config.validate().unwrap_err();
    match err {
      ConfigError::StorePathIsDirectory { path } => {
        assert_eq!(path, dir);
      }
      _ => panic!("expected StorePathIsDirectory error"),
    }
  }

  #[test]
  fn validate_rejects_store_dir_creation_fails() {
    let temp_dir = TempDir::new().unwrap();
    // make parent a file
    let parent_file = temp_dir.path().join("parent_file");
    fs::write(&parent_file, b"dummy").unwrap();

    let mut config = create_valid_config(&temp_dir);
    config.store.lists_path = parent_file.join("child_dir").join("lists.json");

    let err = config.validate().unwrap_err();
    match err {
      ConfigError::StoreDirCreationFailed { path, .. } => {
        assert_eq!(path, parent_file.join("child_dir"));
      }
      _ => panic!("expected StoreDirCreationFailed error"),
    }
  }

  // ─── Error Priority Tests ────────────────────────────────────────────────

  #[test]
  fn validate_reports_shared_path_first() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = create_valid_config(&temp_dir);
    let dir = temp_dir.path().join("both");
    fs::create_dir(&dir).unwrap();
    config.store.cache_path = dir.clone();
    config.store.lists_path = dir;

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::SharedStorePath { .. }));
  }
}
