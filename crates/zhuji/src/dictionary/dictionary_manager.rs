//! Dictionary Management Module
//!
//! Owns the path of the CEDICT source file and the loaded [`Lexicon`].
//! The file is treated as static ground truth: the first successful load is kept
//! for the lifetime of the manager and shared through `Arc`.
//! A failed load is not cached, so the next processing pass tries again.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use tracing::{info, warn};

use crate::dictionary::{DictionaryIndex, Lexicon};
use crate::errors::error_definition::DictionaryError;

/// Result of [`DictionaryManager::load_or_degraded`]
#[derive(Debug, Clone)]
pub struct LoadedLexicon {
  /// Loaded lexicon, or an empty one in degraded mode
  pub lexicon: Arc<Lexicon>,
  /// `true` when the dictionary file could not be loaded
  pub degraded: bool,
}

/// Dictionary manager structure for CEDICT files
pub struct DictionaryManager {
  /// Dictionary file path
  dictionary_path: PathBuf,

  /// Cache of the loaded lexicon (set only on success)
  lexicon: OnceLock<Arc<Lexicon>>,
}

/// Implementation block for DictionaryManager
impl DictionaryManager {
  /// Constructor for DictionaryManager.
  ///
  /// The file does not need to exist yet; a missing file only puts processing
  /// into degraded mode.
  pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
    Self {
      dictionary_path: path.as_ref().to_path_buf(),
      lexicon: OnceLock::new(),
    }
  }

  /// Returns the path of the dictionary file
  pub fn dictionary_path(&self) -> &Path {
    &self.dictionary_path
  }

  /// Whether a lexicon has already been loaded
  pub fn is_loaded(&self) -> bool {
    self.lexicon.get().is_some()
  }

  /// Load dictionary
  /// - Parses the file and builds the matcher on the first successful call
  /// - Returns a clone of `Arc<Lexicon>` from then on
  ///
  /// # Errors
  /// `DictionaryError::Unavailable` if the file cannot be opened or read,
  /// `DictionaryError::MatcherBuild` if the compound trie cannot be built.
  pub fn load(&self) -> Result<Arc<Lexicon>, DictionaryError> {
    if let Some(lexicon) = self.lexicon.get() {
      return Ok(Arc::clone(lexicon));
    }

    let lexicon = Arc::new(self.load_inner()?);
    Ok(Arc::clone(self.lexicon.get_or_init(|| lexicon)))
  }

  /// Loads the dictionary, falling back to an empty lexicon when it is unavailable.
  ///
  /// The failure is logged as a warning and reported through `degraded`.
  pub fn load_or_degraded(&self) -> LoadedLexicon {
    match self.load() {
      Ok(lexicon) => LoadedLexicon {
        lexicon,
        degraded: false,
      },
      Err(e) => {
        warn!(error = %e, "辞書を利用できません。意味と複合語なしで処理を続行します");
        LoadedLexicon {
          lexicon: Arc::new(Lexicon::empty()),
          degraded: true,
        }
      }
    }
  }

  /// Internal implementation of dictionary loading
  fn load_inner(&self) -> Result<Lexicon, DictionaryError> {
    let started = Instant::now();
    let index = DictionaryIndex::load(&self.dictionary_path)?;
    let lexicon = Lexicon::build(index)?;

    info!(
      path = %self.dictionary_path.display(),
      entries = lexicon.index().entry_count(),
      compounds = lexicon.index().compound_count(),
      elapsed_ms = started.elapsed().as_millis() as u64,
      "辞書をロードしました"
    );

    Ok(lexicon)
  }
}

/// Manual `Debug` implementation for `DictionaryManager`
///
/// Shows only meta information instead of the whole index.
impl fmt::Debug for DictionaryManager {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DictionaryManager")
      .field("dictionary_path", &self.dictionary_path)
      .field("dictionary_loaded", &self.is_loaded())
      .finish()
  }
}
