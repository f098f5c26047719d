//! dictionary module
//!
//! CEDICT parsing, the headword index and its lifecycle.
pub mod cedict;
pub mod dictionary_index;
pub mod dictionary_manager;
pub mod lexicon;

/// Re-exports
pub use cedict::{DictionaryEntry, GLOSS_SEPARATOR, parse_line};
pub use dictionary_index::DictionaryIndex;
pub use dictionary_manager::{DictionaryManager, LoadedLexicon};
pub use lexicon::Lexicon;
