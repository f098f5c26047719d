//! Atomic file replacement shared by the cache store and the list registry.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

/// Serializes `value` as pretty-printed JSON followed by a newline.
///
/// Non-ASCII characters are written literally.
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
  let mut bytes = serde_json::to_vec_pretty(value)?;
  bytes.push(b'\n');
  Ok(bytes)
}

/// Replaces the file at `path` with `contents`.
///
/// The data goes to a temporary file in the same directory first and is renamed
/// over `path` only after it has been synced, so a failed write leaves the
/// previous file intact.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };
  std::fs::create_dir_all(dir)?;

  let mut temp = NamedTempFile::new_in(dir)?;
  temp.write_all(contents)?;
  temp.as_file().sync_all()?;
  temp.persist(path).map_err(|e| e.error)?;

  Ok(())
}
