//! Whole-file replacement for the durable stores.

use std::{
  fs,
  io::{self, Write as _},
  path::Path,
};

use tempfile::NamedTempFile;

/// Replace `path` with `bytes` atomically.
///
/// The data is written to a temporary file in the same directory, flushed to
/// disk, then renamed over the target. Readers see either the old file or the
/// new one, never a partial write.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
  let dir = match path.parent() {
    Some(p) if !p.as_os_str().is_empty() => p,
    _ => Path::new("."),
  };
  fs::create_dir_all(dir)?;

  let mut tmp = NamedTempFile::new_in(dir)?;
  tmp.write_all(bytes)?;
  tmp.as_file().sync_all()?;
  tmp.persist(path).map_err(|e| e.error)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn replaces_existing_file() {
    let dir  = tempfile::tempdir().unwrap();
    let path = dir.path().join("accounts.json");

    write_atomic(&path, b"first").unwrap();
    write_atomic(&path, b"second").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"second");
    // No stray temporaries left behind.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
  }

  #[test]
  fn creates_missing_parent_directories() {
    let dir  = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/accounts.json");
    write_atomic(&path, b"{}").unwrap();
    assert!(path.exists());
  }
}
