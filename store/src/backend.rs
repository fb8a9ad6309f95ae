//! Key/byte durable storage abstraction.
//!
//! The engine sees storage as three synchronous operations over opaque byte
//! values. No transactions span multiple keys; callers order their writes so
//! an interruption between two writes degrades gracefully.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Synchronous key/byte storage.
pub trait StorageBackend {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Durably replace the value under `key`.
    fn set(&mut self, key: &str, bytes: &[u8]) -> io::Result<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// In-memory backend for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One-file-per-key backend rooted at a directory.
///
/// Writes go through a temp file in the same directory followed by a rename,
/// so a crash mid-write leaves the previous value intact rather than a
/// truncated document.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open the backend, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
