//! # Blob Store Port
//!
//! The persistence seam of the record store: a flat key-value store holding
//! one serialized JSON payload per collection, mirroring the browser-local
//! storage the original application wrote to.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BlobStore Port                                   │
//! │                                                                         │
//! │  load("customers")  ──► Some("[{...}, {...}]") | None                  │
//! │  save("customers", "[{...}]") ──► whole-value replace                  │
//! │                                                                         │
//! │  • Synchronous; a save either fully succeeds or errors                 │
//! │  • No partial writes are observable through this interface             │
//! │  • Keys are the fixed collection names                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

/// The persistence port injected into the record store.
///
/// Implementations replace the whole value under a key on every save; the
/// record store always writes complete collections.
pub trait BlobStore {
    /// Returns the payload stored under `key`, or `None` if the key has
    /// never been written.
    fn load(&self, key: &str) -> io::Result<Option<String>>;

    /// Replaces the payload stored under `key`.
    fn save(&mut self, key: &str, payload: &str) -> io::Result<()>;
}

// =============================================================================
// In-Memory Implementation
// =============================================================================

/// An in-memory blob store.
///
/// Clones share the same underlying map, so a store can be reopened from
/// the same blobs within a process. Single-threaded by design, like the
/// rest of the system, hence `Rc` rather than `Arc`.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn save(&mut self, key: &str, payload: &str) -> io::Result<()> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

// =============================================================================
// Directory-Backed Implementation
// =============================================================================

/// A blob store backed by a directory, one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct DirBlobStore {
    dir: PathBuf,
}

impl DirBlobStore {
    /// Opens (creating if necessary) the data directory.
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(DirBlobStore { dir })
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for DirBlobStore {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn save(&mut self, key: &str, payload: &str) -> io::Result<()> {
        let path = self.path_for(key);
        debug!(key = %key, path = %path.display(), bytes = payload.len(), "Saving blob");
        fs::write(path, payload)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
