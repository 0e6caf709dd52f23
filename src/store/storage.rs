//! Key-value persistence slots.
//!
//! The board keeps its whole state in a single string value under a fixed
//! key, the same shape as browser local storage. [`FileStorage`] maps each
//! key to a JSON file on disk; [`MemoryStorage`] keeps values in RAM and is
//! what the tests inject.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::error::{AppError, AppResult};

/// String-keyed, string-valued storage backend.
pub trait Storage {
    /// Read the value stored under `key`, `None` if the key was never written.
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
}

impl<T: Storage + ?Sized> Storage for Arc<T> {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        (**self).set_item(key, value)
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) the storage directory.
    pub fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            AppError::persistence_write(format!("cannot create {}: {}", root.display(), e))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`.
    pub fn slot_path(&self, key: &str) -> AppResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(AppError::internal(format!("invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.slot_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| AppError::persistence_read(format!("{}: {}", path.display(), e)))
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.slot_path(key)?;
        // Write-then-rename so a crash never leaves a half-written slot.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| AppError::persistence_write(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| AppError::persistence_write(format!("{}: {}", path.display(), e)))
    }
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a slot, e.g. with a hand-written or corrupted blob.
    pub fn with_item(self, key: &str, value: &str) -> Self {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|_| AppError::persistence_read("storage lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| AppError::persistence_write("storage lock poisoned"))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The backend the board actually runs on: the on-disk slot when its
/// directory is usable, RAM otherwise.
#[derive(Debug)]
pub enum SlotBackend {
    File(FileStorage),
    Memory(MemoryStorage),
}

impl SlotBackend {
    /// Open a [`FileStorage`] under `root`, degrading to memory if the
    /// directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        match FileStorage::new(root) {
            Ok(storage) => SlotBackend::File(storage),
            Err(e) => {
                warn!("{}; confessions will not survive a restart", e);
                SlotBackend::Memory(MemoryStorage::new())
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, SlotBackend::File(_))
    }
}

impl Storage for SlotBackend {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        match self {
            SlotBackend::File(storage) => storage.get_item(key),
            SlotBackend::Memory(storage) => storage.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        match self {
            SlotBackend::File(storage) => storage.set_item(key, value),
            SlotBackend::Memory(storage) => storage.set_item(key, value),
        }
    }
}
