//! Local durable key/value slots, the stand-in for browser local storage.
//!
//! A slot holds one opaque string value under a key. Values are replaced
//! wholesale; there is no partial update and no versioning.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid slot key {0:?}")]
    InvalidKey(String),
    #[error("failed to read slot {key}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write slot {key}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("storage lock poisoned")]
    Poisoned,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A synchronous key/value store of string snapshots.
pub trait SnapshotSlots {
    /// Returns `None` when nothing was ever written under `key`.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: SnapshotSlots + ?Sized> SnapshotSlots for Box<T> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}

/// In-process slots. Clones share the same backing map, so a test can hand
/// one handle to a store and inspect or reload through another.
#[derive(Clone, Debug, Default)]
pub struct MemorySlots {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any serialization.
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(key.into(), value.into());
        }
        self
    }
}

impl SnapshotSlots for MemorySlots {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let map = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut map = self.inner.lock().map_err(|_| StorageError::Poisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per slot inside a data directory.
#[derive(Clone, Debug)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SnapshotSlots for FileSlots {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        // Readers must never observe a half-written snapshot.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;
        tracing::trace!(key, bytes = value.len(), "slot written");
        Ok(())
    }
}

/// Where snapshots live on disk.
#[derive(Clone, Debug)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".hrnet")
}

impl StorageSettings {
    pub const DATA_DIR_ENV: &'static str = "HRNET_DATA_DIR";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn from_env() -> Self {
        std::env::var(Self::DATA_DIR_ENV)
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn open(&self) -> FileSlots {
        FileSlots::new(&self.data_dir)
    }
}
