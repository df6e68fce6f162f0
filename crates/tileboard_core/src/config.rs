//! Runtime configuration for embedding hosts and the CLI.
//!
//! # Invariants
//! - Storage keys are non-blank and distinct from each other.
//! - A configured log directory is absolute (see `logging::init_logging`).

use crate::storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageResult};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Storage key for the gallery snapshot.
pub const DEFAULT_GALLERY_KEY: &str = "gallery-shapes";
/// Storage key for the board snapshot.
pub const DEFAULT_BOARD_KEY: &str = "kanban-board";

/// Where snapshots live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Lost on exit.
    Memory,
    /// SQLite file, created on first open.
    Sqlite(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub log_level: String,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
    pub gallery_key: String,
    pub board_key: String,
    /// Fixed seed for color generation; OS entropy when `None`.
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Memory,
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: None,
            gallery_key: DEFAULT_GALLERY_KEY.to_string(),
            board_key: DEFAULT_BOARD_KEY.to_string(),
            rng_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    BlankStorageKey,
    SharedStorageKey(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankStorageKey => write!(f, "storage keys must not be blank"),
            Self::SharedStorageKey(key) => {
                write!(f, "gallery and board cannot share storage key `{key}`")
            }
            Self::RelativeLogDir(path) => {
                write!(f, "log_dir must be an absolute path, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery_key.trim().is_empty() || self.board_key.trim().is_empty() {
            return Err(ConfigError::BlankStorageKey);
        }
        if self.gallery_key == self.board_key {
            return Err(ConfigError::SharedStorageKey(self.gallery_key.clone()));
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir.clone()));
            }
        }
        Ok(())
    }

    /// Opens the configured backend.
    pub fn open_storage(&self) -> StorageResult<AnyStorage> {
        match &self.storage {
            StorageBackend::Memory => Ok(AnyStorage::Memory(MemoryStorage::new())),
            StorageBackend::Sqlite(path) => SqliteStorage::open(path).map(AnyStorage::Sqlite),
        }
    }
}

/// Backend chosen at runtime from `StorageBackend`.
pub enum AnyStorage {
    Memory(MemoryStorage),
    Sqlite(SqliteStorage),
}

impl KeyValueStorage for AnyStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            Self::Memory(storage) => storage.get(key),
            Self::Sqlite(storage) => storage.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            Self::Memory(storage) => storage.set(key, value),
            Self::Sqlite(storage) => storage.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match self {
            Self::Memory(storage) => storage.remove(key),
            Self::Sqlite(storage) => storage.remove(key),
        }
    }
}
