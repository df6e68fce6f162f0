//! Snapshot load/save adapter.
//!
//! # Responsibility
//! - Serialize snapshots to JSON strings and back.
//! - Degrade to the default snapshot on absent, unreadable, malformed or
//!   invalid stored data.
//!
//! # Invariants
//! - A snapshot returned by `load` has passed `Snapshot::validate`.
//! - After `save(s)` succeeds, `load()` returns a value equal to `s`.

use crate::config::{DEFAULT_BOARD_KEY, DEFAULT_GALLERY_KEY};
use crate::model::card::BoardState;
use crate::model::color::ColorPalette;
use crate::model::shape::GalleryState;
use crate::model::ValidationError;
use crate::storage::{KeyValueStorage, StorageError, StorageResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A complete persisted state value for one demo variant.
pub trait Snapshot: Serialize + DeserializeOwned + Default + Clone {
    /// Short name used in log events.
    const NAME: &'static str;
    /// Storage key used when none is configured.
    const DEFAULT_STORAGE_KEY: &'static str;
    /// Palette for colors generated while mutating this snapshot.
    const PALETTE: ColorPalette;

    /// Checks invariants serde cannot express (e.g. id uniqueness).
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Snapshot for GalleryState {
    const NAME: &'static str = "gallery";
    const DEFAULT_STORAGE_KEY: &'static str = DEFAULT_GALLERY_KEY;
    const PALETTE: ColorPalette = ColorPalette::GALLERY;

    fn validate(&self) -> Result<(), ValidationError> {
        GalleryState::validate(self)
    }
}

impl Snapshot for BoardState {
    const NAME: &'static str = "board";
    const DEFAULT_STORAGE_KEY: &'static str = DEFAULT_BOARD_KEY;
    const PALETTE: ColorPalette = ColorPalette::BOARD;

    fn validate(&self) -> Result<(), ValidationError> {
        BoardState::validate(self)
    }
}

/// Persists snapshots under one storage key.
pub struct SnapshotRepository<K: KeyValueStorage> {
    storage: K,
    key: String,
}

impl<K: KeyValueStorage> SnapshotRepository<K> {
    pub fn new(storage: K, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    /// Loads the stored snapshot, or the default one.
    ///
    /// Never fails: read errors, malformed JSON, wrong structure and invalid
    /// content are logged at `warn` and replaced by `S::default()`.
    pub fn load<S: Snapshot>(&self) -> S {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(
                    "event=snapshot_load module=repo status=default snapshot={} key={} reason=absent",
                    S::NAME,
                    self.key
                );
                return S::default();
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=fallback snapshot={} key={} reason=read_failed error={}",
                    S::NAME,
                    self.key,
                    err
                );
                return S::default();
            }
        };

        let snapshot = match serde_json::from_str::<S>(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=fallback snapshot={} key={} reason=parse_failed error={}",
                    S::NAME,
                    self.key,
                    err
                );
                return S::default();
            }
        };

        if let Err(err) = snapshot.validate() {
            warn!(
                "event=snapshot_load module=repo status=fallback snapshot={} key={} reason=invalid error={}",
                S::NAME,
                self.key,
                err
            );
            return S::default();
        }

        debug!(
            "event=snapshot_load module=repo status=ok snapshot={} key={} bytes={}",
            S::NAME,
            self.key,
            raw.len()
        );
        snapshot
    }

    /// Serializes `snapshot` and writes it under the repository key.
    pub fn save<S: Snapshot>(&self, snapshot: &S) -> StorageResult<()> {
        let raw = serde_json::to_string(snapshot).map_err(|source| {
            warn!(
                "event=snapshot_save module=repo status=error snapshot={} key={} error_code=serialize_failed error={}",
                S::NAME,
                self.key,
                source
            );
            StorageError::Serialize {
                key: self.key.clone(),
                source,
            }
        })?;
        match self.storage.set(&self.key, &raw) {
            Ok(()) => {
                debug!(
                    "event=snapshot_save module=repo status=ok snapshot={} key={} bytes={}",
                    S::NAME,
                    self.key,
                    raw.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=snapshot_save module=repo status=error snapshot={} key={} error={}",
                    S::NAME,
                    self.key,
                    err
                );
                Err(err)
            }
        }
    }
}
