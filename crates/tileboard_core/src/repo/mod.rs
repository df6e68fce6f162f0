//! Snapshot persistence over key-value storage.
//!
//! # Responsibility
//! - Load and save whole snapshots as JSON under one fixed key per variant.
//! - Keep storage/parse failures away from callers on the load path.
//!
//! # Invariants
//! - `load` always yields a structurally valid snapshot.
//! - `save` reports write failures instead of dropping them.

pub mod snapshot_repo;
