//! Core logic for the tileboard demos: a shape gallery and a Kanban board.
//!
//! Data flow: command handler -> store mutation -> persist -> notify ->
//! reconciler patches the visual tree.

pub mod command;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod storage;
pub mod store;

pub use command::{CommandOutcome, ElementMeta, EventPath, IgnoreReason};
pub use config::{AnyStorage, AppConfig, ConfigError, StorageBackend};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LoggingError,
};
pub use model::card::{BoardState, Card, ColumnKey, MoveDirection};
pub use model::shape::{GalleryState, Shape, ShapeCounts, ShapeKind};
pub use model::{EntityId, ValidationError};
pub use render::board_view::{BoardView, PlacedCard};
pub use render::gallery_view::GalleryView;
pub use render::reconciler::{reconcile, ReconcileStats};
pub use render::tree::{NodeHandle, RenderOp, VisualTree};
pub use render::{NodeAttribute, RenderTarget, Renderable};
pub use repo::snapshot_repo::{Snapshot, SnapshotRepository};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError};
pub use store::board::BoardStore;
pub use store::gallery::GalleryStore;
pub use store::{
    Store, StoreError, StoreOptions, StoreResult, Subscriber, SubscriptionToken,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
