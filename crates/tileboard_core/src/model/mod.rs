//! Snapshot domain model for the shape gallery and the Kanban board.
//!
//! # Responsibility
//! - Define the entity records (`Shape`, `Card`) and the snapshots that own them.
//! - Keep the persisted JSON shape stable for both variants.
//!
//! # Invariants
//! - Entity ids are unique within one snapshot.
//! - Kinds and columns are closed enums; unknown values never reach a snapshot.

pub mod card;
pub mod collation;
pub mod color;
pub mod shape;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque stable identifier of one entity (shape or card).
///
/// Freshly created entities get a UUID v4 string; ids loaded from storage are
/// kept verbatim.
pub type EntityId = String;

/// Rejections for raw user/storage input that does not fit the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnknownShapeKind(String),
    UnknownColumn(String),
    DuplicateId(EntityId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownShapeKind(value) => write!(f, "unknown shape kind `{value}`"),
            Self::UnknownColumn(value) => write!(f, "unknown board column `{value}`"),
            Self::DuplicateId(id) => write!(f, "entity id is not unique: {id}"),
        }
    }
}

impl Error for ValidationError {}

/// Fails with the first id that occurs more than once.
pub(crate) fn ensure_unique_ids<'a>(
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

pub(crate) fn new_entity_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}
