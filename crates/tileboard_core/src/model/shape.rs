//! Shape gallery model.
//!
//! # Responsibility
//! - Define gallery tiles and the gallery snapshot.
//! - Derive live per-kind counts from a snapshot.
//!
//! # Invariants
//! - `ShapeKind` is closed: only `square` and `circle` exist.
//! - Shape ids are unique within `GalleryState::shapes`.

use crate::model::{ensure_unique_ids, EntityId, ValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed set of tile shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Square,
    Circle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 2] = [ShapeKind::Square, ShapeKind::Circle];

    /// Stable wire/UI string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Circle => "circle",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "square" => Ok(Self::Square),
            "circle" => Ok(Self::Circle),
            other => Err(ValidationError::UnknownShapeKind(other.to_string())),
        }
    }
}

/// One gallery tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub id: EntityId,
    /// Serialized as `type` to match the stored snapshot format.
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub color: String,
}

/// Live counters shown next to the gallery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeCounts {
    pub total: usize,
    pub square: usize,
    pub circle: usize,
}

/// Complete gallery snapshot, replaced wholesale on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryState {
    pub shapes: Vec<Shape>,
}

impl GalleryState {
    pub fn counts(&self) -> ShapeCounts {
        self.shapes
            .iter()
            .fold(ShapeCounts::default(), |mut counts, shape| {
                match shape.kind {
                    ShapeKind::Square => counts.square += 1,
                    ShapeKind::Circle => counts.circle += 1,
                }
                counts.total += 1;
                counts
            })
    }

    pub fn find(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_unique_ids(self.shapes.iter().map(|shape| shape.id.as_str()))
    }
}
