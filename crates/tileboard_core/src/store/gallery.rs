//! Shape gallery mutations.
//!
//! Unknown ids and kinds with no matching shapes are no-ops returning
//! `Ok(false)`; nothing is persisted or notified for them.

use super::{Store, StoreResult};
use crate::model::shape::{GalleryState, Shape, ShapeCounts, ShapeKind};
use crate::model::{new_entity_id, EntityId};
use crate::storage::KeyValueStorage;

/// Store specialized for the shape gallery.
pub type GalleryStore<K> = Store<GalleryState, K>;

impl<K: KeyValueStorage> Store<GalleryState, K> {
    /// Appends a new shape of `kind` with a fresh id and random color.
    pub fn add_shape(&self, kind: ShapeKind) -> StoreResult<EntityId> {
        let shape = Shape {
            id: new_entity_id(),
            kind,
            color: self.random_color(),
        };
        let id = shape.id.clone();
        self.update("add_shape", move |prev| {
            let mut shapes = prev.shapes.clone();
            shapes.push(shape);
            Some(GalleryState { shapes })
        })?;
        Ok(id)
    }

    pub fn remove_shape(&self, id: &str) -> StoreResult<bool> {
        self.update("remove_shape", |prev| {
            if !prev.contains(id) {
                return None;
            }
            let shapes = prev
                .shapes
                .iter()
                .filter(|shape| shape.id != id)
                .cloned()
                .collect();
            Some(GalleryState { shapes })
        })
    }

    /// Gives the shape `id` a new random color.
    pub fn recolor_shape(&self, id: &str) -> StoreResult<bool> {
        self.update("recolor_shape", |prev| {
            if !prev.contains(id) {
                return None;
            }
            let shapes = prev
                .shapes
                .iter()
                .map(|shape| {
                    if shape.id == id {
                        Shape {
                            color: self.random_color(),
                            ..shape.clone()
                        }
                    } else {
                        shape.clone()
                    }
                })
                .collect();
            Some(GalleryState { shapes })
        })
    }

    /// Gives every shape of `kind` its own new random color.
    pub fn recolor_kind(&self, kind: ShapeKind) -> StoreResult<bool> {
        self.update("recolor_kind", |prev| {
            if !prev.shapes.iter().any(|shape| shape.kind == kind) {
                return None;
            }
            let shapes = prev
                .shapes
                .iter()
                .map(|shape| {
                    if shape.kind == kind {
                        Shape {
                            color: self.random_color(),
                            ..shape.clone()
                        }
                    } else {
                        shape.clone()
                    }
                })
                .collect();
            Some(GalleryState { shapes })
        })
    }

    pub fn counts(&self) -> ShapeCounts {
        self.get_state().counts()
    }
}
