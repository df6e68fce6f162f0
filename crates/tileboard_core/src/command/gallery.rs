//! Gallery click handlers.

use super::{CommandOutcome, EventPath, IgnoreReason};
use crate::model::shape::ShapeKind;
use crate::storage::KeyValueStorage;
use crate::store::gallery::GalleryStore;
use crate::store::StoreResult;

pub const ADD_ATTRIBUTE: &str = "add";
pub const RECOLOR_ATTRIBUTE: &str = "recolor";
pub const SHAPE_ID_ATTRIBUTE: &str = "shape-id";

fn resolve_kind(path: &EventPath, attribute: &'static str) -> Result<ShapeKind, IgnoreReason> {
    path.closest(attribute)
        .ok_or(IgnoreReason::MissingAttribute(attribute))?
        .parse()
        .map_err(IgnoreReason::Invalid)
}

/// "Add" button: the `add` attribute names the kind.
pub fn handle_add_click<K: KeyValueStorage>(
    store: &GalleryStore<K>,
    path: &EventPath,
) -> StoreResult<CommandOutcome> {
    match resolve_kind(path, ADD_ATTRIBUTE) {
        Ok(kind) => {
            store.add_shape(kind)?;
            Ok(CommandOutcome::Applied)
        }
        Err(reason) => Ok(CommandOutcome::ignored(reason)),
    }
}

/// "Recolor" button: the `recolor` attribute names the kind.
pub fn handle_recolor_click<K: KeyValueStorage>(
    store: &GalleryStore<K>,
    path: &EventPath,
) -> StoreResult<CommandOutcome> {
    match resolve_kind(path, RECOLOR_ATTRIBUTE) {
        Ok(kind) => Ok(CommandOutcome::from_changed(store.recolor_kind(kind)?)),
        Err(reason) => Ok(CommandOutcome::ignored(reason)),
    }
}

/// Click inside the tile container: removes the tile that was clicked.
pub fn handle_shape_click<K: KeyValueStorage>(
    store: &GalleryStore<K>,
    path: &EventPath,
) -> StoreResult<CommandOutcome> {
    match path.closest(SHAPE_ID_ATTRIBUTE) {
        Some(id) if !id.is_empty() => Ok(CommandOutcome::from_changed(store.remove_shape(id)?)),
        _ => Ok(CommandOutcome::ignored(IgnoreReason::MissingAttribute(
            SHAPE_ID_ATTRIBUTE,
        ))),
    }
}
