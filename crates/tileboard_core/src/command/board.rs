//! Board click and edit handlers.

use super::{CommandOutcome, EventPath, IgnoreReason};
use crate::model::card::{ColumnKey, MoveDirection};
use crate::storage::KeyValueStorage;
use crate::store::board::BoardStore;
use crate::store::StoreResult;

pub const ACTION_ATTRIBUTE: &str = "action";
pub const COLUMN_ATTRIBUTE: &str = "column";
pub const CARD_ID_ATTRIBUTE: &str = "id";

/// Board button actions, keyed by the `action` attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    Add,
    RecolorColumn,
    Sort,
    Delete,
    Recolor,
    MoveLeft,
    MoveRight,
}

impl BoardAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "add" => Some(Self::Add),
            "color-column" => Some(Self::RecolorColumn),
            "sort" => Some(Self::Sort),
            "delete" => Some(Self::Delete),
            "recolor" => Some(Self::Recolor),
            "move-left" => Some(Self::MoveLeft),
            "move-right" => Some(Self::MoveRight),
            _ => None,
        }
    }

    fn needs_card(self) -> bool {
        !matches!(self, Self::Add | Self::RecolorColumn | Self::Sort)
    }
}

fn resolve_column(path: &EventPath) -> Result<ColumnKey, IgnoreReason> {
    path.closest(COLUMN_ATTRIBUTE)
        .ok_or(IgnoreReason::MissingAttribute(COLUMN_ATTRIBUTE))?
        .parse()
        .map_err(IgnoreReason::Invalid)
}

/// Any button click inside the board.
pub fn handle_board_click<K: KeyValueStorage>(
    store: &BoardStore<K>,
    path: &EventPath,
) -> StoreResult<CommandOutcome> {
    let Some(raw_action) = path.closest(ACTION_ATTRIBUTE) else {
        return Ok(CommandOutcome::ignored(IgnoreReason::MissingAttribute(
            ACTION_ATTRIBUTE,
        )));
    };
    let Some(action) = BoardAction::parse(raw_action) else {
        return Ok(CommandOutcome::ignored(IgnoreReason::UnknownAction(
            raw_action.to_string(),
        )));
    };
    let column = match resolve_column(path) {
        Ok(column) => column,
        Err(reason) => return Ok(CommandOutcome::ignored(reason)),
    };
    let card_id = path.closest(CARD_ID_ATTRIBUTE).filter(|id| !id.is_empty());
    if action.needs_card() && card_id.is_none() {
        return Ok(CommandOutcome::ignored(IgnoreReason::MissingAttribute(
            CARD_ID_ATTRIBUTE,
        )));
    }
    let card_id = card_id.unwrap_or_default();

    let changed = match action {
        BoardAction::Add => {
            store.add_card(column)?;
            true
        }
        BoardAction::RecolorColumn => store.recolor_column(column)?,
        BoardAction::Sort => store.sort_column(column)?,
        BoardAction::Delete => store.remove_card(column, card_id)?,
        BoardAction::Recolor => store.recolor_card(column, card_id)?,
        BoardAction::MoveLeft => store.move_card(card_id, column, MoveDirection::Left)?,
        BoardAction::MoveRight => store.move_card(card_id, column, MoveDirection::Right)?,
    };
    Ok(CommandOutcome::from_changed(changed))
}

/// Text edit inside a card body; the new title goes through the store.
pub fn handle_board_edit<K: KeyValueStorage>(
    store: &BoardStore<K>,
    path: &EventPath,
    text: &str,
) -> StoreResult<CommandOutcome> {
    let Some(card_id) = path.closest(CARD_ID_ATTRIBUTE) else {
        return Ok(CommandOutcome::ignored(IgnoreReason::MissingAttribute(
            CARD_ID_ATTRIBUTE,
        )));
    };
    let column = match resolve_column(path) {
        Ok(column) => column,
        Err(reason) => return Ok(CommandOutcome::ignored(reason)),
    };
    Ok(CommandOutcome::from_changed(
        store.rename_card(column, card_id, text)?,
    ))
}
