//! Kanban board mutations.
//!
//! Every board change, title edits included, goes through `Store::update`, so
//! the persisted board and the in-memory board never diverge.

use super::{Store, StoreResult};
use crate::model::card::{
    normalize_title, BoardState, Card, ColumnKey, MoveDirection, DEFAULT_CARD_TITLE,
};
use crate::model::collation::compare_titles;
use crate::model::{new_entity_id, EntityId};
use crate::storage::KeyValueStorage;

/// Store specialized for the Kanban board.
pub type BoardStore<K> = Store<BoardState, K>;

impl<K: KeyValueStorage> Store<BoardState, K> {
    /// Appends a placeholder card to `column`.
    pub fn add_card(&self, column: ColumnKey) -> StoreResult<EntityId> {
        let card = Card {
            id: new_entity_id(),
            title: DEFAULT_CARD_TITLE.to_string(),
            color: self.random_color(),
        };
        let id = card.id.clone();
        self.update("add_card", move |prev| {
            let mut next = prev.clone();
            next.column_mut(column).push(card);
            Some(next)
        })?;
        Ok(id)
    }

    pub fn remove_card(&self, column: ColumnKey, id: &str) -> StoreResult<bool> {
        self.update("remove_card", |prev| {
            prev.find_card(column, id)?;
            let mut next = prev.clone();
            next.column_mut(column).retain(|card| card.id != id);
            Some(next)
        })
    }

    /// Moves card `id` from `from` to the end of the adjacent column.
    ///
    /// No-op past the first/last column or when `from` does not hold the card.
    pub fn move_card(&self, id: &str, from: ColumnKey, direction: MoveDirection) -> StoreResult<bool> {
        self.update("move_card", |prev| {
            let to = from.neighbor(direction)?;
            let card = prev.find_card(from, id)?.clone();
            let mut next = prev.clone();
            next.column_mut(from).retain(|existing| existing.id != id);
            next.column_mut(to).push(card);
            Some(next)
        })
    }

    pub fn recolor_card(&self, column: ColumnKey, id: &str) -> StoreResult<bool> {
        self.update("recolor_card", |prev| {
            prev.find_card(column, id)?;
            let mut next = prev.clone();
            for card in next.column_mut(column).iter_mut() {
                if card.id == id {
                    card.color = self.random_color();
                }
            }
            Some(next)
        })
    }

    /// Gives every card in `column` its own new random color.
    pub fn recolor_column(&self, column: ColumnKey) -> StoreResult<bool> {
        self.update("recolor_column", |prev| {
            if prev.column(column).is_empty() {
                return None;
            }
            let mut next = prev.clone();
            for card in next.column_mut(column).iter_mut() {
                card.color = self.random_color();
            }
            Some(next)
        })
    }

    /// Orders `column` by title, case- and accent-insensitively; ties keep
    /// their current order.
    pub fn sort_column(&self, column: ColumnKey) -> StoreResult<bool> {
        self.update("sort_column", |prev| {
            let mut sorted = prev.column(column).to_vec();
            sorted.sort_by(|left, right| compare_titles(&left.title, &right.title));
            if sorted == prev.column(column) {
                return None;
            }
            let mut next = prev.clone();
            *next.column_mut(column) = sorted;
            Some(next)
        })
    }

    /// Replaces a card title; blank input stores the untitled placeholder.
    pub fn rename_card(&self, column: ColumnKey, id: &str, title: &str) -> StoreResult<bool> {
        let title = normalize_title(title);
        self.update("rename_card", |prev| {
            let current = prev.find_card(column, id)?;
            if current.title == title {
                return None;
            }
            let mut next = prev.clone();
            for card in next.column_mut(column).iter_mut() {
                if card.id == id {
                    card.title = title.clone();
                }
            }
            Some(next)
        })
    }

    pub fn find_card(&self, column: ColumnKey, id: &str) -> Option<Card> {
        self.get_state().find_card(column, id).cloned()
    }
}
