//! Kanban board model.
//!
//! # Responsibility
//! - Define cards, the fixed column order and the board snapshot.
//!
//! # Invariants
//! - The board always has exactly the `todo`, `doing` and `done` columns.
//! - Card ids are unique across all columns, so a card lives in one column.
//! - Column membership is the only "type" a card has.

use crate::model::{ensure_unique_ids, EntityId, ValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Title given to freshly added cards.
pub const DEFAULT_CARD_TITLE: &str = "New card";
/// Title stored when an edit leaves only whitespace.
pub const UNTITLED_CARD_TITLE: &str = "Untitled";

/// Workflow columns in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKey {
    Todo,
    Doing,
    Done,
}

impl ColumnKey {
    pub const ORDER: [ColumnKey; 3] = [ColumnKey::Todo, ColumnKey::Doing, ColumnKey::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    fn position(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::Doing => 1,
            Self::Done => 2,
        }
    }

    /// Adjacent column in `direction`, or `None` past either end.
    pub fn neighbor(self, direction: MoveDirection) -> Option<ColumnKey> {
        let target = self.position().checked_add_signed(direction.offset())?;
        Self::ORDER.get(target).copied()
    }
}

impl FromStr for ColumnKey {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            other => Err(ValidationError::UnknownColumn(other.to_string())),
        }
    }
}

/// Horizontal move between adjacent columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
}

impl MoveDirection {
    pub fn offset(self) -> isize {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// One board card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: EntityId,
    pub title: String,
    pub color: String,
}

/// The three column buckets.
///
/// Columns missing from stored data load as empty buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumns {
    #[serde(default)]
    pub todo: Vec<Card>,
    #[serde(default)]
    pub doing: Vec<Card>,
    #[serde(default)]
    pub done: Vec<Card>,
}

/// Complete board snapshot, replaced wholesale on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    #[serde(default)]
    pub columns: BoardColumns,
}

impl BoardState {
    pub fn column(&self, key: ColumnKey) -> &[Card] {
        match key {
            ColumnKey::Todo => &self.columns.todo,
            ColumnKey::Doing => &self.columns.doing,
            ColumnKey::Done => &self.columns.done,
        }
    }

    pub fn column_mut(&mut self, key: ColumnKey) -> &mut Vec<Card> {
        match key {
            ColumnKey::Todo => &mut self.columns.todo,
            ColumnKey::Doing => &mut self.columns.doing,
            ColumnKey::Done => &mut self.columns.done,
        }
    }

    pub fn find_card(&self, key: ColumnKey, id: &str) -> Option<&Card> {
        self.column(key).iter().find(|card| card.id == id)
    }

    /// Returns the column currently holding `id`.
    pub fn locate(&self, id: &str) -> Option<ColumnKey> {
        ColumnKey::ORDER
            .into_iter()
            .find(|key| self.find_card(*key, id).is_some())
    }

    pub fn total_cards(&self) -> usize {
        ColumnKey::ORDER
            .iter()
            .map(|key| self.column(*key).len())
            .sum()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_unique_ids(
            ColumnKey::ORDER
                .iter()
                .flat_map(|key| self.column(*key))
                .map(|card| card.id.as_str()),
        )
    }
}

/// Normalizes an edited title: trims, and substitutes a placeholder when blank.
pub fn normalize_title(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNTITLED_CARD_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_title, BoardState, Card, ColumnKey, MoveDirection};
    use crate::model::ValidationError;

    fn card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            title: id.to_string(),
            color: "hsl(1 70% 85%)".to_string(),
        }
    }

    #[test]
    fn neighbor_stops_at_both_ends() {
        assert_eq!(ColumnKey::Todo.neighbor(MoveDirection::Left), None);
        assert_eq!(
            ColumnKey::Todo.neighbor(MoveDirection::Right),
            Some(ColumnKey::Doing)
        );
        assert_eq!(
            ColumnKey::Done.neighbor(MoveDirection::Left),
            Some(ColumnKey::Doing)
        );
        assert_eq!(ColumnKey::Done.neighbor(MoveDirection::Right), None);
    }

    #[test]
    fn missing_columns_deserialize_as_empty() {
        let state: BoardState =
            serde_json::from_str(r#"{"columns":{"doing":[{"id":"x","title":"t","color":"c"}]}}"#)
                .unwrap();
        assert!(state.column(ColumnKey::Todo).is_empty());
        assert_eq!(state.column(ColumnKey::Doing).len(), 1);
        assert!(state.column(ColumnKey::Done).is_empty());

        let empty: BoardState = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, BoardState::default());
    }

    #[test]
    fn validate_rejects_ids_shared_between_columns() {
        let mut state = BoardState::default();
        state.column_mut(ColumnKey::Todo).push(card("a"));
        state.column_mut(ColumnKey::Done).push(card("a"));
        assert_eq!(
            state.validate(),
            Err(ValidationError::DuplicateId("a".to_string()))
        );
    }

    #[test]
    fn locate_finds_owning_column() {
        let mut state = BoardState::default();
        state.column_mut(ColumnKey::Doing).push(card("a"));
        assert_eq!(state.locate("a"), Some(ColumnKey::Doing));
        assert_eq!(state.locate("zzz"), None);
    }

    #[test]
    fn blank_titles_become_placeholder() {
        assert_eq!(normalize_title("  ship it "), "ship it");
        assert_eq!(normalize_title(" \n "), "Untitled");
    }
}
