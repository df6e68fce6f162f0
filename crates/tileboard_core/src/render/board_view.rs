//! Board screen state: one reconciled container and card count per column.
//!
//! Cards render together with the column that holds them, so the move
//! buttons of the first and last column show as unavailable.

use crate::model::card::{BoardState, Card, ColumnKey, MoveDirection};
use crate::render::reconciler::{reconcile, ReconcileStats};
use crate::render::{NodeAttribute, RenderTarget, Renderable};
use crate::storage::KeyValueStorage;
use crate::store::board::BoardStore;
use crate::store::SubscriptionToken;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A card as rendered inside `column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedCard<'a> {
    pub card: &'a Card,
    pub column: ColumnKey,
}

impl PlacedCard<'_> {
    pub fn can_move(&self, direction: MoveDirection) -> bool {
        self.column.neighbor(direction).is_some()
    }
}

fn flag(enabled: bool) -> &'static str {
    if enabled {
        "true"
    } else {
        "false"
    }
}

impl Renderable for PlacedCard<'_> {
    fn render_key(&self) -> &str {
        self.card.render_key()
    }

    fn rendered_attributes(&self) -> Vec<(NodeAttribute, &str)> {
        let mut attributes = self.card.rendered_attributes();
        attributes.push((
            NodeAttribute::CanMoveLeft,
            flag(self.can_move(MoveDirection::Left)),
        ));
        attributes.push((
            NodeAttribute::CanMoveRight,
            flag(self.can_move(MoveDirection::Right)),
        ));
        attributes
    }
}

fn placed(column: ColumnKey, cards: &[Card]) -> Vec<PlacedCard<'_>> {
    cards.iter().map(|card| PlacedCard { card, column }).collect()
}

pub struct ColumnPane<T> {
    pub target: T,
    pub count: usize,
    pub last_stats: ReconcileStats,
}

pub struct BoardView<T: for<'a> RenderTarget<PlacedCard<'a>>> {
    panes: BTreeMap<ColumnKey, ColumnPane<T>>,
}

impl<T: for<'a> RenderTarget<PlacedCard<'a>>> BoardView<T> {
    /// Builds one pane per column with a target from `make_target`.
    pub fn new(mut make_target: impl FnMut(ColumnKey) -> T) -> Self {
        let panes = ColumnKey::ORDER
            .into_iter()
            .map(|key| {
                let pane = ColumnPane {
                    target: make_target(key),
                    count: 0,
                    last_stats: ReconcileStats::default(),
                };
                (key, pane)
            })
            .collect();
        Self { panes }
    }

    /// Store change handler; each column is reconciled independently.
    pub fn render(&mut self, prev: Option<&BoardState>, next: &BoardState) {
        for (key, pane) in self.panes.iter_mut() {
            let next_cards = placed(*key, next.column(*key));
            let prev_cards = prev.map(|state| placed(*key, state.column(*key)));
            pane.last_stats = reconcile(&mut pane.target, prev_cards.as_deref(), &next_cards);
            pane.count = next_cards.len();
        }
    }

    pub fn pane(&self, key: ColumnKey) -> &ColumnPane<T> {
        &self.panes[&key]
    }

    pub fn panes(&self) -> impl Iterator<Item = (ColumnKey, &ColumnPane<T>)> {
        self.panes.iter().map(|(key, pane)| (*key, pane))
    }
}

impl<T: for<'a> RenderTarget<PlacedCard<'a>> + 'static> BoardView<T> {
    /// Subscribes `view` to `store`; the initial render happens immediately.
    pub fn attach<K: KeyValueStorage>(
        view: &Rc<RefCell<Self>>,
        store: &BoardStore<K>,
    ) -> SubscriptionToken {
        let view = Rc::clone(view);
        store.subscribe_fn(move |prev, next| view.borrow_mut().render(prev, next))
    }
}
