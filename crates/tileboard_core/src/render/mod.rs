//! Incremental rendering of snapshots onto a visual tree.
//!
//! # Responsibility
//! - Describe the render-target capability the reconciler drives.
//! - Map entities to their keyed, attribute-carrying visual nodes.
//!
//! # Invariants
//! - Nodes are addressed by entity id only, never by position.
//! - A node kept across renders is patched in place, never recreated.

pub mod board_view;
pub mod gallery_view;
pub mod reconciler;
pub mod tree;

use crate::model::card::Card;
use crate::model::shape::Shape;

/// Visual attribute a node can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeAttribute {
    Kind,
    Color,
    Title,
    CanMoveLeft,
    CanMoveRight,
}

impl NodeAttribute {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kind => "kind",
            Self::Color => "color",
            Self::Title => "title",
            Self::CanMoveLeft => "can-move-left",
            Self::CanMoveRight => "can-move-right",
        }
    }
}

/// An entity that renders as one keyed node.
pub trait Renderable {
    /// Stable key, equal to the entity id.
    fn render_key(&self) -> &str;
    /// Every attribute shown by the node, in a fixed order.
    fn rendered_attributes(&self) -> Vec<(NodeAttribute, &str)>;
}

impl Renderable for Shape {
    fn render_key(&self) -> &str {
        &self.id
    }

    fn rendered_attributes(&self) -> Vec<(NodeAttribute, &str)> {
        vec![
            (NodeAttribute::Kind, self.kind.as_str()),
            (NodeAttribute::Color, self.color.as_str()),
        ]
    }
}

impl Renderable for Card {
    fn render_key(&self) -> &str {
        &self.id
    }

    fn rendered_attributes(&self) -> Vec<(NodeAttribute, &str)> {
        vec![
            (NodeAttribute::Title, self.title.as_str()),
            (NodeAttribute::Color, self.color.as_str()),
        ]
    }
}

/// Outbound capabilities of a visual container.
pub trait RenderTarget<E: Renderable> {
    /// Drops every node in the container.
    fn clear(&mut self);
    /// Appends a node tagged with `entity.render_key()`.
    fn create_node(&mut self, entity: &E);
    fn remove_node(&mut self, key: &str);
    fn patch_node(&mut self, key: &str, attribute: NodeAttribute, value: &str);
}
