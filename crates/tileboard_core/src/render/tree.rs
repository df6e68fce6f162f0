//! Headless visual container.
//!
//! Stands in for a DOM subtree: ordered keyed nodes with attribute maps and
//! stable handles, plus a log of every operation applied. Used by the CLI and
//! by tests that assert node identity across renders.

use crate::render::{NodeAttribute, RenderTarget, Renderable};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

/// Identity of one created node; never reused within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualNode {
    pub handle: NodeHandle,
    pub key: String,
    pub attributes: BTreeMap<NodeAttribute, String>,
}

/// One operation received from the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    Clear,
    Create {
        key: String,
        handle: NodeHandle,
    },
    Remove {
        key: String,
    },
    Patch {
        key: String,
        attribute: NodeAttribute,
        value: String,
    },
}

#[derive(Debug, Default)]
pub struct VisualTree {
    nodes: Vec<VisualNode>,
    index: HashMap<String, NodeHandle>,
    ops: Vec<RenderOp>,
    next_handle: u64,
}

impl VisualTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in display order.
    pub fn nodes(&self) -> &[VisualNode] {
        &self.nodes
    }

    pub fn keys(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.key.as_str()).collect()
    }

    pub fn handle(&self, key: &str) -> Option<NodeHandle> {
        self.index.get(key).copied()
    }

    pub fn node(&self, key: &str) -> Option<&VisualNode> {
        let handle = self.handle(key)?;
        self.nodes.iter().find(|node| node.handle == handle)
    }

    pub fn attribute(&self, key: &str, attribute: NodeAttribute) -> Option<&str> {
        self.node(key)?
            .attributes
            .get(&attribute)
            .map(String::as_str)
    }

    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Returns and clears the operation log.
    pub fn take_ops(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.ops)
    }

    /// One line per node: `key attr=value ...`.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            out.push_str(&node.key);
            for (attribute, value) in &node.attributes {
                let _ = write!(out, " {}={}", attribute.as_str(), value);
            }
            out.push('\n');
        }
        out
    }
}

impl<E: Renderable> RenderTarget<E> for VisualTree {
    fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.ops.push(RenderOp::Clear);
    }

    fn create_node(&mut self, entity: &E) {
        let handle = NodeHandle(self.next_handle);
        self.next_handle += 1;

        let key = entity.render_key().to_string();
        let attributes = entity
            .rendered_attributes()
            .into_iter()
            .map(|(attribute, value)| (attribute, value.to_string()))
            .collect();

        // Keys are unique per snapshot; a stale node with the same key is replaced.
        if let Some(stale) = self.index.insert(key.clone(), handle) {
            self.nodes.retain(|node| node.handle != stale);
        }
        self.nodes.push(VisualNode {
            handle,
            key: key.clone(),
            attributes,
        });
        self.ops.push(RenderOp::Create { key, handle });
    }

    fn remove_node(&mut self, key: &str) {
        if let Some(handle) = self.index.remove(key) {
            self.nodes.retain(|node| node.handle != handle);
        }
        self.ops.push(RenderOp::Remove {
            key: key.to_string(),
        });
    }

    fn patch_node(&mut self, key: &str, attribute: NodeAttribute, value: &str) {
        if let Some(handle) = self.handle(key) {
            if let Some(node) = self.nodes.iter_mut().find(|node| node.handle == handle) {
                node.attributes.insert(attribute, value.to_string());
            }
        }
        self.ops.push(RenderOp::Patch {
            key: key.to_string(),
            attribute,
            value: value.to_string(),
        });
    }
}
