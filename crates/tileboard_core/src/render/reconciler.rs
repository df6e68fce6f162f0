//! Keyed diff between two entity sequences.
//!
//! # Invariants
//! - `prev == None` always rebuilds the container from `next`.
//! - Otherwise vanished keys are removed, new keys appended in `next` order
//!   and kept keys only receive patches for attributes that changed.
//! - New nodes can only be appended, so when kept keys change relative order,
//!   or a new key lands before a kept one, the container is rebuilt instead.

use crate::render::{RenderTarget, Renderable};
use log::trace;
use std::collections::HashMap;

/// What one reconciliation did to its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub rebuilt: bool,
    pub created: usize,
    pub removed: usize,
    pub patched: usize,
}

/// Brings `target` from the rendering of `prev` to the rendering of `next`.
pub fn reconcile<E, T>(target: &mut T, prev: Option<&[E]>, next: &[E]) -> ReconcileStats
where
    E: Renderable,
    T: RenderTarget<E> + ?Sized,
{
    let Some(prev) = prev else {
        return rebuild(target, next);
    };

    let prev_by_key: HashMap<&str, &E> = prev.iter().map(|e| (e.render_key(), e)).collect();
    let next_by_key: HashMap<&str, &E> = next.iter().map(|e| (e.render_key(), e)).collect();

    if !appendable(prev, next, &prev_by_key, &next_by_key) {
        trace!("event=reconcile module=render status=rebuild reason=order_changed");
        return rebuild(target, next);
    }

    let mut stats = ReconcileStats::default();

    for entity in prev {
        let key = entity.render_key();
        if !next_by_key.contains_key(key) {
            target.remove_node(key);
            stats.removed += 1;
        }
    }

    for entity in next {
        let key = entity.render_key();
        let Some(previous) = prev_by_key.get(key) else {
            target.create_node(entity);
            stats.created += 1;
            continue;
        };

        let old_attributes = previous.rendered_attributes();
        for (attribute, value) in entity.rendered_attributes() {
            let unchanged = old_attributes
                .iter()
                .any(|(old_attribute, old_value)| *old_attribute == attribute && *old_value == value);
            if !unchanged {
                target.patch_node(key, attribute, value);
                stats.patched += 1;
            }
        }
    }

    stats
}

fn rebuild<E, T>(target: &mut T, next: &[E]) -> ReconcileStats
where
    E: Renderable,
    T: RenderTarget<E> + ?Sized,
{
    target.clear();
    for entity in next {
        target.create_node(entity);
    }
    ReconcileStats {
        rebuilt: true,
        created: next.len(),
        ..ReconcileStats::default()
    }
}

/// True when kept keys keep their relative order and all new keys come after them.
fn appendable<E: Renderable>(
    prev: &[E],
    next: &[E],
    prev_by_key: &HashMap<&str, &E>,
    next_by_key: &HashMap<&str, &E>,
) -> bool {
    let kept_before = prev
        .iter()
        .map(Renderable::render_key)
        .filter(|key| next_by_key.contains_key(key));

    let mut kept_after = Vec::new();
    let mut seen_new = false;
    for key in next.iter().map(Renderable::render_key) {
        if prev_by_key.contains_key(key) {
            if seen_new {
                return false;
            }
            kept_after.push(key);
        } else {
            seen_new = true;
        }
    }

    kept_before.eq(kept_after)
}
