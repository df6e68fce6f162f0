//! Gallery screen state: shape tiles, live counters and the empty-state hint.

use crate::model::shape::{GalleryState, Shape, ShapeCounts};
use crate::render::reconciler::{reconcile, ReconcileStats};
use crate::render::RenderTarget;
use crate::storage::KeyValueStorage;
use crate::store::gallery::GalleryStore;
use crate::store::SubscriptionToken;
use std::cell::RefCell;
use std::rc::Rc;

pub struct GalleryView<T: RenderTarget<Shape>> {
    target: T,
    counts: ShapeCounts,
    empty_visible: bool,
    last_stats: ReconcileStats,
    renders: usize,
}

impl<T: RenderTarget<Shape>> GalleryView<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            counts: ShapeCounts::default(),
            empty_visible: true,
            last_stats: ReconcileStats::default(),
            renders: 0,
        }
    }

    /// Store change handler.
    pub fn render(&mut self, prev: Option<&GalleryState>, next: &GalleryState) {
        self.counts = next.counts();
        self.empty_visible = next.shapes.is_empty();
        self.last_stats = reconcile(
            &mut self.target,
            prev.map(|state| state.shapes.as_slice()),
            next.shapes.as_slice(),
        );
        self.renders += 1;
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn counts(&self) -> ShapeCounts {
        self.counts
    }

    pub fn empty_visible(&self) -> bool {
        self.empty_visible
    }

    pub fn last_stats(&self) -> ReconcileStats {
        self.last_stats
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl<T: RenderTarget<Shape> + 'static> GalleryView<T> {
    /// Subscribes `view` to `store`; the initial render happens immediately.
    pub fn attach<K: KeyValueStorage>(
        view: &Rc<RefCell<Self>>,
        store: &GalleryStore<K>,
    ) -> SubscriptionToken {
        let view = Rc::clone(view);
        store.subscribe_fn(move |prev, next| view.borrow_mut().render(prev, next))
    }
}
