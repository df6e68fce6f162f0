use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tileboard_core::command::gallery::handle_add_click;
use tileboard_core::{
    CommandOutcome, ElementMeta, EventPath, GalleryState, GalleryStore, IgnoreReason,
    KeyValueStorage, MemoryStorage, ShapeCounts, ShapeKind, StoreError, StoreOptions, Subscriber,
    ValidationError,
};

type Transition = (Option<GalleryState>, GalleryState);

#[test]
fn add_valid_kind_appends_one_shape_with_unique_id() {
    let store = seeded_store(MemoryStorage::new());

    let mut ids = HashSet::new();
    for kind in [ShapeKind::Square, ShapeKind::Circle, ShapeKind::Square] {
        let before = store.get_state().shapes.len();
        let id = store.add_shape(kind).unwrap();
        let state = store.get_state();

        assert_eq!(state.shapes.len(), before + 1);
        assert!(ids.insert(id.clone()), "id {id} was reused");
        let added = state.shapes.last().unwrap();
        assert_eq!(added.id, id);
        assert_eq!(added.kind, kind);
        assert!(added.color.starts_with("hsl("));
    }
}

#[test]
fn invalid_kind_leaves_state_and_storage_untouched() {
    let storage = Rc::new(MemoryStorage::new());
    let store = seeded_store(Rc::clone(&storage));
    store.add_shape(ShapeKind::Circle).unwrap();
    let before = store.get_state();
    let raw_before = storage.get("gallery-shapes").unwrap();

    let click = EventPath::default().then(ElementMeta::new().with("add", "triangle"));
    let outcome = handle_add_click(&store, &click).unwrap();

    assert_eq!(
        outcome,
        CommandOutcome::Ignored(IgnoreReason::Invalid(ValidationError::UnknownShapeKind(
            "triangle".to_string()
        )))
    );
    assert!(Rc::ptr_eq(&before, &store.get_state()));
    assert_eq!(storage.get("gallery-shapes").unwrap(), raw_before);
}

#[test]
fn removing_unknown_id_is_noop_and_known_id_shrinks_by_one() {
    let store = seeded_store(MemoryStorage::new());
    let square = store.add_shape(ShapeKind::Square).unwrap();
    store.add_shape(ShapeKind::Circle).unwrap();
    let before = store.get_state();

    assert!(!store.remove_shape("missing").unwrap());
    assert!(Rc::ptr_eq(&before, &store.get_state()));

    assert!(store.remove_shape(&square).unwrap());
    let after = store.get_state();
    assert_eq!(after.shapes.len(), before.shapes.len() - 1);
    assert!(!after.contains(&square));
}

#[test]
fn recolor_shape_changes_only_that_color() {
    let store = preloaded_store();

    assert!(store.recolor_shape("sq-1").unwrap());
    let state = store.get_state();

    let recolored = state.find("sq-1").unwrap();
    assert_eq!(recolored.kind, ShapeKind::Square);
    assert_ne!(recolored.color, "red");
    assert_eq!(state.find("sq-2").unwrap().color, "red");
    assert_eq!(state.find("ci-1").unwrap().color, "blue");
    assert!(!store.recolor_shape("missing").unwrap());
}

#[test]
fn recolor_kind_touches_every_shape_of_kind_and_no_others() {
    let store = preloaded_store();

    assert!(store.recolor_kind(ShapeKind::Square).unwrap());
    let state = store.get_state();

    let ids: Vec<&str> = state.shapes.iter().map(|shape| shape.id.as_str()).collect();
    assert_eq!(ids, vec!["sq-1", "ci-1", "sq-2"]);
    assert_ne!(state.find("sq-1").unwrap().color, "red");
    assert_ne!(state.find("sq-2").unwrap().color, "red");
    assert_eq!(state.find("ci-1").unwrap().color, "blue");
}

#[test]
fn subscribe_calls_back_immediately_with_no_previous_state() {
    let store = preloaded_store();
    let (seen, handler) = recorder();

    store.subscribe(handler);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, None);
    assert_eq!(seen[0].1.shapes.len(), 3);
}

#[test]
fn mutations_notify_with_previous_and_next_snapshots() {
    let store = seeded_store(MemoryStorage::new());
    let (seen, handler) = recorder();
    store.subscribe(handler);

    let id = store.add_shape(ShapeKind::Square).unwrap();
    store.remove_shape("missing").unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2, "no-op removal must not notify");
    let (prev, next) = &seen[1];
    assert_eq!(prev.as_ref().unwrap().shapes.len(), 0);
    assert_eq!(next.shapes[0].id, id);
}

#[test]
fn duplicate_subscription_is_registered_once() {
    let store = seeded_store(MemoryStorage::new());
    let (seen, handler) = recorder();

    let first = store.subscribe(Rc::clone(&handler));
    let second = store.subscribe(handler);
    assert_eq!(first, second);
    assert_eq!(store.subscriber_count(), 1);

    store.add_shape(ShapeKind::Circle).unwrap();
    let notifications = seen.borrow().iter().filter(|(prev, _)| prev.is_some()).count();
    assert_eq!(notifications, 1);
}

#[test]
fn unsubscribe_stops_notifications() {
    let store = seeded_store(MemoryStorage::new());
    let (seen, handler) = recorder();
    let token = store.subscribe(handler);

    assert!(store.unsubscribe(token));
    assert!(!store.unsubscribe(token));
    store.add_shape(ShapeKind::Circle).unwrap();

    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn subscriber_reading_state_sees_committed_snapshot() {
    let store = Rc::new(seeded_store(MemoryStorage::new()));
    let observed = Rc::new(RefCell::new(Vec::new()));

    let weak_store = Rc::downgrade(&store);
    let sink = Rc::clone(&observed);
    store.subscribe_fn(move |_, next| {
        let store = weak_store.upgrade().unwrap();
        assert_eq!(*store.get_state(), *next);
        sink.borrow_mut().push(store.counts().total);
    });

    store.add_shape(ShapeKind::Square).unwrap();
    store.add_shape(ShapeKind::Square).unwrap();
    assert_eq!(*observed.borrow(), vec![0, 1, 2]);
}

#[test]
fn every_mutation_is_persisted_before_returning() {
    let storage = Rc::new(MemoryStorage::new());
    let store = seeded_store(Rc::clone(&storage));

    let id = store.add_shape(ShapeKind::Circle).unwrap();
    let raw = storage.get("gallery-shapes").unwrap().unwrap();
    let persisted: GalleryState = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, *store.get_state());
    assert_eq!(persisted.shapes[0].id, id);
}

#[test]
fn failed_write_leaves_state_uncommitted_and_silent() {
    let storage = Rc::new(MemoryStorage::with_quota(200));
    let store = seeded_store(Rc::clone(&storage));
    let (seen, handler) = recorder();
    store.subscribe(handler);

    store.add_shape(ShapeKind::Square).unwrap();

    let (before, err) = loop {
        let before = store.get_state();
        match store.add_shape(ShapeKind::Circle) {
            Ok(_) => continue,
            Err(err) => break (before, err),
        }
    };
    assert!(matches!(err, StoreError::StorageWrite(_)));

    assert!(Rc::ptr_eq(&before, &store.get_state()));
    let raw = storage.get("gallery-shapes").unwrap().unwrap();
    let persisted: GalleryState = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, *before);
    assert_eq!(seen.borrow().len(), 1 + before.shapes.len());
}

#[test]
fn shapes_end_to_end_scenario() {
    let store = seeded_store(MemoryStorage::new());

    let square = store.add_shape(ShapeKind::Square).unwrap();
    let circle = store.add_shape(ShapeKind::Circle).unwrap();
    assert_eq!(
        store.counts(),
        ShapeCounts {
            total: 2,
            square: 1,
            circle: 1,
        }
    );

    let circle_color = store.get_state().find(&circle).unwrap().color.clone();
    assert!(store.recolor_kind(ShapeKind::Square).unwrap());
    let state = store.get_state();
    assert_eq!(state.find(&circle).unwrap().color, circle_color);
    assert_eq!(state.find(&square).unwrap().kind, ShapeKind::Square);

    assert!(store.remove_shape(&square).unwrap());
    assert_eq!(
        store.counts(),
        ShapeCounts {
            total: 1,
            square: 0,
            circle: 1,
        }
    );
}

fn seeded_store<K: KeyValueStorage>(storage: K) -> GalleryStore<K> {
    GalleryStore::with_options(
        storage,
        StoreOptions {
            rng_seed: Some(5),
            ..StoreOptions::default()
        },
    )
}

fn preloaded_store() -> GalleryStore<MemoryStorage> {
    let storage = MemoryStorage::new();
    storage
        .set(
            "gallery-shapes",
            r#"{"shapes":[
                {"id":"sq-1","type":"square","color":"red"},
                {"id":"ci-1","type":"circle","color":"blue"},
                {"id":"sq-2","type":"square","color":"red"}
            ]}"#,
        )
        .unwrap();
    seeded_store(storage)
}

fn recorder() -> (Rc<RefCell<Vec<Transition>>>, Subscriber<GalleryState>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let handler: Subscriber<GalleryState> = Rc::new(move |prev: Option<&GalleryState>, next: &GalleryState| {
        sink.borrow_mut().push((prev.cloned(), next.clone()));
    });
    (seen, handler)
}
