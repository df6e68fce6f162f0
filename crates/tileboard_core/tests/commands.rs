use tileboard_core::command::board::{handle_board_click, handle_board_edit};
use tileboard_core::command::gallery::{
    handle_add_click, handle_recolor_click, handle_shape_click,
};
use tileboard_core::{
    BoardStore, ColumnKey, CommandOutcome, ElementMeta, EventPath, GalleryStore, IgnoreReason,
    KeyValueStorage, MemoryStorage, ShapeKind, ValidationError,
};

#[test]
fn gallery_add_button_dispatches_kind() {
    let store = GalleryStore::open(MemoryStorage::new());

    let outcome = handle_add_click(&store, &button("add", "circle")).unwrap();

    assert_eq!(outcome, CommandOutcome::Applied);
    assert_eq!(store.get_state().shapes[0].kind, ShapeKind::Circle);
}

#[test]
fn gallery_add_with_unknown_kind_is_ignored() {
    let store = GalleryStore::open(MemoryStorage::new());

    let outcome = handle_add_click(&store, &button("add", "hexagon")).unwrap();

    assert_eq!(
        outcome,
        CommandOutcome::Ignored(IgnoreReason::Invalid(ValidationError::UnknownShapeKind(
            "hexagon".to_string()
        )))
    );
    assert!(store.get_state().shapes.is_empty());
    assert!(store.storage().is_empty());
}

#[test]
fn gallery_recolor_button_reports_unchanged_without_matches() {
    let store = GalleryStore::open(MemoryStorage::new());
    store.add_shape(ShapeKind::Square).unwrap();

    let outcome = handle_recolor_click(&store, &button("recolor", "circle")).unwrap();
    assert_eq!(outcome, CommandOutcome::Unchanged);

    let outcome = handle_recolor_click(&store, &button("recolor", "square")).unwrap();
    assert_eq!(outcome, CommandOutcome::Applied);
}

#[test]
fn clicking_inside_a_tile_removes_it() {
    let store = GalleryStore::open(MemoryStorage::new());
    let id = store.add_shape(ShapeKind::Square).unwrap();

    let path = EventPath::default()
        .then(ElementMeta::new().with("class", "shape__label"))
        .then(ElementMeta::new().with("shape-id", id.as_str()).with("shape-type", "square"))
        .then(ElementMeta::new().with("shapes", ""));
    assert_eq!(handle_shape_click(&store, &path).unwrap(), CommandOutcome::Applied);
    assert!(store.get_state().shapes.is_empty());

    let container_only = EventPath::default().then(ElementMeta::new().with("shapes", ""));
    assert_eq!(
        handle_shape_click(&store, &container_only).unwrap(),
        CommandOutcome::Ignored(IgnoreReason::MissingAttribute("shape-id"))
    );
}

#[test]
fn board_column_buttons_dispatch_to_their_column() {
    let store = BoardStore::open(MemoryStorage::new());

    let add = column_button("add", "doing");
    assert_eq!(handle_board_click(&store, &add).unwrap(), CommandOutcome::Applied);
    assert_eq!(store.get_state().column(ColumnKey::Doing).len(), 1);

    let sort = column_button("sort", "doing");
    assert_eq!(
        handle_board_click(&store, &sort).unwrap(),
        CommandOutcome::Unchanged
    );

    let recolor = column_button("color-column", "doing");
    assert_eq!(
        handle_board_click(&store, &recolor).unwrap(),
        CommandOutcome::Applied
    );
}

#[test]
fn board_card_buttons_move_recolor_and_delete() {
    let store = BoardStore::open(MemoryStorage::new());
    let id = store.add_card(ColumnKey::Todo).unwrap();

    let left = card_button("move-left", &id, "todo");
    assert_eq!(
        handle_board_click(&store, &left).unwrap(),
        CommandOutcome::Unchanged
    );

    let right = card_button("move-right", &id, "todo");
    assert_eq!(
        handle_board_click(&store, &right).unwrap(),
        CommandOutcome::Applied
    );
    assert_eq!(store.get_state().locate(&id), Some(ColumnKey::Doing));

    let recolor = card_button("recolor", &id, "doing");
    assert_eq!(
        handle_board_click(&store, &recolor).unwrap(),
        CommandOutcome::Applied
    );

    let delete = card_button("delete", &id, "doing");
    assert_eq!(
        handle_board_click(&store, &delete).unwrap(),
        CommandOutcome::Applied
    );
    assert_eq!(store.get_state().total_cards(), 0);
}

#[test]
fn board_click_without_usable_metadata_is_ignored() {
    let store = BoardStore::open(MemoryStorage::new());

    let no_action = EventPath::default().then(ElementMeta::new().with("column", "todo"));
    assert_eq!(
        handle_board_click(&store, &no_action).unwrap(),
        CommandOutcome::Ignored(IgnoreReason::MissingAttribute("action"))
    );

    let unknown = column_button("explode", "todo");
    assert_eq!(
        handle_board_click(&store, &unknown).unwrap(),
        CommandOutcome::Ignored(IgnoreReason::UnknownAction("explode".to_string()))
    );

    let bad_column = column_button("add", "backlog");
    assert_eq!(
        handle_board_click(&store, &bad_column).unwrap(),
        CommandOutcome::Ignored(IgnoreReason::Invalid(ValidationError::UnknownColumn(
            "backlog".to_string()
        )))
    );

    let delete_without_card = column_button("delete", "todo");
    assert_eq!(
        handle_board_click(&store, &delete_without_card).unwrap(),
        CommandOutcome::Ignored(IgnoreReason::MissingAttribute("id"))
    );
    assert_eq!(store.get_state().total_cards(), 0);
}

#[test]
fn board_title_edit_is_routed_through_store() {
    let storage = std::rc::Rc::new(MemoryStorage::new());
    let store = BoardStore::open(std::rc::Rc::clone(&storage));
    let id = store.add_card(ColumnKey::Todo).unwrap();

    let path = EventPath::default()
        .then(ElementMeta::new().with("class", "card__content"))
        .then(ElementMeta::new().with("id", id.as_str()).with("column", "todo"));
    assert_eq!(
        handle_board_edit(&store, &path, " Plan sprint ").unwrap(),
        CommandOutcome::Applied
    );

    assert_eq!(
        store.find_card(ColumnKey::Todo, &id).unwrap().title,
        "Plan sprint"
    );
    let raw = storage.get("kanban-board").unwrap().unwrap();
    assert!(raw.contains("Plan sprint"));
}

fn button(attribute: &str, value: &str) -> EventPath {
    EventPath::default().then(ElementMeta::new().with(attribute, value))
}

fn column_button(action: &str, column: &str) -> EventPath {
    EventPath::default()
        .then(ElementMeta::new().with("action", action))
        .then(ElementMeta::new().with("column", column))
}

fn card_button(action: &str, card_id: &str, column: &str) -> EventPath {
    EventPath::default()
        .then(ElementMeta::new().with("action", action))
        .then(ElementMeta::new().with("id", card_id).with("column", column))
        .then(ElementMeta::new().with("column", column))
}
